//! Progress steps shown on the customer's order tracker.
//!
//! Bespoke lines show five steps and ready-made lines show four. A completed
//! garment lights up the final step.

use serde::Serialize;

use crate::types::{ItemType, LineStatus, LogisticsStage, ServiceStage};

const SERVICE_STEPS: [&str; 5] = ["Measured", "Cutting", "Stitching", "Fitting", "Ready"];
const PRODUCT_STEPS: [&str; 4] = ["Placed", "Packed", "Shipped", "Delivered"];

/// Step labels for an item type's track.
#[must_use]
pub const fn step_labels(item_type: ItemType) -> &'static [&'static str] {
    match item_type {
        ItemType::Service => &SERVICE_STEPS,
        ItemType::Product => &PRODUCT_STEPS,
    }
}

/// Where a step sits relative to the current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    Done,
    Current,
    Upcoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Step {
    pub label: &'static str,
    pub state: StepState,
}

/// Rendered progress of one order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Zero-based index of the current step.
    pub current: usize,
    pub steps: Vec<Step>,
}

impl Progress {
    #[must_use]
    pub fn for_status(status: LineStatus) -> Self {
        let labels = step_labels(status.item_type());
        let current = step_index(status);
        let steps = labels
            .iter()
            .enumerate()
            .map(|(i, &label)| Step {
                label,
                state: match i.cmp(&current) {
                    std::cmp::Ordering::Less => StepState::Done,
                    std::cmp::Ordering::Equal => StepState::Current,
                    std::cmp::Ordering::Greater => StepState::Upcoming,
                },
            })
            .collect();
        Self { current, steps }
    }

    /// Share of the track covered, from 0 to 100.
    #[must_use]
    pub fn percent(&self) -> u8 {
        let last = self.steps.len().saturating_sub(1);
        if last == 0 {
            return 100;
        }
        u8::try_from(self.current.min(last) * 100 / last).unwrap_or(100)
    }
}

/// Index of the status within its track's visual steps.
#[must_use]
pub const fn step_index(status: LineStatus) -> usize {
    match status {
        LineStatus::Tailoring(stage) => match stage {
            ServiceStage::MeasurementsPending => 0,
            ServiceStage::Cutting => 1,
            ServiceStage::Stitching => 2,
            ServiceStage::Fitting => 3,
            ServiceStage::Ready | ServiceStage::Completed => 4,
        },
        LineStatus::Logistics(stage) => match stage {
            LogisticsStage::OrderPlaced => 0,
            LogisticsStage::Packed => 1,
            LogisticsStage::Shipped => 2,
            LogisticsStage::Delivered => 3,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_maps_to_last_step() {
        let progress = Progress::for_status(ServiceStage::Completed.into());
        assert_eq!(progress.current, 4);
        assert_eq!(progress.steps.len(), 5);
        assert_eq!(progress.percent(), 100);
        assert_eq!(progress.steps.last().map(|s| s.state), Some(StepState::Current));
    }

    #[test]
    fn test_step_states() {
        let progress = Progress::for_status(LogisticsStage::Packed.into());
        let states: Vec<_> = progress.steps.iter().map(|s| s.state).collect();
        assert_eq!(
            states,
            [StepState::Done, StepState::Current, StepState::Upcoming, StepState::Upcoming]
        );
        assert_eq!(progress.percent(), 33);
    }

    #[test]
    fn test_first_step_is_zero_percent() {
        let progress = Progress::for_status(LineStatus::initial(ItemType::Service));
        assert_eq!(progress.current, 0);
        assert_eq!(progress.percent(), 0);
        assert_eq!(progress.steps.first().map(|s| s.label), Some("Measured"));
    }
}
