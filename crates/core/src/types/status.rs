//! Status enums for catalog entries, order lines and payments.
//!
//! Every order line carries exactly one [`LineStatus`]: a tailoring stage for
//! made-to-order services or a logistics stage for ready-made products. The
//! two tracks are disjoint, so a product can never be "stitching" and a suit
//! can never be "shipped".

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Generates `ALL`, `as_str`, `Display` and `FromStr` for a wire-named enum.
macro_rules! wire_enum {
    ($name:ident, $what:literal { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The wire name of this variant.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err(format!(concat!("invalid ", $what, ": {}"), s)),
                }
            }
        }
    };
}

/// Whether a catalog entry is made to order or sold off the shelf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemType {
    /// Bespoke tailoring, progresses through tailoring stages.
    Service,
    /// Ready-made goods, progress through logistics stages.
    #[default]
    Product,
}

wire_enum!(ItemType, "item type" {
    Service => "SERVICE",
    Product => "PRODUCT",
});

/// Progress of a made-to-order garment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceStage {
    MeasurementsPending,
    Cutting,
    Stitching,
    Fitting,
    Ready,
    Completed,
}

wire_enum!(ServiceStage, "service stage" {
    MeasurementsPending => "MEASUREMENTS_PENDING",
    Cutting => "CUTTING",
    Stitching => "STITCHING",
    Fitting => "FITTING",
    Ready => "READY",
    Completed => "COMPLETED",
});

impl ServiceStage {
    /// Whether the garment has been handed over.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// What is happening to the garment at this stage.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::MeasurementsPending => {
                "Customer measurements received. Waiting for tailor assignment."
            }
            Self::Cutting => {
                "Fabric has been selected and patterns are being cut by the master tailor."
            }
            Self::Stitching => "Garment is currently in the assembly phase on the sewing floor.",
            Self::Fitting => "Initial construction complete. Ready for customer fitting session.",
            Self::Ready => "Final adjustments made. Garment is pressed and ready for collection.",
            Self::Completed => "Order completed and handed over to customer.",
        }
    }
}

/// Progress of a ready-made product through fulfilment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogisticsStage {
    OrderPlaced,
    Packed,
    Shipped,
    Delivered,
}

wire_enum!(LogisticsStage, "logistics stage" {
    OrderPlaced => "ORDER_PLACED",
    Packed => "PACKED",
    Shipped => "SHIPPED",
    Delivered => "DELIVERED",
});

impl LogisticsStage {
    /// Whether the package has reached the customer.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// What is happening to the package at this stage.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::OrderPlaced => "Order received in warehouse system. Inventory reserved.",
            Self::Packed => "Item picked, quality checked, and packed in eco-friendly packaging.",
            Self::Shipped => {
                "Package handed over to courier service (G4S/Wells Fargo). In transit."
            }
            Self::Delivered => "Package delivered to customer address.",
        }
    }
}

/// Payment state of an order, independent of fulfilment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

wire_enum!(PaymentStatus, "payment status" {
    Pending => "PENDING",
    Paid => "PAID",
    Failed => "FAILED",
});

/// Fulfilment status of a single order line.
///
/// Serialized externally tagged, e.g. `{"tailoring":"FITTING"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStatus {
    Tailoring(ServiceStage),
    Logistics(LogisticsStage),
}

impl LineStatus {
    /// The status a freshly placed line of the given type starts in.
    #[must_use]
    pub const fn initial(item_type: ItemType) -> Self {
        match item_type {
            ItemType::Service => Self::Tailoring(ServiceStage::MeasurementsPending),
            ItemType::Product => Self::Logistics(LogisticsStage::OrderPlaced),
        }
    }

    /// The item type whose track this status belongs to.
    #[must_use]
    pub const fn item_type(&self) -> ItemType {
        match self {
            Self::Tailoring(_) => ItemType::Service,
            Self::Logistics(_) => ItemType::Product,
        }
    }

    /// Whether the line has reached the end of its track.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        match self {
            Self::Tailoring(stage) => stage.is_terminal(),
            Self::Logistics(stage) => stage.is_terminal(),
        }
    }

    /// Whether `self` comes earlier than `other` on the same track.
    ///
    /// Statuses on different tracks are never ordered.
    #[must_use]
    pub fn precedes(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Tailoring(a), Self::Tailoring(b)) => a < b,
            (Self::Logistics(a), Self::Logistics(b)) => a < b,
            _ => false,
        }
    }

    /// Wire name of the underlying stage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tailoring(stage) => stage.as_str(),
            Self::Logistics(stage) => stage.as_str(),
        }
    }

    /// Human-readable label, e.g. `MEASUREMENTS PENDING`.
    #[must_use]
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }

    /// Detailed description of the stage for back-office views.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Tailoring(stage) => stage.description(),
            Self::Logistics(stage) => stage.description(),
        }
    }
}

impl fmt::Display for LineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ServiceStage> for LineStatus {
    fn from(stage: ServiceStage) -> Self {
        Self::Tailoring(stage)
    }
}

impl From<LogisticsStage> for LineStatus {
    fn from(stage: LogisticsStage) -> Self {
        Self::Logistics(stage)
    }
}
