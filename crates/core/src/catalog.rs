//! Catalog entries and storefront filtering.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CatalogEntryId, ItemType, Kes};

/// Audit note recorded when an entry is first created.
pub const ITEM_CREATED: &str = "Item created";

/// Department an entry is shelved under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Men,
    Women,
    #[default]
    Accessories,
}

impl Category {
    pub const ALL: [Self; 3] = [Self::Men, Self::Women, Self::Accessories];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Men => "MEN",
            Self::Women => "WOMEN",
            Self::Accessories => "ACCESSORIES",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MEN" => Ok(Self::Men),
            "WOMEN" => Ok(Self::Women),
            "ACCESSORIES" => Ok(Self::Accessories),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}

/// Occasion a garment is suited for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occasion {
    #[serde(rename = "Business Formal")]
    BusinessFormal,
    #[serde(rename = "Business Casual")]
    BusinessCasual,
    #[serde(rename = "Smart Casual")]
    SmartCasual,
    #[serde(rename = "Traditional Wear")]
    TraditionalWear,
    Wedding,
    Burial,
    #[serde(rename = "Corporate Branding")]
    CorporateBranding,
}

impl Occasion {
    pub const ALL: [Self; 7] = [
        Self::BusinessFormal,
        Self::BusinessCasual,
        Self::SmartCasual,
        Self::TraditionalWear,
        Self::Wedding,
        Self::Burial,
        Self::CorporateBranding,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BusinessFormal => "Business Formal",
            Self::BusinessCasual => "Business Casual",
            Self::SmartCasual => "Smart Casual",
            Self::TraditionalWear => "Traditional Wear",
            Self::Wedding => "Wedding",
            Self::Burial => "Burial",
            Self::CorporateBranding => "Corporate Branding",
        }
    }
}

impl fmt::Display for Occasion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Occasion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|o| o.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("invalid occasion: {s}"))
    }
}

/// One line of an entry's change log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: DateTime<Utc>,
    pub change: String,
}

impl HistoryEntry {
    #[must_use]
    pub fn new(date: DateTime<Utc>, change: impl Into<String>) -> Self {
        Self {
            date,
            change: change.into(),
        }
    }
}

/// A sellable service or product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: CatalogEntryId,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub category: Category,
    pub name: String,
    pub description: String,
    pub price: Kes,
    /// URL or `data:` URI.
    pub image: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub occasions: Vec<Occasion>,
    /// Append-only change log, oldest first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<HistoryEntry>,
}

impl CatalogEntry {
    #[must_use]
    pub const fn is_service(&self) -> bool {
        matches!(self.item_type, ItemType::Service)
    }

    #[must_use]
    pub fn suits(&self, occasion: Occasion) -> bool {
        self.occasions.contains(&occasion)
    }

    /// Append a note to the change log.
    pub fn record_change(&mut self, date: DateTime<Utc>, change: impl Into<String>) {
        self.history.push(HistoryEntry::new(date, change));
    }
}

/// Storefront filter over the catalog.
///
/// `None` means "all" for category and occasion and "no bound" for price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogFilter {
    pub category: Option<Category>,
    pub occasion: Option<Occasion>,
    pub max_price: Option<Kes>,
}

impl CatalogFilter {
    #[must_use]
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        self.category.is_none_or(|c| entry.category == c)
            && self.occasion.is_none_or(|o| entry.suits(o))
            && self.max_price.is_none_or(|max| entry.price <= max)
    }

    /// Entries passing the filter, in catalog order.
    #[must_use]
    pub fn apply<'a>(&self, catalog: &'a [CatalogEntry]) -> Vec<&'a CatalogEntry> {
        catalog.iter().filter(|entry| self.matches(entry)).collect()
    }
}

/// The most expensive entry's price, used as the default price bound.
#[must_use]
pub fn max_catalog_price(catalog: &[CatalogEntry]) -> Kes {
    catalog.iter().map(|e| e.price).max().unwrap_or(Kes::ZERO)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    pub fn entry(id: &str, item_type: ItemType, category: Category, price: u64) -> CatalogEntry {
        CatalogEntry {
            id: CatalogEntryId::new(id),
            item_type,
            category,
            name: format!("Item {id}"),
            description: String::new(),
            price: Kes::new(price),
            image: format!("https://img.example/{id}.jpg"),
            occasions: Vec::new(),
            history: vec![HistoryEntry::new(
                Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).single().unwrap_or_default(),
                ITEM_CREATED,
            )],
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::fixtures::entry;
    use super::*;

    fn catalog() -> Vec<CatalogEntry> {
        let mut suit = entry("m-1", ItemType::Service, Category::Men, 15_000);
        suit.occasions = vec![Occasion::BusinessFormal, Occasion::Wedding];
        let mut dress = entry("w-1", ItemType::Service, Category::Women, 9_000);
        dress.occasions = vec![Occasion::Wedding];
        let belt = entry("a-1", ItemType::Product, Category::Accessories, 1_800);
        vec![suit, dress, belt]
    }

    #[test]
    fn test_default_filter_returns_full_catalog_in_order() {
        let catalog = catalog();
        let ids: Vec<_> = CatalogFilter::default()
            .apply(&catalog)
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, ["m-1", "w-1", "a-1"]);
    }

    #[test]
    fn test_filters_combine() {
        let catalog = catalog();
        let filter = CatalogFilter {
            category: None,
            occasion: Some(Occasion::Wedding),
            max_price: Some(Kes::new(10_000)),
        };
        let ids: Vec<_> = filter.apply(&catalog).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["w-1"]);
    }

    #[test]
    fn test_price_bound_is_inclusive() {
        let catalog = catalog();
        let filter = CatalogFilter {
            max_price: Some(Kes::new(1_800)),
            ..CatalogFilter::default()
        };
        assert_eq!(filter.apply(&catalog).len(), 1);
    }

    #[test]
    fn test_max_catalog_price() {
        assert_eq!(max_catalog_price(&catalog()), Kes::new(15_000));
        assert_eq!(max_catalog_price(&[]), Kes::ZERO);
    }

    #[test]
    fn test_entry_wire_format() {
        let json = r#"{
            "id": "m-1", "type": "SERVICE", "category": "MEN",
            "name": "Suit", "description": "Wool", "price": 15000,
            "image": "x.jpg", "occasions": ["Business Formal", "Traditional Wear"]
        }"#;
        let entry: CatalogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.item_type, ItemType::Service);
        assert_eq!(entry.occasions, [Occasion::BusinessFormal, Occasion::TraditionalWear]);
        assert!(entry.history.is_empty());
    }

    #[test]
    fn test_occasion_parse_is_case_insensitive() {
        assert_eq!("smart casual".parse(), Ok(Occasion::SmartCasual));
        assert!("Gala".parse::<Occasion>().is_err());
    }
}
