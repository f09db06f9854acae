//! The shopping list item record.
//!
//! Items are only ever built from [`ItemFields`], which trims and validates
//! caller input, so every item in a collection has a non-empty name and a
//! finite, strictly positive price.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Category label given to items whose category is left blank.
pub const DEFAULT_CATEGORY: &str = "ไม่มีหมวดหมู่";

/// Opaque, immutable identifier of an item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why the engine declined a mutation. The collection is untouched in every case.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Rejection {
    /// The name is empty once surrounding whitespace is removed.
    #[error("item name must not be empty")]
    EmptyName,
    /// The price is not a finite number greater than zero.
    #[error("price must be a positive number, got {0:?}")]
    InvalidPrice(String),
    /// No item in the collection carries this id.
    #[error("item not found: {0}")]
    NotFound(ItemId),
}

/// Validated user-editable fields of an item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFields {
    name: String,
    price: f64,
    category: String,
}

impl ItemFields {
    /// Trims and checks raw input.
    ///
    /// The name must be non-empty after trimming and the price must be finite
    /// and strictly positive. A blank category falls back to [`DEFAULT_CATEGORY`].
    pub fn validate(name: &str, price: f64, category: &str) -> std::result::Result<Self, Rejection> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Rejection::EmptyName);
        }
        if !price.is_finite() || price <= 0.0 {
            return Err(Rejection::InvalidPrice(price.to_string()));
        }
        let category = match category.trim() {
            "" => DEFAULT_CATEGORY,
            c => c,
        };
        Ok(Self {
            name: name.to_string(),
            price,
            category: category.to_string(),
        })
    }
}

/// Reads a price typed into a numeric text field.
pub fn parse_price(text: &str) -> std::result::Result<f64, Rejection> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(price) if price.is_finite() && price > 0.0 => Ok(price),
        _ => Err(Rejection::InvalidPrice(trimmed.to_string())),
    }
}

/// One shopping list entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    name: String,
    price: f64,
    bought: bool,
    category: String,
}

impl Item {
    /// Builds a new, unbought item with a freshly generated id.
    pub fn new(fields: ItemFields) -> Self {
        Self {
            id: ItemId::generate(),
            name: fields.name,
            price: fields.price,
            bought: false,
            category: fields.category,
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn bought(&self) -> bool {
        self.bought
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Replaces the editable fields. Id and bought flag are kept.
    pub(crate) fn apply(&mut self, fields: ItemFields) {
        self.name = fields.name;
        self.price = fields.price;
        self.category = fields.category;
    }

    /// Flips the bought flag and returns the new value.
    pub(crate) fn toggle(&mut self) -> bool {
        self.bought = !self.bought;
        self.bought
    }
}

/// Checks a decoded collection against the item invariants.
///
/// Blobs written by older app versions may carry untrimmed names, so only
/// emptiness is checked for names.
pub fn check_collection(items: &[Item]) -> Result<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(&item.id) {
            return Err(Error::Corrupt(format!("duplicate item id {}", item.id)));
        }
        if item.name.trim().is_empty() {
            return Err(Error::Corrupt(format!("item {} has an empty name", item.id)));
        }
        if !item.price.is_finite() || item.price <= 0.0 {
            return Err(Error::Corrupt(format!("item {} has invalid price {}", item.id, item.price)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_trims_and_defaults_category() {
        let fields = ItemFields::validate("  Milk ", 45.5, "   ").unwrap();
        let item = Item::new(fields);
        assert_eq!(item.name(), "Milk");
        assert_eq!(item.category(), DEFAULT_CATEGORY);
        assert_eq!(item.price(), 45.5);
        assert!(!item.bought());
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        assert_eq!(ItemFields::validate(" \t", 10.0, "Dairy"), Err(Rejection::EmptyName));
        assert!(matches!(ItemFields::validate("Eggs", 0.0, "Dairy"), Err(Rejection::InvalidPrice(_))));
        assert!(matches!(ItemFields::validate("Eggs", -3.0, ""), Err(Rejection::InvalidPrice(_))));
        assert!(matches!(ItemFields::validate("Eggs", f64::NAN, ""), Err(Rejection::InvalidPrice(_))));
        assert!(matches!(ItemFields::validate("Eggs", f64::INFINITY, ""), Err(Rejection::InvalidPrice(_))));
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price(" 12.50 "), Ok(12.5));
        assert_eq!(parse_price("120"), Ok(120.0));
        assert!(parse_price("").is_err());
        assert!(parse_price("0").is_err());
        assert!(parse_price("abc").is_err());
        assert!(parse_price("inf").is_err());
        assert!(parse_price("NaN").is_err());
    }

    #[test]
    fn test_rejection_is_a_std_error() {
        let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(Rejection::NotFound(ItemId::from("42")));
        assert_eq!(boxed.to_string(), "item not found: 42");
        assert_eq!(Rejection::EmptyName.to_string(), "item name must not be empty");
        assert_eq!(
            Error::Corrupt("duplicate item id 1".to_string()).to_string(),
            "corrupt collection: duplicate item id 1"
        );
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = Item::new(ItemFields::validate("a", 1.0, "").unwrap());
        let b = Item::new(ItemFields::validate("a", 1.0, "").unwrap());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_serialized_field_names() {
        let item = Item::new(ItemFields::validate("Milk", 45.5, "Dairy").unwrap());
        let value = serde_json::to_value(&item).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["bought", "category", "id", "name", "price"]);
        assert_eq!(obj["id"], serde_json::json!(item.id().as_str()));
    }

    #[test]
    fn test_check_collection() {
        let json = r#"[
  {"id": "1700000000000", "name": "Milk", "price": 45.5, "bought": false, "category": "Dairy"},
  {"id": "1700000000001", "name": "Rice", "price": 120, "bought": true, "category": "ไม่มีหมวดหมู่"}
]"#;
        let items: Vec<Item> = serde_json::from_str(json).unwrap();
        assert!(check_collection(&items).is_ok());

        let dup = vec![items[0].clone(), items[0].clone()];
        assert!(matches!(check_collection(&dup), Err(Error::Corrupt(_))));

        let free: Vec<Item> = serde_json::from_str(
            r#"[{"id": "x", "name": "Gift", "price": 0, "bought": false, "category": "Misc"}]"#,
        )
        .unwrap();
        assert!(matches!(check_collection(&free), Err(Error::Corrupt(_))));
    }
}
