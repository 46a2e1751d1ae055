//! # Domain Types
//!
//! The cart line (`Item`) and its closed category vocabulary.
//!
//! ## Storage Form
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ItemCategory           shoppingcart.type                               │
//! │  ────────────           ─────────────────                               │
//! │  Electronic      ◄────► "ELECTRONIC"                                    │
//! │  Other           ◄────► "OTHER"                                         │
//! │                                                                         │
//! │  Anything else in the column is rejected, never defaulted.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{
    validate_item_name, validate_price_cents, validate_quantity, FIELD_CATEGORY,
};

// =============================================================================
// Item Category
// =============================================================================

/// Category of a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemCategory {
    /// Electronics attract the electronics surcharge.
    Electronic,
    /// Everything else.
    Other,
}

impl ItemCategory {
    /// Every category, in declaration order.
    pub const ALL: [ItemCategory; 2] = [ItemCategory::Electronic, ItemCategory::Other];

    /// Returns the text stored in the `type` column.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ItemCategory::Electronic => "ELECTRONIC",
            ItemCategory::Other => "OTHER",
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive parse of the storage text.
impl FromStr for ItemCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: FIELD_CATEGORY.to_string(),
                value: s.to_string(),
                allowed: ItemCategory::ALL
                    .iter()
                    .map(|c| c.as_str().to_string())
                    .collect(),
            })
    }
}

// =============================================================================
// Item
// =============================================================================

/// One cart line: category, name, quantity and unit price.
///
/// Immutable once built; fields are private so every `Item` in the system
/// went through [`Item::new`], including deserialized ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ItemFields")]
pub struct Item {
    category: ItemCategory,
    name: String,
    quantity: i64,
    unit_price: Money,
}

impl Item {
    /// Creates a validated cart line.
    ///
    /// ## Errors
    /// - `Required` / `TooLong` for a bad name
    /// - `MustBePositive` for a quantity below 1
    /// - `OutOfRange` for a quantity above `MAX_ITEM_QUANTITY`, or a unit
    ///   price outside `0..=MAX_UNIT_PRICE_CENTS`
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::{Item, ItemCategory, Money};
    ///
    /// let phone = Item::new(ItemCategory::Electronic, "phone", 1, Money::from_cents(1000)).unwrap();
    /// assert_eq!(phone.line_total().cents(), 1000);
    ///
    /// assert!(Item::new(ItemCategory::Other, "milk", 0, Money::from_cents(250)).is_err());
    /// ```
    pub fn new(
        category: ItemCategory,
        name: impl Into<String>,
        quantity: i64,
        unit_price: Money,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        validate_item_name(&name)?;
        validate_quantity(quantity)?;
        validate_price_cents(unit_price.cents())?;

        Ok(Item {
            category,
            name,
            quantity,
            unit_price,
        })
    }

    #[inline]
    pub fn category(&self) -> ItemCategory {
        self.category
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }

    /// True for lines in the `Electronic` category.
    #[inline]
    pub fn is_electronic(&self) -> bool {
        self.category == ItemCategory::Electronic
    }
}

/// Unvalidated wire shape of an [`Item`].
#[derive(Deserialize)]
struct ItemFields {
    category: ItemCategory,
    name: String,
    quantity: i64,
    unit_price: Money,
}

impl TryFrom<ItemFields> for Item {
    type Error = ValidationError;

    fn try_from(fields: ItemFields) -> Result<Self, Self::Error> {
        Item::new(fields.category, fields.name, fields.quantity, fields.unit_price)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
