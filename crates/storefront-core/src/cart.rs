//! # Cart Capability
//!
//! An insertion-ordered collection of cart lines.
//!
//! ## Implementations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          trait Cart                                     │
//! │                 add(item)        get_items()                            │
//! │                      │                 │                                │
//! │        ┌─────────────┴──────┐   ┌──────┴──────────────────────┐        │
//! │        │  InMemoryCart      │   │  ShoppingCartAdaptor        │        │
//! │        │  (this module)     │   │  (storefront-db, SQLite)    │        │
//! │        │  Error = CoreError │   │  Error = DbError            │        │
//! │        └────────────────────┘   └─────────────────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The trait is async because the persistent cart does blocking-latency
//! I/O; the in-memory cart never awaits anything.

use async_trait::async_trait;

use crate::error::{CoreError, CoreResult};
use crate::types::Item;
use crate::validation::validate_cart_size;
use crate::MAX_CART_ITEMS;

/// Ordered container of cart lines.
#[async_trait]
pub trait Cart: Send + Sync {
    /// Failure type surfaced by this cart's storage.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Appends one line.
    async fn add(&mut self, item: Item) -> Result<(), Self::Error>;

    /// Returns every line in insertion order.
    async fn get_items(&self) -> Result<Vec<Item>, Self::Error>;
}

/// Cart held entirely in process memory.
///
/// ## Invariants
/// - Lines are kept in insertion order, duplicates included
/// - At most `MAX_CART_ITEMS` lines
#[derive(Debug, Clone, Default)]
pub struct InMemoryCart {
    items: Vec<Item>,
}

impl InMemoryCart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        InMemoryCart::default()
    }

    /// Number of lines in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn push(&mut self, item: Item) -> CoreResult<()> {
        validate_cart_size(self.items.len()).map_err(|_| CoreError::CartTooLarge {
            max: MAX_CART_ITEMS,
        })?;
        self.items.push(item);
        Ok(())
    }
}

#[async_trait]
impl Cart for InMemoryCart {
    type Error = CoreError;

    async fn add(&mut self, item: Item) -> CoreResult<()> {
        self.push(item)
    }

    async fn get_items(&self) -> CoreResult<Vec<Item>> {
        Ok(self.items.clone())
    }
}
