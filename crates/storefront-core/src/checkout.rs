//! # Checkout
//!
//! Owns one cart and an ordered rule list; prices the cart on demand.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  calculate()                                                            │
//! │       │                                                                 │
//! │       ├── no rules? ──► $0.00 (cart is not touched)                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  for rule in rules:                                                     │
//! │       items = cart.get_items()      ← one read per rule                │
//! │       total += rule.price_to_aggregate(&items)                         │
//! │       │                                                                 │
//! │       └── cart error? ──► abort, no partial total                      │
//! │                                                                         │
//! │  total                                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart is re-read for every rule. Callers may count reads, so this is
//! part of the contract.

use tracing::debug;

use crate::cart::Cart;
use crate::money::Money;
use crate::rules::PriceRule;
use crate::types::Item;

/// Storefront orchestrator: cart additions and order pricing.
pub struct Checkout<C: Cart> {
    cart: C,
    rules: Vec<Box<dyn PriceRule>>,
}

impl<C: Cart> Checkout<C> {
    /// Creates a checkout over `cart` with a fixed rule list.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::{Checkout, InMemoryCart, PricingConfig};
    ///
    /// let checkout = Checkout::new(InMemoryCart::new(), PricingConfig::default().rules());
    /// assert_eq!(checkout.rules().len(), 3);
    /// ```
    pub fn new(cart: C, rules: Vec<Box<dyn PriceRule>>) -> Self {
        Checkout { cart, rules }
    }

    /// Forwards `item` to the cart, unchanged.
    pub async fn add_to_cart(&mut self, item: Item) -> Result<(), C::Error> {
        self.cart.add(item).await
    }

    /// Sums every rule's contribution over the current cart lines.
    pub async fn calculate(&self) -> Result<Money, C::Error> {
        let mut total = Money::zero();

        for rule in &self.rules {
            let items = self.cart.get_items().await?;
            let contribution = rule.price_to_aggregate(&items);
            debug!(
                rule = rule.name(),
                lines = items.len(),
                contribution = %contribution,
                "Applied price rule"
            );
            total += contribution;
        }

        Ok(total)
    }

    pub fn cart(&self) -> &C {
        &self.cart
    }

    pub fn rules(&self) -> &[Box<dyn PriceRule>] {
        &self.rules
    }

    /// Gives the cart back, dropping the rules.
    pub fn into_cart(self) -> C {
        self.cart
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
