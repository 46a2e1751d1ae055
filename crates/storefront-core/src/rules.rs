//! # Pricing Rules
//!
//! Each rule turns the cart's lines into one monetary contribution; the
//! order total is the sum of all contributions.
//!
//! ## Standard Rule Set
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Rule                      Contribution                                 │
//! │  ────                      ────────────                                 │
//! │  DeliveryPrice             by number of lines:                          │
//! │                              0 → $0.00   1-3 → $5.00                    │
//! │                              4-10 → $12.50   11+ → $20.00               │
//! │  ExtraCostForElectronics   $7.50 once if any line is ELECTRONIC        │
//! │  RegularCost               Σ unit price × quantity                      │
//! │                                                                         │
//! │  [phone ×1 @ $10.00]  →  5.00 + 7.50 + 10.00 = $22.50                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! New rules implement [`PriceRule`]; `Checkout` never looks at which rule
//! it is calling.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::Item;

// =============================================================================
// Rule Capability
// =============================================================================

/// A pure pricing strategy over the full list of cart lines.
///
/// Implementations must be total: an empty slice is valid input and yields
/// zero or the rule's own fixed amount.
pub trait PriceRule: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// The amount this rule adds to the order total.
    fn price_to_aggregate(&self, items: &[Item]) -> Money;
}

// =============================================================================
// Regular Cost
// =============================================================================

/// Sum of every line's unit price × quantity.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegularCost;

impl PriceRule for RegularCost {
    fn name(&self) -> &'static str {
        "regular_cost"
    }

    fn price_to_aggregate(&self, items: &[Item]) -> Money {
        items.iter().map(Item::line_total).sum()
    }
}

// =============================================================================
// Electronics Surcharge
// =============================================================================

/// Default electronics surcharge: $7.50.
pub const DEFAULT_ELECTRONICS_SURCHARGE: Money = Money::from_cents(750);

/// Flat surcharge charged once per order that contains electronics.
#[derive(Debug, Clone, Copy)]
pub struct ExtraCostForElectronics {
    surcharge: Money,
}

impl ExtraCostForElectronics {
    pub fn new(surcharge: Money) -> Self {
        ExtraCostForElectronics { surcharge }
    }
}

impl Default for ExtraCostForElectronics {
    fn default() -> Self {
        ExtraCostForElectronics::new(DEFAULT_ELECTRONICS_SURCHARGE)
    }
}

impl PriceRule for ExtraCostForElectronics {
    fn name(&self) -> &'static str {
        "extra_cost_for_electronics"
    }

    fn price_to_aggregate(&self, items: &[Item]) -> Money {
        if items.iter().any(Item::is_electronic) {
            self.surcharge
        } else {
            Money::zero()
        }
    }
}

// =============================================================================
// Delivery Price
// =============================================================================

/// One delivery band: carts with up to `max_lines` lines pay `fee_cents`.
///
/// `max_lines: None` is the open-ended band and must come last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryTier {
    pub max_lines: Option<usize>,
    pub fee_cents: i64,
}

impl DeliveryTier {
    pub const fn up_to(max_lines: usize, fee_cents: i64) -> Self {
        DeliveryTier {
            max_lines: Some(max_lines),
            fee_cents,
        }
    }

    pub const fn beyond(fee_cents: i64) -> Self {
        DeliveryTier {
            max_lines: None,
            fee_cents,
        }
    }

    fn covers(&self, lines: usize) -> bool {
        self.max_lines.map_or(true, |max| lines <= max)
    }
}

/// Default bands: 1-3 lines $5.00, 4-10 $12.50, 11+ $20.00.
pub const DEFAULT_DELIVERY_TIERS: [DeliveryTier; 3] = [
    DeliveryTier::up_to(3, 500),
    DeliveryTier::up_to(10, 1250),
    DeliveryTier::beyond(2000),
];

/// Delivery fee chosen by the number of cart lines (not total quantity).
///
/// An empty cart ships nothing and pays nothing. A cart larger than every
/// bounded band, with no open-ended band configured, pays the last band.
#[derive(Debug, Clone)]
pub struct DeliveryPrice {
    tiers: Vec<DeliveryTier>,
}

impl DeliveryPrice {
    /// Builds the rule from bands sorted by `max_lines`.
    ///
    /// `PricingConfig` checks the ordering before calling this.
    pub fn new(tiers: Vec<DeliveryTier>) -> Self {
        DeliveryPrice { tiers }
    }

    pub fn tiers(&self) -> &[DeliveryTier] {
        &self.tiers
    }
}

impl Default for DeliveryPrice {
    fn default() -> Self {
        DeliveryPrice::new(DEFAULT_DELIVERY_TIERS.to_vec())
    }
}

impl PriceRule for DeliveryPrice {
    fn name(&self) -> &'static str {
        "delivery_price"
    }

    fn price_to_aggregate(&self, items: &[Item]) -> Money {
        let lines = items.len();
        if lines == 0 {
            return Money::zero();
        }

        self.tiers
            .iter()
            .find(|tier| tier.covers(lines))
            .or_else(|| self.tiers.last())
            .map_or(Money::zero(), |tier| Money::from_cents(tier.fee_cents))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemCategory;

    fn item(category: ItemCategory, name: &str, quantity: i64, cents: i64) -> Item {
        Item::new(category, name, quantity, Money::from_cents(cents)).unwrap()
    }

    fn others(n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| item(ItemCategory::Other, &format!("thing-{i}"), 1, 100))
            .collect()
    }

    #[test]
    fn test_regular_cost_sums_lines() {
        let items = vec![
            item(ItemCategory::Other, "apples", 2, 300),
            item(ItemCategory::Electronic, "phone", 1, 1000),
        ];
        assert_eq!(RegularCost.price_to_aggregate(&items), Money::from_cents(1600));
        assert!(RegularCost.price_to_aggregate(&[]).is_zero());
    }

    #[test]
    fn test_regular_cost_of_full_cart_at_limits() {
        let line = item(
            ItemCategory::Other,
            "bulk",
            crate::MAX_ITEM_QUANTITY,
            crate::MAX_UNIT_PRICE_CENTS,
        );
        let items = vec![line; crate::MAX_CART_ITEMS];

        assert_eq!(
            RegularCost.price_to_aggregate(&items).cents(),
            100 * 999 * 100_000_000
        );
    }

    #[test]
    fn test_electronics_surcharge_charged_once() {
        let items = vec![
            item(ItemCategory::Electronic, "phone", 3, 1000),
            item(ItemCategory::Electronic, "charger", 1, 500),
        ];
        let rule = ExtraCostForElectronics::default();
        assert_eq!(rule.price_to_aggregate(&items), Money::from_cents(750));
    }

    #[test]
    fn test_electronics_surcharge_absent_without_electronics() {
        let rule = ExtraCostForElectronics::default();
        assert!(rule.price_to_aggregate(&others(4)).is_zero());
        assert!(rule.price_to_aggregate(&[]).is_zero());
    }

    #[test]
    fn test_delivery_bands() {
        let rule = DeliveryPrice::default();
        assert_eq!(rule.price_to_aggregate(&[]), Money::zero());
        assert_eq!(rule.price_to_aggregate(&others(1)), Money::from_cents(500));
        assert_eq!(rule.price_to_aggregate(&others(3)), Money::from_cents(500));
        assert_eq!(rule.price_to_aggregate(&others(4)), Money::from_cents(1250));
        assert_eq!(rule.price_to_aggregate(&others(10)), Money::from_cents(1250));
        assert_eq!(rule.price_to_aggregate(&others(11)), Money::from_cents(2000));
    }

    #[test]
    fn test_delivery_counts_lines_not_quantity() {
        let rule = DeliveryPrice::default();
        let bulk = vec![item(ItemCategory::Other, "rice", 50, 100)];
        assert_eq!(rule.price_to_aggregate(&bulk), Money::from_cents(500));
    }

    #[test]
    fn test_delivery_without_open_band_uses_last() {
        let rule = DeliveryPrice::new(vec![DeliveryTier::up_to(2, 300)]);
        assert_eq!(rule.price_to_aggregate(&others(5)), Money::from_cents(300));
    }

    #[test]
    fn test_single_phone_totals_22_50() {
        let items = vec![item(ItemCategory::Electronic, "phone", 1, 1000)];
        let rules: Vec<Box<dyn PriceRule>> = vec![
            Box::new(DeliveryPrice::default()),
            Box::new(ExtraCostForElectronics::default()),
            Box::new(RegularCost),
        ];
        let total: Money = rules.iter().map(|r| r.price_to_aggregate(&items)).sum();
        assert_eq!(total, Money::from_cents(2250));
    }
}
