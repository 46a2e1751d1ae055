//! # Pricing Configuration
//!
//! The tunable numbers behind the standard rule set.
//!
//! ## File Format (JSON, camelCase)
//! ```json
//! {
//!   "electronicsSurchargeCents": 750,
//!   "deliveryTiers": [
//!     { "maxLines": 3,    "feeCents": 500 },
//!     { "maxLines": 10,   "feeCents": 1250 },
//!     { "maxLines": null, "feeCents": 2000 }
//!   ]
//! }
//! ```
//!
//! Missing keys fall back to the defaults. Configuration is read once and
//! turned into an immutable rule list for `Checkout`.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::rules::{
    DeliveryPrice, DeliveryTier, ExtraCostForElectronics, PriceRule, RegularCost,
    DEFAULT_DELIVERY_TIERS, DEFAULT_ELECTRONICS_SURCHARGE,
};
use crate::MAX_UNIT_PRICE_CENTS;

/// Pricing configuration for the standard rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingConfig {
    /// Flat surcharge for orders containing electronics, in cents.
    pub electronics_surcharge_cents: i64,

    /// Delivery bands, ordered by `maxLines`.
    pub delivery_tiers: Vec<DeliveryTier>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            electronics_surcharge_cents: DEFAULT_ELECTRONICS_SURCHARGE.cents(),
            delivery_tiers: DEFAULT_DELIVERY_TIERS.to_vec(),
        }
    }
}

impl PricingConfig {
    /// Parses and validates a JSON configuration document.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::PricingConfig;
    ///
    /// let config = PricingConfig::from_json(r#"{ "electronicsSurchargeCents": 1000 }"#).unwrap();
    /// assert_eq!(config.electronics_surcharge_cents, 1000);
    /// assert_eq!(config.delivery_tiers.len(), 3);
    /// ```
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let config: PricingConfig =
            serde_json::from_str(json).map_err(|e| CoreError::InvalidConfig {
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks amounts and band ordering.
    ///
    /// ## Rules
    /// - Amounts between 0 and `MAX_UNIT_PRICE_CENTS`
    /// - `maxLines` strictly increasing
    /// - At most one open-ended band, and only in last position
    pub fn validate(&self) -> CoreResult<()> {
        if !(0..=MAX_UNIT_PRICE_CENTS).contains(&self.electronics_surcharge_cents) {
            return Err(invalid(format!(
                "electronicsSurchargeCents must be between 0 and {MAX_UNIT_PRICE_CENTS}"
            )));
        }

        let mut previous: Option<usize> = None;
        for (idx, tier) in self.delivery_tiers.iter().enumerate() {
            if !(0..=MAX_UNIT_PRICE_CENTS).contains(&tier.fee_cents) {
                return Err(invalid(format!(
                    "deliveryTiers[{idx}].feeCents must be between 0 and {MAX_UNIT_PRICE_CENTS}"
                )));
            }

            match tier.max_lines {
                Some(max) => {
                    if previous.is_some_and(|prev| max <= prev) {
                        return Err(invalid(format!(
                            "deliveryTiers[{idx}].maxLines must be greater than the previous tier"
                        )));
                    }
                    previous = Some(max);
                }
                None if idx + 1 != self.delivery_tiers.len() => {
                    return Err(invalid("only the last delivery tier may be open-ended"));
                }
                None => {}
            }
        }

        Ok(())
    }

    /// Builds the standard ordered rule list:
    /// `[DeliveryPrice, ExtraCostForElectronics, RegularCost]`.
    pub fn rules(&self) -> Vec<Box<dyn PriceRule>> {
        vec![
            Box::new(DeliveryPrice::new(self.delivery_tiers.clone())),
            Box::new(ExtraCostForElectronics::new(Money::from_cents(
                self.electronics_surcharge_cents,
            ))),
            Box::new(RegularCost),
        ]
    }
}

fn invalid(reason: impl Into<String>) -> CoreError {
    CoreError::InvalidConfig {
        reason: reason.into(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = PricingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.electronics_surcharge_cents, 750);
        assert_eq!(config.rules().len(), 3);
    }

    #[test]
    fn test_full_document() {
        let json = r#"{
            "electronicsSurchargeCents": 999,
            "deliveryTiers": [
                { "maxLines": 1, "feeCents": 100 },
                { "maxLines": null, "feeCents": 900 }
            ]
        }"#;
        let config = PricingConfig::from_json(json).unwrap();
        assert_eq!(config.electronics_surcharge_cents, 999);
        assert_eq!(
            config.delivery_tiers,
            vec![DeliveryTier::up_to(1, 100), DeliveryTier::beyond(900)]
        );
    }

    #[test]
    fn test_rule_order() {
        let names: Vec<_> = PricingConfig::default()
            .rules()
            .iter()
            .map(|r| r.name())
            .collect();
        assert_eq!(
            names,
            vec!["delivery_price", "extra_cost_for_electronics", "regular_cost"]
        );
    }

    #[test]
    fn test_malformed_json() {
        let err = PricingConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig { .. }));
    }

    #[test]
    fn test_tiers_must_increase() {
        let json = r#"{ "deliveryTiers": [
            { "maxLines": 5, "feeCents": 100 },
            { "maxLines": 5, "feeCents": 200 }
        ] }"#;
        assert!(PricingConfig::from_json(json).is_err());
    }

    #[test]
    fn test_open_tier_must_be_last() {
        let json = r#"{ "deliveryTiers": [
            { "maxLines": null, "feeCents": 100 },
            { "maxLines": 5, "feeCents": 200 }
        ] }"#;
        assert!(PricingConfig::from_json(json).is_err());
    }

    #[test]
    fn test_negative_amounts_rejected() {
        assert!(PricingConfig::from_json(r#"{ "electronicsSurchargeCents": -1 }"#).is_err());
        let json = r#"{ "deliveryTiers": [ { "maxLines": null, "feeCents": -5 } ] }"#;
        assert!(PricingConfig::from_json(json).is_err());
    }

    #[test]
    fn test_oversized_amounts_rejected() {
        let json = format!(r#"{{ "electronicsSurchargeCents": {} }}"#, MAX_UNIT_PRICE_CENTS + 1);
        assert!(PricingConfig::from_json(&json).is_err());

        let json = format!(
            r#"{{ "deliveryTiers": [ {{ "maxLines": null, "feeCents": {} }} ] }}"#,
            i64::MAX
        );
        assert!(PricingConfig::from_json(&json).is_err());
    }
}
