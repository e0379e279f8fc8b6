//! # Pricing Policy
//!
//! Program-wide business guards. Loaded by the catalog service from its
//! config file; the core only receives the resulting value.
//!
//! ```toml
//! [policy]
//! min_price = 100              # paisa (Rs. 1)
//! max_price = 10000000         # paisa (Rs. 100,000)
//! max_product_discount = 9000  # bps (90%)
//! max_bulk_discount = 10000    # bps (100%)
//! recommended_margin = 1000    # bps (10%)
//! low_stock_threshold = 10
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{PricingError, PricingResult};
use crate::money::Money;
use crate::types::Percent;

/// Price guards and discount limits applied across the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingPolicy {
    /// Lowest price any product may be sold at.
    #[serde(default = "default_min_price")]
    pub min_price: Money,

    /// Highest price any product may be sold at.
    #[serde(default = "default_max_price")]
    pub max_price: Money,

    /// Ceiling for a product-level percentage discount.
    #[serde(default = "default_max_product_discount")]
    pub max_product_discount: Percent,

    /// Ceiling for a percentage discount applied in bulk.
    #[serde(default = "default_max_bulk_discount")]
    pub max_bulk_discount: Percent,

    /// Margin over cost below which a warning is raised (not a failure).
    #[serde(default = "default_recommended_margin")]
    pub recommended_margin: Percent,

    /// Default stock threshold for the bulk "low stock" filter.
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i64,
}

fn default_min_price() -> Money {
    Money::from_major(1)
}

fn default_max_price() -> Money {
    Money::from_major(100_000)
}

fn default_max_product_discount() -> Percent {
    Percent::from_whole(90)
}

fn default_max_bulk_discount() -> Percent {
    Percent::HUNDRED
}

fn default_recommended_margin() -> Percent {
    Percent::from_whole(10)
}

fn default_low_stock_threshold() -> i64 {
    10
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingPolicy {
            min_price: default_min_price(),
            max_price: default_max_price(),
            max_product_discount: default_max_product_discount(),
            max_bulk_discount: default_max_bulk_discount(),
            recommended_margin: default_recommended_margin(),
            low_stock_threshold: default_low_stock_threshold(),
        }
    }
}

impl PricingPolicy {
    /// Validates the policy itself.
    pub fn validate(&self) -> PricingResult<()> {
        if self.min_price.is_negative() {
            return Err(PricingError::ConfigurationConflict(
                "min_price cannot be negative".into(),
            ));
        }

        if self.min_price >= self.max_price {
            return Err(PricingError::ConfigurationConflict(format!(
                "min_price {} must be below max_price {}",
                self.min_price, self.max_price
            )));
        }

        for (name, pct) in [
            ("max_product_discount", self.max_product_discount),
            ("max_bulk_discount", self.max_bulk_discount),
        ] {
            if pct.is_negative() || pct > Percent::HUNDRED {
                return Err(PricingError::ConfigurationConflict(format!(
                    "{name} must be between 0% and 100%, got {pct}"
                )));
            }
        }

        if self.low_stock_threshold < 0 {
            return Err(PricingError::ConfigurationConflict(
                "low_stock_threshold cannot be negative".into(),
            ));
        }

        Ok(())
    }

    /// Clamps `price` into the policy's floor and ceiling.
    #[inline]
    pub fn clamp(&self, price: Money) -> Money {
        price.clamp(self.min_price, self.max_price)
    }

    /// Minimum selling price that keeps the recommended margin over `cost`.
    pub fn recommended_floor(&self, cost: Money) -> Money {
        cost.adjust_by_percent(self.recommended_margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.min_price, Money::from_major(1));
        assert_eq!(policy.max_price, Money::from_major(100_000));
        assert_eq!(policy.max_product_discount, Percent::from_whole(90));
        assert_eq!(policy.max_bulk_discount, Percent::from_whole(100));
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_policy_validation() {
        let mut policy = PricingPolicy::default();
        policy.min_price = Money::from_major(500);
        policy.max_price = Money::from_major(100);
        assert!(policy.validate().is_err());

        let mut policy = PricingPolicy::default();
        policy.max_product_discount = Percent::from_whole(120);
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_recommended_floor() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.recommended_floor(Money::from_major(700)), Money::from_major(770));
    }

    #[test]
    fn test_partial_policy_uses_defaults() {
        let policy: PricingPolicy = serde_json::from_str(r#"{"min_price": 500}"#).unwrap();
        assert_eq!(policy.min_price, Money::from_major(5));
        assert_eq!(policy.max_price, Money::from_major(100_000));
    }
}
