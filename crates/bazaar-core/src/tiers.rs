//! # Price Tier Resolution
//!
//! Computes the per-unit "current price" of a product before any
//! promotional offer is layered on top.
//!
//! ## Layering Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Price Tiers (fixed order)                        │
//! │                                                                         │
//! │  1. BASE        product.base_price (falls back to product.price)        │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  2. VARIATION   selected variant price > 0 replaces the running price   │
//! │        │        (else the product's own variation price > 0)            │
//! │        ▼                                                                │
//! │  3. SEASONAL    active seasonal discount reduces the running price      │
//! │        │        (percentage or fixed, floored at 0)                     │
//! │        ▼                                                                │
//! │  4. GUARDS      clamp into [policy.min_price, policy.max_price]         │
//! │                                                                         │
//! │  Result is PER UNIT. Multiply by quantity only for display:             │
//! │  TierResult::line_total(qty)                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use bazaar_core::{resolve_price, Category, DiscountAmount, Money, Percent, PricingContext, Product};
//! use chrono::{TimeZone, Utc};
//!
//! let product = Product::new(1, "Mangoes", Category::Fruits, Money::from_major(1000))
//!     .with_purchase_price(Money::from_major(700))
//!     .with_seasonal_discount(DiscountAmount::Percentage(Percent::from_whole(20)));
//! let ctx = PricingContext::new(1, Utc.with_ymd_and_hms(2026, 6, 3, 12, 0, 0).unwrap());
//!
//! let tiers = resolve_price(&product, &ctx).unwrap();
//! assert_eq!(tiers.final_price, Money::from_major(800));
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{PricingError, PricingResult};
use crate::money::Money;
use crate::policy::PricingPolicy;
use crate::types::{PricingContext, Product};

/// Which tier determined the final price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PriceTier {
    Base,
    Variation,
    Seasonal,
}

impl PriceTier {
    pub fn name(&self) -> &'static str {
        match self {
            PriceTier::Base => "base",
            PriceTier::Variation => "variation",
            PriceTier::Seasonal => "seasonal",
        }
    }
}

/// Per-unit prices at each tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TierResult {
    pub base_price: Money,
    /// Set when a variation overrode the base price.
    pub variation_price: Option<Money>,
    /// Set when a seasonal discount was applied.
    pub seasonal_price: Option<Money>,
    /// Per-unit price after all tiers and guards.
    pub final_price: Money,
    pub applied_tier: PriceTier,
}

impl TierResult {
    /// `final_price × quantity`.
    #[inline]
    pub fn line_total(&self, quantity: i64) -> Money {
        self.final_price.multiply_quantity(quantity)
    }

    /// Price before the seasonal tier (base or variation).
    pub fn pre_seasonal_price(&self) -> Money {
        self.variation_price.unwrap_or(self.base_price)
    }

    /// Per-unit amount saved by the seasonal tier.
    pub fn seasonal_savings(&self) -> Money {
        match self.seasonal_price {
            Some(seasonal) => self.pre_seasonal_price().subtract_floored(seasonal),
            None => Money::zero(),
        }
    }
}

/// Resolves tiered prices under a given policy.
#[derive(Debug, Clone, Default)]
pub struct PriceTierResolver {
    policy: PricingPolicy,
}

impl PriceTierResolver {
    pub fn new(policy: PricingPolicy) -> Self {
        PriceTierResolver { policy }
    }

    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Resolves the per-unit price of `product` in `context`.
    ///
    /// ## Errors
    /// - `InvalidQuantity` when `context.quantity < 1`
    /// - `InvalidProduct` for a negative base price or a negative seasonal value
    pub fn resolve(&self, product: &Product, context: &PricingContext) -> PricingResult<TierResult> {
        if context.quantity < 1 {
            return Err(PricingError::InvalidQuantity(context.quantity));
        }

        let base_price = product.list_price();
        if base_price.is_negative() {
            return Err(PricingError::invalid_product(
                product.id,
                format!("base price {base_price} is negative"),
            ));
        }

        let mut current = base_price;
        let mut applied_tier = PriceTier::Base;

        let variation_price = context
            .selected_variant_price
            .filter(Money::is_positive)
            .or_else(|| product.variation_price.filter(Money::is_positive));
        if let Some(variation) = variation_price {
            current = variation;
            applied_tier = PriceTier::Variation;
        }

        let mut seasonal_price = None;
        if let Some(seasonal) = product.seasonal_discount {
            if seasonal.amount.is_negative() {
                return Err(PricingError::invalid_product(
                    product.id,
                    format!("seasonal discount {} is negative", seasonal.amount),
                ));
            }
            if seasonal.applies() {
                current = seasonal.amount.apply_to(current);
                seasonal_price = Some(current);
                applied_tier = PriceTier::Seasonal;
            }
        }

        Ok(TierResult {
            base_price,
            variation_price,
            seasonal_price,
            final_price: self.policy.clamp(current),
            applied_tier,
        })
    }
}

/// Resolves with the default policy.
pub fn resolve_price(product: &Product, context: &PricingContext) -> PricingResult<TierResult> {
    PriceTierResolver::default().resolve(product, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, DiscountAmount, Percent, SeasonalDiscount};
    use chrono::{TimeZone, Utc};

    fn ctx(quantity: i64) -> PricingContext {
        PricingContext::new(quantity, Utc.with_ymd_and_hms(2026, 6, 3, 10, 0, 0).unwrap())
    }

    fn product() -> Product {
        Product::new(1, "Chicken Breast", Category::Meat, Money::from_major(1000))
            .with_purchase_price(Money::from_major(700))
    }

    #[test]
    fn test_base_tier_only() {
        let result = resolve_price(&product(), &ctx(1)).unwrap();
        assert_eq!(result.applied_tier, PriceTier::Base);
        assert_eq!(result.final_price, Money::from_major(1000));
        assert_eq!(result.variation_price, None);
        assert_eq!(result.seasonal_price, None);
    }

    #[test]
    fn test_seasonal_percentage() {
        let p = product().with_seasonal_discount(DiscountAmount::Percentage(Percent::from_whole(20)));
        let result = resolve_price(&p, &ctx(1)).unwrap();
        assert_eq!(result.final_price, Money::from_major(800));
        assert_eq!(result.applied_tier, PriceTier::Seasonal);
        assert_eq!(result.seasonal_savings(), Money::from_major(200));

        let p = product().with_seasonal_discount(DiscountAmount::Percentage(Percent::from_whole(40)));
        assert_eq!(resolve_price(&p, &ctx(1)).unwrap().final_price, Money::from_major(600));
    }

    #[test]
    fn test_variation_then_seasonal() {
        let p = product().with_seasonal_discount(DiscountAmount::Fixed(Money::from_major(100)));
        let context = ctx(2).with_variant_price(Money::from_major(4800));

        let result = resolve_price(&p, &context).unwrap();
        assert_eq!(result.variation_price, Some(Money::from_major(4800)));
        assert_eq!(result.final_price, Money::from_major(4700));
        assert_eq!(result.line_total(2), Money::from_major(9400));
    }

    #[test]
    fn test_zero_variant_price_is_ignored() {
        let context = ctx(1).with_variant_price(Money::zero());
        let result = resolve_price(&product(), &context).unwrap();
        assert_eq!(result.applied_tier, PriceTier::Base);
    }

    #[test]
    fn test_inactive_seasonal_is_skipped() {
        let mut p = product();
        p.seasonal_discount = Some(SeasonalDiscount {
            amount: DiscountAmount::Percentage(Percent::from_whole(20)),
            active: false,
        });
        let result = resolve_price(&p, &ctx(1)).unwrap();
        assert_eq!(result.final_price, Money::from_major(1000));
    }

    #[test]
    fn test_fixed_seasonal_floors_then_clamps_to_min_price() {
        let p = product().with_seasonal_discount(DiscountAmount::Fixed(Money::from_major(5000)));
        let result = resolve_price(&p, &ctx(1)).unwrap();
        assert_eq!(result.seasonal_price, Some(Money::zero()));
        assert_eq!(result.final_price, PricingPolicy::default().min_price);
    }

    #[test]
    fn test_negative_seasonal_is_rejected() {
        let p = product().with_seasonal_discount(DiscountAmount::Percentage(Percent::from_whole(-5)));
        let err = resolve_price(&p, &ctx(1)).unwrap_err();
        assert!(matches!(err, PricingError::InvalidProduct { product_id: 1, .. }));
    }

    #[test]
    fn test_negative_base_price_is_rejected() {
        let p = Product::new(3, "Broken", Category::Bakery, Money::from_cents(-1));
        assert!(matches!(
            resolve_price(&p, &ctx(1)),
            Err(PricingError::InvalidProduct { .. })
        ));
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        assert!(matches!(
            resolve_price(&product(), &ctx(0)),
            Err(PricingError::InvalidQuantity(0))
        ));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let p = product().with_seasonal_discount(DiscountAmount::Percentage(Percent::from_bps(1250)));
        let context = ctx(3);
        assert_eq!(resolve_price(&p, &context).unwrap(), resolve_price(&p, &context).unwrap());
    }
}
