//! # Conflict Validation
//!
//! Checks a product configuration against the pricing guards and against
//! the rest of the catalog, collecting every violation into one report.
//!
//! ## Checks
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     validate_configuration()                            │
//! │                                                                         │
//! │  HARD (is_valid = false)                                               │
//! │  ├── InvalidAmount          negative price, cost or discount           │
//! │  ├── BoundsViolation        price outside [min_price, max_price]       │
//! │  ├── BoundsViolation        base or variation tier price out of bounds │
//! │  ├── MarginViolation        price, discounted price, or any resolved   │
//! │  │                          tier price not above purchase price        │
//! │  ├── DiscountConflict       pct > max_product_discount, fixed ≥ price  │
//! │  ├── ConfigurationConflict  window ends before it starts, priority     │
//! │  │                          outside 1..=5                              │
//! │  └── DiscountConflict       same category, overlapping live window,    │
//! │                             same priority as another product           │
//! │                                                                         │
//! │  SOFT (warnings only)                                                  │
//! │  ├── effective price below cost + recommended margin                   │
//! │  ├── discount window already ended                                     │
//! │  └── stock below min_stock                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here returns an error. The admin console shows the whole report.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::bulk::{BulkUpdate, PriceStrategy};
use crate::error::ConflictKind;
use crate::money::Money;
use crate::policy::PricingPolicy;
use crate::tiers::{PriceTier, PriceTierResolver, TierResult};
use crate::types::{DiscountAmount, Percent, PricingContext, Product, ProductDiscount};
use crate::validation::{validate_discount_window, validate_priority};

// =============================================================================
// Report
// =============================================================================

/// One violation found by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub details: String,
}

/// Every violation and warning found for one configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConflictReport {
    pub is_valid: bool,
    pub conflicts: Vec<Conflict>,
    pub warnings: Vec<String>,
}

impl Default for ConflictReport {
    fn default() -> Self {
        ConflictReport {
            is_valid: true,
            conflicts: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl ConflictReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a hard violation.
    pub fn push(&mut self, kind: ConflictKind, details: impl Into<String>) {
        self.is_valid = false;
        self.conflicts.push(Conflict {
            kind,
            details: details.into(),
        });
    }

    /// Records a warning. Does not affect `is_valid`.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn has(&self, kind: ConflictKind) -> bool {
        self.conflicts.iter().any(|c| c.kind == kind)
    }

    pub fn first_kind(&self) -> Option<ConflictKind> {
        self.conflicts.first().map(|c| c.kind)
    }

    /// Joined conflict details, for logs and error messages.
    pub fn summary(&self) -> String {
        self.conflicts
            .iter()
            .map(|c| format!("{}: {}", c.kind, c.details))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// What a bulk operation does with a product that already has a discount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ConflictResolution {
    /// Leave the product out.
    #[default]
    Skip,
    /// Replace the existing discount.
    Override,
    /// Keep whichever discount takes more off the price.
    Merge,
}

/// Outcome of resolving a proposed discount against an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "action", content = "discount", rename_all = "snake_case")]
pub enum DiscountResolution {
    /// Write this discount.
    Apply(ProductDiscount),
    /// The existing discount stays.
    KeepExisting,
    /// The product is excluded from the operation.
    Skip,
}

/// Resolves `proposed` against an existing live discount on `price`.
pub fn resolve_discount(
    existing: Option<&ProductDiscount>,
    proposed: ProductDiscount,
    price: Money,
    resolution: ConflictResolution,
) -> DiscountResolution {
    let Some(existing) = existing else {
        return DiscountResolution::Apply(proposed);
    };

    match resolution {
        ConflictResolution::Skip => DiscountResolution::Skip,
        ConflictResolution::Override => DiscountResolution::Apply(proposed),
        ConflictResolution::Merge => {
            if proposed.amount.amount_off(price) > existing.amount.amount_off(price) {
                DiscountResolution::Apply(proposed)
            } else {
                DiscountResolution::KeepExisting
            }
        }
    }
}

/// Resolves a category-wide discount for one product.
///
/// ## Example
/// ```rust
/// use bazaar_core::{resolve_category_discount, Category, ConflictResolution, DiscountAmount};
/// use bazaar_core::{DiscountResolution, Money, Percent, Product, ProductDiscount};
/// use chrono::NaiveDate;
///
/// let existing = ProductDiscount::open(DiscountAmount::Fixed(Money::from_major(30)));
/// let product = Product::new(1, "Oil", Category::Groceries, Money::from_major(500))
///     .with_discount(existing);
/// let proposed = ProductDiscount::open(DiscountAmount::Percentage(Percent::from_whole(10)));
/// let today = NaiveDate::from_ymd_opt(2026, 6, 3).unwrap();
///
/// // 10% of 500 = 50 beats Rs. 30.
/// assert_eq!(
///     resolve_category_discount(&product, proposed, ConflictResolution::Merge, today),
///     DiscountResolution::Apply(proposed)
/// );
/// ```
pub fn resolve_category_discount(
    product: &Product,
    proposed: ProductDiscount,
    resolution: ConflictResolution,
    on: NaiveDate,
) -> DiscountResolution {
    resolve_discount(product.live_discount(on), proposed, product.price, resolution)
}

// =============================================================================
// Configuration Validation
// =============================================================================

/// Validates `candidate` as it would be saved.
///
/// `all_products` is the current catalog. The product with `exclude_id`
/// (usually the candidate's own stored record) is skipped in the
/// cross-product check. `on` is the date used for discount windows.
pub fn validate_configuration(
    candidate: &Product,
    all_products: &[Product],
    exclude_id: Option<i64>,
    policy: &PricingPolicy,
    on: NaiveDate,
) -> ConflictReport {
    let mut report = ConflictReport::new();
    let price = candidate.price;
    let cost = candidate.purchase_price;
    let margin_guarded = cost.is_positive();

    check_price(&mut report, candidate, policy);

    if margin_guarded && price <= cost {
        report.push(
            ConflictKind::MarginViolation,
            format!("Price {price} must be greater than purchase price {cost}"),
        );
    }

    let mut effective = price;

    if let Some(discount) = &candidate.discount {
        check_discount(&mut report, discount, price, policy, on);

        if discount.amount.is_positive() {
            let discounted = discount.amount.apply_to(price);
            if margin_guarded && discounted <= cost {
                report.push(
                    ConflictKind::MarginViolation,
                    format!(
                        "Discounted price {discounted} must be greater than purchase price {cost}"
                    ),
                );
            }
            if candidate.active_discount(on).is_some() {
                effective = discounted;
            }
        }
    }

    if let Some(seasonal) = candidate
        .seasonal_discount
        .filter(|s| s.amount.is_negative())
    {
        report.push(
            ConflictKind::InvalidAmount,
            format!("Seasonal discount {} cannot be negative", seasonal.amount),
        );
    }

    if let Some(tiers) = resolve_tiers(candidate, policy, on) {
        check_tier_prices(&mut report, &tiers, price, cost, policy);
        effective = effective.min(tiers.final_price);
    }

    check_other_products(&mut report, candidate, all_products, exclude_id, on);

    if margin_guarded && effective > cost {
        let floor = policy.recommended_floor(cost);
        if effective < floor {
            let margin = candidate.margin_at(effective).unwrap_or_default();
            report.warn(format!(
                "Price {effective} leaves a {margin} margin, below the recommended minimum {floor} ({} margin)",
                policy.recommended_margin
            ));
        }
    }

    if candidate.is_low_stock() {
        report.warn(format!(
            "Stock {} is below the minimum of {}",
            candidate.stock, candidate.min_stock
        ));
    }

    report
}

fn check_price(report: &mut ConflictReport, candidate: &Product, policy: &PricingPolicy) {
    let price = candidate.price;

    if price.is_negative() {
        report.push(ConflictKind::InvalidAmount, format!("Price {price} cannot be negative"));
    } else if price < policy.min_price || price > policy.max_price {
        report.push(
            ConflictKind::BoundsViolation,
            format!(
                "Price {price} must be between {} and {}",
                policy.min_price, policy.max_price
            ),
        );
    }

    if let Some(base) = candidate.base_price.filter(Money::is_negative) {
        report.push(ConflictKind::InvalidAmount, format!("Base price {base} cannot be negative"));
    }

    if candidate.purchase_price.is_negative() {
        report.push(
            ConflictKind::InvalidAmount,
            format!("Purchase price {} cannot be negative", candidate.purchase_price),
        );
    }
}

fn check_discount(
    report: &mut ConflictReport,
    discount: &ProductDiscount,
    price: Money,
    policy: &PricingPolicy,
    on: NaiveDate,
) {
    match discount.amount {
        amount if amount.is_negative() => {
            report.push(
                ConflictKind::InvalidAmount,
                format!("Discount {amount} cannot be negative"),
            );
        }
        DiscountAmount::Percentage(pct) if pct > policy.max_product_discount => {
            report.push(
                ConflictKind::DiscountConflict,
                format!(
                    "Percentage discount {pct} exceeds the maximum of {}",
                    policy.max_product_discount
                ),
            );
        }
        DiscountAmount::Fixed(value) if value.is_positive() && value >= price => {
            report.push(
                ConflictKind::DiscountConflict,
                format!("Fixed discount {value} must be less than price {price}"),
            );
        }
        _ => {}
    }

    if let Err(e) = validate_discount_window(discount.starts_on, discount.ends_on) {
        report.push(ConflictKind::ConfigurationConflict, e.to_string());
    }
    if let Err(e) = validate_priority(discount.priority) {
        report.push(ConflictKind::ConfigurationConflict, e.to_string());
    }

    if let Some(end) = discount.ends_on {
        if end < on && discount.amount.is_positive() {
            report.warn(format!("Discount window ended on {end}"));
        }
    }
}

/// Resolves the tiers the storefront would show for one unit on `on`.
fn resolve_tiers(product: &Product, policy: &PricingPolicy, on: NaiveDate) -> Option<TierResult> {
    let context = PricingContext::new(1, on.and_time(NaiveTime::MIN).and_utc());
    PriceTierResolver::new(policy.clone())
        .resolve(product, &context)
        .ok()
}

/// Guards the prices the resolver actually charges, which may start from
/// `base_price` or a variation rather than the stored price.
fn check_tier_prices(
    report: &mut ConflictReport,
    tiers: &TierResult,
    price: Money,
    cost: Money,
    policy: &PricingPolicy,
) {
    let margin_guarded = cost.is_positive();
    let tier_price = tiers.pre_seasonal_price();

    if tier_price != price {
        let label = match tiers.variation_price {
            Some(_) => "Variation",
            None => "Base",
        };
        if tier_price < policy.min_price || tier_price > policy.max_price {
            report.push(
                ConflictKind::BoundsViolation,
                format!(
                    "{label} price {tier_price} must be between {} and {}",
                    policy.min_price, policy.max_price
                ),
            );
        }
        if margin_guarded && tier_price <= cost {
            report.push(
                ConflictKind::MarginViolation,
                format!("{label} price {tier_price} must be greater than purchase price {cost}"),
            );
        }
    }

    if tiers.applied_tier == PriceTier::Seasonal && margin_guarded && tiers.final_price <= cost {
        report.push(
            ConflictKind::MarginViolation,
            format!(
                "Seasonal price {} must be greater than purchase price {cost}",
                tiers.final_price
            ),
        );
    }
}

fn check_other_products(
    report: &mut ConflictReport,
    candidate: &Product,
    all_products: &[Product],
    exclude_id: Option<i64>,
    on: NaiveDate,
) {
    let Some(discount) = candidate.live_discount(on) else {
        return;
    };

    for other in all_products {
        if Some(other.id) == exclude_id || other.category != candidate.category {
            continue;
        }
        let Some(other_discount) = other.live_discount(on) else {
            continue;
        };
        if other_discount.priority == discount.priority && other_discount.overlaps(discount) {
            report.push(
                ConflictKind::DiscountConflict,
                format!(
                    "Overlaps with the discount on {} (#{}) in {} at the same priority {}",
                    other.name, other.id, other.category, discount.priority
                ),
            );
        }
    }
}

// =============================================================================
// Bulk Request Validation
// =============================================================================

/// Validates a bulk request before any preview is built.
pub fn validate_bulk_update(update: &BulkUpdate, policy: &PricingPolicy) -> ConflictReport {
    let mut report = ConflictReport::new();

    match update.strategy {
        Some(PriceStrategy::Percentage(delta)) if delta.is_negative() => {
            let magnitude = Percent::from_bps(delta.bps().saturating_abs());
            if magnitude > policy.max_bulk_discount {
                report.push(
                    ConflictKind::DiscountConflict,
                    format!(
                        "Bulk decrease {delta} exceeds the maximum of {}",
                        policy.max_bulk_discount
                    ),
                );
            }
        }
        Some(PriceStrategy::Range { min, max }) => {
            if min.is_negative() || max.is_negative() {
                report.push(
                    ConflictKind::InvalidAmount,
                    format!("Range {min}..{max} cannot contain negative prices"),
                );
            }
            if min >= max {
                report.push(
                    ConflictKind::ConfigurationConflict,
                    format!("Range minimum {min} must be less than maximum {max}"),
                );
            }
        }
        _ => {}
    }

    if let Some(discount) = &update.category_discount {
        match discount.amount {
            amount if !amount.is_positive() => {
                report.push(
                    ConflictKind::InvalidAmount,
                    format!("Category discount {amount} must be positive"),
                );
            }
            DiscountAmount::Percentage(pct) if pct > policy.max_bulk_discount => {
                report.push(
                    ConflictKind::DiscountConflict,
                    format!(
                        "Category discount {pct} exceeds the maximum of {}",
                        policy.max_bulk_discount
                    ),
                );
            }
            _ => {}
        }
        if let Err(e) = validate_discount_window(discount.starts_on, discount.ends_on) {
            report.push(ConflictKind::ConfigurationConflict, e.to_string());
        }
        if let Err(e) = validate_priority(discount.priority) {
            report.push(ConflictKind::ConfigurationConflict, e.to_string());
        }
    }

    for (name, guard) in [("minimum", update.min_price), ("maximum", update.max_price)] {
        if let Some(guard) = guard {
            if guard < policy.min_price || guard > policy.max_price {
                report.push(
                    ConflictKind::BoundsViolation,
                    format!(
                        "Price {name} {guard} must be between {} and {}",
                        policy.min_price, policy.max_price
                    ),
                );
            }
        }
    }
    if let (Some(min), Some(max)) = (update.min_price, update.max_price) {
        if min > max {
            report.push(
                ConflictKind::ConfigurationConflict,
                format!("Price minimum {min} is above maximum {max}"),
            );
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 3).unwrap()
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    fn validate(candidate: &Product, all: &[Product]) -> ConflictReport {
        validate_configuration(
            candidate,
            all,
            Some(candidate.id),
            &PricingPolicy::default(),
            today(),
        )
    }

    fn pct(p: i32) -> DiscountAmount {
        DiscountAmount::Percentage(Percent::from_whole(p))
    }

    fn mutton() -> Product {
        Product::new(1, "Mutton", Category::Meat, Money::from_major(1000))
            .with_purchase_price(Money::from_major(700))
            .with_stock(20)
    }

    #[test]
    fn test_seasonal_within_margin_is_valid() {
        let report = validate(&mutton().with_seasonal_discount(pct(20)), &[]);
        assert!(report.is_valid, "{}", report.summary());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_seasonal_below_cost_is_margin_violation() {
        let report = validate(&mutton().with_seasonal_discount(pct(40)), &[]);
        assert!(!report.is_valid);
        assert!(report.has(ConflictKind::MarginViolation));
    }

    #[test]
    fn test_price_not_above_cost() {
        let mut product = mutton();
        product.price = Money::from_major(700);
        let report = validate(&product, &[]);
        assert_eq!(report.first_kind(), Some(ConflictKind::MarginViolation));
    }

    #[test]
    fn test_base_price_below_cost_is_margin_violation() {
        let product = mutton().with_base_price(Money::from_major(600));
        let report = validate(&product, &[]);
        assert!(!report.is_valid);
        assert!(report.has(ConflictKind::MarginViolation), "{}", report.summary());

        let product = mutton().with_base_price(Money::from_major(900));
        assert!(validate(&product, &[]).is_valid);
    }

    #[test]
    fn test_variation_price_below_cost_is_margin_violation() {
        let mut product = mutton();
        product.variation_price = Some(Money::from_major(650));
        let report = validate(&product, &[]);
        assert_eq!(report.first_kind(), Some(ConflictKind::MarginViolation));

        product.variation_price = Some(Money::from_major(200_000));
        assert!(validate(&product, &[]).has(ConflictKind::BoundsViolation));

        product.variation_price = Some(Money::zero());
        assert!(validate(&product, &[]).is_valid);
    }

    #[test]
    fn test_valid_configuration_resolves_above_cost() {
        let ctx = PricingContext::new(1, today().and_time(NaiveTime::MIN).and_utc());
        let mut with_variation = mutton();
        with_variation.variation_price = Some(Money::from_major(720));
        let candidates = [
            mutton(),
            mutton().with_base_price(Money::from_major(700)),
            mutton().with_base_price(Money::from_major(850)),
            mutton().with_base_price(Money::from_major(800)).with_seasonal_discount(pct(10)),
            mutton().with_seasonal_discount(pct(35)),
            with_variation.clone().with_seasonal_discount(pct(5)),
            with_variation,
        ];

        for product in &candidates {
            let report = validate(product, &[]);
            let tiers = crate::tiers::resolve_price(product, &ctx).unwrap();
            if report.is_valid {
                assert!(
                    tiers.final_price > product.purchase_price,
                    "valid but resolves to {}",
                    tiers.final_price
                );
            } else {
                assert!(report.has(ConflictKind::MarginViolation));
            }
        }
    }

    #[test]
    fn test_negative_base_price_is_invalid_amount() {
        let product = mutton().with_base_price(Money::from_cents(-100));
        assert!(validate(&product, &[]).has(ConflictKind::InvalidAmount));
    }

    #[test]
    fn test_unknown_cost_disables_margin_checks() {
        let product = Product::new(2, "Bread", Category::Bakery, Money::from_major(150))
            .with_seasonal_discount(pct(50))
            .with_stock(10);
        assert!(validate(&product, &[]).is_valid);
    }

    #[test]
    fn test_bounds_violation() {
        let mut product = mutton().with_purchase_price(Money::zero());
        product.price = Money::from_major(200_000);
        assert!(validate(&product, &[]).has(ConflictKind::BoundsViolation));

        product.price = Money::from_cents(-5);
        let report = validate(&product, &[]);
        assert!(report.has(ConflictKind::InvalidAmount));
        assert!(!report.has(ConflictKind::BoundsViolation));
    }

    #[test]
    fn test_discount_limits() {
        let product = mutton().with_discount(ProductDiscount::open(pct(95)));
        let report = validate(&product, &[]);
        assert!(report.has(ConflictKind::DiscountConflict));
        assert!(report.has(ConflictKind::MarginViolation));

        let product = Product::new(3, "Salt", Category::Groceries, Money::from_major(60))
            .with_discount(ProductDiscount::open(DiscountAmount::Fixed(Money::from_major(60))))
            .with_stock(10);
        assert!(validate(&product, &[]).has(ConflictKind::DiscountConflict));

        let product = Product::new(4, "Sugar", Category::Groceries, Money::from_major(160))
            .with_discount(ProductDiscount::open(pct(90)))
            .with_stock(10);
        assert!(validate(&product, &[]).is_valid);
    }

    #[test]
    fn test_negative_discount_and_bad_window() {
        let discount = ProductDiscount {
            starts_on: Some(date(6, 10)),
            ends_on: Some(date(6, 1)),
            priority: 7,
            ..ProductDiscount::open(pct(-5))
        };
        let report = validate(&mutton().with_discount(discount), &[]);
        assert!(report.has(ConflictKind::InvalidAmount));
        let config_conflicts = report
            .conflicts
            .iter()
            .filter(|c| c.kind == ConflictKind::ConfigurationConflict)
            .count();
        assert_eq!(config_conflicts, 2);
    }

    #[test]
    fn test_cross_product_conflict() {
        let window = ProductDiscount {
            starts_on: Some(date(6, 1)),
            ends_on: Some(date(6, 30)),
            priority: 3,
            ..ProductDiscount::open(pct(10))
        };
        let other = Product::new(10, "Beef", Category::Meat, Money::from_major(900))
            .with_discount(ProductDiscount {
                starts_on: Some(date(6, 20)),
                ends_on: None,
                ..window
            });
        let candidate = mutton().with_discount(window);

        let report = validate(&candidate, &[other.clone(), candidate.clone()]);
        assert!(report.has(ConflictKind::DiscountConflict));
        assert_eq!(report.conflicts.len(), 1);

        let lower = Product {
            discount: other.discount.map(|d| ProductDiscount { priority: 2, ..d }),
            ..other.clone()
        };
        assert!(validate(&candidate, &[lower]).is_valid);

        let elsewhere = Product {
            category: Category::Dairy,
            ..other
        };
        assert!(validate(&candidate, &[elsewhere]).is_valid);
    }

    #[test]
    fn test_warnings_do_not_invalidate() {
        let expired = ProductDiscount {
            starts_on: Some(date(5, 1)),
            ends_on: Some(date(5, 31)),
            ..ProductDiscount::open(pct(5))
        };
        let mut product = mutton().with_discount(expired).with_stock(2);
        product.price = Money::from_major(750);

        let report = validate(&product, &[]);
        assert!(report.is_valid, "{}", report.summary());
        assert_eq!(report.warnings.len(), 3);
    }

    #[test]
    fn test_resolve_discount() {
        let existing = ProductDiscount::open(DiscountAmount::Fixed(Money::from_major(80)));
        let proposed = ProductDiscount::open(pct(5));
        let price = Money::from_major(1000);

        assert_eq!(
            resolve_discount(None, proposed, price, ConflictResolution::Skip),
            DiscountResolution::Apply(proposed)
        );
        assert_eq!(
            resolve_discount(Some(&existing), proposed, price, ConflictResolution::Skip),
            DiscountResolution::Skip
        );
        assert_eq!(
            resolve_discount(Some(&existing), proposed, price, ConflictResolution::Override),
            DiscountResolution::Apply(proposed)
        );
        assert_eq!(
            resolve_discount(Some(&existing), proposed, price, ConflictResolution::Merge),
            DiscountResolution::KeepExisting
        );
    }

    #[test]
    fn test_validate_bulk_update() {
        let policy = PricingPolicy::default();

        let update = BulkUpdate::with_strategy(PriceStrategy::Percentage(Percent::from_whole(-100)));
        assert!(validate_bulk_update(&update, &policy).is_valid);

        let update = BulkUpdate::with_strategy(PriceStrategy::Percentage(Percent::from_whole(-101)));
        assert!(validate_bulk_update(&update, &policy).has(ConflictKind::DiscountConflict));

        let update = BulkUpdate::with_strategy(PriceStrategy::Range {
            min: Money::from_major(500),
            max: Money::from_major(500),
        });
        assert!(validate_bulk_update(&update, &policy).has(ConflictKind::ConfigurationConflict));

        let over = BulkUpdate::discount_only(ProductDiscount::open(pct(101)));
        assert!(validate_bulk_update(&over, &policy).has(ConflictKind::DiscountConflict));

        let mut update = BulkUpdate::discount_only(ProductDiscount::open(pct(100)));
        assert!(validate_bulk_update(&update, &policy).is_valid);
        update.max_price = Some(Money::from_major(500_000));
        assert!(validate_bulk_update(&update, &policy).has(ConflictKind::BoundsViolation));
    }

    #[test]
    fn test_report_serialization() {
        let mut report = ConflictReport::new();
        report.push(ConflictKind::BoundsViolation, "too high");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["is_valid"], false);
        assert_eq!(json["conflicts"][0]["kind"], "bounds_violation");
    }
}
