//! # Bulk Repricing
//!
//! Previews a price change across many products, then turns the preview
//! into the list of patches the catalog service should receive.
//!
//! ## Two Phases
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  preview_bulk_update (pure, no writes)                                  │
//! │                                                                         │
//! │   products ──filter──► strategy ──► user guards ──► policy guards       │
//! │                          │                                              │
//! │                          └──► category discount? ──► existing discount? │
//! │                                                                         │
//! │   every row is validated with validate_configuration()                  │
//! │                                                                         │
//! │  plan_commit (pure)                                                     │
//! │                                                                         │
//! │   rows ──► committable? ──► resolution (skip/override/merge) ──► patch  │
//! │                                                                         │
//! │  The catalog crate dispatches the planned patches.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use bazaar_core::{preview_bulk_update, BulkFilters, BulkUpdate, Category, Money, PriceStrategy};
//! use bazaar_core::{PricingPolicy, Product};
//! use chrono::NaiveDate;
//!
//! let products = vec![
//!     Product::new(1, "Onions", Category::Vegetables, Money::from_major(100)),
//!     Product::new(2, "Garlic", Category::Vegetables, Money::from_major(40)),
//! ];
//! let update = BulkUpdate::with_strategy(PriceStrategy::Fixed(Money::from_major(50)));
//! let today = NaiveDate::from_ymd_opt(2026, 6, 3).unwrap();
//!
//! let rows = preview_bulk_update(&products, &update, &BulkFilters::all(), &PricingPolicy::default(), today);
//! let prices: Vec<Money> = rows.iter().map(|r| r.new_price).collect();
//! assert_eq!(prices, [Money::from_major(150), Money::from_major(90)]);
//! ```

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::conflict::{
    resolve_discount, validate_configuration, ConflictReport, ConflictResolution,
    DiscountResolution,
};
use crate::error::ConflictKind;
use crate::money::Money;
use crate::policy::PricingPolicy;
use crate::types::{Category, Percent, Product, ProductDiscount, ProductPatch};

// =============================================================================
// Request Types
// =============================================================================

/// How the new price is derived from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PriceStrategy {
    /// Signed change, e.g. +10% or -15%.
    Percentage(Percent),
    /// Signed amount added to the price.
    Fixed(Money),
    /// Clamp the current price into `[min, max]`.
    Range { min: Money, max: Money },
}

impl PriceStrategy {
    pub fn apply(&self, price: Money) -> Money {
        match *self {
            PriceStrategy::Percentage(delta) => price.adjust_by_percent(delta),
            PriceStrategy::Fixed(delta) => Money::from_cents(price.cents().saturating_add(delta.cents())),
            PriceStrategy::Range { min, max } => price.clamp(min, max),
        }
    }
}

/// A bulk repricing request from the admin console.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BulkUpdate {
    /// `None` leaves prices unchanged (discount-only run).
    #[serde(default)]
    pub strategy: Option<PriceStrategy>,

    /// Discount written onto every matched product.
    #[serde(default)]
    pub category_discount: Option<ProductDiscount>,

    /// User floor, applied after the strategy.
    #[serde(default)]
    pub min_price: Option<Money>,

    /// User ceiling, applied after the strategy.
    #[serde(default)]
    pub max_price: Option<Money>,
}

impl BulkUpdate {
    pub fn with_strategy(strategy: PriceStrategy) -> Self {
        BulkUpdate {
            strategy: Some(strategy),
            ..BulkUpdate::default()
        }
    }

    pub fn discount_only(discount: ProductDiscount) -> Self {
        BulkUpdate {
            category_discount: Some(discount),
            ..BulkUpdate::default()
        }
    }

    /// Sets the user min/max guards.
    pub fn with_guards(mut self, min_price: Option<Money>, max_price: Option<Money>) -> Self {
        self.min_price = min_price;
        self.max_price = max_price;
        self
    }

    /// Sets the category discount.
    pub fn with_category_discount(mut self, discount: ProductDiscount) -> Self {
        self.category_discount = Some(discount);
        self
    }

    fn proposed_discount(&self) -> Option<ProductDiscount> {
        self.category_discount.filter(|d| d.amount.is_positive())
    }

    fn new_price(&self, old_price: Money, policy: &PricingPolicy) -> Money {
        let mut price = self.strategy.map_or(old_price, |s| s.apply(old_price));

        if let Some(min) = self.min_price {
            price = price.max(min);
        }
        if let Some(max) = self.max_price {
            price = price.min(max);
        }

        policy.clamp(price)
    }
}

/// Which products a bulk run touches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BulkFilters {
    /// `None` means every category.
    #[serde(default)]
    pub category: Option<Category>,

    /// Only products with `stock <= threshold` match.
    #[serde(default)]
    pub low_stock_only: bool,

    /// Overrides the policy's `low_stock_threshold`.
    #[serde(default)]
    pub low_stock_threshold: Option<i64>,
}

impl BulkFilters {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_category(category: Category) -> Self {
        BulkFilters {
            category: Some(category),
            ..Self::default()
        }
    }

    /// Keeps low-stock products, using the policy threshold.
    pub fn low_stock(mut self) -> Self {
        self.low_stock_only = true;
        self
    }

    /// Keeps products with `stock <= threshold`.
    pub fn low_stock_at(mut self, threshold: i64) -> Self {
        self.low_stock_only = true;
        self.low_stock_threshold = Some(threshold);
        self
    }

    pub fn matches(&self, product: &Product, policy: &PricingPolicy) -> bool {
        let threshold = self.low_stock_threshold.unwrap_or(policy.low_stock_threshold);
        self.category.map_or(true, |c| product.category == c)
            && (!self.low_stock_only || product.stock <= threshold)
    }
}

// =============================================================================
// Preview
// =============================================================================

/// One product in a bulk preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PreviewRow {
    pub product_id: i64,
    pub name: String,
    pub category: Category,
    pub old_price: Money,
    pub new_price: Money,
    /// `new_price - old_price`.
    pub price_change: Money,
    /// A category discount is proposed for this product.
    pub has_discount: bool,
    pub proposed_discount: Option<ProductDiscount>,
    /// The product's own live discount, when a category discount collides with it.
    pub existing_discount: Option<ProductDiscount>,
    /// The new price validated with `existing_discount` kept in place.
    pub existing_report: Option<ConflictReport>,
    pub has_conflicts: bool,
    pub conflict_kind: Option<ConflictKind>,
    pub report: ConflictReport,
    /// Passed every hard guard. Existing-discount collisions are settled at commit.
    pub committable: bool,
}

/// Builds the preview for every product matching `filters`.
///
/// Products inside the run are not checked against each other for discount
/// overlap, since they receive the same category discount together.
pub fn preview_bulk_update(
    products: &[Product],
    update: &BulkUpdate,
    filters: &BulkFilters,
    policy: &PricingPolicy,
    on: NaiveDate,
) -> Vec<PreviewRow> {
    let selected: Vec<&Product> = products.iter().filter(|p| filters.matches(p, policy)).collect();
    let selected_ids: HashSet<i64> = selected.iter().map(|p| p.id).collect();
    let outside: Vec<Product> = products
        .iter()
        .filter(|p| !selected_ids.contains(&p.id))
        .cloned()
        .collect();

    let proposed = update.proposed_discount();
    let row_policy = match proposed {
        Some(_) => PricingPolicy {
            max_product_discount: policy.max_bulk_discount,
            ..policy.clone()
        },
        None => policy.clone(),
    };

    selected
        .into_iter()
        .map(|product| preview_row(product, update, proposed, &outside, &row_policy, on))
        .collect()
}

fn preview_row(
    product: &Product,
    update: &BulkUpdate,
    proposed: Option<ProductDiscount>,
    outside: &[Product],
    policy: &PricingPolicy,
    on: NaiveDate,
) -> PreviewRow {
    let old_price = product.price;
    let new_price = update.new_price(old_price, policy);

    let mut candidate = product.clone();
    candidate.price = new_price;
    if new_price != old_price {
        candidate.previous_price = Some(old_price);
    }

    let existing_discount = match proposed {
        Some(discount) => {
            let existing = product.live_discount(on).copied();
            candidate.discount = Some(discount);
            existing
        }
        None => None,
    };

    let report = validate_configuration(&candidate, outside, Some(product.id), policy, on);
    let existing_report = existing_discount.map(|existing| {
        let kept = Product {
            discount: Some(existing),
            ..candidate.clone()
        };
        validate_configuration(&kept, outside, Some(product.id), policy, on)
    });
    let collides = existing_discount.is_some();

    PreviewRow {
        product_id: product.id,
        name: product.name.clone(),
        category: product.category,
        old_price,
        new_price,
        price_change: new_price - old_price,
        has_discount: proposed.is_some(),
        proposed_discount: proposed,
        existing_discount,
        existing_report,
        has_conflicts: !report.is_valid || collides,
        conflict_kind: report
            .first_kind()
            .or(collides.then_some(ConflictKind::ExistingDiscount)),
        committable: report.is_valid,
        report,
    }
}

// =============================================================================
// Commit Plan
// =============================================================================

/// A patch ready for the catalog service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlannedPatch {
    pub product_id: i64,
    pub patch: ProductPatch,
}

/// A preview row that will not be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SkippedRow {
    pub product_id: i64,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CommitPlan {
    pub patches: Vec<PlannedPatch>,
    pub skipped: Vec<SkippedRow>,
}

impl CommitPlan {
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }
}

/// Decides which preview rows get written and with what patch.
///
/// Rows that failed a hard guard are never planned. Rows whose existing
/// discount collides with the category discount follow `resolution`; a
/// merge that keeps the existing discount is only planned when the new
/// price passed validation alongside it.
pub fn plan_commit(rows: &[PreviewRow], resolution: ConflictResolution) -> CommitPlan {
    let mut plan = CommitPlan::default();

    for row in rows {
        if !row.committable {
            plan.skipped.push(SkippedRow {
                product_id: row.product_id,
                reason: row.report.summary(),
            });
            continue;
        }

        let mut patch = if row.new_price != row.old_price {
            ProductPatch::reprice(row.old_price, row.new_price)
        } else {
            ProductPatch::default()
        };

        if let Some(proposed) = row.proposed_discount {
            match resolve_discount(
                row.existing_discount.as_ref(),
                proposed,
                row.new_price,
                resolution,
            ) {
                DiscountResolution::Apply(discount) => patch.discount = Some(discount),
                DiscountResolution::KeepExisting => {
                    if let Some(kept) = row.existing_report.as_ref().filter(|r| !r.is_valid) {
                        plan.skipped.push(SkippedRow {
                            product_id: row.product_id,
                            reason: kept.summary(),
                        });
                        continue;
                    }
                }
                DiscountResolution::Skip => {
                    plan.skipped.push(SkippedRow {
                        product_id: row.product_id,
                        reason: "existing discount kept".to_string(),
                    });
                    continue;
                }
            }
        }

        if patch.is_empty() {
            plan.skipped.push(SkippedRow {
                product_id: row.product_id,
                reason: "no change".to_string(),
            });
            continue;
        }

        plan.patches.push(PlannedPatch {
            product_id: row.product_id,
            patch,
        });
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DiscountAmount;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 3).unwrap()
    }

    fn preview(products: &[Product], update: &BulkUpdate, filters: &BulkFilters) -> Vec<PreviewRow> {
        preview_bulk_update(products, update, filters, &PricingPolicy::default(), today())
    }

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(1, "Potatoes", Category::Vegetables, Money::from_major(100)).with_stock(50),
            Product::new(2, "Spinach", Category::Vegetables, Money::from_major(40)).with_stock(3),
            Product::new(3, "Paneer", Category::Dairy, Money::from_cents(33333))
                .with_purchase_price(Money::from_major(250))
                .with_stock(8),
        ]
    }

    fn ten_percent() -> ProductDiscount {
        ProductDiscount::open(DiscountAmount::Percentage(Percent::from_whole(10)))
    }

    #[test]
    fn test_fixed_increase() {
        let update = BulkUpdate::with_strategy(PriceStrategy::Fixed(Money::from_major(50)));
        let rows = preview(&catalog(), &update, &BulkFilters::for_category(Category::Vegetables));

        let new: Vec<Money> = rows.iter().map(|r| r.new_price).collect();
        let change: Vec<Money> = rows.iter().map(|r| r.price_change).collect();
        assert_eq!(new, [Money::from_major(150), Money::from_major(90)]);
        assert_eq!(change, [Money::from_major(50), Money::from_major(50)]);
        assert!(rows.iter().all(|r| r.committable && !r.has_conflicts));
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        let update = BulkUpdate::with_strategy(PriceStrategy::Percentage(Percent::from_whole(-10)));
        let rows = preview(&catalog(), &update, &BulkFilters::for_category(Category::Dairy));
        assert_eq!(rows[0].new_price, Money::from_major(300));
        assert_eq!(rows[0].price_change, Money::from_cents(-3333));
    }

    #[test]
    fn test_guards_then_policy_floor() {
        let update = BulkUpdate::with_strategy(PriceStrategy::Percentage(Percent::from_whole(-100)));
        let rows = preview(&catalog(), &update, &BulkFilters::for_category(Category::Vegetables));
        assert!(rows.iter().all(|r| r.new_price == Money::from_major(1)));

        let guarded = update.with_guards(Some(Money::from_major(20)), None);
        let rows = preview(&catalog(), &guarded, &BulkFilters::for_category(Category::Vegetables));
        assert!(rows.iter().all(|r| r.new_price == Money::from_major(20)));
    }

    #[test]
    fn test_range_strategy() {
        let update = BulkUpdate::with_strategy(PriceStrategy::Range {
            min: Money::from_major(50),
            max: Money::from_major(90),
        });
        let rows = preview(&catalog(), &update, &BulkFilters::for_category(Category::Vegetables));
        let new: Vec<Money> = rows.iter().map(|r| r.new_price).collect();
        assert_eq!(new, [Money::from_major(90), Money::from_major(50)]);
    }

    #[test]
    fn test_low_stock_filter() {
        let update = BulkUpdate::with_strategy(PriceStrategy::Fixed(Money::from_major(5)));
        let rows = preview(&catalog(), &update, &BulkFilters::all().low_stock_at(5));
        let ids: Vec<i64> = rows.iter().map(|r| r.product_id).collect();
        assert_eq!(ids, [2]);
    }

    #[test]
    fn test_low_stock_filter_uses_policy_threshold() {
        let update = BulkUpdate::with_strategy(PriceStrategy::Fixed(Money::from_major(5)));
        let filters = BulkFilters::all().low_stock();

        // Default threshold is 10
        let rows = preview(&catalog(), &update, &filters);
        let ids: Vec<i64> = rows.iter().map(|r| r.product_id).collect();
        assert_eq!(ids, [2, 3]);

        let strict = PricingPolicy {
            low_stock_threshold: 2,
            ..PricingPolicy::default()
        };
        let rows = preview_bulk_update(&catalog(), &update, &filters, &strict, today());
        assert!(rows.is_empty());
    }

    #[test]
    fn test_margin_violation_is_not_committable() {
        let update = BulkUpdate::with_strategy(PriceStrategy::Percentage(Percent::from_whole(-30)));
        let rows = preview(&catalog(), &update, &BulkFilters::for_category(Category::Dairy));
        assert!(!rows[0].committable);
        assert_eq!(rows[0].conflict_kind, Some(ConflictKind::MarginViolation));

        let plan = plan_commit(&rows, ConflictResolution::Override);
        assert!(plan.is_empty());
        assert_eq!(plan.skipped.len(), 1);
    }

    #[test]
    fn test_existing_discount_follows_resolution() {
        let mut products = catalog();
        products[0].discount = Some(ProductDiscount::open(DiscountAmount::Fixed(Money::from_major(5))));

        let update = BulkUpdate::discount_only(ten_percent());
        let rows = preview(&products, &update, &BulkFilters::for_category(Category::Vegetables));
        assert_eq!(rows[0].conflict_kind, Some(ConflictKind::ExistingDiscount));
        assert!(rows[0].committable && rows[0].has_conflicts);
        assert!(!rows[1].has_conflicts);

        let skip = plan_commit(&rows, ConflictResolution::Skip);
        assert_eq!(skip.patches.len(), 1);
        assert_eq!(skip.patches[0].product_id, 2);
        assert_eq!(skip.skipped[0].product_id, 1);

        let merge = plan_commit(&rows, ConflictResolution::Merge);
        // 10% of Rs. 100 beats Rs. 5 off.
        assert_eq!(merge.patches.len(), 2);
        assert_eq!(merge.patches[0].patch.discount, Some(ten_percent()));

        let override_plan = plan_commit(&rows, ConflictResolution::Override);
        assert_eq!(override_plan.patches.len(), 2);
        assert_eq!(override_plan.patches[0].patch.price, None);
    }

    #[test]
    fn test_merge_keeping_existing_discount_is_guarded() {
        let products = vec![Product::new(1, "Ghee", Category::Dairy, Money::from_major(100))
            .with_purchase_price(Money::from_major(50))
            .with_stock(30)
            .with_discount(ProductDiscount::open(DiscountAmount::Fixed(Money::from_major(40))))];
        let update = BulkUpdate::with_strategy(PriceStrategy::Fixed(Money::from_major(-30)))
            .with_category_discount(ProductDiscount::open(DiscountAmount::Percentage(
                Percent::from_whole(5),
            )));

        let rows = preview(&products, &update, &BulkFilters::all());
        // Rs. 70 less 5% clears cost; Rs. 70 less Rs. 40 does not.
        assert!(rows[0].committable);
        let kept = rows[0].existing_report.as_ref().unwrap();
        assert!(kept.has(ConflictKind::MarginViolation));

        let merge = plan_commit(&rows, ConflictResolution::Merge);
        assert!(merge.is_empty());
        assert!(merge.skipped[0].reason.contains("margin_violation"));

        let override_plan = plan_commit(&rows, ConflictResolution::Override);
        assert_eq!(override_plan.patches.len(), 1);
        assert_eq!(override_plan.patches[0].patch.price, Some(Money::from_major(70)));
    }

    #[test]
    fn test_bulk_discount_allows_up_to_hundred_percent() {
        let full = ProductDiscount::open(DiscountAmount::Percentage(Percent::from_whole(95)));
        let rows = preview(
            &catalog(),
            &BulkUpdate::discount_only(full),
            &BulkFilters::for_category(Category::Vegetables),
        );
        assert!(rows.iter().all(|r| r.committable), "{}", rows[0].report.summary());
    }

    #[test]
    fn test_unchanged_rows_are_skipped() {
        let update = BulkUpdate::with_strategy(PriceStrategy::Fixed(Money::zero()));
        let rows = preview(&catalog(), &update, &BulkFilters::all());
        let plan = plan_commit(&rows, ConflictResolution::Skip);
        assert!(plan.is_empty());
        assert!(plan.skipped.iter().all(|s| s.reason == "no change"));
    }
}
