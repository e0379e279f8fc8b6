//! # Domain Types
//!
//! Core domain types used throughout the pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌─────────────────┐      │
//! │  │    Product      │   │ DiscountAmount   │   │ PricingContext  │      │
//! │  │  ─────────────  │   │  ──────────────  │   │  ─────────────  │      │
//! │  │  id (i64)       │   │  Percentage(bps) │   │  quantity       │      │
//! │  │  price          │   │  Fixed(Money)    │   │  evaluated_at   │      │
//! │  │  base_price     │   └──────────────────┘   │  variant price  │      │
//! │  │  purchase_price │                          └─────────────────┘      │
//! │  │  seasonal ──────┼──► SeasonalDiscount                              │
//! │  │  discount ──────┼──► ProductDiscount (window + priority)            │
//! │  └─────────────────┘                                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    Percent      │   │    Category     │                             │
//! │  │  bps (i32)      │   │  Groceries ...  │                             │
//! │  │  2000 = 20%     │   │  Household      │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are owned by the external catalog service. The engine only ever
//! reads them and hands back new values.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{PricingError, PricingResult, ValidationError};
use crate::money::Money;

// =============================================================================
// Percent
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01%. 2000 bps = 20%, 1250 bps = 12.5%.
/// Signed, because a bulk repricing may lower prices by a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Percent(i32);

impl Percent {
    /// 100%.
    pub const HUNDRED: Percent = Percent(10_000);

    /// Creates a percentage from basis points.
    #[inline]
    pub const fn from_bps(bps: i32) -> Self {
        Percent(bps)
    }

    /// Creates a percentage from a whole number of percent.
    #[inline]
    pub const fn from_whole(pct: i32) -> Self {
        Percent(pct * 100)
    }

    /// Converts a decimal percentage (as typed into a form) into basis points.
    ///
    /// ## Errors
    /// `InvalidAmount` for NaN, infinite or out-of-range input.
    pub fn try_from_percentage(pct: f64) -> PricingResult<Self> {
        if !pct.is_finite() {
            return Err(PricingError::invalid_amount(
                "percentage",
                format!("{pct} is not a finite number"),
            ));
        }

        let bps = (pct * 100.0).round();
        if bps.abs() > i32::MAX as f64 {
            return Err(PricingError::invalid_amount(
                "percentage",
                format!("{pct} is out of range"),
            ));
        }

        Ok(Percent(bps as i32))
    }

    /// Returns the value in basis points.
    #[inline]
    pub const fn bps(&self) -> i32 {
        self.0
    }

    /// Returns the value as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percent(0)
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl Default for Percent {
    fn default() -> Self {
        Percent::zero()
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}%", self.0 / 100)
        } else {
            write!(f, "{:.2}%", self.percentage())
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// Product category from the fixed storefront catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Category {
    Groceries,
    Fruits,
    Vegetables,
    Meat,
    Dairy,
    Bakery,
    Beverages,
    Snacks,
    Household,
}

impl Category {
    /// Every category, in catalog order.
    pub const ALL: [Category; 9] = [
        Category::Groceries,
        Category::Fruits,
        Category::Vegetables,
        Category::Meat,
        Category::Dairy,
        Category::Bakery,
        Category::Beverages,
        Category::Snacks,
        Category::Household,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Groceries => "Groceries",
            Category::Fruits => "Fruits",
            Category::Vegetables => "Vegetables",
            Category::Meat => "Meat",
            Category::Dairy => "Dairy",
            Category::Bakery => "Bakery",
            Category::Beverages => "Beverages",
            Category::Snacks => "Snacks",
            Category::Household => "Household",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: Category::ALL.iter().map(|c| c.to_string()).collect(),
            })
    }
}

// =============================================================================
// Discounts
// =============================================================================

/// Whether a discount is a percentage or a fixed amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    Percentage,
    Fixed,
}

/// A discount value together with its kind.
///
/// Serialized as `{"kind": "percentage", "value": 2000}` (bps) or
/// `{"kind": "fixed", "value": 5000}` (paisa).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DiscountAmount {
    Percentage(Percent),
    Fixed(Money),
}

impl DiscountAmount {
    pub fn kind(&self) -> DiscountKind {
        match self {
            DiscountAmount::Percentage(_) => DiscountKind::Percentage,
            DiscountAmount::Fixed(_) => DiscountKind::Fixed,
        }
    }

    /// True when the raw value is greater than zero.
    pub fn is_positive(&self) -> bool {
        match self {
            DiscountAmount::Percentage(p) => p.is_positive(),
            DiscountAmount::Fixed(m) => m.is_positive(),
        }
    }

    /// True when the raw value is below zero (a configuration bug).
    pub fn is_negative(&self) -> bool {
        match self {
            DiscountAmount::Percentage(p) => p.is_negative(),
            DiscountAmount::Fixed(m) => m.is_negative(),
        }
    }

    /// Amount taken off `price`, never more than `price` itself.
    pub fn amount_off(&self, price: Money) -> Money {
        let off = match self {
            DiscountAmount::Percentage(p) => price.multiply_by_percent(*p),
            DiscountAmount::Fixed(m) => *m,
        };
        off.clamp(Money::zero(), price.abs())
    }

    /// Returns `price` after this discount, floored at zero.
    pub fn apply_to(&self, price: Money) -> Money {
        price.subtract_floored(self.amount_off(price))
    }
}

impl fmt::Display for DiscountAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountAmount::Percentage(p) => write!(f, "{p} OFF"),
            DiscountAmount::Fixed(m) => write!(f, "{m} OFF"),
        }
    }
}

/// A seasonal/category discount that may be toggled on and off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SeasonalDiscount {
    pub amount: DiscountAmount,
    pub active: bool,
}

impl SeasonalDiscount {
    /// Whether the discount takes part in tier resolution.
    pub fn applies(&self) -> bool {
        self.active && self.amount.is_positive()
    }
}

/// The product's own promotional discount.
///
/// Dates are inclusive; a missing bound leaves that side of the window open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductDiscount {
    pub amount: DiscountAmount,
    #[ts(as = "Option<String>")]
    pub starts_on: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub ends_on: Option<NaiveDate>,
    /// 1 (lowest) to 5 (highest).
    pub priority: u8,
}

impl ProductDiscount {
    /// An open-ended discount with default priority.
    pub fn open(amount: DiscountAmount) -> Self {
        ProductDiscount {
            amount,
            starts_on: None,
            ends_on: None,
            priority: 1,
        }
    }

    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.amount.is_positive()
            && self.starts_on.map_or(true, |start| start <= date)
            && self.ends_on.map_or(true, |end| date <= end)
    }

    /// Positive and not yet ended on `date`. Covers both running and
    /// scheduled discounts.
    pub fn is_live_on(&self, date: NaiveDate) -> bool {
        self.amount.is_positive() && self.ends_on.map_or(true, |end| date <= end)
    }

    /// Whether the two date windows share at least one day.
    pub fn overlaps(&self, other: &ProductDiscount) -> bool {
        let starts_before_other_ends = match (self.starts_on, other.ends_on) {
            (Some(start), Some(end)) => start <= end,
            _ => true,
        };
        let other_starts_before_end = match (other.starts_on, self.ends_on) {
            (Some(start), Some(end)) => start <= end,
            _ => true,
        };
        starts_before_other_ends && other_starts_before_end
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product as the catalog service stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Stable identifier assigned by the catalog service.
    pub id: i64,

    /// Display name.
    pub name: String,

    pub category: Category,

    /// Current selling price. Validation and bulk repricing act on this.
    pub price: Money,

    /// Undiscounted list price. Falls back to `price` when absent.
    #[serde(default)]
    pub base_price: Option<Money>,

    /// Selling price before the last repricing.
    #[serde(default)]
    pub previous_price: Option<Money>,

    /// Acquisition cost. Zero means unknown and disables margin guards.
    #[serde(default)]
    pub purchase_price: Money,

    /// Price of the product's configured variation, if any.
    #[serde(default)]
    pub variation_price: Option<Money>,

    #[serde(default)]
    pub seasonal_discount: Option<SeasonalDiscount>,

    #[serde(default)]
    pub discount: Option<ProductDiscount>,

    #[serde(default)]
    pub stock: i64,

    /// Below this level the product is flagged as low stock.
    #[serde(default = "default_min_stock")]
    pub min_stock: i64,
}

fn default_min_stock() -> i64 {
    5
}

impl Product {
    /// Creates a product with only the required fields set.
    pub fn new(id: i64, name: impl Into<String>, category: Category, price: Money) -> Self {
        Product {
            id,
            name: name.into(),
            category,
            price,
            base_price: None,
            previous_price: None,
            purchase_price: Money::zero(),
            variation_price: None,
            seasonal_discount: None,
            discount: None,
            stock: 0,
            min_stock: default_min_stock(),
        }
    }

    /// Sets the purchase price.
    pub fn with_purchase_price(mut self, purchase_price: Money) -> Self {
        self.purchase_price = purchase_price;
        self
    }

    /// Sets the list price.
    pub fn with_base_price(mut self, base_price: Money) -> Self {
        self.base_price = Some(base_price);
        self
    }

    /// Sets an active seasonal discount.
    pub fn with_seasonal_discount(mut self, amount: DiscountAmount) -> Self {
        self.seasonal_discount = Some(SeasonalDiscount {
            amount,
            active: true,
        });
        self
    }

    /// Sets the product's own promotional discount.
    pub fn with_discount(mut self, discount: ProductDiscount) -> Self {
        self.discount = Some(discount);
        self
    }

    /// Sets the stock level.
    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    /// The price every tier calculation starts from.
    #[inline]
    pub fn list_price(&self) -> Money {
        self.base_price.unwrap_or(self.price)
    }

    /// The product discount, if it is in effect on `date`.
    pub fn active_discount(&self, date: NaiveDate) -> Option<&ProductDiscount> {
        self.discount.as_ref().filter(|d| d.is_active_on(date))
    }

    /// The product discount, if it is running or scheduled on `date`.
    pub fn live_discount(&self, date: NaiveDate) -> Option<&ProductDiscount> {
        self.discount.as_ref().filter(|d| d.is_live_on(date))
    }

    /// Whether the product has a positive discount configured at all.
    pub fn has_discount(&self) -> bool {
        self.discount.map_or(false, |d| d.amount.is_positive())
    }

    /// Percentage change from `previous_price` to `price`.
    pub fn price_change_percent(&self) -> Option<Percent> {
        let previous = self.previous_price?;
        if !previous.is_positive() || previous == self.price {
            return None;
        }
        let delta = (self.price - previous).cents() as i128 * 10_000;
        let bps = delta / previous.cents() as i128;
        i32::try_from(bps).ok().map(Percent::from_bps)
    }

    /// Profit margin of `selling_price` over the purchase price.
    ///
    /// `None` when the purchase price is unknown.
    pub fn margin_at(&self, selling_price: Money) -> Option<Percent> {
        if !self.purchase_price.is_positive() {
            return None;
        }
        let delta = (selling_price - self.purchase_price).cents() as i128 * 10_000;
        let bps = delta / self.purchase_price.cents() as i128;
        i32::try_from(bps).ok().map(Percent::from_bps)
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock < self.min_stock
    }
}

// =============================================================================
// Product Patch
// =============================================================================

/// Partial update sent to the catalog service. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasonal_discount: Option<SeasonalDiscount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<ProductDiscount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<i64>,
}

impl ProductPatch {
    /// A patch that rewrites every field of `product`.
    pub fn replace_with(product: &Product) -> Self {
        ProductPatch {
            name: Some(product.name.clone()),
            category: Some(product.category),
            price: Some(product.price),
            base_price: product.base_price,
            previous_price: product.previous_price,
            purchase_price: Some(product.purchase_price),
            seasonal_discount: product.seasonal_discount,
            discount: product.discount,
            stock: Some(product.stock),
            min_stock: Some(product.min_stock),
        }
    }

    /// A repricing patch that remembers the old price.
    pub fn reprice(old_price: Money, new_price: Money) -> Self {
        ProductPatch {
            price: Some(new_price),
            previous_price: Some(old_price),
            ..ProductPatch::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == ProductPatch::default()
    }

    /// Writes the set fields onto `product`.
    pub fn apply(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if self.base_price.is_some() {
            product.base_price = self.base_price;
        }
        if self.previous_price.is_some() {
            product.previous_price = self.previous_price;
        }
        if let Some(purchase_price) = self.purchase_price {
            product.purchase_price = purchase_price;
        }
        if self.seasonal_discount.is_some() {
            product.seasonal_discount = self.seasonal_discount;
        }
        if self.discount.is_some() {
            product.discount = self.discount;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(min_stock) = self.min_stock {
            product.min_stock = min_stock;
        }
    }
}

// =============================================================================
// Pricing Context
// =============================================================================

/// Per-evaluation input for a pricing computation.
///
/// Passed by value; the engine never keeps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingContext {
    /// Units in the line, at least 1.
    pub quantity: i64,

    /// Moment the price is evaluated at (drives calendar offers).
    #[ts(as = "String")]
    pub evaluated_at: DateTime<Utc>,

    /// Price of the variant the shopper picked, if any.
    #[serde(default)]
    pub selected_variant_price: Option<Money>,
}

impl PricingContext {
    pub fn new(quantity: i64, evaluated_at: DateTime<Utc>) -> Self {
        PricingContext {
            quantity,
            evaluated_at,
            selected_variant_price: None,
        }
    }

    /// Sets the shopper-selected variant price.
    pub fn with_variant_price(mut self, price: Money) -> Self {
        self.selected_variant_price = Some(price);
        self
    }

    /// Calendar date the evaluation falls on (UTC).
    pub fn date(&self) -> NaiveDate {
        self.evaluated_at.date_naive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
