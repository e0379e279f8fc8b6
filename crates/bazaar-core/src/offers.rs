//! # Offer Catalog
//!
//! Builds the list of promotional offers a shopper may pick from on the
//! product page.
//!
//! ## Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        generate_offers()                                │
//! │                                                                         │
//! │   BASE_OFFERS ──────────┐                                               │
//! │   (every product)       │                                               │
//! │                         ▼                                               │
//! │   CATEGORY_OFFERS ──► concat ──► filter(min_qty, min_amount) ──► Vec   │
//! │   (by product.category) ▲                                               │
//! │                         │                                               │
//! │   SEASONAL_OFFERS ──────┘                                               │
//! │   (by calendar window of context.evaluated_at)                          │
//! │                                                                         │
//! │   Order is kept: base, then category, then seasonal.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Offer tables are static data. The engine never fetches offers remotely.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Category, DiscountAmount, Percent, PricingContext, Product};

// =============================================================================
// Offer
// =============================================================================

/// Where an offer comes from. Also decides its default priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OfferSource {
    Base,
    Category,
    Seasonal,
}

impl OfferSource {
    /// Priority used when ranking offers. Higher wins.
    pub const fn priority(&self) -> u8 {
        match self {
            OfferSource::Base => 1,
            OfferSource::Category => 2,
            OfferSource::Seasonal => 3,
        }
    }
}

/// Eligibility thresholds for an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OfferConditions {
    pub min_quantity: i64,
    /// Minimum line amount (list price × quantity).
    pub min_amount: Money,
}

impl OfferConditions {
    pub fn is_met(&self, quantity: i64, line_amount: Money) -> bool {
        quantity >= self.min_quantity && line_amount >= self.min_amount
    }
}

/// A promotional offer available for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Offer {
    pub id: String,
    pub title: String,
    pub description: String,
    pub amount: DiscountAmount,
    pub conditions: OfferConditions,
    /// Seasonal offers are auto-selected on the product page.
    pub seasonal: bool,
    pub priority: u8,
    pub source: OfferSource,
}

// =============================================================================
// Static Tables
// =============================================================================

struct OfferTemplate {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    amount: DiscountAmount,
    min_quantity: i64,
    min_amount: Money,
    seasonal: bool,
}

impl OfferTemplate {
    const fn percent(
        id: &'static str,
        title: &'static str,
        description: &'static str,
        pct: i32,
        min_quantity: i64,
    ) -> Self {
        OfferTemplate {
            id,
            title,
            description,
            amount: DiscountAmount::Percentage(Percent::from_whole(pct)),
            min_quantity,
            min_amount: Money::zero(),
            seasonal: false,
        }
    }

    const fn fixed(
        id: &'static str,
        title: &'static str,
        description: &'static str,
        rupees: i64,
        min_amount: i64,
    ) -> Self {
        OfferTemplate {
            id,
            title,
            description,
            amount: DiscountAmount::Fixed(Money::from_major(rupees)),
            min_quantity: 1,
            min_amount: Money::from_major(min_amount),
            seasonal: false,
        }
    }

    const fn limited_time(mut self) -> Self {
        self.seasonal = true;
        self
    }

    fn to_offer(&self, source: OfferSource) -> Offer {
        Offer {
            id: self.id.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            amount: self.amount,
            conditions: OfferConditions {
                min_quantity: self.min_quantity,
                min_amount: self.min_amount,
            },
            seasonal: self.seasonal,
            priority: source.priority(),
            source,
        }
    }
}

static BASE_OFFERS: [OfferTemplate; 5] = [
    OfferTemplate::percent("percentage_10", "10% OFF", "Save 10% on this item", 10, 1),
    OfferTemplate::percent("percentage_15", "15% OFF", "Great savings on quality products", 15, 2),
    OfferTemplate::percent("percentage_20", "20% OFF", "Maximum savings opportunity", 20, 3),
    OfferTemplate::fixed("fixed_50", "Rs. 50 OFF", "Instant discount of Rs. 50", 50, 500),
    OfferTemplate::fixed("fixed_100", "Rs. 100 OFF", "Big savings on your purchase", 100, 1000),
];

static GROCERY_OFFERS: [OfferTemplate; 1] = [OfferTemplate::percent(
    "bulk_grocery",
    "Bulk Grocery Deal",
    "12% off on bulk grocery items",
    12,
    5,
)];

static FRUIT_OFFERS: [OfferTemplate; 1] = [OfferTemplate::percent(
    "fresh_fruit",
    "Fresh Fruit Special",
    "Farm fresh discount",
    8,
    2,
)];

static VEGETABLE_OFFERS: [OfferTemplate; 1] = [OfferTemplate::percent(
    "veggie_pack",
    "Veggie Pack Deal",
    "Healthy choices, great prices",
    15,
    3,
)];

fn category_templates(category: Category) -> &'static [OfferTemplate] {
    match category {
        Category::Groceries => &GROCERY_OFFERS,
        Category::Fruits => &FRUIT_OFFERS,
        Category::Vegetables => &VEGETABLE_OFFERS,
        _ => &[],
    }
}

// =============================================================================
// Seasonal Windows
// =============================================================================

/// A calendar window that unlocks a seasonal offer.
///
/// The religious windows are fixed approximations on the Gregorian
/// calendar, not lunar computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SeasonalWindow {
    /// March and April.
    Ramadan,
    /// May 1st to May 15th.
    Eid,
    /// Saturday and Sunday.
    Weekend,
}

impl SeasonalWindow {
    pub const ALL: [SeasonalWindow; 3] = [
        SeasonalWindow::Ramadan,
        SeasonalWindow::Eid,
        SeasonalWindow::Weekend,
    ];

    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            SeasonalWindow::Ramadan => matches!(date.month(), 3 | 4),
            SeasonalWindow::Eid => date.month() == 5 && date.day() <= 15,
            SeasonalWindow::Weekend => matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
        }
    }

    fn template(&self) -> OfferTemplate {
        match self {
            SeasonalWindow::Ramadan => OfferTemplate::percent(
                "ramadan_special",
                "Ramadan Special",
                "Blessed month special discount",
                25,
                1,
            )
            .limited_time(),
            SeasonalWindow::Eid => OfferTemplate::percent(
                "eid_celebration",
                "Eid Celebration",
                "Celebrate with amazing savings",
                30,
                1,
            )
            .limited_time(),
            // Not flagged seasonal: shown, but never auto-selected.
            SeasonalWindow::Weekend => OfferTemplate::percent(
                "weekend_special",
                "Weekend Special",
                "Weekend savings for families",
                18,
                2,
            ),
        }
    }
}

/// Every seasonal window open on `date`.
pub fn active_windows(date: NaiveDate) -> Vec<SeasonalWindow> {
    SeasonalWindow::ALL
        .into_iter()
        .filter(|w| w.contains(date))
        .collect()
}

// =============================================================================
// Generation
// =============================================================================

/// Offers the shopper is eligible for right now.
///
/// The minimum amount is checked against `list_price × quantity`.
///
/// ## Example
/// ```rust
/// use bazaar_core::{generate_offers, Category, Money, PricingContext, Product};
/// use chrono::{TimeZone, Utc};
///
/// let apples = Product::new(4, "Apples", Category::Fruits, Money::from_major(300));
/// // Wednesday in June: no seasonal window is open.
/// let ctx = PricingContext::new(2, Utc.with_ymd_and_hms(2026, 6, 3, 9, 0, 0).unwrap());
///
/// let titles: Vec<String> = generate_offers(&apples, &ctx).into_iter().map(|o| o.title).collect();
/// assert_eq!(titles, ["10% OFF", "15% OFF", "Rs. 50 OFF", "Fresh Fruit Special"]);
/// ```
pub fn generate_offers(product: &Product, context: &PricingContext) -> Vec<Offer> {
    let quantity = context.quantity;
    let line_amount = product.list_price().multiply_quantity(quantity);

    let base = BASE_OFFERS.iter().map(|t| t.to_offer(OfferSource::Base));
    let category = category_templates(product.category)
        .iter()
        .map(|t| t.to_offer(OfferSource::Category));
    let seasonal = active_windows(context.date())
        .into_iter()
        .map(|w| w.template().to_offer(OfferSource::Seasonal));

    base.chain(category)
        .chain(seasonal)
        .filter(|offer| offer.conditions.is_met(quantity, line_amount))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ctx(quantity: i64, y: i32, m: u32, d: u32) -> PricingContext {
        PricingContext::new(quantity, Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap())
    }

    fn titles(offers: &[Offer]) -> Vec<&str> {
        offers.iter().map(|o| o.title.as_str()).collect()
    }

    #[test]
    fn test_fruits_on_weekday() {
        let product = Product::new(1, "Bananas", Category::Fruits, Money::from_major(120));
        // 2026-06-03 is a Wednesday.
        let offers = generate_offers(&product, &ctx(2, 2026, 6, 3));
        let titles = titles(&offers);

        assert!(titles.contains(&"15% OFF"));
        assert!(titles.contains(&"Fresh Fruit Special"));
        assert!(!titles.contains(&"20% OFF"));
        assert!(offers.iter().all(|o| !o.seasonal));
    }

    #[test]
    fn test_amount_thresholds_use_line_amount() {
        let product = Product::new(1, "Ghee", Category::Groceries, Money::from_major(300));

        let one = generate_offers(&product, &ctx(1, 2026, 6, 3));
        assert!(!titles(&one).contains(&"Rs. 50 OFF"));

        let two = generate_offers(&product, &ctx(2, 2026, 6, 3));
        assert!(titles(&two).contains(&"Rs. 50 OFF"));
        assert!(!titles(&two).contains(&"Rs. 100 OFF"));

        let four = generate_offers(&product, &ctx(4, 2026, 6, 3));
        assert!(titles(&four).contains(&"Rs. 100 OFF"));
    }

    #[test]
    fn test_ordering_base_category_seasonal() {
        let product = Product::new(1, "Rice", Category::Groceries, Money::from_major(100));
        // 2026-03-07 is a Saturday in March: Ramadan and weekend both open.
        let offers = generate_offers(&product, &ctx(5, 2026, 3, 7));
        let sources: Vec<OfferSource> = offers.iter().map(|o| o.source).collect();

        let mut sorted = sources.clone();
        sorted.sort_by_key(|s| s.priority());
        assert_eq!(sources, sorted);

        let seasonal_titles: Vec<&str> = offers
            .iter()
            .filter(|o| o.source == OfferSource::Seasonal)
            .map(|o| o.title.as_str())
            .collect();
        assert_eq!(seasonal_titles, ["Ramadan Special", "Weekend Special"]);
    }

    #[test]
    fn test_seasonal_windows() {
        let date = |m, d| NaiveDate::from_ymd_opt(2026, m, d).unwrap();

        assert!(SeasonalWindow::Ramadan.contains(date(4, 30)));
        assert!(!SeasonalWindow::Ramadan.contains(date(5, 1)));
        assert!(SeasonalWindow::Eid.contains(date(5, 15)));
        assert!(!SeasonalWindow::Eid.contains(date(5, 16)));
        // 2026-06-06 is a Saturday.
        assert_eq!(active_windows(date(6, 6)), vec![SeasonalWindow::Weekend]);
        assert!(active_windows(date(6, 3)).is_empty());
    }

    #[test]
    fn test_weekend_offer_is_not_auto_selectable() {
        let product = Product::new(1, "Soap", Category::Household, Money::from_major(80));
        let offers = generate_offers(&product, &ctx(2, 2026, 6, 6));
        let weekend = offers.iter().find(|o| o.id == "weekend_special").unwrap();
        assert!(!weekend.seasonal);
        assert_eq!(weekend.priority, OfferSource::Seasonal.priority());
    }

    #[test]
    fn test_eid_offer() {
        let product = Product::new(1, "Dates", Category::Snacks, Money::from_major(900));
        let offers = generate_offers(&product, &ctx(1, 2026, 5, 12));
        let eid = offers.iter().find(|o| o.id == "eid_celebration").unwrap();
        assert!(eid.seasonal);
        assert_eq!(eid.amount, DiscountAmount::Percentage(Percent::from_whole(30)));
    }

    #[test]
    fn test_zero_quantity_yields_nothing() {
        let product = Product::new(1, "Milk", Category::Dairy, Money::from_major(180));
        assert!(generate_offers(&product, &ctx(0, 2026, 6, 3)).is_empty());
    }
}
