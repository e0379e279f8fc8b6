//! # Demo Catalog
//!
//! A small storefront catalog for development and the admin console demo.
//!
//! Covers every offer path: grocery bulk offers, fruit and vegetable packs,
//! a seasonal markdown, a scheduled promotion, and a low-stock item.

use bazaar_core::{Category, DiscountAmount, Money, Percent, Product, ProductDiscount};
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::config::CatalogSettings;
use crate::error::StoreResult;
use crate::store::{CatalogStore, InMemoryCatalog};

/// Name, category, price and cost (whole rupees), and stock.
const DEMO_PRODUCTS: &[(&str, Category, i64, i64, i64)] = &[
    ("Basmati Rice 5kg", Category::Groceries, 1450, 1100, 40),
    ("Chakki Atta 10kg", Category::Groceries, 1280, 1050, 25),
    ("Cooking Oil 5L", Category::Groceries, 2650, 2300, 18),
    ("Mangoes 1kg", Category::Fruits, 320, 220, 60),
    ("Bananas 1 dozen", Category::Fruits, 180, 120, 45),
    ("Tomatoes 1kg", Category::Vegetables, 140, 90, 80),
    ("Onions 1kg", Category::Vegetables, 120, 75, 90),
    ("Chicken Breast 1kg", Category::Meat, 1150, 900, 12),
    ("Fresh Milk 1L", Category::Dairy, 220, 180, 50),
    ("Naan Pack of 4", Category::Bakery, 160, 100, 30),
    ("Lemon Soda 1.5L", Category::Beverages, 190, 140, 4),
    ("Ajwa Dates 500g", Category::Snacks, 1200, 800, 20),
    ("Dish Soap 750ml", Category::Household, 340, 250, 35),
];

/// Builds the demo products with unassigned ids.
pub fn demo_products() -> Vec<Product> {
    DEMO_PRODUCTS
        .iter()
        .map(|&(name, category, price, cost, stock)| {
            let product = Product::new(0, name, category, Money::from_major(price))
                .with_purchase_price(Money::from_major(cost))
                .with_stock(stock);

            match name {
                // Seasonal markdown: 1200 - 10% = 1080
                "Ajwa Dates 500g" => {
                    product.with_seasonal_discount(DiscountAmount::Percentage(Percent::from_whole(10)))
                }
                // Scheduled Eid promotion
                "Chicken Breast 1kg" => product.with_discount(ProductDiscount {
                    amount: DiscountAmount::Fixed(Money::from_major(100)),
                    starts_on: NaiveDate::from_ymd_opt(2026, 3, 18),
                    ends_on: NaiveDate::from_ymd_opt(2026, 3, 25),
                    priority: 3,
                }),
                "Mangoes 1kg" => product.with_discount(ProductDiscount::open(
                    DiscountAmount::Percentage(Percent::from_whole(5)),
                )),
                _ => product,
            }
        })
        .collect()
}

/// Loads the demo products into an empty catalog.
///
/// Returns the number of products created. A catalog that already holds
/// products is left alone.
pub async fn seed_demo<S>(store: &S) -> StoreResult<usize>
where
    S: CatalogStore + ?Sized,
{
    let existing = store.get_all().await?.len();
    if existing > 0 {
        warn!(existing, "Catalog already has products, skipping demo seed");
        return Ok(0);
    }

    let mut created = 0;
    for product in demo_products() {
        store.create(product).await?;
        created += 1;
    }

    info!(created, "Demo catalog seeded");
    Ok(created)
}

/// Opens an in-memory catalog, seeded with the demo products when
/// `settings.seed_demo` is set.
pub async fn open_catalog(settings: &CatalogSettings) -> StoreResult<InMemoryCatalog> {
    let store = InMemoryCatalog::new();
    if settings.seed_demo {
        seed_demo(&store).await?;
    }
    Ok(store)
}
