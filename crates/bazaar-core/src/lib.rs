//! # bazaar-core: Pure Pricing Logic for the Bazaar Storefront
//!
//! This crate decides what a product costs. It resolves tiered prices,
//! builds and selects promotional offers, validates pricing configurations
//! and previews bulk repricing, all as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bazaar Pricing Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              UI / API shell (product page, admin console)       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        bazaar-catalog (PricingService, CatalogStore)            │   │
//! │  │        async, logging, config, bulk commit dispatch             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bazaar-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐  ┌─────────┐  ┌──────────┐  ┌──────────┐          │   │
//! │  │   │  money  │  │  tiers  │  │  offers  │  │ selector │          │   │
//! │  │   └─────────┘  └─────────┘  └──────────┘  └──────────┘          │   │
//! │  │   ┌──────────┐  ┌─────────┐  ┌──────────┐  ┌────────────┐       │   │
//! │  │   │ conflict │  │  bulk   │  │  policy  │  │ validation │       │   │
//! │  │   └──────────┘  └─────────┘  └──────────┘  └────────────┘       │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO LOGGING • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic and half-up rounding
//! - [`types`] - Domain types (Product, DiscountAmount, PricingContext)
//! - [`policy`] - Price guards and discount limits
//! - [`tiers`] - Base → variation → seasonal price resolution
//! - [`offers`] - Base, category and seasonal offer tables
//! - [`selector`] - Offer selection, discounts and quotes
//! - [`conflict`] - Configuration conflict reports
//! - [`bulk`] - Bulk repricing previews and commit plans
//! - [`validation`] - Field-level input checks
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: the current date is always passed in, never read
//! 2. **Integer Money**: paisa in `i64`, percentages in basis points
//! 3. **Explicit Errors**: malformed input fails fast; business rule
//!    violations are collected into a report instead
//!
//! ## Example Usage
//!
//! ```rust
//! use bazaar_core::{compute_final, generate_offers, resolve_price, select_offer};
//! use bazaar_core::{Category, Money, PricingContext, Product};
//! use chrono::{TimeZone, Utc};
//!
//! let dates = Product::new(7, "Ajwa Dates", Category::Snacks, Money::from_major(1200))
//!     .with_purchase_price(Money::from_major(800));
//! // A Wednesday in April: the Ramadan offer is open.
//! let ctx = PricingContext::new(1, Utc.with_ymd_and_hms(2026, 4, 8, 18, 0, 0).unwrap());
//!
//! let tiers = resolve_price(&dates, &ctx).unwrap();
//! let offers = generate_offers(&dates, &ctx);
//! let offer = select_offer(&offers).unwrap();
//!
//! assert_eq!(offer.title, "Ramadan Special");
//! // 1200 - 25% = 900
//! assert_eq!(compute_final(offer, tiers.final_price, 1), Money::from_major(900));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bulk;
pub mod conflict;
pub mod error;
pub mod money;
pub mod offers;
pub mod policy;
pub mod selector;
pub mod tiers;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use bulk::{
    plan_commit, preview_bulk_update, BulkFilters, BulkUpdate, CommitPlan, PlannedPatch,
    PreviewRow, PriceStrategy, SkippedRow,
};
pub use conflict::{
    resolve_category_discount, resolve_discount, validate_bulk_update, validate_configuration,
    Conflict, ConflictReport, ConflictResolution, DiscountResolution,
};
pub use error::{ConflictKind, PricingError, PricingResult, ValidationError};
pub use money::Money;
pub use offers::{generate_offers, Offer, OfferConditions, OfferSource, SeasonalWindow};
pub use policy::PricingPolicy;
pub use selector::{
    best_offer, compute_discount, compute_final, rank_offers, select_offer, OfferSelection, Quote,
};
pub use tiers::{resolve_price, PriceTier, PriceTierResolver, TierResult};
pub use validation::validate_product;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single item on the product page.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Lowest discount priority.
pub const MIN_DISCOUNT_PRIORITY: u8 = 1;

/// Highest discount priority.
pub const MAX_DISCOUNT_PRIORITY: u8 = 5;
