//! # bazaar-catalog: Catalog Boundary for Bazaar Pricing
//!
//! This crate connects the pure pricing rules in `bazaar-core` to the
//! product catalog data service. It owns everything that does I/O: the
//! async store, the service that orchestrates the core, concurrent bulk
//! commits, configuration files and logging.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bazaar Pricing Data Flow                         │
//! │                                                                         │
//! │  Product page / admin console                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   bazaar-catalog (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │ PricingService│    │ commit        │    │ config       │   │   │
//! │  │   │ (service.rs)  │───►│ (join_all)    │    │ pricing.toml │   │   │
//! │  │   └───────┬───────┘    └───────┬───────┘    └──────────────┘   │   │
//! │  │           │                    │                               │   │
//! │  │           ▼                    ▼                               │   │
//! │  │   ┌──────────────────────────────────┐    ┌──────────────┐     │   │
//! │  │   │ CatalogStore (store.rs)          │    │ PricingStats │     │   │
//! │  │   │ InMemoryCatalog / remote catalog │    │ (stats.rs)   │     │   │
//! │  │   └──────────────────────────────────┘    └──────────────┘     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  bazaar-core: tiers, offers, selector, conflict, bulk (pure)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - `CatalogStore` trait and the in-memory catalog
//! - [`service`] - `PricingService` (quote, save, bulk, validation)
//! - [`commit`] - Concurrent bulk commit
//! - [`stats`] - Injected outcome counters
//! - [`config`] - `pricing.toml` loading and env overrides
//! - [`demo`] - Demo catalog for development
//! - [`error`] - Store errors and retry advice
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bazaar_catalog::{InMemoryCatalog, PricingService, ServiceConfig};
//!
//! let config = ServiceConfig::load_or_default(None);
//! let service = PricingService::new(InMemoryCatalog::new(), config.policy);
//!
//! let quote = service.quote(product_id, &ctx).await?;
//! let rows = service.preview_bulk(&update, &filters, today).await?;
//! let results = service.commit_bulk(&rows, ConflictResolution::Merge).await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod commit;
pub mod config;
pub mod demo;
pub mod error;
pub mod service;
pub mod stats;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use commit::{commit_bulk_update, UpdateResult, UpdateStatus};
pub use config::{CatalogSettings, ServiceConfig};
pub use demo::{demo_products, open_catalog, seed_demo};
pub use error::{classify_store_error, should_retry, ErrorClass, StoreError, StoreResult};
pub use service::{CatalogValidation, PricingService, ProductQuote, ProductReport, ValidationSummary};
pub use stats::{InMemoryStats, NoopStats, PricingStats, StatsSnapshot};
pub use store::{CatalogStore, InMemoryCatalog};
