//! # Pricing Service
//!
//! Runs the pricing core against a [`CatalogStore`].
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PricingService                                   │
//! │                                                                         │
//! │  Storefront                                                             │
//! │  ──────────                                                             │
//! │  quote(id, ctx)          get → resolve tiers → offers → select → quote │
//! │                                                                         │
//! │  Admin console                                                          │
//! │  ─────────────                                                          │
//! │  save_product(p, on)     get_all → validate → create | update          │
//! │  preview_bulk(..)        validate request → get_all → preview rows     │
//! │  commit_bulk(rows, res)  plan → concurrent updates → UpdateResult[]    │
//! │  validate_catalog(..)    get_all → one report per product + summary    │
//! │                                                                         │
//! │  Every outcome goes to the injected PricingStats collector.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use bazaar_core::{
    generate_offers, preview_bulk_update, validate_bulk_update, validate_configuration,
    validate_product, BulkFilters, BulkUpdate, Category, ConflictReport, ConflictResolution,
    OfferSelection, PreviewRow, PriceTierResolver, PricingContext, PricingError, PricingPolicy,
    Product, ProductPatch, Quote, TierResult,
};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::commit::{commit_bulk_update, UpdateResult};
use crate::error::{StoreError, StoreResult};
use crate::stats::{NoopStats, PricingStats};
use crate::store::CatalogStore;

/// Everything the product page needs to show a price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductQuote {
    pub product_id: i64,
    pub tiers: TierResult,
    /// Eligible offers with the auto-selected one.
    pub offers: OfferSelection,
    pub quote: Quote,
}

/// Validation result for one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductReport {
    pub product_id: i64,
    pub product_name: String,
    pub report: ConflictReport,
}

/// Counts shown above the per-product results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    pub total_products: usize,
    /// Products with at least one conflict.
    pub conflict_count: usize,
    /// Warnings across all products.
    pub warning_count: usize,
    pub clean_products: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogValidation {
    pub results: Vec<ProductReport>,
    pub summary: ValidationSummary,
}

/// Pricing operations over a catalog store.
pub struct PricingService<S: CatalogStore> {
    store: S,
    resolver: PriceTierResolver,
    stats: Arc<dyn PricingStats>,
}

impl<S: CatalogStore> PricingService<S> {
    /// Creates a service that discards its stats.
    pub fn new(store: S, policy: PricingPolicy) -> Self {
        PricingService {
            store,
            resolver: PriceTierResolver::new(policy),
            stats: Arc::new(NoopStats),
        }
    }

    /// Sends outcomes to `stats`.
    pub fn with_stats(mut self, stats: Arc<dyn PricingStats>) -> Self {
        self.stats = stats;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn policy(&self) -> &PricingPolicy {
        self.resolver.policy()
    }

    /// Prices a product line for the storefront.
    ///
    /// The first seasonal offer, if any, is selected automatically.
    pub async fn quote(&self, product_id: i64, context: &PricingContext) -> StoreResult<ProductQuote> {
        let product = self.store.get_by_id(product_id).await?;
        let tiers = self.resolver.resolve(&product, context)?;

        let mut offers = OfferSelection::new(generate_offers(&product, context));
        offers.auto_select();
        let quote = offers.quote(tiers.final_price, context.quantity);

        debug!(
            id = %product_id,
            tier = tiers.applied_tier.name(),
            offers = offers.available().len(),
            final_total = %quote.final_total,
            "Quoted product"
        );
        self.stats.record_quote();

        Ok(ProductQuote {
            product_id,
            tiers,
            offers,
            quote,
        })
    }

    /// Validates and stores a product.
    ///
    /// A product with id 0, or an id the catalog does not hold, is created.
    /// Otherwise the stored record is replaced and a price change keeps the
    /// old price as `previous_price`.
    ///
    /// ## Errors
    /// - `Pricing` when a field is malformed (empty name, negative stock)
    /// - `Rejected` with the full report when validation finds a conflict
    pub async fn save_product(&self, product: Product, on: NaiveDate) -> StoreResult<Product> {
        validate_product(&product).map_err(PricingError::from)?;

        let all = self.store.get_all().await?;
        let existing = all.iter().find(|p| product.id != 0 && p.id == product.id);

        let report =
            validate_configuration(&product, &all, existing.map(|p| p.id), self.policy(), on);
        self.record_report(&report);

        if !report.is_valid {
            warn!(
                id = %product.id,
                conflicts = report.conflicts.len(),
                "Rejected product configuration"
            );
            return Err(StoreError::Rejected(report));
        }
        for warning in &report.warnings {
            debug!(id = %product.id, warning = %warning, "Pricing warning");
        }

        match existing {
            Some(stored) => {
                let mut patch = ProductPatch::replace_with(&product);
                if stored.price != product.price {
                    patch.previous_price = Some(stored.price);
                }
                let saved = self.store.update(product.id, patch).await?;
                match saved.price_change_percent() {
                    Some(change) => info!(id = %saved.id, change = %change, "Updated product price"),
                    None => info!(id = %saved.id, "Updated product pricing"),
                }
                Ok(saved)
            }
            None => {
                info!(name = %product.name, "Creating product");
                self.store.create(product).await
            }
        }
    }

    /// Builds the bulk preview against the current catalog.
    ///
    /// ## Errors
    /// `Rejected` when the request itself is invalid (for example a range
    /// with `min >= max`).
    pub async fn preview_bulk(
        &self,
        update: &BulkUpdate,
        filters: &BulkFilters,
        on: NaiveDate,
    ) -> StoreResult<Vec<PreviewRow>> {
        let request = validate_bulk_update(update, self.policy());
        if !request.is_valid {
            self.record_report(&request);
            warn!(summary = %request.summary(), "Rejected bulk update request");
            return Err(StoreError::Rejected(request));
        }

        let products = self.store.get_all().await?;
        let rows = preview_bulk_update(&products, update, filters, self.policy(), on);

        for row in rows.iter().filter(|row| row.has_conflicts) {
            if let Some(kind) = row.conflict_kind {
                self.stats.record_conflict(kind);
            }
        }
        info!(
            rows = rows.len(),
            conflicts = rows.iter().filter(|r| r.has_conflicts).count(),
            "Bulk preview ready"
        );

        Ok(rows)
    }

    /// Writes an approved preview. Each row succeeds or fails on its own.
    pub async fn commit_bulk(
        &self,
        rows: &[PreviewRow],
        resolution: ConflictResolution,
    ) -> Vec<UpdateResult> {
        let results = commit_bulk_update(&self.store, rows, resolution).await;

        let committed = results.iter().filter(|r| r.is_committed()).count();
        let failed = results.iter().filter(|r| r.is_failed()).count();
        self.stats.record_commit(committed, failed);

        results
    }

    /// Validates every product (optionally one category) against the
    /// whole catalog.
    pub async fn validate_catalog(
        &self,
        category: Option<Category>,
        on: NaiveDate,
    ) -> StoreResult<CatalogValidation> {
        let all = self.store.get_all().await?;

        let results: Vec<ProductReport> = all
            .iter()
            .filter(|p| category.map_or(true, |c| p.category == c))
            .map(|product| {
                let report =
                    validate_configuration(product, &all, Some(product.id), self.policy(), on);
                self.record_report(&report);
                ProductReport {
                    product_id: product.id,
                    product_name: product.name.clone(),
                    report,
                }
            })
            .collect();

        let total_products = results.len();
        let conflict_count = results.iter().filter(|r| !r.report.is_valid).count();
        let summary = ValidationSummary {
            total_products,
            conflict_count,
            warning_count: results.iter().map(|r| r.report.warnings.len()).sum(),
            clean_products: total_products - conflict_count,
        };

        info!(
            total = summary.total_products,
            conflicts = summary.conflict_count,
            warnings = summary.warning_count,
            "Catalog validation complete"
        );

        Ok(CatalogValidation { results, summary })
    }

    fn record_report(&self, report: &ConflictReport) {
        for conflict in &report.conflicts {
            self.stats.record_conflict(conflict.kind);
        }
    }
}
