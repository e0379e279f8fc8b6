//! # Bulk Commit
//!
//! Writes an approved bulk preview to the catalog.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  preview rows ──► plan_commit (core) ──► CommitPlan                    │
//! │                                            │                            │
//! │                          ┌─────────────────┴──────────────┐             │
//! │                          ▼                                ▼             │
//! │                  patches: store.update()           skipped rows         │
//! │                  all dispatched at once            reported as-is       │
//! │                          │                                              │
//! │                          ▼                                              │
//! │                  one UpdateResult per row, in preview order             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each write stands alone. A failed row does not undo the rows that
//! succeeded, and nothing is retried here.

use std::collections::HashMap;

use bazaar_core::{plan_commit, ConflictResolution, PreviewRow, Product};
use futures_util::future::join_all;
use tracing::{debug, info, warn};

use crate::error::{ErrorClass, StoreError};
use crate::store::CatalogStore;

/// What happened to one preview row.
#[derive(Debug)]
pub enum UpdateStatus {
    /// The catalog accepted the patch.
    Committed(Product),
    /// The row was not sent to the catalog.
    Skipped(String),
    /// The catalog rejected or failed the write.
    Failed(StoreError),
}

#[derive(Debug)]
pub struct UpdateResult {
    pub product_id: i64,
    pub status: UpdateStatus,
}

impl UpdateResult {
    pub fn is_committed(&self) -> bool {
        matches!(self.status, UpdateStatus::Committed(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, UpdateStatus::Failed(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.status, UpdateStatus::Skipped(_))
    }

    /// Class of the failure, if the write failed.
    pub fn error_class(&self) -> Option<ErrorClass> {
        match &self.status {
            UpdateStatus::Failed(err) => Some(err.class()),
            _ => None,
        }
    }
}

/// Plans and writes the rows, dispatching every update concurrently.
///
/// Returns one result per preview row, in the same order as `rows`.
pub async fn commit_bulk_update<S>(
    store: &S,
    rows: &[PreviewRow],
    resolution: ConflictResolution,
) -> Vec<UpdateResult>
where
    S: CatalogStore + ?Sized,
{
    let plan = plan_commit(rows, resolution);
    debug!(
        planned = plan.patches.len(),
        skipped = plan.skipped.len(),
        ?resolution,
        "Committing bulk update"
    );

    let writes = plan.patches.into_iter().map(|planned| async move {
        let id = planned.product_id;
        let status = match store.update(id, planned.patch).await {
            Ok(product) => UpdateStatus::Committed(product),
            Err(err) => {
                warn!(id = %id, error = %err, "Bulk update failed for product");
                UpdateStatus::Failed(err)
            }
        };
        UpdateResult {
            product_id: id,
            status,
        }
    });

    let mut results = join_all(writes).await;
    results.extend(plan.skipped.into_iter().map(|row| UpdateResult {
        product_id: row.product_id,
        status: UpdateStatus::Skipped(row.reason),
    }));

    let order: HashMap<i64, usize> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| (row.product_id, index))
        .collect();
    results.sort_by_key(|result| order.get(&result.product_id).copied().unwrap_or(usize::MAX));

    let committed = results.iter().filter(|r| r.is_committed()).count();
    let failed = results.iter().filter(|r| r.is_failed()).count();
    info!(
        committed,
        failed,
        skipped = results.len() - committed - failed,
        "Bulk update finished"
    );

    results
}
