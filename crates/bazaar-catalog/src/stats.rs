//! # Pricing Stats
//!
//! Outcome counters recorded by the pricing service. The collector is
//! injected into [`crate::PricingService`], so tests and hosts decide where
//! the numbers go.

use std::collections::BTreeMap;
use std::sync::Mutex;

use bazaar_core::ConflictKind;
use serde::Serialize;

/// Receives pricing service outcomes.
pub trait PricingStats: Send + Sync {
    /// A conflict of `kind` was found while validating a configuration.
    fn record_conflict(&self, kind: ConflictKind);

    /// A bulk commit finished with `committed` written and `failed` rejected
    /// by the catalog.
    fn record_commit(&self, committed: usize, failed: usize);

    /// A product was priced for the storefront.
    fn record_quote(&self);
}

/// Collector that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStats;

impl PricingStats for NoopStats {
    fn record_conflict(&self, _kind: ConflictKind) {}
    fn record_commit(&self, _committed: usize, _failed: usize) {}
    fn record_quote(&self) {}
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub conflicts: BTreeMap<String, u64>,
    pub committed_rows: u64,
    pub failed_rows: u64,
    pub quotes: u64,
}

impl StatsSnapshot {
    pub fn conflicts_of(&self, kind: ConflictKind) -> u64 {
        self.conflicts.get(kind.as_str()).copied().unwrap_or(0)
    }

    pub fn total_conflicts(&self) -> u64 {
        self.conflicts.values().sum()
    }
}

/// Collector that keeps counters in memory.
#[derive(Debug, Default)]
pub struct InMemoryStats {
    inner: Mutex<StatsSnapshot>,
}

impl InMemoryStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StatsSnapshot> {
        // Counters stay usable after a panic elsewhere.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PricingStats for InMemoryStats {
    fn record_conflict(&self, kind: ConflictKind) {
        *self
            .lock()
            .conflicts
            .entry(kind.as_str().to_string())
            .or_insert(0) += 1;
    }

    fn record_commit(&self, committed: usize, failed: usize) {
        let mut stats = self.lock();
        stats.committed_rows += committed as u64;
        stats.failed_rows += failed as u64;
    }

    fn record_quote(&self) {
        self.lock().quotes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_by_kind() {
        let stats = InMemoryStats::new();
        stats.record_conflict(ConflictKind::MarginViolation);
        stats.record_conflict(ConflictKind::MarginViolation);
        stats.record_conflict(ConflictKind::BoundsViolation);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.conflicts_of(ConflictKind::MarginViolation), 2);
        assert_eq!(snapshot.conflicts_of(ConflictKind::BoundsViolation), 1);
        assert_eq!(snapshot.conflicts_of(ConflictKind::DiscountConflict), 0);
        assert_eq!(snapshot.total_conflicts(), 3);
    }

    #[test]
    fn test_commit_counters_accumulate() {
        let stats = InMemoryStats::new();
        stats.record_commit(3, 1);
        stats.record_commit(2, 0);
        stats.record_quote();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.committed_rows, 5);
        assert_eq!(snapshot.failed_rows, 1);
        assert_eq!(snapshot.quotes, 1);
    }
}
