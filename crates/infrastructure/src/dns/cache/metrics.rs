use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use udns_application::ports::CacheMetricsSnapshot;

#[derive(Default)]
pub struct CacheMetrics {
    pub hits: AtomicU64,
    pub misses: AtomicU64,
    pub insertions: AtomicU64,
    /// Duplicate values whose expiry was pushed out instead of appended.
    pub refreshes: AtomicU64,
    /// Expired records dropped by the read that found them.
    pub lazy_evictions: AtomicU64,
}

impl CacheMetrics {
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(AtomicOrdering::Relaxed) as f64;
        let total = hits + self.misses.load(AtomicOrdering::Relaxed) as f64;

        if total > 0.0 {
            (hits / total) * 100.0
        } else {
            0.0
        }
    }

    pub fn snapshot(&self, total_entries: usize) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            total_entries,
            hits: self.hits.load(AtomicOrdering::Relaxed),
            misses: self.misses.load(AtomicOrdering::Relaxed),
            insertions: self.insertions.load(AtomicOrdering::Relaxed),
            refreshes: self.refreshes.load(AtomicOrdering::Relaxed),
            lazy_evictions: self.lazy_evictions.load(AtomicOrdering::Relaxed),
            hit_rate: self.hit_rate(),
        }
    }

    #[inline]
    pub(super) fn bump(counter: &AtomicU64, by: u64) {
        counter.fetch_add(by, AtomicOrdering::Relaxed);
    }
}
