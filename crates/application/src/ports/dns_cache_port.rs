use hickory_proto::rr::Record;
use udns_domain::RecordType;

/// Snapshot of answer cache counters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheMetricsSnapshot {
    pub total_entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
    pub refreshes: u64,
    pub lazy_evictions: u64,
    pub hit_rate: f64,
}

/// Answer cache as seen by the query path.
///
/// Keys are `(canonical name, record type)`. Implementations must never hand
/// out an expired answer and must keep I/O out of their critical section.
pub trait AnswerCache: Send + Sync {
    /// Stores one upstream answer. Returns `false` when the record could not
    /// be converted and was dropped.
    fn insert(&self, record: &Record) -> bool;

    /// Live answers for the key, re-encoded with their remaining TTL.
    /// `None` on a miss, including when re-encoding fails.
    fn lookup(&self, name: &str, record_type: RecordType) -> Option<Vec<Record>>;

    /// Like [`AnswerCache::lookup`], but not counted as a hit or miss.
    /// Used to follow CNAME targets.
    fn lookup_target(&self, name: &str, record_type: RecordType) -> Option<Vec<Record>>;

    /// Drops every answer under the key.
    fn remove(&self, name: &str, record_type: RecordType) -> bool;

    fn purge(&self);

    /// Number of keys, not records.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn metrics_snapshot(&self) -> CacheMetricsSnapshot;
}
