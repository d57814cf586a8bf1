use super::key::CacheKey;
use super::metrics::CacheMetrics;
use super::wire;
use hickory_proto::rr::Record;
use rustc_hash::FxHashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::SystemTime;
use tracing::{debug, warn};
use udns_application::ports::{AnswerCache, CacheMetricsSnapshot};
use udns_domain::{DnsRecord, RecordType};

type Entries = FxHashMap<CacheKey, Vec<DnsRecord>>;

/// In-memory answer cache with lazy expiry.
///
/// One mutex guards the whole map; every read-modify-write runs under it and
/// nothing inside the critical section blocks. Expired records are dropped
/// by the read that finds them, and a key whose list empties is removed.
pub struct DnsCache {
    entries: Mutex<Entries>,
    metrics: CacheMetrics,
}

impl DnsCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(FxHashMap::default()),
            metrics: CacheMetrics::default(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Converts and stores one wire record. Returns `false` if the record
    /// was discarded.
    pub fn add(&self, record: &Record) -> bool {
        self.add_at(record, SystemTime::now())
    }

    pub fn add_at(&self, record: &Record, now: SystemTime) -> bool {
        match wire::to_model(record, now) {
            Ok(model) => {
                self.add_record(model);
                true
            }
            Err(e) => {
                warn!(record = %record.name(), error = %e, "Discarding record that cannot be cached");
                false
            }
        }
    }

    /// Stores `record`, or refreshes the expiry of the entry with the same
    /// `(name, type, value)`.
    pub fn add_record(&self, record: DnsRecord) {
        let key = CacheKey::new(&record.name, record.record_type);
        let mut entries = self.lock();

        let records = entries.entry(key).or_default();
        match records.iter_mut().find(|existing| existing.same_identity(&record)) {
            Some(existing) => {
                existing.refresh(&record);
                CacheMetrics::bump(&self.metrics.refreshes, 1);
            }
            None => {
                records.push(record);
                CacheMetrics::bump(&self.metrics.insertions, 1);
            }
        }
    }

    /// Live records under the key, or `None` if there are none.
    pub fn get(&self, name: &str, record_type: RecordType) -> Option<Vec<DnsRecord>> {
        self.get_at(name, record_type, SystemTime::now())
    }

    pub fn get_at(
        &self,
        name: &str,
        record_type: RecordType,
        now: SystemTime,
    ) -> Option<Vec<DnsRecord>> {
        let live = self.live_at(name, record_type, now);
        self.count_lookup(live.is_some());
        live
    }

    /// Drops the expired records under the key and returns the rest. Leaves
    /// the hit and miss counters alone.
    fn live_at(
        &self,
        name: &str,
        record_type: RecordType,
        now: SystemTime,
    ) -> Option<Vec<DnsRecord>> {
        let key = CacheKey::new(name, record_type);
        let mut entries = self.lock();

        let records = entries.get_mut(&key)?;

        let before = records.len();
        records.retain(|record| !record.is_expired_at(now));
        let evicted = before - records.len();
        if evicted > 0 {
            CacheMetrics::bump(&self.metrics.lazy_evictions, evicted as u64);
            debug!(domain = %key.domain, record_type = %record_type, evicted, "Expired records evicted");
        }

        if records.is_empty() {
            entries.remove(&key);
            return None;
        }

        Some(records.clone())
    }

    fn count_lookup(&self, hit: bool) {
        let counter = if hit {
            &self.metrics.hits
        } else {
            &self.metrics.misses
        };
        CacheMetrics::bump(counter, 1);
    }

    pub fn delete(&self, name: &str, record_type: RecordType) -> bool {
        self.lock().remove(&CacheKey::new(name, record_type)).is_some()
    }

    pub fn purge(&self) {
        self.lock().clear();
    }

    /// Number of keys, not records.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records stored under the key, expired ones included. Does not evict.
    pub fn stored_count(&self, name: &str, record_type: RecordType) -> Option<usize> {
        self.lock()
            .get(&CacheKey::new(name, record_type))
            .map(Vec::len)
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    /// [`AnswerCache::lookup`] at an explicit instant. A record that fails
    /// to encode turns the lookup into a miss.
    pub fn lookup_at(
        &self,
        name: &str,
        record_type: RecordType,
        now: SystemTime,
    ) -> Option<Vec<Record>> {
        let answers = self.encode_live(name, record_type, now);
        self.count_lookup(answers.is_some());
        answers
    }

    /// [`AnswerCache::lookup_target`] at an explicit instant.
    pub fn lookup_target_at(
        &self,
        name: &str,
        record_type: RecordType,
        now: SystemTime,
    ) -> Option<Vec<Record>> {
        self.encode_live(name, record_type, now)
    }

    fn encode_live(
        &self,
        name: &str,
        record_type: RecordType,
        now: SystemTime,
    ) -> Option<Vec<Record>> {
        let records = self.live_at(name, record_type, now)?;

        match records
            .iter()
            .map(|record| wire::to_wire(record, now))
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(answers) => Some(answers),
            Err(e) => {
                warn!(domain = %name, record_type = %record_type, error = %e, "Cached answer could not be encoded, treating as miss");
                None
            }
        }
    }
}

impl Default for DnsCache {
    fn default() -> Self {
        Self::new()
    }
}

impl AnswerCache for DnsCache {
    fn insert(&self, record: &Record) -> bool {
        self.add(record)
    }

    fn lookup(&self, name: &str, record_type: RecordType) -> Option<Vec<Record>> {
        self.lookup_at(name, record_type, SystemTime::now())
    }

    fn lookup_target(&self, name: &str, record_type: RecordType) -> Option<Vec<Record>> {
        self.lookup_target_at(name, record_type, SystemTime::now())
    }

    fn remove(&self, name: &str, record_type: RecordType) -> bool {
        self.delete(name, record_type)
    }

    fn purge(&self) {
        DnsCache::purge(self)
    }

    fn len(&self) -> usize {
        DnsCache::len(self)
    }

    fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics.snapshot(DnsCache::len(self))
    }
}
