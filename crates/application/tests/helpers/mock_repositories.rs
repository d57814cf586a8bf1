#![allow(dead_code)]
use async_trait::async_trait;
use hickory_proto::rr::rdata::{A, CNAME};
use hickory_proto::rr::{Name, RData, Record};
use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use udns_application::ports::{AnswerCache, CacheMetricsSnapshot, UpstreamResolver};
use udns_domain::{canonical_name, DnsQuery, DomainError, RecordType};

pub fn a_record(name: &str, ip: Ipv4Addr, ttl: u32) -> Record {
    Record::from_rdata(Name::from_ascii(name).unwrap(), ttl, RData::A(A(ip)))
}

pub fn cname_record(name: &str, target: &str, ttl: u32) -> Record {
    Record::from_rdata(
        Name::from_ascii(name).unwrap(),
        ttl,
        RData::CNAME(CNAME(Name::from_ascii(target).unwrap())),
    )
}

type Key = (String, RecordType);

/// Keyed store without expiry, enough to observe what the handler does.
#[derive(Default)]
pub struct MockAnswerCache {
    entries: Mutex<HashMap<Key, Vec<Record>>>,
    lookups: Mutex<Vec<Key>>,
}

impl MockAnswerCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, record: Record) {
        self.insert(&record);
    }

    pub fn stored(&self, name: &str, record_type: RecordType) -> Vec<Record> {
        self.entries
            .lock()
            .unwrap()
            .get(&(canonical_name(name), record_type))
            .cloned()
            .unwrap_or_default()
    }

    pub fn lookups(&self) -> Vec<Key> {
        self.lookups.lock().unwrap().clone()
    }
}

impl AnswerCache for MockAnswerCache {
    fn insert(&self, record: &Record) -> bool {
        let key = (
            canonical_name(&record.name().to_ascii()),
            RecordType::from_u16(u16::from(record.record_type())),
        );
        self.entries
            .lock()
            .unwrap()
            .entry(key)
            .or_default()
            .push(record.clone());
        true
    }

    fn lookup(&self, name: &str, record_type: RecordType) -> Option<Vec<Record>> {
        let key = (canonical_name(name), record_type);
        self.lookups.lock().unwrap().push(key.clone());
        self.entries.lock().unwrap().get(&key).cloned()
    }

    fn lookup_target(&self, name: &str, record_type: RecordType) -> Option<Vec<Record>> {
        self.lookup(name, record_type)
    }

    fn remove(&self, name: &str, record_type: RecordType) -> bool {
        self.entries
            .lock()
            .unwrap()
            .remove(&(canonical_name(name), record_type))
            .is_some()
    }

    fn purge(&self) {
        self.entries.lock().unwrap().clear();
    }

    fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            total_entries: self.len(),
            ..Default::default()
        }
    }
}

pub struct MockUpstreamResolver {
    responses: Arc<Mutex<HashMap<String, Vec<Record>>>>,
    error_responses: Arc<Mutex<HashMap<String, DomainError>>>,
    calls: Arc<Mutex<Vec<(DnsQuery, SocketAddr)>>>,
}

impl MockUpstreamResolver {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            error_responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_response(&self, domain: &str, records: Vec<Record>) {
        self.responses
            .lock()
            .unwrap()
            .insert(canonical_name(domain), records);
    }

    pub fn set_response_error(&self, domain: &str, error: DomainError) {
        self.error_responses
            .lock()
            .unwrap()
            .insert(canonical_name(domain), error);
    }

    pub fn calls(&self) -> Vec<(DnsQuery, SocketAddr)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockUpstreamResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UpstreamResolver for MockUpstreamResolver {
    async fn resolve(
        &self,
        query: &DnsQuery,
        upstream: SocketAddr,
    ) -> Result<Vec<Record>, DomainError> {
        self.calls.lock().unwrap().push((query.clone(), upstream));

        let domain = canonical_name(&query.domain);
        if let Some(err) = self.error_responses.lock().unwrap().get(&domain).cloned() {
            return Err(err);
        }

        Ok(self
            .responses
            .lock()
            .unwrap()
            .get(&domain)
            .cloned()
            .unwrap_or_default())
    }
}
