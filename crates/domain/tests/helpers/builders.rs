#![allow(dead_code)]
use std::time::{Duration, SystemTime};
use udns_domain::{DnsRecord, RecordType};

pub fn fixed_now() -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
}

pub struct DnsRecordBuilder {
    name: String,
    value: String,
    record_type: RecordType,
    ttl: u32,
    now: SystemTime,
}

impl DnsRecordBuilder {
    pub fn new() -> Self {
        Self {
            name: "example.com".to_string(),
            value: "192.0.2.1".to_string(),
            record_type: RecordType::A,
            ttl: 300,
            now: fixed_now(),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn record_type(mut self, record_type: RecordType) -> Self {
        self.record_type = record_type;
        self
    }

    pub fn ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn at(mut self, now: SystemTime) -> Self {
        self.now = now;
        self
    }

    pub fn build(self) -> DnsRecord {
        DnsRecord::new(&self.name, self.value, self.record_type, self.ttl, self.now)
    }
}

impl Default for DnsRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}
