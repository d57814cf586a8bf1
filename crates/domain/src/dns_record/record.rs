use super::{canonical_name, RecordType};
use crate::DomainError;
use std::time::{Duration, SystemTime};

/// Number of tab-separated fields in a presentation line:
/// `name \t ttl \t class \t type \t value`.
pub const PRESENTATION_FIELDS: usize = 5;

/// One cached answer.
///
/// Identity is `(name, record_type, value)`. The TTL is never stored: it is
/// folded into the absolute `expires` instant at insertion and recomputed
/// from it whenever the record is emitted again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    pub name: String,
    pub value: String,
    pub record_type: RecordType,
    pub expires: SystemTime,
}

impl DnsRecord {
    pub fn new(
        name: &str,
        value: impl Into<String>,
        record_type: RecordType,
        ttl: u32,
        now: SystemTime,
    ) -> Self {
        Self {
            name: canonical_name(name),
            value: value.into(),
            record_type,
            expires: now + Duration::from_secs(u64::from(ttl)),
        }
    }

    /// Parses a zone-file presentation line.
    ///
    /// The record type comes from the caller (the RR header), not from the
    /// text; the line must split into exactly [`PRESENTATION_FIELDS`] tab
    /// separated fields or the record is rejected.
    pub fn from_presentation(
        line: &str,
        record_type: RecordType,
        now: SystemTime,
    ) -> Result<Self, DomainError> {
        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() != PRESENTATION_FIELDS {
            return Err(DomainError::InvalidRecord(format!(
                "expected {} fields, got {}: {}",
                PRESENTATION_FIELDS,
                parts.len(),
                line
            )));
        }

        let ttl: u32 = parts[1].trim().parse().map_err(|_| {
            DomainError::InvalidRecord(format!("invalid ttl '{}' in: {}", parts[1], line))
        })?;

        Ok(Self::new(parts[0], parts[4], record_type, ttl, now))
    }

    /// Renders the record back to presentation text with the TTL that is
    /// left at `now`.
    pub fn to_presentation(&self, now: SystemTime) -> String {
        format!(
            "{}\t{}\tIN\t{}\t{}",
            self.name,
            self.remaining_ttl(now),
            self.record_type,
            self.value
        )
    }

    #[inline]
    pub fn is_expired_at(&self, now: SystemTime) -> bool {
        self.expires <= now
    }

    pub fn remaining_ttl(&self, now: SystemTime) -> u32 {
        self.expires
            .duration_since(now)
            .map(|left| left.as_secs().min(u64::from(u32::MAX)) as u32)
            .unwrap_or(0)
    }

    /// Takes the expiry of a newer copy of the same record. The expiry may
    /// move earlier when the newer copy carries a shorter TTL.
    pub fn refresh(&mut self, newer: &DnsRecord) {
        self.expires = newer.expires;
    }

    pub fn same_identity(&self, other: &DnsRecord) -> bool {
        self.record_type == other.record_type
            && self.value == other.value
            && self.name == other.name
    }
}
