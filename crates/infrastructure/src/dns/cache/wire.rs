//! Conversion between wire records and the cache's record model.
//!
//! Records cross this boundary as zone-file presentation text,
//! `name \t ttl \t class \t type \t value`. Only types whose value can be
//! parsed back into RDATA are accepted for caching.

use crate::dns::forwarding::RecordTypeMapper;
use hickory_proto::rr::rdata::{A, AAAA, CNAME, MX, NS, PTR, SRV};
use hickory_proto::rr::{Name, RData, Record};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use std::time::SystemTime;
use udns_domain::dns_record::record::PRESENTATION_FIELDS;
use udns_domain::{DnsRecord, DomainError, RecordType};

const SUPPORTED_TYPES: [RecordType; 7] = [
    RecordType::A,
    RecordType::AAAA,
    RecordType::CNAME,
    RecordType::NS,
    RecordType::PTR,
    RecordType::MX,
    RecordType::SRV,
];

pub fn is_supported(record_type: RecordType) -> bool {
    SUPPORTED_TYPES.contains(&record_type)
}

pub fn presentation_line(record: &Record) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        record.name(),
        record.ttl(),
        record.dns_class(),
        record.record_type(),
        record.data()
    )
}

/// Wire record to cache model, stamping `expires = now + ttl`.
pub fn to_model(record: &Record, now: SystemTime) -> Result<DnsRecord, DomainError> {
    let record_type = RecordTypeMapper::from_hickory(record.record_type());
    if !is_supported(record_type) {
        return Err(DomainError::RecordEncoding(format!(
            "{} records are not cached",
            record_type
        )));
    }

    DnsRecord::from_presentation(&presentation_line(record), record_type, now)
}

/// Cache model back to a wire record carrying the TTL left at `now`, read
/// from the record's presentation line.
pub fn to_wire(record: &DnsRecord, now: SystemTime) -> Result<Record, DomainError> {
    let line = record.to_presentation(now);
    let fields: [&str; PRESENTATION_FIELDS] = line
        .split('\t')
        .collect::<Vec<_>>()
        .try_into()
        .map_err(|_| DomainError::RecordEncoding(format!("malformed presentation line '{}'", line)))?;

    let name = parse_name(fields[0])?;
    let ttl = parse_field::<u32>(fields[1], &line)?;
    let rdata = parse_rdata(record.record_type, fields[4])?;
    Ok(Record::from_rdata(name, ttl, rdata))
}

fn parse_rdata(record_type: RecordType, value: &str) -> Result<RData, DomainError> {
    match record_type {
        RecordType::A => Ok(RData::A(A(parse_field::<Ipv4Addr>(value, value)?))),
        RecordType::AAAA => Ok(RData::AAAA(AAAA(parse_field::<Ipv6Addr>(value, value)?))),
        RecordType::CNAME => Ok(RData::CNAME(CNAME(parse_name(value)?))),
        RecordType::NS => Ok(RData::NS(NS(parse_name(value)?))),
        RecordType::PTR => Ok(RData::PTR(PTR(parse_name(value)?))),
        RecordType::MX => {
            let fields = split_fields::<2>(value)?;
            Ok(RData::MX(MX::new(
                parse_field(fields[0], value)?,
                parse_name(fields[1])?,
            )))
        }
        RecordType::SRV => {
            let fields = split_fields::<4>(value)?;
            Ok(RData::SRV(SRV::new(
                parse_field(fields[0], value)?,
                parse_field(fields[1], value)?,
                parse_field(fields[2], value)?,
                parse_name(fields[3])?,
            )))
        }
        other => Err(DomainError::RecordEncoding(format!(
            "no wire encoding for {} record '{}'",
            other, value
        ))),
    }
}

fn parse_name(value: &str) -> Result<Name, DomainError> {
    Name::from_ascii(value)
        .map_err(|e| DomainError::RecordEncoding(format!("invalid name '{}': {}", value, e)))
}

fn parse_field<T: FromStr>(field: &str, value: &str) -> Result<T, DomainError> {
    field
        .parse()
        .map_err(|_| DomainError::RecordEncoding(format!("invalid field '{}' in '{}'", field, value)))
}

fn split_fields<const N: usize>(value: &str) -> Result<[&str; N], DomainError> {
    let fields: Vec<&str> = value.split_whitespace().collect();
    fields.try_into().map_err(|_| {
        DomainError::RecordEncoding(format!("expected {} fields in '{}'", N, value))
    })
}
