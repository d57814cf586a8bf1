#![allow(dead_code)]
use hickory_proto::rr::rdata::{A, CNAME};
use hickory_proto::rr::{Name, RData, Record};
use std::net::Ipv4Addr;

pub struct RecordBuilder;

impl RecordBuilder {
    pub fn a(name: &str, ip: &str, ttl: u32) -> Record {
        let ip: Ipv4Addr = ip.parse().unwrap();
        Record::from_rdata(Name::from_ascii(name).unwrap(), ttl, RData::A(A(ip)))
    }

    pub fn cname(name: &str, target: &str, ttl: u32) -> Record {
        Record::from_rdata(
            Name::from_ascii(name).unwrap(),
            ttl,
            RData::CNAME(CNAME(Name::from_ascii(target).unwrap())),
        )
    }
}

pub fn a_values(records: &[Record]) -> Vec<Ipv4Addr> {
    records
        .iter()
        .filter_map(|record| match record.data() {
            RData::A(a) => Some(a.0),
            _ => None,
        })
        .collect()
}
