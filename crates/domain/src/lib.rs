//! uDNS Domain Layer
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod errors;

pub use config::{CliOverrides, Config, ConfigError, DnsConfig};
pub use dns_query::DnsQuery;
pub use dns_record::{canonical_name, is_subdomain, DnsRecord, RecordType};
pub use errors::DomainError;
