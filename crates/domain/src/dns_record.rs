pub mod name;
pub mod record;
pub mod record_type;

pub use name::{canonical_name, is_subdomain};
pub use record::DnsRecord;
pub use record_type::RecordType;
