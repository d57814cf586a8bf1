pub mod builders;

pub use builders::{fixed_now, DnsRecordBuilder};
