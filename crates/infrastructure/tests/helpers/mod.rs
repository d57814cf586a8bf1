pub mod builders;
pub mod dns_server_mock;

pub use builders::{a_values, RecordBuilder};
pub use dns_server_mock::{MockBehavior, MockDnsServer};
