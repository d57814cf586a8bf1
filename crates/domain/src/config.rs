//! Configuration module for uDNS
//!
//! - `root`: main configuration, file discovery and CLI overrides
//! - `server`: listen address
//! - `dns`: nameservers, forwarders, local records, upstream timeout
//! - `upstream`: address normalization and forwarding rules
//! - `logging`: logging settings
//! - `errors`: configuration errors

pub mod dns;
pub mod errors;
pub mod logging;
pub mod root;
pub mod server;
pub mod upstream;

pub use dns::DnsConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use upstream::{ensure_ip_and_port, ForwarderRule, DEFAULT_DNS_PORT};
