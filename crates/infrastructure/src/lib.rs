//! uDNS Infrastructure Layer
pub mod dns;
