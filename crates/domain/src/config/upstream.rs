use super::errors::ConfigError;
use crate::dns_record::{canonical_name, is_subdomain};
use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_DNS_PORT: u16 = 53;

/// Parses `ip`, `ip:port`, `[v6]:port` or a bare IPv6 address into a socket
/// address, defaulting the port to 53. Ports outside 1–65535 are rejected.
pub fn ensure_ip_and_port(raw: &str) -> Result<SocketAddr, ConfigError> {
    let raw = raw.trim();

    if let Ok(ip) = raw.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, DEFAULT_DNS_PORT));
    }

    if let Ok(addr) = raw.parse::<SocketAddr>() {
        if addr.port() == 0 {
            return Err(ConfigError::InvalidPort(raw.to_string()));
        }
        return Ok(addr);
    }

    let (host, port) = raw
        .rsplit_once(':')
        .ok_or_else(|| ConfigError::InvalidIp(raw.to_string()))?;
    let host = host.trim_start_matches('[').trim_end_matches(']');

    if host.parse::<IpAddr>().is_err() {
        return Err(ConfigError::InvalidIp(host.to_string()));
    }

    // The host is a valid IP, so the port is what broke SocketAddr parsing.
    Err(ConfigError::InvalidPort(port.to_string()))
}

/// A domain suffix routed to a dedicated upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwarderRule {
    /// Canonical suffix, e.g. `corp.example.`
    pub suffix: String,
    pub upstream: SocketAddr,
}

impl ForwarderRule {
    pub fn new(suffix: &str, upstream: SocketAddr) -> Self {
        Self {
            suffix: canonical_name(suffix),
            upstream,
        }
    }

    pub fn matches_domain(&self, query_domain: &str) -> bool {
        is_subdomain(query_domain, &self.suffix)
    }

    /// Label count, used to order rules most-specific first.
    pub fn depth(&self) -> usize {
        self.suffix.trim_end_matches('.').split('.').filter(|l| !l.is_empty()).count()
    }
}
