use arc_swap::ArcSwap;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info};
use udns_domain::config::ForwarderRule;
use udns_domain::{canonical_name, ConfigError, DnsConfig};

/// Routing tables in force for one configuration generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingSnapshot {
    pub nameservers: Vec<SocketAddr>,
    /// Most-specific suffix first.
    pub rules: Vec<ForwarderRule>,
}

impl RoutingSnapshot {
    pub fn new(nameservers: Vec<SocketAddr>, rules: Vec<ForwarderRule>) -> Self {
        Self { nameservers, rules }
    }

    pub fn from_config(dns: &DnsConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            nameservers: dns.nameserver_addrs()?,
            rules: dns.forwarder_rules()?,
        })
    }

    fn select(&self, canonical: &str) -> Option<SocketAddr> {
        self.rules
            .iter()
            .find(|rule| rule.matches_domain(canonical))
            .map(|rule| rule.upstream)
    }
}

/// Picks the upstream for a question name.
///
/// The tables live behind an [`ArcSwap`]: a reload replaces the whole
/// snapshot and every lookup works on exactly one generation.
pub struct ForwarderSelector {
    snapshot: ArcSwap<RoutingSnapshot>,
}

impl ForwarderSelector {
    pub fn new(snapshot: RoutingSnapshot) -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(snapshot),
        }
    }

    /// Upstream of the first forwarder rule whose suffix covers `name`.
    pub fn select(&self, name: &str) -> Option<SocketAddr> {
        self.snapshot.load().select(&canonical_name(name))
    }

    /// Forwarder upstream if one matches, else the first default nameserver.
    pub fn upstream_for(&self, name: &str) -> Option<SocketAddr> {
        let canonical = canonical_name(name);
        let snapshot = self.snapshot.load();

        if let Some(upstream) = snapshot.select(&canonical) {
            debug!(domain = %canonical, upstream = %upstream, "Forwarder rule matched");
            return Some(upstream);
        }

        snapshot.nameservers.first().copied()
    }

    pub fn apply(&self, snapshot: RoutingSnapshot) {
        info!(
            nameservers = snapshot.nameservers.len(),
            forwarders = snapshot.rules.len(),
            "Routing snapshot applied"
        );
        self.snapshot.store(Arc::new(snapshot));
    }

    pub fn snapshot(&self) -> Arc<RoutingSnapshot> {
        self.snapshot.load_full()
    }
}
