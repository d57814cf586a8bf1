use super::errors::ConfigError;
use super::upstream::{ensure_ip_and_port, ForwarderRule};
use crate::dns_record::canonical_name;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Default upstreams, `ip` or `ip:port`. Only the first one is used for
    /// questions no forwarder claims.
    #[serde(default = "default_nameservers")]
    pub nameservers: Vec<String>,

    /// Domain suffix → upstream address.
    #[serde(default)]
    pub forwarders: BTreeMap<String, String>,

    /// Reserved: parsed and carried through reloads, never served.
    #[serde(default, alias = "local")]
    pub local_records: BTreeMap<String, String>,

    /// Upper bound for one upstream exchange, in milliseconds.
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            nameservers: default_nameservers(),
            forwarders: BTreeMap::new(),
            local_records: BTreeMap::new(),
            query_timeout: default_query_timeout(),
        }
    }
}

impl DnsConfig {
    /// Rewrites every upstream to `ip:port` and every forwarder suffix to
    /// canonical form. Fails on the first address that does not validate.
    pub fn normalize(&mut self) -> Result<(), ConfigError> {
        for ns in self.nameservers.iter_mut() {
            *ns = ensure_ip_and_port(ns)?.to_string();
        }

        let mut forwarders = BTreeMap::new();
        for (suffix, server) in &self.forwarders {
            let addr = ensure_ip_and_port(server)?;
            forwarders.insert(canonical_name(suffix), addr.to_string());
        }
        self.forwarders = forwarders;

        Ok(())
    }

    pub fn nameserver_addrs(&self) -> Result<Vec<SocketAddr>, ConfigError> {
        self.nameservers
            .iter()
            .map(|ns| ensure_ip_and_port(ns))
            .collect()
    }

    /// Forwarding rules ordered most-specific suffix first, ties broken
    /// alphabetically.
    pub fn forwarder_rules(&self) -> Result<Vec<ForwarderRule>, ConfigError> {
        let mut rules = self
            .forwarders
            .iter()
            .map(|(suffix, server)| {
                ensure_ip_and_port(server).map(|addr| ForwarderRule::new(suffix, addr))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        rules.sort_by(|a, b| b.depth().cmp(&a.depth()).then_with(|| a.suffix.cmp(&b.suffix)));
        Ok(rules)
    }
}

fn default_nameservers() -> Vec<String> {
    vec!["8.8.8.8:53".to_string(), "1.1.1.1:53".to_string()]
}

fn default_query_timeout() -> u64 {
    2000
}
