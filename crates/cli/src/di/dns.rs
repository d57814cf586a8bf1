use std::sync::Arc;
use tracing::info;
use udns_application::services::{ForwarderSelector, RoutingSnapshot};
use udns_application::use_cases::{
    GetCacheStatsUseCase, HandleDnsQueryUseCase, ReloadConfigUseCase,
};
use udns_domain::{CliOverrides, Config};
use udns_infrastructure::dns::{DnsCache, UpstreamForwarder};

pub struct DnsServices {
    pub handler_use_case: Arc<HandleDnsQueryUseCase>,
    pub reload: Arc<ReloadConfigUseCase>,
    pub cache_stats: Arc<GetCacheStatsUseCase>,
}

impl DnsServices {
    pub fn new(config: &Config, cli_overrides: CliOverrides) -> anyhow::Result<Self> {
        let snapshot = RoutingSnapshot::from_config(&config.dns)?;
        info!(
            nameservers = ?snapshot.nameservers,
            forwarders = snapshot.rules.len(),
            "Initializing DNS services"
        );

        let cache = Arc::new(DnsCache::new());
        let selector = Arc::new(ForwarderSelector::new(snapshot));
        let upstream = Arc::new(UpstreamForwarder::from_millis(config.dns.query_timeout));

        let handler_use_case = Arc::new(HandleDnsQueryUseCase::new(
            cache.clone(),
            selector.clone(),
            upstream,
        ));
        let reload = Arc::new(ReloadConfigUseCase::new(
            selector,
            config.server.listen_addr.clone(),
            cli_overrides,
        ));
        let cache_stats = Arc::new(GetCacheStatsUseCase::new(cache));

        Ok(Self {
            handler_use_case,
            reload,
            cache_stats,
        })
    }
}
