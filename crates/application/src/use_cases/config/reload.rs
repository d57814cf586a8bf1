use crate::services::{ForwarderSelector, RoutingSnapshot};
use std::sync::Arc;
use tracing::{info, warn};
use udns_domain::{CliOverrides, Config, DomainError};

/// Re-reads the config file and swaps in its routing tables.
///
/// Nothing is applied unless the new file loads and validates; on error the
/// previous snapshot stays in force. Command-line overrides given at startup
/// are applied to every reloaded file.
pub struct ReloadConfigUseCase {
    selector: Arc<ForwarderSelector>,
    current_listen_addr: String,
    cli_overrides: CliOverrides,
}

impl ReloadConfigUseCase {
    pub fn new(
        selector: Arc<ForwarderSelector>,
        current_listen_addr: impl Into<String>,
        cli_overrides: CliOverrides,
    ) -> Self {
        Self {
            selector,
            current_listen_addr: current_listen_addr.into(),
            cli_overrides,
        }
    }

    pub fn execute(&self, config_path: &str) -> Result<Config, DomainError> {
        let new_config = Config::load(Some(config_path), self.cli_overrides.clone())
            .map_err(|e| DomainError::ConfigError(format!("Config load error: {}", e)))?;

        new_config
            .validate()
            .map_err(|e| DomainError::ConfigError(format!("Config validation error: {}", e)))?;

        let snapshot = RoutingSnapshot::from_config(&new_config.dns)
            .map_err(|e| DomainError::ConfigError(format!("Config validation error: {}", e)))?;

        if new_config.server.listen_addr != self.current_listen_addr {
            warn!(
                current = %self.current_listen_addr,
                requested = %new_config.server.listen_addr,
                "Listen address change requires a restart"
            );
        }

        if *self.selector.snapshot() == snapshot {
            info!("Configuration reloaded from: {}, routing unchanged", config_path);
            return Ok(new_config);
        }

        info!(
            nameservers = ?snapshot.nameservers,
            forwarders = snapshot.rules.len(),
            "Configuration reloaded successfully from: {}",
            config_path
        );
        self.selector.apply(snapshot);

        Ok(new_config)
    }
}
