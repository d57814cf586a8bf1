use tracing::info;
use udns_domain::{CliOverrides, Config};

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

/// Called once logging is up, since loading happens before the subscriber exists.
pub fn log_config(config: &Config, config_path: Option<&str>) {
    info!(
        config_file = config_path.unwrap_or("default"),
        listen = %config.server.listen_addr,
        nameservers = config.dns.nameservers.len(),
        forwarders = config.dns.forwarders.len(),
        local_records = config.dns.local_records.len(),
        query_timeout_ms = config.dns.query_timeout,
        "Configuration loaded"
    );
}
