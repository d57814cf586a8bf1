use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use udns_domain::{CliOverrides, Config};
use udns_infrastructure::dns::DnsServerHandler;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "udns")]
#[command(version)]
#[command(about = "uDNS - forwarding DNS resolver with an in-memory answer cache")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Listen address (ip:port)
    #[arg(short = 'l', long)]
    listen: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        listen_addr: cli.listen.clone(),
        log_level: cli.log_level.clone(),
    };

    let config_path = cli.config.clone().or_else(Config::get_config_path);
    let config = bootstrap::load_config(config_path.as_deref(), cli_overrides.clone())?;

    bootstrap::init_logging(&config);

    info!("Starting uDNS v{}", env!("CARGO_PKG_VERSION"));
    bootstrap::log_config(&config, config_path.as_deref());

    let listen_addr = config.listen_socket_addr()?;
    let dns_services = di::DnsServices::new(&config, cli_overrides)?;

    // Dropping the watcher stops it, so it lives until main returns.
    let _watcher = match &config_path {
        Some(path) => match server::watch_config(PathBuf::from(path), dns_services.reload.clone()) {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                warn!(error = %e, path = %path, "Config hot reload disabled");
                None
            }
        },
        None => {
            info!("No configuration file in use, hot reload disabled");
            None
        }
    };

    server::spawn_metrics_reporter(dns_services.cache_stats.clone());

    let handler = Arc::new(DnsServerHandler::new(dns_services.handler_use_case.clone()));
    server::start_dns_server(listen_addr, handler).await?;

    let stats = dns_services.cache_stats.execute();
    info!(
        entries = stats.total_entries,
        hits = stats.hits,
        misses = stats.misses,
        insertions = stats.insertions,
        refreshes = stats.refreshes,
        lazy_evictions = stats.lazy_evictions,
        hit_rate = %format!("{:.1}%", stats.hit_rate),
        "Final cache metrics"
    );

    info!("Server shutdown complete");
    Ok(())
}
