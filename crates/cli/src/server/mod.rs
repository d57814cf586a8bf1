pub mod dns;
pub mod metrics;
pub mod reload;

pub use dns::start_dns_server;
pub use metrics::spawn_metrics_reporter;
pub use reload::watch_config;
