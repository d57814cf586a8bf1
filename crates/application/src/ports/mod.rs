mod dns_cache_port;
mod dns_resolver;

pub use dns_cache_port::{AnswerCache, CacheMetricsSnapshot};
pub use dns_resolver::UpstreamResolver;

// Re-export for convenience
pub use udns_domain::DnsQuery;
