mod key;
mod metrics;
mod storage;
pub mod wire;

pub use key::CacheKey;
pub use metrics::CacheMetrics;
pub use storage::DnsCache;
