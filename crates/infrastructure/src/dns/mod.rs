pub mod cache;
pub mod forwarding;
pub mod server;
pub mod transport;

pub use cache::{CacheKey, CacheMetrics, DnsCache};
pub use forwarding::UpstreamForwarder;
pub use server::DnsServerHandler;
