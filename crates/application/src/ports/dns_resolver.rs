use async_trait::async_trait;
use hickory_proto::rr::Record;
use std::net::SocketAddr;
use udns_domain::{DnsQuery, DomainError};

/// One question/answer exchange with an upstream nameserver.
#[async_trait]
pub trait UpstreamResolver: Send + Sync {
    /// Sends `query` with recursion desired to `upstream` and returns the
    /// answer section of the reply. An empty answer section is `Ok(vec![])`.
    async fn resolve(&self, query: &DnsQuery, upstream: SocketAddr)
        -> Result<Vec<Record>, DomainError>;
}
