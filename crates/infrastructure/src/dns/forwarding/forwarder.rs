use super::message_builder::MessageBuilder;
use super::response_parser::{DnsResponse, ResponseParser};
use crate::dns::transport::Transport;
use async_trait::async_trait;
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::Record;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;
use udns_application::ports::UpstreamResolver;
use udns_domain::{DnsQuery, DomainError};

/// Sends one question to one upstream: UDP first, TCP when the UDP reply
/// is truncated. Each exchange is bounded by `timeout`.
pub struct UpstreamForwarder {
    timeout: Duration,
}

impl UpstreamForwarder {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn from_millis(timeout_ms: u64) -> Self {
        Self::new(Duration::from_millis(timeout_ms))
    }

    async fn exchange(
        &self,
        transport: Transport,
        id: u16,
        request: &[u8],
    ) -> Result<DnsResponse, DomainError> {
        let protocol = transport.protocol_name();
        let reply = tokio::time::timeout(self.timeout, transport.send(request, self.timeout))
            .await
            .map_err(|_| {
                debug!(protocol, "Upstream exchange timed out");
                DomainError::QueryTimeout
            })??;

        let response = ResponseParser::parse(&reply.bytes)?;
        if response.id != id {
            return Err(DomainError::ResponseIdMismatch {
                sent: id,
                received: response.id,
            });
        }

        debug!(
            protocol = reply.protocol_used,
            answers = response.answers.len(),
            "Upstream exchange complete"
        );

        Ok(response)
    }
}

#[async_trait]
impl UpstreamResolver for UpstreamForwarder {
    async fn resolve(
        &self,
        query: &DnsQuery,
        upstream: SocketAddr,
    ) -> Result<Vec<Record>, DomainError> {
        let (id, request) = MessageBuilder::build_query(&query.domain, &query.record_type)?;

        let mut response = self.exchange(Transport::udp(upstream), id, &request).await?;

        if response.truncated {
            debug!(domain = %query.domain, upstream = %upstream, "Truncated UDP reply, retrying over TCP");
            response = self.exchange(Transport::tcp(upstream), id, &request).await?;
        }

        if response.rcode != ResponseCode::NoError {
            debug!(
                domain = %query.domain,
                upstream = %upstream,
                rcode = ?response.rcode,
                "Upstream answered with an error code"
            );
        }

        Ok(response.answers)
    }
}
