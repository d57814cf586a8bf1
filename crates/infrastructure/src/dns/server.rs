use crate::dns::forwarding::{MessageBuilder, RecordTypeMapper};
use hickory_proto::op::{Message, MessageType, OpCode};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, error, warn};
use udns_application::use_cases::HandleDnsQueryUseCase;
use udns_domain::DnsQuery;

/// Turns one request datagram into one reply datagram.
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    /// Returns the serialized reply, or `None` when the bytes are not a
    /// query that a reply could be addressed to.
    pub async fn handle_raw(&self, request_bytes: &[u8], client: SocketAddr) -> Option<Vec<u8>> {
        let request = match Message::from_vec(request_bytes) {
            Ok(message) => message,
            Err(e) => {
                warn!(client = %client, error = %e, "Dropping malformed DNS request");
                return None;
            }
        };

        if request.message_type() != MessageType::Query || request.op_code() != OpCode::Query {
            debug!(client = %client, op_code = ?request.op_code(), "Ignoring DNS message that is not a query");
            return None;
        }

        let queries: Vec<DnsQuery> = request
            .queries()
            .iter()
            .map(|query| {
                DnsQuery::new(
                    query.name().to_ascii(),
                    RecordTypeMapper::from_hickory(query.query_type()),
                )
            })
            .collect();

        for query in &queries {
            debug!(domain = %query.domain, record_type = %query.record_type, client = %client, "DNS query received");
        }

        let answers = self.use_case.execute(&queries).await;
        let response = MessageBuilder::build_response(&request, answers);

        match MessageBuilder::serialize_message(&response) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                error!(client = %client, error = %e, "Failed to encode reply, answering without records");
                let empty = MessageBuilder::build_response(&request, vec![]);
                MessageBuilder::serialize_message(&empty).ok()
            }
        }
    }
}
