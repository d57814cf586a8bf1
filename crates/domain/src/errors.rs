use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("Transport error talking to {server}: {reason}")]
    TransportError { server: String, reason: String },

    #[error("Response id mismatch: sent {sent}, received {received}")]
    ResponseIdMismatch { sent: u16, received: u16 },

    #[error("Record cannot be encoded: {0}")]
    RecordEncoding(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
