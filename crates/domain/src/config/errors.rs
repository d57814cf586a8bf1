#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    FileRead(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid IP address: {0}")]
    InvalidIp(String),

    #[error("Invalid port number: {0}")]
    InvalidPort(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}
