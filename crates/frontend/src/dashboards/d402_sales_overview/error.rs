use thiserror::Error;

/// Failure of a single dashboard data request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("HTTP error: {0}")]
    Http(u16),

    #[error("Failed to parse response: {0}")]
    Malformed(String),

    #[error("Request timed out after {0} ms")]
    Timeout(u32),
}
