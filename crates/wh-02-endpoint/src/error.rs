//! Error types for endpoint handling

use thiserror::Error;

/// Result type alias for endpoint operations
pub type Result<T> = std::result::Result<T, EndpointError>;

/// Errors that can occur while parsing, packing or comparing addresses
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    /// Bad CIDR, bad port or mismatched address families
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Endpoint text is not an address (or does not resolve)
    #[error("Invalid endpoint: {0}")]
    InvalidFormat(String),

    /// Packed address is truncated or carries an unknown tag
    #[error("Malformed packed address: {0}")]
    Malformed(String),
}
