use thiserror::Error;

/// Error type for JWT operations.
///
/// Verification failures stay distinct so callers can log the cause, even
/// though they all end up as the same unauthenticated response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,
}

impl JwtError {
    /// Short label for logs and telemetry.
    pub fn kind(&self) -> &'static str {
        match self {
            JwtError::EncodingFailed(_) => "encoding_failed",
            JwtError::Malformed(_) => "malformed",
            JwtError::InvalidSignature => "bad_signature",
            JwtError::Expired => "expired",
        }
    }
}
