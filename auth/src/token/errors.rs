use thiserror::Error;

/// Reasons a presented token was rejected by the codec.
///
/// The variants exist for diagnostics and tests. Callers at the HTTP boundary
/// collapse all of them into a single "could not validate credentials" outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Token is structurally invalid")]
    Malformed,

    #[error("Token signature does not match")]
    SignatureInvalid,

    #[error("Token is expired")]
    Expired,
}

/// Error type for token issuance.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}
