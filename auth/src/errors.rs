use thiserror::Error;

use crate::store::CredentialStoreError;
use crate::token::TokenError;

/// Outcome of a failed login or authorization attempt.
///
/// The first five variants are the caller-visible authentication outcomes.
/// `Store` and `Token` are infrastructure failures.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Could not validate credentials")]
    InvalidToken,

    #[error("Not enough permissions")]
    InsufficientScope,

    #[error("Inactive user")]
    InactiveAccount,

    #[error("Credential store error: {0}")]
    Store(#[from] CredentialStoreError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}
