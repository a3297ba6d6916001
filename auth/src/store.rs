use async_trait::async_trait;
use thiserror::Error;

/// Identity record a token ultimately refers to.
///
/// Snapshot taken at lookup time. The engine reads it and never writes it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub hashed_password: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, Error)]
pub enum CredentialStoreError {
    #[error("Credential store unavailable: {0}")]
    Unavailable(String),
}

/// Lookup capability over the user-record backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve principal by username.
    ///
    /// # Arguments
    /// * `username` - Unique username
    ///
    /// # Returns
    /// Optional principal (None if not found)
    ///
    /// # Errors
    /// * `Unavailable` - Backend could not be queried
    async fn lookup(&self, username: &str) -> Result<Option<Principal>, CredentialStoreError>;
}
