use std::collections::HashMap;

use async_trait::async_trait;
use auth::CredentialStore;
use auth::CredentialStoreError;
use auth::PasswordError;
use auth::PasswordHasher;
use auth::Principal;

use crate::config::PrincipalSeed;

/// Credential store held entirely in memory.
///
/// Populated once at startup and read-only afterwards, so lookups need no
/// locking.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    principals: HashMap<String, Principal>,
}

impl InMemoryCredentialStore {
    pub fn new(principals: impl IntoIterator<Item = Principal>) -> Self {
        Self {
            principals: principals
                .into_iter()
                .map(|principal| (principal.username.clone(), principal))
                .collect(),
        }
    }

    /// Build the store from configured seeds, hashing each password.
    ///
    /// # Errors
    /// * `HashingFailed` - A seed password could not be hashed
    pub fn from_seeds(
        seeds: &[PrincipalSeed],
        hasher: &PasswordHasher,
    ) -> Result<Self, PasswordError> {
        let principals = seeds
            .iter()
            .map(|seed| {
                Ok(Principal {
                    username: seed.username.clone(),
                    hashed_password: hasher.hash(&seed.password)?,
                    display_name: seed.full_name.clone(),
                    email: seed.email.clone(),
                    active: !seed.disabled,
                })
            })
            .collect::<Result<Vec<_>, PasswordError>>()?;

        Ok(Self::new(principals))
    }

    pub fn len(&self) -> usize {
        self.principals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.principals.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn lookup(&self, username: &str) -> Result<Option<Principal>, CredentialStoreError> {
        Ok(self.principals.get(username).cloned())
    }
}
