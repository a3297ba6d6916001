use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::errors::AuthError;
use crate::password::PasswordHasher;
use crate::store::CredentialStore;
use crate::token::AccessToken;
use crate::token::Claims;
use crate::token::Subject;
use crate::token::TokenCodec;

/// Well-formed Argon2id digest of no known password. Unknown usernames are
/// verified against it so they cost the same as a wrong password.
const DUMMY_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$buJVvoXJu2WjnVpSyBjwJT+Zw6JDPfrk9RxXYO/Y/Cw";

/// Authentication coordinator combining password verification and token issuance.
///
/// Stateless across calls: the only thing it reads is the credential store.
pub struct Authenticator<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
    password_hasher: PasswordHasher,
    codec: Arc<TokenCodec>,
    ttl: Duration,
}

impl<S> Authenticator<S>
where
    S: CredentialStore,
{
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `store` - Credential lookup backend
    /// * `codec` - Token codec holding the signing key
    /// * `ttl` - Lifetime of every issued token
    pub fn new(store: Arc<S>, codec: Arc<TokenCodec>, ttl: Duration) -> Self {
        Self {
            store,
            password_hasher: PasswordHasher::new(),
            codec,
            ttl,
        }
    }

    /// Verify credentials and issue a bearer token.
    ///
    /// Requested scopes are granted as asked: there is no per-principal
    /// entitlement table to intersect them with.
    ///
    /// # Arguments
    /// * `username` - Username presented by the client
    /// * `password` - Plaintext password presented by the client
    /// * `requested_scopes` - Scopes the client asks the token to carry
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password (indistinguishable)
    /// * `Store` - Credential store lookup failed
    /// * `Token` - Token generation failed
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        requested_scopes: BTreeSet<String>,
    ) -> Result<AccessToken, AuthError> {
        self.login_at(username, password, requested_scopes, Utc::now())
            .await
    }

    /// Same as [`Authenticator::login`] with an explicit issuance instant.
    pub async fn login_at(
        &self,
        username: &str,
        password: &str,
        requested_scopes: BTreeSet<String>,
        now: DateTime<Utc>,
    ) -> Result<AccessToken, AuthError> {
        let principal = self.store.lookup(username).await?;

        let Some(principal) = principal else {
            self.password_hasher.verify(password, DUMMY_PASSWORD_HASH);
            tracing::warn!("Login rejected: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        };

        if !self
            .password_hasher
            .verify(password, &principal.hashed_password)
        {
            tracing::warn!("Login rejected: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        }

        let claims = Claims::for_subject(
            &Subject::username(&principal.username),
            requested_scopes,
            now,
            self.ttl,
        );
        let access_token = self.codec.encode(&claims)?;

        tracing::info!(
            username = %principal.username,
            scopes = claims.scopes.len(),
            expires_at = claims.exp,
            "Access token issued"
        );

        Ok(AccessToken::bearer(access_token))
    }
}
