use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;

use crate::errors::AuthError;
use crate::scope::ScopeRequirement;
use crate::store::CredentialStore;
use crate::store::Principal;
use crate::token::Subject;
use crate::token::TokenCodec;

/// How strictly an operation demands credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStrategy {
    /// Missing credentials are rejected with `NotAuthenticated`.
    Required,
    /// Missing credentials let the request through anonymously. Credentials
    /// that are presented are still checked in full.
    Optional,
}

/// Extract the token from an `Authorization` header value.
///
/// The scheme is matched case-insensitively. Any other scheme counts as no
/// credentials at all. A `Bearer` scheme with nothing after it yields an
/// empty token, which then fails to decode.
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    let header = header?.trim();
    let (scheme, token) = header.split_once(' ').unwrap_or((header, ""));

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    Some(token.trim())
}

/// Per-request authorization check over bearer tokens.
pub struct AccessGuard<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
    codec: Arc<TokenCodec>,
}

impl<S> AccessGuard<S>
where
    S: CredentialStore,
{
    pub fn new(store: Arc<S>, codec: Arc<TokenCodec>) -> Self {
        Self { store, codec }
    }

    /// Authorize a request that must carry credentials.
    ///
    /// # Arguments
    /// * `authorization` - Raw `Authorization` header value, if any
    /// * `required` - Scopes the operation demands
    ///
    /// # Returns
    /// The principal the token is bound to
    ///
    /// # Errors
    /// * `NotAuthenticated` - No bearer token presented
    /// * `InvalidToken` - Token malformed, forged, expired, or bound to an unknown principal
    /// * `InsufficientScope` - Token lacks a required scope
    /// * `InactiveAccount` - Principal is disabled
    /// * `Store` - Credential store lookup failed
    pub async fn authorize(
        &self,
        authorization: Option<&str>,
        required: &ScopeRequirement,
    ) -> Result<Principal, AuthError> {
        self.authorize_at(authorization, required, Utc::now()).await
    }

    /// Authorize according to `strategy`.
    ///
    /// Returns `Ok(None)` only for an `Optional` operation called without
    /// credentials.
    pub async fn authenticate(
        &self,
        authorization: Option<&str>,
        required: &ScopeRequirement,
        strategy: AuthStrategy,
    ) -> Result<Option<Principal>, AuthError> {
        if strategy == AuthStrategy::Optional && bearer_token(authorization).is_none() {
            return Ok(None);
        }

        self.authorize(authorization, required).await.map(Some)
    }

    /// Same as [`AccessGuard::authorize`] with an explicit clock reading.
    pub async fn authorize_at(
        &self,
        authorization: Option<&str>,
        required: &ScopeRequirement,
        now: DateTime<Utc>,
    ) -> Result<Principal, AuthError> {
        let token = bearer_token(authorization).ok_or(AuthError::NotAuthenticated)?;

        let claims = self.codec.decode_at(token, now).map_err(|e| {
            tracing::warn!(reason = %e, "Token rejected");
            AuthError::InvalidToken
        })?;

        let subject = claims.subject().ok_or_else(|| {
            tracing::warn!("Token rejected: unrecognized subject");
            AuthError::InvalidToken
        })?;

        let principal = match subject {
            Subject::Username(ref username) => self.store.lookup(username).await?,
        }
        .ok_or_else(|| {
            tracing::warn!("Token rejected: subject does not resolve to a principal");
            AuthError::InvalidToken
        })?;

        if !required.is_satisfied_by(&claims.scopes) {
            tracing::warn!(
                username = %principal.username,
                required = %required.scope_string(),
                "Token lacks required scopes"
            );
            return Err(AuthError::InsufficientScope);
        }

        if !principal.active {
            tracing::warn!(username = %principal.username, "Inactive principal");
            return Err(AuthError::InactiveAccount);
        }

        Ok(principal)
    }
}
