use std::collections::BTreeSet;
use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Namespace tag for subjects that identify a principal by username.
const USERNAME_KIND: &str = "username";

/// Identity a token refers to, in namespaced `kind:identifier` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Subject {
    Username(String),
}

impl Subject {
    pub fn username(username: impl Into<String>) -> Self {
        Self::Username(username.into())
    }

    /// Parse a `sub` claim.
    ///
    /// Returns `None` for anything without a recognized namespace or with an
    /// empty identifier.
    pub fn parse(raw: &str) -> Option<Self> {
        let (kind, identifier) = raw.split_once(':')?;

        if identifier.is_empty() {
            return None;
        }

        match kind {
            USERNAME_KIND => Some(Self::Username(identifier.to_string())),
            _ => None,
        }
    }

    pub fn identifier(&self) -> &str {
        match self {
            Self::Username(username) => username,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Username(username) => write!(f, "{}:{}", USERNAME_KIND, username),
        }
    }
}

/// Claim set carried inside a signed access token.
///
/// Every field is required. A payload missing one of them, or carrying one
/// with the wrong type, does not decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (namespaced principal identifier)
    pub sub: String,

    /// Granted scopes, kept sorted so the encoding is canonical
    pub scopes: BTreeSet<String>,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Create claims for a freshly authenticated subject.
    ///
    /// # Arguments
    /// * `subject` - Principal the token is bound to
    /// * `scopes` - Scopes granted to the token
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Lifetime of the token
    ///
    /// An expiry past the representable range saturates at the latest
    /// representable instant.
    pub fn for_subject(
        subject: &Subject,
        scopes: BTreeSet<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            sub: subject.to_string(),
            scopes,
            exp: issued_at
                .checked_add_signed(ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC)
                .timestamp(),
            iat: issued_at.timestamp(),
        }
    }

    pub fn subject(&self) -> Option<Subject> {
        Subject::parse(&self.sub)
    }

    /// Expiry is inclusive: a token is already dead at `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
