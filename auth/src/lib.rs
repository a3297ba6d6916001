//! OAuth2 password-grant authentication engine
//!
//! Provides the pieces a service needs to issue and check bearer tokens:
//! - Password hashing (Argon2id)
//! - Signed token encoding and verification (HS256)
//! - Login: credential verification and token issuance
//! - Access guard: token verification and scope enforcement per request
//!
//! User records live behind the [`CredentialStore`] port; each service
//! supplies its own backend.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use std::collections::BTreeSet;
//!
//! use auth::{Claims, Subject, TokenCodec};
//! use chrono::{Duration, Utc};
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::for_subject(
//!     &Subject::username("johndoe"),
//!     BTreeSet::from(["me".to_string()]),
//!     Utc::now(),
//!     Duration::minutes(30),
//! );
//! let token = codec.encode(&claims).unwrap();
//! assert_eq!(codec.decode(&token).unwrap(), claims);
//! ```
//!
//! ## Scope Requirements
//! ```
//! use auth::{parse_scope_param, ScopeRequirement};
//!
//! let requirement = ScopeRequirement::new(["me"]);
//! assert!(requirement.is_satisfied_by(&parse_scope_param("me items")));
//! assert_eq!(requirement.challenge(), "Bearer scope=\"me\"");
//! ```

pub mod authenticator;
pub mod errors;
pub mod guard;
pub mod password;
pub mod scope;
pub mod store;
pub mod token;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use errors::AuthError;
pub use guard::bearer_token;
pub use guard::AccessGuard;
pub use guard::AuthStrategy;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use scope::parse_scope_param;
pub use scope::ScopeRequirement;
pub use store::CredentialStore;
pub use store::CredentialStoreError;
pub use store::Principal;
pub use token::AccessToken;
pub use token::Claims;
pub use token::DecodeError;
pub use token::Subject;
pub use token::TokenCodec;
pub use token::TokenError;
