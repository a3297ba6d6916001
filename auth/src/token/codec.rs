use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::DecodeError;
use super::errors::TokenError;

/// Signs claim sets into self-contained tokens and verifies them back.
///
/// Uses HS256 (HMAC with SHA-256). The key is fixed at construction and the
/// codec is only ever read afterwards, so one instance can be shared freely
/// across request handlers.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Create a new codec with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked in `decode_at` with an inclusive boundary and no leeway
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Encode claims into a signed token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a token against the current time.
    pub fn decode(&self, token: &str) -> Result<Claims, DecodeError> {
        self.decode_at(token, Utc::now())
    }

    /// Decode and validate a token against the supplied clock reading.
    ///
    /// The signature is verified before any claim is inspected, expiry
    /// included. A token that does not split into exactly three segments is
    /// rejected as `Malformed` without a signature check.
    ///
    /// # Errors
    /// * `Malformed` - Token does not split, decode or deserialize into `Claims`
    /// * `SignatureInvalid` - Token was signed with another key or altered
    /// * `Expired` - `now` is at or past the token's `exp`
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, DecodeError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| classify(e.kind()))?;

        if claims.is_expired(now.timestamp()) {
            return Err(DecodeError::Expired);
        }

        Ok(claims)
    }
}

fn classify(kind: &ErrorKind) -> DecodeError {
    match kind {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => DecodeError::SignatureInvalid,
        ErrorKind::ExpiredSignature => DecodeError::Expired,
        _ => DecodeError::Malformed,
    }
}
