use serde::Deserialize;
use serde::Serialize;

pub const BEARER_TOKEN_TYPE: &str = "bearer";

/// Issued token as handed back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
}

impl AccessToken {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: BEARER_TOKEN_TYPE.to_string(),
        }
    }
}
