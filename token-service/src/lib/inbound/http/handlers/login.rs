use auth::parse_scope_param;
use auth::AccessToken;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

const PASSWORD_GRANT_TYPE: &str = "password";

/// OAuth2 password grant token endpoint.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<ApiSuccess<AccessToken>, ApiError> {
    if let Some(grant_type) = form.grant_type.as_deref() {
        if grant_type != PASSWORD_GRANT_TYPE {
            return Err(ApiError::UnprocessableEntity(format!(
                "Unsupported grant_type, expected \"{}\"",
                PASSWORD_GRANT_TYPE
            )));
        }
    }

    let token = state
        .authenticator
        .login(
            &form.username,
            &form.password,
            parse_scope_param(&form.scope),
        )
        .await?;

    Ok(ApiSuccess::new(StatusCode::OK, token))
}

/// Form body of the password grant.
///
/// `client_id` and `client_secret` are accepted for protocol compatibility
/// and otherwise ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginForm {
    grant_type: Option<String>,
    username: String,
    password: String,
    #[serde(default)]
    scope: String,
    #[allow(dead_code)]
    client_id: Option<String>,
    #[allow(dead_code)]
    client_secret: Option<String>,
}
