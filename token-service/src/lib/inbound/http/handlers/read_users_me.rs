use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedPrincipal;

pub async fn read_users_me(
    Extension(AuthenticatedPrincipal(principal)): Extension<AuthenticatedPrincipal>,
) -> ApiSuccess<UserData> {
    ApiSuccess::new(StatusCode::OK, (&principal).into())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub disabled: bool,
}

impl From<&auth::Principal> for UserData {
    fn from(principal: &auth::Principal) -> Self {
        Self {
            username: principal.username.clone(),
            full_name: principal.display_name.clone(),
            email: principal.email.clone(),
            disabled: !principal.active,
        }
    }
}
