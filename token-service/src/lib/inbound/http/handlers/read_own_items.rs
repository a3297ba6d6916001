use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedPrincipal;

pub async fn read_own_items(
    Extension(AuthenticatedPrincipal(principal)): Extension<AuthenticatedPrincipal>,
) -> ApiSuccess<Vec<ItemData>> {
    ApiSuccess::new(
        StatusCode::OK,
        vec![ItemData {
            item_id: "Foo".to_string(),
            owner: principal.username,
        }],
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemData {
    pub item_id: String,
    pub owner: String,
}
