use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;

pub async fn read_system_status() -> ApiSuccess<StatusData> {
    ApiSuccess::new(StatusCode::OK, StatusData { status: "ok" })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusData {
    pub status: &'static str,
}
