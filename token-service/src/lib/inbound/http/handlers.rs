use auth::AuthError;
use auth::ScopeRequirement;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use http::header::WWW_AUTHENTICATE;
use serde::Serialize;

pub mod login;
pub mod read_own_items;
pub mod read_system_status;
pub mod read_users_me;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    /// 401 carrying the `WWW-Authenticate` challenge to send back.
    Unauthorized { detail: String, challenge: String },
}

impl ApiError {
    /// Map an engine outcome onto the HTTP boundary.
    ///
    /// `required` is the requirement of the operation being guarded. It is
    /// echoed in the challenge for token failures only.
    pub fn from_auth(err: AuthError, required: &ScopeRequirement) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::InactiveAccount => {
                ApiError::BadRequest(err.to_string())
            }
            AuthError::NotAuthenticated => ApiError::Unauthorized {
                detail: err.to_string(),
                challenge: ScopeRequirement::none().challenge(),
            },
            AuthError::InvalidToken | AuthError::InsufficientScope => ApiError::Unauthorized {
                detail: err.to_string(),
                challenge: required.challenge(),
            },
            AuthError::Store(_) | AuthError::Token(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::from_auth(err, &ScopeRequirement::none())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiErrorBody::new("Internal server error")),
                )
                    .into_response()
            }
            ApiError::UnprocessableEntity(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(ApiErrorBody::new(msg))).into_response()
            }
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ApiErrorBody::new(msg))).into_response()
            }
            ApiError::Unauthorized { detail, challenge } => (
                StatusCode::UNAUTHORIZED,
                [(WWW_AUTHENTICATE, challenge)],
                Json(ApiErrorBody::new(detail)),
            )
                .into_response(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub detail: String,
}

impl ApiErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
