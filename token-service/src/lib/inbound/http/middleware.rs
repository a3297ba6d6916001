use std::sync::Arc;

use auth::AccessGuard;
use auth::Principal;
use auth::ScopeRequirement;
use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::outbound::repositories::InMemoryCredentialStore;

/// Extension type to store the authorized principal in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedPrincipal(pub Principal);

/// Guard state for one protected route: the shared guard and the scopes
/// that route demands.
#[derive(Clone)]
pub struct RouteGuard {
    pub guard: Arc<AccessGuard<InMemoryCredentialStore>>,
    pub required: Arc<ScopeRequirement>,
}

impl RouteGuard {
    pub fn new(
        guard: Arc<AccessGuard<InMemoryCredentialStore>>,
        required: ScopeRequirement,
    ) -> Self {
        Self {
            guard,
            required: Arc::new(required),
        }
    }
}

/// Middleware that authorizes the bearer token against the route's scopes
/// and adds the principal to request extensions
pub async fn authorize(
    State(route): State<RouteGuard>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // A header that is not valid visible ASCII is treated as absent
    let authorization = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let principal = route
        .guard
        .authorize(authorization, &route.required)
        .await
        .map_err(|e| ApiError::from_auth(e, &route.required))?;

    req.extensions_mut().insert(AuthenticatedPrincipal(principal));

    Ok(next.run(req).await)
}
