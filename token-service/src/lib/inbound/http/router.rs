use std::sync::Arc;
use std::time::Duration;

use auth::AccessGuard;
use auth::Authenticator;
use auth::ScopeRequirement;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::MethodRouter;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::login::login;
use super::handlers::read_own_items::read_own_items;
use super::handlers::read_system_status::read_system_status;
use super::handlers::read_users_me::read_users_me;
use super::middleware::authorize;
use super::middleware::RouteGuard;
use crate::outbound::repositories::InMemoryCredentialStore;

#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<Authenticator<InMemoryCredentialStore>>,
    pub guard: Arc<AccessGuard<InMemoryCredentialStore>>,
}

pub fn create_router(
    authenticator: Arc<Authenticator<InMemoryCredentialStore>>,
    guard: Arc<AccessGuard<InMemoryCredentialStore>>,
) -> Router {
    let state = AppState {
        authenticator,
        guard,
    };

    let public_routes = Router::new().route("/token", post(login));

    let users_me = protected(get(read_users_me), &state, ScopeRequirement::new(["me"]));
    let own_items = protected(
        get(read_own_items),
        &state,
        ScopeRequirement::new(["items", "me"]),
    );
    let system_status = protected(get(read_system_status), &state, ScopeRequirement::none());

    let protected_routes = Router::new()
        .route("/users/me", users_me.clone())
        .route("/users/me/", users_me)
        .route("/users/me/items", own_items.clone())
        .route("/users/me/items/", own_items)
        .route("/status", system_status.clone())
        .route("/status/", system_status);

    // The span deliberately omits request headers: they carry bearer tokens
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn protected(
    route: MethodRouter<AppState>,
    state: &AppState,
    required: ScopeRequirement,
) -> MethodRouter<AppState> {
    route.route_layer(middleware::from_fn_with_state(
        RouteGuard::new(Arc::clone(&state.guard), required),
        authorize,
    ))
}
