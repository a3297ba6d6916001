use std::sync::Arc;

use auth::AccessGuard;
use auth::Authenticator;
use auth::PasswordHasher;
use auth::TokenCodec;
use token_service::config::Config;
use token_service::inbound::http::router::create_router;
use token_service::outbound::repositories::InMemoryCredentialStore;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "token_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "token-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_ttl_minutes = config.jwt.expiration_minutes,
        principals = config.principals.len(),
        "Configuration loaded"
    );

    let credential_store = Arc::new(InMemoryCredentialStore::from_seeds(
        &config.principals,
        &PasswordHasher::new(),
    )?);
    tracing::info!(
        principals = credential_store.len(),
        backend = "memory",
        "Credential store ready"
    );

    let codec = Arc::new(TokenCodec::new(config.jwt.secret.as_bytes()));
    let authenticator = Arc::new(Authenticator::new(
        Arc::clone(&credential_store),
        Arc::clone(&codec),
        config.jwt.token_ttl()?,
    ));
    let guard = Arc::new(AccessGuard::new(
        Arc::clone(&credential_store),
        Arc::clone(&codec),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(authenticator, guard);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
