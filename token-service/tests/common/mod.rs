#![allow(dead_code)]

use std::sync::Arc;

use auth::AccessGuard;
use auth::Authenticator;
use auth::PasswordHasher;
use auth::TokenCodec;
use axum::Router;
use token_service::config::PrincipalSeed;
use token_service::inbound::http::router::create_router;
use token_service::outbound::repositories::InMemoryCredentialStore;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub codec: TokenCodec,
}

/// The two fixture principals: one active, one disabled.
pub fn seeds() -> Vec<PrincipalSeed> {
    vec![
        PrincipalSeed {
            username: "johndoe".to_string(),
            password: "secret".to_string(),
            full_name: Some("John Doe".to_string()),
            email: Some("johndoe@example.com".to_string()),
            disabled: false,
        },
        PrincipalSeed {
            username: "alice".to_string(),
            password: "secretalice".to_string(),
            full_name: Some("Alice Chains".to_string()),
            email: Some("alice@example.com".to_string()),
            disabled: true,
        },
    ]
}

/// Router wired exactly as the binary wires it, over the fixture principals
pub fn build_router() -> Router {
    let store = Arc::new(
        InMemoryCredentialStore::from_seeds(&seeds(), &PasswordHasher::new())
            .expect("Failed to seed credential store"),
    );
    let codec = Arc::new(TokenCodec::new(TEST_SECRET));

    let authenticator = Arc::new(Authenticator::new(
        Arc::clone(&store),
        Arc::clone(&codec),
        chrono::Duration::minutes(30),
    ));
    let guard = Arc::new(AccessGuard::new(store, codec));

    create_router(authenticator, guard)
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let router = build_router();

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            codec: TokenCodec::new(TEST_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Run the password grant and return the raw response
    pub async fn request_token(
        &self,
        username: &str,
        password: &str,
        scope: Option<&str>,
    ) -> reqwest::Response {
        let mut form = vec![("username", username), ("password", password)];
        if let Some(scope) = scope {
            form.push(("scope", scope));
        }

        self.post("/token")
            .form(&form)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Run the password grant and return the access token
    pub async fn access_token(&self, username: &str, password: &str, scope: Option<&str>) -> String {
        let body: serde_json::Value = self
            .request_token(username, password, scope)
            .await
            .json()
            .await
            .expect("Failed to parse response");

        body["access_token"]
            .as_str()
            .expect("Response has no access_token")
            .to_string()
    }

    /// GET a protected path with the given bearer token
    pub async fn get_with_token(&self, path: &str, token: &str) -> reqwest::Response {
        self.get(path)
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request")
    }
}
