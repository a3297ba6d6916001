mod common;

use std::collections::BTreeSet;

use auth::Claims;
use auth::Subject;
use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use common::TEST_SECRET;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use reqwest::StatusCode;
use serde_json::json;

fn forge(payload: serde_json::Value) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &payload,
        &EncodingKey::from_secret(TEST_SECRET),
    )
    .expect("Failed to encode token")
}

fn challenge(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get("www-authenticate")
        .map(|value| value.to_str().unwrap().to_string())
}

#[tokio::test]
async fn test_login() {
    let app = TestApp::spawn().await;

    let response = app.request_token("johndoe", "secret", None).await;

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["access_token"].is_string());
    assert_eq!(body["token_type"], "bearer");
}

#[tokio::test]
async fn test_login_token_carries_requested_scopes() {
    let app = TestApp::spawn().await;

    let token = app.access_token("johndoe", "secret", Some("me items")).await;
    let claims = app.codec.decode(&token).expect("Issued token should decode");

    assert_eq!(claims.subject(), Some(Subject::username("johndoe")));
    assert_eq!(
        claims.scopes,
        BTreeSet::from(["items".to_string(), "me".to_string()])
    );
}

#[tokio::test]
async fn test_login_incorrect_password() {
    let app = TestApp::spawn().await;

    let response = app.request_token("johndoe", "incorrect", None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "detail": "Incorrect username or password" }));
}

#[tokio::test]
async fn test_login_incorrect_username() {
    let app = TestApp::spawn().await;

    let response = app.request_token("foo", "secret", None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "detail": "Incorrect username or password" }));
}

#[tokio::test]
async fn test_login_rejects_other_grant_types() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/token")
        .form(&[
            ("grant_type", "client_credentials"),
            ("username", "johndoe"),
            ("password", "secret"),
        ])
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_login_accepts_explicit_password_grant() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/token")
        .form(&[
            ("grant_type", "password"),
            ("username", "johndoe"),
            ("password", "secret"),
            ("client_id", "ignored"),
        ])
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_no_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/users/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(challenge(&response).as_deref(), Some("Bearer"));

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "detail": "Not authenticated" }));
}

#[tokio::test]
async fn test_token() {
    let app = TestApp::spawn().await;

    let token = app.access_token("johndoe", "secret", Some("me")).await;
    let response = app.get_with_token("/users/me", &token).await;

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body,
        json!({
            "username": "johndoe",
            "full_name": "John Doe",
            "email": "johndoe@example.com",
            "disabled": false
        })
    );
}

#[tokio::test]
async fn test_trailing_slash_route() {
    let app = TestApp::spawn().await;

    let token = app.access_token("johndoe", "secret", Some("me")).await;
    let response = app.get_with_token("/users/me/", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_incorrect_token() {
    let app = TestApp::spawn().await;

    let response = app.get_with_token("/users/me", "nonexistent").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(challenge(&response).as_deref(), Some("Bearer scope=\"me\""));

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "detail": "Could not validate credentials" }));
}

#[tokio::test]
async fn test_incorrect_token_type() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/users/me")
        .header("Authorization", "Notexistent testtoken")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(challenge(&response).as_deref(), Some("Bearer"));

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "detail": "Not authenticated" }));
}

#[tokio::test]
async fn test_token_signed_with_other_key() {
    let app = TestApp::spawn().await;

    let token = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &json!({ "sub": "username:johndoe", "scopes": ["me"], "exp": 9_999_999_999i64, "iat": 0 }),
        &EncodingKey::from_secret(b"some-other-secret-key-at-least-32-bytes"),
    )
    .expect("Failed to encode token");
    let response = app.get_with_token("/users/me", &token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "detail": "Could not validate credentials" }));
}

#[tokio::test]
async fn test_token_no_sub() {
    let app = TestApp::spawn().await;

    let token = forge(json!({ "data": "foo" }));
    let response = app.get_with_token("/users/me", &token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(challenge(&response).as_deref(), Some("Bearer scope=\"me\""));

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "detail": "Could not validate credentials" }));
}

#[tokio::test]
async fn test_token_no_username() {
    let app = TestApp::spawn().await;

    let token = forge(json!({ "sub": "foo", "scopes": ["me"], "exp": 9_999_999_999i64, "iat": 0 }));
    let response = app.get_with_token("/users/me", &token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(challenge(&response).as_deref(), Some("Bearer scope=\"me\""));

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "detail": "Could not validate credentials" }));
}

#[tokio::test]
async fn test_token_expired() {
    let app = TestApp::spawn().await;

    let claims = Claims::for_subject(
        &Subject::username("johndoe"),
        BTreeSet::from(["me".to_string()]),
        Utc::now() - Duration::hours(1),
        Duration::minutes(30),
    );
    let token = app.codec.encode(&claims).expect("Failed to encode token");
    let response = app.get_with_token("/users/me", &token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(challenge(&response).as_deref(), Some("Bearer scope=\"me\""));

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "detail": "Could not validate credentials" }));
}

#[tokio::test]
async fn test_token_no_scope() {
    let app = TestApp::spawn().await;

    let token = app.access_token("johndoe", "secret", None).await;
    let response = app.get_with_token("/users/me", &token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(challenge(&response).as_deref(), Some("Bearer scope=\"me\""));

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "detail": "Not enough permissions" }));
}

#[tokio::test]
async fn test_token_nonexistent_user() {
    let app = TestApp::spawn().await;

    let claims = Claims::for_subject(
        &Subject::username("bob"),
        BTreeSet::from(["me".to_string()]),
        Utc::now(),
        Duration::minutes(30),
    );
    let token = app.codec.encode(&claims).expect("Failed to encode token");
    let response = app.get_with_token("/users/me", &token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(challenge(&response).as_deref(), Some("Bearer scope=\"me\""));

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "detail": "Could not validate credentials" }));
}

#[tokio::test]
async fn test_token_inactive_user() {
    let app = TestApp::spawn().await;

    let token = app.access_token("alice", "secretalice", Some("me")).await;
    let response = app.get_with_token("/users/me", &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(challenge(&response), None);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "detail": "Inactive user" }));
}

#[tokio::test]
async fn test_read_items() {
    let app = TestApp::spawn().await;

    let token = app.access_token("johndoe", "secret", Some("me items")).await;
    let response = app.get_with_token("/users/me/items/", &token).await;

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!([{ "item_id": "Foo", "owner": "johndoe" }]));
}

#[tokio::test]
async fn test_read_items_requires_both_scopes() {
    let app = TestApp::spawn().await;

    let token = app.access_token("johndoe", "secret", Some("me")).await;
    let response = app.get_with_token("/users/me/items", &token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        challenge(&response).as_deref(),
        Some("Bearer scope=\"items me\"")
    );

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "detail": "Not enough permissions" }));
}

#[tokio::test]
async fn test_read_system_status() {
    let app = TestApp::spawn().await;

    let token = app.access_token("johndoe", "secret", None).await;
    let response = app.get_with_token("/status/", &token).await;

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_read_system_status_no_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/status/")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(challenge(&response).as_deref(), Some("Bearer"));

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "detail": "Not authenticated" }));
}

#[tokio::test]
async fn test_read_system_status_bad_token_challenge_has_no_scope() {
    let app = TestApp::spawn().await;

    let response = app.get_with_token("/status", "nonexistent").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(challenge(&response).as_deref(), Some("Bearer"));
}

#[tokio::test]
async fn test_concurrent_logins_yield_independent_tokens() {
    let app = TestApp::spawn().await;

    let (first, second) = tokio::join!(
        app.access_token("johndoe", "secret", Some("me")),
        app.access_token("johndoe", "secret", Some("me")),
    );

    for token in [first, second] {
        let response = app.get_with_token("/users/me", &token).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
