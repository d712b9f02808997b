//! Token-exchange behavior at client construction.

mod common;

use common::fast_config;
use ultradns_client::{Client, ClientError};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_token(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/v1/authorization/token"))
        .and(body_string_contains("grant_type=password"))
        .and(body_string_contains("username=user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_accounts_expecting_token(server: &MockServer, token: &str) {
    Mock::given(method("GET"))
        .and(path("/v1/accounts"))
        .and(header("Authorization", format!("Bearer {token}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "accounts": [],
            "resultInfo": {"totalCount": 0, "offset": 0, "returnedCount": 0}
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn snake_case_only_response_authenticates() {
    let server = MockServer::start().await;
    mount_token(
        &server,
        serde_json::json!({"access_token": "snake-tok", "refresh_token": "snake-ref"}),
    )
    .await;
    mount_accounts_expecting_token(&server, "snake-tok").await;

    let client = Client::connect_with_config("user", "password", &server.uri(), fast_config())
        .await
        .expect("client");
    assert_eq!(client.refresh_token(), "snake-ref");
    client.accounts().select().await.expect("authenticated call");
}

#[tokio::test]
async fn camel_case_only_response_authenticates() {
    let server = MockServer::start().await;
    mount_token(
        &server,
        serde_json::json!({"accessToken": "camel-tok", "refreshToken": "camel-ref"}),
    )
    .await;
    mount_accounts_expecting_token(&server, "camel-tok").await;

    let client = Client::connect_with_config("user", "password", &server.uri(), fast_config())
        .await
        .expect("client");
    assert_eq!(client.refresh_token(), "camel-ref");
    client.accounts().select().await.expect("authenticated call");
}

#[tokio::test]
async fn dual_casing_response_uses_snake_case_value() {
    let server = MockServer::start().await;
    mount_token(
        &server,
        serde_json::json!({
            "accessToken": "camel-tok",
            "access_token": "snake-tok",
            "refreshToken": "camel-ref",
            "refresh_token": "snake-ref"
        }),
    )
    .await;
    mount_accounts_expecting_token(&server, "snake-tok").await;

    let client = Client::connect_with_config("user", "password", &server.uri(), fast_config())
        .await
        .expect("client");
    client.accounts().select().await.expect("authenticated call");
}

#[tokio::test]
async fn missing_access_token_fails_construction() {
    let server = MockServer::start().await;
    mount_token(&server, serde_json::json!({"tokenType": "Bearer"})).await;

    let err = Client::connect_with_config("user", "password", &server.uri(), fast_config())
        .await
        .expect_err("expected auth failure");
    assert!(matches!(err, ClientError::Auth { .. }));
}

#[tokio::test]
async fn rejected_grant_surfaces_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/authorization/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "errorCode": 60001,
            "errorMessage": "invalid_grant:Invalid username & password combination.",
            "error": "invalid_grant",
            "error_description": "60001: invalid_grant"
        })))
        .mount(&server)
        .await;

    let err = Client::connect_with_config("user", "wrong", &server.uri(), fast_config())
        .await
        .expect_err("expected rejected grant");
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.primary().expect("primary").error, "invalid_grant");
}
