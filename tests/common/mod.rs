//! Shared fixtures: a mock token endpoint and fast retry policies so the
//! poll/retry tests finish in milliseconds.

// not every test binary uses every helper
#![allow(dead_code)]

use std::time::Duration;

use ultradns_client::{Client, ClientConfig, RetryPolicy};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ACCESS_TOKEN: &str = "access-tok-1";

pub fn fast_policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        backoff: Duration::from_millis(2),
    }
}

pub fn fast_config() -> ClientConfig {
    ClientConfig {
        task_poll: fast_policy(5),
        list_retry: fast_policy(5),
        ..ClientConfig::default()
    }
}

pub async fn mount_token_endpoint(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/authorization/token"))
        .and(body_string_contains("grant_type=password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "tokenType": "Bearer",
            "accessToken": ACCESS_TOKEN,
            "refreshToken": "refresh-tok-1",
            "expiresIn": "3600",
            "token_type": "Bearer",
            "access_token": ACCESS_TOKEN,
            "refresh_token": "refresh-tok-1",
            "expires_in": "3600"
        })))
        .mount(server)
        .await;
}

/// Mount the token endpoint on `server` and build an authenticated client
/// with fast poll/retry policies.
pub async fn client_for(server: &MockServer) -> Client {
    mount_token_endpoint(server).await;
    Client::connect_with_config("user", "password", &server.uri(), fast_config())
        .await
        .expect("client construction against mock server")
}
