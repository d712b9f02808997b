//! Protocol-level behavior of the transport: headers, URL building, and
//! error-body decoding.

mod common;

use common::{ACCESS_TOKEN, client_for, fast_config, mount_token_endpoint};
use ultradns_client::resources::accounts::AccountKey;
use ultradns_client::resources::zones::ZoneKey;
use ultradns_client::{Client, ClientError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn accounts_body() -> serde_json::Value {
    serde_json::json!({
        "accounts": [{
            "accountName": "teamrocket",
            "accountHolderUserName": "jessie",
            "ownerUserName": "james",
            "numberOfUsers": 2,
            "numberOfGroups": 1,
            "accountType": "ORGANIZATION"
        }],
        "resultInfo": {"totalCount": 1, "offset": 0, "returnedCount": 1}
    })
}

#[tokio::test]
async fn every_request_carries_both_bearer_headers() {
    let server = MockServer::start().await;
    let client = client_for(&server).await;

    // the mock only matches when both headers carry the same bearer token
    Mock::given(method("GET"))
        .and(path("/v1/accounts"))
        .and(header("Authorization", format!("Bearer {ACCESS_TOKEN}")))
        .and(header("Token", format!("Bearer {ACCESS_TOKEN}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(accounts_body()))
        .expect(1)
        .mount(&server)
        .await;

    let accounts = client.accounts().select().await.expect("select accounts");
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].account_name, "teamrocket");
}

#[tokio::test]
async fn record_set_paths_join_base_url_without_doubled_slash() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/zones/example.com./rrsets/A/www"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "zoneName": "example.com.",
            "rrsets": [{"ownerName": "www", "rrtype": "A", "ttl": 300, "rdata": ["198.51.100.1"]}],
            "resultInfo": {"totalCount": 1, "offset": 0, "returnedCount": 1}
        })))
        .expect(2)
        .mount(&server)
        .await;
    mount_token_endpoint(&server).await;

    let zone = ZoneKey::from("example.com.");

    // base URL without a trailing slash
    let client = Client::connect_with_config("u", "p", &server.uri(), fast_config())
        .await
        .expect("client");
    let page = client
        .rrsets()
        .select_page(&zone, "www", "A", 0)
        .await
        .expect("page");
    assert_eq!(page.rrsets[0].rdata, ["198.51.100.1"]);

    // and with one
    let slashed = format!("{}/", server.uri());
    let client = Client::connect_with_config("u", "p", &slashed, fast_config())
        .await
        .expect("client");
    let page = client
        .rrsets()
        .select_page(&zone, "www", "A", 0)
        .await
        .expect("page");
    assert_eq!(page.zone_name, "example.com.");
}

#[tokio::test]
async fn single_object_error_body_decodes() {
    let server = MockServer::start().await;
    let client = client_for(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/accounts/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "errorCode": 70002,
            "errorMessage": "Account not found."
        })))
        .mount(&server)
        .await;

    let err = client
        .accounts()
        .find(&AccountKey::from("missing"))
        .await
        .expect_err("expected 404");
    assert_eq!(err.status(), Some(404));
    let primary = err.primary().expect("primary error entry");
    assert_eq!(primary.error_code, 70002);
    assert_eq!(primary.error_message, "Account not found.");
}

#[tokio::test]
async fn list_error_body_exposes_first_entry_and_keeps_the_rest() {
    let server = MockServer::start().await;
    let client = client_for(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/accounts/bad"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!([
            {"errorCode": 1, "errorMessage": "first problem"},
            {"errorCode": 2, "errorMessage": "second problem"}
        ])))
        .mount(&server)
        .await;

    let err = client
        .accounts()
        .find(&AccountKey::from("bad"))
        .await
        .expect_err("expected 400");
    assert_eq!(err.primary().expect("primary").error_code, 1);
    let ClientError::Api { errors, .. } = err else {
        panic!("expected Api error");
    };
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[1].error_message, "second problem");
}

#[tokio::test]
async fn undecodable_error_body_surfaces_raw_text() {
    let server = MockServer::start().await;
    let client = client_for(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/accounts/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let err = client
        .accounts()
        .find(&AccountKey::from("broken"))
        .await
        .expect_err("expected decode failure");
    assert!(matches!(
        err,
        ClientError::Decode { body, .. } if body == "<html>gateway</html>"
    ));
}
