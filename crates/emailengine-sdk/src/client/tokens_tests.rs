//! Tests for access token operations.

use crate::client::{ClientConfig, EmailEngineClient};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> EmailEngineClient {
    EmailEngineClient::builder(ClientConfig::new("test-token").with_base_url(server.uri()))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_list_tokens() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tokens": [{"id": "t1", "scopes": ["*"]}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/tokens/account/user-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tokens": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let tokens = client.tokens();

    assert_eq!(tokens.list().await.unwrap()["tokens"][0]["id"], "t1");
    assert_eq!(
        tokens.list_for_account("user-1").await.unwrap()["tokens"],
        json!([])
    );
}

#[tokio::test]
async fn test_create_and_delete_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/token"))
        .and(body_json(json!({
            "description": "CI token",
            "scopes": ["api"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "abc123"})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/token/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let tokens = client.tokens();

    let created = tokens
        .create(&json!({"description": "CI token", "scopes": ["api"]}))
        .await
        .unwrap();
    let deleted = tokens.delete("abc123").await.unwrap();

    assert_eq!(created["token"], "abc123");
    assert_eq!(deleted["deleted"], true);
}
