//! Tests for blocklist operations.

use crate::client::{ClientConfig, EmailEngineClient};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> EmailEngineClient {
    EmailEngineClient::builder(ClientConfig::new("test-token").with_base_url(server.uri()))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_list_and_get_blocklists() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/blocklists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "blocklists": [{"listId": "unsubscribed", "count": 2}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/blocklist/unsubscribed"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "addresses": [{"recipient": "john@example.com"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let blocklists = client.blocklists();

    let lists = blocklists.list().await.unwrap();
    let entries = blocklists
        .get("unsubscribed", &json!({"page": 1}))
        .await
        .unwrap();

    assert_eq!(lists["blocklists"][0]["count"], 2);
    assert_eq!(entries["addresses"][0]["recipient"], "john@example.com");
}

#[tokio::test]
async fn test_add_and_remove_address() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/blocklist/unsubscribed"))
        .and(body_json(json!({"account": "user-1", "recipient": "john@example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "added": true})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/blocklist/unsubscribed"))
        .and(query_param("address", "john@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let blocklists = client.blocklists();

    let added = blocklists
        .add(
            "unsubscribed",
            &json!({"account": "user-1", "recipient": "john@example.com"}),
        )
        .await
        .unwrap();
    let removed = blocklists
        .remove("unsubscribed", "john@example.com")
        .await
        .unwrap();

    assert_eq!(added["added"], true);
    assert_eq!(removed["deleted"], true);
}
