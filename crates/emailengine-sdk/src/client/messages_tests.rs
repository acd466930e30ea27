//! Tests for message operations.

use super::*;
use crate::client::ClientConfig;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> EmailEngineClient {
    EmailEngineClient::builder(ClientConfig::new("test-token").with_base_url(server.uri()))
        .build()
        .unwrap()
}

// ============================================================================
// SubmitOptions Tests
// ============================================================================

#[test]
fn test_submit_options_default_adds_no_headers() {
    let options = SubmitOptions::new().apply(RequestOptions::new());

    assert!(options.headers.is_empty());
}

#[test]
fn test_submit_options_headers() {
    let options = SubmitOptions::new()
        .with_idempotency_key("order-1234")
        .with_timeout(Duration::from_secs(10))
        .apply(RequestOptions::new());

    assert_eq!(
        options.headers,
        vec![
            ("Idempotency-Key".to_string(), "order-1234".to_string()),
            ("X-EE-Timeout".to_string(), "10000".to_string()),
        ]
    );
}

// ============================================================================
// Message Operations Tests
// ============================================================================

#[tokio::test]
async fn test_list_messages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/account/user-1/messages"))
        .and(query_param("path", "INBOX"))
        .and(query_param("pageSize", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1,
            "messages": [{"id": "AAAAAQAAAeE", "subject": "Hello"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let result = client
        .messages()
        .list("user-1", &json!({"path": "INBOX", "pageSize": 10}))
        .await
        .unwrap();

    assert_eq!(result["messages"][0]["subject"], "Hello");
}

#[tokio::test]
async fn test_get_message_and_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/account/user-1/message/AAAAAQAAAeE"))
        .and(query_param("textType", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "AAAAAQAAAeE"})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/account/user-1/text/TEXT1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"plain": "Hi"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let messages = client.messages();

    let message = messages
        .get("user-1", "AAAAAQAAAeE", &json!({"textType": "*"}))
        .await
        .unwrap();
    let text = messages.text("user-1", "TEXT1", &()).await.unwrap();

    assert_eq!(message["id"], "AAAAAQAAAeE");
    assert_eq!(text["plain"], "Hi");
}

#[tokio::test]
async fn test_message_source_is_raw_download() {
    let mock_server = MockServer::start().await;
    let raw = "From: jane@example.com\r\nSubject: Hello\r\n\r\nHi";

    Mock::given(method("GET"))
        .and(path("/v1/account/user-1/message/AAAAAQAAAeE/source"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(raw, "message/rfc822"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let source = client
        .messages()
        .source("user-1", "AAAAAQAAAeE")
        .await
        .unwrap();

    assert_eq!(&source.content[..], raw.as_bytes());
    assert_eq!(source.content_type.as_deref(), Some("message/rfc822"));
}

#[tokio::test]
async fn test_update_and_move_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/account/user-1/message/M1"))
        .and(body_json(json!({"flags": {"add": ["\\Seen"]}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"flags": {"add": true}})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/account/user-1/message/M1/move"))
        .and(body_json(json!({"path": "Archive"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"path": "Archive"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let messages = client.messages();

    messages
        .update("user-1", "M1", &json!({"flags": {"add": ["\\Seen"]}}))
        .await
        .unwrap();
    let moved = messages.move_to("user-1", "M1", "Archive").await.unwrap();

    assert_eq!(moved["path"], "Archive");
}

#[tokio::test]
async fn test_delete_message_sends_force_flag() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/account/user-1/message/M1"))
        .and(query_param("force", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"moved": {"destination": "Trash"}})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/account/user-1/message/M2"))
        .and(query_param("force", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let messages = client.messages();

    let trashed = messages.delete("user-1", "M1", false).await.unwrap();
    let deleted = messages.delete("user-1", "M2", true).await.unwrap();

    assert_eq!(trashed["moved"]["destination"], "Trash");
    assert_eq!(deleted["deleted"], true);
}

#[tokio::test]
async fn test_bulk_operations() {
    let mock_server = MockServer::start().await;

    for route in [
        "/v1/account/user-1/messages",
        "/v1/account/user-1/messages/move",
        "/v1/account/user-1/messages/delete",
    ] {
        Mock::given(method("PUT"))
            .and(path(route))
            .and(body_json(json!({"search": {"unseen": true}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"route": route})))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let client = client_for(&mock_server);
    let messages = client.messages();
    let data = json!({"search": {"unseen": true}});

    assert_eq!(
        messages.bulk_update("user-1", &data).await.unwrap()["route"],
        "/v1/account/user-1/messages"
    );
    assert_eq!(
        messages.bulk_move("user-1", &data).await.unwrap()["route"],
        "/v1/account/user-1/messages/move"
    );
    assert_eq!(
        messages.bulk_delete("user-1", &data).await.unwrap()["route"],
        "/v1/account/user-1/messages/delete"
    );
}

#[tokio::test]
async fn test_search_and_unified_search() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/account/user-1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 2})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/unified/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 5})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let messages = client.messages();
    let query = json!({"search": {"subject": "invoice"}});

    assert_eq!(messages.search("user-1", &query).await.unwrap()["total"], 2);
    assert_eq!(messages.unified_search(&query).await.unwrap()["total"], 5);
}

#[tokio::test]
async fn test_create_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/account/user-1/message"))
        .and(body_json(json!({"path": "Drafts", "subject": "Draft"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "NEW1"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let created = client
        .messages()
        .create("user-1", &json!({"path": "Drafts", "subject": "Draft"}))
        .await
        .unwrap();

    assert_eq!(created["id"], "NEW1");
}

#[tokio::test]
async fn test_submit_sends_delivery_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/account/user-1/submit"))
        .and(header("Idempotency-Key", "order-1234"))
        .and(header("X-EE-Timeout", "5000"))
        .and(body_json(json!({
            "to": [{"address": "john@example.com"}],
            "subject": "Hello"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "queueId": "q-1",
            "messageId": "<abc@example.com>"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let options = SubmitOptions::new()
        .with_idempotency_key("order-1234")
        .with_timeout(Duration::from_secs(5));

    let queued = client
        .messages()
        .submit(
            "user-1",
            &json!({"to": [{"address": "john@example.com"}], "subject": "Hello"}),
            &options,
        )
        .await
        .unwrap();

    assert_eq!(queued["queueId"], "q-1");
}

#[tokio::test]
async fn test_submit_validation_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/account/user-1/submit"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "Input validation failed",
            "code": "InputValidationError",
            "details": {"to": "\"to\" is required"}
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let error = client
        .messages()
        .submit("user-1", &json!({}), &SubmitOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(error, ApiError::Validation(_)));
    assert_eq!(error.details(), Some(&json!({"to": "\"to\" is required"})));
}

#[tokio::test]
async fn test_attachment_download() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/account/user-1/attachment/ATT1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Disposition", "attachment; filename=\"invoice.pdf\"")
                .set_body_raw(b"%PDF".to_vec(), "application/pdf"),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let attachment = client
        .messages()
        .attachment("user-1", "ATT1")
        .await
        .unwrap();

    assert_eq!(&attachment.content[..], b"%PDF");
    assert_eq!(
        attachment.content_disposition.as_deref(),
        Some("attachment; filename=\"invoice.pdf\"")
    );
}
