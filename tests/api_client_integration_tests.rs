use std::sync::Arc;

use blue::api::{ApiErrorKind, AssistantBackend, MarketplaceClient};
use blue::core::action::{Action, Effect, update};
use blue::core::attachment::{Attachment, FileAttachment};
use blue::core::message::{MessageKind, Sender};
use blue::core::state::App;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, body_string_contains, header, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn text_file(name: &str, contents: &str) -> Attachment {
    Attachment::File(FileAttachment {
        name: name.to_string(),
        mime_type: "text/plain".to_string(),
        size: contents.len() as u64,
        data: contents.as_bytes().to_vec(),
    })
}

async fn mount_search_status(server: &MockServer, status: u16) {
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// A base URL nothing is listening on.
fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

// ============================================================================
// /search
// ============================================================================

#[tokio::test]
async fn test_search_returns_products() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_string_contains("name=\"message\""))
        .and(body_string_contains("blue mugs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "search_results": [
                {"title": "Blue Mug", "price": 12.5, "link": "https://shop.example/mug"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = MarketplaceClient::new(mock_server.uri());
    let response = client.send_message("blue mugs", &[]).await.unwrap();

    let products = response.search_results.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].title, "Blue Mug");
    assert_eq!(products[0].price, 12.5);
}

#[tokio::test]
async fn test_search_multipart_field_names_follow_list_position() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_string_contains("name=\"file_0\""))
        .and(body_string_contains("filename=\"notes.txt\""))
        .and(body_string_contains("name=\"url_1\""))
        .and(body_string_contains("https://shop.example/item"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "got it"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = MarketplaceClient::new(mock_server.uri());
    let attachments = vec![
        text_file("notes.txt", "hello"),
        Attachment::Url("https://shop.example/item".to_string()),
    ];
    let response = client.send_message("", &attachments).await.unwrap();
    assert_eq!(response.message.as_deref(), Some("got it"));
}

#[tokio::test]
async fn test_search_multipart_content_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_string_contains("text/plain"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = MarketplaceClient::new(mock_server.uri());
    client
        .send_message("see attached", &[text_file("a.txt", "abc")])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_server_errors_map_to_unavailable() {
    for status in [500, 502, 503] {
        let mock_server = MockServer::start().await;
        mount_search_status(&mock_server, status).await;

        let client = MarketplaceClient::new(mock_server.uri());
        let err = client.send_message("hi", &[]).await.unwrap_err();

        assert_eq!(err.kind, ApiErrorKind::ServerUnavailable);
        assert_eq!(err.message, "Service temporarily unavailable");
        assert_eq!(err.status, status);
    }
}

#[tokio::test]
async fn test_rate_limit() {
    let mock_server = MockServer::start().await;
    mount_search_status(&mock_server, 429).await;

    let client = MarketplaceClient::new(mock_server.uri());
    let err = client.send_message("hi", &[]).await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::RateLimited);
    assert_eq!(err.message, "Too many requests. Please try again later.");
    assert_eq!(err.status, 429);
}

#[tokio::test]
async fn test_other_client_errors_are_request_failed() {
    for status in [400, 404, 422] {
        let mock_server = MockServer::start().await;
        mount_search_status(&mock_server, status).await;

        let client = MarketplaceClient::new(mock_server.uri());
        let err = client.send_message("hi", &[]).await.unwrap_err();

        assert_eq!(err.kind, ApiErrorKind::RequestFailed);
        assert_eq!(err.message, "Request failed");
        assert_eq!(err.status, status);
    }
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let client = MarketplaceClient::new(closed_port_url());
    let err = client.send_message("hi", &[]).await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Transport);
    assert_eq!(err.message, "Unable to connect to service");
    assert_eq!(err.status, 0);
}

#[tokio::test]
async fn test_invalid_json_success_body_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = MarketplaceClient::new(mock_server.uri());
    let err = client.send_message("hi", &[]).await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Transport);
    assert_eq!(err.status, 0);
}

// ============================================================================
// /marketing
// ============================================================================

#[tokio::test]
async fn test_marketing_sends_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/marketing"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"message": "write ad copy for mugs"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "marketing_copy": {
                "headlines": ["Sip in Style"],
                "descriptions": ["Handmade mugs for every morning."],
                "call_to_action": "Shop now"
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = MarketplaceClient::new(mock_server.uri());
    let response = client.get_marketing_copy("write ad copy for mugs").await.unwrap();

    let copy = response.marketing_copy.unwrap();
    assert_eq!(copy.headlines, vec!["Sip in Style"]);
    assert_eq!(copy.call_to_action.as_deref(), Some("Shop now"));
    assert!(copy.target_segments.is_none());
}

#[tokio::test]
async fn test_marketing_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/marketing"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = MarketplaceClient::new(mock_server.uri());
    let err = client.get_marketing_copy("campaign ideas").await.unwrap_err();
    assert_eq!(err.message, "Service temporarily unavailable");
}

// ============================================================================
// /health
// ============================================================================

#[tokio::test]
async fn test_health_ok() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&mock_server)
        .await;

    let client = MarketplaceClient::new(mock_server.uri());
    let health = client.check_health().await.unwrap();
    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn test_health_failures_are_service_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = MarketplaceClient::new(mock_server.uri());
    let err = client.check_health().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Unavailable);
    assert_eq!(err.message, "Service unavailable");

    // 200 without a JSON body is no better
    let empty_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&empty_server)
        .await;

    let client = MarketplaceClient::new(empty_server.uri());
    let err = client.check_health().await.unwrap_err();
    assert_eq!(err.message, "Service unavailable");

    let client = MarketplaceClient::new(closed_port_url());
    let err = client.check_health().await.unwrap_err();
    assert_eq!(err.message, "Service unavailable");
}

// ============================================================================
// Controller round trip
// ============================================================================

fn app_for(server: &MockServer) -> App {
    let backend: Arc<dyn AssistantBackend> = Arc::new(MarketplaceClient::new(server.uri()));
    App::new(backend, server.uri())
}

async fn run_cycle(app: &mut App, text: &str) {
    let effect = update(app, Action::Submit(text.to_string()));
    let Effect::SendRequest(request) = effect else {
        panic!("expected a send, got {effect:?}");
    };
    assert!(app.is_loading);

    let result = request.dispatch(app.backend.as_ref()).await;
    assert_eq!(update(app, Action::ResponseReceived(result)), Effect::None);
    assert!(!app.is_loading);
}

#[tokio::test]
async fn test_submit_with_attachments_appends_search_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_string_contains("name=\"file_0\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "search_results": [
                {"title": "Desk Lamp", "price": 39.99, "link": "https://shop.example/lamp"},
                {"title": "Floor Lamp", "price": 89.0, "link": "https://shop.example/floor"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server);
    update(&mut app, Action::AddAttachment(text_file("specs.txt", "warm light")));

    run_cycle(&mut app, "find lamps like this").await;

    // welcome + user + assistant
    assert_eq!(app.transcript.len(), 3);
    let reply = app.transcript.last().unwrap();
    assert_eq!(reply.sender, Sender::Assistant);
    assert_eq!(reply.text, "Here are the products I found:");
    assert!(matches!(&reply.kind, MessageKind::SearchResults(p) if p.len() == 2));
    assert!(app.attachments.is_empty());
    assert!(app.error.is_none());
}

#[tokio::test]
async fn test_marketing_intent_routes_to_marketing_endpoint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/marketing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "marketing_copy": {"headlines": ["Glow Up"], "descriptions": ["Light that lasts."]}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server);
    run_cycle(&mut app, "Write a Marketing blurb for lamps").await;

    let reply = app.transcript.last().unwrap();
    assert_eq!(reply.text, "Here's the marketing copy I generated:");
    assert!(matches!(reply.kind, MessageKind::MarketingCopy(_)));
}

#[tokio::test]
async fn test_failed_send_sets_error_and_apology() {
    let mock_server = MockServer::start().await;
    mount_search_status(&mock_server, 503).await;

    let mut app = app_for(&mock_server);
    update(&mut app, Action::AddAttachment(Attachment::Url("https://a.example".into())));
    run_cycle(&mut app, "anything").await;

    assert_eq!(app.error.as_deref(), Some("Service temporarily unavailable"));
    let reply = app.transcript.last().unwrap();
    assert_eq!(
        reply.text,
        "Sorry, I encountered an error: Service temporarily unavailable"
    );
    // attachments are dropped on failure too
    assert!(app.attachments.is_empty());
}

#[tokio::test]
async fn test_null_price_still_renders_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "search_results": [{"title": "Mug", "price": null, "link": "x"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server);
    run_cycle(&mut app, "find a mug").await;

    assert!(app.error.is_none());
    let reply = app.transcript.last().unwrap();
    assert_eq!(reply.sender, Sender::Assistant);
    match &reply.kind {
        MessageKind::SearchResults(products) => {
            assert_eq!(products[0].title, "Mug");
            assert_eq!(products[0].price, 0.0);
        }
        other => panic!("expected search results, got {other:?}"),
    }
}

#[tokio::test]
async fn test_wrong_typed_marketing_copy_falls_back_to_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/marketing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "ok",
            "marketing_copy": "Buy now!"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server);
    run_cycle(&mut app, "marketing copy for mugs").await;

    assert!(app.error.is_none());
    let reply = app.transcript.last().unwrap();
    assert_eq!(reply.text, "ok");
    assert!(matches!(reply.kind, MessageKind::Text));
}

#[tokio::test]
async fn test_non_object_json_body_gets_fallback_reply() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["unexpected"])))
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server);
    run_cycle(&mut app, "anything").await;

    assert!(app.error.is_none());
    assert_eq!(app.transcript.len(), 3);
    assert_eq!(app.transcript.last().unwrap().sender, Sender::Assistant);
}
