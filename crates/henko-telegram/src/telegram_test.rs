use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

async fn test_client(server: &MockServer) -> TelegramClient {
    TelegramClient::with_base_url("123:abc", "987654", 5, &server.uri()).unwrap()
}

#[tokio::test]
async fn send_message_succeeds_on_first_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .and(body_string_contains("parse_mode=Markdown"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"ok\":true}"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    client.send_message("hola").await.unwrap();
}

#[tokio::test]
async fn send_message_degrades_markdown_to_html_to_plain() {
    let server = MockServer::start().await;
    // Markdown and HTML attempts are rejected; the plain attempt succeeds.
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .and(body_string_contains("parse_mode=Markdown"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad markdown"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .and(body_string_contains("parse_mode=HTML"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad html"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"ok\":true}"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    client.send_message("hola *mundo*").await.unwrap();
}

#[tokio::test]
async fn send_message_errors_after_three_rejections() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .respond_with(ResponseTemplate::new(400).set_body_string("nope"))
        .expect(3)
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let err = client.send_message("hola").await.unwrap_err();
    assert!(
        matches!(err, TelegramError::Api { status: 400, .. }),
        "expected Api error, got: {err:?}"
    );
}

#[tokio::test]
async fn send_photo_falls_back_to_text_on_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendPhoto"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad photo"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"ok\":true}"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    client
        .send_photo("https://cdn.example/foto.jpg", "caption")
        .await
        .unwrap();
}

#[tokio::test]
async fn send_photo_delivers_without_fallback_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendPhoto"))
        .and(body_string_contains("photo=https"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"ok\":true}"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    client
        .send_photo("https://cdn.example/foto.jpg", "caption")
        .await
        .unwrap();
}

#[test]
fn truncate_passes_short_text_through() {
    let text = "corto";
    assert_eq!(truncate_message(text), "corto");
}

#[test]
fn truncate_caps_long_text_with_ellipsis() {
    let text = "a".repeat(MAX_MESSAGE_CHARS + 500);
    let truncated = truncate_message(&text);
    assert_eq!(truncated.chars().count(), MAX_MESSAGE_CHARS + 3);
    assert!(truncated.ends_with("..."));
}

#[test]
fn truncate_is_char_boundary_safe() {
    // Multi-byte chars at the cut point must not split.
    let text = "ñ".repeat(MAX_MESSAGE_CHARS + 10);
    let truncated = truncate_message(&text);
    assert!(truncated.starts_with('ñ'));
    assert!(truncated.ends_with("..."));
}
