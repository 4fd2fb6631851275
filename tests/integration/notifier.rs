//! Telegram delivery against a mocked Bot API

use crate::test_utils::{mock_telegram_ok, telegram_config, BOT_TOKEN};
use lunarwatch::error::NotifyError;
use lunarwatch::services::notifier::{LogNotifier, Notifier, TelegramNotifier};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn telegram_posts_chat_id_and_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/sendMessage", BOT_TOKEN)))
        .and(body_json(json!({ "chat_id": "4242", "text": "hello" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::new(&telegram_config(&server));
    notifier.send("4242", "hello").await.unwrap();
}

#[tokio::test]
async fn telegram_rejection_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": false,
            "description": "Bad Request: chat not found"
        })))
        .mount(&server)
        .await;

    let err = TelegramNotifier::new(&telegram_config(&server))
        .send("0", "hello")
        .await
        .unwrap_err();
    match err {
        NotifyError::Rejected(description) => assert!(description.contains("chat not found")),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn telegram_http_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let err = TelegramNotifier::new(&telegram_config(&server))
        .send("4242", "hello")
        .await
        .unwrap_err();
    assert!(matches!(err, NotifyError::Status { status: 401, .. }));
}

#[tokio::test]
async fn telegram_trailing_slash_in_base_url() {
    let server = MockServer::start().await;
    mock_telegram_ok(&server).await;

    let mut config = telegram_config(&server);
    config.base_url.push('/');
    TelegramNotifier::new(&config).send("4242", "hi").await.unwrap();
}

#[tokio::test]
async fn log_notifier_always_succeeds() {
    assert!(LogNotifier.send("log", "message").await.is_ok());
}
