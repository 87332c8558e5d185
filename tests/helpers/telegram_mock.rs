//! Mock Telegram API Server for testing
//!
//! This module provides a mock HTTP server that simulates the Telegram Bot API
//! for testing purposes. It uses wiremock to create configurable mock responses
//! and exposes the JSON bodies the bot sent.
//!
//! teloxide posts to PascalCase method paths (`/bot<token>/SendMessage`), so
//! endpoints here are named the same way.

use serde_json::{json, Value};
use teloxide::Bot;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Token used by every mocked bot
pub const TEST_BOT_TOKEN: &str = "12345:test_token";

/// Mock Telegram API server for testing
pub struct TelegramMockServer {
    pub server: MockServer,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockResponseConfig {
    pub success: bool,
    pub delay_ms: Option<u64>,
}

impl Default for MockResponseConfig {
    fn default() -> Self {
        Self {
            success: true,
            delay_ms: None,
        }
    }
}

fn bot_message() -> Value {
    json!({
        "message_id": 123,
        "from": {
            "id": 12345,
            "is_bot": true,
            "first_name": "TestBot",
            "username": "test_bot"
        },
        "chat": {
            "id": 555666777,
            "first_name": "TestUser",
            "type": "private"
        },
        "date": 1640995200,
        "text": "Test message"
    })
}

impl TelegramMockServer {
    /// Create a new mock Telegram API server
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Bot talking to this server instead of api.telegram.org
    pub fn create_bot(&self) -> Bot {
        Bot::new(TEST_BOT_TOKEN).set_api_url(self.server.uri().parse().expect("mock server url"))
    }

    async fn mock_endpoint(&self, endpoint: &str, result: Value, error: &str, config: &MockResponseConfig) {
        let (status, body) = if config.success {
            (200, json!({ "ok": true, "result": result }))
        } else {
            (400, json!({ "ok": false, "error_code": 400, "description": error }))
        };

        let mut response = ResponseTemplate::new(status).set_body_json(body);
        if let Some(delay) = config.delay_ms {
            response = response.set_delay(std::time::Duration::from_millis(delay));
        }

        Mock::given(method("POST"))
            .and(path(format!("/bot{}/{}", TEST_BOT_TOKEN, endpoint)))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// Setup mock for the SendMessage endpoint
    pub async fn mock_send_message(&self, config: MockResponseConfig) {
        self.mock_endpoint("SendMessage", bot_message(), "Bad Request: message text is empty", &config)
            .await;
    }

    /// Setup mock for the EditMessageReplyMarkup endpoint
    pub async fn mock_edit_message_reply_markup(&self, config: MockResponseConfig) {
        self.mock_endpoint(
            "EditMessageReplyMarkup",
            bot_message(),
            "Bad Request: message is not modified",
            &config,
        )
        .await;
    }

    /// Setup mock for the AnswerCallbackQuery endpoint
    pub async fn mock_answer_callback_query(&self, config: MockResponseConfig) {
        self.mock_endpoint("AnswerCallbackQuery", json!(true), "Bad Request: query is too old", &config)
            .await;
    }

    /// Setup all common mocks with default success responses
    pub async fn setup_default_mocks(&self) {
        let config = MockResponseConfig::default();

        self.mock_send_message(config.clone()).await;
        self.mock_edit_message_reply_markup(config.clone()).await;
        self.mock_answer_callback_query(config).await;
    }

    /// Setup mocks for error scenarios
    pub async fn setup_error_mocks(&self) {
        let config = MockResponseConfig {
            success: false,
            delay_ms: None,
        };

        self.mock_send_message(config.clone()).await;
        self.mock_edit_message_reply_markup(config.clone()).await;
        self.mock_answer_callback_query(config).await;
    }

    /// JSON bodies of the requests made to `endpoint`, in order
    pub async fn requests_to(&self, endpoint: &str) -> Vec<Value> {
        let received_requests = self.server.received_requests().await.unwrap_or_default();
        received_requests
            .iter()
            .filter(|req| req.url.path().ends_with(&format!("/{}", endpoint)))
            .map(|req| serde_json::from_slice(&req.body).unwrap_or(Value::Null))
            .collect()
    }

    /// Verify that a specific endpoint was called
    pub async fn verify_endpoint_called(&self, endpoint: &str, times: usize) {
        let matching_requests = self.requests_to(endpoint).await.len();

        assert_eq!(
            matching_requests, times,
            "Expected {} calls to {}, but got {}",
            times, endpoint, matching_requests
        );
    }

    /// Texts of all SendMessage calls
    pub async fn sent_texts(&self) -> Vec<String> {
        self.requests_to("SendMessage")
            .await
            .iter()
            .filter_map(|body| body["text"].as_str().map(str::to_string))
            .collect()
    }
}
