//! Mock Telegram API Server for testing
//!
//! This module provides a mock HTTP server that simulates the Telegram Bot API
//! endpoints the messenger uses. It uses wiremock to create configurable mock
//! responses. Teloxide spells method names in PascalCase (`SendMessage`), so
//! endpoints are matched without regard to case.

use serde_json::{json, Value};
use teloxide::Bot;
use wiremock::{
    matchers::{method, path_regex},
    Mock, MockServer, ResponseTemplate,
};

use super::test_context::USER_ID;

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

impl TelegramMockServer {
    /// Create a new mock Telegram API server
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Bot pointed at the mock server
    pub fn create_bot(&self) -> Bot {
        let url: url::Url = self.server.uri().parse().expect("mock server url");
        Bot::new(test_bot_token()).set_api_url(url)
    }

    async fn mount(&self, endpoint: &str, config: &MockResponseConfig, result: Value) {
        let (status, body) = if config.success {
            (200, json!({ "ok": true, "result": result }))
        } else {
            (
                400,
                json!({
                    "ok": false,
                    "error_code": 400,
                    "description": "Bad Request: chat not found"
                }),
            )
        };

        let mut response = ResponseTemplate::new(status).set_body_json(body);
        if let Some(delay) = config.delay_ms {
            response = response.set_delay(std::time::Duration::from_millis(delay));
        }

        Mock::given(method("POST"))
            .and(path_regex(format!("(?i)^/bot{}/{}$", test_bot_token(), endpoint)))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// Setup mock for sendMessage endpoint
    pub async fn mock_send_message(&self, config: MockResponseConfig) {
        self.mount("sendMessage", &config, text_message(123, "Test message")).await;
    }

    /// Setup mock for sendPhoto endpoint
    pub async fn mock_send_photo(&self, config: MockResponseConfig) {
        self.mount("sendPhoto", &config, photo_message(124, "img-1")).await;
    }

    /// Setup mock for sendMediaGroup endpoint
    pub async fn mock_send_media_group(&self, config: MockResponseConfig) {
        let result = json!([photo_message(125, "img-1"), photo_message(126, "img-2")]);
        self.mount("sendMediaGroup", &config, result).await;
    }

    /// Setup mock for editMessageReplyMarkup endpoint
    pub async fn mock_edit_message_reply_markup(&self, config: MockResponseConfig) {
        self.mount("editMessageReplyMarkup", &config, text_message(77, "Choose a language")).await;
    }

    /// Setup all common mocks with default success responses
    pub async fn setup_default_mocks(&self) {
        let config = MockResponseConfig::default();

        self.mock_send_message(config.clone()).await;
        self.mock_send_photo(config.clone()).await;
        self.mock_send_media_group(config.clone()).await;
        self.mock_edit_message_reply_markup(config).await;
    }

    /// Setup mocks for error scenarios
    pub async fn setup_error_mocks(&self) {
        let config = MockResponseConfig {
            success: false,
            delay_ms: None,
        };

        self.mock_send_message(config.clone()).await;
        self.mock_send_photo(config.clone()).await;
        self.mock_send_media_group(config.clone()).await;
        self.mock_edit_message_reply_markup(config).await;
    }

    /// Requests received for one Bot API method
    pub async fn requests_to(&self, endpoint: &str) -> Vec<wiremock::Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|req| {
                req.url
                    .path()
                    .rsplit('/')
                    .next()
                    .is_some_and(|method| method.eq_ignore_ascii_case(endpoint))
            })
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
}

fn private_chat() -> Value {
    json!({
        "id": USER_ID,
        "first_name": "Test",
        "type": "private"
    })
}

fn text_message(message_id: i32, text: &str) -> Value {
    json!({
        "message_id": message_id,
        "date": 1640995200,
        "chat": private_chat(),
        "text": text
    })
}

fn photo_message(message_id: i32, file_id: &str) -> Value {
    json!({
        "message_id": message_id,
        "date": 1640995200,
        "chat": private_chat(),
        "photo": [{
            "file_id": file_id,
            "file_unique_id": format!("unique-{}", file_id),
            "width": 90,
            "height": 90,
            "file_size": 1024
        }]
    })
}

/// Helper function to create a test bot token
pub fn test_bot_token() -> String {
    "12345:test_token".to_string()
}
