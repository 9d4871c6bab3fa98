use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("network error: {0}")]
    Network(String),

    #[error("telegram API error ({status}): {body}")]
    Api { status: u16, body: String },
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

/// Minimal Bot API client: just `sendMessage`.
pub struct TelegramClient {
    client: reqwest::Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramClient {
    pub fn new(
        api_base: impl Into<String>,
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::Network(e.to_string()))?;

        Ok(Self {
            client,
            api_base: api_base.into(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        })
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.bot_token
        )
    }

    /// Sends an HTML-formatted message to the configured chat.
    pub async fn send_html(&self, text: &str) -> Result<(), NotifyError> {
        let payload = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
            parse_mode: "HTML",
        };

        let resp = self
            .client
            .post(self.send_message_url())
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Network(e.to_string()))?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(NotifyError::Api {
                status: status.as_u16(),
                body,
            });
        }

        info!("Telegram message delivered to chat {}", self.chat_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::test_server::{self, ACCEPTED_TOKEN, REJECTED_TOKEN};

    #[test]
    fn test_send_message_url() {
        let client = TelegramClient::new(
            "https://api.telegram.org/",
            "123:abc",
            "-100200",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            client.send_message_url(),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn test_payload_shape() {
        let payload = SendMessageRequest {
            chat_id: "42",
            text: "<b>hi</b>",
            parse_mode: "HTML",
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value, serde_json::json!({"chat_id": "42", "text": "<b>hi</b>", "parse_mode": "HTML"}));
    }

    #[tokio::test]
    async fn test_send_html_posts_payload() {
        let (base, inbox) = test_server::telegram_api().await;
        let client = TelegramClient::new(base, ACCEPTED_TOKEN, "-100200", Duration::from_secs(5)).unwrap();

        client.send_html("<b>Giá vàng</b>").await.unwrap();

        let sent = inbox.lock();
        assert_eq!(
            *sent,
            vec![serde_json::json!({"chat_id": "-100200", "text": "<b>Giá vàng</b>", "parse_mode": "HTML"})]
        );
    }

    #[tokio::test]
    async fn test_non_200_is_an_api_error_with_body() {
        let (base, inbox) = test_server::telegram_api().await;
        let client = TelegramClient::new(base, REJECTED_TOKEN, "-100200", Duration::from_secs(5)).unwrap();

        match client.send_html("hi").await {
            Err(NotifyError::Api { status, body }) => {
                assert_eq!(status, 400);
                assert!(body.contains("chat not found"));
            }
            other => panic!("expected API error, got {:?}", other),
        }
        assert!(inbox.lock().is_empty());
    }
}
