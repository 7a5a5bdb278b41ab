use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error};

use super::{DeliveryStatus, Notifier};

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Telegram Bot API sender. The token is injected at construction; with no
/// token every delivery is `Skipped` and the network is never touched.
pub struct TelegramNotifier {
    token: Option<String>,
    api_base: String,
    client: Client,
}

impl TelegramNotifier {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token,
            api_base: TELEGRAM_API_BASE.to_string(),
            client: Client::new(),
        }
    }

    /// Override the API origin (tests point this at a local stub).
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
    parse_mode: &'static str,
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn deliver(&self, chat_id: i64, text: &str) -> DeliveryStatus {
        let Some(token) = &self.token else {
            debug!("telegram disabled (no bot token)");
            return DeliveryStatus::Skipped {
                reason: "missing token".to_string(),
            };
        };

        let url = format!("{}/bot{}/sendMessage", self.api_base, token);
        let payload = SendMessage {
            chat_id,
            text,
            parse_mode: "Markdown",
        };

        // Single attempt; the URL carries the token and must not be logged.
        let response = match self.client.post(&url).json(&payload).send().await {
            Ok(r) => r,
            Err(e) => {
                error!(error = %e, "telegram request failed");
                return DeliveryStatus::Error {
                    detail: e.to_string(),
                };
            }
        };

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());
            error!(%status, detail = %detail, "telegram API error");
            return DeliveryStatus::Error { detail };
        }

        DeliveryStatus::Sent
    }
}
