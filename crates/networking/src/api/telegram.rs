//! Telegram Bot API client used for run notifications

use crate::{ChatApi, HttpClient, HttpRequest};
use hoyo_core::{Error, Result};
use serde::Deserialize;
use tracing::{debug, instrument};

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Reply envelope of every Bot API method
#[derive(Debug, Deserialize)]
struct BotResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends HTML messages through `sendMessage`
#[derive(Clone)]
pub struct TelegramClient {
    http: HttpClient,
    bot_token: String,
    api_base: String,
}

impl TelegramClient {
    pub fn new(http: HttpClient, bot_token: impl Into<String>) -> Self {
        Self {
            http,
            bot_token: bot_token.into(),
            api_base: TELEGRAM_API_BASE.to_string(),
        }
    }

    /// Point at a different Bot API server
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn send_message_request(&self, chat_id: &str, text: &str) -> HttpRequest {
        HttpRequest::get(format!("{}/bot{}/sendMessage", self.api_base, self.bot_token))
            .query("chat_id", chat_id)
            .query("text", text)
            .query("parse_mode", "HTML")
            .query("disable_web_page_preview", "true")
            // keep the token out of logs
            .label("telegram sendMessage")
            // a rejected message comes back as 4xx with `ok: false`
            .accept_client_errors()
    }
}

impl ChatApi for TelegramClient {
    #[instrument(skip(self, text))]
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<()> {
        let request = self.send_message_request(chat_id, text);
        let response: BotResponse = self.http.execute_json(&request).await?;

        if !response.ok {
            let description = response
                .description
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(Error::NotificationError(format!("Telegram API error: {}", description)));
        }

        debug!("Message delivered to chat {}", chat_id);
        Ok(())
    }
}
