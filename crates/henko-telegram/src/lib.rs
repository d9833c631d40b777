//! Minimal Telegram Bot API client for the notification sink.
//!
//! Two operations: a text send with three-tier parse-mode degradation
//! (Markdown → HTML → plain) and a photo send that falls back to a plain
//! text send. Messages beyond the API's practical length cap are truncated
//! with an ellipsis before sending.

mod error;

use std::borrow::Cow;
use std::time::Duration;

use reqwest::Client;

pub use error::TelegramError;

const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Practical message/caption length cap; Telegram rejects longer texts.
pub const MAX_MESSAGE_CHARS: usize = 4000;

/// Parse modes tried in order for a text send. `None` is the plain-text
/// final attempt.
const PARSE_MODE_LADDER: [Option<&str>; 3] = [Some("Markdown"), Some("HTML"), None];

/// Client for one bot token and one destination chat.
///
/// Use [`TelegramClient::new`] for the real API or
/// [`TelegramClient::with_base_url`] to point at a mock server in tests.
pub struct TelegramClient {
    client: Client,
    base_url: String,
    token: String,
    chat_id: String,
}

impl TelegramClient {
    /// Creates a client pointed at the production Bot API.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(token: &str, chat_id: &str, timeout_secs: u64) -> Result<Self, TelegramError> {
        Self::with_base_url(token, chat_id, timeout_secs, DEFAULT_API_BASE)
    }

    /// Creates a client with a custom API base URL (for wiremock tests).
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`TelegramError::InvalidBaseUrl`] for an
    /// unparseable base URL.
    pub fn with_base_url(
        token: &str,
        chat_id: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, TelegramError> {
        reqwest::Url::parse(base_url).map_err(|e| TelegramError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            token: token.to_owned(),
            chat_id: chat_id.to_owned(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.base_url, self.token)
    }

    /// Sends a text message, degrading the parse mode on rejection:
    /// Markdown first, HTML second, plain text last (three attempts total).
    ///
    /// # Errors
    ///
    /// - [`TelegramError::Http`] on a transport failure (not retried — the
    ///   ladder only covers formatting rejections).
    /// - [`TelegramError::Api`] when all three attempts are rejected.
    pub async fn send_message(&self, text: &str) -> Result<(), TelegramError> {
        let text = truncate_message(text);
        let url = self.method_url("sendMessage");

        let mut last_rejection: Option<(u16, String)> = None;
        for mode in PARSE_MODE_LADDER {
            let mut form: Vec<(&str, &str)> =
                vec![("chat_id", self.chat_id.as_str()), ("text", &text)];
            if let Some(mode) = mode {
                form.push(("parse_mode", mode));
            }

            let response = self.client.post(&url).form(&form).send().await?;
            let status = response.status();
            if status.is_success() {
                tracing::info!("telegram message delivered");
                return Ok(());
            }

            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = status.as_u16(),
                parse_mode = mode.unwrap_or("none"),
                "telegram rejected message; degrading format"
            );
            last_rejection = Some((status.as_u16(), body));
        }

        let (status, body) = last_rejection.unwrap_or((0, String::new()));
        Err(TelegramError::Api { status, body })
    }

    /// Sends a photo with a Markdown caption; any failure (transport or
    /// rejection) falls back to a text-only send of the same caption.
    ///
    /// # Errors
    ///
    /// Only the fallback's failure modes surface; see
    /// [`TelegramClient::send_message`].
    pub async fn send_photo(&self, photo_url: &str, caption: &str) -> Result<(), TelegramError> {
        let caption = truncate_message(caption);
        let url = self.method_url("sendPhoto");
        let form: [(&str, &str); 4] = [
            ("chat_id", self.chat_id.as_str()),
            ("photo", photo_url),
            ("caption", &caption),
            ("parse_mode", "Markdown"),
        ];

        match self.client.post(&url).form(&form).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::info!("telegram photo delivered");
                Ok(())
            }
            Ok(response) => {
                tracing::warn!(
                    status = response.status().as_u16(),
                    "telegram rejected photo; falling back to text"
                );
                self.send_message(&caption).await
            }
            Err(e) => {
                tracing::warn!(error = %e, "telegram photo send failed; falling back to text");
                self.send_message(&caption).await
            }
        }
    }
}

/// Truncates to [`MAX_MESSAGE_CHARS`] characters with a trailing ellipsis;
/// shorter texts are passed through unchanged.
fn truncate_message(text: &str) -> Cow<'_, str> {
    if text.chars().count() <= MAX_MESSAGE_CHARS {
        return Cow::Borrowed(text);
    }
    let truncated: String = text.chars().take(MAX_MESSAGE_CHARS).collect();
    Cow::Owned(format!("{truncated}..."))
}

#[cfg(test)]
#[path = "telegram_test.rs"]
mod tests;
