use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Telegram API rejected the request (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("invalid Telegram API base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
