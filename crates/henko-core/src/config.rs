//! Bot configuration: a JSON document merged over built-in defaults.
//!
//! A missing config file is created with the defaults so a first run leaves
//! an editable template behind. A present file wins field-by-field over the
//! defaults (`#[serde(default)]` per field), so partial documents are fine.
//! Telegram credentials may also come from the environment, which takes
//! precedence over file placeholders.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder written into a fresh config file for the bot token.
pub const TOKEN_PLACEHOLDER: &str = "TU_BOT_TOKEN_AQUI";
/// Placeholder written into a fresh config file for the chat id.
pub const CHAT_ID_PLACEHOLDER: &str = "TU_CHAT_ID_AQUI";

const ENV_TELEGRAM_TOKEN: &str = "HENKO_TELEGRAM_TOKEN";
const ENV_CHAT_ID: &str = "HENKO_CHAT_ID";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file I/O error for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config file parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}

/// Top-level configuration document (`config.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default = "default_telegram_token")]
    pub telegram_token: String,
    #[serde(default = "default_chat_id")]
    pub chat_id: String,
    /// Daily send time as `HH:MM` (24-hour clock).
    #[serde(default = "default_send_time")]
    pub send_time: String,
    /// Independent pick-and-send rounds per daily job.
    #[serde(default = "default_products_per_day")]
    pub products_per_day: u32,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default = "default_history_path")]
    pub history_path: PathBuf,
}

/// Catalog-wide scraping settings. Formerly module globals in the scraper;
/// carried here so every heuristic input is explicit and overridable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path segment that marks a product page, with surrounding slashes.
    #[serde(default = "default_products_path")]
    pub products_path: String,
    /// Brand attributed to records whose anchor carries no vendor label.
    #[serde(default = "default_brand")]
    pub default_brand: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Assumed catalog size for the page-count estimate. Used only when the
    /// page-1 markup exposes no pagination links.
    #[serde(default = "default_catalog_size_estimate")]
    pub catalog_size_estimate: u32,
    /// Assumed products per listing page for the page-count estimate.
    #[serde(default = "default_page_size_estimate")]
    pub page_size_estimate: u32,
    /// Window of leading pages the sampler draws from each cycle.
    #[serde(default = "default_sample_pages")]
    pub sample_pages: u32,
    /// Records drawn from the pooled harvest per cycle.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    /// Static throttle between successive page fetches.
    #[serde(default = "default_inter_request_delay_ms")]
    pub inter_request_delay_ms: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_telegram_token() -> String {
    TOKEN_PLACEHOLDER.to_string()
}

fn default_chat_id() -> String {
    CHAT_ID_PLACEHOLDER.to_string()
}

fn default_send_time() -> String {
    "09:00".to_string()
}

fn default_products_per_day() -> u32 {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_history_path() -> PathBuf {
    PathBuf::from("productos_enviados.json")
}

fn default_base_url() -> String {
    "https://henkolenceria.mitiendanube.com".to_string()
}

fn default_products_path() -> String {
    "/productos/".to_string()
}

fn default_brand() -> String {
    "Henko Lencería".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string()
}

fn default_catalog_size_estimate() -> u32 {
    577
}

fn default_page_size_estimate() -> u32 {
    60
}

fn default_sample_pages() -> u32 {
    5
}

fn default_pool_size() -> u32 {
    5
}

fn default_inter_request_delay_ms() -> u64 {
    1000
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            telegram_token: default_telegram_token(),
            chat_id: default_chat_id(),
            send_time: default_send_time(),
            products_per_day: default_products_per_day(),
            log_level: default_log_level(),
            catalog: CatalogConfig::default(),
            history_path: default_history_path(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            products_path: default_products_path(),
            default_brand: default_brand(),
            user_agent: default_user_agent(),
            catalog_size_estimate: default_catalog_size_estimate(),
            page_size_estimate: default_page_size_estimate(),
            sample_pages: default_sample_pages(),
            pool_size: default_pool_size(),
            inter_request_delay_ms: default_inter_request_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl BotConfig {
    /// Overrides the Telegram credentials from the process environment.
    /// Env values win over whatever the file holds, placeholder or not.
    pub fn apply_env_overrides(&mut self) {
        self.apply_env_overrides_from(|key| std::env::var(key));
    }

    /// Env-override logic decoupled from the real environment so it can be
    /// tested with a plain map lookup.
    fn apply_env_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        if let Ok(token) = lookup(ENV_TELEGRAM_TOKEN) {
            self.telegram_token = token;
        }
        if let Ok(chat_id) = lookup(ENV_CHAT_ID) {
            self.chat_id = chat_id;
        }
    }

    /// Returns `true` when both Telegram credentials are set to something
    /// other than the fresh-file placeholders.
    #[must_use]
    pub fn is_telegram_configured(&self) -> bool {
        !self.telegram_token.is_empty()
            && !self.chat_id.is_empty()
            && !self.telegram_token.starts_with("TU_BOT_TOKEN")
            && !self.chat_id.starts_with("TU_CHAT_ID")
    }

    /// Parses `send_time` into `(hour, minute)`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] unless the value is `HH:MM` on a
    /// 24-hour clock.
    pub fn send_time_hm(&self) -> Result<(u32, u32), ConfigError> {
        let invalid = || {
            ConfigError::Validation(format!(
                "send_time '{}' is not a valid HH:MM time",
                self.send_time
            ))
        };
        let (hour, minute) = self.send_time.split_once(':').ok_or_else(invalid)?;
        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;
        if hour > 23 || minute > 59 {
            return Err(invalid());
        }
        Ok((hour, minute))
    }

    /// Validates the whole document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] on a malformed send time, a zero
    /// `products_per_day`, or a zero sampler window/pool.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.send_time_hm()?;
        if self.products_per_day == 0 {
            return Err(ConfigError::Validation(
                "products_per_day must be at least 1".to_string(),
            ));
        }
        if self.catalog.sample_pages == 0 || self.catalog.pool_size == 0 {
            return Err(ConfigError::Validation(
                "catalog.sample_pages and catalog.pool_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Loads the configuration from `path`, creating the file with defaults
/// when it does not exist.
///
/// An existing file is merged over the defaults field-by-field (file values
/// win; absent fields keep their defaults) and then validated.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] on read/write failure, [`ConfigError::Parse`]
/// on malformed JSON, and [`ConfigError::Validation`] on invalid values.
pub fn load_or_init(path: &Path) -> Result<BotConfig, ConfigError> {
    if path.exists() {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: BotConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    } else {
        let config = BotConfig::default();
        let json = serde_json::to_string_pretty(&config)?;
        std::fs::write(path, json).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        tracing::info!(path = %path.display(), "created default configuration file");
        Ok(config)
    }
}
