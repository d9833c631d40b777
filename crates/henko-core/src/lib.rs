pub mod config;
pub mod history;
pub mod products;

pub use config::{load_or_init, BotConfig, CatalogConfig, ConfigError};
pub use history::{HistoryError, HistoryStore, SendEvent, DEFAULT_HISTORY_CAP};
pub use products::{Category, ProductRecord};
