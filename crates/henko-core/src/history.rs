//! Append-only send history, persisted as one JSON array.
//!
//! The file is read-modify-written wholesale on every append and capped at
//! the most recent [`DEFAULT_HISTORY_CAP`] events (oldest dropped first).
//! Concurrent writers are not supported; the daily job is the only writer.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::products::ProductRecord;

/// Maximum events kept in the history file.
pub const DEFAULT_HISTORY_CAP: usize = 100;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history file I/O error for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("history file parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One recorded send: the timestamp, a denormalized product summary, and
/// the caption that went out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendEvent {
    pub sent_at: DateTime<Utc>,
    pub product_id: String,
    pub name: String,
    pub link: String,
    pub price: String,
    pub caption: String,
}

impl SendEvent {
    /// Builds an event for `product` stamped with the current time.
    #[must_use]
    pub fn for_product(product: &ProductRecord, caption: String) -> Self {
        Self {
            sent_at: Utc::now(),
            product_id: product.id.clone(),
            name: product.name.clone(),
            link: product.link.clone(),
            price: product.price_offer.clone(),
            caption,
        }
    }
}

/// Capped JSON-file store for [`SendEvent`]s.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    cap: usize,
}

impl HistoryStore {
    #[must_use]
    pub fn new(path: PathBuf, cap: usize) -> Self {
        Self { path, cap }
    }

    /// Appends one event, dropping the oldest entries beyond the cap.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Io`] on read/write failure and
    /// [`HistoryError::Parse`] when the existing file is not a valid event
    /// array — malformed history is surfaced, not silently discarded.
    pub fn append(&self, event: SendEvent) -> Result<(), HistoryError> {
        let mut events = self.load()?;
        events.push(event);
        if events.len() > self.cap {
            let excess = events.len() - self.cap;
            events.drain(..excess);
        }
        let json = serde_json::to_string_pretty(&events)?;
        std::fs::write(&self.path, json).map_err(|e| HistoryError::Io {
            path: self.path.display().to_string(),
            source: e,
        })?;
        tracing::info!(
            path = %self.path.display(),
            total = events.len(),
            "recorded send event"
        );
        Ok(())
    }

    /// Returns up to `n` most recent events, newest first.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`HistoryStore::append`].
    pub fn recent(&self, n: usize) -> Result<Vec<SendEvent>, HistoryError> {
        let mut events = self.load()?;
        events.reverse();
        events.truncate(n);
        Ok(events)
    }

    /// Reads the full event array; a missing file is an empty history.
    fn load(&self) -> Result<Vec<SendEvent>, HistoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| HistoryError::Io {
            path: self.path.display().to_string(),
            source: e,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}
