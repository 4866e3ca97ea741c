//! Backend history store
//!
//! The backend owns the authoritative clipboard history; the panel consumes
//! it through two calls: read the current ordered list, or replace it
//! wholesale. Everything else (storage format, clipboard monitoring, paste
//! hotkeys) lives in the daemon and is out of scope here.

use crate::error::{PanelError, Result};
use async_trait::async_trait;
use std::sync::Mutex;
use tracing::debug;

/// Read/Write contract against the backend-held history list.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Fetch the current ordered history list.
    async fn read_all(&self) -> Result<Vec<String>>;

    /// Replace the backend-held history list wholesale.
    async fn write_all(&self, entries: &[String]) -> Result<()>;
}

/// HTTP client against a running ClipCapsule daemon.
///
/// `GET {base}/history` returns a JSON array of strings;
/// `PUT {base}/history` replaces it with the JSON array in the body.
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn history_url(&self) -> String {
        format!("{}/history", self.base_url)
    }
}

#[async_trait]
impl HistoryStore for HttpStore {
    async fn read_all(&self) -> Result<Vec<String>> {
        let response = self.client.get(self.history_url()).send().await?;
        if !response.status().is_success() {
            return Err(PanelError::Backend(format!(
                "history read returned {}",
                response.status()
            )));
        }
        let entries = response.json::<Vec<String>>().await?;
        debug!("fetched {} history entries", entries.len());
        Ok(entries)
    }

    async fn write_all(&self, entries: &[String]) -> Result<()> {
        let response = self
            .client
            .put(self.history_url())
            .json(entries)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(PanelError::Backend(format!(
                "history write returned {}",
                response.status()
            )));
        }
        debug!("wrote {} history entries", entries.len());
        Ok(())
    }
}

/// In-process store for offline mode and tests. Holds the list behind a
/// mutex; not a persistence layer.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn new(entries: Vec<String>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }
}

#[async_trait]
impl HistoryStore for MemoryStore {
    async fn read_all(&self) -> Result<Vec<String>> {
        Ok(self.entries.lock().expect("history lock poisoned").clone())
    }

    async fn write_all(&self, entries: &[String]) -> Result<()> {
        *self.entries.lock().expect("history lock poisoned") = entries.to_vec();
        Ok(())
    }
}
