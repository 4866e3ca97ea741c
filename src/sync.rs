//! List state and sync bridge
//!
//! Owns the panel's mirror of the backend history list plus its transient UI
//! flags, and pushes each mutation to the backend from a spawned task.
//! Mutations are optimistic: the list updates immediately and the write
//! follows. Failure policy differs per operation:
//!
//! - fetch: failure is logged, the mirror is left untouched
//! - reorder: failure is logged, no rollback (accepted drift)
//! - delete, clear: failure is logged and a corrective fetch pulls
//!   authoritative state
//!
//! Completions come back to the UI loop as [`BridgeEvent`]s on an unbounded
//! channel, drained once per loop iteration. Timers (the clear-confirm window
//! and the cosmetic refresh settle) are deadline fields checked on tick, so a
//! superseding interaction overwrites any stale deadline.

use crate::backend::HistoryStore;
use crate::error::Result;
use crate::history;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Minimum time the refresh spinner stays up after a fetch completes.
pub const REFRESH_SETTLE: Duration = Duration::from_millis(300);

/// Window in which a second clear-all activation performs the clear.
pub const CLEAR_CONFIRM_WINDOW: Duration = Duration::from_millis(3000);

/// Which mutation issued a write. Failure policy is per-operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    Reorder,
    Delete,
    Clear,
}

/// Completion of a spawned backend call, delivered back to the UI loop.
#[derive(Debug)]
pub enum BridgeEvent {
    FetchFinished(Result<Vec<String>>),
    WriteFinished { op: WriteOp, result: Result<()> },
}

/// History list state plus the bridge that keeps the backend in sync.
pub struct HistorySync {
    entries: Vec<String>,
    refreshing: bool,
    refresh_settle_at: Option<Instant>,
    clearing: bool,
    confirm_clear_until: Option<Instant>,
    store: Arc<dyn HistoryStore>,
    tx: mpsc::UnboundedSender<BridgeEvent>,
}

impl HistorySync {
    pub fn new(store: Arc<dyn HistoryStore>, tx: mpsc::UnboundedSender<BridgeEvent>) -> Self {
        Self {
            entries: Vec::new(),
            refreshing: false,
            refresh_settle_at: None,
            clearing: false,
            confirm_clear_until: None,
            store,
            tx,
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn is_clearing(&self) -> bool {
        self.clearing
    }

    /// Whether a first clear-all activation is armed and awaiting its
    /// confirming second activation.
    pub fn confirm_clear_pending(&self) -> bool {
        self.confirm_clear_until.is_some()
    }

    /// Clear-all is unavailable while the list is empty or a clear is in
    /// flight.
    pub fn clear_all_enabled(&self) -> bool {
        !self.entries.is_empty() && !self.clearing
    }

    /// Fetch the authoritative list from the backend. No-op while a refresh
    /// is already in flight (including its cosmetic settle window).
    pub fn fetch_history(&mut self) {
        if self.refreshing {
            debug!("refresh already in flight, skipping");
            return;
        }
        self.refreshing = true;
        self.refresh_settle_at = None;

        let store = Arc::clone(&self.store);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = store.read_all().await;
            let _ = tx.send(BridgeEvent::FetchFinished(result));
        });
    }

    /// Move the entry at `old_index` to `new_index`, optimistically, and push
    /// the permuted list. A failed write is logged and left in place.
    pub fn reorder(&mut self, old_index: usize, new_index: usize) {
        if old_index == new_index || old_index >= self.entries.len() || new_index >= self.entries.len()
        {
            debug!(old_index, new_index, "reorder skipped, indices unusable");
            return;
        }
        self.entries = history::move_entry(std::mem::take(&mut self.entries), old_index, new_index);
        self.spawn_write(WriteOp::Reorder);
    }

    /// Remove every entry equal to `value`, optimistically, and push the
    /// filtered list. Nothing is written when nothing matched.
    pub fn delete_entry(&mut self, value: &str) {
        let before = self.entries.len();
        self.entries = history::remove_matching(std::mem::take(&mut self.entries), value);
        if self.entries.len() == before {
            debug!("delete matched no entries, skipping write");
            return;
        }
        self.spawn_write(WriteOp::Delete);
    }

    /// Two-phase clear. The first activation arms a confirm deadline; a
    /// second activation before it expires performs the clear.
    pub fn clear_all(&mut self, now: Instant) {
        if !self.clear_all_enabled() {
            debug!("clear-all unavailable (empty list or clear in flight)");
            return;
        }

        let confirmed = self.confirm_clear_until.is_some_and(|until| now < until);
        if !confirmed {
            self.confirm_clear_until = Some(now + CLEAR_CONFIRM_WINDOW);
            debug!("clear-all armed, awaiting confirmation");
            return;
        }

        self.confirm_clear_until = None;
        self.clearing = true;

        let store = Arc::clone(&self.store);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = store.write_all(&[]).await;
            let _ = tx.send(BridgeEvent::WriteFinished {
                op: WriteOp::Clear,
                result,
            });
        });
    }

    /// Expire deadline-driven flags. Called once per UI loop iteration.
    pub fn on_tick(&mut self, now: Instant) {
        if self.refresh_settle_at.is_some_and(|at| now >= at) {
            self.refreshing = false;
            self.refresh_settle_at = None;
        }
        if self.confirm_clear_until.is_some_and(|until| now >= until) {
            self.confirm_clear_until = None;
            debug!("clear-all confirmation expired");
        }
    }

    /// Apply a backend completion delivered over the bridge channel.
    pub fn apply(&mut self, event: BridgeEvent, now: Instant) {
        match event {
            BridgeEvent::FetchFinished(result) => {
                match result {
                    Ok(entries) => self.entries = entries,
                    Err(e) => warn!("history fetch failed: {e}"),
                }
                // Keep the spinner up for the settle window to avoid flicker.
                self.refresh_settle_at = Some(now + REFRESH_SETTLE);
            }
            BridgeEvent::WriteFinished { op, result } => match result {
                Ok(()) => {
                    if op == WriteOp::Clear {
                        self.entries.clear();
                        self.clearing = false;
                        self.confirm_clear_until = None;
                    }
                }
                Err(e) => match op {
                    WriteOp::Reorder => {
                        // Known inconsistency window: the optimistic order
                        // stays on screen even though the backend kept the
                        // old one.
                        warn!("reorder write failed: {e}");
                    }
                    WriteOp::Delete => {
                        warn!("delete write failed, refetching: {e}");
                        self.fetch_history();
                    }
                    WriteOp::Clear => {
                        self.clearing = false;
                        warn!("clear write failed, refetching: {e}");
                        self.fetch_history();
                    }
                },
            },
        }
    }

    /// Test-only seeding of the mirror without a backend round trip.
    #[cfg(test)]
    pub(crate) fn seed_entries(&mut self, entries: Vec<String>) {
        self.entries = entries;
    }

    fn spawn_write(&self, op: WriteOp) {
        let store = Arc::clone(&self.store);
        let tx = self.tx.clone();
        let entries = self.entries.clone();
        tokio::spawn(async move {
            let result = store.write_all(&entries).await;
            let _ = tx.send(BridgeEvent::WriteFinished { op, result });
        });
    }
}
