//! End-to-end bridge scenarios against an observable store
//!
//! Exercises the panel's public surface the way the UI loop drives it:
//! spawn an operation, receive its completion over the bridge channel, apply
//! it, and check both the panel's mirror and what actually reached the
//! backend.

use async_trait::async_trait;
use clipcapsule_core::{
    backend::HistoryStore,
    error::{PanelError, Result},
    sync::{BridgeEvent, HistorySync},
    tui::{DragController, DropOutcome},
};
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex,
};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// In-memory store that records every read and write, with switchable write
/// failure.
#[derive(Default)]
struct RecordingStore {
    entries: Mutex<Vec<String>>,
    writes: Mutex<Vec<Vec<String>>>,
    reads: AtomicUsize,
    fail_writes: AtomicBool,
}

impl RecordingStore {
    fn with_entries(entries: &[&str]) -> Self {
        Self {
            entries: Mutex::new(entries.iter().map(|s| s.to_string()).collect()),
            ..Self::default()
        }
    }

    fn writes(&self) -> Vec<Vec<String>> {
        self.writes.lock().unwrap().clone()
    }

    fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HistoryStore for RecordingStore {
    async fn read_all(&self) -> Result<Vec<String>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.entries.lock().unwrap().clone())
    }

    async fn write_all(&self, entries: &[String]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PanelError::Backend("write rejected".to_string()));
        }
        self.writes.lock().unwrap().push(entries.to_vec());
        *self.entries.lock().unwrap() = entries.to_vec();
        Ok(())
    }
}

struct Harness {
    store: Arc<RecordingStore>,
    sync: HistorySync,
    rx: mpsc::UnboundedReceiver<BridgeEvent>,
}

impl Harness {
    fn new(entries: &[&str]) -> Self {
        let store = Arc::new(RecordingStore::with_entries(entries));
        let (tx, rx) = mpsc::unbounded_channel();
        let sync = HistorySync::new(Arc::clone(&store) as Arc<dyn HistoryStore>, tx);
        Self { store, sync, rx }
    }

    /// Receive one bridge completion and apply it at `now`.
    async fn settle(&mut self, now: Instant) {
        let event = self.rx.recv().await.expect("bridge channel closed");
        self.sync.apply(event, now);
    }

    /// Fetch and apply, populating the mirror from the store.
    async fn load(&mut self, now: Instant) {
        self.sync.fetch_history();
        self.settle(now).await;
    }
}

#[tokio::test]
async fn drag_scenario_writes_permuted_list() {
    let mut h = Harness::new(&["a", "b", "c"]);
    let t0 = Instant::now();
    h.load(t0).await;
    assert_eq!(h.sync.entries(), ["a", "b", "c"]);

    // Drag "a" down onto "c", resolved by value at drop time.
    let mut drag = DragController::new();
    drag.on_mouse_down(3, 5, Some("a".to_string()));
    drag.on_mouse_drag(3, 7);
    let outcome = drag.on_mouse_up(Some("c"), h.sync.entries());
    let DropOutcome::Reorder {
        old_index,
        new_index,
    } = outcome
    else {
        panic!("expected a reorder, got {outcome:?}");
    };
    h.sync.reorder(old_index, new_index);
    h.settle(t0).await;

    assert_eq!(h.sync.entries(), ["b", "c", "a"]);
    assert_eq!(h.store.writes(), vec![vec!["b", "c", "a"]]);
}

#[tokio::test]
async fn delete_failure_issues_corrective_read() {
    let mut h = Harness::new(&["x", "y"]);
    let t0 = Instant::now();
    h.load(t0).await;
    let reads_after_load = h.store.reads();

    h.store.fail_writes.store(true, Ordering::SeqCst);
    h.sync.delete_entry("x");
    assert_eq!(h.sync.entries(), ["y"]); // optimistic

    // Failed write triggers a corrective fetch; the settle window from the
    // load has not expired, so release the guard first.
    h.sync.on_tick(t0 + Duration::from_millis(300));
    h.settle(t0).await;
    assert!(h.sync.is_refreshing());
    h.settle(t0).await;

    assert_eq!(h.sync.entries(), ["x", "y"]); // backend truth restored
    assert_eq!(h.store.reads(), reads_after_load + 1);
    assert!(h.store.writes().is_empty());
}

#[tokio::test]
async fn delete_success_writes_filtered_list() {
    let mut h = Harness::new(&["x", "y"]);
    let t0 = Instant::now();
    h.load(t0).await;

    h.sync.delete_entry("x");
    h.settle(t0).await;

    assert_eq!(h.sync.entries(), ["y"]);
    assert_eq!(h.store.writes(), vec![vec!["y"]]);
}

#[tokio::test]
async fn clear_all_round_trip_empties_backend() {
    let mut h = Harness::new(&["a", "b"]);
    let t0 = Instant::now();
    h.load(t0).await;

    h.sync.clear_all(t0);
    assert!(h.sync.confirm_clear_pending());
    assert!(h.store.writes().is_empty()); // first activation never writes

    h.sync.clear_all(t0 + Duration::from_millis(500));
    h.settle(t0 + Duration::from_millis(510)).await;

    assert!(h.sync.entries().is_empty());
    assert_eq!(h.store.writes(), vec![Vec::<String>::new()]);
    assert!(h.store.entries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn clear_confirmation_expires_without_second_activation() {
    let mut h = Harness::new(&["a"]);
    let t0 = Instant::now();
    h.load(t0).await;

    h.sync.clear_all(t0);
    h.sync.on_tick(t0 + Duration::from_secs(3));
    assert!(!h.sync.confirm_clear_pending());

    // Next activation starts the two-phase sequence over.
    h.sync.clear_all(t0 + Duration::from_secs(4));
    assert!(h.sync.confirm_clear_pending());
    assert!(h.store.writes().is_empty());
}

#[tokio::test]
async fn refresh_guard_coalesces_concurrent_requests() {
    let mut h = Harness::new(&["a"]);
    let t0 = Instant::now();

    h.sync.fetch_history();
    h.sync.fetch_history();
    h.sync.fetch_history();
    h.settle(t0).await;

    assert_eq!(h.store.reads(), 1);
    assert_eq!(h.sync.entries(), ["a"]);

    // Guard holds through the cosmetic settle window, then releases.
    h.sync.fetch_history();
    assert_eq!(h.store.reads(), 1);
    h.sync.on_tick(t0 + Duration::from_millis(300));
    h.sync.fetch_history();
    h.settle(t0 + Duration::from_millis(301)).await;
    assert_eq!(h.store.reads(), 2);
}

#[tokio::test]
async fn reorder_failure_leaves_optimistic_order_and_never_reads() {
    let mut h = Harness::new(&["a", "b"]);
    let t0 = Instant::now();
    h.load(t0).await;
    let reads_after_load = h.store.reads();

    h.store.fail_writes.store(true, Ordering::SeqCst);
    h.sync.reorder(0, 1);
    h.settle(t0).await;

    // Accepted drift: screen and backend now disagree, and no corrective
    // fetch is issued for reorder.
    assert_eq!(h.sync.entries(), ["b", "a"]);
    assert_eq!(*h.store.entries.lock().unwrap(), vec!["a", "b"]);
    assert_eq!(h.store.reads(), reads_after_load);
}
