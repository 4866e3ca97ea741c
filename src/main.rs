//! ClipCapsule History Panel
//!
//! Terminal panel over the ClipCapsule clipboard daemon. Shows the current
//! history list and pushes reorders, deletes, and clears back to the daemon.
//!
//! Usage:
//!   clipcapsule-panel [OPTIONS]
//!
//! Examples:
//!   clipcapsule-panel                         # Connect to localhost:3890
//!   clipcapsule-panel --api http://host:3890
//!   clipcapsule-panel --offline               # In-memory store, no daemon

use anyhow::Result;
use clap::Parser;
use clipcapsule_core::{
    backend::{HistoryStore, HttpStore, MemoryStore},
    sync::{BridgeEvent, HistorySync},
    tui::{EventLoop, HistoryPanel, PanelTerminal, TuiEvent},
};
use std::{fs::OpenOptions, sync::Arc, sync::Mutex, time::Instant};
use tokio::sync::mpsc;
use tracing::{debug, error, Level};
use tracing_subscriber::EnvFilter;

/// Panel CLI arguments
#[derive(Parser)]
#[command(name = "clipcapsule-panel")]
#[command(about = "Terminal history panel for the ClipCapsule clipboard manager")]
#[command(version)]
struct Args {
    /// Daemon base URL
    #[arg(long, default_value = "http://localhost:3890")]
    api: String,

    /// Use an in-memory history store instead of the daemon
    #[arg(long)]
    offline: bool,

    /// Input poll / tick interval in milliseconds
    #[arg(long, default_value = "100")]
    tick: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Log file path (the terminal itself is occupied by the panel)
    #[arg(long, default_value = "/tmp/clipcapsule-panel.log")]
    log_file: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging (to file, not the terminal)
    let level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let filter = EnvFilter::new(format!(
        "clipcapsule_core={0},clipcapsule_panel={0}",
        level.as_str().to_lowercase()
    ));
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&args.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    debug!("panel v{} starting", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn HistoryStore> = if args.offline {
        debug!("using in-memory history store");
        Arc::new(MemoryStore::default())
    } else {
        debug!("using daemon at {}", args.api);
        Arc::new(HttpStore::new(args.api.clone()))
    };

    let (tx, rx) = mpsc::unbounded_channel();
    let mut sync = HistorySync::new(store, tx);
    let mut panel = HistoryPanel::new();
    let events = EventLoop::new(args.tick);

    let mut terminal = PanelTerminal::new()?;
    let result = run_panel(&mut terminal, &mut panel, &mut sync, rx, &events);
    drop(terminal); // restore the terminal before reporting anything

    if let Err(err) = result {
        error!("panel error: {err:?}");
        return Err(err);
    }
    debug!("panel exiting cleanly");
    Ok(())
}

fn run_panel(
    terminal: &mut PanelTerminal,
    panel: &mut HistoryPanel,
    sync: &mut HistorySync,
    mut rx: mpsc::UnboundedReceiver<BridgeEvent>,
    events: &EventLoop,
) -> Result<()> {
    // Populate the list before the first frame lands.
    sync.fetch_history();

    let mut tick: usize = 0;
    loop {
        // Apply backend completions delivered since the last iteration.
        while let Ok(event) = rx.try_recv() {
            sync.apply(event, Instant::now());
        }
        sync.on_tick(Instant::now());

        terminal
            .terminal_mut()
            .draw(|frame| panel.render(frame, sync, tick))?;
        tick = tick.wrapping_add(1);

        match events.poll_event()? {
            TuiEvent::Quit => break,
            TuiEvent::Key(key) => {
                if panel.handle_key(key, sync, Instant::now()) {
                    break;
                }
            }
            TuiEvent::Mouse(mouse) => panel.handle_mouse(mouse, sync, Instant::now()),
            TuiEvent::Resize(_, _) | TuiEvent::Tick => {}
        }
    }
    Ok(())
}
