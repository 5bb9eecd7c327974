//! Quote sync daemon.
//!
//! Keeps the local quote storage reconciled with a remote endpoint. Internally it
//! wires together three building blocks:
//!
//! - `QuoteStore` — the quote list loaded once from the shared storage file and
//!   kept in memory behind a mutex.
//! - `HttpQuoteReceiver` — fetches `{title, body}` posts and maps them to quotes;
//!   failures read as "nothing to sync".
//! - `SyncScheduler` — a crossbeam `tick` loop that spawns an independent worker
//!   per tick to fetch and merge.
//!
//! Merge notifications travel over a channel to the display loop on the main
//! thread, which keeps them on a `NotificationBoard` and reprints them until they
//! expire after a few seconds.
//!
//! The daemon never re-reads storage after startup. Quotes another process saves in
//! between are overwritten by the next merge.
#![warn(missing_docs)]
mod args;
mod display;
mod receiver;
mod scheduler;

use crate::args::Args;
use crate::display::{render, run_display};
use crate::receiver::HttpQuoteReceiver;
use crate::scheduler::{SyncScheduler, run_tick};
use clap::Parser;
use crossbeam_channel::unbounded;
use log::{info, warn};
use quote_common::notify::{ChannelNotifier, NotificationBoard, Notifier};
use quote_common::storage::{FileStorage, KeyValueStore};
use quote_common::{QuoteError, QuoteStore, Result};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// How often the display loop checks for dismissed notifications.
const DISPLAY_REFRESH: Duration = Duration::from_millis(250);

fn main() -> Result<(), QuoteError> {
    init_logger();
    let args = Args::parse();

    let file_storage = FileStorage::open(&args.storage)?;
    let storage_path = file_storage.path().display().to_string();
    let storage: Arc<dyn KeyValueStore> = Arc::new(file_storage);
    let store = QuoteStore::load(storage);
    info!("Loaded {} quotes from {}", store.len(), storage_path);
    let store = Arc::new(Mutex::new(store));

    let receiver = Arc::new(HttpQuoteReceiver::new(&args.server_url)?);
    let board = NotificationBoard::new();
    let (notes_tx, notes_rx) = unbounded();
    let notifier = Arc::new(ChannelNotifier::new(notes_tx));

    if args.once {
        let report = run_tick(&store, &*receiver, &*notifier)?;
        for note in notes_rx.try_iter() {
            board.notify(note);
        }
        render(&board.visible(), &mut io::stdout().lock())?;
        info!(
            "Sync finished: {} added, {} conflicts",
            report.added, report.conflicts
        );
        return Ok(());
    }

    let (shutdown_tx, shutdown_rx) = unbounded::<()>();
    let (stop_display_tx, stop_display_rx) = unbounded::<()>();
    ctrlc::set_handler(move || {
        info!("Ctrl+C received. Shutting down sync daemon...");
        if shutdown_tx.send(()).is_err() {
            warn!("Scheduler already stopped");
        }
        let _ = stop_display_tx.send(());
    })
    .map_err(|e| QuoteError::Signal(e.to_string()))?;

    info!(
        "Syncing with {} every {:?}. Press Ctrl+C to exit.",
        args.server_url,
        args.interval()
    );
    let handle = SyncScheduler::start(store, receiver, notifier, args.interval(), shutdown_rx);
    run_display(
        &board,
        &notes_rx,
        &stop_display_rx,
        DISPLAY_REFRESH,
        &mut io::stdout().lock(),
    )?;
    if handle.join().is_err() {
        warn!("Scheduler thread panicked");
    }
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
