//! Quote Client — the user surface of the quote generator. It loads the quote list
//! from the storage file shared with the sync daemon and triggers one control per
//! invocation: show a random quote, pick a category, add a quote (posting it to the
//! server), or export/import the list as JSON.
//!
//! Usage example (CLI):
//! ```bash
//! quote_client --storage ./quotes_storage.json add --text "Less is more." --category Design
//! quote_client filter Life
//! quote_client export --out ./quotes.json
//! ```
//!
//! Controls are dispatched through a handler table keyed by control name; see
//! `model::control` and `handlers`.
#![warn(missing_docs)]
mod args;
mod handlers;
mod model;
mod sender;

use crate::args::{Args, Command};
use crate::handlers::default_handlers;
use crate::model::control::{Control, ControlInput};
use crate::sender::{HttpQuoteSender, NoopPublisher, QuotePublisher};
use clap::Parser;
use log::{error, info};
use quote_common::storage::{FileStorage, KeyValueStore};
use quote_common::{QuoteError, QuoteStore, Result};
use std::path::PathBuf;
use std::sync::Arc;

fn main() -> Result<(), QuoteError> {
    init_logger();
    let args = Args::parse();

    let storage_path = normalize_path(&args.storage);
    let storage: Arc<dyn KeyValueStore> = Arc::new(FileStorage::open(&storage_path)?);
    let mut store = QuoteStore::load(storage);
    info!("Loaded {} quotes from {}", store.len(), storage_path.display());

    let (control, input, post) = match args.command {
        Command::Categories => {
            let selected = store.selected_category();
            for option in store.filter_options() {
                let marker = if option == selected { "*" } else { " " };
                println!("{} {} ({})", marker, option, option.value());
            }
            return Ok(());
        }
        Command::NewQuote => (Control::NewQuote, ControlInput::Click, false),
        Command::Filter { category } => (
            Control::CategoryFilter,
            ControlInput::Select(category),
            false,
        ),
        Command::Add {
            text,
            category,
            no_post,
        } => (
            Control::AddQuote,
            ControlInput::Submit { text, category },
            !no_post,
        ),
        Command::Export { out } => (
            Control::ExportQuotes,
            ControlInput::File(normalize_path(&out)),
            false,
        ),
        Command::Import { path } => (
            Control::ImportFile,
            ControlInput::File(normalize_path(&path)),
            false,
        ),
    };

    let publisher: Arc<dyn QuotePublisher> = if post {
        Arc::new(HttpQuoteSender::new(&args.server_url)?)
    } else {
        Arc::new(NoopPublisher)
    };
    let handlers = default_handlers(publisher);

    match handlers.dispatch(control, &mut store, input) {
        Ok(message) => {
            println!("{}", message);
            Ok(())
        }
        Err(e) => {
            error!("{}", e);
            Err(e)
        }
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}
