//! The authoritative quote list and its persistence.
//!
//! `QuoteStore` owns the in-memory list and mirrors it into a [`KeyValueStore`] as a
//! JSON array under [`QUOTES_KEY`]. It exposes every mutation the controls and the
//! sync daemon need:
//!
//! - `load` / `save` — read the persisted list (falling back to the defaults) and
//!   overwrite it.
//! - `add` / `import_json` — user-driven additions.
//! - `merge` — last-write-wins reconciliation with a remote list, keyed on exact text.
//!
//! The store never re-reads storage after `load`. Two stores opened on the same
//! storage do not see each other's changes, and whichever saves last wins.
use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::{debug, info, warn};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde_json::Value;

use crate::category::{self, CategoryFilter};
use crate::error::{INVALID_FILE_FORMAT, MISSING_FIELDS, UNREADABLE_FILE};
use crate::net::{QUOTES_KEY, SELECTED_CATEGORY_KEY};
use crate::notify::{Notification, Notifier};
use crate::quote::{Quote, default_quotes};
use crate::storage::KeyValueStore;
use crate::{QuoteError, Result};

/// Counts produced by a single [`QuoteStore::merge`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Remote quotes appended because no local text matched.
    pub added: usize,
    /// Local quotes overwritten by a remote quote with the same text.
    pub conflicts: usize,
}

/// In-memory quote list backed by key-value storage.
pub struct QuoteStore {
    quotes: Vec<Quote>,
    storage: Arc<dyn KeyValueStore>,
}

impl QuoteStore {
    /// Loads the persisted list, substituting the defaults when storage holds
    /// nothing readable. Never fails.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let quotes = match storage.get_item(QUOTES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Quote>>(&raw) {
                Ok(quotes) => quotes,
                Err(e) => {
                    warn!("Stored quotes are unreadable, using defaults: {}", e);
                    default_quotes()
                }
            },
            Ok(None) => default_quotes(),
            Err(e) => {
                warn!("Failed to read quote storage, using defaults: {}", e);
                default_quotes()
            }
        };
        debug!("Loaded {} quotes", quotes.len());
        Self { quotes, storage }
    }

    /// Writes the whole list to storage, replacing previous contents.
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string(&self.quotes)?;
        self.storage.set_item(QUOTES_KEY, &json)
    }

    /// Current list, in insertion order.
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Number of quotes in the list.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Returns `true` when the list holds no quotes.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Appends a user-entered quote and persists the list.
    ///
    /// Both fields must be non-empty; otherwise nothing changes. The list is also
    /// left untouched when persisting fails.
    pub fn add(&mut self, quote: Quote) -> Result<()> {
        if quote.is_incomplete() {
            return Err(QuoteError::Validation(MISSING_FIELDS.to_string()));
        }
        self.quotes.push(quote);
        if let Err(e) = self.save() {
            self.quotes.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Reconciles the list with `incoming` quotes from the remote source.
    ///
    /// A quote whose text matches an existing one exactly replaces it in place;
    /// any other quote is appended. One notification is emitted per incoming quote,
    /// then the list is persisted once. An empty `incoming` touches nothing.
    pub fn merge(&mut self, incoming: Vec<Quote>, notifier: &dyn Notifier) -> Result<MergeReport> {
        let mut report = MergeReport::default();
        if incoming.is_empty() {
            return Ok(report);
        }

        for remote in incoming {
            match self.quotes.iter().position(|q| q.text == remote.text) {
                Some(index) => {
                    notifier.notify(Notification::conflict(&remote.text));
                    self.quotes[index] = remote;
                    report.conflicts += 1;
                }
                None => {
                    notifier.notify(Notification::added(&remote.text));
                    self.quotes.push(remote);
                    report.added += 1;
                }
            }
        }

        self.save()?;
        info!(
            "Merged remote quotes: {} added, {} conflicts, {} total",
            report.added,
            report.conflicts,
            self.quotes.len()
        );
        Ok(report)
    }

    /// Appends every entry of a JSON array and persists the list.
    ///
    /// Entries are not validated: string `text`/`category` fields are kept, anything
    /// else (missing, `null`, numbers, non-object entries) becomes an empty string.
    /// Returns the number of appended quotes.
    pub fn import_json(&mut self, json: &str) -> Result<usize> {
        let value: Value = serde_json::from_str(json)
            .map_err(|_| QuoteError::Format(UNREADABLE_FILE.to_string()))?;
        let Value::Array(entries) = value else {
            return Err(QuoteError::Format(INVALID_FILE_FORMAT.to_string()));
        };

        let count = entries.len();
        let previous_len = self.quotes.len();
        self.quotes.extend(entries.iter().map(imported_quote));
        if let Err(e) = self.save() {
            self.quotes.truncate(previous_len);
            return Err(e);
        }
        info!("Imported {} quotes", count);
        Ok(count)
    }

    /// Reads `path` and imports it with [`QuoteStore::import_json`].
    pub fn import_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let content = fs::read_to_string(path)?;
        self.import_json(&content)
    }

    /// Pretty-printed JSON array of the current list.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.quotes)?)
    }

    /// Writes [`QuoteStore::export_json`] to `path`.
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.export_json()?)?;
        Ok(())
    }

    /// Picks a random quote passing `filter`.
    pub fn random_quote(&self, filter: &CategoryFilter) -> Option<&Quote> {
        self.random_quote_with(filter, &mut rand::rng())
    }

    /// Same as [`QuoteStore::random_quote`] with a caller-provided generator.
    pub fn random_quote_with<R: Rng + ?Sized>(
        &self,
        filter: &CategoryFilter,
        rng: &mut R,
    ) -> Option<&Quote> {
        let candidates: Vec<&Quote> = self.quotes.iter().filter(|q| filter.matches(q)).collect();
        candidates.choose(rng).copied()
    }

    /// Options for the category filter control.
    pub fn filter_options(&self) -> Vec<CategoryFilter> {
        category::filter_options(&self.quotes)
    }

    /// Last persisted filter choice; `All` when unset or unreadable.
    pub fn selected_category(&self) -> CategoryFilter {
        match self.storage.get_item(SELECTED_CATEGORY_KEY) {
            Ok(Some(value)) => CategoryFilter::from_value(&value),
            Ok(None) => CategoryFilter::All,
            Err(e) => {
                warn!("Failed to read selected category: {}", e);
                CategoryFilter::All
            }
        }
    }

    /// Persists the filter choice.
    pub fn set_selected_category(&self, filter: &CategoryFilter) -> Result<()> {
        self.storage.set_item(SELECTED_CATEGORY_KEY, filter.value())
    }
}

/// Reads one imported entry, keeping only string fields.
fn imported_quote(entry: &Value) -> Quote {
    let field = |name: &str| {
        entry
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    Quote::new(field("text"), field("category"))
}
