//! Error types shared between the sync daemon and the client.
//!
//! The `QuoteError` enum unifies storage I/O, JSON encoding, HTTP, channel and
//! user-input failures, allowing crates to propagate a single error type.
use std::io;
use std::sync::PoisonError;

use thiserror::Error;

/// Alert shown when the add-quote form is submitted with an empty field.
pub const MISSING_FIELDS: &str = "Please enter both quote and category.";
/// Alert shown when an imported file does not hold a JSON array.
pub const INVALID_FILE_FORMAT: &str = "Invalid file format. Please upload a valid JSON file.";
/// Alert shown when an imported file cannot be read or parsed.
pub const UNREADABLE_FILE: &str = "Error reading file. Please upload a valid JSON file.";

/// Unified error type shared by the sync daemon and the client.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// I/O error originating from storage files or import/export files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// User input rejected before any mutation (e.g., empty quote text).
    #[error("{0}")]
    Validation(String),

    /// Imported content has the wrong shape; nothing was changed.
    #[error("{0}")]
    Format(String),

    /// Request to the remote endpoint failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Installing the Ctrl+C handler failed.
    #[error("Signal handler error: {0}")]
    Signal(String),

    /// Error indicating a poisoned mutex/lock was encountered.
    #[error("Mutex Lock Poisoned: {0}")]
    MutexLock(String),

    /// A control name with no registered handler was dispatched.
    #[error("No handler registered for control: {0}")]
    UnknownControl(String),
}

impl<T> From<PoisonError<T>> for QuoteError {
    fn from(err: PoisonError<T>) -> Self {
        QuoteError::MutexLock(err.to_string())
    }
}
