//! Shared endpoint, storage and timing constants used by the daemon and the client.
use std::time::Duration;

/// Remote endpoint polled for new quotes and receiving posted ones.
pub const SERVER_URL: &str = "https://jsonplaceholder.typicode.com/posts";
/// Interval between two sync ticks.
pub const SYNC_INTERVAL: Duration = Duration::from_secs(10);
/// Default path of the file-backed key-value storage.
pub const DEFAULT_STORAGE_PATH: &str = "quotes_storage.json";
/// Default file name used by the export control.
pub const EXPORT_FILE_NAME: &str = "quotes.json";

/// Storage key holding the JSON-encoded quote list.
pub const QUOTES_KEY: &str = "quotes";
/// Storage key holding the last category chosen in the filter control.
pub const SELECTED_CATEGORY_KEY: &str = "selectedCategory";
