//!
//! Common types and utilities shared by the quote sync daemon and client.
//!
//! This crate aggregates:
//! - `error` — unified error type `QuoteError` used across the workspace.
//! - `result` — handy `Result<T, QuoteError>` alias.
//! - `quote` — the `{text, category}` record and the default list.
//! - `category` — derived category set and the filter choice.
//! - `storage` — key-value storage backends.
//! - `store` — `QuoteStore`, owner of the quote list (load/save/merge/import/export).
//! - `notify` — transient notifications raised by merges.
//! - `net` — endpoint, storage-key and timing constants.
#![warn(missing_docs)]
pub mod category;
pub mod error;
pub mod net;
pub mod notify;
pub mod quote;
pub mod result;
pub mod storage;
pub mod store;

pub use error::QuoteError;
pub use quote::Quote;
pub use result::Result;
pub use store::QuoteStore;
