//! Data model types for the quote controls.
//!
//! - `control` — control names, their inputs, and the handler table keyed by name.
pub mod control;
