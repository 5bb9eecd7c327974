//! Command-line arguments for the Quote Client.
//!
//! Each subcommand triggers one control of the handler table. See `main` for
//! end-to-end usage.
use clap::{Parser, Subcommand};
use quote_common::net::{DEFAULT_STORAGE_PATH, EXPORT_FILE_NAME, SERVER_URL};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path of the JSON key-value storage file shared with the sync daemon.
    #[clap(long, default_value = DEFAULT_STORAGE_PATH)]
    pub storage: String,

    /// Endpoint receiving newly added quotes.
    #[clap(long, default_value = SERVER_URL)]
    pub server_url: String,

    /// Control to trigger.
    #[command(subcommand)]
    pub command: Command,
}

/// Available controls.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show a random quote from the selected category.
    NewQuote,
    /// List the options of the category filter.
    Categories,
    /// Select a category (`all` for every quote) and show a quote from it.
    Filter {
        /// Category value.
        category: String,
    },
    /// Add a quote through the form.
    Add {
        /// Quote text.
        #[clap(long, default_value = "")]
        text: String,
        /// Quote category.
        #[clap(long, default_value = "")]
        category: String,
        /// Keep the quote local instead of posting it to the server.
        #[clap(long)]
        no_post: bool,
    },
    /// Export every quote to a JSON file.
    Export {
        /// Destination file.
        #[clap(long, default_value = EXPORT_FILE_NAME)]
        out: String,
    },
    /// Append quotes from a JSON file holding an array.
    Import {
        /// Source file.
        path: String,
    },
}
