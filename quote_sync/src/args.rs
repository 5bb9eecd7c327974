//! Command-line arguments for the sync daemon.
use clap::Parser;
use quote_common::net::{DEFAULT_STORAGE_PATH, SERVER_URL, SYNC_INTERVAL};
use std::time::Duration;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Periodically merges remote quotes into local storage", long_about = None)]
pub struct Args {
    /// Path of the JSON key-value storage file shared with the client.
    #[clap(long, default_value = DEFAULT_STORAGE_PATH)]
    pub storage: String,

    /// Endpoint returning a JSON array of `{title, body}` records.
    #[clap(long, default_value = SERVER_URL)]
    pub server_url: String,

    /// Seconds between two sync ticks (minimum 1).
    #[clap(long, default_value_t = SYNC_INTERVAL.as_secs())]
    pub interval_secs: u64,

    /// Run a single fetch-and-merge cycle, print its notifications, then exit.
    #[clap(long)]
    pub once: bool,
}

impl Args {
    /// Tick interval as a `Duration`; zero is bumped to one second.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_ten_second_ticks() {
        let args = Args::parse_from(["quote_sync"]);
        assert_eq!(args.interval(), Duration::from_secs(10));
        assert!(!args.once);
    }

    #[test]
    fn zero_interval_is_raised_to_one_second() {
        let args = Args::parse_from(["quote_sync", "--interval-secs", "0", "--once"]);
        assert_eq!(args.interval(), Duration::from_secs(1));
        assert!(args.once);
    }
}
