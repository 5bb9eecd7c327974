//! Remote quote source polled on every sync tick.
//!
//! The endpoint returns posts shaped like `{title, body, ...}`; each becomes a
//! `Quote` with the title as text and the first [`CATEGORY_LEN`] characters of the
//! body as category. Fetch failures never reach the caller: they are logged and
//! read as "no remote quotes this tick".
use std::time::Duration;

use log::{debug, error};
use quote_common::{Quote, Result};
use serde::Deserialize;

/// Number of body characters kept as the category.
pub const CATEGORY_LEN: usize = 10;

/// Anything that can produce the remote side of a sync.
pub trait RemoteSource: Send + Sync {
    /// Returns the current remote quotes; empty on any failure.
    fn fetch_quotes(&self) -> Vec<Quote>;
}

/// Record shape served by the remote endpoint.
#[derive(Debug, Deserialize)]
struct RemotePost {
    title: String,
    body: String,
}

impl RemotePost {
    fn into_quote(self) -> Quote {
        let category: String = self.body.chars().take(CATEGORY_LEN).collect();
        Quote::new(self.title, category)
    }
}

/// Blocking HTTP client for the remote endpoint.
pub struct HttpQuoteReceiver {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpQuoteReceiver {
    /// Builds a client for `url`. Requests have no timeout.
    pub fn new(url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// Fetches and maps remote posts, surfacing any failure.
    pub fn try_fetch(&self) -> Result<Vec<Quote>> {
        let posts: Vec<RemotePost> = self.client.get(&self.url).send()?.json()?;
        debug!("Fetched {} posts from {}", posts.len(), self.url);
        Ok(posts.into_iter().map(RemotePost::into_quote).collect())
    }
}

impl RemoteSource for HttpQuoteReceiver {
    fn fetch_quotes(&self) -> Vec<Quote> {
        self.try_fetch().unwrap_or_else(|e| {
            error!("Error fetching quotes: {}", e);
            Vec::new()
        })
    }
}
