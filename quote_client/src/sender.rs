//! Publishing newly added quotes to the remote endpoint.
//!
//! Publishing is best-effort: the response is logged and discarded, and failures
//! never undo the local addition.
use log::{debug, error, info};
use quote_common::{Quote, Result};

/// Destination for quotes added through the form.
pub trait QuotePublisher: Send + Sync {
    /// Sends `quote`; never fails.
    fn publish(&self, quote: &Quote);
}

/// POSTs `{text, category}` JSON bodies to the endpoint.
pub struct HttpQuoteSender {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpQuoteSender {
    /// Builds a sender for `url`.
    pub fn new(url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder().build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// Posts `quote` and returns the decoded response body.
    pub fn send_quote(&self, quote: &Quote) -> Result<serde_json::Value> {
        info!("Posting quote to {}", self.url);
        let response = self.client.post(&self.url).json(quote).send()?;
        Ok(response.json()?)
    }
}

impl QuotePublisher for HttpQuoteSender {
    fn publish(&self, quote: &Quote) {
        match self.send_quote(quote) {
            Ok(body) => debug!("Server response: {}", body),
            Err(e) => error!("Error posting quote: {}", e),
        }
    }
}

/// Publisher used when posting is disabled.
pub struct NoopPublisher;

impl QuotePublisher for NoopPublisher {
    fn publish(&self, quote: &Quote) {
        debug!("Posting disabled, keeping '{}' local", quote.text);
    }
}
