use async_trait::async_trait;
use thiserror::Error;

use crate::models::Instrument;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP request returned status: {0}")]
    Status(u16),

    #[error("empty response body")]
    EmptyBody,

    #[error("bad source url: {0}")]
    BadUrl(String),
}

/// Where the chart page for an instrument comes from.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, instrument: Instrument) -> Result<String, FetchError>;
}

#[cfg(test)]
pub(crate) mod stub {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    /// Serves canned pages; instruments without a page fail with HTTP 404.
    #[derive(Default)]
    pub(crate) struct StubSource {
        pages: HashMap<Instrument, String>,
        delay: Option<Duration>,
        fetches: AtomicUsize,
    }

    impl StubSource {
        pub(crate) fn with_page(mut self, instrument: Instrument, html: &str) -> Self {
            self.pages.insert(instrument, html.to_string());
            self
        }

        pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub(crate) fn fetches(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PageSource for StubSource {
        async fn fetch_page(&self, instrument: Instrument) -> Result<String, FetchError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.pages
                .get(&instrument)
                .cloned()
                .ok_or(FetchError::Status(404))
        }
    }
}
