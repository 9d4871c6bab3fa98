use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, ORIGIN, REFERER, USER_AGENT};
use tracing::{debug, info};

use crate::external::page_source::{FetchError, PageSource};
use crate::models::Instrument;

pub const DEFAULT_URL_TEMPLATE: &str =
    "https://24h.24hstatic.com/ajax/box_bieu_do_gia_vang/index/{instrument}/0/0?is_template_page=1";

const BROWSER_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/137.0.0.0 Safari/537.36";

/// Fetches the gold price chart widget from 24h.com.vn.
pub struct GoldPageProvider {
    client: reqwest::Client,
    url_template: String,
}

impl GoldPageProvider {
    pub fn new(url_template: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(browser_headers())
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            client,
            url_template: url_template.into(),
        })
    }

    pub fn page_url(&self, instrument: Instrument) -> Result<url::Url, FetchError> {
        let raw = self.url_template.replace("{instrument}", instrument.slug());
        url::Url::parse(&raw).map_err(|e| FetchError::BadUrl(format!("{raw}: {e}")))
    }
}

// The widget endpoint is normally loaded cross-site from the news page.
fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("vi-VN,vi;q=0.9,en-GB;q=0.8,en;q=0.7"),
    );
    headers.insert(ORIGIN, HeaderValue::from_static("https://www.24h.com.vn"));
    headers.insert(REFERER, HeaderValue::from_static("https://www.24h.com.vn/"));
    headers.insert("sec-fetch-dest", HeaderValue::from_static("empty"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("cors"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("cross-site"));
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_UA));
    headers
}

#[async_trait]
impl PageSource for GoldPageProvider {
    async fn fetch_page(&self, instrument: Instrument) -> Result<String, FetchError> {
        let url = self.page_url(instrument)?;
        debug!("Fetching gold price page for {}: {}", instrument, url);

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if body.trim().is_empty() {
            return Err(FetchError::EmptyBody);
        }

        info!("Fetched page for {} ({} bytes)", instrument, body.len());
        Ok(body)
    }
}
