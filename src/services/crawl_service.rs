use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use futures::future::join_all;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::external::page_source::{FetchError, PageSource};
use crate::models::{GoldPriceRecord, Instrument};
use crate::scraping::{self, ExtractionError};
use crate::store::{CacheError, GoldPriceStore};

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("failed to save to cache: {0}")]
    Cache(#[from] CacheError),
}

#[derive(Debug, Default)]
pub struct CrawlSummary {
    pub processed: i32,
    pub failed: i32,
}

/// Fetches, extracts and caches gold prices, one instrument at a time.
pub struct CrawlService {
    source: Arc<dyn PageSource>,
    store: GoldPriceStore,
    inflight: DashMap<Instrument, Arc<Mutex<()>>>,
}

impl CrawlService {
    pub fn new(source: Arc<dyn PageSource>, store: GoldPriceStore) -> Self {
        Self {
            source,
            store,
            inflight: DashMap::new(),
        }
    }

    /// Fetch and extract without touching the cache.
    pub async fn crawl(&self, instrument: Instrument) -> Result<GoldPriceRecord, CrawlError> {
        let html = self.source.fetch_page(instrument).await?;
        let crawled_at = Utc::now();

        let chart = scraping::extract_chart_data(&html)?;
        if chart.coerced_values > 0 {
            warn!(
                "{}: {} price values could not be parsed and were set to 0",
                instrument, chart.coerced_values
            );
        }

        Ok(scraping::build_record(instrument, chart, crawled_at))
    }

    pub async fn crawl_and_save(&self, instrument: Instrument) -> Result<GoldPriceRecord, CrawlError> {
        let guard = self.guard(instrument);
        let _lock = guard.lock().await;
        self.crawl_and_save_locked(instrument).await
    }

    /// Crawls every instrument concurrently; a failure only affects its own instrument.
    pub async fn crawl_all(&self) -> CrawlSummary {
        let results = join_all(
            Instrument::ALL
                .iter()
                .map(|&instrument| async move { (instrument, self.crawl_and_save(instrument).await) }),
        )
        .await;

        let mut summary = CrawlSummary::default();
        for (instrument, result) in results {
            match result {
                Ok(_) => {
                    summary.processed += 1;
                    info!("✅ Successfully updated gold price for {}", instrument);
                }
                Err(e) => {
                    summary.failed += 1;
                    warn!("❌ Error crawling gold price for {}: {}", instrument, e);
                }
            }
        }
        summary
    }

    /// Cached record, or a fresh crawl when the cache has nothing usable.
    pub async fn get_or_crawl(&self, instrument: Instrument) -> Result<GoldPriceRecord, CrawlError> {
        if let Some(record) = self.load_cached(instrument).await {
            return Ok(record);
        }

        let guard = self.guard(instrument);
        let _lock = guard.lock().await;

        // Another request may have filled the cache while we waited.
        if let Some(record) = self.load_cached(instrument).await {
            return Ok(record);
        }

        info!("Gold price for {} not found in cache, crawling new data...", instrument);
        self.crawl_and_save_locked(instrument).await
    }

    /// Every instrument that has data, cached or freshly crawled. Failures are skipped.
    pub async fn snapshot(&self) -> BTreeMap<Instrument, GoldPriceRecord> {
        let results = join_all(
            Instrument::ALL
                .iter()
                .map(|&instrument| async move { (instrument, self.get_or_crawl(instrument).await) }),
        )
        .await;

        results
            .into_iter()
            .filter_map(|(instrument, result)| match result {
                Ok(record) => Some((instrument, record)),
                Err(e) => {
                    debug!("Skipping {}: {}", instrument, e);
                    None
                }
            })
            .collect()
    }

    async fn crawl_and_save_locked(&self, instrument: Instrument) -> Result<GoldPriceRecord, CrawlError> {
        let record = self.crawl(instrument).await?;
        self.store.save(&record).await?;
        Ok(record)
    }

    async fn load_cached(&self, instrument: Instrument) -> Option<GoldPriceRecord> {
        match self.store.load(instrument).await {
            Ok(record) => record,
            Err(e) => {
                warn!("Cache read failed for {}: {}", instrument, e);
                None
            }
        }
    }

    fn guard(&self, instrument: Instrument) -> Arc<Mutex<()>> {
        self.inflight.entry(instrument).or_default().clone()
    }
}
