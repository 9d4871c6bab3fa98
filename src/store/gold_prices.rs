use std::sync::Arc;

use tracing::debug;

use crate::models::{GoldPriceRecord, Instrument};
use crate::store::kv::{CacheError, KeyValueStore};

pub const DEFAULT_KEY_PREFIX: &str = "gold_price";

/// Typed access to cached gold price records, one key per instrument.
#[derive(Clone)]
pub struct GoldPriceStore {
    kv: Arc<dyn KeyValueStore>,
    prefix: String,
}

impl GoldPriceStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, prefix: impl Into<String>) -> Self {
        Self {
            kv,
            prefix: prefix.into(),
        }
    }

    pub fn key(&self, instrument: Instrument) -> String {
        format!("{}:{}", self.prefix, instrument.slug())
    }

    pub async fn save(&self, record: &GoldPriceRecord) -> Result<(), CacheError> {
        let key = self.key(record.instrument);
        let json = serde_json::to_string(record)?;
        self.kv.set(&key, json).await?;
        debug!("Saved {} to cache", key);
        Ok(())
    }

    /// `Ok(None)` on a miss. A value that does not decode is an error.
    pub async fn load(&self, instrument: Instrument) -> Result<Option<GoldPriceRecord>, CacheError> {
        let key = self.key(instrument);
        match self.kv.get(&key).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory_store::MemoryStore;
    use chrono::{TimeZone, Utc};

    fn store() -> (MemoryStore, GoldPriceStore) {
        let kv = MemoryStore::new();
        let store = GoldPriceStore::new(Arc::new(kv.clone()), DEFAULT_KEY_PREFIX);
        (kv, store)
    }

    #[test]
    fn test_key_format() {
        let (_, store) = store();
        assert_eq!(store.key(Instrument::PhuQuySjc), "gold_price:phu_quy_sjc");
    }

    #[tokio::test]
    async fn test_record_round_trips_through_cache() {
        let (_, store) = store();
        let record = GoldPriceRecord {
            instrument: Instrument::DojiSg,
            dates: vec!["15/10".into(), "16/10".into()],
            buy_prices: vec![119_800_000.0, 120_100_000.5],
            sell_prices: vec![121_800_000.0, 122_100_000.0],
            updated_at: Utc.with_ymd_and_hms(2026, 10, 16, 6, 0, 0).unwrap()
                + chrono::Duration::nanoseconds(123_456_789),
        };

        store.save(&record).await.unwrap();
        let loaded = store.load(Instrument::DojiSg).await.unwrap();

        assert_eq!(loaded, Some(record));
        assert_eq!(store.load(Instrument::Sjc).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_scraped_non_finite_prices_still_round_trip() {
        let (_, store) = store();
        let page = crate::scraping::tests::SAMPLE_PAGE.replace("[100,110]", "[NaN,Infinity]");
        let chart = crate::scraping::extract_chart_data(&page).unwrap();
        assert_eq!(chart.coerced_values, 2);

        let record = crate::scraping::build_record(Instrument::BaoTinMinhChau, chart, Utc::now());
        store.save(&record).await.unwrap();

        let loaded = store.load(Instrument::BaoTinMinhChau).await.unwrap().unwrap();
        assert_eq!(loaded.buy_prices, vec![0.0, 0.0]);
        assert_eq!(loaded, record);
    }

    #[tokio::test]
    async fn test_corrupt_value_is_an_error() {
        let (kv, store) = store();
        kv.set("gold_price:sjc", "{not json".into()).await.unwrap();

        let err = store.load(Instrument::Sjc).await.unwrap_err();
        assert!(matches!(err, CacheError::Serialization(_)));
    }
}
