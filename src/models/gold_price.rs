use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Instrument;

/// Latest crawled price history for one instrument.
///
/// `dates[i]`, `buy_prices[i]` and `sell_prices[i]` describe the same day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldPriceRecord {
    #[serde(rename = "type")]
    pub instrument: Instrument,
    pub dates: Vec<String>,
    pub buy_prices: Vec<f64>,
    pub sell_prices: Vec<f64>,
    pub updated_at: DateTime<Utc>,
}

/// Buy and sell price for a single date label.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DailyQuote {
    pub buy: f64,
    pub sell: f64,
}

impl GoldPriceRecord {
    pub fn is_aligned(&self) -> bool {
        self.buy_prices.len() == self.dates.len() && self.sell_prices.len() == self.dates.len()
    }

    /// Quote for the entry whose label equals `label` exactly; the last one wins
    /// when a label repeats. A price missing at that index reads as 0.0.
    pub fn quote_on(&self, label: &str) -> Option<DailyQuote> {
        let idx = self.dates.iter().rposition(|d| d == label)?;
        Some(DailyQuote {
            buy: self.buy_prices.get(idx).copied().unwrap_or(0.0),
            sell: self.sell_prices.get(idx).copied().unwrap_or(0.0),
        })
    }
}
