use chrono::{DateTime, Utc};
use tracing::warn;

use crate::models::{ChartData, GoldPriceRecord, Instrument};
use super::resolver::resolve_series;

/// Turns extracted chart data into the record that gets cached.
///
/// Empty price arrays are allowed; lengths are not truncated or padded.
pub fn build_record(
    instrument: Instrument,
    chart: ChartData,
    crawled_at: DateTime<Utc>,
) -> GoldPriceRecord {
    let prices = resolve_series(&chart.series);

    let record = GoldPriceRecord {
        instrument,
        dates: chart.categories,
        buy_prices: prices.buy,
        sell_prices: prices.sell,
        updated_at: crawled_at,
    };

    if record.buy_prices.is_empty() || record.sell_prices.is_empty() {
        warn!(
            "{}: chart has no buy or sell series (buy: {}, sell: {})",
            instrument,
            record.buy_prices.len(),
            record.sell_prices.len()
        );
    } else if !record.is_aligned() {
        warn!(
            "{}: series lengths differ from dates (dates: {}, buy: {}, sell: {})",
            instrument,
            record.dates.len(),
            record.buy_prices.len(),
            record.sell_prices.len()
        );
    }

    record
}
