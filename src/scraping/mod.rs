//! Chart scraping pipeline.
//!
//! The source page embeds its price history as an inline Highcharts
//! configuration. Extraction runs in stages:
//!
//! - `locator` finds the `<script>` holding the chart options
//! - `extractor` matches the categories literal and every series literal
//! - `arrays` turns those literals into strings and numbers
//! - `resolver` maps series labels to buy/sell
//! - `builder` assembles the cached [`GoldPriceRecord`](crate::models::GoldPriceRecord)

pub mod arrays;
pub mod builder;
pub mod extractor;
pub mod locator;
pub mod resolver;

use thiserror::Error;
use tracing::debug;

use crate::models::{ChartData, ExtractedSeries};
use arrays::{parse_number_list, parse_string_list};
use extractor::{ChartExtractor, RegexChartExtractor};

pub use builder::build_record;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractionError {
    #[error("no script with chart configuration found")]
    ScriptNotFound,
    #[error("chart categories not found")]
    CategoriesNotFound,
}

/// Extracts chart data from a page using the default regex extractor.
pub fn extract_chart_data(html: &str) -> Result<ChartData, ExtractionError> {
    extract_chart_data_with(html, &RegexChartExtractor)
}

pub fn extract_chart_data_with(
    html: &str,
    extractor: &dyn ChartExtractor,
) -> Result<ChartData, ExtractionError> {
    let script = locator::locate_chart_script(html)?;
    let raw = extractor.extract(&script)?;

    let categories = parse_string_list(&raw.categories);
    let mut coerced_values = 0;
    let series = raw
        .series
        .into_iter()
        .map(|s| {
            let numbers = parse_number_list(&s.data);
            coerced_values += numbers.failures.len();
            debug!("Series: {} ({} points)", s.name, numbers.values.len());
            ExtractedSeries {
                name: s.name,
                color: s.color,
                data: numbers.values,
            }
        })
        .collect();

    Ok(ChartData {
        categories,
        series,
        coerced_values,
    })
}
