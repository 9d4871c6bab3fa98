// Intermediate shapes produced by the scraping pipeline.

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedSeries {
    pub name: String,
    pub color: String,
    pub data: Vec<f64>,
}

/// Categories and series pulled out of one chart script.
///
/// `categories` and each series' `data` are expected to have the same length
/// but nothing enforces it; read by index with `get`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartData {
    pub categories: Vec<String>,
    pub series: Vec<ExtractedSeries>,
    /// Numeric tokens that failed to parse and were replaced with 0.0.
    pub coerced_values: usize,
}
