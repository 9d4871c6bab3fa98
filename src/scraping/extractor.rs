use std::sync::OnceLock;

use regex::Regex;

use super::ExtractionError;

/// Unparsed pieces of a chart configuration, as they appear in the script.
#[derive(Debug, Clone, PartialEq)]
pub struct RawChart {
    pub categories: String,
    pub series: Vec<RawSeries>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawSeries {
    pub name: String,
    pub color: String,
    pub data: String,
}

/// Pulls the categories literal and the series literals out of a chart script.
pub trait ChartExtractor: Send + Sync {
    fn extract(&self, script: &str) -> Result<RawChart, ExtractionError>;
}

/// Matches the chart options as text. The script is a templated literal,
/// not something worth parsing as JavaScript.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegexChartExtractor;

fn categories_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"categories\s*:\s*\[([^\]]*)\]").expect("static regex"))
}

fn series_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"name\s*:\s*['"]([^'"]*)['"]\s*,\s*color\s*:\s*['"]([^'"]*)['"]\s*,\s*data\s*:\s*\[([^\]]*)\]"#,
        )
        .expect("static regex")
    })
}

impl ChartExtractor for RegexChartExtractor {
    fn extract(&self, script: &str) -> Result<RawChart, ExtractionError> {
        let categories = categories_re()
            .captures(script)
            .and_then(|c| c.get(1))
            .ok_or(ExtractionError::CategoriesNotFound)?
            .as_str()
            .to_string();

        let series = series_re()
            .captures_iter(script)
            .map(|c| RawSeries {
                name: c[1].to_string(),
                color: c[2].to_string(),
                data: c[3].to_string(),
            })
            .collect();

        Ok(RawChart { categories, series })
    }
}
