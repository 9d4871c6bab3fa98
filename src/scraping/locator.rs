use std::sync::OnceLock;

use scraper::{Html, Selector};

use super::ExtractionError;

const CHART_MARKER: &str = "highcharts";
const CATEGORIES_MARKER: &str = "categories";

fn script_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("script").expect("static selector"))
}

fn is_chart_script(text: &str) -> bool {
    text.contains(CATEGORIES_MARKER) && text.to_ascii_lowercase().contains(CHART_MARKER)
}

/// Returns the text of the first `<script>` that configures a chart.
pub fn locate_chart_script(html: &str) -> Result<String, ExtractionError> {
    let document = Html::parse_document(html);

    document
        .select(script_selector())
        .map(|script| script.text().collect::<String>())
        .find(|text| is_chart_script(text))
        .ok_or(ExtractionError::ScriptNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picks_first_script_with_both_markers() {
        let html = r#"
            <html><body>
            <script>var categories = [];</script>
            <script src="/js/highcharts.js"></script>
            <script>Highcharts.chart('c1', { xAxis: { categories: ["01/10"] } });</script>
            <script>Highcharts.chart('c2', { xAxis: { categories: ["02/10"] } });</script>
            </body></html>
        "#;

        let script = locate_chart_script(html).unwrap();
        assert!(script.contains("c1"));
        assert!(!script.contains("c2"));
    }

    #[test]
    fn test_missing_chart_script_is_script_not_found() {
        let html = "<html><script>var categories = [1];</script><script>highcharts()</script></html>";
        assert_eq!(locate_chart_script(html), Err(ExtractionError::ScriptNotFound));
    }

    #[test]
    fn test_non_html_body_is_script_not_found() {
        assert_eq!(
            locate_chart_script(r#"{"error":"not found"}"#),
            Err(ExtractionError::ScriptNotFound)
        );
    }
}
