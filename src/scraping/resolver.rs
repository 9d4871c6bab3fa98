use tracing::{debug, warn};

use crate::models::ExtractedSeries;

/// Series labels used by the source site.
pub const BUY_LABEL: &str = "Mua vào";
pub const SELL_LABEL: &str = "Bán ra";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesRole {
    Buy,
    Sell,
}

impl SeriesRole {
    pub fn from_label(name: &str) -> Option<Self> {
        match name {
            BUY_LABEL => Some(SeriesRole::Buy),
            SELL_LABEL => Some(SeriesRole::Sell),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedPrices {
    pub buy: Vec<f64>,
    pub sell: Vec<f64>,
}

/// Picks the buy and sell tracks out of the extracted series.
/// A role with no matching series stays empty; other series are ignored.
pub fn resolve_series(series: &[ExtractedSeries]) -> ResolvedPrices {
    let mut buy: Option<&ExtractedSeries> = None;
    let mut sell: Option<&ExtractedSeries> = None;

    for s in series {
        let slot = match SeriesRole::from_label(&s.name) {
            Some(SeriesRole::Buy) => &mut buy,
            Some(SeriesRole::Sell) => &mut sell,
            None => {
                debug!("Ignoring chart series '{}' ({})", s.name, s.color);
                continue;
            }
        };

        if slot.is_some() {
            warn!("Duplicate chart series '{}', keeping the first one", s.name);
        } else {
            *slot = Some(s);
        }
    }

    ResolvedPrices {
        buy: buy.map(|s| s.data.clone()).unwrap_or_default(),
        sell: sell.map(|s| s.data.clone()).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(name: &str, data: &[f64]) -> ExtractedSeries {
        ExtractedSeries {
            name: name.to_string(),
            color: "#000".to_string(),
            data: data.to_vec(),
        }
    }

    #[test]
    fn test_resolves_roles_by_label() {
        let resolved = resolve_series(&[
            series("Bán ra", &[105.0, 115.0]),
            series("Trung bình", &[1.0, 2.0]),
            series("Mua vào", &[100.0, 110.0]),
        ]);
        assert_eq!(resolved.buy, vec![100.0, 110.0]);
        assert_eq!(resolved.sell, vec![105.0, 115.0]);
    }

    #[test]
    fn test_label_match_is_case_sensitive() {
        let resolved = resolve_series(&[series("mua vào", &[1.0]), series("BÁN RA", &[2.0])]);
        assert_eq!(resolved, ResolvedPrices::default());
    }

    #[test]
    fn test_first_duplicate_wins() {
        let resolved = resolve_series(&[series("Mua vào", &[1.0]), series("Mua vào", &[2.0])]);
        assert_eq!(resolved.buy, vec![1.0]);
        assert!(resolved.sell.is_empty());
    }
}
