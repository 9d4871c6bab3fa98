use thiserror::Error;
use tracing::warn;

/// A numeric token that could not be parsed. Recorded, never returned as an error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("could not parse '{token}' at position {index} as a number")]
pub struct ElementParseFailed {
    pub index: usize,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NumberList {
    pub values: Vec<f64>,
    pub failures: Vec<ElementParseFailed>,
}

/// Splits the inside of a JS string array literal (`"01/10", '02/10'`) into its items.
pub fn parse_string_list(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    raw.split(',')
        .map(|item| item.trim().trim_matches(|c| c == '"' || c == '\'').to_string())
        .collect()
}

/// Splits the inside of a JS number array literal.
///
/// Unparsable tokens become 0.0 so positions stay aligned with the categories.
/// `NaN` and infinities count as unparsable: JSON has no encoding for them.
pub fn parse_number_list(raw: &str) -> NumberList {
    let mut list = NumberList::default();
    if raw.trim().is_empty() {
        return list;
    }

    for (index, item) in raw.split(',').enumerate() {
        let token = item.trim();
        match token.parse::<f64>() {
            Ok(v) if v.is_finite() => list.values.push(v),
            _ => {
                warn!("Error parsing float value '{}' at position {}, using 0.0", token, index);
                list.values.push(0.0);
                list.failures.push(ElementParseFailed {
                    index,
                    token: token.to_string(),
                });
            }
        }
    }

    list
}
