use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{LoaderError, Result};

static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d*\.?\d+").expect("revenue number pattern is valid"));

/// Scale keywords in precedence order. The first keyword found wins.
const SCALES: [(&str, f64); 3] = [("billion", 1e9), ("million", 1e6), ("thousand", 1e3)];

/// Parse free-text revenue such as `"$1.5 Billion"` or `"12,000,000"` into dollars.
///
/// Absent input is `Ok(None)`. Text without any number is a [`LoaderError::Parse`];
/// callers decide whether that is fatal.
pub fn parse_revenue(raw: Option<&str>) -> Result<Option<f64>> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let cleaned = raw.to_lowercase().replace(['$', ','], "");
    let cleaned = cleaned.trim();

    let number = NUMBER
        .find(cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .ok_or_else(|| LoaderError::Parse {
            field: "company_revenue",
            input: raw.to_string(),
        })?;

    let scale = SCALES
        .iter()
        .find(|(keyword, _)| cleaned.contains(keyword))
        .map(|(_, factor)| *factor)
        .unwrap_or(1.0);

    Ok(Some(number * scale))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(raw: &str) -> f64 {
        parse_revenue(Some(raw)).unwrap().unwrap()
    }

    #[test]
    fn test_absent_revenue_is_none() {
        assert_eq!(parse_revenue(None).unwrap(), None);
    }

    #[test]
    fn test_keyword_scales() {
        assert_eq!(parsed("$1.5 Billion"), 1.5e9);
        assert_eq!(parsed("$250 million"), 250e6);
        assert_eq!(parsed("800 Thousand USD"), 800e3);
        assert_eq!(parsed("$12,345"), 12345.0);
    }

    #[test]
    fn test_billion_takes_precedence_over_million() {
        // Both keywords present: the larger scale is checked first.
        assert_eq!(parsed("2 billion (was 900 million)"), 2e9);
    }

    #[test]
    fn test_first_number_is_used() {
        assert_eq!(parsed("$10M - $50M million"), 10e6);
        assert_eq!(parsed("approx .5 billion"), 0.5e9);
    }

    #[test]
    fn test_already_normalized_value_is_stable() {
        let once = parsed("$3.2 million");
        let twice = parsed(&format!("{:.1}", once));
        assert_eq!(once, twice);
        assert_eq!(parsed("1500000000.0"), 1.5e9);
    }

    #[test]
    fn test_text_without_number_is_parse_error() {
        let err = parse_revenue(Some("undisclosed")).unwrap_err();
        assert!(matches!(
            err,
            LoaderError::Parse { field: "company_revenue", .. }
        ));
    }
}
