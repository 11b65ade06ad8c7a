use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

static NUMBERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+\.\d+|\d+").expect("employee number pattern is valid"));

/// Canonical headcount buckets, in match priority order.
const BUCKETS: [(&str, i64, Option<i64>); 10] = [
    ("0-1", 0, Some(1)),
    ("1-10", 1, Some(10)),
    ("2-10", 2, Some(10)),
    ("11-50", 11, Some(50)),
    ("51-200", 51, Some(200)),
    ("201-500", 201, Some(500)),
    ("501-1000", 501, Some(1000)),
    ("1001-5000", 1001, Some(5000)),
    ("5001-10000", 5001, Some(10000)),
    ("10001+", 10001, None),
];

/// Headcount interval. `max == None` with `min` set is an open-ended range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmployeeRange {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl EmployeeRange {
    pub const UNKNOWN: EmployeeRange = EmployeeRange { min: None, max: None };

    fn bounded(min: i64, max: Option<i64>) -> Self {
        Self { min: Some(min), max }
    }
}

/// Parse a free-text headcount like `"51-200 employees"` or `"about 40"`.
///
/// Never fails: anything that yields no usable bounds becomes [`EmployeeRange::UNKNOWN`].
pub fn parse_employee_range(raw: Option<&str>) -> EmployeeRange {
    let Some(raw) = raw else {
        return EmployeeRange::UNKNOWN;
    };

    let cleaned = raw.to_lowercase().replace(',', "");
    let cleaned = cleaned.trim();

    if let Some(&(_, min, max)) = BUCKETS
        .iter()
        .find(|(bucket, _, _)| contains_bucket(cleaned, bucket))
    {
        return EmployeeRange::bounded(min, max);
    }

    let integers: Vec<i64> = NUMBERS
        .find_iter(cleaned)
        .filter_map(|m| as_integer(m.as_str()))
        .collect();

    match integers.as_slice() {
        // Reversed pairs like "4000 to 3" are swapped so min <= max holds.
        [a, b] => EmployeeRange::bounded((*a).min(*b), Some((*a).max(*b))),
        [n] => EmployeeRange::bounded(*n, Some(*n)),
        _ => {
            warn!(input = %raw, found = integers.len(), "No employee bounds extracted; storing no value");
            EmployeeRange::UNKNOWN
        }
    }
}

/// Bucket occurrence that is not glued to further digits on either side,
/// so "501-1000" never reads as "1-10".
fn contains_bucket(text: &str, bucket: &str) -> bool {
    text.match_indices(bucket).any(|(start, matched)| {
        let before = text[..start].chars().next_back();
        let after = text[start + matched.len()..].chars().next();
        !before.is_some_and(|c| c.is_ascii_digit()) && !after.is_some_and(|c| c.is_ascii_digit())
    })
}

/// Integral numeric text as an integer; "12.0" counts, "12.5" does not.
fn as_integer(text: &str) -> Option<i64> {
    let value: f64 = text.parse().ok()?;
    if value.fract() != 0.0 || value > i64::MAX as f64 {
        return None;
    }
    Some(value as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(raw: &str) -> (Option<i64>, Option<i64>) {
        let r = parse_employee_range(Some(raw));
        (r.min, r.max)
    }

    #[test]
    fn test_absent_is_unknown() {
        assert_eq!(parse_employee_range(None), EmployeeRange::UNKNOWN);
    }

    #[test]
    fn test_every_bucket_maps_to_its_own_pair() {
        for (bucket, min, max) in BUCKETS {
            assert_eq!(range(bucket), (Some(min), max), "bucket {bucket}");
        }
    }

    #[test]
    fn test_bucket_with_surrounding_text_case_and_commas() {
        assert_eq!(range("51-200 employees"), (Some(51), Some(200)));
        assert_eq!(range("Company size: 1,001-5,000"), (Some(1001), Some(5000)));
        assert_eq!(range("10,001+ EMPLOYEES"), (Some(10001), None));
        assert_eq!(range("  2-10  "), (Some(2), Some(10)));
    }

    #[test]
    fn test_two_integers_without_bucket() {
        assert_eq!(range("between 3 and 4000"), (Some(3), Some(4000)));
        assert_eq!(range("150-300"), (Some(150), Some(300)));
    }

    #[test]
    fn test_reversed_integers_are_ordered() {
        assert_eq!(range("4000 to 3"), (Some(3), Some(4000)));
        assert_eq!(range("500-200"), (Some(200), Some(500)));
    }

    #[test]
    fn test_single_integer_is_degenerate_range() {
        assert_eq!(range("about 42 people"), (Some(42), Some(42)));
        assert_eq!(range("42.0"), (Some(42), Some(42)));
    }

    #[test]
    fn test_non_integral_numbers_are_discarded() {
        assert_eq!(range("2.5 to 30"), (Some(30), Some(30)));
        assert_eq!(range("1.5k"), (None, None));
    }

    #[test]
    fn test_zero_or_many_numbers_is_unknown() {
        assert_eq!(range("self-employed"), (None, None));
        assert_eq!(range("3, 5 or 7"), (None, None));
        assert_eq!(range(""), (None, None));
    }

    #[test]
    fn test_normalized_output_reparses_to_same_range() {
        let first = parse_employee_range(Some("between 3 and 4000"));
        let rendered = format!("{}-{}", first.min.unwrap(), first.max.unwrap());
        assert_eq!(parse_employee_range(Some(&rendered)), first);

        let bucket = parse_employee_range(Some("201-500 employees"));
        assert_eq!(parse_employee_range(Some("201-500")), bucket);
    }
}
