//! Pixel length parsing

use regex::Regex;
use std::sync::LazyLock;

static PX_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(-?\d*\.?\d+)px").expect("valid px pattern"));

static LEADING_FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid float pattern")
});

/// Every `<number>px` token in a shorthand, in order.
///
/// `"0px 16px 24px 8px"` gives `[0, 16, 24, 8]`. Non-px units are skipped.
pub fn parse_px_list(shorthand: &str) -> Vec<f64> {
    PX_TOKEN
        .captures_iter(shorthand)
        .filter_map(|caps| caps[1].parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .collect()
}

/// The first `<number>px` token, if any.
pub fn parse_px_value(value: &str) -> Option<f64> {
    PX_TOKEN
        .captures(value.trim())
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// Leading decimal number of a string, ignoring whatever follows it.
///
/// `"1.5"` and `"1.5em"` both give `1.5`; `"normal"` gives `None`.
pub fn parse_leading_float(value: &str) -> Option<f64> {
    LEADING_FLOAT
        .find(value.trim())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_px_list_shorthand() {
        assert_eq!(parse_px_list("0px 16px 24px 8px"), vec![0.0, 16.0, 24.0, 8.0]);
        assert_eq!(parse_px_list("8px 16px"), vec![8.0, 16.0]);
    }

    #[test]
    fn test_parse_px_list_handles_decimals_and_negatives() {
        assert_eq!(parse_px_list("-0.5px .25px 1.5PX"), vec![-0.5, 0.25, 1.5]);
    }

    #[test]
    fn test_parse_px_list_ignores_other_units() {
        assert!(parse_px_list("1em 50% 2rem").is_empty());
        assert_eq!(parse_px_list("1em 4px"), vec![4.0]);
        assert!(parse_px_list("").is_empty());
    }

    #[test]
    fn test_parse_px_value() {
        assert_eq!(parse_px_value(" 48px "), Some(48.0));
        assert_eq!(parse_px_value("12px 20px"), Some(12.0));
        assert_eq!(parse_px_value("auto"), None);
        assert_eq!(parse_px_value("normal"), None);
    }

    #[test]
    fn test_parse_leading_float() {
        assert_eq!(parse_leading_float("1.5"), Some(1.5));
        assert_eq!(parse_leading_float(" 2 "), Some(2.0));
        assert_eq!(parse_leading_float("1.25em"), Some(1.25));
        assert_eq!(parse_leading_float("normal"), None);
        assert_eq!(parse_leading_float(""), None);
    }
}
