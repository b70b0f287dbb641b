//! Font family and weight normalization

/// First family of a comma-separated list, without surrounding quotes.
///
/// Returns `None` for empty input and the `inherit`, `initial`, `normal`
/// keywords.
pub fn normalize_font_family(value: &str) -> Option<String> {
    let raw = value.trim();
    if raw.is_empty() || matches!(raw, "inherit" | "initial" | "normal") {
        return None;
    }

    let first = raw.split(',').next()?.trim();
    let first = first.strip_prefix(['"', '\'']).unwrap_or(first);
    let first = first.strip_suffix(['"', '\'']).unwrap_or(first);
    let cleaned = first.trim();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Numeric font weight: `normal` is 400, `bold` is 700, otherwise the
/// leading integer (`"600"`, `"600.0"`).
pub fn normalize_font_weight(value: &str) -> Option<u32> {
    let raw = value.trim().to_ascii_lowercase();
    match raw.as_str() {
        "" | "inherit" | "initial" => None,
        "normal" => Some(400),
        "bold" => Some(700),
        _ => {
            let digits: &str = raw
                .find(|c: char| !c.is_ascii_digit())
                .map(|end| &raw[..end])
                .unwrap_or(&raw);
            digits.parse::<u32>().ok()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_takes_first_entry_without_quotes() {
        assert_eq!(
            normalize_font_family("\"Inter\", Arial, sans-serif").as_deref(),
            Some("Inter")
        );
        assert_eq!(
            normalize_font_family("'Source Sans Pro',serif").as_deref(),
            Some("Source Sans Pro")
        );
        assert_eq!(normalize_font_family("system-ui").as_deref(), Some("system-ui"));
    }

    #[test]
    fn test_family_keywords_are_null() {
        assert_eq!(normalize_font_family(""), None);
        assert_eq!(normalize_font_family("inherit"), None);
        assert_eq!(normalize_font_family("initial"), None);
        assert_eq!(normalize_font_family("normal"), None);
        assert_eq!(normalize_font_family("\"\", Arial"), None);
    }

    #[test]
    fn test_weight_keywords_and_numbers() {
        assert_eq!(normalize_font_weight("bold"), Some(700));
        assert_eq!(normalize_font_weight("normal"), Some(400));
        assert_eq!(normalize_font_weight("500"), Some(500));
        assert_eq!(normalize_font_weight(" 600.0 "), Some(600));
        assert_eq!(normalize_font_weight("BOLD"), Some(700));
    }

    #[test]
    fn test_weight_unparseable_is_null() {
        assert_eq!(normalize_font_weight("bolder"), None);
        assert_eq!(normalize_font_weight("inherit"), None);
        assert_eq!(normalize_font_weight(""), None);
        assert_eq!(normalize_font_weight("-"), None);
    }
}
