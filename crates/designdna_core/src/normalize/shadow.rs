//! Box-shadow parsing

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::color::normalize_color;
use super::length::parse_px_list;

static INSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\binset\b").expect("valid inset pattern"));

static COLOR_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(rgba?\([^)]+\)|#[0-9a-fA-F]{3,8}|\b[a-zA-Z]+\b)").expect("valid color token pattern")
});

const DEFAULT_SHADOW_COLOR: &str = "#000000";

/// One layer of a `box-shadow` value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedShadow {
    pub x: f64,
    pub y: f64,
    pub blur: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spread: Option<f64>,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    /// Only ever `Some(true)`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inset: Option<bool>,
}

/// Split on commas that are not nested inside parentheses.
fn split_top_level(value: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, ch) in value.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                segments.push(&value[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    segments.push(&value[start..]);

    segments
        .into_iter()
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}

fn parse_layer(segment: &str) -> Option<NormalizedShadow> {
    let inset = INSET.is_match(segment);
    let cleaned = INSET.replace_all(segment, " ");
    let cleaned = cleaned.trim();

    let (color, rest) = match COLOR_TOKEN.find(cleaned) {
        Some(token) => {
            let rest = format!("{} {}", &cleaned[..token.start()], &cleaned[token.end()..]);
            (normalize_color(token.as_str()), rest)
        }
        None => (None, cleaned.to_string()),
    };

    let lengths = parse_px_list(&rest);
    if lengths.len() < 2 {
        return None;
    }

    Some(NormalizedShadow {
        x: lengths[0],
        y: lengths[1],
        blur: lengths.get(2).copied().unwrap_or(0.0),
        spread: lengths.get(3).copied(),
        color: color
            .as_ref()
            .map(|c| c.hex.clone())
            .unwrap_or_else(|| DEFAULT_SHADOW_COLOR.to_string()),
        alpha: color.and_then(|c| c.alpha),
        inset: inset.then_some(true),
    })
}

/// Parse a `box-shadow` shorthand into its layers.
///
/// Layers with fewer than two px lengths are dropped. A missing color
/// defaults to black.
pub fn normalize_shadow(value: &str) -> Vec<NormalizedShadow> {
    let raw = value.trim();
    if raw.is_empty() || raw == "none" {
        return Vec::new();
    }

    split_top_level(raw).into_iter().filter_map(parse_layer).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_layer_with_rgba() {
        let shadows = normalize_shadow("0px 8px 24px rgba(0,0,0,0.2)");
        assert_eq!(
            shadows,
            vec![NormalizedShadow {
                x: 0.0,
                y: 8.0,
                blur: 24.0,
                spread: None,
                color: "#000000".into(),
                alpha: Some(0.2),
                inset: None,
            }]
        );
    }

    #[test]
    fn test_computed_style_order_color_first() {
        let shadows = normalize_shadow("rgba(15, 23, 42, 0.08) 0px 1px 2px 0px");
        assert_eq!(shadows.len(), 1);
        assert_eq!(shadows[0].color, "#0f172a");
        assert_eq!(shadows[0].alpha, Some(0.08));
        assert_eq!(shadows[0].spread, Some(0.0));
    }

    #[test]
    fn test_multiple_layers_do_not_split_inside_parens() {
        let shadows =
            normalize_shadow("rgba(0, 0, 0, 0.1) 0px 4px 6px -1px, rgba(0, 0, 0, 0.06) 0px 2px 4px -1px");
        assert_eq!(shadows.len(), 2);
        assert_eq!(shadows[0].y, 4.0);
        assert_eq!(shadows[0].spread, Some(-1.0));
        assert_eq!(shadows[1].alpha, Some(0.06));
    }

    #[test]
    fn test_inset_and_default_color() {
        let shadows = normalize_shadow("inset 0px 0px 0px 1px");
        assert_eq!(shadows[0].inset, Some(true));
        assert_eq!(shadows[0].color, "#000000");
        assert_eq!(shadows[0].alpha, None);
    }

    #[test]
    fn test_named_and_hex_colors() {
        assert_eq!(normalize_shadow("2px 2px red")[0].color, "#ff0000");
        let hex = normalize_shadow("#33333380 1px 1px 3px");
        assert_eq!(hex[0].color, "#333333");
        assert_eq!(hex[0].blur, 3.0);
    }

    #[test]
    fn test_unparseable_layers_dropped() {
        assert!(normalize_shadow("none").is_empty());
        assert!(normalize_shadow("").is_empty());
        assert!(normalize_shadow("4px black").is_empty());
        assert!(normalize_shadow("garbage, ((,").is_empty());
        assert_eq!(normalize_shadow("1px black, 0px 2px blue").len(), 1);
    }
}
