//! Color parsing and color math
//!
//! Everything downstream compares colors as lowercase `#rrggbb` strings, so
//! [`normalize_color`] is the single place where CSS color syntax is
//! interpreted. Luminance, saturation and distance work on those strings.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Alpha at or above this is treated as fully opaque.
const OPAQUE_ALPHA: f64 = 0.999;

static RGB_FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^rgba?\(([^)]+)\)$").expect("valid rgb pattern"));

/// A canonical color: 6-digit lowercase hex plus optional alpha.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedColor {
    pub hex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
}

impl NormalizedColor {
    pub fn opaque(hex: impl Into<String>) -> Self {
        Self { hex: hex.into(), alpha: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

#[derive(Debug, Clone, Copy)]
struct Rgba {
    rgb: Rgb,
    alpha: Option<f64>,
}

fn named_color(name: &str) -> Option<&'static str> {
    match name {
        "black" => Some("#000000"),
        "white" => Some("#ffffff"),
        "red" => Some("#ff0000"),
        "green" => Some("#008000"),
        "blue" => Some("#0000ff"),
        "gray" | "grey" => Some("#808080"),
        _ => None,
    }
}

fn clamp_byte(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

fn rgb_to_hex(rgb: Rgb) -> String {
    format!(
        "#{:02x}{:02x}{:02x}",
        clamp_byte(rgb.r),
        clamp_byte(rgb.g),
        clamp_byte(rgb.b)
    )
}

fn hex_byte(pair: &str) -> Option<f64> {
    u8::from_str_radix(pair, 16).ok().map(f64::from)
}

fn parse_hex(input: &str) -> Option<Rgba> {
    let value = input.trim().to_ascii_lowercase();
    let digits = value.strip_prefix('#')?;
    if !digits.is_ascii() {
        return None;
    }

    let expanded = match digits.len() {
        3 | 4 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 | 8 => digits.to_string(),
        _ => return None,
    };

    let rgb = Rgb {
        r: hex_byte(&expanded[0..2])?,
        g: hex_byte(&expanded[2..4])?,
        b: hex_byte(&expanded[4..6])?,
    };
    let alpha = if expanded.len() == 8 {
        Some(hex_byte(&expanded[6..8])? / 255.0)
    } else {
        None
    };

    Some(Rgba { rgb, alpha })
}

fn parse_rgb_function(input: &str) -> Option<Rgba> {
    let caps = RGB_FUNCTION.captures(input.trim())?;
    let parts: Vec<&str> = caps[1]
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
    if parts.len() < 3 {
        return None;
    }

    let channel = |part: &str| super::parse_leading_float(part);
    let rgb = Rgb {
        r: channel(parts[0])?,
        g: channel(parts[1])?,
        b: channel(parts[2])?,
    };
    let alpha = parts
        .get(3)
        .and_then(|part| super::parse_leading_float(part))
        .map(|alpha| alpha.clamp(0.0, 1.0));

    Some(Rgba { rgb, alpha })
}

fn finish(parsed: Rgba) -> NormalizedColor {
    let hex = rgb_to_hex(parsed.rgb);
    match parsed.alpha {
        Some(alpha) if alpha < OPAQUE_ALPHA => NormalizedColor {
            hex,
            alpha: Some(super::round_to(alpha, 3)),
        },
        _ => NormalizedColor { hex, alpha: None },
    }
}

/// Parse a CSS color into canonical form.
///
/// Accepts 3/4/6/8-digit hex, comma-separated `rgb()`/`rgba()` and a few
/// named colors. `transparent`, `currentcolor`, CSS-wide keywords and
/// anything unparseable return `None`.
pub fn normalize_color(value: &str) -> Option<NormalizedColor> {
    let raw = value.trim();
    if raw.is_empty() {
        return None;
    }

    let lowered = raw.to_ascii_lowercase();
    if matches!(
        lowered.as_str(),
        "transparent" | "currentcolor" | "none" | "inherit" | "initial"
    ) {
        return None;
    }

    if let Some(hex) = named_color(&lowered) {
        return Some(NormalizedColor::opaque(hex));
    }

    parse_hex(raw).or_else(|| parse_rgb_function(raw)).map(finish)
}

/// Like [`normalize_color`], but a fully transparent color (alpha 0) is
/// treated as no color at all. Computed styles report unset backgrounds
/// as `rgba(0, 0, 0, 0)`.
pub fn visible_color(value: &str) -> Option<NormalizedColor> {
    normalize_color(value).filter(|color| color.alpha != Some(0.0))
}

/// `#rrggbb`, or `#rrggbbaa` when the color carries alpha.
pub fn to_hex_with_alpha(color: &NormalizedColor) -> String {
    let hex = color.hex.to_ascii_lowercase();
    match color.alpha {
        Some(alpha) => format!("{hex}{:02x}", clamp_byte(alpha * 255.0)),
        None => hex,
    }
}

/// RGB channels of a hex color; alpha digits are ignored.
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    parse_hex(hex).map(|parsed| parsed.rgb)
}

/// WCAG relative luminance in [0, 1]. Invalid hex gives 0.
pub fn relative_luminance(hex: &str) -> f64 {
    let Some(rgb) = hex_to_rgb(hex) else {
        return 0.0;
    };

    let linear = |channel: f64| {
        let c = channel / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };

    0.2126 * linear(rgb.r) + 0.7152 * linear(rgb.g) + 0.0722 * linear(rgb.b)
}

/// HSL saturation in [0, 1]. Greys and invalid hex give 0.
pub fn saturation(hex: &str) -> f64 {
    let Some(rgb) = hex_to_rgb(hex) else {
        return 0.0;
    };

    let (r, g, b) = (rgb.r / 255.0, rgb.g / 255.0, rgb.b / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max == min {
        return 0.0;
    }

    let lightness = (max + min) / 2.0;
    (max - min) / (1.0 - (2.0 * lightness - 1.0).abs())
}

/// Euclidean distance in RGB space; infinite when either side is invalid.
pub fn color_distance(a: &str, b: &str) -> f64 {
    match (hex_to_rgb(a), hex_to_rgb(b)) {
        (Some(a), Some(b)) => {
            let (dr, dg, db) = (a.r - b.r, a.g - b.g, a.b - b.b);
            (dr * dr + dg * dg + db * db).sqrt()
        }
        _ => f64::INFINITY,
    }
}
