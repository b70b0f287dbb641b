//! Value normalizers
//!
//! Pure functions turning raw computed-style strings into canonical typed
//! values. None of them panic: anything that cannot be interpreted comes
//! back as `None` (or an empty list) and the caller skips that candidate.
//!
//! # Coverage
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `#abc`, `#aabbccdd`, `rgb()`, `rgba()`, a few names | [`normalize_color`] | [`NormalizedColor`] |
//! | `"Inter", Arial, sans-serif` | [`normalize_font_family`] | `Inter` |
//! | `normal`, `bold`, `600` | [`normalize_font_weight`] | `u32` |
//! | `0px 16px 24px 8px` | [`parse_px_list`] | `[0, 16, 24, 8]` |
//! | `0px 8px 24px rgba(0,0,0,0.2)` | [`normalize_shadow`] | [`NormalizedShadow`] list |
//!
//! Only `px` lengths are understood. `em`, `rem` and `%` values are ignored
//! rather than converted.

pub mod color;
pub mod font;
pub mod length;
pub mod shadow;

pub use color::{
    color_distance, hex_to_rgb, normalize_color, relative_luminance, saturation,
    to_hex_with_alpha, visible_color, NormalizedColor, Rgb,
};
pub use font::{normalize_font_family, normalize_font_weight};
pub use length::{parse_leading_float, parse_px_list, parse_px_value};
pub use shadow::{normalize_shadow, NormalizedShadow};

/// Round to a fixed number of decimals, halves toward positive infinity.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let multiplier = 10f64.powi(precision as i32);
    let rounded = (value * multiplier + 0.5).floor() / multiplier;
    // collapse -0.0
    rounded + 0.0
}

/// Effect-like values (`filter`, `boxShadow`, `backgroundImage`): `None`
/// for empty, `none` and `normal`.
pub fn normalize_effect(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "none" || trimmed == "normal" {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(2.0, 2), 2.0);
        assert_eq!(round_to(1.005, 0), 1.0);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -2.0);
        assert!(round_to(-0.2, 0).is_sign_positive());
    }

    #[test]
    fn test_normalize_effect() {
        assert_eq!(normalize_effect("  blur(4px) "), Some("blur(4px)"));
        assert_eq!(normalize_effect("none"), None);
        assert_eq!(normalize_effect("normal"), None);
        assert_eq!(normalize_effect("   "), None);
    }
}
