//! Structural validation of synthesized output
//!
//! Failures never abort synthesis. They become warning strings attached
//! to the result.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use url::Url;

use crate::normalize::NormalizedShadow;
use crate::style_spec::{ComponentRecipe, PaletteRoles, StyleSpec};
use crate::tokens::{SemanticTokensJson, SCHEMA_VERSION};

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").expect("valid hex color pattern")
});

pub const WARNING_PREFIX: &str = "Style spec validation warning: ";

/// Issues quoted in a warning string
const WARNING_ISSUE_LIMIT: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted path, e.g. `palette.colors.0.hex`
    pub path: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.path, self.message)
    }
}

/// `#rrggbb` or `#rrggbbaa`
pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR.is_match(value)
}

#[derive(Default)]
struct Checker {
    issues: Vec<ValidationIssue>,
}

impl Checker {
    fn push(&mut self, path: impl Into<String>, message: &str) {
        self.issues.push(ValidationIssue { path: path.into(), message: message.to_string() });
    }

    fn url(&mut self, path: &str, value: &str) {
        let valid = Url::parse(value)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !valid {
            self.push(path, "must be an absolute http(s) URL");
        }
    }

    fn hex(&mut self, path: impl Into<String>, value: &str) {
        if !is_hex_color(value) {
            self.push(path, "must be a #rrggbb or #rrggbbaa color");
        }
    }

    fn positive(&mut self, path: impl Into<String>, value: f64) {
        if !(value.is_finite() && value > 0.0) {
            self.push(path, "must be positive");
        }
    }

    fn non_negative(&mut self, path: impl Into<String>, value: f64) {
        if !(value.is_finite() && value >= 0.0) {
            self.push(path, "must be non-negative");
        }
    }

    fn roles(&mut self, prefix: &str, roles: &PaletteRoles) {
        for (name, value) in roles.entries() {
            if let Some(value) = value {
                self.hex(format!("{prefix}.{name}"), value);
            }
        }
    }

    fn shadow(&mut self, path: &str, shadow: &NormalizedShadow) {
        self.hex(format!("{path}.color"), &shadow.color);
        if let Some(alpha) = shadow.alpha {
            if !(0.0..=1.0).contains(&alpha) {
                self.push(format!("{path}.alpha"), "must be between 0 and 1");
            }
        }
    }

    fn recipe(&mut self, path: &str, recipe: &ComponentRecipe) {
        for (field, value) in [
            ("background_color", &recipe.background_color),
            ("text_color", &recipe.text_color),
            ("border_color", &recipe.border_color),
        ] {
            if let Some(value) = value {
                self.hex(format!("{path}.{field}"), value);
            }
        }
        if let Some(shadow) = &recipe.shadow {
            self.shadow(&format!("{path}.shadow"), shadow);
        }
    }
}

/// Check a style spec against its structural constraints.
pub fn validate_style_spec(spec: &StyleSpec) -> Vec<ValidationIssue> {
    let mut check = Checker::default();

    check.url("url", &spec.url);
    check.positive("viewport.width", spec.viewport.width);
    check.positive("viewport.height", spec.viewport.height);

    for (idx, color) in spec.palette.colors.iter().enumerate() {
        check.hex(format!("palette.colors.{idx}.hex"), &color.hex);
        check.non_negative(format!("palette.colors.{idx}.weight"), color.weight);
    }
    check.roles("palette.roles", &spec.palette.roles);

    let typography = &spec.typography;
    for (idx, entry) in typography.scale.iter().enumerate() {
        check.positive(format!("typography.scale.{idx}.px"), entry.px);
        check.non_negative(format!("typography.scale.{idx}.weight"), entry.weight);
    }
    for (idx, line_height) in typography.line_heights.iter().enumerate() {
        check.positive(format!("typography.lineHeights.{idx}.value"), line_height.value);
    }
    for (idx, spacing) in typography.letter_spacing.iter().flatten().enumerate() {
        check.non_negative(format!("typography.letterSpacing.{idx}.weight"), spacing.weight);
    }

    let tokens = &spec.tokens;
    for (name, weights) in [
        ("spacingPx", tokens.spacing_px.iter().map(|t| t.weight).collect::<Vec<_>>()),
        ("radiusPx", tokens.radius_px.iter().map(|t| t.weight).collect()),
        ("shadows", tokens.shadows.iter().map(|t| t.weight).collect()),
        ("effects", tokens.effects.iter().map(|t| t.weight).collect()),
    ] {
        for (idx, weight) in weights.into_iter().enumerate() {
            check.non_negative(format!("tokens.{name}.{idx}.weight"), weight);
        }
    }

    if let Some(width) = spec.layout.container_width {
        check.positive("layout.containerWidth", width);
    }
    for (idx, gap) in spec.layout.section_vertical_spacing.iter().enumerate() {
        check.positive(format!("layout.sectionVerticalSpacing.{idx}"), *gap);
    }

    let components = &spec.components;
    for (name, recipe) in [
        ("primaryButton", &components.primary_button),
        ("secondaryButton", &components.secondary_button),
        ("card", &components.card),
        ("input", &components.input),
        ("link", &components.link),
    ] {
        if let Some(recipe) = recipe {
            check.recipe(&format!("components.{name}"), recipe);
        }
    }

    for (idx, section) in spec.sections.iter().enumerate() {
        check.non_negative(format!("sections.{idx}.bounds.width"), section.bounds.width);
        check.non_negative(format!("sections.{idx}.bounds.height"), section.bounds.height);
    }

    if let Some(vision) = &spec.vision {
        for (idx, color) in vision.dominant_colors.iter().enumerate() {
            check.hex(format!("vision.dominantColors.{idx}"), color);
        }
    }

    check.issues
}

/// Check a token document's version and colors.
pub fn validate_tokens_document(doc: &SemanticTokensJson) -> Vec<ValidationIssue> {
    let mut check = Checker::default();

    if doc.schema_version != SCHEMA_VERSION {
        check.push("schema_version", "must be \"1.0\"");
    }
    check.url("source_url", &doc.source_url);

    if doc.tokens.color.palette.is_empty() {
        check.push("tokens.color.palette", "must contain at least 1 color");
    }
    for (idx, color) in doc.tokens.color.palette.iter().enumerate() {
        check.hex(format!("tokens.color.palette.{idx}"), color);
    }
    check.roles("tokens.color.roles", &doc.tokens.color.roles);

    check.issues
}

/// One warning line quoting the first issues, or `None` when clean.
pub fn validation_warning(issues: &[ValidationIssue]) -> Option<String> {
    if issues.is_empty() {
        return None;
    }
    let quoted = issues
        .iter()
        .take(WARNING_ISSUE_LIMIT)
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    Some(format!("{WARNING_PREFIX}{quoted}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Viewport;
    use crate::style_spec::*;

    fn minimal_spec() -> StyleSpec {
        StyleSpec {
            url: "https://example.com/".into(),
            viewport: Viewport { width: 1280.0, height: 800.0 },
            palette: Palette::default(),
            typography: Typography::default(),
            tokens: TokenScales::default(),
            layout: Layout::default(),
            components: Components::default(),
            sections: vec![],
            css_vars: None,
            vision: None,
        }
    }

    #[test]
    fn test_hex_pattern() {
        assert!(is_hex_color("#2563eb"));
        assert!(is_hex_color("#2563EB80"));
        assert!(!is_hex_color("#fff"));
        assert!(!is_hex_color("2563eb"));
        assert!(!is_hex_color("#2563eb8"));
    }

    #[test]
    fn test_minimal_spec_is_valid() {
        assert!(validate_style_spec(&minimal_spec()).is_empty());
    }

    #[test]
    fn test_reports_paths() {
        let mut spec = minimal_spec();
        spec.url = "not a url".into();
        spec.palette.roles.primary = Some("blue".into());
        spec.layout.container_width = Some(0.0);

        let issues = validate_style_spec(&spec);
        let paths: Vec<_> = issues.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["url", "palette.roles.primary", "layout.containerWidth"]);
    }

    #[test]
    fn test_ftp_url_rejected() {
        let mut spec = minimal_spec();
        spec.url = "ftp://example.com".into();
        assert_eq!(validate_style_spec(&spec)[0].path, "url");
    }

    #[test]
    fn test_recipe_shadow_alpha_checked() {
        let mut spec = minimal_spec();
        spec.components.card = Some(ComponentRecipe {
            selector: "div.card".into(),
            kind: "card".into(),
            shadow: Some(NormalizedShadow {
                x: 0.0,
                y: 1.0,
                blur: 2.0,
                spread: None,
                color: "#000000".into(),
                alpha: Some(1.5),
                inset: None,
            }),
            ..Default::default()
        });
        let issues = validate_style_spec(&spec);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].to_string(), "components.card.shadow.alpha must be between 0 and 1");
    }

    #[test]
    fn test_warning_quotes_first_two() {
        let issues = vec![
            ValidationIssue { path: "a".into(), message: "bad".into() },
            ValidationIssue { path: "b".into(), message: "worse".into() },
            ValidationIssue { path: "c".into(), message: "hidden".into() },
        ];
        assert_eq!(
            validation_warning(&issues).as_deref(),
            Some("Style spec validation warning: a bad; b worse")
        );
        assert_eq!(validation_warning(&[]), None);
    }

    #[test]
    fn test_tokens_document_checks() {
        let doc = crate::tokens::SemanticTokensJson::from_style_spec(&minimal_spec(), "p");
        let issues = validate_tokens_document(&doc);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "tokens.color.palette");
    }
}
