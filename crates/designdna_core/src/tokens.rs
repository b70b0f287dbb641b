//! Semantic token document
//!
//! Flattened, versioned view of a [`StyleSpec`] for prompt compilers and
//! other downstream consumers. Every array is deduplicated and numeric
//! arrays are ascending, so the same spec always produces the same bytes.
//! The only moving part is `generated_at`, which stays unset until
//! [`SemanticTokensJson::stamped`] is called.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TokenDocumentError;
use crate::style_spec::{ComponentRecipe, PaletteRoles, SectionEntry, StyleSpec};

/// The only document version this crate reads or writes.
pub const SCHEMA_VERSION: &str = "1.0";

pub const DEFAULT_NOTES: [&str; 2] = [
    "Generated from deterministic extraction and normalization pipeline.",
    "Use as a design reference, not a verbatim copy of proprietary branding/content.",
];

pub const DEFAULT_ASSUMPTIONS: [&str; 2] = [
    "Spacing and layout constraints prioritize visible rendered output.",
    "Interactive states are inferred best-effort from computed styles.",
];

pub const FALLBACK_ASSUMPTION: &str = "Fallback was used because style_spec was not available.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticTokensJson {
    pub schema_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    pub source_url: String,
    pub design_prompt: String,
    pub tokens: TokenGroups,
    pub components: ComponentTokens,
    pub sections: Vec<SectionTokens>,
    pub notes: Vec<String>,
    pub assumptions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenGroups {
    pub color: ColorTokens,
    pub typography: TypographyTokens,
    pub spacing: Vec<f64>,
    pub radius: Vec<f64>,
    pub shadow: Vec<String>,
    pub effects: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorTokens {
    pub palette: Vec<String>,
    pub roles: PaletteRoles,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypographyTokens {
    pub families: Vec<String>,
    pub scale: Vec<f64>,
    pub weights: Vec<u32>,
    pub line_heights: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentTokens {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_button: Option<ComponentRecipe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_button: Option<ComponentRecipe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<ComponentRecipe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<ComponentRecipe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<ComponentRecipe>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionTokens {
    pub label: String,
    pub selector: String,
    pub width: i64,
    pub height: i64,
}

impl From<&SectionEntry> for SectionTokens {
    fn from(section: &SectionEntry) -> Self {
        Self {
            label: section.label.clone(),
            selector: section.selector.clone(),
            width: crate::normalize::round_to(section.bounds.width, 0) as i64,
            height: crate::normalize::round_to(section.bounds.height, 0) as i64,
        }
    }
}

/// Finite values, first occurrence kept, ascending.
pub(crate) fn unique_sorted(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut out: Vec<f64> = Vec::new();
    for value in values {
        if value.is_finite() && !out.contains(&value) {
            out.push(value);
        }
    }
    out.sort_by(f64::total_cmp);
    out
}

pub(crate) fn unique_strings<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !out.iter().any(|existing| existing == value) {
            out.push(value.to_string());
        }
    }
    out
}

impl SemanticTokensJson {
    /// Flatten a style spec. `generated_at` is left unset.
    pub fn from_style_spec(spec: &StyleSpec, design_prompt: &str) -> Self {
        let typography = &spec.typography;
        let mut weights: Vec<u32> = Vec::new();
        for weight in &typography.weights {
            if !weights.contains(weight) {
                weights.push(*weight);
            }
        }
        weights.sort_unstable();

        let tokens = TokenGroups {
            color: ColorTokens {
                palette: unique_strings(spec.palette.colors.iter().map(|c| c.hex.as_str())),
                roles: spec.palette.roles.clone(),
            },
            typography: TypographyTokens {
                families: unique_strings(
                    [&typography.primary_family, &typography.secondary_family]
                        .into_iter()
                        .flatten()
                        .map(String::as_str),
                ),
                scale: unique_sorted(typography.scale.iter().map(|entry| entry.px)),
                weights,
                line_heights: unique_sorted(typography.line_heights.iter().map(|lh| lh.value)),
            },
            spacing: unique_sorted(spec.tokens.spacing_px.iter().map(|item| item.value)),
            radius: unique_sorted(spec.tokens.radius_px.iter().map(|item| item.value)),
            shadow: unique_strings(spec.tokens.shadows.iter().map(|item| item.value.as_str())),
            effects: unique_strings(spec.tokens.effects.iter().map(|item| item.value.as_str())),
        };

        let components = ComponentTokens {
            primary_button: spec.components.primary_button.clone(),
            secondary_button: spec.components.secondary_button.clone(),
            card: spec.components.card.clone(),
            input: spec.components.input.clone(),
            link: spec.components.link.clone(),
        };

        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            generated_at: None,
            source_url: spec.url.clone(),
            design_prompt: design_prompt.to_string(),
            tokens,
            components,
            sections: spec.sections.iter().map(SectionTokens::from).collect(),
            notes: DEFAULT_NOTES.iter().map(|s| s.to_string()).collect(),
            assumptions: DEFAULT_ASSUMPTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Copy with `generated_at` set to `now` (RFC 3339, UTC, millis).
    pub fn stamped(mut self, now: DateTime<Utc>) -> Self {
        self.generated_at = Some(now.to_rfc3339_opts(SecondsFormat::Millis, true));
        self
    }
}

/// Parse a token document, refusing any version other than [`SCHEMA_VERSION`].
pub fn parse_tokens_document(json: &str) -> Result<SemanticTokensJson, TokenDocumentError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let found = value
        .get("schema_version")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    if found != SCHEMA_VERSION {
        return Err(TokenDocumentError::UnsupportedVersion {
            found: found.to_string(),
            expected: SCHEMA_VERSION,
        });
    }
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::WeightedValue;
    use crate::snapshot::{Bounds, Viewport};
    use crate::style_spec::*;
    use chrono::TimeZone;

    fn spec() -> StyleSpec {
        let wv = |value: f64| WeightedValue { value, weight: 1.0 };
        StyleSpec {
            url: "https://example.com".into(),
            viewport: Viewport { width: 1440.0, height: 900.0 },
            palette: Palette {
                colors: vec![PaletteColor {
                    hex: "#2563eb".into(),
                    usage_hint: "primary".into(),
                    weight: 3.0,
                }],
                roles: PaletteRoles { primary: Some("#2563eb".into()), ..Default::default() },
            },
            typography: Typography {
                primary_family: Some("inter".into()),
                secondary_family: None,
                scale: vec![
                    TypeScaleEntry { px: 48.0, role_hint: "h1".into(), weight: 1.0 },
                    TypeScaleEntry { px: 16.0, role_hint: "h2".into(), weight: 1.0 },
                ],
                weights: vec![700, 400, 700],
                line_heights: vec![
                    LineHeight { value: 24.0, unit: LineHeightUnit::Px },
                    LineHeight { value: 1.5, unit: LineHeightUnit::Number },
                ],
                letter_spacing: None,
            },
            tokens: TokenScales {
                spacing_px: vec![wv(16.0), wv(8.0), wv(16.0)],
                radius_px: vec![wv(8.0)],
                shadows: vec![WeightedValue { value: "0px 1px 2px #000".into(), weight: 1.0 }],
                effects: vec![],
            },
            layout: Layout::default(),
            components: Components {
                primary_button: Some(ComponentRecipe {
                    selector: "button.cta".into(),
                    kind: "primary_button".into(),
                    ..Default::default()
                }),
                ..Default::default()
            },
            sections: vec![SectionEntry {
                label: "Hero".into(),
                selector: "section.hero".into(),
                bounds: Bounds { x: 0.0, y: 0.0, width: 1439.6, height: 640.4 },
            }],
            css_vars: None,
            vision: None,
        }
    }

    #[test]
    fn test_flattening() {
        let doc = SemanticTokensJson::from_style_spec(&spec(), "prompt");
        assert_eq!(doc.schema_version, "1.0");
        assert_eq!(doc.generated_at, None);
        assert_eq!(doc.tokens.color.palette, vec!["#2563eb"]);
        assert_eq!(doc.tokens.typography.families, vec!["inter"]);
        assert_eq!(doc.tokens.typography.scale, vec![16.0, 48.0]);
        assert_eq!(doc.tokens.typography.weights, vec![400, 700]);
        assert_eq!(doc.tokens.typography.line_heights, vec![1.5, 24.0]);
        assert_eq!(doc.tokens.spacing, vec![8.0, 16.0]);
        assert_eq!(doc.sections[0].width, 1440);
        assert_eq!(doc.sections[0].height, 640);
        assert_eq!(doc.components.primary_button.as_ref().unwrap().kind, "primary_button");
        assert_eq!(doc.assumptions.len(), 2);
    }

    #[test]
    fn test_json_keys_are_snake_case() {
        let doc = SemanticTokensJson::from_style_spec(&spec(), "prompt");
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json["components"].get("primary_button").is_some());
        assert!(json["tokens"]["typography"].get("line_heights").is_some());
        assert!(json.get("generated_at").is_none());
        // roles keep the style spec naming
        assert_eq!(json["tokens"]["color"]["roles"]["primary"], "#2563eb");
    }

    #[test]
    fn test_reproducible_bytes() {
        let a = serde_json::to_string(&SemanticTokensJson::from_style_spec(&spec(), "p")).unwrap();
        let b = serde_json::to_string(&SemanticTokensJson::from_style_spec(&spec(), "p")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_stamped() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let doc = SemanticTokensJson::from_style_spec(&spec(), "p").stamped(now);
        assert_eq!(doc.generated_at.as_deref(), Some("2024-05-01T12:00:00.000Z"));
    }

    #[test]
    fn test_parse_roundtrip_and_version_check() {
        let doc = SemanticTokensJson::from_style_spec(&spec(), "p");
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(parse_tokens_document(&json).unwrap(), doc);

        let old = json.replace("\"schema_version\":\"1.0\"", "\"schema_version\":\"0.9\"");
        match parse_tokens_document(&old) {
            Err(TokenDocumentError::UnsupportedVersion { found, .. }) => assert_eq!(found, "0.9"),
            other => panic!("unexpected: {other:?}"),
        }

        assert!(matches!(
            parse_tokens_document("{"),
            Err(TokenDocumentError::Serialization(_))
        ));
    }

    #[test]
    fn test_unique_sorted_drops_non_finite() {
        assert_eq!(unique_sorted([3.0, f64::NAN, 1.0, 3.0]), vec![1.0, 3.0]);
    }
}
