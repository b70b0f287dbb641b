//! The style spec: structured design description of one captured page
//!
//! Top-level keys are camelCase. Component recipes use snake_case because
//! they are copied verbatim into the semantic token document. Optional
//! fields are left out of the JSON when unknown, never written as `null`
//! or `0`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::cluster::WeightedValue;
use crate::normalize::NormalizedShadow;
use crate::snapshot::{Bounds, Viewport};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSpec {
    pub url: String,
    pub viewport: Viewport,
    pub palette: Palette,
    pub typography: Typography,
    pub tokens: TokenScales,
    pub layout: Layout,
    pub components: Components,
    pub sections: Vec<SectionEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_vars: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vision: Option<Vision>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub colors: Vec<PaletteColor>,
    pub roles: PaletteRoles,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteColor {
    pub hex: String,
    /// Comma-separated role names, or a luminance-based fallback
    pub usage_hint: String,
    pub weight: f64,
}

/// Semantic color assignments. Several roles may share one hex.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteRoles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_primary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_secondary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
}

impl PaletteRoles {
    /// `(camelCase name, value)` pairs in declaration order.
    pub fn entries(&self) -> [(&'static str, Option<&str>); 8] {
        [
            ("primary", self.primary.as_deref()),
            ("secondary", self.secondary.as_deref()),
            ("background", self.background.as_deref()),
            ("surface", self.surface.as_deref()),
            ("textPrimary", self.text_primary.as_deref()),
            ("textSecondary", self.text_secondary.as_deref()),
            ("border", self.border.as_deref()),
            ("accent", self.accent.as_deref()),
        ]
    }

    /// Names of every role assigned to `hex`.
    pub fn roles_for(&self, hex: &str) -> Vec<&'static str> {
        self.entries()
            .into_iter()
            .filter(|(_, value)| *value == Some(hex))
            .map(|(name, _)| name)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().iter().all(|(_, value)| value.is_none())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_family: Option<String>,
    /// Largest first
    pub scale: Vec<TypeScaleEntry>,
    pub weights: Vec<u32>,
    pub line_heights: Vec<LineHeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<Vec<LetterSpacing>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeScaleEntry {
    pub px: f64,
    pub role_hint: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineHeightUnit {
    Px,
    /// Unitless multiplier
    Number,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineHeight {
    pub value: f64,
    pub unit: LineHeightUnit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetterSpacing {
    pub px: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenScales {
    pub spacing_px: Vec<WeightedValue<f64>>,
    pub radius_px: Vec<WeightedValue<f64>>,
    pub shadows: Vec<WeightedValue<String>>,
    pub effects: Vec<WeightedValue<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_width: Option<f64>,
    /// Distinct gaps between consecutive sections, ascending
    #[serde(default)]
    pub section_vertical_spacing: Vec<f64>,
    #[serde(default)]
    pub grid_patterns: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
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

impl Components {
    /// `(display name, recipe)` pairs in a fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<&ComponentRecipe>)> {
        [
            ("Primary button", self.primary_button.as_ref()),
            ("Secondary button", self.secondary_button.as_ref()),
            ("Card", self.card.as_ref()),
            ("Input", self.input.as_ref()),
            ("Link", self.link.as_ref()),
        ]
        .into_iter()
    }
}

/// How to rebuild one UI component. Absent fields mean "unknown".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecipe {
    pub selector: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_preview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width_px: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_px: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_x_px: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_y_px: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size_px: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<NormalizedShadow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionEntry {
    pub label: String,
    pub selector: String,
    pub bounds: Bounds,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vision {
    pub dominant_colors: Vec<String>,
    pub notes: Vec<String>,
}
