//! Configuration for the synthesis pipeline
//!
//! All tunables are passed explicitly to [`crate::StylePipeline::new`].
//! Every field has a serde default, so an empty TOML file reproduces the
//! stock behaviour.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::weight::WeightModel;

/// Main configuration for the pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Input contract bounds
    #[serde(default)]
    pub limits: SnapshotLimits,

    /// Salience multipliers
    #[serde(default)]
    pub weights: WeightModel,

    /// Clustering tolerances and output caps
    #[serde(default)]
    pub clustering: ClusterSettings,
}

impl PipelineConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Bounds a capture must respect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotLimits {
    #[serde(default = "default_max_nodes")]
    pub max_nodes: usize,
    #[serde(default = "default_max_prominent")]
    pub max_prominent: usize,
    #[serde(default = "default_max_root_vars")]
    pub max_root_vars: usize,
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,
    #[serde(default = "default_max_section_children")]
    pub max_section_children: usize,
}

fn default_max_nodes() -> usize {
    1200
}

fn default_max_prominent() -> usize {
    40
}

fn default_max_root_vars() -> usize {
    200
}

fn default_max_text_chars() -> usize {
    120
}

fn default_max_section_children() -> usize {
    12
}

impl Default for SnapshotLimits {
    fn default() -> Self {
        Self {
            max_nodes: default_max_nodes(),
            max_prominent: default_max_prominent(),
            max_root_vars: default_max_root_vars(),
            max_text_chars: default_max_text_chars(),
            max_section_children: default_max_section_children(),
        }
    }
}

/// Tolerances and caps for each token category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterSettings {
    /// RGB distance under which two colors merge
    #[serde(default = "default_color_distance")]
    pub color_distance: f64,
    #[serde(default = "default_color_limit")]
    pub color_limit: usize,

    #[serde(default = "default_one")]
    pub font_size_tolerance: f64,
    #[serde(default = "default_type_scale_limit")]
    pub type_scale_limit: usize,

    #[serde(default = "default_font_weight_tolerance")]
    pub font_weight_tolerance: f64,

    #[serde(default = "default_one")]
    pub line_height_px_tolerance: f64,
    #[serde(default = "default_line_height_px_limit")]
    pub line_height_px_limit: usize,
    #[serde(default = "default_line_height_unitless_tolerance")]
    pub line_height_unitless_tolerance: f64,
    #[serde(default = "default_six")]
    pub line_height_unitless_limit: usize,

    #[serde(default = "default_letter_spacing_tolerance")]
    pub letter_spacing_tolerance: f64,
    #[serde(default = "default_six")]
    pub letter_spacing_limit: usize,

    #[serde(default = "default_one")]
    pub spacing_tolerance: f64,
    #[serde(default = "default_spacing_limit")]
    pub spacing_limit: usize,

    #[serde(default = "default_one")]
    pub radius_tolerance: f64,
    #[serde(default = "default_radius_limit")]
    pub radius_limit: usize,

    /// Tolerance used when picking the container width
    #[serde(default = "default_container_tolerance")]
    pub container_tolerance: f64,
}

fn default_color_distance() -> f64 {
    12.0
}

fn default_color_limit() -> usize {
    12
}

fn default_one() -> f64 {
    1.0
}

fn default_six() -> usize {
    6
}

fn default_type_scale_limit() -> usize {
    10
}

fn default_font_weight_tolerance() -> f64 {
    50.0
}

fn default_line_height_px_limit() -> usize {
    8
}

fn default_line_height_unitless_tolerance() -> f64 {
    0.05
}

fn default_letter_spacing_tolerance() -> f64 {
    0.5
}

fn default_spacing_limit() -> usize {
    16
}

fn default_radius_limit() -> usize {
    12
}

fn default_container_tolerance() -> f64 {
    8.0
}

impl Default for ClusterSettings {
    fn default() -> Self {
        Self {
            color_distance: default_color_distance(),
            color_limit: default_color_limit(),
            font_size_tolerance: default_one(),
            type_scale_limit: default_type_scale_limit(),
            font_weight_tolerance: default_font_weight_tolerance(),
            line_height_px_tolerance: default_one(),
            line_height_px_limit: default_line_height_px_limit(),
            line_height_unitless_tolerance: default_line_height_unitless_tolerance(),
            line_height_unitless_limit: default_six(),
            letter_spacing_tolerance: default_letter_spacing_tolerance(),
            letter_spacing_limit: default_six(),
            spacing_tolerance: default_one(),
            spacing_limit: default_spacing_limit(),
            radius_tolerance: default_one(),
            radius_limit: default_radius_limit(),
            container_tolerance: default_container_tolerance(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_matches_defaults() {
        let config = PipelineConfig::from_toml("").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.limits.max_nodes, 1200);
        assert_eq!(config.limits.max_prominent, 40);
        assert_eq!(config.clustering.color_distance, 12.0);
        assert_eq!(config.clustering.type_scale_limit, 10);
    }

    #[test]
    fn test_partial_override() {
        let config = PipelineConfig::from_toml(
            r#"
            [clustering]
            color_distance = 20.0
            spacing_limit = 4

            [weights]
            prominent_boost = 2.0
            "#,
        )
        .unwrap();

        assert_eq!(config.clustering.color_distance, 20.0);
        assert_eq!(config.clustering.spacing_limit, 4);
        // Untouched fields keep their defaults
        assert_eq!(config.clustering.radius_limit, 12);
        assert_eq!(config.weights.prominent_boost, 2.0);
        assert_eq!(config.weights.fold_boost, 1.25);
    }

    #[test]
    fn test_config_roundtrip_through_toml() {
        let config = PipelineConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = PipelineConfig::from_toml(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.toml");
        std::fs::write(&path, "[limits]\nmax_nodes = 10\n").unwrap();

        let config = PipelineConfig::load(&path).unwrap();
        assert_eq!(config.limits.max_nodes, 10);
        assert_eq!(config.limits.max_prominent, 40);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = PipelineConfig::from_toml("[limits]\nmax_nodes = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
