//! Candidate collection
//!
//! One pass over the snapshot nodes in document order. Every style value
//! that normalizes cleanly becomes a [`Weighted`] candidate in its
//! category. Order matters: the clusterers are online and their output
//! depends on insertion order.

use std::collections::HashSet;

use crate::normalize::{
    normalize_effect, normalize_font_family, normalize_font_weight,
    normalize_shadow, parse_leading_float, parse_px_list, parse_px_value, to_hex_with_alpha,
    visible_color, NormalizedShadow,
};
use crate::snapshot::{CapturedNode, ExtractionSnapshot};
use crate::weight::WeightModel;

/// Widths at or below this are icons and glyphs, not layout.
const MIN_LAYOUT_WIDTH_PX: f64 = 40.0;

pub const COLOR_KEYS: [&str; 7] = [
    "color",
    "backgroundColor",
    "borderColor",
    "borderTopColor",
    "borderRightColor",
    "borderBottomColor",
    "borderLeftColor",
];

pub const SPACING_KEYS: [&str; 5] = ["margin", "padding", "gap", "rowGap", "columnGap"];

pub const RADIUS_KEYS: [&str; 5] = [
    "borderRadius",
    "borderTopLeftRadius",
    "borderTopRightRadius",
    "borderBottomLeftRadius",
    "borderBottomRightRadius",
];

const EFFECT_KEYS: [&str; 3] = ["filter", "backdropFilter", "backgroundImage"];

/// A value with its salience weight and, optionally, the style property
/// it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Weighted<T> {
    pub value: T,
    pub weight: f64,
    pub source: Option<&'static str>,
}

impl<T> Weighted<T> {
    pub fn new(value: T, weight: f64) -> Self {
        Self { value, weight, source: None }
    }

    pub fn from_source(value: T, weight: f64, source: &'static str) -> Self {
        Self { value, weight, source: Some(source) }
    }
}

/// Weighted candidates per token category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateSet {
    /// `#rrggbb` or `#rrggbbaa`
    pub colors: Vec<Weighted<String>>,
    pub font_families: Vec<Weighted<String>>,
    pub font_sizes: Vec<Weighted<f64>>,
    pub font_weights: Vec<Weighted<f64>>,
    pub line_heights_px: Vec<Weighted<f64>>,
    /// Multipliers such as `1.5`, never converted to px
    pub line_heights_unitless: Vec<Weighted<f64>>,
    pub letter_spacing: Vec<Weighted<f64>>,
    pub spacing: Vec<Weighted<f64>>,
    pub radii: Vec<Weighted<f64>>,
    /// Raw `box-shadow` strings
    pub shadows: Vec<Weighted<String>>,
    /// First parsed layer of each shadow string
    pub shadow_objects: Vec<Weighted<NormalizedShadow>>,
    pub effects: Vec<Weighted<String>>,
    pub widths: Vec<Weighted<f64>>,
    pub max_widths: Vec<Weighted<f64>>,
    /// `grid:<template-columns>` and `flex:<direction>`
    pub grid_patterns: Vec<Weighted<String>>,
}

impl CandidateSet {
    /// Highest-weight structured shadow. Ties keep the earliest.
    pub fn best_shadow(&self) -> Option<&NormalizedShadow> {
        let mut best: Option<&Weighted<NormalizedShadow>> = None;
        for item in &self.shadow_objects {
            if best.map_or(true, |current| item.weight > current.weight) {
                best = Some(item);
            }
        }
        best.map(|item| &item.value)
    }

    /// Total number of candidates across all categories.
    pub fn len(&self) -> usize {
        self.colors.len()
            + self.font_families.len()
            + self.font_sizes.len()
            + self.font_weights.len()
            + self.line_heights_px.len()
            + self.line_heights_unitless.len()
            + self.letter_spacing.len()
            + self.spacing.len()
            + self.radii.len()
            + self.shadows.len()
            + self.shadow_objects.len()
            + self.effects.len()
            + self.widths.len()
            + self.max_widths.len()
            + self.grid_patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push_node(&mut self, node: &CapturedNode, weight: f64, model: &WeightModel) {
        for key in COLOR_KEYS {
            if let Some(color) = visible_color(node.style(key)) {
                self.colors
                    .push(Weighted::from_source(to_hex_with_alpha(&color), weight, key));
            }
        }

        if let Some(family) = normalize_font_family(node.style("fontFamily")) {
            self.font_families.push(Weighted::new(family, weight));
        }
        if let Some(size) = parse_px_value(node.style("fontSize")) {
            self.font_sizes.push(Weighted::new(size, weight));
        }
        if let Some(font_weight) = normalize_font_weight(node.style("fontWeight")) {
            self.font_weights.push(Weighted::new(f64::from(font_weight), weight));
        }

        let line_height = node.style("lineHeight").trim();
        if line_height.ends_with("px") {
            if let Some(px) = parse_px_value(line_height) {
                self.line_heights_px.push(Weighted::new(px, weight));
            }
        } else if let Some(multiplier) = parse_leading_float(line_height).filter(|v| *v > 0.0) {
            self.line_heights_unitless.push(Weighted::new(multiplier, weight));
        }

        if let Some(letter) = parse_px_value(node.style("letterSpacing")) {
            self.letter_spacing.push(Weighted::new(letter, weight));
        }

        for key in SPACING_KEYS {
            for value in parse_px_list(node.style(key)) {
                self.spacing.push(Weighted::from_source(value, weight, key));
            }
        }
        for key in RADIUS_KEYS {
            for value in parse_px_list(node.style(key)) {
                self.radii.push(Weighted::from_source(value, weight, key));
            }
        }

        if let Some(shadow) = normalize_effect(node.style("boxShadow")) {
            self.shadows.push(Weighted::new(shadow.to_string(), weight));
            if let Some(first) = normalize_shadow(shadow).into_iter().next() {
                self.shadow_objects.push(Weighted::new(first, weight));
            }
        }

        for key in EFFECT_KEYS {
            if let Some(effect) = normalize_effect(node.style(key)) {
                self.effects
                    .push(Weighted::from_source(effect.to_string(), weight, key));
            }
        }

        if let Some(width) = parse_px_value(node.style("width")).filter(|w| *w > MIN_LAYOUT_WIDTH_PX) {
            self.widths.push(Weighted::new(width, weight));
        }
        if let Some(max) = parse_px_value(node.style("maxWidth")).filter(|w| *w > MIN_LAYOUT_WIDTH_PX) {
            self.max_widths.push(Weighted::new(max, weight));
        }

        let display = node.style("display").trim().to_ascii_lowercase();
        if display == "grid" {
            let columns = node.style("gridTemplateColumns").trim();
            if !columns.is_empty() && columns != "none" {
                self.grid_patterns
                    .push(Weighted::new(format!("grid:{columns}"), weight));
            }
        }
        if display.contains("flex") {
            let direction = match node.style("flexDirection").trim() {
                "" => "row",
                other => other,
            };
            self.grid_patterns.push(Weighted::new(
                format!("flex:{direction}"),
                weight * model.flex_pattern_factor,
            ));
        }
    }
}

/// Walk every node once and gather weighted candidates.
pub fn collect_candidates(snapshot: &ExtractionSnapshot, model: &WeightModel) -> CandidateSet {
    let prominent: HashSet<&str> = snapshot
        .prominent_nodes
        .iter()
        .map(|node| node.selector.as_str())
        .collect();

    let mut set = CandidateSet::default();
    for node in &snapshot.nodes {
        let is_prominent = prominent.contains(node.selector.as_str());
        let weight = model.candidate_weight(node, snapshot.viewport, is_prominent);
        set.push_node(node, weight, model);
    }

    tracing::debug!(
        nodes = snapshot.nodes.len(),
        prominent = prominent.len(),
        candidates = set.len(),
        "Collected style candidates"
    );
    set
}
