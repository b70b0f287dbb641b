//! Style spec synthesis
//!
//! Clusters the collected candidates and layers the role heuristics on
//! top: palette roles, type scale hints, section labels, component recipes
//! and layout tokens. Deterministic for a given snapshot and config.

pub mod components;
pub mod layout;
pub mod palette;
pub mod sections;
pub mod typography;

use tracing::debug;

use crate::cluster::{cluster_colors, cluster_number_scale, rank_weighted_strings, ScaleOptions};
use crate::collect::{collect_candidates, CandidateSet};
use crate::config::PipelineConfig;
use crate::normalize::{normalize_color, to_hex_with_alpha};
use crate::snapshot::{ExtractionSnapshot, Viewport};
use crate::style_spec::{Layout, StyleSpec, TokenScales, Vision};
use crate::vision::build_vision_notes;

pub use components::{build_component_recipe, build_component_recipes};
pub use layout::{grid_patterns, section_spacing, select_container_width};
pub use palette::{build_palette, pick_palette_roles, usage_hint};
pub use sections::{build_sections, infer_section_label};
pub use typography::{build_type_scale, build_typography, role_hint_from_rank};

const SHADOW_LIMIT: usize = 8;
const EFFECT_LIMIT: usize = 10;

/// Everything needed to synthesize one style spec.
#[derive(Debug, Clone, Copy)]
pub struct StyleSpecInput<'a> {
    pub url: &'a str,
    pub snapshot: &'a ExtractionSnapshot,
    /// Screenshot colors, any CSS color syntax
    pub dominant_colors: &'a [String],
    /// Screenshot size, when one was taken
    pub screenshot: Option<Viewport>,
}

/// Build the style spec for a snapshot.
pub fn build_style_spec(input: &StyleSpecInput<'_>, config: &PipelineConfig) -> StyleSpec {
    let candidates = collect_candidates(input.snapshot, &config.weights);
    build_style_spec_from_candidates(input, &candidates, config)
}

/// Same as [`build_style_spec`] with candidates already collected.
pub fn build_style_spec_from_candidates(
    input: &StyleSpecInput<'_>,
    candidates: &CandidateSet,
    config: &PipelineConfig,
) -> StyleSpec {
    let snapshot = input.snapshot;
    let settings = &config.clustering;

    let palette = build_palette(&cluster_colors(
        &candidates.colors,
        settings.color_distance,
        settings.color_limit,
    ));

    let tokens = TokenScales {
        spacing_px: cluster_number_scale(
            &candidates.spacing,
            ScaleOptions::new(settings.spacing_tolerance).limit(settings.spacing_limit),
        ),
        radius_px: cluster_number_scale(
            &candidates.radii,
            ScaleOptions::new(settings.radius_tolerance).limit(settings.radius_limit),
        ),
        shadows: rank_weighted_strings(&candidates.shadows, Some(SHADOW_LIMIT), 0.0),
        effects: rank_weighted_strings(&candidates.effects, Some(EFFECT_LIMIT), 0.0),
    };

    let layout = Layout {
        container_width: select_container_width(
            candidates,
            snapshot.viewport.width,
            settings.container_tolerance,
        ),
        section_vertical_spacing: section_spacing(&snapshot.sections),
        grid_patterns: grid_patterns(candidates),
    };

    let mut components = build_component_recipes(snapshot, &config.weights);
    if let Some(card) = components.card.as_mut() {
        if card.shadow.is_none() {
            card.shadow = candidates.best_shadow().cloned();
        }
    }

    let sections = build_sections(snapshot);

    let dominant_colors: Vec<String> = input
        .dominant_colors
        .iter()
        .filter_map(|raw| normalize_color(raw))
        .map(|color| to_hex_with_alpha(&color))
        .collect();
    let mut notes = match input.screenshot {
        Some(shot) => build_vision_notes(shot.width, shot.height, &dominant_colors),
        None => Vec::new(),
    };
    notes.push(format!(
        "Captured {} visible nodes ({} prominent).",
        snapshot.nodes.len(),
        snapshot.prominent_nodes.len()
    ));
    notes.push(format!("Detected {} structural sections.", sections.len()));

    let spec = StyleSpec {
        url: input.url.to_string(),
        viewport: snapshot.viewport,
        palette,
        typography: build_typography(candidates, settings),
        tokens,
        layout,
        components,
        sections,
        css_vars: (!snapshot.root_css_vars.is_empty()).then(|| snapshot.root_css_vars.clone()),
        vision: Some(Vision { dominant_colors, notes }),
    };

    debug!(
        url = %spec.url,
        colors = spec.palette.colors.len(),
        type_scale = spec.typography.scale.len(),
        sections = spec.sections.len(),
        "Synthesized style spec"
    );
    spec
}
