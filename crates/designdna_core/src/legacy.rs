//! Frequency-table fallback
//!
//! Unweighted value/count tables over the whole snapshot. They predate
//! the weighted pipeline and still back a token document when no style
//! spec is available. Fidelity is lower: counts replace salience weights
//! and nothing is clustered.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::cluster::WeightedValue;
use crate::collect::{COLOR_KEYS, RADIUS_KEYS, SPACING_KEYS};
use crate::normalize::{
    normalize_font_family, normalize_font_weight, parse_leading_float, parse_px_list,
    parse_px_value, round_to, to_hex_with_alpha, visible_color,
};
use crate::snapshot::ExtractionSnapshot;
use crate::style_spec::SectionEntry;
use crate::synth::pick_palette_roles;
use crate::tokens::{
    unique_sorted, unique_strings, ColorTokens, ComponentTokens, SemanticTokensJson,
    SectionTokens, TokenGroups, TypographyTokens, DEFAULT_ASSUMPTIONS, DEFAULT_NOTES,
    FALLBACK_ASSUMPTION, SCHEMA_VERSION,
};

const LEGACY_PALETTE_LIMIT: usize = 12;
const LEGACY_FAMILY_LIMIT: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenFrequency {
    pub value: String,
    pub count: usize,
}

/// Count non-empty values, skipping `none` and `normal`. Most frequent
/// first, ties in first-seen order.
pub fn count_values<I, S>(values: I) -> Vec<TokenFrequency>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<TokenFrequency> = Vec::new();

    for value in values {
        let normalized = value.as_ref().trim();
        if normalized.is_empty() || normalized == "none" || normalized == "normal" {
            continue;
        }
        match index.get(normalized) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                index.insert(normalized.to_string(), counts.len());
                counts.push(TokenFrequency { value: normalized.to_string(), count: 1 });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

fn px_label(value: f64) -> String {
    format!("{}px", round_to(value, 0))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyTables {
    pub colors: Vec<TokenFrequency>,
    pub families: Vec<TokenFrequency>,
    /// `"<n>px"`
    pub sizes: Vec<TokenFrequency>,
    pub weights: Vec<TokenFrequency>,
    /// `"<n>px"` or a bare multiplier such as `"1.5"`
    pub line_heights: Vec<TokenFrequency>,
    pub spacing: Vec<TokenFrequency>,
    pub radii: Vec<TokenFrequency>,
    pub shadows: Vec<TokenFrequency>,
    /// `"<w>px <style> <color>"`
    pub borders: Vec<TokenFrequency>,
    pub effects: Vec<TokenFrequency>,
}

impl FrequencyTables {
    pub fn from_snapshot(snapshot: &ExtractionSnapshot) -> Self {
        let nodes = &snapshot.nodes;

        let colors = count_values(nodes.iter().flat_map(|node| {
            COLOR_KEYS
                .iter()
                .filter_map(move |key| visible_color(node.style(key)))
                .map(|color| to_hex_with_alpha(&color))
        }));

        let families =
            count_values(nodes.iter().filter_map(|node| normalize_font_family(node.style("fontFamily"))));
        let sizes = count_values(
            nodes
                .iter()
                .filter_map(|node| parse_px_value(node.style("fontSize")))
                .map(px_label),
        );
        let weights = count_values(
            nodes
                .iter()
                .filter_map(|node| normalize_font_weight(node.style("fontWeight")))
                .map(|weight| weight.to_string()),
        );
        let line_heights = count_values(nodes.iter().filter_map(|node| {
            let raw = node.style("lineHeight").trim();
            if raw.ends_with("px") {
                parse_px_value(raw).map(px_label)
            } else {
                parse_leading_float(raw).map(|value| round_to(value, 2).to_string())
            }
        }));

        let spacing = count_values(nodes.iter().flat_map(|node| {
            SPACING_KEYS
                .iter()
                .flat_map(|key| parse_px_list(node.style(key)))
                .map(px_label)
                .collect::<Vec<_>>()
        }));
        let radii = count_values(nodes.iter().flat_map(|node| {
            RADIUS_KEYS
                .iter()
                .flat_map(|key| parse_px_list(node.style(key)))
                .map(px_label)
                .collect::<Vec<_>>()
        }));

        let shadows = count_values(nodes.iter().map(|node| node.style("boxShadow")));
        let effects = count_values(nodes.iter().flat_map(|node| {
            ["filter", "backdropFilter", "backgroundImage"].map(|key| node.style(key))
        }));

        let borders = count_values(nodes.iter().filter_map(|node| {
            let width = parse_px_value(node.style("borderTopWidth")).unwrap_or(0.0);
            let color = visible_color(node.style("borderTopColor"))
                .or_else(|| visible_color(node.style("borderColor")));
            if color.is_none() && width <= 0.0 {
                return None;
            }
            let style = match node.style("borderTopStyle").trim() {
                "" => "solid",
                other => other,
            };
            let color = color
                .map(|c| to_hex_with_alpha(&c))
                .unwrap_or_else(|| "currentColor".to_string());
            Some(format!("{} {style} {color}", px_label(width)))
        }));

        Self {
            colors,
            families,
            sizes,
            weights,
            line_heights,
            spacing,
            radii,
            shadows,
            borders,
            effects,
        }
    }
}

fn parse_numbers(table: &[TokenFrequency]) -> Vec<f64> {
    unique_sorted(table.iter().filter_map(|entry| parse_leading_float(&entry.value)))
}

/// Token document built straight from frequency tables.
pub fn build_legacy_tokens(
    source_url: &str,
    design_prompt: &str,
    tables: &FrequencyTables,
    sections: &[SectionEntry],
) -> SemanticTokensJson {
    let palette: Vec<WeightedValue<String>> = tables
        .colors
        .iter()
        .filter(|entry| entry.value.starts_with('#'))
        .take(LEGACY_PALETTE_LIMIT)
        .map(|entry| WeightedValue { value: entry.value.clone(), weight: entry.count as f64 })
        .collect();
    let roles = pick_palette_roles(&palette);

    let mut weights: Vec<u32> = tables
        .weights
        .iter()
        .filter_map(|entry| entry.value.parse::<u32>().ok())
        .collect();
    weights.sort_unstable();
    weights.dedup();

    let tokens = TokenGroups {
        color: ColorTokens {
            palette: unique_strings(palette.iter().map(|c| c.value.as_str())),
            roles,
        },
        typography: TypographyTokens {
            families: unique_strings(
                tables
                    .families
                    .iter()
                    .take(LEGACY_FAMILY_LIMIT)
                    .map(|entry| entry.value.as_str()),
            ),
            scale: parse_numbers(&tables.sizes),
            weights,
            line_heights: parse_numbers(&tables.line_heights),
        },
        spacing: parse_numbers(&tables.spacing),
        radius: parse_numbers(&tables.radii),
        shadow: unique_strings(tables.shadows.iter().map(|entry| entry.value.as_str())),
        effects: unique_strings(tables.effects.iter().map(|entry| entry.value.as_str())),
    };

    let mut assumptions: Vec<String> = DEFAULT_ASSUMPTIONS.iter().map(|s| s.to_string()).collect();
    assumptions.push(FALLBACK_ASSUMPTION.to_string());

    SemanticTokensJson {
        schema_version: SCHEMA_VERSION.to_string(),
        generated_at: None,
        source_url: source_url.to_string(),
        design_prompt: design_prompt.to_string(),
        tokens,
        components: ComponentTokens::default(),
        sections: sections.iter().map(SectionTokens::from).collect(),
        notes: DEFAULT_NOTES.iter().map(|s| s.to_string()).collect(),
        assumptions,
    }
}
