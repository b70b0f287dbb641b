//! Component recipes
//!
//! Each target component is the heaviest node matching a structural
//! predicate. Its computed styles are read back into a [`ComponentRecipe`].
//! Only fields that parse cleanly are filled in.

use regex::Regex;
use std::sync::LazyLock;

use crate::normalize::{
    normalize_effect, normalize_font_family, normalize_font_weight, normalize_shadow,
    parse_px_list, parse_px_value, round_to, to_hex_with_alpha, visible_color,
};
use crate::snapshot::{CapturedNode, ExtractionSnapshot};
use crate::style_spec::{ComponentRecipe, Components};
use crate::weight::WeightModel;

static BUTTON_SELECTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(btn|button|cta)\b").expect("valid button pattern"));

const RADIUS_SOURCES: [&str; 5] = [
    "borderTopLeftRadius",
    "borderTopRightRadius",
    "borderBottomLeftRadius",
    "borderBottomRightRadius",
    "borderRadius",
];

fn is_button_like(node: &CapturedNode) -> bool {
    node.tag_is("button") || node.role_is("button") || BUTTON_SELECTOR.is_match(&node.selector)
}

fn has_background(node: &CapturedNode) -> bool {
    visible_color(node.style("backgroundColor")).is_some()
}

fn is_primary_button(node: &CapturedNode) -> bool {
    is_button_like(node) && has_background(node)
}

fn is_secondary_button(node: &CapturedNode) -> bool {
    is_button_like(node) && !has_background(node) && visible_color(node.style("borderColor")).is_some()
}

fn is_card(node: &CapturedNode) -> bool {
    if node.bounds.width < 140.0 || node.bounds.height < 100.0 {
        return false;
    }
    let has_radius = parse_px_list(node.style("borderRadius"))
        .into_iter()
        .any(|value| value > 2.0);
    let has_shadow = normalize_effect(node.style("boxShadow")).is_some();
    has_background(node) && (has_radius || has_shadow)
}

fn is_input(node: &CapturedNode) -> bool {
    ["input", "textarea", "select"].iter().any(|tag| node.tag_is(tag))
}

fn is_link(node: &CapturedNode) -> bool {
    node.tag_is("a") && !node.text.trim().is_empty()
}

/// Heaviest node matching `predicate`; the first in document order wins a tie.
fn pick_heaviest<'a>(
    snapshot: &'a ExtractionSnapshot,
    model: &WeightModel,
    predicate: impl Fn(&CapturedNode) -> bool,
) -> Option<&'a CapturedNode> {
    let mut best: Option<(&CapturedNode, f64)> = None;
    for node in &snapshot.nodes {
        if !predicate(node) {
            continue;
        }
        let weight = model.node_weight(node, snapshot.viewport);
        if best.map_or(true, |(_, current)| weight > current) {
            best = Some((node, weight));
        }
    }
    best.map(|(node, _)| node)
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Read a recipe back from one node's computed styles.
///
/// Padding: one value applies to both axes, otherwise the first value is
/// vertical and the second horizontal. Three and four value shorthands are
/// not resolved per side.
pub fn build_component_recipe(node: &CapturedNode, kind: &str) -> ComponentRecipe {
    let radius_values: Vec<f64> = RADIUS_SOURCES
        .iter()
        .flat_map(|key| parse_px_list(node.style(key)))
        .collect();
    let radius_px = (!radius_values.is_empty()).then(|| {
        round_to(radius_values.iter().sum::<f64>() / radius_values.len() as f64, 2)
    });

    let padding = parse_px_list(node.style("padding"));
    let (padding_y, padding_x) = match padding.as_slice() {
        [] => (None, None),
        [all] => (Some(*all), Some(*all)),
        [vertical, horizontal, ..] => (Some(*vertical), Some(*horizontal)),
    };

    let border_color = visible_color(node.style("borderTopColor"))
        .or_else(|| visible_color(node.style("borderColor")));
    let border_width = parse_px_value(node.style("borderTopWidth"))
        .or_else(|| parse_px_list(node.style("border")).first().copied());

    let mut notes = Vec::new();
    for (property, key) in [
        ("text-transform", "textTransform"),
        ("text-decoration", "textDecorationLine"),
    ] {
        let value = node.style(key).trim();
        if !value.is_empty() && value != "none" {
            notes.push(format!("{property}: {value}"));
        }
    }

    ComponentRecipe {
        selector: node.selector.clone(),
        kind: kind.to_string(),
        text_preview: non_empty(&node.text),
        background_color: visible_color(node.style("backgroundColor")).map(|c| to_hex_with_alpha(&c)),
        text_color: visible_color(node.style("color")).map(|c| to_hex_with_alpha(&c)),
        border_color: border_color.map(|c| to_hex_with_alpha(&c)),
        border_width_px: border_width.map(|w| round_to(w, 2)),
        border_style: non_empty(node.style("borderTopStyle")),
        radius_px,
        padding_x_px: padding_x.map(|p| round_to(p, 2)),
        padding_y_px: padding_y.map(|p| round_to(p, 2)),
        font_family: normalize_font_family(node.style("fontFamily")),
        font_size_px: parse_px_value(node.style("fontSize")).map(|s| round_to(s, 2)),
        font_weight: normalize_font_weight(node.style("fontWeight")),
        shadow: normalize_shadow(node.style("boxShadow")).into_iter().next(),
        notes: (!notes.is_empty()).then_some(notes),
    }
}

pub fn build_component_recipes(snapshot: &ExtractionSnapshot, model: &WeightModel) -> Components {
    let recipe = |predicate: fn(&CapturedNode) -> bool, kind: &str| {
        pick_heaviest(snapshot, model, predicate).map(|node| build_component_recipe(node, kind))
    };

    Components {
        primary_button: recipe(is_primary_button, "primary_button"),
        secondary_button: recipe(is_secondary_button, "secondary_button"),
        card: recipe(is_card, "card"),
        input: recipe(is_input, "input"),
        link: recipe(is_link, "link"),
    }
}
