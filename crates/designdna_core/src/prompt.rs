//! Deterministic design prompt compiler
//!
//! Renders a [`StyleSpec`] into sectioned plain text for a page generator.
//! Values the style spec leaves unset print as placeholders (`n/a`, `inherit`,
//! `none`), never as invented numbers.

use std::fmt::Display;

use crate::cluster::WeightedValue;
use crate::normalize::{round_to, NormalizedShadow};
use crate::style_spec::{ComponentRecipe, StyleSpec};

const NOT_AVAILABLE: &str = "n/a";
const SCALE_PREVIEW: usize = 8;
const VIBE_LIMIT: usize = 4;
/// Red channel above which the primary color reads as bright
const BRIGHT_RED_THRESHOLD: u8 = 160;

const RESPONSIVE_RULES: [&str; 3] = [
    "- At mobile widths, stack multi-column groups into single-column flow while preserving spacing hierarchy.",
    "- Keep tap targets >= 40px height and maintain button/input visual style.",
    "- Keep nav readable on small screens (stack or collapse layout, but keep hierarchy).",
];

const OUTPUT_REQUIREMENTS: [&str; 2] = [
    "- Return one HTML file with semantic structure and one CSS block.",
    "- Keep behavior static (no JavaScript interactions required).",
];

const COMPLIANCE: &str = "Based on the source site's theme; do not copy proprietary branding verbatim.";

/// Compile the full prompt text.
pub fn compile_design_prompt(spec: &StyleSpec) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("Goal:".into());
    lines.push(format!(
        "Create a single-page web interface based on the source site's theme from {}, \
         with semantic HTML and clean CSS output suitable for Stitch generation.",
        spec.url
    ));
    lines.push(String::new());

    lines.push("Vibe:".into());
    lines.push(infer_vibe(spec).join(", "));
    lines.push(String::new());

    lines.push("Page structure (preserve order and hierarchy):".into());
    lines.extend(section_lines(spec));
    lines.push(String::new());

    lines.push("Layout rules:".into());
    lines.extend(layout_lines(spec));
    lines.push(String::new());

    lines.push("Design constraints:".into());
    lines.extend(constraint_lines(spec));
    lines.push(String::new());

    lines.push("Component recipes (follow these values where available):".into());
    for (name, recipe) in spec.components.iter() {
        lines.extend(format_recipe(name, recipe));
    }
    lines.push(String::new());

    lines.push("Responsive rules:".into());
    lines.extend(RESPONSIVE_RULES.iter().map(|rule| rule.to_string()));
    lines.push(String::new());

    lines.push("Output requirements:".into());
    lines.extend(OUTPUT_REQUIREMENTS.iter().map(|rule| rule.to_string()));
    lines.push(String::new());

    lines.push("Compliance:".into());
    lines.push(COMPLIANCE.into());

    lines.join("\n")
}

/// Up to four mood adjectives derived from palette, shadows and type.
pub fn infer_vibe(spec: &StyleSpec) -> Vec<&'static str> {
    let mut adjectives = Vec::new();
    let roles = &spec.palette.roles;

    if let Some(primary) = roles.primary.as_deref().and_then(|hex| hex.strip_prefix('#')) {
        let red = primary.get(..2).and_then(|byte| u8::from_str_radix(byte, 16).ok());
        adjectives.push(match red {
            Some(red) if red > BRIGHT_RED_THRESHOLD => "bright",
            _ => "grounded",
        });
    }

    if let Some(background) = roles.background.as_deref() {
        if background.starts_with("#f") || background.starts_with("#e") {
            adjectives.push("airy");
        } else {
            adjectives.push("high-contrast");
        }
    }

    if spec.tokens.shadows.first().is_some_and(|shadow| shadow.value.contains("blur")) {
        adjectives.push("soft");
    }

    if let Some(family) = &spec.typography.primary_family {
        if family.to_lowercase().contains("serif") {
            adjectives.push("editorial");
        } else {
            adjectives.push("modern");
        }
    }

    if adjectives.is_empty() {
        adjectives.extend(["clean", "modern"]);
    }

    let mut vibe: Vec<&'static str> = Vec::new();
    for adjective in adjectives {
        if !vibe.contains(&adjective) {
            vibe.push(adjective);
        }
    }
    vibe.truncate(VIBE_LIMIT);
    vibe
}

fn section_lines(spec: &StyleSpec) -> Vec<String> {
    if spec.sections.is_empty() {
        return vec!["- Single-page layout with one main section.".into()];
    }
    spec.sections
        .iter()
        .enumerate()
        .map(|(idx, section)| {
            format!(
                "{}. {} ({}) {}x{}",
                idx + 1,
                section.label,
                section.selector,
                round_to(section.bounds.width, 0),
                round_to(section.bounds.height, 0)
            )
        })
        .collect()
}

fn layout_lines(spec: &StyleSpec) -> Vec<String> {
    let layout = &spec.layout;
    let container = match layout.container_width {
        Some(width) if width > 0.0 => format!("{width}px"),
        _ => "auto (fit source proportions)".into(),
    };
    let patterns = if layout.grid_patterns.is_empty() {
        "Use source-like grid/flex grouping".to_string()
    } else {
        layout.grid_patterns.join(", ")
    };

    vec![
        format!("- Container width: {container}"),
        format!(
            "- Section vertical spacing scale: {}",
            px_list(layout.section_vertical_spacing.iter())
        ),
        format!("- Grid and alignment patterns: {patterns}"),
        "- Preserve relative whitespace and major block proportions from top to bottom.".into(),
    ]
}

fn constraint_lines(spec: &StyleSpec) -> Vec<String> {
    let roles = spec
        .palette
        .roles
        .entries()
        .iter()
        .map(|(name, value)| format!("{} {}", kebab_role(name), value.unwrap_or(NOT_AVAILABLE)))
        .collect::<Vec<_>>()
        .join(", ");

    let typography = &spec.typography;
    let scale = typography
        .scale
        .iter()
        .map(|entry| format!("{}:{}px", entry.role_hint, entry.px))
        .collect::<Vec<_>>();
    let shadows = spec
        .tokens
        .shadows
        .iter()
        .map(|shadow| shadow.value.as_str())
        .collect::<Vec<_>>();

    vec![
        format!("- Palette roles: {roles}."),
        format!(
            "- Palette shortlist: {}",
            or_placeholder(spec.palette.colors.iter().map(|c| c.hex.clone()).collect(), ", ")
        ),
        format!(
            "- Typography families: primary {}, secondary {}",
            typography.primary_family.as_deref().unwrap_or(NOT_AVAILABLE),
            typography.secondary_family.as_deref().unwrap_or(NOT_AVAILABLE)
        ),
        format!("- Typography scale: {}", or_placeholder(scale, ", ")),
        format!(
            "- Typography weights: {}",
            or_placeholder(typography.weights.iter().map(u32::to_string).collect(), ", ")
        ),
        format!("- Spacing scale: {}", top_scale(&spec.tokens.spacing_px)),
        format!("- Radius scale: {}", top_scale(&spec.tokens.radius_px)),
        format!(
            "- Shadows/effects: {}",
            if shadows.is_empty() { "none".to_string() } else { shadows.join(" | ") }
        ),
    ]
}

fn format_recipe(name: &str, recipe: Option<&ComponentRecipe>) -> Vec<String> {
    let Some(recipe) = recipe else {
        return vec![format!("- {name}: not confidently detected.")];
    };

    let mut lines = vec![
        format!("- {name}: selector {}", recipe.selector),
        format!(
            "  - colors: bg {}, text {}, border {}",
            recipe.background_color.as_deref().unwrap_or("transparent"),
            recipe.text_color.as_deref().unwrap_or("inherit"),
            recipe.border_color.as_deref().unwrap_or("none")
        ),
        format!(
            "  - shape: radius {}, border {} {}",
            px_or(recipe.radius_px, NOT_AVAILABLE),
            px_or(recipe.border_width_px, NOT_AVAILABLE),
            recipe.border_style.as_deref().unwrap_or("solid")
        ),
        format!(
            "  - spacing: padding-y {}, padding-x {}",
            px_or(recipe.padding_y_px, NOT_AVAILABLE),
            px_or(recipe.padding_x_px, NOT_AVAILABLE)
        ),
        format!(
            "  - type: {} {} / weight {}",
            recipe.font_family.as_deref().unwrap_or("inherit"),
            px_or(recipe.font_size_px, "inherit"),
            display_or(recipe.font_weight, "inherit")
        ),
        format!("  - shadow: {}", format_shadow(recipe.shadow.as_ref())),
    ];

    if let Some(notes) = recipe.notes.as_ref().filter(|notes| !notes.is_empty()) {
        lines.push(format!("  - notes: {}", notes.join("; ")));
    }
    lines
}

fn format_shadow(shadow: Option<&NormalizedShadow>) -> String {
    let Some(shadow) = shadow else {
        return "none".into();
    };
    let spread = shadow.spread.map(|spread| format!(" {spread}px")).unwrap_or_default();
    let inset = if shadow.inset == Some(true) { " inset" } else { "" };
    format!(
        "{}px {}px {}px{spread} {}{inset}",
        shadow.x, shadow.y, shadow.blur, shadow.color
    )
}

fn kebab_role(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

fn px_or(value: Option<f64>, placeholder: &str) -> String {
    value.map(|v| format!("{v}px")).unwrap_or_else(|| placeholder.to_string())
}

fn display_or<T: Display>(value: Option<T>, placeholder: &str) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| placeholder.to_string())
}

fn or_placeholder(values: Vec<String>, separator: &str) -> String {
    if values.is_empty() {
        return NOT_AVAILABLE.into();
    }
    values.join(separator)
}

fn px_list<'a>(values: impl Iterator<Item = &'a f64>) -> String {
    or_placeholder(values.map(|v| format!("{v}px")).collect(), ", ")
}

fn top_scale(values: &[WeightedValue<f64>]) -> String {
    px_list(values.iter().take(SCALE_PREVIEW).map(|item| &item.value))
}
