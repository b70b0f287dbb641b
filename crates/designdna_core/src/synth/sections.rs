//! Section labeling

use regex::Regex;
use std::sync::LazyLock;

use crate::normalize::{normalize_effect, parse_px_list, visible_color};
use crate::snapshot::{CapturedNode, ExtractedSection, ExtractionSnapshot};
use crate::style_spec::SectionEntry;

static PRICING_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(pricing|plan|[$€£¥]\d|per month|per year)").expect("valid pricing pattern")
});

/// Card-like nodes needed before a section is labelled "Features".
const FEATURE_CARD_THRESHOLD: usize = 3;

fn is_card_like(node: &CapturedNode) -> bool {
    let has_background = visible_color(node.style("backgroundColor")).is_some();
    let has_radius = parse_px_list(node.style("borderRadius"))
        .into_iter()
        .any(|value| value > 0.0);
    let has_shadow = normalize_effect(node.style("boxShadow")).is_some();

    node.bounds.width > 120.0
        && node.bounds.height > 80.0
        && has_background
        && (has_radius || has_shadow)
}

fn capitalize(tag: &str) -> String {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Section".to_string(),
    }
}

/// Human label for one structural section.
pub fn infer_section_label(section: &ExtractedSection, snapshot: &ExtractionSnapshot) -> String {
    let tag = section.tag.trim().to_ascii_lowercase();
    match tag.as_str() {
        "header" | "nav" => return "Header / Nav".to_string(),
        "footer" => return "Footer".to_string(),
        _ => {}
    }

    let inside: Vec<&CapturedNode> = snapshot
        .nodes
        .iter()
        .filter(|node| section.bounds.contains_point(node.bounds.x, node.bounds.y))
        .collect();

    if section.bounds.y < snapshot.viewport.height && inside.iter().any(|node| node.tag_is("h1")) {
        return "Hero".to_string();
    }

    let text = inside
        .iter()
        .map(|node| node.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    if PRICING_TEXT.is_match(&text) {
        return "Pricing".to_string();
    }

    if inside.iter().filter(|node| is_card_like(node)).count() >= FEATURE_CARD_THRESHOLD {
        return "Features".to_string();
    }

    capitalize(&tag)
}

pub fn build_sections(snapshot: &ExtractionSnapshot) -> Vec<SectionEntry> {
    snapshot
        .sections
        .iter()
        .map(|section| SectionEntry {
            label: infer_section_label(section, snapshot),
            selector: section.selector.clone(),
            bounds: section.bounds,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{Bounds, Viewport};

    fn section(tag: &str, y: f64, height: f64) -> ExtractedSection {
        ExtractedSection {
            selector: format!("{tag}.s"),
            tag: tag.to_string(),
            bounds: Bounds { x: 0.0, y, width: 1200.0, height },
            children: vec![],
        }
    }

    fn node(tag: &str, x: f64, y: f64, text: &str, styles: &[(&str, &str)]) -> CapturedNode {
        CapturedNode {
            selector: tag.to_string(),
            tag: tag.to_string(),
            text: text.to_string(),
            bounds: Bounds { x, y, width: 300.0, height: 200.0 },
            styles: styles
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..Default::default()
        }
    }

    fn snapshot(nodes: Vec<CapturedNode>) -> ExtractionSnapshot {
        ExtractionSnapshot {
            viewport: Viewport { width: 1200.0, height: 800.0 },
            nodes,
            ..Default::default()
        }
    }

    #[test]
    fn test_landmark_tags() {
        let snap = snapshot(vec![]);
        assert_eq!(infer_section_label(&section("NAV", 0.0, 80.0), &snap), "Header / Nav");
        assert_eq!(infer_section_label(&section("header", 0.0, 80.0), &snap), "Header / Nav");
        assert_eq!(infer_section_label(&section("footer", 3000.0, 200.0), &snap), "Footer");
    }

    #[test]
    fn test_hero_needs_h1_above_fold() {
        let snap = snapshot(vec![node("h1", 40.0, 100.0, "Build faster", &[])]);
        assert_eq!(infer_section_label(&section("section", 0.0, 600.0), &snap), "Hero");

        let below = snapshot(vec![node("h1", 40.0, 1100.0, "Build faster", &[])]);
        assert_eq!(infer_section_label(&section("section", 1000.0, 600.0), &below), "Section");
    }

    #[test]
    fn test_pricing_text() {
        for text in ["Simple pricing", "$29 / mo", "€9", "billed per year", "Pro Plan"] {
            let snap = snapshot(vec![node("p", 10.0, 1200.0, text, &[])]);
            assert_eq!(
                infer_section_label(&section("section", 1000.0, 800.0), &snap),
                "Pricing",
                "{text}"
            );
        }
    }

    #[test]
    fn test_features_from_cards() {
        let card = [("backgroundColor", "#ffffff"), ("borderRadius", "12px")];
        let shadow_card = [("backgroundColor", "#ffffff"), ("boxShadow", "0px 1px 2px #000")];
        let flat = [("backgroundColor", "rgba(0, 0, 0, 0)"), ("borderRadius", "12px")];

        let snap = snapshot(vec![
            node("div", 0.0, 1100.0, "", &card),
            node("div", 400.0, 1100.0, "", &card),
            node("div", 800.0, 1100.0, "", &shadow_card),
        ]);
        assert_eq!(infer_section_label(&section("section", 1000.0, 500.0), &snap), "Features");

        let two_cards = snapshot(vec![
            node("div", 0.0, 1100.0, "", &card),
            node("div", 400.0, 1100.0, "", &card),
            node("div", 800.0, 1100.0, "", &flat),
        ]);
        assert_eq!(infer_section_label(&section("main", 1000.0, 500.0), &two_cards), "Main");
    }

    #[test]
    fn test_fallback_capitalizes_tag() {
        let snap = snapshot(vec![]);
        assert_eq!(infer_section_label(&section("article", 2000.0, 10.0), &snap), "Article");
        assert_eq!(infer_section_label(&section("aside", 2000.0, 10.0), &snap), "Aside");
        assert_eq!(infer_section_label(&section("", 2000.0, 10.0), &snap), "Section");
    }

    #[test]
    fn test_build_sections_keeps_order_and_bounds() {
        let mut snap = snapshot(vec![]);
        snap.sections = vec![section("header", 0.0, 80.0), section("footer", 900.0, 100.0)];
        let entries = build_sections(&snap);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].label, "Footer");
        assert_eq!(entries[1].bounds.y, 900.0);
    }
}
