//! Type scale and font tokens

use crate::cluster::{cluster_number_scale, rank_weighted_strings, ScaleOptions};
use crate::collect::CandidateSet;
use crate::config::ClusterSettings;
use crate::normalize::round_to;
use crate::style_spec::{LetterSpacing, LineHeight, LineHeightUnit, TypeScaleEntry, Typography};

const FAMILY_LIMIT: usize = 8;

/// Role hint by rank, counting from the largest size.
pub fn role_hint_from_rank(index_from_largest: usize) -> &'static str {
    match index_from_largest {
        0 => "h1",
        1 => "h2",
        2 => "h3",
        3 => "body-large",
        4 => "body",
        _ => "caption",
    }
}

/// Cluster the font sizes and label them, largest first.
pub fn build_type_scale(candidates: &CandidateSet, settings: &ClusterSettings) -> Vec<TypeScaleEntry> {
    let ascending = cluster_number_scale(
        &candidates.font_sizes,
        ScaleOptions::new(settings.font_size_tolerance).limit(settings.type_scale_limit),
    );

    // Clustered values are unique, so rank by reversed position
    let count = ascending.len();
    let mut scale: Vec<TypeScaleEntry> = ascending
        .into_iter()
        .enumerate()
        .map(|(idx, item)| TypeScaleEntry {
            px: item.value,
            role_hint: role_hint_from_rank(count - 1 - idx).to_string(),
            weight: round_to(item.weight, 2),
        })
        .collect();
    scale.reverse();
    scale
}

pub fn build_typography(candidates: &CandidateSet, settings: &ClusterSettings) -> Typography {
    let families = rank_weighted_strings(&candidates.font_families, Some(FAMILY_LIMIT), 0.0);

    let weights = cluster_number_scale(
        &candidates.font_weights,
        ScaleOptions::new(settings.font_weight_tolerance),
    )
    .into_iter()
    .filter(|item| item.value >= 0.0)
    .map(|item| item.value as u32)
    .collect();

    let px_heights = cluster_number_scale(
        &candidates.line_heights_px,
        ScaleOptions::new(settings.line_height_px_tolerance).limit(settings.line_height_px_limit),
    );
    let unitless_heights = cluster_number_scale(
        &candidates.line_heights_unitless,
        ScaleOptions::new(settings.line_height_unitless_tolerance)
            .limit(settings.line_height_unitless_limit)
            .precision(2),
    );
    let line_heights = px_heights
        .into_iter()
        .map(|item| LineHeight { value: item.value, unit: LineHeightUnit::Px })
        .chain(
            unitless_heights
                .into_iter()
                .map(|item| LineHeight { value: item.value, unit: LineHeightUnit::Number }),
        )
        .collect();

    let letter_spacing: Vec<LetterSpacing> = cluster_number_scale(
        &candidates.letter_spacing,
        ScaleOptions::new(settings.letter_spacing_tolerance).limit(settings.letter_spacing_limit),
    )
    .into_iter()
    .map(|item| LetterSpacing { px: item.value, weight: item.weight })
    .collect();

    let mut families = families.into_iter().map(|item| item.value);
    Typography {
        primary_family: families.next(),
        secondary_family: families.next(),
        scale: build_type_scale(candidates, settings),
        weights,
        line_heights,
        letter_spacing: (!letter_spacing.is_empty()).then_some(letter_spacing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::Weighted;

    fn sizes(values: &[f64]) -> CandidateSet {
        CandidateSet {
            font_sizes: values.iter().map(|v| Weighted::new(*v, 1.0)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_role_hints_from_largest() {
        let scale = build_type_scale(&sizes(&[16.0, 48.0, 14.0, 32.0]), &ClusterSettings::default());
        let pairs: Vec<_> = scale.iter().map(|e| (e.px, e.role_hint.as_str())).collect();
        assert_eq!(pairs, vec![(48.0, "h1"), (32.0, "h2"), (16.0, "h3"), (14.0, "body-large")]);
    }

    #[test]
    fn test_scale_caption_and_limit() {
        let values: Vec<f64> = (0..15).map(|i| 10.0 + 4.0 * i as f64).collect();
        let scale = build_type_scale(&sizes(&values), &ClusterSettings::default());
        assert_eq!(scale.len(), 10);
        // limit keeps the smallest ten, so 46px is the largest kept
        assert_eq!(scale[0].px, 46.0);
        assert_eq!(scale[0].role_hint, "h1");
        assert_eq!(scale[4].role_hint, "body");
        assert_eq!(scale[9].role_hint, "caption");
    }

    #[test]
    fn test_typography_tokens() {
        let w = |v: f64| Weighted::new(v, 1.0);
        let candidates = CandidateSet {
            font_families: vec![
                Weighted::new("Inter".to_string(), 5.0),
                Weighted::new("Georgia".to_string(), 2.0),
                Weighted::new("Menlo".to_string(), 1.0),
            ],
            font_weights: vec![w(400.0), w(420.0), w(700.0)],
            line_heights_px: vec![w(24.0), w(24.4), w(32.0)],
            line_heights_unitless: vec![w(1.5), w(1.52), w(1.2)],
            ..Default::default()
        };
        let typography = build_typography(&candidates, &ClusterSettings::default());

        assert_eq!(typography.primary_family.as_deref(), Some("inter"));
        assert_eq!(typography.secondary_family.as_deref(), Some("georgia"));
        assert_eq!(typography.weights, vec![410, 700]);
        let heights: Vec<_> = typography
            .line_heights
            .iter()
            .map(|lh| (lh.value, lh.unit))
            .collect();
        assert_eq!(
            heights,
            vec![
                (24.0, LineHeightUnit::Px),
                (32.0, LineHeightUnit::Px),
                (1.2, LineHeightUnit::Number),
                (1.51, LineHeightUnit::Number),
            ]
        );
        assert!(typography.letter_spacing.is_none());
    }
}
