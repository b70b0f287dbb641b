//! Layout tokens: container width, section rhythm, grid patterns

use crate::cluster::{cluster_number_scale, rank_weighted_strings, ScaleOptions, ScaleSort};
use crate::collect::{CandidateSet, Weighted};
use crate::snapshot::ExtractedSection;

const MIN_CONTAINER_PX: f64 = 280.0;
/// Widths may overshoot the viewport by this much before being dropped
const CONTAINER_OVERFLOW_PX: f64 = 200.0;
const CONTAINER_CLUSTER_LIMIT: usize = 6;
const MAX_SECTION_GAP_PX: f64 = 320.0;
const SECTION_SPACING_LIMIT: usize = 8;
const GRID_PATTERN_LIMIT: usize = 6;

/// Heaviest plausible container width.
///
/// `max-width` candidates come before `width` candidates so they open the
/// clusters.
pub fn select_container_width(
    candidates: &CandidateSet,
    viewport_width: f64,
    tolerance: f64,
) -> Option<f64> {
    let merged: Vec<Weighted<f64>> = candidates
        .max_widths
        .iter()
        .chain(candidates.widths.iter())
        .filter(|item| item.value > MIN_CONTAINER_PX && item.value <= viewport_width + CONTAINER_OVERFLOW_PX)
        .cloned()
        .collect();

    cluster_number_scale(
        &merged,
        ScaleOptions::new(tolerance)
            .sorted(ScaleSort::Weight)
            .limit(CONTAINER_CLUSTER_LIMIT),
    )
    .into_iter()
    .find(|item| item.value < viewport_width * 1.05)
    .map(|item| item.value)
}

/// Distinct positive gaps between vertically consecutive sections.
pub fn section_spacing(sections: &[ExtractedSection]) -> Vec<f64> {
    if sections.len() < 2 {
        return Vec::new();
    }

    let mut sorted: Vec<&ExtractedSection> = sections.iter().collect();
    sorted.sort_by(|a, b| a.bounds.y.total_cmp(&b.bounds.y));

    let mut gaps: Vec<f64> = Vec::new();
    for pair in sorted.windows(2) {
        let gap = crate::normalize::round_to(pair[1].bounds.y - pair[0].bounds.bottom(), 0);
        if gap > 0.0 && gap <= MAX_SECTION_GAP_PX && !gaps.contains(&gap) {
            gaps.push(gap);
        }
    }

    gaps.sort_by(f64::total_cmp);
    gaps.truncate(SECTION_SPACING_LIMIT);
    gaps
}

pub fn grid_patterns(candidates: &CandidateSet) -> Vec<String> {
    rank_weighted_strings(&candidates.grid_patterns, Some(GRID_PATTERN_LIMIT), 0.0)
        .into_iter()
        .map(|item| item.value)
        .collect()
}
