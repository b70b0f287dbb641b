//! Clustering of weighted candidates into token sets
//!
//! Three strategies, picked by value semantics:
//!
//! - [`rank_weighted_strings`]: exact match after trim + lowercase. Font
//!   families, shadow strings, effects, layout patterns.
//! - [`cluster_number_scale`]: greedy online clustering on a number line
//!   with a weighted running-mean center. Sizes, spacing, radii.
//! - [`cluster_colors`]: the same greedy pass in RGB space. The cluster
//!   keeps a real observed color as representative instead of a blend.
//!
//! The numeric and color passes are insertion-order sensitive. Output is
//! deterministic for a deterministic input order.
//!
//! None of these fail: empty input gives empty output.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::collect::Weighted;
use crate::normalize::{color_distance, round_to};

/// A token with its accumulated weight (rounded to 2 decimals).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedValue<T> {
    pub value: T,
    pub weight: f64,
}

/// Output order of [`cluster_number_scale`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleSort {
    #[default]
    Ascending,
    Descending,
    /// Heaviest first
    Weight,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleOptions {
    /// Max distance from a cluster center for a value to join it
    pub tolerance: f64,
    pub sort: ScaleSort,
    pub limit: Option<usize>,
    /// Decimals kept when rounding centers (0 rounds to integers)
    pub precision: u32,
}

impl Default for ScaleOptions {
    fn default() -> Self {
        Self {
            tolerance: 1.0,
            sort: ScaleSort::Ascending,
            limit: None,
            precision: 0,
        }
    }
}

impl ScaleOptions {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance, ..Default::default() }
    }

    pub fn sorted(mut self, sort: ScaleSort) -> Self {
        self.sort = sort;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }
}

/// Bucket by exact (trimmed, lowercased) value and sum weights.
///
/// Buckets whose rounded weight is not above `min_weight` are dropped.
/// Equal weights keep first-seen order.
pub fn rank_weighted_strings(
    values: &[Weighted<String>],
    limit: Option<usize>,
    min_weight: f64,
) -> Vec<WeightedValue<String>> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<(String, f64)> = Vec::new();

    for item in values {
        let key = item.value.trim().to_lowercase();
        if key.is_empty() {
            continue;
        }
        match index.get(&key) {
            Some(&slot) => buckets[slot].1 += item.weight,
            None => {
                index.insert(key.clone(), buckets.len());
                buckets.push((key, item.weight));
            }
        }
    }

    let mut ranked: Vec<WeightedValue<String>> = buckets
        .into_iter()
        .map(|(value, weight)| WeightedValue { value, weight: round_to(weight, 2) })
        .filter(|item| item.weight > min_weight)
        .collect();
    ranked.sort_by(|a, b| b.weight.total_cmp(&a.weight));

    truncate(ranked, limit)
}

struct ScaleCluster {
    center: f64,
    weight: f64,
}

/// Greedy online clustering of numbers.
///
/// Each value joins the closest cluster whose center is within
/// `tolerance`, moving that center to the weighted mean; otherwise it
/// opens a new cluster. Centers are then rounded and clusters that land on
/// the same rounded value are merged. Total weight is preserved up to the
/// final 2-decimal rounding.
pub fn cluster_number_scale(
    values: &[Weighted<f64>],
    options: ScaleOptions,
) -> Vec<WeightedValue<f64>> {
    let mut clusters: Vec<ScaleCluster> = Vec::new();

    for item in values {
        if !item.value.is_finite() {
            continue;
        }

        let mut target: Option<usize> = None;
        let mut closest = f64::INFINITY;
        for (idx, cluster) in clusters.iter().enumerate() {
            let distance = (cluster.center - item.value).abs();
            if distance <= options.tolerance && distance < closest {
                closest = distance;
                target = Some(idx);
            }
        }

        match target {
            Some(idx) => {
                let cluster = &mut clusters[idx];
                let total = cluster.weight + item.weight;
                if total > 0.0 {
                    cluster.center =
                        (cluster.center * cluster.weight + item.value * item.weight) / total;
                }
                cluster.weight = total;
            }
            None => clusters.push(ScaleCluster { center: item.value, weight: item.weight }),
        }
    }

    // Merge by rounded center, first occurrence fixes the position
    let mut merged: Vec<(f64, f64)> = Vec::new();
    for cluster in clusters {
        let rounded = round_to(cluster.center, options.precision);
        match merged.iter_mut().find(|(value, _)| *value == rounded) {
            Some(entry) => entry.1 += cluster.weight,
            None => merged.push((rounded, cluster.weight)),
        }
    }

    let mut result: Vec<WeightedValue<f64>> = merged
        .into_iter()
        .map(|(value, weight)| WeightedValue { value, weight: round_to(weight, 2) })
        .collect();

    match options.sort {
        ScaleSort::Ascending => result.sort_by(|a, b| a.value.total_cmp(&b.value)),
        ScaleSort::Descending => result.sort_by(|a, b| b.value.total_cmp(&a.value)),
        ScaleSort::Weight => result.sort_by(|a, b| b.weight.total_cmp(&a.weight)),
    }

    truncate(result, options.limit)
}

/// Greedy clustering of hex colors by Euclidean RGB distance.
///
/// Values not starting with `#` are ignored. When a merge brings in more
/// than half of the cluster's accumulated weight, that color becomes the
/// representative. Output is heaviest first, at most `limit` entries.
pub fn cluster_colors(
    values: &[Weighted<String>],
    distance: f64,
    limit: usize,
) -> Vec<WeightedValue<String>> {
    let mut clusters: Vec<(String, f64)> = Vec::new();

    for item in values {
        let color = item.value.trim().to_lowercase();
        if !color.starts_with('#') {
            continue;
        }

        let mut target: Option<usize> = None;
        let mut closest = f64::INFINITY;
        for (idx, (representative, _)) in clusters.iter().enumerate() {
            let current = color_distance(representative, &color);
            if current <= distance && current < closest {
                closest = current;
                target = Some(idx);
            }
        }

        match target {
            Some(idx) => {
                let cluster = &mut clusters[idx];
                cluster.1 += item.weight;
                if item.weight > cluster.1 / 2.0 {
                    cluster.0 = color;
                }
            }
            None => clusters.push((color, item.weight)),
        }
    }

    let mut result: Vec<WeightedValue<String>> = clusters
        .into_iter()
        .map(|(value, weight)| WeightedValue { value, weight: round_to(weight, 2) })
        .collect();
    result.sort_by(|a, b| b.weight.total_cmp(&a.weight));

    truncate(result, Some(limit))
}

fn truncate<T>(mut items: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[(&str, f64)]) -> Vec<Weighted<String>> {
        items
            .iter()
            .map(|(v, w)| Weighted::new(v.to_string(), *w))
            .collect()
    }

    fn numbers(items: &[(f64, f64)]) -> Vec<Weighted<f64>> {
        items.iter().map(|(v, w)| Weighted::new(*v, *w)).collect()
    }

    #[test]
    fn test_rank_buckets_case_insensitively() {
        let ranked = rank_weighted_strings(
            &strings(&[("Inter", 2.0), (" inter ", 3.0), ("Georgia", 4.0), ("", 9.0)]),
            None,
            0.0,
        );
        assert_eq!(
            ranked,
            vec![
                WeightedValue { value: "inter".into(), weight: 5.0 },
                WeightedValue { value: "georgia".into(), weight: 4.0 },
            ]
        );
    }

    #[test]
    fn test_rank_ties_keep_first_seen_and_limit() {
        let ranked = rank_weighted_strings(
            &strings(&[("b", 1.0), ("a", 1.0), ("c", 1.0)]),
            Some(2),
            0.0,
        );
        let values: Vec<_> = ranked.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["b", "a"]);
    }

    #[test]
    fn test_rank_min_weight_filters() {
        let ranked = rank_weighted_strings(&strings(&[("a", 0.0), ("b", 0.5), ("c", 2.0)]), None, 0.5);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].value, "c");
    }

    #[test]
    fn test_scale_merges_within_tolerance() {
        let scale = cluster_number_scale(
            &numbers(&[(16.0, 1.0), (16.4, 1.0), (24.0, 2.0), (15.5, 1.0)]),
            ScaleOptions::new(1.0),
        );
        assert_eq!(
            scale,
            vec![
                WeightedValue { value: 16.0, weight: 3.0 },
                WeightedValue { value: 24.0, weight: 2.0 },
            ]
        );
    }

    #[test]
    fn test_scale_picks_closest_cluster() {
        let scale = cluster_number_scale(
            &numbers(&[(10.0, 1.0), (12.0, 1.0), (11.8, 5.0)]),
            ScaleOptions::new(2.0),
        );
        // 12 joins 10 (distance 2), center 11; 11.8 then joins that cluster
        assert_eq!(scale.len(), 1);
        assert_eq!(scale[0].weight, 7.0);
    }

    #[test]
    fn test_scale_rounded_centers_merge() {
        // 0.4 apart with tolerance 0.3 stay separate, then both round to 8
        let scale = cluster_number_scale(
            &numbers(&[(7.8, 1.0), (8.2, 1.0)]),
            ScaleOptions::new(0.3),
        );
        assert_eq!(scale, vec![WeightedValue { value: 8.0, weight: 2.0 }]);
    }

    #[test]
    fn test_scale_sort_orders_and_limit() {
        let input = numbers(&[(4.0, 1.0), (32.0, 5.0), (16.0, 3.0)]);

        let desc = cluster_number_scale(&input, ScaleOptions::new(1.0).sorted(ScaleSort::Descending));
        assert_eq!(desc.iter().map(|v| v.value).collect::<Vec<_>>(), vec![32.0, 16.0, 4.0]);

        let by_weight = cluster_number_scale(
            &input,
            ScaleOptions::new(1.0).sorted(ScaleSort::Weight).limit(2),
        );
        assert_eq!(by_weight.iter().map(|v| v.value).collect::<Vec<_>>(), vec![32.0, 16.0]);
    }

    #[test]
    fn test_scale_precision_keeps_decimals() {
        let scale = cluster_number_scale(
            &numbers(&[(1.5, 1.0), (1.52, 1.0), (1.2, 1.0)]),
            ScaleOptions::new(0.05).precision(2),
        );
        assert_eq!(scale.iter().map(|v| v.value).collect::<Vec<_>>(), vec![1.2, 1.51]);
    }

    #[test]
    fn test_scale_conserves_weight() {
        let input = numbers(&[
            (12.0, 3.25),
            (12.5, 1.5),
            (14.0, 2.0),
            (16.0, 7.75),
            (15.2, 0.5),
            (48.0, 12.0),
            (f64::NAN, 100.0),
        ]);
        let scale = cluster_number_scale(&input, ScaleOptions::new(1.0));
        let total: f64 = scale.iter().map(|v| v.weight).sum();
        assert!((total - 27.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_empty() {
        assert!(cluster_number_scale(&[], ScaleOptions::default()).is_empty());
    }

    #[test]
    fn test_colors_merge_nearby() {
        let palette = cluster_colors(
            &strings(&[("#000000", 1.0), ("#050505", 3.0), ("#ffffff", 2.0), ("red", 10.0)]),
            12.0,
            12,
        );
        assert_eq!(
            palette,
            vec![
                WeightedValue { value: "#050505".into(), weight: 4.0 },
                WeightedValue { value: "#ffffff".into(), weight: 2.0 },
            ]
        );
    }

    #[test]
    fn test_colors_representative_needs_majority() {
        let palette = cluster_colors(&strings(&[("#000000", 3.0), ("#050505", 1.0)]), 12.0, 12);
        assert_eq!(palette[0].value, "#000000");
    }

    #[test]
    fn test_colors_limit() {
        let input: Vec<_> = (0..20)
            .map(|i| Weighted::new(format!("#{:02x}0000", i * 12), 1.0 + i as f64))
            .collect();
        let palette = cluster_colors(&input, 1.0, 12);
        assert_eq!(palette.len(), 12);
        assert_eq!(palette[0].value, format!("#{:02x}0000", 19 * 12));
    }
}
