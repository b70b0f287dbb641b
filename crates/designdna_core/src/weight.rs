//! Salience weight per captured node
//!
//! `weight = sqrt(max(1, area)) * fold_boost * role_boost`
//!
//! The square root keeps page-sized containers from drowning out small
//! elements. Fold and role multipliers push up headings, buttons and
//! navigation landmarks that sit near the top of the page.

use serde::{Deserialize, Serialize};

use crate::snapshot::{CapturedNode, Viewport};

/// Multipliers applied on top of the area term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightModel {
    /// Node whose top edge is above the viewport height
    #[serde(default = "default_fold_boost")]
    pub fold_boost: f64,
    /// `h1`, `h2`, `h3`
    #[serde(default = "default_heading_boost")]
    pub heading_boost: f64,
    /// `button` tag or role
    #[serde(default = "default_button_boost")]
    pub button_boost: f64,
    /// `nav`, `footer` or the navigation role
    #[serde(default = "default_landmark_boost")]
    pub landmark_boost: f64,
    /// Extra factor for nodes in the prominent list
    #[serde(default = "default_prominent_boost")]
    pub prominent_boost: f64,
    /// Flex direction patterns rank below explicit grid templates
    #[serde(default = "default_flex_pattern_factor")]
    pub flex_pattern_factor: f64,
}

fn default_fold_boost() -> f64 {
    1.25
}

fn default_heading_boost() -> f64 {
    1.5
}

fn default_button_boost() -> f64 {
    1.4
}

fn default_landmark_boost() -> f64 {
    1.1
}

fn default_prominent_boost() -> f64 {
    1.35
}

fn default_flex_pattern_factor() -> f64 {
    0.7
}

impl Default for WeightModel {
    fn default() -> Self {
        Self {
            fold_boost: default_fold_boost(),
            heading_boost: default_heading_boost(),
            button_boost: default_button_boost(),
            landmark_boost: default_landmark_boost(),
            prominent_boost: default_prominent_boost(),
            flex_pattern_factor: default_flex_pattern_factor(),
        }
    }
}

impl WeightModel {
    fn role_boost(&self, node: &CapturedNode) -> f64 {
        if ["h1", "h2", "h3"].iter().any(|tag| node.tag_is(tag)) {
            self.heading_boost
        } else if node.tag_is("button") || node.role_is("button") {
            self.button_boost
        } else if node.tag_is("nav") || node.tag_is("footer") || node.role_is("navigation") {
            self.landmark_boost
        } else {
            1.0
        }
    }

    /// Base weight of a node, before any prominence boost.
    pub fn node_weight(&self, node: &CapturedNode, viewport: Viewport) -> f64 {
        let area = (node.bounds.width * node.bounds.height).max(1.0);
        let fold = if node.bounds.y < viewport.height {
            self.fold_boost
        } else {
            1.0
        };
        area.sqrt() * fold * self.role_boost(node)
    }

    /// Weight used for candidates, including the prominence boost.
    pub fn candidate_weight(&self, node: &CapturedNode, viewport: Viewport, prominent: bool) -> f64 {
        let base = self.node_weight(node, viewport);
        if prominent {
            base * self.prominent_boost
        } else {
            base
        }
    }
}

/// [`WeightModel::node_weight`] with the stock multipliers.
pub fn compute_node_weight(node: &CapturedNode, viewport: Viewport) -> f64 {
    WeightModel::default().node_weight(node, viewport)
}
