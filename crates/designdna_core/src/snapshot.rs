//! Capture snapshot contract
//!
//! The browser capture collaborator hands over one [`ExtractionSnapshot`]
//! per page. The shape is flat data only: no DOM handles, no browser API.
//! Keys use camelCase because that is what the capture side emits.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::SnapshotLimits;
use crate::error::SnapshotError;

/// Nodes whose top edge is above this multiple of the viewport height are
/// eligible for the prominent list.
pub const PROMINENT_FOLD_FACTOR: f64 = 1.25;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Position and size in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether a point lies inside these bounds, edges included.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x && y >= self.y && x <= self.x + self.width && y <= self.y + self.height
    }
}

/// One visible element with its computed style strings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CapturedNode {
    pub selector: String,
    pub tag: String,
    #[serde(default)]
    pub role: String,
    /// Collapsed text content, at most 120 chars
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    pub bounds: Bounds,
    /// Computed style property (camelCase) to raw value
    #[serde(default)]
    pub styles: BTreeMap<String, String>,
}

impl CapturedNode {
    /// Raw style value, or the empty string when the property was not captured.
    pub fn style(&self, key: &str) -> &str {
        self.styles.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn tag_is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    pub fn role_is(&self, role: &str) -> bool {
        self.role.eq_ignore_ascii_case(role)
    }
}

/// A structural landmark (header, nav, main, section, article, footer).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub selector: String,
    pub tag: String,
    #[serde(flatten)]
    pub bounds: Bounds,
    #[serde(default)]
    pub children: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageAsset {
    pub url: String,
    pub selector: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FontAsset {
    pub family: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IconAsset {
    pub url: String,
    pub rel: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Assets {
    #[serde(default)]
    pub images: Vec<ImageAsset>,
    #[serde(default)]
    pub fonts: Vec<FontAsset>,
    #[serde(default)]
    pub icons: Vec<IconAsset>,
}

/// Raw page capture. Created once, consumed once.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionSnapshot {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body_text: String,
    #[serde(default)]
    pub html_snippet: String,
    pub viewport: Viewport,
    #[serde(default)]
    pub headings: Vec<String>,
    #[serde(default)]
    pub buttons: Vec<String>,
    #[serde(default)]
    pub nav_items: Vec<String>,
    pub nodes: Vec<CapturedNode>,
    #[serde(default)]
    pub prominent_nodes: Vec<CapturedNode>,
    pub sections: Vec<ExtractedSection>,
    #[serde(default)]
    pub root_css_vars: BTreeMap<String, String>,
    #[serde(default)]
    pub assets: Assets,
}

impl ExtractionSnapshot {
    /// Verify the capture respects the contract bounds.
    pub fn check_limits(&self, limits: &SnapshotLimits) -> Result<(), SnapshotError> {
        let Viewport { width, height } = self.viewport;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(SnapshotError::InvalidViewport { width, height });
        }

        let counts = [
            ("nodes", self.nodes.len(), limits.max_nodes),
            ("prominent nodes", self.prominent_nodes.len(), limits.max_prominent),
            ("root custom properties", self.root_css_vars.len(), limits.max_root_vars),
        ];
        for (field, actual, limit) in counts {
            if actual > limit {
                return Err(SnapshotError::TooMany { field, actual, limit });
            }
        }

        for node in self.nodes.iter().chain(self.prominent_nodes.iter()) {
            let chars = node.text.chars().count();
            if chars > limits.max_text_chars {
                return Err(SnapshotError::TextTooLong {
                    selector: node.selector.clone(),
                    actual: chars,
                    limit: limits.max_text_chars,
                });
            }
        }

        for section in &self.sections {
            if section.children.len() > limits.max_section_children {
                return Err(SnapshotError::TooManyChildren {
                    selector: section.selector.clone(),
                    actual: section.children.len(),
                    limit: limits.max_section_children,
                });
            }
        }

        Ok(())
    }

    /// Fill `prominent_nodes` from `nodes` when the capture left it empty.
    pub fn ensure_prominent_nodes(&mut self, cap: usize) {
        if self.prominent_nodes.is_empty() && !self.nodes.is_empty() {
            self.prominent_nodes = derive_prominent_nodes(&self.nodes, self.viewport, cap);
        }
    }
}

/// Nodes near the top of the page, largest rendered area first.
///
/// Equal areas keep document order.
pub fn derive_prominent_nodes(
    nodes: &[CapturedNode],
    viewport: Viewport,
    cap: usize,
) -> Vec<CapturedNode> {
    let fold = viewport.height * PROMINENT_FOLD_FACTOR;
    let mut candidates: Vec<&CapturedNode> =
        nodes.iter().filter(|node| node.bounds.y < fold).collect();
    candidates.sort_by(|a, b| b.bounds.area().total_cmp(&a.bounds.area()));
    candidates.into_iter().take(cap).cloned().collect()
}
