//! Narrative enhancer seam
//!
//! An enhancer turns a finished style spec into prose. It only ever sees
//! `&StyleSpec`, so numeric tokens stay whatever synthesis produced.

use crate::prompt::{compile_design_prompt, infer_vibe};
use crate::style_spec::StyleSpec;

/// Human-facing text derived from a style spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narrative {
    pub summary: String,
    pub prompt: String,
}

pub trait NarrativeEnhancer {
    fn enhance(&self, spec: &StyleSpec) -> Narrative;
}

/// Built-in enhancer: compiled prompt plus a one-line summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeterministicNarrative;

impl NarrativeEnhancer for DeterministicNarrative {
    fn enhance(&self, spec: &StyleSpec) -> Narrative {
        Narrative { summary: summarize(spec), prompt: compile_design_prompt(spec) }
    }
}

fn summarize(spec: &StyleSpec) -> String {
    let detected = spec.components.iter().filter(|(_, recipe)| recipe.is_some()).count();
    format!(
        "{} style: {} palette colors, {} type sizes, {} sections, {} of 5 component recipes ({}).",
        spec.url,
        spec.palette.colors.len(),
        spec.typography.scale.len(),
        spec.sections.len(),
        detected,
        infer_vibe(spec).join(", ")
    )
}
