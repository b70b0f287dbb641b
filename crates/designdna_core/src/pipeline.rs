//! Pipeline entry point
//!
//! [`StylePipeline`] owns a [`PipelineConfig`] and runs one snapshot at a
//! time: contract check, candidate collection, clustering and synthesis,
//! validation, token document. Nothing is shared between calls.

use std::borrow::Cow;

use tracing::{info, warn};

use crate::collect::collect_candidates;
use crate::config::PipelineConfig;
use crate::error::SnapshotError;
use crate::legacy::{build_legacy_tokens, FrequencyTables};
use crate::narrative::{DeterministicNarrative, NarrativeEnhancer};
use crate::snapshot::{ExtractionSnapshot, Viewport};
use crate::style_spec::StyleSpec;
use crate::synth::{build_sections, build_style_spec_from_candidates, StyleSpecInput};
use crate::tokens::SemanticTokensJson;
use crate::validate::{validate_style_spec, validate_tokens_document, validation_warning};

/// One page to synthesize.
#[derive(Debug, Clone, Default)]
pub struct SynthesisRequest {
    pub url: String,
    pub snapshot: ExtractionSnapshot,
    /// Screenshot colors, any CSS color syntax
    pub dominant_colors: Vec<String>,
    /// Screenshot size, when one was taken
    pub screenshot: Option<Viewport>,
    /// Overrides the narrative prompt in the token document
    pub design_prompt: Option<String>,
}

impl SynthesisRequest {
    pub fn new(url: impl Into<String>, snapshot: ExtractionSnapshot) -> Self {
        Self { url: url.into(), snapshot, ..Default::default() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisOutput {
    pub style_spec: StyleSpec,
    pub tokens: SemanticTokensJson,
    /// One-line description from the narrative enhancer
    pub summary: String,
    /// Validation warnings; synthesis still succeeded
    pub warnings: Vec<String>,
}

/// Stateless synthesis driver.
#[derive(Debug, Clone, Default)]
pub struct StylePipeline {
    config: PipelineConfig,
}

impl StylePipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Synthesize with the built-in [`DeterministicNarrative`].
    pub fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesisOutput, SnapshotError> {
        self.synthesize_with(request, &DeterministicNarrative)
    }

    /// Synthesize and let `enhancer` write the prompt and summary.
    pub fn synthesize_with(
        &self,
        request: &SynthesisRequest,
        enhancer: &dyn NarrativeEnhancer,
    ) -> Result<SynthesisOutput, SnapshotError> {
        let snapshot = self.prepare(&request.snapshot)?;

        let candidates = collect_candidates(&snapshot, &self.config.weights);
        let input = StyleSpecInput {
            url: &request.url,
            snapshot: &snapshot,
            dominant_colors: &request.dominant_colors,
            screenshot: request.screenshot,
        };
        let style_spec = build_style_spec_from_candidates(&input, &candidates, &self.config);

        let mut warnings = Vec::new();
        if let Some(warning) = validation_warning(&validate_style_spec(&style_spec)) {
            warn!(url = %request.url, "{}", warning);
            warnings.push(warning);
        }

        let narrative = enhancer.enhance(&style_spec);
        let prompt = request.design_prompt.as_deref().unwrap_or(&narrative.prompt);
        let tokens = SemanticTokensJson::from_style_spec(&style_spec, prompt);
        if let Some(warning) = validation_warning(&validate_tokens_document(&tokens)) {
            warn!(url = %request.url, "{}", warning);
            warnings.push(warning);
        }

        info!(
            url = %request.url,
            candidates = candidates.len(),
            colors = style_spec.palette.colors.len(),
            sections = style_spec.sections.len(),
            warnings = warnings.len(),
            "Synthesized style spec"
        );

        Ok(SynthesisOutput { style_spec, tokens, summary: narrative.summary, warnings })
    }

    /// Token document straight from unweighted frequency tables.
    pub fn legacy_tokens(&self, request: &SynthesisRequest) -> Result<SemanticTokensJson, SnapshotError> {
        request.snapshot.check_limits(&self.config.limits)?;
        let tables = FrequencyTables::from_snapshot(&request.snapshot);
        let sections = build_sections(&request.snapshot);
        let prompt = request.design_prompt.as_deref().unwrap_or_default();
        Ok(build_legacy_tokens(&request.url, prompt, &tables, &sections))
    }

    /// Check the contract and fill in prominent nodes when missing.
    fn prepare<'a>(&self, snapshot: &'a ExtractionSnapshot) -> Result<Cow<'a, ExtractionSnapshot>, SnapshotError> {
        snapshot.check_limits(&self.config.limits)?;
        if snapshot.prominent_nodes.is_empty() && !snapshot.nodes.is_empty() {
            let mut owned = snapshot.clone();
            owned.ensure_prominent_nodes(self.config.limits.max_prominent);
            return Ok(Cow::Owned(owned));
        }
        Ok(Cow::Borrowed(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SnapshotLimits;
    use crate::narrative::Narrative;
    use crate::snapshot::{Bounds, CapturedNode};

    fn request() -> SynthesisRequest {
        let node = CapturedNode {
            selector: "h1.title".into(),
            tag: "h1".into(),
            text: "Hello".into(),
            bounds: Bounds { x: 0.0, y: 40.0, width: 600.0, height: 60.0 },
            styles: [
                ("fontSize".to_string(), "48px".to_string()),
                ("color".to_string(), "rgb(17, 24, 39)".to_string()),
            ]
            .into_iter()
            .collect(),
            ..Default::default()
        };
        SynthesisRequest::new(
            "https://example.com/",
            ExtractionSnapshot {
                viewport: Viewport { width: 1280.0, height: 800.0 },
                nodes: vec![node],
                ..Default::default()
            },
        )
    }

    struct FixedNarrative;

    impl NarrativeEnhancer for FixedNarrative {
        fn enhance(&self, _spec: &StyleSpec) -> Narrative {
            Narrative { summary: "fixed".into(), prompt: "fixed prompt".into() }
        }
    }

    #[test]
    fn test_synthesize_uses_compiled_prompt() {
        let output = StylePipeline::default().synthesize(&request()).unwrap();
        assert!(output.tokens.design_prompt.starts_with("Goal:\n"));
        assert_eq!(output.tokens.source_url, "https://example.com/");
        assert_eq!(output.style_spec.palette.colors[0].hex, "#111827");
        assert!(output.warnings.is_empty(), "{:?}", output.warnings);
        assert!(output.summary.starts_with("https://example.com/ style:"));
    }

    #[test]
    fn test_custom_enhancer_and_prompt_override() {
        let pipeline = StylePipeline::default();
        let output = pipeline.synthesize_with(&request(), &FixedNarrative).unwrap();
        assert_eq!(output.tokens.design_prompt, "fixed prompt");
        assert_eq!(output.summary, "fixed");

        let mut req = request();
        req.design_prompt = Some("caller prompt".into());
        let output = pipeline.synthesize_with(&req, &FixedNarrative).unwrap();
        assert_eq!(output.tokens.design_prompt, "caller prompt");
    }

    #[test]
    fn test_bad_url_becomes_warning() {
        let mut req = request();
        req.url = "example.com".into();
        let output = StylePipeline::default().synthesize(&req).unwrap();
        assert!(!output.warnings.is_empty());
        assert!(output.warnings[0].starts_with("Style spec validation warning: url "));
    }

    #[test]
    fn test_contract_violation_is_error() {
        let config = PipelineConfig {
            limits: SnapshotLimits { max_nodes: 0, ..Default::default() },
            ..Default::default()
        };
        let err = StylePipeline::new(config).synthesize(&request()).unwrap_err();
        assert!(matches!(err, SnapshotError::TooMany { field: "nodes", .. }));
    }

    #[test]
    fn test_empty_snapshot_warns_about_palette() {
        let mut req = request();
        req.snapshot.nodes.clear();
        let output = StylePipeline::default().synthesize(&req).unwrap();
        assert!(output.style_spec.palette.colors.is_empty());
        assert_eq!(output.warnings.len(), 1);
        assert!(output.warnings[0].contains("tokens.color.palette"));
    }

    #[test]
    fn test_legacy_tokens() {
        let tokens = StylePipeline::default().legacy_tokens(&request()).unwrap();
        assert_eq!(tokens.tokens.color.palette, vec!["#111827"]);
        assert_eq!(tokens.design_prompt, "");
    }
}
