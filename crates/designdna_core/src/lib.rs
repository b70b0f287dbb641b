//! DesignDNA synthesis core
//!
//! Turns a captured page ([`ExtractionSnapshot`]) into a [`StyleSpec`] and a
//! flattened [`SemanticTokensJson`] document.
//!
//! Provides:
//! - **Normalizers**: total parsers for colors, lengths, fonts and shadows
//! - **Weighting**: salience of a node from size, role and position
//! - **Clustering**: weighted merge of near-equal values into scales
//! - **Synthesis**: palette roles, type scale, sections, component recipes
//! - **Output**: token document, validation, prompt compiler
//!
//! Everything is synchronous and deterministic. Use [`StylePipeline`] for
//! the full flow or call the stages directly.

pub mod cluster;
pub mod collect;
pub mod config;
pub mod error;
pub mod legacy;
pub mod narrative;
pub mod normalize;
pub mod pipeline;
pub mod prompt;
pub mod snapshot;
pub mod style_spec;
pub mod synth;
pub mod tokens;
pub mod validate;
pub mod vision;
pub mod weight;

pub use cluster::{cluster_colors, cluster_number_scale, rank_weighted_strings, ScaleOptions, WeightedValue};
pub use collect::{collect_candidates, CandidateSet};
pub use config::{ClusterSettings, PipelineConfig, SnapshotLimits};
pub use error::{ConfigError, SnapshotError, TokenDocumentError};
pub use legacy::{build_legacy_tokens, FrequencyTables};
pub use narrative::{DeterministicNarrative, Narrative, NarrativeEnhancer};
pub use pipeline::{StylePipeline, SynthesisOutput, SynthesisRequest};
pub use prompt::compile_design_prompt;
pub use snapshot::{Bounds, CapturedNode, ExtractedSection, ExtractionSnapshot, Viewport};
pub use style_spec::{ComponentRecipe, StyleSpec};
pub use synth::{build_style_spec, StyleSpecInput};
pub use tokens::{parse_tokens_document, SemanticTokensJson, SCHEMA_VERSION};
pub use validate::{validate_style_spec, validate_tokens_document, ValidationIssue};
pub use weight::WeightModel;
