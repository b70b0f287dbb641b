//! `designdna legacy`: token document from unweighted frequency counts

use anyhow::Result;
use clap::Args;
use designdna_core::{ExtractionSnapshot, StylePipeline, SynthesisRequest};
use std::path::PathBuf;

use super::error::HelpfulError;
use super::input::{load_pipeline_config, read_json};

#[derive(Debug, Args)]
pub struct LegacyArgs {
    /// Capture snapshot (JSON)
    pub snapshot: PathBuf,

    /// Page URL the snapshot was captured from
    #[arg(long)]
    pub url: String,

    /// Design prompt to embed
    #[arg(long)]
    pub prompt: Option<String>,

    /// Pipeline config (TOML); only the limits apply
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: LegacyArgs) -> Result<()> {
    let config = load_pipeline_config(args.config.as_deref())?;
    let snapshot: ExtractionSnapshot = read_json(&args.snapshot, "capture snapshot")?;

    let mut request = SynthesisRequest::new(args.url, snapshot);
    request.design_prompt = args.prompt;

    let tokens = StylePipeline::new(config)
        .legacy_tokens(&request)
        .map_err(|err| HelpfulError::snapshot_rejected(&args.snapshot, &err.to_string()))?;

    println!("{}", serde_json::to_string_pretty(&tokens)?);
    Ok(())
}
