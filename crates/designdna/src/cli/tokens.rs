//! `designdna tokens`: flatten a style spec into a token document

use anyhow::Result;
use chrono::Utc;
use clap::Args;
use designdna_core::validate::validation_warning;
use designdna_core::{compile_design_prompt, validate_style_spec, SemanticTokensJson, StyleSpec};
use std::path::PathBuf;
use tracing::warn;

use super::input::read_json;

#[derive(Debug, Args)]
pub struct TokensArgs {
    /// Style spec (JSON)
    pub style_spec: PathBuf,

    /// Design prompt to embed instead of the compiled one
    #[arg(long)]
    pub prompt: Option<String>,

    /// Set generated_at to the current time
    #[arg(long)]
    pub stamp: bool,
}

pub fn run(args: TokensArgs) -> Result<()> {
    let spec: StyleSpec = read_json(&args.style_spec, "style spec")?;

    if let Some(warning) = validation_warning(&validate_style_spec(&spec)) {
        warn!(path = %args.style_spec.display(), "{}", warning);
    }

    let prompt = match args.prompt {
        Some(prompt) => prompt,
        None => compile_design_prompt(&spec),
    };
    let mut tokens = SemanticTokensJson::from_style_spec(&spec, &prompt);
    if args.stamp {
        tokens = tokens.stamped(Utc::now());
    }

    println!("{}", serde_json::to_string_pretty(&tokens)?);
    Ok(())
}
