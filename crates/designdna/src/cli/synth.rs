//! `designdna synth`: snapshot in, style spec and token document out

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use designdna_core::vision::{dominant_colors_from_rgba, DEFAULT_SAMPLE_STEP};
use designdna_core::{ExtractionSnapshot, StylePipeline, SynthesisOutput, SynthesisRequest, Viewport};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::error::HelpfulError;
use super::input::{load_pipeline_config, parse_size, read_json};

pub const STYLE_SPEC_FILE: &str = "style_spec.json";
pub const TOKENS_FILE: &str = "tokens.json";

#[derive(Debug, Args)]
pub struct SynthArgs {
    /// Capture snapshot (JSON)
    pub snapshot: PathBuf,

    /// Page URL the snapshot was captured from
    #[arg(long)]
    pub url: String,

    /// Dominant screenshot color, repeatable
    #[arg(long = "dominant-color")]
    pub dominant_colors: Vec<String>,

    /// Screenshot size as WIDTHxHEIGHT
    #[arg(long)]
    pub screenshot: Option<String>,

    /// Raw RGBA screenshot pixels to sample dominant colors from (needs --screenshot)
    #[arg(long, requires = "screenshot")]
    pub screenshot_rgba: Option<PathBuf>,

    /// Pipeline config (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the generated design prompt
    #[arg(long)]
    pub prompt: Option<String>,

    /// Write style_spec.json and tokens.json here
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Set generated_at on the token document
    #[arg(long)]
    pub stamp: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct SynthReport<'a> {
    summary: &'a str,
    warnings: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    files: Option<WrittenFiles>,
    #[serde(skip_serializing_if = "Option::is_none")]
    style_spec: Option<&'a designdna_core::StyleSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tokens: Option<&'a designdna_core::SemanticTokensJson>,
}

#[derive(Serialize)]
struct WrittenFiles {
    style_spec: String,
    tokens: String,
}

pub fn run(args: SynthArgs) -> Result<()> {
    let config = load_pipeline_config(args.config.as_deref())?;
    let snapshot: ExtractionSnapshot = read_json(&args.snapshot, "capture snapshot")?;

    let screenshot = args.screenshot.as_deref().map(parse_size).transpose()?;
    let mut dominant_colors = args.dominant_colors.clone();
    if let (Some(path), Some(size)) = (&args.screenshot_rgba, screenshot) {
        dominant_colors.extend(sample_screenshot(path, size)?);
    }

    let request = SynthesisRequest {
        url: args.url.clone(),
        snapshot,
        dominant_colors,
        screenshot,
        design_prompt: args.prompt.clone(),
    };

    let pipeline = StylePipeline::new(config);
    let mut output = pipeline
        .synthesize(&request)
        .map_err(|err| HelpfulError::snapshot_rejected(&args.snapshot, &err.to_string()))?;
    if args.stamp {
        output.tokens = output.tokens.stamped(Utc::now());
    }

    let files = match &args.out_dir {
        Some(dir) => Some(write_outputs(dir, &output)?),
        None => None,
    };

    if args.json {
        let inline = files.is_none();
        let report = SynthReport {
            summary: &output.summary,
            warnings: &output.warnings,
            files,
            style_spec: inline.then_some(&output.style_spec),
            tokens: inline.then_some(&output.tokens),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_human(&output, files.as_ref());
    }

    Ok(())
}

/// Sample dominant colors from a raw RGBA dump.
fn sample_screenshot(path: &Path, size: Viewport) -> Result<Vec<String>> {
    let pixels = fs::read(path).map_err(|err| HelpfulError::cannot_read_file(path, &err.to_string()))?;
    let (width, height) = (size.width as usize, size.height as usize);
    let expected = width * height * 4;
    if pixels.len() != expected {
        return Err(HelpfulError::new(format!(
            "Screenshot has {} bytes, expected {} for {}x{} RGBA",
            pixels.len(),
            expected,
            width,
            height
        ))
        .with_context(format!("Reading {}", path.display()))
        .with_suggestion("TRY: Pass the exact pixel size of the dump with --screenshot")
        .into());
    }
    Ok(dominant_colors_from_rgba(&pixels, width, height, DEFAULT_SAMPLE_STEP))
}

fn write_outputs(dir: &Path, output: &SynthesisOutput) -> Result<WrittenFiles> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let spec_path = dir.join(STYLE_SPEC_FILE);
    let tokens_path = dir.join(TOKENS_FILE);
    for (path, json) in [
        (&spec_path, serde_json::to_string_pretty(&output.style_spec)?),
        (&tokens_path, serde_json::to_string_pretty(&output.tokens)?),
    ] {
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    }

    info!(dir = %dir.display(), "Wrote style spec and tokens");
    Ok(WrittenFiles {
        style_spec: spec_path.display().to_string(),
        tokens: tokens_path.display().to_string(),
    })
}

fn print_human(output: &SynthesisOutput, files: Option<&WrittenFiles>) {
    let spec = &output.style_spec;

    println!("{}", output.summary);
    println!();
    println!("Palette roles:");
    for (role, value) in spec.palette.roles.entries() {
        println!("  {:<14} {}", role, value.unwrap_or("-"));
    }
    println!();
    println!("Type scale:");
    for entry in &spec.typography.scale {
        println!("  {:<11} {}px", entry.role_hint, entry.px);
    }
    println!();
    println!("Components:");
    for (name, recipe) in spec.components.iter() {
        match recipe {
            Some(recipe) => println!("  {:<17} {}", name, recipe.selector),
            None => println!("  {:<17} not detected", name),
        }
    }

    if let Some(files) = files {
        println!();
        println!("Wrote {}", files.style_spec);
        println!("Wrote {}", files.tokens);
    }

    for warning in &output.warnings {
        eprintln!("WARNING: {}", warning);
    }
}
