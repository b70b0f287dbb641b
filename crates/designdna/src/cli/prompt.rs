//! `designdna prompt`: print the design prompt
//!
//! Accepts either a style spec, which is compiled, or a token document,
//! whose embedded prompt is printed after the version check.

use anyhow::Result;
use clap::Args;
use designdna_core::{compile_design_prompt, parse_tokens_document, StyleSpec, TokenDocumentError, SCHEMA_VERSION};
use std::path::PathBuf;

use super::error::HelpfulError;
use super::input::read_text;

#[derive(Debug, Args)]
pub struct PromptArgs {
    /// Style spec or token document (JSON)
    pub input: PathBuf,
}

pub fn run(args: PromptArgs) -> Result<()> {
    let path = &args.input;
    let text = read_text(path)?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .map_err(|err| HelpfulError::json_parse_error(path, "style spec or token document", &err.to_string()))?;

    let prompt = if value.get("schema_version").is_some() {
        match parse_tokens_document(&text) {
            Ok(doc) => doc.design_prompt,
            Err(TokenDocumentError::UnsupportedVersion { found, expected }) => {
                return Err(HelpfulError::unsupported_schema_version(path, &found, expected).into());
            }
            Err(err) => {
                return Err(HelpfulError::json_parse_error(path, "token document", &err.to_string()).into());
            }
        }
    } else {
        let spec: StyleSpec = serde_json::from_value(value)
            .map_err(|err| HelpfulError::json_parse_error(path, "style spec", &err.to_string()))?;
        compile_design_prompt(&spec)
    };

    if prompt.trim().is_empty() {
        return Err(HelpfulError::new("Token document has an empty design_prompt")
            .with_context(format!("{} (schema_version {SCHEMA_VERSION})", path.display()))
            .with_suggestion("TRY: Compile from the style spec instead: designdna prompt <style_spec.json>")
            .into());
    }

    println!("{}", prompt);
    Ok(())
}
