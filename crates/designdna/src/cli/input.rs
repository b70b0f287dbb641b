//! Reading command inputs

use anyhow::Result;
use designdna_core::{PipelineConfig, Viewport};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::debug;

use super::error::HelpfulError;

/// Pipeline config file looked up in the home directory
pub const CONFIG_FILE: &str = "config.toml";

pub fn read_text(path: &Path) -> Result<String, HelpfulError> {
    if !path.exists() {
        return Err(HelpfulError::file_not_found(path));
    }
    fs::read_to_string(path).map_err(|err| HelpfulError::cannot_read_file(path, &err.to_string()))
}

/// Parse a JSON file; `kind` names the document in error messages.
pub fn read_json<T: DeserializeOwned>(path: &Path, kind: &str) -> Result<T, HelpfulError> {
    let text = read_text(path)?;
    serde_json::from_str(&text)
        .map_err(|err| HelpfulError::json_parse_error(path, kind, &err.to_string()))
}

/// Explicit `--config`, else `<home>/config.toml` when present, else defaults.
pub fn load_pipeline_config(explicit: Option<&Path>) -> Result<PipelineConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = designdna_logging::designdna_home()?.join(CONFIG_FILE);
            if !candidate.exists() {
                debug!("No pipeline config found, using defaults");
                return Ok(PipelineConfig::default());
            }
            candidate
        }
    };

    let text = read_text(&path)?;
    let config = PipelineConfig::from_toml(&text)
        .map_err(|err| HelpfulError::invalid_config(&path, &err.to_string()))?;
    debug!(path = %path.display(), "Loaded pipeline config");
    Ok(config)
}

/// Parse `WIDTHxHEIGHT`.
pub fn parse_size(value: &str) -> Result<Viewport, HelpfulError> {
    let (width, height) = value
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(|| HelpfulError::invalid_size(value))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| HelpfulError::invalid_size(value))
    };
    Ok(Viewport { width: f64::from(parse(width)?), height: f64::from(parse(height)?) })
}
