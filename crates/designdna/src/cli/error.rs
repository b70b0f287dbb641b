//! User-facing errors with suggestions
//!
//! Rendered as an `ERROR:` line, an optional `CONTEXT:` line and indented
//! `TRY:` hints.

use std::fmt;
use std::path::Path;

#[derive(Debug)]
pub struct HelpfulError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_suggestions(mut self, suggestions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.suggestions.extend(suggestions.into_iter().map(Into::into));
        self
    }

    pub fn file_not_found(path: &Path) -> Self {
        let parent = path
            .parent()
            .map(|p| p.display().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| ".".to_string());
        Self::new(format!("File not found: {}", path.display()))
            .with_context("The specified file does not exist")
            .with_suggestions([
                format!("TRY: Check if the file exists: ls -la {}", path.display()),
                format!("TRY: Look for similar files: ls {parent}"),
            ])
    }

    pub fn cannot_read_file(path: &Path, reason: &str) -> Self {
        Self::new(format!("Cannot read file: {}", path.display()))
            .with_context(reason.to_string())
            .with_suggestion(format!("TRY: Check file permissions: ls -la {}", path.display()))
    }

    /// `expected` names the document kind, e.g. "capture snapshot"
    pub fn json_parse_error(path: &Path, expected: &str, details: &str) -> Self {
        Self::new(format!("JSON parse error: {details}"))
            .with_context(format!("Failed to read {} from {}", expected, path.display()))
            .with_suggestions([
                format!("TRY: Validate the JSON: python -m json.tool {}", path.display()),
                format!("TRY: Check that the file really is a {expected}"),
            ])
    }

    pub fn unsupported_schema_version(path: &Path, found: &str, expected: &str) -> Self {
        Self::new(format!("Unsupported token document version: {found:?}"))
            .with_context(format!("{} declares schema_version {found:?}", path.display()))
            .with_suggestions([
                format!("TRY: Only schema_version {expected:?} is supported"),
                "TRY: Regenerate the document: designdna tokens <style_spec.json>".to_string(),
            ])
    }

    pub fn invalid_config(path: &Path, details: &str) -> Self {
        Self::new(format!("Invalid pipeline config: {}", path.display()))
            .with_context(details.to_string())
            .with_suggestions([
                "TRY: Print the effective settings: designdna config".to_string(),
                "TRY: Sections are [limits], [weights] and [clustering]; every key is optional".to_string(),
            ])
    }

    pub fn invalid_size(value: &str) -> Self {
        Self::new(format!("Invalid size: '{value}'"))
            .with_context("Sizes are WIDTHxHEIGHT in pixels")
            .with_suggestion("TRY: --screenshot 1440x900")
    }

    pub fn snapshot_rejected(path: &Path, details: &str) -> Self {
        Self::new(format!("Snapshot rejected: {details}"))
            .with_context(format!("{} exceeds the capture limits", path.display()))
            .with_suggestions([
                "TRY: Re-capture the page with the default limits".to_string(),
                "TRY: Raise the bound under [limits] in the pipeline config".to_string(),
            ])
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}
