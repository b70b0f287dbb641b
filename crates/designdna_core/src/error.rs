//! Error types for the synthesis core.
//!
//! The pipeline itself is total over well-formed snapshots. Errors only
//! surface when a caller breaks the input contract, when a config file
//! cannot be read, or when a token document has the wrong version.

use thiserror::Error;

/// A snapshot that violates the capture contract.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnapshotError {
    /// More entries than the contract allows
    #[error("snapshot has {actual} {field}, limit is {limit}")]
    TooMany {
        field: &'static str,
        actual: usize,
        limit: usize,
    },

    /// A node text preview longer than the contract allows
    #[error("node {selector} has a {actual}-char text preview, limit is {limit}")]
    TextTooLong {
        selector: String,
        actual: usize,
        limit: usize,
    },

    /// Section with too many child selectors
    #[error("section {selector} lists {actual} children, limit is {limit}")]
    TooManyChildren {
        selector: String,
        actual: usize,
        limit: usize,
    },

    /// Viewport with a non-positive or non-finite dimension
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },
}

/// Pipeline configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML that does not match the config shape
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors reading a serialized semantic token document.
#[derive(Error, Debug)]
pub enum TokenDocumentError {
    /// Malformed JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Document written for another schema version
    #[error("unsupported schema_version {found:?}, expected {expected:?}")]
    UnsupportedVersion { found: String, expected: &'static str },
}
