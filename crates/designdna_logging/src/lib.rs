//! Shared logging setup for DesignDNA binaries.
//!
//! Installs one tracing registry with two layers: a size-rotated file in
//! `<home>/logs` and a stderr console. `RUST_LOG` overrides the default
//! filter for both.

mod rotate;

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use rotate::{RotatingFile, SharedLogFile};

/// Environment variable overriding the home directory
pub const HOME_ENV: &str = "DESIGNDNA_HOME";

const DEFAULT_LOG_FILTER: &str = "designdna=info,designdna_core=info";
const CONSOLE_QUIET_FILTER: &str = "warn";
const MAX_LOG_FILES: usize = 5;
const MAX_LOG_FILE_SIZE: u64 = 10 * 1024 * 1024;

pub struct LogConfig<'a> {
    /// Log file stem, e.g. `designdna` for `designdna.log`
    pub app_name: &'a str,
    /// Mirror the file filter on stderr instead of warnings only
    pub verbose: bool,
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(config: LogConfig<'_>) -> Result<()> {
    let log_dir = ensure_logs_dir()?;
    let file = RotatingFile::open(log_dir, config.app_name, MAX_LOG_FILES, MAX_LOG_FILE_SIZE)
        .with_context(|| format!("Failed to open log file for {}", config.app_name))?;

    let file_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let console_filter = if config.verbose {
        file_filter.clone()
    } else {
        EnvFilter::new(CONSOLE_QUIET_FILTER)
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(SharedLogFile::new(file))
                .with_ansi(false)
                .with_filter(file_filter),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(console_filter),
        )
        .try_init()
        .map_err(|err| anyhow!("Failed to install tracing subscriber: {err}"))?;

    Ok(())
}

/// `$DESIGNDNA_HOME`, or `~/.designdna`.
pub fn designdna_home() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(HOME_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    dirs::home_dir()
        .map(|home| home.join(".designdna"))
        .context("Could not determine home directory; set DESIGNDNA_HOME")
}

pub fn logs_dir() -> Result<PathBuf> {
    Ok(designdna_home()?.join("logs"))
}

pub fn ensure_logs_dir() -> Result<PathBuf> {
    let logs = logs_dir()?;
    fs::create_dir_all(&logs)
        .with_context(|| format!("Failed to create logs directory: {}", logs.display()))?;
    Ok(logs)
}
