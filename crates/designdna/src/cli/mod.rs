//! Subcommands of the `designdna` binary.
//!
//! Every command reads its inputs from JSON files and writes JSON or plain
//! text to stdout. Logs go to stderr and the rolling log file.

pub mod config;
pub mod error;
pub mod input;
pub mod legacy;
pub mod prompt;
pub mod synth;
pub mod tokens;
