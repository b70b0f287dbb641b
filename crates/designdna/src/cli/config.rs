//! `designdna config`: resolved paths and effective pipeline settings
//!
//! All paths live under `$DESIGNDNA_HOME`, default `~/.designdna`.

use anyhow::Result;
use clap::Args;
use designdna_logging::{designdna_home, logs_dir};

use super::input::{load_pipeline_config, CONFIG_FILE};

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Show resolved paths and settings in JSON format
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ConfigArgs) -> Result<()> {
    let home = designdna_home()?;
    let logs = logs_dir()?;
    let config_path = home.join(CONFIG_FILE);
    let pipeline = load_pipeline_config(None)?;

    if args.json {
        let report = serde_json::json!({
            "home": home.to_string_lossy(),
            "logs": {
                "path": logs.to_string_lossy(),
                "exists": logs.exists(),
            },
            "config_file": {
                "path": config_path.to_string_lossy(),
                "exists": config_path.exists(),
            },
            "pipeline": pipeline,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("DESIGNDNA CONFIGURATION");
        println!("=======================");
        println!();
        println!("Home:     {}", home.display());
        println!("Logs:     {}", logs.display());
        println!(
            "Config:   {} ({})",
            config_path.display(),
            if config_path.exists() { "loaded" } else { "not found, using defaults" }
        );
        println!();
        println!("Effective pipeline settings:");
        println!();
        print!("{}", toml::to_string_pretty(&pipeline)?);
    }

    Ok(())
}
