//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `flow_email_extractor` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use flow_email_extractor::app::run;
use flow_email_extractor::cli::Cli;
use flow_email_extractor::initialization::init_logger_with;

#[tokio::main]
async fn main() -> Result<()> {
    // Load KLAVIYO_API_KEY and friends from .env, current directory first,
    // then next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = run(cli).await {
        eprintln!("flow_email_extractor error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
