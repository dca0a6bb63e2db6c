mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;

use quizgen_core::config::{self, Config};

use crate::cli::{CliArgs, Command};

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine-readable JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    config::load_dotenv();
    let config = Config::from_env();

    match args.command {
        Command::Chunk { file, max_chars, save } => {
            let response = commands::chunk(&config, &file, max_chars, save)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Export { input, output } => {
            let path = commands::export(&config, &input, output.as_deref())?;
            println!("{}", path.display());
        }
        Command::Merge { kind, inputs } => {
            let (path, count) = commands::merge(&config, kind, &inputs)?;
            println!("{} ({} records)", path.display(), count);
        }
        Command::Config => {
            config.log_summary();
            let json = serde_json::to_string_pretty(&config).context("failed to serialize config")?;
            println!("{json}");
        }
    }

    Ok(())
}
