//! Addon Loader CLI
//!
//! Resolves addon resources against release channels and prints their manifests.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;

use addon_loader::{Context, LoaderConfig, ManifestLoader};
use cli::{Cli, Commands};
use error::{CliError, Result};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    if let Err(e) = addon_loader::logging::init(level) {
        eprintln!("{}: failed to initialise logging: {}", "warning".yellow().bold(), e);
    }

    let config = load_config(&cli)?;
    tracing::debug!(channel = %config.channel, "using channel location");

    let loader = ManifestLoader::from_config(&config)?;
    let ctx = Context::background();

    match cli.command {
        Commands::Resolve { file, json } => commands::run_resolve(&loader, &ctx, &file, json).await,
        Commands::Latest { component, name } => {
            commands::run_latest(&loader, &ctx, &component, &name).await
        }
        Commands::Channel { name } => commands::run_channel(&loader, &ctx, &name).await,
    }
}

/// Merge flags over the config file over defaults.
fn load_config(cli: &Cli) -> Result<LoaderConfig> {
    let mut config = match &cli.config {
        Some(path) => LoaderConfig::load(path)?,
        None => LoaderConfig::default(),
    };

    if let Some(channel) = &cli.channel {
        config.channel = channel.clone();
    }
    if let Some(timeout) = cli.timeout {
        if timeout == 0 {
            return Err(CliError::user("--timeout must be greater than zero"));
        }
        config.timeout_secs = Some(timeout);
    }

    Ok(config)
}
