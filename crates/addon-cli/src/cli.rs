//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Addon Loader - Resolve addon versions through release channels and load their manifests
#[derive(Parser, Debug)]
#[command(name = "addon-loader")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Channel location: a directory or an http(s):// base URL
    ///
    /// Defaults to the config file value, then ./channels.
    #[arg(long, global = true, env = "ADDON_LOADER_CHANNEL")]
    pub channel: Option<String>,

    /// Path to a TOML loader configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// HTTP request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Resolve an addon and print its manifests
    ///
    /// Examples:
    ///   addon-loader resolve -f nginx.yaml
    ///   addon-loader --channel https://example.com/channels resolve -f nginx.yaml --json
    Resolve {
        /// Addon resource file (YAML)
        #[arg(short, long)]
        file: PathBuf,

        /// Output as a JSON object of path to content
        #[arg(long)]
        json: bool,
    },

    /// Print the latest version of a component in a channel
    Latest {
        /// Component name
        component: String,

        /// Channel name
        #[arg(short, long, default_value = addon_loader::DEFAULT_CHANNEL)]
        name: String,
    },

    /// List the components and versions a channel offers
    Channel {
        /// Channel name
        #[arg(short, long, default_value = addon_loader::DEFAULT_CHANNEL)]
        name: String,
    },
}
