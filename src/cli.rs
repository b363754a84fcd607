//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_PATH;

/// shortmark - personal bookmarks with 3-character short links
#[derive(Parser, Debug)]
#[command(name = "shortmark")]
#[command(version)]
#[command(about = "Personal bookmarking service with short links", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Write a configuration file containing every default value
    GenerateConfig {
        /// Output path
        #[arg(long, short = 'o', default_value = DEFAULT_CONFIG_PATH)]
        output: String,
    },
}

impl Cli {
    /// Subcommand to run; `serve` when none was given
    pub fn command(&self) -> Commands {
        match &self.command {
            Some(Commands::GenerateConfig { output }) => Commands::GenerateConfig {
                output: output.clone(),
            },
            Some(Commands::Serve) | None => Commands::Serve,
        }
    }
}
