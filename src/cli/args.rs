//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

use super::commands::Commands;

#[derive(Debug, Parser)]
#[command(name = "mealpal")]
#[command(about = "Reserve MealPal lunches from the command line", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Output listings as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Directory for cached listings and the saved session
    #[arg(long, global = true, value_name = "DIR")]
    pub(crate) cache_dir: Option<PathBuf>,

    /// Account email (defaults to `email_address` from the config file)
    #[arg(long, global = true, value_name = "ADDRESS")]
    pub(crate) email: Option<String>,

    /// Enable debug output (requests, cache hits, timings)
    #[arg(long, global = true)]
    pub(crate) debug: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if !self.debug && config.debug {
            self.debug = true;
        }
        if self.cache_dir.is_none() {
            self.cache_dir = config.cache_dir.clone();
        }
        if self.email.is_none() {
            self.email = config.email_address.clone();
        }
        self
    }
}
