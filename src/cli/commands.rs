//! CLI subcommand definitions

use clap::Subcommand;

/// Main CLI commands
#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Reserve a meal, retrying until the reservation goes through
    Reserve {
        /// Restaurant name (or meal name with --meal)
        restaurant: String,
        /// Pickup window, e.g. 12:15pm-12:30pm
        reservation_time: String,
        /// City name as shown by `list cities`
        city: String,
        /// Match the first argument against meal names instead of restaurants
        #[arg(long)]
        meal: bool,
        /// Give up after this many attempts
        #[arg(long, value_name = "N")]
        max_attempts: Option<u32>,
        /// Wait between attempts, in milliseconds
        #[arg(long, value_name = "MS")]
        retry_delay_ms: Option<u64>,
    },
    /// List available cities, restaurants or meals
    List {
        #[command(subcommand)]
        command: ListCommands,
    },
    /// Show the current reservation of the logged-in account
    Status,
}

#[derive(Debug, Subcommand)]
pub(crate) enum ListCommands {
    /// List available cities
    Cities,
    /// List restaurants serving lunch in a city
    Restaurants { city: String },
    /// List meal choices in a city
    Meals { city: String },
}
