use std::time::Duration;

use crate::api::{MealApi, MealPalClient, MealTarget, PickupWindow, ReservationRequest, Schedule};
use crate::cache::{CacheConfig, default_cache_dir, list_cities, list_menu};
use crate::cli::{Cli, Commands, ListCommands};
use crate::config::Config;
use crate::error::AppError;
use crate::reserve::execute_reserve;
use crate::retry::RetryPolicy;
use crate::session::{PromptCredentials, SessionOptions, SessionStore, initialize_session};

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) config: &'a Config,
    pub(crate) cache: CacheConfig,
}

impl CommandContext<'_> {
    fn client(&self) -> MealPalClient {
        MealPalClient::new(self.config.timeout())
    }

    /// A client with a validated (or freshly logged-in) session
    fn logged_in_client(&self) -> Result<MealPalClient, AppError> {
        let mut client = self.client();
        let store = SessionStore::new(self.cache.session_path());
        let mut credentials = PromptCredentials::new(self.cli.email.clone());
        let options = SessionOptions {
            validation: self.config.session_policy(),
            login_attempts: self.config.login_attempts(),
        };
        initialize_session(&mut client, &store, &mut credentials, &options)?;
        Ok(client)
    }
}

/// Print names one per line, or as a JSON array with `--json`
fn print_names(names: &[String], json: bool) {
    if json {
        match serde_json::to_string_pretty(names) {
            Ok(out) => println!("{out}"),
            Err(e) => eprintln!("Failed to encode JSON: {e}"),
        }
    } else if !names.is_empty() {
        println!("{}", names.join("\n"));
    }
}

fn restaurant_names(schedules: &[Schedule]) -> Vec<String> {
    schedules.iter().map(|s| s.restaurant.name.clone()).collect()
}

fn meal_names(schedules: &[Schedule]) -> Vec<String> {
    schedules.iter().map(|s| s.meal.name.clone()).collect()
}

fn handle_list(command: &ListCommands, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let client = ctx.client();
    let names = match command {
        ListCommands::Cities => list_cities(&ctx.cache, &client)?,
        ListCommands::Restaurants { city } => restaurant_names(&list_menu(&ctx.cache, &client, city)?),
        ListCommands::Meals { city } => meal_names(&list_menu(&ctx.cache, &client, city)?),
    };
    print_names(&names, ctx.cli.json);
    Ok(())
}

struct ReserveArgs<'a> {
    name: &'a str,
    reservation_time: &'a str,
    city: &'a str,
    by_meal: bool,
    max_attempts: Option<u32>,
    retry_delay_ms: Option<u64>,
}

/// Reservation policy from config, with command-line overrides on top
fn reserve_policy(
    config: &Config,
    max_attempts: Option<u32>,
    retry_delay_ms: Option<u64>,
) -> RetryPolicy {
    let mut policy = config.reserve_policy();
    if let Some(max_attempts) = max_attempts {
        policy.max_attempts = max_attempts;
    }
    if let Some(delay_ms) = retry_delay_ms {
        policy = policy.with_initial_delay(Duration::from_millis(delay_ms));
    }
    policy
}

fn handle_reserve(args: ReserveArgs<'_>, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    // Reject a malformed time before prompting for a password
    let timing = PickupWindow::parse(args.reservation_time)?;
    let target = if args.by_meal {
        MealTarget::Meal(args.name.to_string())
    } else {
        MealTarget::Restaurant(args.name.to_string())
    };
    let request = ReservationRequest {
        timing,
        city: args.city.to_string(),
        target,
        cancel_current_meal: false,
    };

    let policy = reserve_policy(ctx.config, args.max_attempts, args.retry_delay_ms);

    let client = ctx.logged_in_client()?;
    let attempt = execute_reserve(&client, &request, &policy)?;
    println!("Reservation success! ({} at {}, attempt {attempt})", args.name, timing);
    Ok(())
}

fn handle_status(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let client = ctx.logged_in_client()?;
    let current = client.get_current_meal()?;
    match serde_json::to_string_pretty(&current) {
        Ok(out) => println!("{out}"),
        Err(e) => eprintln!("Failed to encode JSON: {e}"),
    }
    Ok(())
}

pub(crate) fn run(cli: &Cli, config: &Config) -> Result<(), AppError> {
    let dir = match &cli.cache_dir {
        Some(dir) => dir.clone(),
        None => default_cache_dir().ok_or(AppError::NoCacheDir)?,
    };
    let cache = CacheConfig::new(dir).with_ttl_minutes(config.cache_ttl_minutes());
    cache.ensure_dir()?;

    let ctx = CommandContext { cli, config, cache };

    match &cli.command {
        Commands::List { command } => handle_list(command, &ctx),
        Commands::Reserve {
            restaurant,
            reservation_time,
            city,
            meal,
            max_attempts,
            retry_delay_ms,
        } => handle_reserve(
            ReserveArgs {
                name: restaurant,
                reservation_time,
                city,
                by_meal: *meal,
                max_attempts: *max_attempts,
                retry_delay_ms: *retry_delay_ms,
            },
            &ctx,
        ),
        Commands::Status => handle_status(&ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::schedule;

    #[test]
    fn names_follow_menu_order() {
        let menu = vec![
            schedule("s1", "Tacos Place", "Burrito"),
            schedule("s2", "Sushi Bar", "Salmon Roll"),
        ];
        assert_eq!(restaurant_names(&menu), vec!["Tacos Place", "Sushi Bar"]);
        assert_eq!(meal_names(&menu), vec!["Burrito", "Salmon Roll"]);
    }

    #[test]
    fn retry_flags_override_config() {
        let config = Config::default();

        let policy = reserve_policy(&config, None, None);
        assert_eq!(policy, RetryPolicy::RESERVATION);

        let policy = reserve_policy(&config, Some(3), Some(250));
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.delay_after(1), Duration::from_millis(250));
    }

    #[test]
    fn long_retry_delay_flag_is_not_capped() {
        let policy = reserve_policy(&Config::default(), None, Some(45_000));
        assert_eq!(policy.delay_after(1), Duration::from_secs(45));
        assert_eq!(policy.delay_after(100), Duration::from_secs(45));
    }
}
