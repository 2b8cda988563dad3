use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::consts::{APP_DIR, DEFAULT_CACHE_TTL_MINUTES, DEFAULT_LOGIN_ATTEMPTS, DEFAULT_TIMEOUT_SECS};
use crate::retry::RetryPolicy;

/// Overrides for one retry policy; unset keys keep the built-in value
#[derive(Debug, Default, Clone, Deserialize)]
pub(crate) struct RetryConfig {
    #[serde(default)]
    pub(crate) max_attempts: Option<u32>,
    #[serde(default)]
    pub(crate) delay_ms: Option<u64>,
    #[serde(default)]
    pub(crate) multiplier: Option<f64>,
    #[serde(default)]
    pub(crate) max_delay_ms: Option<u64>,
}

impl RetryConfig {
    pub(crate) fn apply(&self, base: RetryPolicy) -> RetryPolicy {
        let mut policy = match self.delay_ms {
            Some(ms) => base.with_initial_delay(Duration::from_millis(ms)),
            None => base,
        };
        if let Some(max_attempts) = self.max_attempts {
            policy.max_attempts = max_attempts;
        }
        if let Some(multiplier) = self.multiplier.filter(|m| m.is_finite() && *m >= 0.0) {
            policy.multiplier = multiplier;
        }
        if let Some(ms) = self.max_delay_ms {
            policy.max_delay = Duration::from_millis(ms);
        }
        policy
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) email_address: Option<String>,
    #[serde(default)]
    pub(crate) cache_dir: Option<PathBuf>,
    #[serde(default)]
    pub(crate) cache_ttl_minutes: Option<u32>,
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    #[serde(default)]
    pub(crate) login_attempts: Option<u32>,
    #[serde(default)]
    pub(crate) debug: bool,
    #[serde(default)]
    pub(crate) reserve: RetryConfig,
    #[serde(default)]
    pub(crate) session: RetryConfig,
}

impl Config {
    pub(crate) fn load() -> Self {
        // Try config locations in order of priority
        for path in Self::get_config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match toml::from_str::<Config>(&content) {
                    Ok(config) => {
                        eprintln!("Loaded config from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                    }
                }
            }
        }

        Self::default()
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/mealpal/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join(APP_DIR).join("config.toml"));
        }

        // 2. Platform config dir (e.g. ~/Library/Application Support/mealpal/config.toml)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join(APP_DIR).join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.mealpal.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".mealpal.toml"));
        }

        paths
    }

    pub(crate) fn cache_ttl_minutes(&self) -> u32 {
        self.cache_ttl_minutes.unwrap_or(DEFAULT_CACHE_TTL_MINUTES)
    }

    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub(crate) fn login_attempts(&self) -> u32 {
        self.login_attempts.unwrap_or(DEFAULT_LOGIN_ATTEMPTS)
    }

    pub(crate) fn reserve_policy(&self) -> RetryPolicy {
        self.reserve.apply(RetryPolicy::RESERVATION)
    }

    pub(crate) fn session_policy(&self) -> RetryPolicy {
        self.session.apply(RetryPolicy::SESSION_VALIDATION)
    }
}
