//! Time-boxed JSON caches for city and menu listings
//!
//! Everything lives in one directory described by `CacheConfig`; nothing
//! here reads process-wide state.

pub(crate) mod listing;
pub(crate) mod store;

use std::path::PathBuf;

use chrono::TimeDelta;

use crate::consts::{
    APP_DIR, CITIES_CACHE_FILE, DEFAULT_CACHE_TTL_MINUTES, MENU_CACHE_FILE, SESSION_FILE,
};
use crate::error::AppError;

pub(crate) use listing::{list_cities, list_menu};

#[derive(Debug, Clone)]
pub(crate) struct CacheConfig {
    pub(crate) dir: PathBuf,
    pub(crate) ttl: TimeDelta,
}

impl CacheConfig {
    pub(crate) fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            ttl: TimeDelta::minutes(i64::from(DEFAULT_CACHE_TTL_MINUTES)),
        }
    }

    pub(crate) fn with_ttl_minutes(mut self, minutes: u32) -> Self {
        self.ttl = TimeDelta::minutes(i64::from(minutes));
        self
    }

    pub(crate) fn cities_path(&self) -> PathBuf {
        self.dir.join(CITIES_CACHE_FILE)
    }

    pub(crate) fn menu_path(&self) -> PathBuf {
        self.dir.join(MENU_CACHE_FILE)
    }

    pub(crate) fn session_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    /// Create the cache directory if it does not exist yet
    pub(crate) fn ensure_dir(&self) -> Result<(), AppError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| AppError::CacheDir {
            path: self.dir.display().to_string(),
            source,
        })
    }
}

/// Default cache directory: `<user cache dir>/mealpal`
pub(crate) fn default_cache_dir() -> Option<PathBuf> {
    let base = dirs::cache_dir().or_else(|| dirs::home_dir().map(|h| h.join(".cache")))?;
    Some(base.join(APP_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_live_under_dir() {
        let config = CacheConfig::new(PathBuf::from("/tmp/mealpal-test"));
        assert_eq!(config.cities_path(), PathBuf::from("/tmp/mealpal-test/cities.json"));
        assert_eq!(config.menu_path(), PathBuf::from("/tmp/mealpal-test/menu.json"));
        assert_eq!(config.session_path(), PathBuf::from("/tmp/mealpal-test/session.json"));
    }

    #[test]
    fn default_ttl_is_one_hour() {
        let config = CacheConfig::new(PathBuf::from("x"));
        assert_eq!(config.ttl, TimeDelta::hours(1));
        assert_eq!(config.with_ttl_minutes(5).ttl, TimeDelta::minutes(5));
    }

    #[test]
    fn ensure_dir_creates_nested_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let config = CacheConfig::new(tmp.path().join("a").join("b"));
        config.ensure_dir().unwrap();
        assert!(config.dir.is_dir());
    }
}
