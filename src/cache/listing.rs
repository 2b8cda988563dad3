use chrono::{DateTime, Utc};

use crate::api::{City, MealApi, Schedule};
use crate::error::ApiError;
use crate::utils::debug_log;

use super::CacheConfig;
use super::store;

/// City names, served from `cities.json` while it is fresh
pub(crate) fn list_cities(cache: &CacheConfig, api: &dyn MealApi) -> Result<Vec<String>, ApiError> {
    list_cities_at(cache, api, Utc::now())
}

pub(crate) fn list_cities_at(
    cache: &CacheConfig,
    api: &dyn MealApi,
    now: DateTime<Utc>,
) -> Result<Vec<String>, ApiError> {
    let path = cache.cities_path();

    if let Some(cities) = store::load_fresh::<Vec<City>>(&path, now, cache.ttl)
        && !cities.is_empty()
    {
        debug_log!("Using cached cities from {}", path.display());
        return Ok(cities.into_iter().map(|c| c.name).collect());
    }

    debug_log!("Cities cache missing or stale, fetching");
    let cities = api.get_cities()?;
    if let Err(e) = store::save(&path, &cities, now) {
        eprintln!("Warning: Failed to write {}: {}", path.display(), e);
    }
    Ok(cities.into_iter().map(|c| c.name).collect())
}

/// Menu of one city. All cities share `menu.json`, each with its own
/// timestamp.
pub(crate) fn list_menu(
    cache: &CacheConfig,
    api: &dyn MealApi,
    city: &str,
) -> Result<Vec<Schedule>, ApiError> {
    list_menu_at(cache, api, city, Utc::now())
}

pub(crate) fn list_menu_at(
    cache: &CacheConfig,
    api: &dyn MealApi,
    city: &str,
    now: DateTime<Utc>,
) -> Result<Vec<Schedule>, ApiError> {
    let path = cache.menu_path();

    if let Some(schedules) = store::load_fresh_keyed::<Vec<Schedule>>(&path, city, now, cache.ttl)
        && !schedules.is_empty()
    {
        debug_log!("Using cached menu for {city}");
        return Ok(schedules);
    }

    debug_log!("Menu cache for {city} missing or stale, fetching");
    let schedules = api.get_schedules(city)?;
    if let Err(e) = store::save_keyed(&path, city, &schedules, now) {
        eprintln!("Warning: Failed to write {}: {}", path.display(), e);
    }
    Ok(schedules)
}
