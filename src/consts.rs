/// Every endpoint lives on this host
pub(crate) const BASE_URL: &str = "https://secure.mealpal.com";

pub(crate) const LOGIN_PATH: &str = "/1/login";
pub(crate) const CITIES_PATH: &str = "/1/functions/getCitiesWithNeighborhoods";
pub(crate) const RESERVATION_PATH: &str = "/api/v2/reservations";
pub(crate) const KITCHEN_PATH: &str = "/1/functions/checkKitchen3";

/// Menu endpoint for a single city: "/api/v1/cities/{id}/product_offerings/lunch/menu"
pub(crate) fn menu_path(city_id: &str) -> String {
    format!("/api/v1/cities/{city_id}/product_offerings/lunch/menu")
}

/// Directory name used under the user cache/config dirs
pub(crate) const APP_DIR: &str = "mealpal";

pub(crate) const CITIES_CACHE_FILE: &str = "cities.json";
pub(crate) const MENU_CACHE_FILE: &str = "menu.json";
pub(crate) const SESSION_FILE: &str = "session.json";

/// Cached listings are reused for this long
pub(crate) const DEFAULT_CACHE_TTL_MINUTES: u32 = 60;
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub(crate) const DEFAULT_LOGIN_ATTEMPTS: u32 = 3;

/// Reservation source reported to the service
pub(crate) const RESERVATION_SOURCE: &str = "Web";
