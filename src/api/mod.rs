//! MealPal API client
//!
//! The cache, session and reservation layers talk to the service through
//! the `MealApi` trait; `MealPalClient` is the HTTP implementation.

pub(crate) mod client;
pub(crate) mod lookup;
pub(crate) mod types;

#[cfg(test)]
pub(crate) mod testing;

use crate::error::ApiError;

pub(crate) use client::MealPalClient;
pub(crate) use types::{City, MealTarget, PickupWindow, ReservationRequest, Schedule, Session};

/// Remote operations of the meal-reservation service
pub(crate) trait MealApi {
    /// Post credentials; session cookies are updated on success
    fn login(&mut self, user: &str, password: &str) -> Result<(), ApiError>;

    /// All cities, no authentication needed
    fn get_cities(&self) -> Result<Vec<City>, ApiError>;

    /// Menu of a city, looked up by display name
    fn get_schedules(&self, city_name: &str) -> Result<Vec<Schedule>, ApiError>;

    /// Place a reservation and hand back the raw HTTP status
    fn reserve_meal(&self, request: &ReservationRequest) -> Result<u16, ApiError>;

    /// Current reservation state of the logged-in user
    fn get_current_meal(&self) -> Result<serde_json::Value, ApiError>;

    fn cancel_current_meal(&self) -> Result<(), ApiError> {
        Err(ApiError::Unsupported("Cancelling the current meal"))
    }

    /// Snapshot of the authentication cookies
    fn session(&self) -> Session;

    fn restore_session(&mut self, session: Session);
}
