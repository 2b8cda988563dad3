//! Schedule lookups by restaurant or meal name

use crate::error::ApiError;

use super::MealApi;
use super::types::{MealTarget, Schedule};

pub(crate) fn find_by_restaurant<'a>(
    schedules: &'a [Schedule],
    restaurant_name: &str,
) -> Option<&'a Schedule> {
    schedules
        .iter()
        .find(|s| s.restaurant.name == restaurant_name)
}

pub(crate) fn find_by_meal<'a>(schedules: &'a [Schedule], meal_name: &str) -> Option<&'a Schedule> {
    schedules.iter().find(|s| s.meal.name == meal_name)
}

/// Exact-name search for the schedule a reservation refers to
pub(crate) fn find_schedule<'a>(
    schedules: &'a [Schedule],
    target: &MealTarget,
    city_name: &str,
) -> Result<&'a Schedule, ApiError> {
    let found = match target {
        MealTarget::Restaurant(name) => find_by_restaurant(schedules, name),
        MealTarget::Meal(name) => find_by_meal(schedules, name),
    };
    found.ok_or_else(|| ApiError::ScheduleNotFound {
        field: target.field(),
        name: target.name().to_string(),
        city: city_name.to_string(),
    })
}

pub(crate) fn get_schedule_by_restaurant_name(
    api: &dyn MealApi,
    restaurant_name: &str,
    city_name: &str,
) -> Result<Schedule, ApiError> {
    let schedules = api.get_schedules(city_name)?;
    let target = MealTarget::Restaurant(restaurant_name.to_string());
    find_schedule(&schedules, &target, city_name).cloned()
}

pub(crate) fn get_schedule_by_meal_name(
    api: &dyn MealApi,
    meal_name: &str,
    city_name: &str,
) -> Result<Schedule, ApiError> {
    let schedules = api.get_schedules(city_name)?;
    let target = MealTarget::Meal(meal_name.to_string());
    find_schedule(&schedules, &target, city_name).cloned()
}

/// Fetch the city's menu and pick the schedule `target` names
pub(crate) fn get_schedule(
    api: &dyn MealApi,
    target: &MealTarget,
    city_name: &str,
) -> Result<Schedule, ApiError> {
    match target {
        MealTarget::Restaurant(name) => get_schedule_by_restaurant_name(api, name, city_name),
        MealTarget::Meal(name) => get_schedule_by_meal_name(api, name, city_name),
    }
}
