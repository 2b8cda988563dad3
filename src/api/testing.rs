//! In-memory `MealApi` used by unit tests

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use serde_json::Map;

use crate::error::ApiError;

use super::MealApi;
use super::types::{City, Meal, ReservationRequest, Restaurant, Schedule, Session};

pub(crate) fn schedule(id: &str, restaurant: &str, meal: &str) -> Schedule {
    Schedule {
        id: id.to_string(),
        restaurant: Restaurant {
            id: None,
            name: restaurant.to_string(),
            address: None,
            extra: Map::new(),
        },
        meal: Meal {
            id: None,
            name: meal.to_string(),
            description: None,
            extra: Map::new(),
        },
        pickup_window_start: None,
        pickup_window_end: None,
        extra: Map::new(),
    }
}

pub(crate) fn city(id: &str, name: &str) -> City {
    City {
        id: id.to_string(),
        name: name.to_string(),
        extra: Map::new(),
    }
}

pub(crate) const GOOD_SID: &str = "good";

#[derive(Default)]
pub(crate) struct FakeApi {
    pub(crate) cities: Vec<City>,
    pub(crate) menus: HashMap<String, Vec<Schedule>>,
    pub(crate) password: String,
    pub(crate) session: Session,
    reserve_script: RefCell<VecDeque<Result<u16, ApiError>>>,
    probe_errors: RefCell<VecDeque<ApiError>>,
    login_errors: RefCell<VecDeque<ApiError>>,
    probe_failures: Cell<u32>,
    city_calls: Cell<u32>,
    schedule_calls: Cell<u32>,
    reserve_calls: Cell<u32>,
    probe_calls: Cell<u32>,
    login_calls: Cell<u32>,
}

impl FakeApi {
    pub(crate) fn with_cities(names: &[&str]) -> Self {
        Self {
            cities: names.iter().map(|name| city(&name.to_lowercase(), name)).collect(),
            ..Self::default()
        }
    }

    pub(crate) fn with_menu(city_name: &str, schedules: Vec<Schedule>) -> Self {
        let mut api = Self::with_cities(&[city_name]);
        api.menus.insert(city_name.to_string(), schedules);
        api
    }

    pub(crate) fn with_password(password: &str) -> Self {
        Self {
            password: password.to_string(),
            ..Self::default()
        }
    }

    pub(crate) fn script_reservations(&self, outcomes: Vec<Result<u16, ApiError>>) {
        *self.reserve_script.borrow_mut() = outcomes.into();
    }

    /// The next probes fail with these errors before any cookie check
    pub(crate) fn script_probe_errors(&self, errors: Vec<ApiError>) {
        *self.probe_errors.borrow_mut() = errors.into();
    }

    /// The next logins fail with these errors before the password is checked
    pub(crate) fn script_login_errors(&self, errors: Vec<ApiError>) {
        *self.login_errors.borrow_mut() = errors.into();
    }

    /// The next `n` probes fail even with a valid session
    pub(crate) fn fail_probes(&self, n: u32) {
        self.probe_failures.set(n);
    }

    pub(crate) fn city_calls(&self) -> u32 {
        self.city_calls.get()
    }

    pub(crate) fn schedule_calls(&self) -> u32 {
        self.schedule_calls.get()
    }

    pub(crate) fn reserve_calls(&self) -> u32 {
        self.reserve_calls.get()
    }

    pub(crate) fn probe_calls(&self) -> u32 {
        self.probe_calls.get()
    }

    pub(crate) fn login_calls(&self) -> u32 {
        self.login_calls.get()
    }
}

fn bump(counter: &Cell<u32>) {
    counter.set(counter.get() + 1);
}

impl MealApi for FakeApi {
    fn login(&mut self, _user: &str, password: &str) -> Result<(), ApiError> {
        bump(&self.login_calls);
        if let Some(e) = self.login_errors.borrow_mut().pop_front() {
            return Err(e);
        }
        if password != self.password {
            return Err(ApiError::Status {
                status: 403,
                url: "fake://login".to_string(),
            });
        }
        self.session
            .cookies
            .insert("sid".to_string(), GOOD_SID.to_string());
        Ok(())
    }

    fn get_cities(&self) -> Result<Vec<City>, ApiError> {
        bump(&self.city_calls);
        Ok(self.cities.clone())
    }

    fn get_schedules(&self, city_name: &str) -> Result<Vec<Schedule>, ApiError> {
        bump(&self.schedule_calls);
        self.menus
            .get(city_name)
            .cloned()
            .ok_or_else(|| ApiError::CityNotFound {
                name: city_name.to_string(),
            })
    }

    fn reserve_meal(&self, request: &ReservationRequest) -> Result<u16, ApiError> {
        bump(&self.reserve_calls);
        if request.cancel_current_meal {
            self.cancel_current_meal()?;
        }
        self.reserve_script
            .borrow_mut()
            .pop_front()
            .unwrap_or(Ok(200))
    }

    fn get_current_meal(&self) -> Result<serde_json::Value, ApiError> {
        bump(&self.probe_calls);
        if let Some(e) = self.probe_errors.borrow_mut().pop_front() {
            return Err(e);
        }
        let unauthorized = ApiError::Status {
            status: 401,
            url: "fake://kitchen".to_string(),
        };
        if self.session.cookies.get("sid").map(String::as_str) != Some(GOOD_SID) {
            return Err(unauthorized);
        }
        let remaining = self.probe_failures.get();
        if remaining > 0 {
            self.probe_failures.set(remaining - 1);
            return Err(unauthorized);
        }
        Ok(serde_json::json!({ "result": { "status": "OPEN" } }))
    }

    fn session(&self) -> Session {
        self.session.clone()
    }

    fn restore_session(&mut self, session: Session) {
        self.session = session;
    }
}
