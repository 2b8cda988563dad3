use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use ureq::http::{Response, Uri};
use ureq::{Body, Cookie};

use crate::consts::{
    BASE_URL, CITIES_PATH, KITCHEN_PATH, LOGIN_PATH, RESERVATION_PATH, RESERVATION_SOURCE,
    menu_path,
};
use crate::error::ApiError;
use crate::utils::debug_log;

use super::MealApi;
use super::lookup::get_schedule;
use super::types::{
    City, CitiesResponse, LoginRequest, MenuResponse, ReservationBody, ReservationRequest,
    Schedule, Session,
};

/// Blocking HTTP client for secure.mealpal.com. Cookies live in the
/// agent's jar, which sends and updates them on every request.
pub(crate) struct MealPalClient {
    agent: ureq::Agent,
    base_url: String,
}

impl MealPalClient {
    pub(crate) fn new(timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: BASE_URL.to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn post_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let start = Instant::now();
        let response = self.agent.post(url).send_empty()?;
        debug_log!(
            "POST {url} -> {} ({:.2}ms)",
            response.status(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        read_json(ensure_success(response, url)?, url)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let start = Instant::now();
        let response = self.agent.get(url).call()?;
        debug_log!(
            "GET {url} -> {} ({:.2}ms)",
            response.status(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        read_json(ensure_success(response, url)?, url)
    }
}

fn ensure_success(response: Response<Body>, url: &str) -> Result<Response<Body>, ApiError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            status: response.status().as_u16(),
            url: url.to_string(),
        })
    }
}

fn read_json<T: DeserializeOwned>(response: Response<Body>, url: &str) -> Result<T, ApiError> {
    let mut body = response.into_body();
    serde_json::from_reader(body.as_reader()).map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
    })
}

impl MealApi for MealPalClient {
    fn login(&mut self, user: &str, password: &str) -> Result<(), ApiError> {
        let url = self.url(LOGIN_PATH);
        let referer = self.url("/login");
        let response = self
            .agent
            .post(url.as_str())
            .header("Origin", self.base_url.as_str())
            .header("Referer", referer.as_str())
            .send_json(&LoginRequest {
                username: user,
                password,
            })?;
        debug_log!("POST {url} -> {}", response.status());

        ensure_success(response, &url)?;
        Ok(())
    }

    fn get_cities(&self) -> Result<Vec<City>, ApiError> {
        let url = self.url(CITIES_PATH);
        let response: CitiesResponse = self.post_json(&url)?;
        Ok(response.result)
    }

    fn get_schedules(&self, city_name: &str) -> Result<Vec<Schedule>, ApiError> {
        let cities = self.get_cities()?;
        let city = cities
            .iter()
            .find(|c| c.name == city_name)
            .ok_or_else(|| ApiError::CityNotFound {
                name: city_name.to_string(),
            })?;

        let url = self.url(&menu_path(&city.id));
        let response: MenuResponse = self.get_json(&url)?;
        Ok(response.schedules)
    }

    fn reserve_meal(&self, request: &ReservationRequest) -> Result<u16, ApiError> {
        if request.cancel_current_meal {
            self.cancel_current_meal()?;
        }

        let schedule = get_schedule(self, &request.target, &request.city)?;

        let url = self.url(RESERVATION_PATH);
        let body = ReservationBody {
            quantity: 1,
            schedule_id: &schedule.id,
            pickup_time: request.timing.to_string(),
            source: RESERVATION_SOURCE,
        };
        let response = self.agent.post(url.as_str()).send_json(&body)?;
        debug_log!(
            "POST {url} (schedule {}) -> {}",
            schedule.id,
            response.status()
        );

        Ok(response.status().as_u16())
    }

    fn get_current_meal(&self) -> Result<serde_json::Value, ApiError> {
        let url = self.url(KITCHEN_PATH);
        let response = self.agent.post(url.as_str()).send_empty()?;
        debug_log!("POST {url} -> {}", response.status());

        read_json(ensure_success(response, &url)?, &url)
    }

    fn session(&self) -> Session {
        let jar = self.agent.cookie_jar_lock();
        let cookies = jar
            .iter()
            .map(|cookie| (cookie.name().to_string(), cookie.value().to_string()))
            .collect();
        Session { cookies }
    }

    fn restore_session(&mut self, session: Session) {
        let mut jar = self.agent.cookie_jar_lock();
        jar.clear();
        let Ok(origin) = self.base_url.parse::<Uri>() else {
            debug_log!("Not restoring cookies for unparsable {}", self.base_url);
            return;
        };
        for (name, value) in session.cookies {
            let restored = Cookie::parse(format!("{name}={value}"), &origin)
                .and_then(|cookie| jar.insert(cookie, &origin));
            if let Err(e) = restored {
                debug_log!("Dropping stored cookie {name}: {e}");
            }
        }
    }
}
