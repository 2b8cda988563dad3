use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct City {
    /// The service calls it `objectId`; older cache files use `id`
    #[serde(rename = "objectId", alias = "id", default)]
    pub(crate) id: String,
    pub(crate) name: String,
    /// Fields we do not read, kept so cached entries match the service
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Restaurant {
    #[serde(default)]
    pub(crate) id: Option<String>,
    pub(crate) name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) address: Option<String>,
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Meal {
    #[serde(default)]
    pub(crate) id: Option<String>,
    pub(crate) name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// A restaurant + meal offering that can be reserved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Schedule {
    pub(crate) id: String,
    pub(crate) restaurant: Restaurant,
    pub(crate) meal: Meal,
    /// Pickup slots offered for this schedule, in the service's own format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) pickup_window_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) pickup_window_end: Option<String>,
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CitiesResponse {
    pub(crate) result: Vec<City>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MenuResponse {
    pub(crate) schedules: Vec<Schedule>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub(crate) username: &'a str,
    pub(crate) password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReservationBody<'a> {
    pub(crate) quantity: u32,
    pub(crate) schedule_id: &'a str,
    pub(crate) pickup_time: String,
    pub(crate) source: &'a str,
}

/// Which schedule to reserve
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MealTarget {
    Restaurant(String),
    Meal(String),
}

impl MealTarget {
    pub(crate) fn field(&self) -> &'static str {
        match self {
            MealTarget::Restaurant(_) => "restaurant",
            MealTarget::Meal(_) => "meal",
        }
    }

    pub(crate) fn name(&self) -> &str {
        match self {
            MealTarget::Restaurant(name) | MealTarget::Meal(name) => name,
        }
    }
}

/// Everything needed to place one reservation
#[derive(Debug, Clone)]
pub(crate) struct ReservationRequest {
    pub(crate) timing: PickupWindow,
    pub(crate) city: String,
    pub(crate) target: MealTarget,
    pub(crate) cancel_current_meal: bool,
}

/// Authentication cookies by name, persisted between runs. Parsing of
/// `Set-Cookie`, expiry and the `Cookie` header are left to the HTTP
/// client's cookie jar; this is only its snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct Session {
    #[serde(default)]
    pub(crate) cookies: BTreeMap<String, String>,
}

impl Session {
    pub(crate) fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

/// A pickup slot such as `12:15pm-12:30pm`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PickupWindow {
    pub(crate) start: NaiveTime,
    pub(crate) end: NaiveTime,
}

impl PickupWindow {
    pub(crate) fn parse(input: &str) -> Result<Self, AppError> {
        let invalid = || AppError::InvalidPickupTime {
            input: input.to_string(),
        };
        let (start, end) = input.split_once('-').ok_or_else(invalid)?;
        let start = parse_clock(start).ok_or_else(invalid)?;
        let end = parse_clock(end).ok_or_else(invalid)?;
        if start >= end {
            return Err(invalid());
        }
        Ok(Self { start, end })
    }
}

fn parse_clock(s: &str) -> Option<NaiveTime> {
    let s = s.trim().to_ascii_lowercase();
    if s.ends_with("am") || s.ends_with("pm") {
        NaiveTime::parse_from_str(&s, "%I:%M%p").ok()
    } else {
        NaiveTime::parse_from_str(&s, "%H:%M").ok()
    }
}

impl fmt::Display for PickupWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%-I:%M%P"),
            self.end.format("%-I:%M%P")
        )
    }
}
