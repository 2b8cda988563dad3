use thiserror::Error;

/// Failures raised by the MealPal API client
#[derive(Debug, Error)]
pub(crate) enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] ureq::Error),

    #[error("{url} returned HTTP {status}")]
    Status { status: u16, url: String },

    #[error("Unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("City \"{name}\" not found")]
    CityNotFound { name: String },

    #[error("No schedule with {field} \"{name}\" in {city}")]
    ScheduleNotFound {
        field: &'static str,
        name: String,
        city: String,
    },

    #[error("{0} is not supported")]
    Unsupported(&'static str),
}

impl ApiError {
    /// City or schedule missing from the menu; the reservation loop retries these
    pub(crate) fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            ApiError::CityNotFound { .. } | ApiError::ScheduleNotFound { .. }
        )
    }

    pub(crate) fn is_fatal(&self) -> bool {
        matches!(self, ApiError::Unsupported(_))
    }
}

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("Could not determine a cache directory; pass --cache-dir")]
    NoCacheDir,

    #[error("Failed to create cache directory {path}: {source}")]
    CacheDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to save session to {path}: {source}")]
    SessionSave {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid pickup time \"{input}\" (expected e.g. 12:15pm-12:30pm)")]
    InvalidPickupTime { input: String },

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Login failed after {attempts} attempt(s)")]
    LoginFailed { attempts: u32 },

    #[error("Reservation failed after {attempts} attempt(s) ({last})")]
    ReservationExhausted { attempts: u32, last: String },
}
