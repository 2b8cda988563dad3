//! Reservation retry loop

use crate::api::{MealApi, ReservationRequest};
use crate::error::AppError;
use crate::retry::RetryPolicy;
use crate::utils::debug_log;

const SUCCESS: u16 = 200;

/// Keep calling `reserve_meal` until the service answers 200 or the policy
/// runs out of attempts. Lookup failures, other statuses and transport
/// errors are retried; unsupported operations end the loop at once.
///
/// Returns the attempt number that succeeded.
pub(crate) fn execute_reserve(
    api: &dyn MealApi,
    request: &ReservationRequest,
    policy: &RetryPolicy,
) -> Result<u32, AppError> {
    let attempts = policy.attempts();
    let mut last = String::new();

    let outcome = policy.run(|attempt| {
        match api.reserve_meal(request) {
            Ok(SUCCESS) => return Some(Ok(())),
            Ok(status) => {
                eprintln!("Reservation error (HTTP {status}), retrying!");
                last = format!("HTTP {status}");
            }
            Err(e) if e.is_fatal() => return Some(Err(e)),
            Err(e) => {
                if e.is_lookup_failure() {
                    eprintln!("{e}, retrying...");
                } else {
                    eprintln!("Reservation request failed ({e}), retrying...");
                }
                last = e.to_string();
            }
        }
        if attempt < attempts {
            debug_log!(
                "Attempt {attempt}/{attempts} failed, sleeping {:?}",
                policy.delay_after(attempt)
            );
        }
        None
    });

    match outcome {
        Some((Ok(()), attempt)) => Ok(attempt),
        Some((Err(e), _)) => Err(e.into()),
        None => Err(AppError::ReservationExhausted { attempts, last }),
    }
}
