use crate::api::{MealApi, Session};
use crate::consts::DEFAULT_LOGIN_ATTEMPTS;
use crate::error::{ApiError, AppError};
use crate::retry::RetryPolicy;

use super::credentials::{CredentialSource, Credentials};
use super::store::SessionStore;

#[derive(Debug, Clone)]
pub(crate) struct SessionOptions {
    /// Probing of stored cookies
    pub(crate) validation: RetryPolicy,
    /// Credential prompts before giving up
    pub(crate) login_attempts: u32,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            validation: RetryPolicy::SESSION_VALIDATION,
            login_attempts: DEFAULT_LOGIN_ATTEMPTS,
        }
    }
}

/// Get `api` into a logged-in state: reuse stored cookies when the service
/// still accepts them, otherwise log in with fresh credentials. The session
/// is written back to `store` afterwards.
pub(crate) fn initialize_session(
    api: &mut dyn MealApi,
    store: &SessionStore,
    credentials: &mut dyn CredentialSource,
    options: &SessionOptions,
) -> Result<(), AppError> {
    if let Some(session) = store.load() {
        api.restore_session(session);
        if validate_session(&*api, &options.validation) {
            eprintln!("Login using cookies successful!");
            return store.save(&api.session());
        }
        eprintln!("Existing cookies are invalid, please re-enter your login credentials.");
        api.restore_session(Session::default());
    }

    login(api, credentials, options.login_attempts)?;

    eprintln!(
        "Login successful! Saving cookies as {}.",
        store.path().display()
    );
    store.save(&api.session())
}

fn validate_session(api: &dyn MealApi, policy: &RetryPolicy) -> bool {
    let attempts = policy.attempts();
    policy
        .run(|attempt| match api.get_current_meal() {
            Ok(_) => Some(()),
            Err(e) => {
                if attempt < attempts {
                    let wait = policy.delay_after(attempt);
                    eprintln!(
                        "Login using cookies failed ({}), retrying after {} second(s).",
                        e,
                        wait.as_secs_f64()
                    );
                }
                None
            }
        })
        .is_some()
}

fn login(
    api: &mut dyn MealApi,
    credentials: &mut dyn CredentialSource,
    max_attempts: u32,
) -> Result<(), AppError> {
    let attempts = max_attempts.max(1);
    for _ in 0..attempts {
        let Credentials { email, password } = credentials.credentials()?;
        match api.login(&email, &password) {
            Ok(()) => return Ok(()),
            Err(ApiError::Status { .. }) => {
                eprintln!("Invalid login credentials, please try again!");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Err(AppError::LoginFailed { attempts })
}
