use dialoguer::{Input, Password};

use crate::error::AppError;

#[derive(Debug, Clone)]
pub(crate) struct Credentials {
    pub(crate) email: String,
    pub(crate) password: String,
}

/// Where login credentials come from
pub(crate) trait CredentialSource {
    fn credentials(&mut self) -> Result<Credentials, AppError>;
}

/// Email from config (or asked once), password always asked for
pub(crate) struct PromptCredentials {
    email: Option<String>,
}

impl PromptCredentials {
    pub(crate) fn new(email: Option<String>) -> Self {
        Self { email }
    }
}

impl CredentialSource for PromptCredentials {
    fn credentials(&mut self) -> Result<Credentials, AppError> {
        let email = match &self.email {
            Some(email) => email.clone(),
            None => {
                let email: String = Input::new()
                    .with_prompt("Email address")
                    .interact_text()
                    .map_err(|e| AppError::Prompt(e.to_string()))?;
                self.email = Some(email.clone());
                email
            }
        };
        let password = Password::new()
            .with_prompt("Enter password")
            .interact()
            .map_err(|e| AppError::Prompt(e.to_string()))?;
        Ok(Credentials { email, password })
    }
}
