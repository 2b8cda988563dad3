//! Persisted login session and its start-up validation

pub(crate) mod credentials;
pub(crate) mod init;
pub(crate) mod store;

pub(crate) use credentials::PromptCredentials;
pub(crate) use init::{SessionOptions, initialize_session};
pub(crate) use store::SessionStore;
