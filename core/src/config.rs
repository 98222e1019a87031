//! Client configuration and test credentials.
//!
//! Values come from the process environment, with a `.env` file in the
//! working directory honoured when present. Nothing here is global: callers
//! load a value once and pass it to whatever needs it.

use std::env;

use crate::error::ConfigError;
use crate::types::Credentials;

pub const DEFAULT_BASE_URL: &str = "https://petfriends.skillfactory.ru/";

pub const BASE_URL_VAR: &str = "PETFRIENDS_BASE_URL";
pub const EMAIL_VAR: &str = "PETFRIENDS_EMAIL";
pub const PASSWORD_VAR: &str = "PETFRIENDS_PASSWORD";
pub const INVALID_EMAIL_VAR: &str = "PETFRIENDS_INVALID_EMAIL";
pub const INVALID_PASSWORD_VAR: &str = "PETFRIENDS_INVALID_PASSWORD";

const DEFAULT_INVALID_EMAIL: &str = "nobody@petfriends.invalid";
const DEFAULT_INVALID_PASSWORD: &str = "not-the-password";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// `PETFRIENDS_BASE_URL`, or the public service when unset.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        match env::var(BASE_URL_VAR) {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }
}

/// Valid and invalid login pairs for the scenario suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub valid: Credentials,
    pub invalid: Credentials,
}

impl Settings {
    pub fn new(valid: Credentials, invalid: Credentials) -> Self {
        Self { valid, invalid }
    }

    /// # Errors
    /// `ConfigError::Missing` when the valid email or password is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        let valid = Credentials::new(required(EMAIL_VAR)?, required(PASSWORD_VAR)?);
        let invalid = Credentials::new(
            env::var(INVALID_EMAIL_VAR).unwrap_or_else(|_| DEFAULT_INVALID_EMAIL.to_string()),
            env::var(INVALID_PASSWORD_VAR).unwrap_or_else(|_| DEFAULT_INVALID_PASSWORD.to_string()),
        );
        Ok(Self { valid, invalid })
    }
}

fn required(var: &'static str) -> Result<String, ConfigError> {
    env::var(var).map_err(|_| ConfigError::Missing(var))
}
