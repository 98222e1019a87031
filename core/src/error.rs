//! Error types for the PetFriends client.
//!
//! # Design
//! HTTP statuses are never errors here: a 403 or a 500 is a normal
//! `ApiResponse` that the caller inspects. `ApiError` only covers the cases
//! where no response exists at all, either because a local upload file could
//! not be read or because the transport failed.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// An upload file could not be opened or read. No request was sent.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The request never produced a response (DNS, TLS, connection reset).
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<ureq::Error> for ApiError {
    fn from(err: ureq::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

/// Errors raised while loading `Settings` from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(&'static str),
}
