//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted by `ExerciseService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExerciseServiceError {
    /// The service answered 2xx but the body carried an `error` field.
    #[error("writing service reported an error: {0}")]
    Service(String),
    #[error("writing service request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("writing service response did not match the expected shape")]
    Decode(#[source] serde_json::Error),
}

/// Errors building an `ExerciseServiceConfig`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExerciseConfigError {
    #[error("invalid base URL: {raw}")]
    InvalidBaseUrl { raw: String },
    #[error("invalid request timeout: {raw}")]
    InvalidTimeout { raw: String },
}
