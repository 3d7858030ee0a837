#![forbid(unsafe_code)]

pub mod error;
pub mod exercise_service;

pub use error::{ExerciseConfigError, ExerciseServiceError};
pub use exercise_service::{
    DEFAULT_BASE_URL, ExerciseApi, ExerciseService, ExerciseServiceConfig,
};
