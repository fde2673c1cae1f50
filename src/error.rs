//! Errors surfaced by the workout session.

use crate::form::ValidationError;
use crate::map::GeolocationError;

/// Message shown when the current position cannot be read.
pub const LOCATION_ALERT: &str = "cannot get your location";
/// Message shown when a submitted form has bad numbers.
pub const INVALID_INPUT_ALERT: &str = "input has to be a positive number";
/// Message shown when a new workout could not be written to storage.
pub const SAVE_ALERT: &str = "could not save workouts";
/// Message shown when the stored log could not be removed on reset.
pub const RESET_ALERT: &str = "could not clear stored workouts";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("cannot get your location: {0}")]
    Geolocation(#[from] GeolocationError),

    #[error("invalid input: {0}")]
    Invalid(#[from] ValidationError),

    #[error("the map is not loaded yet")]
    MapNotLoaded,

    #[error("no workout location selected; click the map first")]
    FormHidden,

    #[error("rendering workout list: {0}")]
    Render(#[source] anyhow::Error),

    #[error("storage error: {0}")]
    Storage(#[source] anyhow::Error),
}

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, AppError>;
