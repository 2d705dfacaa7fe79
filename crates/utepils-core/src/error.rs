//! Centralized error types for the utepils application.
//!
//! Domain crates bring their own error enums. They travel inside `anyhow`
//! chains, and `AppError::user_message_for` digs the most specific one out so
//! the shell can show one user-friendly message for anything that goes wrong.

use thiserror::Error;
use utepils_beverages::BeverageError;
use utepils_weather::WeatherError;

/// Top-level application error type.
///
/// Use `user_message()` to get a UI-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Session(e) => e.user_message(),
            AppError::Other(e) => Self::user_message_for(e),
        }
    }

    /// Find the most specific user message in an `anyhow` chain.
    pub fn user_message_for(error: &anyhow::Error) -> &'static str {
        for cause in error.chain() {
            if let Some(e) = cause.downcast_ref::<AppError>() {
                return e.user_message();
            }
            if let Some(e) = cause.downcast_ref::<ConfigError>() {
                return e.user_message();
            }
            if let Some(e) = cause.downcast_ref::<SnapshotError>() {
                return e.user_message();
            }
            if let Some(e) = cause.downcast_ref::<WeatherError>() {
                return e.user_message();
            }
            if let Some(e) = cause.downcast_ref::<BeverageError>() {
                return e.user_message();
            }
        }
        "An unexpected error occurred. Please try again."
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

/// Errors reading a directory of saved API responses.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Snapshot directory not found: {0}")]
    NotFound(String),

    #[error("Missing snapshot file: {0}")]
    MissingFile(String),
}

impl SnapshotError {
    pub fn user_message(&self) -> &'static str {
        match self {
            SnapshotError::NotFound(_) => "No saved weather data found. Check your settings.",
            SnapshotError::MissingFile(_) => "Saved weather data is incomplete.",
        }
    }
}

/// Invalid requests against the session state.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No location available")]
    NoLocation,

    #[error("No forecast at index {0}")]
    NoSuchForecast(usize),
}

impl SessionError {
    pub fn user_message(&self) -> &'static str {
        match self {
            SessionError::NoLocation => "Your location is unknown. Enable location and try again.",
            SessionError::NoSuchForecast(_) => "That day is no longer available.",
        }
    }
}
