//! Weather-specific error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}

impl WeatherError {
    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Parse(_) => "Received unreadable weather data. Please try again.",
            Self::InvalidGeometry(_) => "The forecast location was invalid.",
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use crate::met::MetForecast;

    #[test]
    fn test_error_user_messages() {
        let err = WeatherError::InvalidGeometry("[]".into());
        assert!(err.user_message().contains("location"));

        let err = MetForecast::from_json("{ oops").unwrap_err();
        assert_eq!(
            err.user_message(),
            "Received unreadable weather data. Please try again."
        );
    }
}
