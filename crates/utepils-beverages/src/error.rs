//! Beverage-specific error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BeverageError {
    #[error("Catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid keyword pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl BeverageError {
    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Parse(_) => "The beverage list could not be read.",
            Self::Pattern(_) => "Beverage recommendations are unavailable right now.",
        }
    }
}
