//! Shared primitives for all Rust crates in Geoscope.

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across Geoscope crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string with surrounding whitespace removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Rejections raised while validating a geographic selection before any write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// No city or taluka was selected.
    #[error("selection must contain at least one value")]
    EmptySelection,

    /// The city is not a key of the geographic catalog.
    #[error("unknown city '{0}'")]
    UnknownCity(String),

    /// The taluka does not exist under any catalog city.
    #[error("unknown taluka '{0}'")]
    UnknownTaluka(String),

    /// The taluka exists, but not under the given city.
    #[error("taluka '{taluka}' does not belong to city '{city}'")]
    TalukaCityMismatch {
        /// Rejected taluka.
        taluka: String,
        /// City context the taluka was checked against.
        city: String,
    },
}

impl SelectionError {
    /// Returns a stable machine-readable code for this rejection.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptySelection => "empty_selection",
            Self::UnknownCity(_) => "unknown_city",
            Self::UnknownTaluka(_) => "unknown_taluka",
            Self::TalukaCityMismatch { .. } => "taluka_city_mismatch",
        }
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Geographic selection rejected before any write.
    #[error("invalid selection: {0}")]
    InvalidSelection(#[from] SelectionError),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation conflicts with concurrent state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Caller identity is missing or malformed.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Caller is identified but blocked by the role hierarchy.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}
