//! Validation errors for profiles, readings and preferences.
//!
//! Scoring itself never fails; these are raised when data is loaded or
//! sanitized, before it reaches the engine.

use thiserror::Error;

/// Rejected activity profile or catalog definition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("profile '{id}': temperature range [{min}, {max}] is empty or inverted")]
    InvalidTemperatureRange { id: String, min: f64, max: f64 },

    #[error("profile '{id}': {field} must be positive (got {value})")]
    NonPositiveThreshold {
        id: String,
        field: &'static str,
        value: f64,
    },

    #[error("profile '{id}': weight for {factor} must be within 0..=1 (got {value})")]
    WeightOutOfRange {
        id: String,
        factor: &'static str,
        value: f64,
    },

    #[error("profile '{id}': acceptable {field} does not enclose the optimal bound")]
    AcceptableNarrowerThanOptimal { id: String, field: &'static str },

    #[error("profile id must be non-empty")]
    EmptyId,

    #[error("duplicate profile id '{0}'")]
    DuplicateId(String),

    #[error("activity catalog must contain at least one profile")]
    EmptyCatalog,
}

/// Weather reading that must be sanitized before scoring.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReadingError {
    #[error("{field} is not a finite number")]
    NonFinite { field: &'static str },

    #[error("humidity must be within 0..=100 (got {0})")]
    HumidityOutOfRange(f64),

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("precipitation probability must be within 0..=1 (got {0})")]
    ProbabilityOutOfRange(f64),
}

/// Inconsistent user comfort thresholds.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PreferencesError {
    #[error("very_cold ({cold}) must be below very_hot ({hot})")]
    InvertedTemperature { cold: f64, hot: f64 },

    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    #[error("very_wet must be within 0..=1 (got {0})")]
    WetOutOfRange(f64),
}
