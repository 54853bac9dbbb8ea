use crate::ephemeris::{CelestialBody, ProviderError};
use std::time::Duration;
use thiserror::Error;

/// Errors that abort a natal computation.
///
/// None of these carry partial results: a failed run has no vectors,
/// no hits and no directive.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid date format: {0:?} (expected YYYY-MM-DD)")]
    InvalidDateFormat(String),
    #[error("Invalid time format: {0:?} (expected HH:MM, 24-hour)")]
    InvalidTimeFormat(String),
    #[error("Position lookup failed for {body}: {source}")]
    ProviderFailure {
        body: CelestialBody,
        #[source]
        source: ProviderError,
    },
    #[error("Computation abandoned after {0:?}")]
    Timeout(Duration),
    /// The worker ended (or never started) without handing back a result
    #[error("Computation aborted: {0}")]
    Aborted(String),
}

impl EngineError {
    /// Stable marker used in serialized error records
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::InvalidDateFormat(_) => "InvalidDateFormat",
            EngineError::InvalidTimeFormat(_) => "InvalidTimeFormat",
            EngineError::ProviderFailure { .. } => "ProviderFailure",
            EngineError::Timeout(_) => "Timeout",
            EngineError::Aborted(_) => "Aborted",
        }
    }

    /// True for malformed caller input, as opposed to backend trouble
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidDateFormat(_) | EngineError::InvalidTimeFormat(_)
        )
    }
}
