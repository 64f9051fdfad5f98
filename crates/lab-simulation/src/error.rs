//! Error types for the control boundary.
//!
//! Out-of-range input and degenerate physics are recovered locally and never
//! reach the caller. What remains is a caller asking for something the
//! experiment does not have.

use std::fmt;

/// Errors returned by the string-keyed control boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    /// The experiment declares no parameter with this key.
    UnknownParameter {
        key: String,
        experiment: &'static str,
    },
    /// No experiment is registered under this name.
    UnknownExperiment(String),
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlError::UnknownParameter { key, experiment } => {
                write!(f, "Unknown parameter '{}' for the {} experiment", key, experiment)
            }
            ControlError::UnknownExperiment(name) => write!(f, "Unknown experiment '{}'", name),
        }
    }
}

impl std::error::Error for ControlError {}
