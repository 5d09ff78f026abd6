//! Error types for Muster operations.
//!
//! Configuration mistakes fail fast at construction; per-tick decisions
//! never fail for geometric reasons, only for violated preconditions or
//! internal invariant breaks.

use crate::types::AgentId;
use std::error::Error;
use std::fmt;

/// Result type for Muster operations.
pub type Result<T> = std::result::Result<T, MusterError>;

/// Errors that can occur while building or stepping a herd engine.
#[derive(Debug, Clone, PartialEq)]
pub enum MusterError {
    /// Configuration errors, fatal at construction.
    Config(ConfigError),
    /// The weighted-random movement walk exhausted all candidates.
    ///
    /// The probability masses are validated at construction, so reaching
    /// this means the configuration was corrupted after the fact or a
    /// floating-point edge was hit; either way it is a bug, not a
    /// runtime condition to recover from.
    ProbabilityWalkExhausted,
    /// A zone's `decide` was called with an empty detection even though
    /// the zone's contract requires at least one detected neighbor.
    EmptyDetection { zone: &'static str },
    /// The world has no state for the given agent.
    UnknownAgent(AgentId),
}

impl fmt::Display for MusterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MusterError::Config(e) => write!(f, "Config error: {}", e),
            MusterError::ProbabilityWalkExhausted => {
                write!(f, "Movement probabilities do not sum to 1: random walk exhausted")
            }
            MusterError::EmptyDetection { zone } => {
                write!(f, "{} decided with no detected neighbors", zone)
            }
            MusterError::UnknownAgent(id) => write!(f, "Unknown agent: {:?}", id),
        }
    }
}

impl Error for MusterError {}

impl From<ConfigError> for MusterError {
    fn from(e: ConfigError) -> Self {
        MusterError::Config(e)
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Invalid value.
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
    /// Out of range.
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue {
                field,
                value,
                reason,
            } => {
                write!(f, "Invalid value for {}: {} ({})", field, value, reason)
            }
            ConfigError::OutOfRange {
                field,
                min,
                max,
                value,
            } => {
                write!(
                    f,
                    "{} out of range: {} (must be {}-{})",
                    field, value, min, max
                )
            }
        }
    }
}

// Convenience constructors
impl MusterError {
    pub fn invalid_config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        MusterError::Config(ConfigError::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        })
    }

    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, value: f64) -> Self {
        MusterError::Config(ConfigError::OutOfRange {
            field: field.into(),
            min,
            max,
            value,
        })
    }
}
