//! Error types for stride-log

use std::num::ParseIntError;

use thiserror::Error;

use crate::duration::DurationError;

/// Errors raised while turning a raw record into a typed one
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("invalid data format: expected {expected} fields, got {actual}")]
    Format { expected: usize, actual: usize },

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("non-positive number of steps: {0}")]
    InvalidValue(i64),

    #[error("unknown training type: {0}")]
    UnknownActivity(String),
}

/// A field that should have been numeric or duration-shaped was not
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("step count conversion failed: {0}")]
    Steps(#[from] ParseIntError),

    #[error("time conversion failed: {0}")]
    Duration(#[from] DurationError),
}

/// Errors raised while loading calculator configuration or a user profile
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
}
