// src/error.rs
use thiserror::Error;

/// Error types for the gbm-paths library
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SdeError {
    /// Caller-supplied input outside its valid domain
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter { parameter: String, reason: String },

    /// Correlation matrix is malformed or cannot be factorised
    #[error("Invalid correlation matrix: {reason}")]
    InvalidCorrelation { reason: String },

    /// exp(log-value) left the representable range of f64
    #[error(
        "Numeric overflow in dimension {dimension} at step {step}: exp({log_value}) is not representable as a positive finite value"
    )]
    NumericOverflow {
        dimension: usize,
        step: usize,
        log_value: f64,
    },

    /// Cancellation flag observed between grid steps
    #[error("Simulation cancelled after {completed_steps} of {steps} steps")]
    Cancelled { completed_steps: usize, steps: usize },
}

impl SdeError {
    pub fn invalid_parameter(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        SdeError::InvalidParameter {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_correlation(reason: impl Into<String>) -> Self {
        SdeError::InvalidCorrelation {
            reason: reason.into(),
        }
    }
}

/// Result type alias for gbm-paths operations
pub type SdeResult<T> = Result<T, SdeError>;

/// Validation utilities
pub mod validation {
    use super::{SdeError, SdeResult};

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> SdeResult<()> {
        if value.is_nan() || value <= 0.0 {
            Err(SdeError::invalid_parameter(
                name,
                format!("{} must be positive (> 0)", value),
            ))
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> SdeResult<()> {
        if value.is_nan() || value < 0.0 {
            Err(SdeError::invalid_parameter(
                name,
                format!("{} must be non-negative (≥ 0)", value),
            ))
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is within a range
    pub fn validate_range(name: &str, value: f64, min: f64, max: f64) -> SdeResult<()> {
        if value.is_nan() || value < min || value > max {
            Err(SdeError::invalid_parameter(
                name,
                format!("{} must be in range [{}, {}]", value, min, max),
            ))
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> SdeResult<()> {
        if !value.is_finite() {
            Err(SdeError::invalid_parameter(
                name,
                format!("{} must be finite (not NaN or infinite)", value),
            ))
        } else {
            Ok(())
        }
    }

    /// Validate paths count
    pub fn validate_paths(paths: usize) -> SdeResult<()> {
        if paths == 0 {
            Err(SdeError::invalid_parameter("paths", "must be greater than 0"))
        } else if paths > 1_000_000_000 {
            Err(SdeError::invalid_parameter(
                "paths",
                "exceeds maximum allowed (1 billion)",
            ))
        } else {
            Ok(())
        }
    }

    /// Validate steps count
    pub fn validate_steps(steps: usize) -> SdeResult<()> {
        if steps == 0 {
            Err(SdeError::invalid_parameter("steps", "must be greater than 0"))
        } else {
            Ok(())
        }
    }

    /// Validate that two dimensions agree
    pub fn validate_dimension(name: &str, expected: usize, actual: usize) -> SdeResult<()> {
        if expected != actual {
            Err(SdeError::invalid_parameter(
                name,
                format!("dimension mismatch: expected {}, got {}", expected, actual),
            ))
        } else {
            Ok(())
        }
    }
}
