// src/error.rs
use thiserror::Error;

/// Error types for the lookback-mc library
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// Invalid parameter values
    #[error("Invalid parameter '{parameter}' = {value}: {constraint}")]
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Invalid simulation or product configuration
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfiguration { field: String, reason: String },

    /// Valuation requested after the product has expired
    #[error("Evaluation time {evaluation_time} is after maturity {maturity}")]
    EvaluationAfterMaturity { evaluation_time: f64, maturity: f64 },

    /// Product maturity is not covered by the simulation grid
    #[error("Maturity {maturity} lies beyond the simulation horizon {horizon}")]
    MaturityBeyondHorizon { maturity: f64, horizon: f64 },

    /// Product maturity falls between two simulation times
    #[error("Maturity {maturity} is not a simulation time (nearest grid time below is {grid_time})")]
    MaturityOffGrid { maturity: f64, grid_time: f64 },

    /// Simulator queried outside of its time grid
    #[error("Time {time} is outside the simulated interval [0, {horizon}]")]
    TimeOutOfRange { time: f64, horizon: f64 },

    /// Underlying index does not name a simulated asset
    #[error("Underlying index {index} out of range ({count} simulated assets)")]
    UnderlyingOutOfRange { index: usize, count: usize },

    /// Sample statistic is undefined (zero variance, too few paths)
    #[error("Degenerate sample for {statistic} over {paths} paths: {reason}")]
    DegenerateSample {
        statistic: String,
        paths: usize,
        reason: String,
    },

    /// Numerical instability or non-finite result
    #[error("Numerical instability in {method}: {reason}")]
    NumericalInstability { method: String, reason: String },
}

/// Result type alias for lookback-mc operations
pub type PricingResult<T> = Result<T, PricingError>;

/// Validation utilities
pub mod validation {
    use super::{PricingError, PricingResult};

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> PricingResult<()> {
        if value.is_nan() || value <= 0.0 {
            Err(PricingError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> PricingResult<()> {
        if value.is_nan() || value < 0.0 {
            Err(PricingError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> PricingResult<()> {
        if !value.is_finite() {
            Err(PricingError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate paths count
    pub fn validate_paths(paths: usize) -> PricingResult<()> {
        if paths == 0 {
            Err(PricingError::InvalidConfiguration {
                field: "paths".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if paths > 100_000_000 {
            Err(PricingError::InvalidConfiguration {
                field: "paths".to_string(),
                reason: "exceeds maximum allowed (100 million)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate steps count
    pub fn validate_steps(steps: usize) -> PricingResult<()> {
        if steps == 0 {
            Err(PricingError::InvalidConfiguration {
                field: "steps".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if steps > 100_000 {
            Err(PricingError::InvalidConfiguration {
                field: "steps".to_string(),
                reason: "exceeds maximum allowed (100,000)".to_string(),
            })
        } else {
            Ok(())
        }
    }
}
