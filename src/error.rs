//! Errors raised at the request boundary
//!
//! The calculators themselves never fail: degenerate input yields a zero
//! result or NaN. Requests coming through [`crate::request`] are validated
//! first and rejected with one of these.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CalcError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{0}")]
    Inconsistent(String),

    #[error("unknown calculator '{0}'")]
    UnknownCalculator(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl CalcError {
    /// Reject NaN and infinities
    pub fn finite(field: &'static str, value: f64) -> Result<f64, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::NotFinite { field, value })
        }
    }

    /// Require a finite value strictly above zero
    pub fn positive(field: &'static str, value: f64) -> Result<f64, Self> {
        let value = Self::finite(field, value)?;
        if value > 0.0 {
            Ok(value)
        } else {
            Err(Self::NotPositive { field, value })
        }
    }

    /// Require a finite value at or above zero
    pub fn non_negative(field: &'static str, value: f64) -> Result<f64, Self> {
        let value = Self::finite(field, value)?;
        if value >= 0.0 {
            Ok(value)
        } else {
            Err(Self::Negative { field, value })
        }
    }

    /// Require a finite value within `[min, max]`
    pub fn in_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<f64, Self> {
        let value = Self::finite(field, value)?;
        if (min..=max).contains(&value) {
            Ok(value)
        } else {
            Err(Self::OutOfRange { field, value, min, max })
        }
    }
}
