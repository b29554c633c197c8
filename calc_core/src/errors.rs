//! # Error Types
//!
//! Structured error types for calc_core. Every calculator returns a typed
//! failure instead of a numeric result when it cannot produce a meaningful
//! value; nothing in this crate panics on bad input or yields NaN/Infinity.
//!
//! ## Taxonomy
//!
//! - **Validation** - non-numeric, out-of-range, or missing fields, detected
//!   before any formula runs
//! - **Domain** - mathematically undefined operations (division by zero,
//!   log of a non-positive number, under/over-determined solvers)
//! - **Non-finite** - the formula ran but produced NaN or Infinity
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_years(years: f64) -> CalcResult<()> {
//!     if years <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "years".to_string(),
//!             value: years.to_string(),
//!             reason: "Tenure must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong sign, malformed)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// The operation is mathematically undefined for these inputs
    #[error("Domain error in {operation}: {reason}")]
    DomainError { operation: String, reason: String },

    /// The formula produced NaN or Infinity
    #[error("Non-finite result: {calculation} produced a non-finite {quantity}")]
    NonFiniteResult {
        calculation: String,
        quantity: String,
    },

    /// A "solve for the missing value" calculator did not have exactly one unknown
    #[error("Unsolvable: {reason}")]
    Unsolvable { reason: String },

    /// Calculation ran but could not reach an answer (e.g. payoff never completes)
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// Text input (expression, chemical formula) could not be parsed
    #[error("Parse error at position {position} in '{input}': {reason}")]
    ParseError {
        input: String,
        position: usize,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// The random source failed (OS entropy unavailable)
    #[error("Random source error: {reason}")]
    RandomSource { reason: String },
}

/// Coarse grouping of errors, matching how a caller presents them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// Bad or missing input; fix the form and retry
    Validation,
    /// Mathematically undefined for the given inputs
    Domain,
    /// Formula overflowed to NaN/Infinity
    NonFinite,
    /// Environment or encoding failure outside the formula itself
    System,
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a DomainError
    pub fn domain(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::DomainError {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create a NonFiniteResult error
    pub fn non_finite(calculation: impl Into<String>, quantity: impl Into<String>) -> Self {
        CalcError::NonFiniteResult {
            calculation: calculation.into(),
            quantity: quantity.into(),
        }
    }

    /// Create an Unsolvable error
    pub fn unsolvable(reason: impl Into<String>) -> Self {
        CalcError::Unsolvable {
            reason: reason.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Create a ParseError
    pub fn parse(input: impl Into<String>, position: usize, reason: impl Into<String>) -> Self {
        CalcError::ParseError {
            input: input.into(),
            position,
            reason: reason.into(),
        }
    }

    /// Which of the three failure families this error belongs to
    pub fn category(&self) -> ErrorCategory {
        match self {
            CalcError::InvalidInput { .. }
            | CalcError::MissingField { .. }
            | CalcError::ParseError { .. } => ErrorCategory::Validation,
            CalcError::DomainError { .. }
            | CalcError::Unsolvable { .. }
            | CalcError::CalculationFailed { .. } => ErrorCategory::Domain,
            CalcError::NonFiniteResult { .. } => ErrorCategory::NonFinite,
            CalcError::SerializationError { .. } | CalcError::RandomSource { .. } => {
                ErrorCategory::System
            }
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::DomainError { .. } => "DOMAIN_ERROR",
            CalcError::NonFiniteResult { .. } => "NON_FINITE_RESULT",
            CalcError::Unsolvable { .. } => "UNSOLVABLE",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::ParseError { .. } => "PARSE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::RandomSource { .. } => "RANDOM_SOURCE_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}
