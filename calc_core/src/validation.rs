//! Shared input checks used by every calculator's `validate()`.
//!
//! Each helper names the offending field so the resulting
//! [`CalcError::InvalidInput`] can be shown next to the right form control.

use crate::errors::{CalcError, CalcResult};

/// Value must be a finite number strictly greater than zero.
pub fn require_positive(field: &str, value: f64) -> CalcResult<()> {
    require_finite_input(field, value)?;
    if value <= 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Must be greater than zero",
        ));
    }
    Ok(())
}

/// Value must be a finite number greater than or equal to zero.
pub fn require_non_negative(field: &str, value: f64) -> CalcResult<()> {
    require_finite_input(field, value)?;
    if value < 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Cannot be negative",
        ));
    }
    Ok(())
}

/// Value must be a finite number (NaN and Infinity are rejected).
pub fn require_finite_input(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Must be a finite number",
        ));
    }
    Ok(())
}

/// Value must lie in the closed range `[min, max]`.
pub fn require_in_range(field: &str, value: f64, min: f64, max: f64) -> CalcResult<()> {
    require_finite_input(field, value)?;
    if value < min || value > max {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            format!("Must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

/// Guard a computed output against NaN/Infinity.
///
/// Returns the value unchanged when finite.
pub fn ensure_finite(calculation: &str, quantity: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::non_finite(calculation, quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_positive() {
        assert!(require_positive("principal", 1.0).is_ok());
        assert!(require_positive("principal", 0.0).is_err());
        assert!(require_positive("principal", -3.0).is_err());
        assert!(require_positive("principal", f64::NAN).is_err());
    }

    #[test]
    fn test_require_non_negative() {
        assert!(require_non_negative("rate", 0.0).is_ok());
        assert!(require_non_negative("rate", -0.1).is_err());
        assert!(require_non_negative("rate", f64::INFINITY).is_err());
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("emi", "emi", 12.5), Ok(12.5));
        let err = ensure_finite("emi", "emi", f64::INFINITY).unwrap_err();
        assert_eq!(err.error_code(), "NON_FINITE_RESULT");
    }
}
