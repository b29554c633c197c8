//! # Unit Types
//!
//! Type-safe wrappers for the physical units the calculators accept. These
//! guard against mixing metric and imperial values while staying plain
//! `f64` newtypes that serialize as bare numbers.
//!
//! Health formulas are defined in metric units; the imperial wrappers
//! convert into them through `From`. Temperatures convert through Celsius.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{Centimeters, Inches, Kilograms, Pounds};
//!
//! let height: Centimeters = Inches(70.0).into();
//! assert!((height.0 - 177.8).abs() < 1e-9);
//!
//! let weight: Kilograms = Pounds(154.0).into();
//! assert!((weight.0 - 69.853).abs() < 0.001);
//! ```

use serde::{Deserialize, Serialize};

/// Kilograms per avoirdupois pound
pub const KG_PER_LB: f64 = 0.453_592_37;
/// Centimeters per inch
pub const CM_PER_IN: f64 = 2.54;

// ============================================================================
// Length Units
// ============================================================================

/// Length in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl From<Inches> for Centimeters {
    fn from(inches: Inches) -> Self {
        Centimeters(inches.0 * CM_PER_IN)
    }
}

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Mass in pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pounds(pub f64);

impl From<Pounds> for Kilograms {
    fn from(lb: Pounds) -> Self {
        Kilograms(lb.0 * KG_PER_LB)
    }
}

// ============================================================================
// Temperature Units
// ============================================================================

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Celsius(pub f64);

/// Temperature in degrees Fahrenheit
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fahrenheit(pub f64);

/// Absolute temperature in kelvin
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kelvin(pub f64);

impl From<Fahrenheit> for Celsius {
    fn from(f: Fahrenheit) -> Self {
        Celsius((f.0 - 32.0) * 5.0 / 9.0)
    }
}

impl From<Celsius> for Fahrenheit {
    fn from(c: Celsius) -> Self {
        Fahrenheit(c.0 * 9.0 / 5.0 + 32.0)
    }
}

impl From<Kelvin> for Celsius {
    fn from(k: Kelvin) -> Self {
        Celsius(k.0 - 273.15)
    }
}

impl From<Celsius> for Kelvin {
    fn from(c: Celsius) -> Self {
        Kelvin(c.0 + 273.15)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inches_to_centimeters() {
        let cm: Centimeters = Inches(10.0).into();
        assert!((cm.0 - 25.4).abs() < 1e-9);
    }

    #[test]
    fn test_pounds_to_kilograms() {
        let kg: Kilograms = Pounds(100.0).into();
        assert!((kg.0 - 45.359237).abs() < 1e-9);
    }

    #[test]
    fn test_temperature_conversions() {
        let c: Celsius = Fahrenheit(212.0).into();
        assert!((c.0 - 100.0).abs() < 1e-9);

        let k: Kelvin = Celsius(0.0).into();
        assert!((k.0 - 273.15).abs() < 1e-9);

        let f: Fahrenheit = Celsius::from(Kelvin(0.0)).into();
        assert!((f.0 + 459.67).abs() < 1e-9);
    }

    #[test]
    fn test_serialization() {
        let cm = Centimeters(175.5);
        let json = serde_json::to_string(&cm).unwrap();
        assert_eq!(json, "175.5");

        let roundtrip: Centimeters = serde_json::from_str(&json).unwrap();
        assert_eq!(cm, roundtrip);
    }
}
