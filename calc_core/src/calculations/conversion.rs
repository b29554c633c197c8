//! # Unit and Currency Conversion
//!
//! Linear units convert through a per-category base unit (meter, kilogram,
//! square meter, liter, meter/second, second, byte). Temperature is affine
//! and goes through [`Celsius`].
//!
//! Currency rates are fixed sample constants quoted against USD; there is
//! no live exchange-rate feed.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::conversion::{convert_units, Unit, UnitConversionInput};
//!
//! let km = convert_units(&UnitConversionInput { value: 5.0, from: Unit::Mile, to: Unit::Kilometer }).unwrap();
//! assert!((km - 8.04672).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{Celsius, Fahrenheit, Kelvin};
use crate::validation::{ensure_finite, require_finite_input, require_non_negative};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitCategory {
    Length,
    Mass,
    Temperature,
    Area,
    Volume,
    Speed,
    Time,
    Data,
}

/// Every unit the converter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    // Length (base: meter)
    Millimeter,
    Centimeter,
    Meter,
    Kilometer,
    Inch,
    Foot,
    Yard,
    Mile,
    // Mass (base: kilogram)
    Milligram,
    Gram,
    Kilogram,
    Tonne,
    Ounce,
    Pound,
    // Temperature (affine)
    Celsius,
    Fahrenheit,
    Kelvin,
    // Area (base: square meter)
    SquareMeter,
    SquareKilometer,
    SquareFoot,
    Acre,
    Hectare,
    // Volume (base: liter)
    Milliliter,
    Liter,
    CubicMeter,
    UsGallon,
    UsFluidOunce,
    // Speed (base: meter per second)
    MeterPerSecond,
    KilometerPerHour,
    MilePerHour,
    Knot,
    // Time (base: second)
    Second,
    Minute,
    Hour,
    Day,
    Week,
    // Data (base: byte)
    Bit,
    Byte,
    Kilobyte,
    Megabyte,
    Gigabyte,
    Terabyte,
}

impl Unit {
    pub fn category(&self) -> UnitCategory {
        use Unit::*;
        match self {
            Millimeter | Centimeter | Meter | Kilometer | Inch | Foot | Yard | Mile => UnitCategory::Length,
            Milligram | Gram | Kilogram | Tonne | Ounce | Pound => UnitCategory::Mass,
            Celsius | Fahrenheit | Kelvin => UnitCategory::Temperature,
            SquareMeter | SquareKilometer | SquareFoot | Acre | Hectare => UnitCategory::Area,
            Milliliter | Liter | CubicMeter | UsGallon | UsFluidOunce => UnitCategory::Volume,
            MeterPerSecond | KilometerPerHour | MilePerHour | Knot => UnitCategory::Speed,
            Second | Minute | Hour | Day | Week => UnitCategory::Time,
            Bit | Byte | Kilobyte | Megabyte | Gigabyte | Terabyte => UnitCategory::Data,
        }
    }

    /// Multiplier to the category's base unit; None for temperatures.
    fn to_base(self) -> Option<f64> {
        use Unit::*;
        let factor = match self {
            Millimeter => 0.001,
            Centimeter => 0.01,
            Meter => 1.0,
            Kilometer => 1000.0,
            Inch => 0.0254,
            Foot => 0.3048,
            Yard => 0.9144,
            Mile => 1609.344,
            Milligram => 1e-6,
            Gram => 0.001,
            Kilogram => 1.0,
            Tonne => 1000.0,
            Ounce => 0.028_349_523_125,
            Pound => 0.453_592_37,
            Celsius | Fahrenheit | Kelvin => return None,
            SquareMeter => 1.0,
            SquareKilometer => 1e6,
            SquareFoot => 0.092_903_04,
            Acre => 4_046.856_422_4,
            Hectare => 10_000.0,
            Milliliter => 0.001,
            Liter => 1.0,
            CubicMeter => 1000.0,
            UsGallon => 3.785_411_784,
            UsFluidOunce => 0.029_573_529_562_5,
            MeterPerSecond => 1.0,
            KilometerPerHour => 1.0 / 3.6,
            MilePerHour => 0.447_04,
            Knot => 1852.0 / 3600.0,
            Second => 1.0,
            Minute => 60.0,
            Hour => 3600.0,
            Day => 86_400.0,
            Week => 604_800.0,
            Bit => 0.125,
            Byte => 1.0,
            Kilobyte => 1024.0,
            Megabyte => 1024.0 * 1024.0,
            Gigabyte => 1024.0 * 1024.0 * 1024.0,
            Terabyte => 1024.0 * 1024.0 * 1024.0 * 1024.0,
        };
        Some(factor)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitConversionInput {
    pub value: f64,
    pub from: Unit,
    pub to: Unit,
}

fn to_celsius(value: f64, unit: Unit) -> Celsius {
    match unit {
        Unit::Fahrenheit => Fahrenheit(value).into(),
        Unit::Kelvin => Kelvin(value).into(),
        _ => Celsius(value),
    }
}

fn from_celsius(c: Celsius, unit: Unit) -> f64 {
    match unit {
        Unit::Fahrenheit => Fahrenheit::from(c).0,
        Unit::Kelvin => Kelvin::from(c).0,
        _ => c.0,
    }
}

/// Convert a value between two units of the same category.
pub fn convert_units(input: &UnitConversionInput) -> CalcResult<f64> {
    require_finite_input("value", input.value)?;
    if input.from.category() != input.to.category() {
        return Err(CalcError::invalid_input(
            "to",
            format!("{:?}", input.to),
            format!(
                "Cannot convert {:?} ({:?}) to {:?} ({:?})",
                input.from,
                input.from.category(),
                input.to,
                input.to.category()
            ),
        ));
    }

    let converted = match (input.from.to_base(), input.to.to_base()) {
        (Some(from), Some(to)) => input.value * from / to,
        _ => {
            let celsius = to_celsius(input.value, input.from);
            if Kelvin::from(celsius).0 < 0.0 {
                return Err(CalcError::domain(
                    "convert_units",
                    "temperature is below absolute zero",
                ));
            }
            from_celsius(celsius, input.to)
        }
    };
    ensure_finite("convert_units", "value", converted)
}

/// Currencies with fixed sample rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    USD,
    EUR,
    GBP,
    INR,
    JPY,
    CAD,
    AUD,
    CNY,
}

impl Currency {
    /// Units of this currency per 1 USD (sample constants)
    pub fn per_usd(&self) -> f64 {
        match self {
            Currency::USD => 1.0,
            Currency::EUR => 0.92,
            Currency::GBP => 0.79,
            Currency::INR => 83.0,
            Currency::JPY => 150.0,
            Currency::CAD => 1.36,
            Currency::AUD => 1.52,
            Currency::CNY => 7.2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConversionInput {
    pub amount: f64,
    pub from: Currency,
    pub to: Currency,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrencyConversionResult {
    pub amount: f64,
    /// Units of `to` per one unit of `from`
    pub rate: f64,
}

/// Convert an amount using the fixed sample rate table.
pub fn convert_currency(input: &CurrencyConversionInput) -> CalcResult<CurrencyConversionResult> {
    require_non_negative("amount", input.amount)?;
    let rate = input.to.per_usd() / input.from.per_usd();
    Ok(CurrencyConversionResult {
        amount: ensure_finite("convert_currency", "amount", input.amount * rate)?,
        rate,
    })
}
