//! # Arithmetic Utilities
//!
//! Integer number theory (GCD/LCM, modulo), logarithms, percentage
//! variants, and the "solve for the missing value" calculators (ratio
//! proportion and Ohm's law).
//!
//! The solvers accept `Option<f64>` slots and require exactly one `None`.
//! Zero or several unknowns is [`CalcError::Unsolvable`], never a guess.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::arithmetic::{gcd, lcm, ratio_solve, ProportionSlot};
//!
//! assert_eq!(gcd(12, 18), 6);
//! assert_eq!(lcm(4, 6).unwrap(), 12);
//!
//! let solved = ratio_solve(Some(2.0), Some(4.0), Some(3.0), None).unwrap();
//! assert_eq!(solved.solved_for, ProportionSlot::D);
//! assert_eq!(solved.d, 6.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::validation::{ensure_finite, require_finite_input};

// =============================================================================
// GCD / LCM
// =============================================================================

/// Greatest common divisor via the iterative Euclidean algorithm on
/// absolute values. `gcd(0, 0) == 0`.
pub fn gcd(a: i64, b: i64) -> u64 {
    gcd_u64(a.unsigned_abs(), b.unsigned_abs())
}

/// Least common multiple `|a*b| / gcd(a,b)`; 0 when the gcd is 0.
///
/// Fails when the result does not fit in a `u64`.
pub fn lcm(a: i64, b: i64) -> CalcResult<u64> {
    let g = gcd(a, b);
    if g == 0 {
        return Ok(0);
    }
    (a.unsigned_abs() / g)
        .checked_mul(b.unsigned_abs())
        .ok_or_else(|| CalcError::non_finite("lcm", "least common multiple"))
}

/// GCD of a list (0 for an empty list)
pub fn gcd_all(values: &[i64]) -> u64 {
    values.iter().fold(0, |acc, v| gcd_u64(acc, v.unsigned_abs()))
}

/// LCM of a list. Requires at least one value.
pub fn lcm_all(values: &[i64]) -> CalcResult<u64> {
    let (first, rest) = values
        .split_first()
        .ok_or_else(|| CalcError::missing_field("numbers"))?;
    let mut acc = first.unsigned_abs();
    for v in rest {
        let v = v.unsigned_abs();
        if acc == 0 || v == 0 {
            acc = 0;
            continue;
        }
        let g = gcd_u64(acc, v);
        acc = (acc / g)
            .checked_mul(v)
            .ok_or_else(|| CalcError::non_finite("lcm", "least common multiple"))?;
    }
    Ok(acc)
}

fn gcd_u64(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GcdLcmInput {
    pub numbers: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GcdLcmResult {
    pub gcd: u64,
    pub lcm: u64,
}

/// HCF and LCM of a list of integers (at least two).
pub fn gcd_lcm(input: &GcdLcmInput) -> CalcResult<GcdLcmResult> {
    if input.numbers.len() < 2 {
        return Err(CalcError::invalid_input(
            "numbers",
            format!("{} value(s)", input.numbers.len()),
            "Enter at least two integers",
        ));
    }
    Ok(GcdLcmResult {
        gcd: gcd_all(&input.numbers),
        lcm: lcm_all(&input.numbers)?,
    })
}

// =============================================================================
// Modulo
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuloInput {
    pub dividend: i64,
    pub divisor: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModuloResult {
    /// Truncated quotient
    pub quotient: i64,
    /// Remainder with the sign of the dividend
    pub remainder: i64,
    /// Always non-negative remainder
    pub euclidean_remainder: i64,
}

/// Integer division with truncated and Euclidean remainders.
pub fn modulo(input: &ModuloInput) -> CalcResult<ModuloResult> {
    if input.divisor == 0 {
        return Err(CalcError::domain("modulo", "division by zero"));
    }
    let overflow = || CalcError::non_finite("modulo", "quotient");
    Ok(ModuloResult {
        quotient: input.dividend.checked_div(input.divisor).ok_or_else(overflow)?,
        remainder: input.dividend.checked_rem(input.divisor).ok_or_else(overflow)?,
        euclidean_remainder: input
            .dividend
            .checked_rem_euclid(input.divisor)
            .ok_or_else(overflow)?,
    })
}

// =============================================================================
// Logarithms
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogarithmInput {
    pub value: f64,
    /// Optional custom base
    #[serde(default)]
    pub base: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogarithmResult {
    pub log10: f64,
    pub ln: f64,
    pub log2: f64,
    /// Logarithm in the requested base, if one was given
    pub log_base: Option<f64>,
}

/// Common, natural, binary and optional custom-base logarithms.
pub fn logarithm(input: &LogarithmInput) -> CalcResult<LogarithmResult> {
    require_finite_input("value", input.value)?;
    if input.value <= 0.0 {
        return Err(CalcError::domain(
            "logarithm",
            "logarithm is undefined for non-positive values",
        ));
    }
    let log_base = match input.base {
        Some(base) => {
            require_finite_input("base", base)?;
            if base <= 0.0 || base == 1.0 {
                return Err(CalcError::domain(
                    "logarithm",
                    "base must be positive and not equal to 1",
                ));
            }
            Some(input.value.ln() / base.ln())
        }
        None => None,
    };
    Ok(LogarithmResult {
        log10: input.value.log10(),
        ln: input.value.ln(),
        log2: input.value.log2(),
        log_base,
    })
}

// =============================================================================
// Percentages
// =============================================================================

/// Direction of a percentage change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDirection {
    Increase,
    Decrease,
    Unchanged,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PercentageChange {
    /// Signed change in percent
    pub value: f64,
    pub direction: ChangeDirection,
}

/// The three percentage calculators, tagged by `kind` in JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PercentageInput {
    /// X% of Y
    PercentOf { percent: f64, of: f64 },
    /// X is what % of Y
    WhatPercent { part: f64, whole: f64 },
    /// Change from old to new
    Change { old: f64, new: f64 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PercentageResult {
    Value { value: f64 },
    Change(PercentageChange),
}

/// `percent% of value`
pub fn percent_of(percent: f64, value: f64) -> CalcResult<f64> {
    require_finite_input("percent", percent)?;
    require_finite_input("of", value)?;
    ensure_finite("percent_of", "value", percent * value / 100.0)
}

/// What percent `part` is of `whole`. `whole` must be non-zero.
pub fn what_percent(part: f64, whole: f64) -> CalcResult<f64> {
    require_finite_input("part", part)?;
    require_finite_input("whole", whole)?;
    if whole == 0.0 {
        return Err(CalcError::domain("what_percent", "whole must be non-zero"));
    }
    ensure_finite("what_percent", "value", part * 100.0 / whole)
}

/// `(new - old) / old * 100`.
///
/// `0 -> 0` is defined as no change; `0 -> non-zero` is undefined.
pub fn percentage_change(old: f64, new: f64) -> CalcResult<PercentageChange> {
    require_finite_input("old", old)?;
    require_finite_input("new", new)?;
    if old == 0.0 {
        if new == 0.0 {
            return Ok(PercentageChange {
                value: 0.0,
                direction: ChangeDirection::Unchanged,
            });
        }
        return Err(CalcError::domain(
            "percentage_change",
            "change from zero is undefined",
        ));
    }
    let value = ensure_finite("percentage_change", "value", (new - old) * 100.0 / old)?;
    let direction = if value > 0.0 {
        ChangeDirection::Increase
    } else if value < 0.0 {
        ChangeDirection::Decrease
    } else {
        ChangeDirection::Unchanged
    };
    Ok(PercentageChange { value, direction })
}

/// Dispatch a [`PercentageInput`].
pub fn percentage(input: &PercentageInput) -> CalcResult<PercentageResult> {
    match *input {
        PercentageInput::PercentOf { percent, of } => {
            percent_of(percent, of).map(|value| PercentageResult::Value { value })
        }
        PercentageInput::WhatPercent { part, whole } => {
            what_percent(part, whole).map(|value| PercentageResult::Value { value })
        }
        PercentageInput::Change { old, new } => {
            percentage_change(old, new).map(PercentageResult::Change)
        }
    }
}

// =============================================================================
// Ratio / Proportion
// =============================================================================

/// Position in `A:B = C:D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProportionSlot {
    A,
    B,
    C,
    D,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProportionInput {
    #[serde(default)]
    pub a: Option<f64>,
    #[serde(default)]
    pub b: Option<f64>,
    #[serde(default)]
    pub c: Option<f64>,
    #[serde(default)]
    pub d: Option<f64>,
}

/// A fully solved proportion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Proportion {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub solved_for: ProportionSlot,
}

fn single_unknown<const N: usize>(slots: &[Option<f64>; N], names: &[&str; N]) -> CalcResult<usize> {
    let missing: Vec<usize> = (0..N).filter(|&i| slots[i].is_none()).collect();
    match missing.as_slice() {
        [idx] => {
            for (slot, name) in slots.iter().zip(names) {
                if let Some(v) = slot {
                    require_finite_input(name, *v)?;
                }
            }
            Ok(*idx)
        }
        [] => Err(CalcError::unsolvable("all values are filled in; leave exactly one empty")),
        many => Err(CalcError::unsolvable(format!(
            "{} values are empty; leave exactly one empty",
            many.len()
        ))),
    }
}

fn divide(operation: &str, numerator: f64, denominator: f64) -> CalcResult<f64> {
    if denominator == 0.0 {
        return Err(CalcError::domain(operation, "division by zero"));
    }
    ensure_finite(operation, "result", numerator / denominator)
}

/// Solve `A:B = C:D` for the single unknown by cross-multiplication
/// (`A·D = B·C`).
pub fn ratio_solve(a: Option<f64>, b: Option<f64>, c: Option<f64>, d: Option<f64>) -> CalcResult<Proportion> {
    let slots = [a, b, c, d];
    let idx = single_unknown(&slots, &["a", "b", "c", "d"])?;
    let [a, b, c, d] = slots.map(|s| s.unwrap_or_default());

    let op = "ratio_solve";
    let solved = match idx {
        0 => Proportion { a: divide(op, b * c, d)?, b, c, d, solved_for: ProportionSlot::A },
        1 => Proportion { a, b: divide(op, a * d, c)?, c, d, solved_for: ProportionSlot::B },
        2 => Proportion { a, b, c: divide(op, a * d, b)?, d, solved_for: ProportionSlot::C },
        _ => Proportion { a, b, c, d: divide(op, b * c, a)?, solved_for: ProportionSlot::D },
    };
    Ok(solved)
}

/// Solve a [`ProportionInput`].
pub fn proportion(input: &ProportionInput) -> CalcResult<Proportion> {
    ratio_solve(input.a, input.b, input.c, input.d)
}

/// Reduce an integer ratio `a:b` by its gcd.
pub fn simplify_ratio(a: i64, b: i64) -> CalcResult<(i64, i64)> {
    let g = gcd(a, b);
    if g == 0 {
        return Err(CalcError::domain("simplify_ratio", "ratio 0:0 is undefined"));
    }
    // g divides both, and g > 1 fits in i64 unless both are i64::MIN.
    let g = i64::try_from(g).map_err(|_| CalcError::non_finite("simplify_ratio", "divisor"))?;
    Ok((a / g, b / g))
}

// =============================================================================
// Ohm's Law
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OhmsLawInput {
    /// Volts
    #[serde(default)]
    pub voltage: Option<f64>,
    /// Amperes
    #[serde(default)]
    pub current: Option<f64>,
    /// Ohms
    #[serde(default)]
    pub resistance: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OhmsLawResult {
    pub voltage: f64,
    pub current: f64,
    pub resistance: f64,
    /// Watts, `V·I`
    pub power: f64,
}

/// Solve `V = I·R` for the one empty quantity and report power.
pub fn ohms_law(input: &OhmsLawInput) -> CalcResult<OhmsLawResult> {
    let slots = [input.voltage, input.current, input.resistance];
    let idx = single_unknown(&slots, &["voltage", "current", "resistance"])?;
    let [v, i, r] = slots.map(|s| s.unwrap_or_default());

    let op = "ohms_law";
    let (voltage, current, resistance) = match idx {
        0 => (ensure_finite(op, "voltage", i * r)?, i, r),
        1 => (v, divide(op, v, r)?, r),
        _ => (v, i, divide(op, v, i)?),
    };
    Ok(OhmsLawResult {
        voltage,
        current,
        resistance,
        power: voltage * current,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_gcd_basic() {
        assert_eq!(gcd(48, 18), 6);
        assert_eq!(gcd(-48, 18), 6);
        assert_eq!(gcd(0, 5), 5);
        assert_eq!(gcd(0, 0), 0);
        assert_eq!(gcd(i64::MIN, 0), 1u64 << 63);
    }

    #[test]
    fn test_lcm_basic() {
        assert_eq!(lcm(4, 6).unwrap(), 12);
        assert_eq!(lcm(-4, 6).unwrap(), 12);
        assert_eq!(lcm(0, 0).unwrap(), 0);
        assert_eq!(lcm(0, 7).unwrap(), 0);
        assert!(lcm(i64::MAX, i64::MAX - 1).is_err());
    }

    #[test]
    fn test_gcd_lcm_lists() {
        let result = gcd_lcm(&GcdLcmInput {
            numbers: vec![12, 18, 30],
        })
        .unwrap();
        assert_eq!(result, GcdLcmResult { gcd: 6, lcm: 180 });
        assert!(gcd_lcm(&GcdLcmInput { numbers: vec![3] }).is_err());
    }

    proptest! {
        #[test]
        fn prop_gcd_commutative(a in -1_000_000i64..1_000_000, b in -1_000_000i64..1_000_000) {
            prop_assert_eq!(gcd(a, b), gcd(b, a));
        }

        #[test]
        fn prop_lcm_times_gcd(a in 1i64..1_000_000, b in 1i64..1_000_000, neg_a in any::<bool>(), neg_b in any::<bool>()) {
            let a = if neg_a { -a } else { a };
            let b = if neg_b { -b } else { b };
            let product = (a as i128 * b as i128).unsigned_abs();
            prop_assert_eq!(lcm(a, b).unwrap() as u128 * gcd(a, b) as u128, product);
        }
    }

    #[test]
    fn test_modulo() {
        let result = modulo(&ModuloInput {
            dividend: -7,
            divisor: 3,
        })
        .unwrap();
        assert_eq!(result.quotient, -2);
        assert_eq!(result.remainder, -1);
        assert_eq!(result.euclidean_remainder, 2);

        assert!(modulo(&ModuloInput {
            dividend: 1,
            divisor: 0
        })
        .is_err());
        assert!(modulo(&ModuloInput {
            dividend: i64::MIN,
            divisor: -1
        })
        .is_err());
    }

    #[test]
    fn test_logarithm() {
        let result = logarithm(&LogarithmInput {
            value: 8.0,
            base: Some(2.0),
        })
        .unwrap();
        assert!((result.log_base.unwrap() - 3.0).abs() < 1e-12);
        assert!((result.log2 - 3.0).abs() < 1e-12);

        assert!(logarithm(&LogarithmInput { value: 0.0, base: None }).is_err());
        assert!(logarithm(&LogarithmInput {
            value: 10.0,
            base: Some(1.0)
        })
        .is_err());
    }

    #[test]
    fn test_percentages() {
        assert_eq!(percent_of(20.0, 50.0).unwrap(), 10.0);
        assert_eq!(what_percent(25.0, 200.0).unwrap(), 12.5);
        assert!(what_percent(1.0, 0.0).is_err());
    }

    #[test]
    fn test_percentage_change() {
        assert_eq!(
            percentage_change(100.0, 120.0).unwrap(),
            PercentageChange {
                value: 20.0,
                direction: ChangeDirection::Increase
            }
        );
        assert_eq!(percentage_change(0.0, 0.0).unwrap().value, 0.0);
        assert_eq!(
            percentage_change(0.0, 5.0).unwrap_err().error_code(),
            "DOMAIN_ERROR"
        );
        let down = percentage_change(200.0, 150.0).unwrap();
        assert_eq!(down.value, -25.0);
        assert_eq!(down.direction, ChangeDirection::Decrease);
    }

    #[test]
    fn test_percentage_input_json() {
        let input: PercentageInput =
            serde_json::from_str(r#"{"kind":"change","old":100.0,"new":120.0}"#).unwrap();
        let result = percentage(&input).unwrap();
        assert_eq!(
            result,
            PercentageResult::Change(PercentageChange {
                value: 20.0,
                direction: ChangeDirection::Increase
            })
        );
    }

    #[test]
    fn test_ratio_solve_each_slot() {
        assert_eq!(ratio_solve(Some(2.0), Some(4.0), Some(3.0), None).unwrap().d, 6.0);
        assert_eq!(ratio_solve(None, Some(4.0), Some(3.0), Some(6.0)).unwrap().a, 2.0);
        assert_eq!(ratio_solve(Some(2.0), None, Some(3.0), Some(6.0)).unwrap().b, 4.0);
        assert_eq!(ratio_solve(Some(2.0), Some(4.0), None, Some(6.0)).unwrap().c, 3.0);
    }

    #[test]
    fn test_ratio_unsolvable() {
        let err = ratio_solve(Some(2.0), None, None, Some(6.0)).unwrap_err();
        assert_eq!(err.error_code(), "UNSOLVABLE");
        let err = ratio_solve(Some(2.0), Some(4.0), Some(3.0), Some(6.0)).unwrap_err();
        assert_eq!(err.error_code(), "UNSOLVABLE");
    }

    #[test]
    fn test_ratio_zero_divisor() {
        let err = ratio_solve(Some(0.0), Some(4.0), Some(3.0), None).unwrap_err();
        assert_eq!(err.error_code(), "DOMAIN_ERROR");
    }

    #[test]
    fn test_simplify_ratio() {
        assert_eq!(simplify_ratio(12, 18).unwrap(), (2, 3));
        assert!(simplify_ratio(0, 0).is_err());
    }

    #[test]
    fn test_ohms_law() {
        let result = ohms_law(&OhmsLawInput {
            voltage: Some(12.0),
            current: None,
            resistance: Some(4.0),
        })
        .unwrap();
        assert_eq!(result.current, 3.0);
        assert_eq!(result.power, 36.0);

        let result = ohms_law(&OhmsLawInput {
            voltage: None,
            current: Some(2.0),
            resistance: Some(5.0),
        })
        .unwrap();
        assert_eq!(result.voltage, 10.0);
    }

    #[test]
    fn test_ohms_law_underdetermined() {
        let err = ohms_law(&OhmsLawInput {
            voltage: Some(12.0),
            current: None,
            resistance: None,
        })
        .unwrap_err();
        assert_eq!(err.error_code(), "UNSOLVABLE");
    }
}
