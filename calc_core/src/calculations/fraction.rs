//! # Fraction Arithmetic
//!
//! Exact rational arithmetic on `i64` numerator/denominator pairs.
//!
//! A [`Fraction`] is always normalized: reduced by the gcd with a positive
//! denominator. Intermediate products are computed in `i128` so the usual
//! cross-multiplications cannot overflow silently; a result that does not
//! fit back into `i64` is reported as an error.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::fraction::Fraction;
//!
//! let a: Fraction = "1/2".parse().unwrap();
//! let b: Fraction = "1 1/3".parse().unwrap();
//! let sum = a.checked_add(&b).unwrap();
//! assert_eq!(sum.to_string(), "11/6");
//! assert_eq!(sum.to_mixed().to_string(), "1 5/6");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Normalized rational number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFraction")]
pub struct Fraction {
    numerator: i64,
    denominator: i64,
}

/// Unchecked wire form; deserialization goes through [`Fraction::new`].
#[derive(Debug, Clone, Copy, Deserialize)]
struct RawFraction {
    numerator: i64,
    denominator: i64,
}

impl TryFrom<RawFraction> for Fraction {
    type Error = CalcError;

    fn try_from(raw: RawFraction) -> CalcResult<Self> {
        Fraction::new(raw.numerator, raw.denominator)
    }
}

/// Sign, whole part and proper remainder of a fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixedNumber {
    pub negative: bool,
    pub whole: u64,
    pub numerator: u64,
    pub denominator: u64,
}

impl fmt::Display for MixedNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative { "-" } else { "" };
        match (self.whole, self.numerator) {
            (w, 0) => write!(f, "{}{}", sign, w),
            (0, n) => write!(f, "{}{}/{}", sign, n, self.denominator),
            (w, n) => write!(f, "{}{} {}/{}", sign, w, n, self.denominator),
        }
    }
}

impl Fraction {
    /// Create a normalized fraction. Rejects a zero denominator.
    pub fn new(numerator: i64, denominator: i64) -> CalcResult<Self> {
        if denominator == 0 {
            return Err(CalcError::invalid_input(
                "denominator",
                "0",
                "Denominator cannot be zero",
            ));
        }
        Self::from_i128(numerator as i128, denominator as i128, "new")
    }

    /// Whole number `n/1`
    pub fn integer(n: i64) -> Self {
        Self {
            numerator: n,
            denominator: 1,
        }
    }

    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    /// Reduce and sign-normalize a wide pair; `den` must be non-zero.
    fn from_i128(num: i128, den: i128, operation: &str) -> CalcResult<Self> {
        let g = gcd_i128(num, den);
        let sign = if den < 0 { -1 } else { 1 };
        let num = sign * num / g;
        let den = sign * den / g;
        let overflow = || CalcError::non_finite(format!("fraction {}", operation), "fraction");
        Ok(Self {
            numerator: i64::try_from(num).map_err(|_| overflow())?,
            denominator: i64::try_from(den).map_err(|_| overflow())?,
        })
    }

    pub fn checked_add(&self, other: &Self) -> CalcResult<Self> {
        let (a, b, c, d) = self.wide(other);
        Self::from_i128(a * d + c * b, b * d, "add")
    }

    pub fn checked_sub(&self, other: &Self) -> CalcResult<Self> {
        let (a, b, c, d) = self.wide(other);
        Self::from_i128(a * d - c * b, b * d, "subtract")
    }

    pub fn checked_mul(&self, other: &Self) -> CalcResult<Self> {
        let (a, b, c, d) = self.wide(other);
        Self::from_i128(a * c, b * d, "multiply")
    }

    /// Division; dividing by a zero-valued fraction is a domain error.
    pub fn checked_div(&self, other: &Self) -> CalcResult<Self> {
        if other.numerator == 0 {
            return Err(CalcError::domain("fraction divide", "division by a zero fraction"));
        }
        let (a, b, c, d) = self.wide(other);
        Self::from_i128(a * d, b * c, "divide")
    }

    fn wide(&self, other: &Self) -> (i128, i128, i128, i128) {
        (
            self.numerator as i128,
            self.denominator as i128,
            other.numerator as i128,
            other.denominator as i128,
        )
    }

    /// Split into sign, whole part and proper remainder.
    pub fn to_mixed(&self) -> MixedNumber {
        let num = self.numerator.unsigned_abs();
        let den = self.denominator.unsigned_abs();
        MixedNumber {
            negative: self.numerator < 0,
            whole: num / den,
            numerator: num % den,
            denominator: den,
        }
    }

    pub fn to_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }
}

fn gcd_i128(a: i128, b: i128) -> i128 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Reduce `numerator/denominator` to lowest terms.
pub fn simplify(numerator: i64, denominator: i64) -> CalcResult<Fraction> {
    Fraction::new(numerator, denominator)
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

impl FromStr for Fraction {
    type Err = CalcError;

    /// Accepts `"n"`, `"n/d"` and mixed `"w n/d"` (sign on the whole part).
    fn from_str(s: &str) -> CalcResult<Self> {
        let text = s.trim();
        let parse_int = |part: &str| -> CalcResult<i64> {
            part.trim()
                .parse::<i64>()
                .map_err(|_| CalcError::parse(s, 0, format!("'{}' is not an integer", part.trim())))
        };

        let (whole, rest) = match text.split_once(char::is_whitespace) {
            Some((w, r)) if r.contains('/') => (Some(parse_int(w)?), r.trim()),
            Some(_) => return Err(CalcError::parse(s, 0, "expected 'n/d' after whole part")),
            None => (None, text),
        };

        let fraction = match rest.split_once('/') {
            Some((n, d)) => Fraction::new(parse_int(n)?, parse_int(d)?)?,
            None => Fraction::integer(parse_int(rest)?),
        };

        match whole {
            None => Ok(fraction),
            Some(w) => {
                if fraction.numerator < 0 {
                    return Err(CalcError::parse(s, 0, "only the whole part may carry a sign"));
                }
                // Widened so an i64::MIN whole part keeps its magnitude
                let den = fraction.denominator as i128;
                let magnitude = (w as i128).abs() * den + fraction.numerator as i128;
                let numerator = if w < 0 || text.starts_with('-') {
                    -magnitude
                } else {
                    magnitude
                };
                Fraction::from_i128(numerator, den, "parse")
            }
        }
    }
}

/// Arithmetic operator for the fraction calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FractionOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FractionInput {
    pub left: Fraction,
    pub op: FractionOp,
    pub right: Fraction,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FractionResult {
    pub fraction: Fraction,
    pub mixed: MixedNumber,
    pub decimal: f64,
}

/// Apply `op` to two fractions and report the result in all display forms.
pub fn fraction_arithmetic(input: &FractionInput) -> CalcResult<FractionResult> {
    let fraction = match input.op {
        FractionOp::Add => input.left.checked_add(&input.right)?,
        FractionOp::Subtract => input.left.checked_sub(&input.right)?,
        FractionOp::Multiply => input.left.checked_mul(&input.right)?,
        FractionOp::Divide => input.left.checked_div(&input.right)?,
    };
    Ok(FractionResult {
        fraction,
        mixed: fraction.to_mixed(),
        decimal: fraction.to_f64(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn frac(n: i64, d: i64) -> Fraction {
        Fraction::new(n, d).unwrap()
    }

    #[test]
    fn test_simplify() {
        let f = simplify(6, 8).unwrap();
        assert_eq!((f.numerator(), f.denominator()), (3, 4));
    }

    #[test]
    fn test_negative_denominator_normalized() {
        let f = frac(3, -6);
        assert_eq!((f.numerator(), f.denominator()), (-1, 2));
    }

    #[test]
    fn test_zero_denominator_rejected() {
        let err = Fraction::new(1, 0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_arithmetic() {
        let a = frac(1, 2);
        let b = frac(1, 3);
        assert_eq!(a.checked_add(&b).unwrap(), frac(5, 6));
        assert_eq!(a.checked_sub(&b).unwrap(), frac(1, 6));
        assert_eq!(a.checked_mul(&b).unwrap(), frac(1, 6));
        assert_eq!(a.checked_div(&b).unwrap(), frac(3, 2));
    }

    #[test]
    fn test_divide_by_zero_fraction() {
        let err = frac(1, 2).checked_div(&frac(0, 5)).unwrap_err();
        assert_eq!(err.error_code(), "DOMAIN_ERROR");
    }

    #[test]
    fn test_overflow_reported() {
        let big = frac(i64::MAX, 1);
        assert!(big.checked_add(&big).is_err());
    }

    #[test]
    fn test_mixed_number() {
        let mixed = frac(-7, 3).to_mixed();
        assert!(mixed.negative);
        assert_eq!((mixed.whole, mixed.numerator, mixed.denominator), (2, 1, 3));
        assert_eq!(mixed.to_string(), "-2 1/3");
        assert_eq!(frac(4, 2).to_mixed().to_string(), "2");
        assert_eq!(frac(1, 4).to_mixed().to_string(), "1/4");
    }

    #[test]
    fn test_parse() {
        assert_eq!("3/4".parse::<Fraction>().unwrap(), frac(3, 4));
        assert_eq!("-2 1/2".parse::<Fraction>().unwrap(), frac(-5, 2));
        assert_eq!("5".parse::<Fraction>().unwrap(), frac(5, 1));
        assert!("1/0".parse::<Fraction>().is_err());
        assert!("a/b".parse::<Fraction>().is_err());
        assert!("1 2".parse::<Fraction>().is_err());
        assert_eq!("-0 1/2".parse::<Fraction>().unwrap(), frac(-1, 2));
    }

    #[test]
    fn test_parse_extreme_whole_part() {
        let err = "-9223372036854775808 1/2".parse::<Fraction>().unwrap_err();
        assert_eq!(err.error_code(), "NON_FINITE_RESULT");
        assert_eq!(
            "-9223372036854775808 0/1".parse::<Fraction>().unwrap(),
            Fraction::integer(i64::MIN)
        );
        assert_eq!(
            "9223372036854775806 2/2".parse::<Fraction>().unwrap(),
            Fraction::integer(i64::MAX)
        );
    }

    #[test]
    fn test_deserialize_normalizes() {
        let f: Fraction = serde_json::from_str(r#"{"numerator":6,"denominator":-8}"#).unwrap();
        assert_eq!(f, frac(-3, 4));
        assert!(serde_json::from_str::<Fraction>(r#"{"numerator":1,"denominator":0}"#).is_err());
    }

    #[test]
    fn test_fraction_calculator() {
        let result = fraction_arithmetic(&FractionInput {
            left: frac(3, 4),
            op: FractionOp::Multiply,
            right: frac(2, 3),
        })
        .unwrap();
        assert_eq!(result.fraction, frac(1, 2));
        assert_eq!(result.decimal, 0.5);
    }

    proptest! {
        #[test]
        fn prop_simplify_idempotent(n in -10_000i64..10_000, d in 1i64..10_000) {
            let once = simplify(n, d).unwrap();
            let twice = simplify(once.numerator(), once.denominator()).unwrap();
            prop_assert_eq!(once, twice);
            prop_assert!(once.denominator() > 0);
        }
    }
}
