//! # Molar Mass
//!
//! Simplified chemical-formula parser. A formula is a run of
//! `(ElementSymbol)(optionalCount)` tokens such as `H2O` or `C6H12O6`.
//! Grouping with parentheses, hydrates (`·5H2O`) and charges are not
//! supported and are rejected as unparsed characters.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::chemistry::{molar_mass, MolarMassInput};
//!
//! let water = molar_mass(&MolarMassInput { formula: "H2O".into() }).unwrap();
//! assert!((water.molar_mass - 18.015).abs() < 1e-3);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

static ELEMENT_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z][a-z]?)(\d*)").expect("valid regex"));

/// Standard atomic weights (g/mol), rounded to three decimals.
const ATOMIC_MASSES: &[(&str, f64)] = &[
    ("H", 1.008),
    ("He", 4.003),
    ("Li", 6.941),
    ("Be", 9.012),
    ("B", 10.811),
    ("C", 12.011),
    ("N", 14.007),
    ("O", 15.999),
    ("F", 18.998),
    ("Ne", 20.180),
    ("Na", 22.990),
    ("Mg", 24.305),
    ("Al", 26.982),
    ("Si", 28.086),
    ("P", 30.974),
    ("S", 32.065),
    ("Cl", 35.453),
    ("Ar", 39.948),
    ("K", 39.098),
    ("Ca", 40.078),
    ("Sc", 44.956),
    ("Ti", 47.867),
    ("V", 50.942),
    ("Cr", 51.996),
    ("Mn", 54.938),
    ("Fe", 55.845),
    ("Co", 58.933),
    ("Ni", 58.693),
    ("Cu", 63.546),
    ("Zn", 65.380),
    ("Ga", 69.723),
    ("Ge", 72.630),
    ("As", 74.922),
    ("Se", 78.971),
    ("Br", 79.904),
    ("Kr", 83.798),
    ("Rb", 85.468),
    ("Sr", 87.620),
    ("Zr", 91.224),
    ("Mo", 95.950),
    ("Pd", 106.420),
    ("Ag", 107.868),
    ("Cd", 112.414),
    ("Sn", 118.710),
    ("Sb", 121.760),
    ("I", 126.904),
    ("Xe", 131.293),
    ("Cs", 132.905),
    ("Ba", 137.327),
    ("W", 183.840),
    ("Pt", 195.084),
    ("Au", 196.967),
    ("Hg", 200.592),
    ("Pb", 207.200),
    ("U", 238.029),
];

pub fn atomic_mass(symbol: &str) -> Option<f64> {
    ATOMIC_MASSES
        .iter()
        .find(|(s, _)| *s == symbol)
        .map(|(_, mass)| *mass)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MolarMassInput {
    pub formula: String,
}

/// One element's contribution to the total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementShare {
    pub symbol: String,
    pub count: u32,
    /// count × atomic mass (g/mol)
    pub mass: f64,
    pub mass_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MolarMassResult {
    pub formula: String,
    /// g/mol
    pub molar_mass: f64,
    /// Elements in order of first appearance; repeated symbols are merged
    pub composition: Vec<ElementShare>,
}

/// Largest subscript accepted on a single element token
pub const MAX_ELEMENT_COUNT: u32 = 10_000;

/// Tokenize a formula into `(symbol, count)` pairs, rejecting gaps.
fn tokenize(formula: &str) -> CalcResult<Vec<(&str, u32)>> {
    let mut tokens = Vec::new();
    let mut cursor = 0;
    for caps in ELEMENT_TOKEN_RE.captures_iter(formula) {
        let (Some(whole), Some(symbol), Some(digits)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        if whole.start() != cursor {
            return Err(unparsed(formula, cursor));
        }
        let count = if digits.as_str().is_empty() {
            1
        } else {
            digits.as_str().parse::<u32>().map_err(|e| {
                CalcError::parse(formula, digits.start(), format!("invalid count: {}", e))
            })?
        };
        if count == 0 {
            return Err(CalcError::parse(formula, digits.start(), "element count must be at least 1"));
        }
        if count > MAX_ELEMENT_COUNT {
            return Err(CalcError::parse(
                formula,
                digits.start(),
                format!("element count must be at most {}", MAX_ELEMENT_COUNT),
            ));
        }
        tokens.push((symbol.as_str(), count));
        cursor = whole.end();
    }
    if cursor != formula.len() {
        return Err(unparsed(formula, cursor));
    }
    Ok(tokens)
}

fn unparsed(formula: &str, position: usize) -> CalcError {
    let found = formula[position..].chars().next().unwrap_or(' ');
    let reason = if found == '(' || found == ')' {
        "parentheses are not supported".to_string()
    } else {
        format!("unexpected character '{}'", found)
    };
    CalcError::parse(formula, position, reason)
}

/// Sum `count × atomic mass` over the formula's element tokens.
pub fn molar_mass(input: &MolarMassInput) -> CalcResult<MolarMassResult> {
    let formula = input.formula.trim();
    if formula.is_empty() {
        return Err(CalcError::missing_field("formula"));
    }

    let mut composition: Vec<ElementShare> = Vec::new();
    for (symbol, count) in tokenize(formula)? {
        let mass = atomic_mass(symbol).ok_or_else(|| {
            CalcError::invalid_input("formula", formula, format!("Unknown element symbol '{}'", symbol))
        })?;
        match composition.iter_mut().find(|e| e.symbol == symbol) {
            Some(existing) => {
                existing.count = existing.count.checked_add(count).ok_or_else(|| {
                    CalcError::invalid_input("formula", formula, format!("Too many '{}' atoms", symbol))
                })?;
                existing.mass += mass * count as f64;
            }
            None => composition.push(ElementShare {
                symbol: symbol.to_string(),
                count,
                mass: mass * count as f64,
                mass_pct: 0.0,
            }),
        }
    }

    let total: f64 = composition.iter().map(|e| e.mass).sum();
    for element in &mut composition {
        element.mass_pct = element.mass / total * 100.0;
    }

    Ok(MolarMassResult {
        formula: formula.to_string(),
        molar_mass: total,
        composition,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mass(formula: &str) -> CalcResult<MolarMassResult> {
        molar_mass(&MolarMassInput {
            formula: formula.to_string(),
        })
    }

    #[test]
    fn test_water() {
        let result = mass("H2O").unwrap();
        assert!((result.molar_mass - 18.015).abs() < 1e-9);
        assert_eq!(result.composition.len(), 2);
        assert_eq!(result.composition[0].count, 2);
    }

    #[test]
    fn test_glucose() {
        let result = mass("C6H12O6").unwrap();
        assert!((result.molar_mass - 180.156).abs() < 1e-9);
        let pct: f64 = result.composition.iter().map(|e| e.mass_pct).sum();
        assert!((pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_repeated_symbols_merge() {
        // Acetic acid: C2H4O2
        let result = mass("CH3COOH").unwrap();
        let carbon = result.composition.iter().find(|e| e.symbol == "C").unwrap();
        let hydrogen = result.composition.iter().find(|e| e.symbol == "H").unwrap();
        assert_eq!(carbon.count, 2);
        assert_eq!(hydrogen.count, 4);
        assert!((result.molar_mass - 60.052).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_parentheses() {
        let err = mass("Ca(OH)2").unwrap_err();
        assert_eq!(err.error_code(), "PARSE_ERROR");
        assert!(err.to_string().contains("parentheses"));
    }

    #[test]
    fn test_rejects_unknown_and_leftovers() {
        assert_eq!(mass("Xx2").unwrap_err().error_code(), "INVALID_INPUT");
        assert_eq!(mass("h2o").unwrap_err().error_code(), "PARSE_ERROR");
        assert_eq!(mass("NaCl!").unwrap_err().error_code(), "PARSE_ERROR");
        assert_eq!(mass("H0").unwrap_err().error_code(), "PARSE_ERROR");
        assert_eq!(mass("  ").unwrap_err().error_code(), "MISSING_FIELD");
    }

    #[test]
    fn test_element_count_bounds() {
        let err = mass("H4000000000H4000000000").unwrap_err();
        assert_eq!(err.error_code(), "PARSE_ERROR");
        assert!(mass("H99999999999").is_err());

        let at_limit = mass("H10000O").unwrap();
        assert_eq!(at_limit.composition[0].count, 10_000);
        assert_eq!(mass("H10001").unwrap_err().error_code(), "PARSE_ERROR");
    }

    #[test]
    fn test_merged_count_overflow_is_an_error() {
        let formula = "H10000".repeat(430_000);
        let err = mass(&formula).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
