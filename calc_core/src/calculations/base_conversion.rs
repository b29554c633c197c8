//! # Number Base Conversion
//!
//! Parses a string in binary, decimal or hexadecimal and renders the value
//! in all three. Input is validated with a strict per-base pattern before
//! parsing, so `"12"` is not accepted as binary and `"0x1F"` is not
//! accepted as hex.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

static BINARY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[01]+$").expect("valid regex"));
static DECIMAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+$").expect("valid regex"));
static HEX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9a-fA-F]+$").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumberBase {
    Binary,
    Decimal,
    Hexadecimal,
}

impl NumberBase {
    pub fn radix(&self) -> u32 {
        match self {
            NumberBase::Binary => 2,
            NumberBase::Decimal => 10,
            NumberBase::Hexadecimal => 16,
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            NumberBase::Binary => &BINARY_RE,
            NumberBase::Decimal => &DECIMAL_RE,
            NumberBase::Hexadecimal => &HEX_RE,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            NumberBase::Binary => "binary",
            NumberBase::Decimal => "decimal",
            NumberBase::Hexadecimal => "hexadecimal",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseConversionInput {
    pub value: String,
    pub from: NumberBase,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BaseConversionResult {
    pub value: i64,
    pub binary: String,
    pub decimal: String,
    /// Upper-case digits
    pub hexadecimal: String,
}

/// Validate, parse and re-render a number in binary/decimal/hex.
pub fn convert_base(input: &BaseConversionInput) -> CalcResult<BaseConversionResult> {
    let text = input.value.trim();
    if text.is_empty() {
        return Err(CalcError::missing_field("value"));
    }
    if !input.from.pattern().is_match(text) {
        return Err(CalcError::invalid_input(
            "value",
            text,
            format!("Not a valid {} number", input.from.display_name()),
        ));
    }
    let value = i64::from_str_radix(text, input.from.radix()).map_err(|e| {
        CalcError::invalid_input("value", text, format!("Out of range: {}", e))
    })?;

    Ok(BaseConversionResult {
        value,
        binary: render(value, NumberBase::Binary),
        decimal: value.to_string(),
        hexadecimal: render(value, NumberBase::Hexadecimal),
    })
}

/// Render with an explicit sign and magnitude digits (no two's complement).
fn render(value: i64, base: NumberBase) -> String {
    let sign = if value < 0 { "-" } else { "" };
    let magnitude = value.unsigned_abs();
    match base {
        NumberBase::Binary => format!("{}{:b}", sign, magnitude),
        NumberBase::Decimal => format!("{}{}", sign, magnitude),
        NumberBase::Hexadecimal => format!("{}{:X}", sign, magnitude),
    }
}
