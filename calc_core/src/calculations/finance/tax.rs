//! # Tax Calculations
//!
//! Indian income tax under the new regime and GST add/remove.
//!
//! The slab table is a fixed sample; there is no live tax-table feed.

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::validation::{ensure_finite, require_non_negative};

/// Income at or below this pays no tax (section 87A rebate)
pub const REBATE_LIMIT: f64 = 700_000.0;
/// Health and education cess applied on the slab tax
pub const CESS_RATE: f64 = 0.04;

/// New-regime slabs as (lower bound, marginal rate). Each slab ends where
/// the next begins; the last is open-ended.
pub const NEW_REGIME_SLABS: [(f64, f64); 6] = [
    (0.0, 0.00),
    (300_000.0, 0.05),
    (600_000.0, 0.10),
    (900_000.0, 0.15),
    (1_200_000.0, 0.20),
    (1_500_000.0, 0.30),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeTaxInput {
    pub taxable_income: f64,
}

impl IncomeTaxInput {
    pub fn validate(&self) -> CalcResult<()> {
        require_non_negative("taxable_income", self.taxable_income)
    }
}

/// Tax owed within one slab.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlabTax {
    pub lower: f64,
    /// None for the open-ended top slab
    pub upper: Option<f64>,
    pub rate_pct: f64,
    /// Portion of income falling inside this slab
    pub taxable_amount: f64,
    pub tax: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeTaxResult {
    pub taxable_income: f64,
    /// Tax from the slabs before rebate and cess
    pub slab_tax: f64,
    /// Amount waived by the rebate (equals slab_tax when income ≤ 700k)
    pub rebate: f64,
    pub cess: f64,
    /// Final liability: slab_tax - rebate + cess
    pub total_tax: f64,
    pub effective_rate_pct: f64,
    /// Rate on the next rupee of income
    pub marginal_rate_pct: f64,
    pub breakdown: Vec<SlabTax>,
}

/// Income tax under the Indian new regime.
///
/// ```rust
/// use calc_core::calculations::finance::tax::{income_tax_india_new_regime, IncomeTaxInput};
///
/// let result = income_tax_india_new_regime(&IncomeTaxInput { taxable_income: 1_000_000.0 }).unwrap();
/// // 15,000 + 30,000 + 15,000 = 60,000 slab tax, plus 4% cess
/// assert!((result.total_tax - 62_400.0).abs() < 1e-6);
/// ```
pub fn income_tax_india_new_regime(input: &IncomeTaxInput) -> CalcResult<IncomeTaxResult> {
    input.validate()?;
    let income = input.taxable_income;

    let mut breakdown = Vec::new();
    let mut slab_tax = 0.0;
    let mut marginal_rate = 0.0;
    for (idx, (lower, rate)) in NEW_REGIME_SLABS.iter().enumerate() {
        let upper = NEW_REGIME_SLABS.get(idx + 1).map(|(next, _)| *next);
        if income <= *lower && idx > 0 {
            break;
        }
        let top = upper.map_or(income, |u| income.min(u));
        let taxable_amount = (top - lower).max(0.0);
        let tax = taxable_amount * rate;
        slab_tax += tax;
        marginal_rate = *rate;
        breakdown.push(SlabTax {
            lower: *lower,
            upper,
            rate_pct: rate * 100.0,
            taxable_amount,
            tax,
        });
    }

    let rebate = if income <= REBATE_LIMIT { slab_tax } else { 0.0 };
    let cess = (slab_tax - rebate) * CESS_RATE;
    let total_tax = ensure_finite("income_tax", "total_tax", slab_tax - rebate + cess)?;
    let effective_rate_pct = if income > 0.0 {
        total_tax / income * 100.0
    } else {
        0.0
    };

    Ok(IncomeTaxResult {
        taxable_income: income,
        slab_tax,
        rebate,
        cess,
        total_tax,
        effective_rate_pct,
        marginal_rate_pct: marginal_rate * 100.0,
        breakdown,
    })
}

/// Whether the entered amount excludes or includes GST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GstMode {
    /// Amount is the net price; GST is added on top
    Add,
    /// Amount is the gross price; GST is backed out
    Remove,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GstInput {
    pub amount: f64,
    pub rate_pct: f64,
    pub mode: GstMode,
}

impl GstInput {
    pub fn validate(&self) -> CalcResult<()> {
        require_non_negative("amount", self.amount)?;
        require_non_negative("rate_pct", self.rate_pct)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GstResult {
    pub net: f64,
    pub gst: f64,
    pub gross: f64,
}

/// Add GST to a net amount or remove it from a gross amount.
pub fn gst(input: &GstInput) -> CalcResult<GstResult> {
    input.validate()?;
    let factor = 1.0 + input.rate_pct / 100.0;

    let result = match input.mode {
        GstMode::Add => {
            let gst = input.amount * input.rate_pct / 100.0;
            GstResult {
                net: input.amount,
                gst,
                gross: input.amount + gst,
            }
        }
        GstMode::Remove => {
            let net = input.amount / factor;
            GstResult {
                net,
                gst: input.amount - net,
                gross: input.amount,
            }
        }
    };
    ensure_finite("gst", "gross", result.gross)?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tax(income: f64) -> IncomeTaxResult {
        income_tax_india_new_regime(&IncomeTaxInput {
            taxable_income: income,
        })
        .unwrap()
    }

    #[test]
    fn test_rebate_at_limit() {
        let result = tax(700_000.0);
        assert_eq!(result.total_tax, 0.0);
        assert!((result.slab_tax - 25_000.0).abs() < 1e-9);
        assert_eq!(result.rebate, result.slab_tax);
    }

    #[test]
    fn test_fifteen_percent_slab() {
        let result = tax(1_000_000.0);
        assert!((result.slab_tax - 60_000.0).abs() < 1e-9);
        assert!((result.cess - 2_400.0).abs() < 1e-9);
        assert!((result.total_tax - 62_400.0).abs() < 1e-9);
        assert_eq!(result.marginal_rate_pct, 15.0);
        assert_eq!(result.breakdown.len(), 4);
    }

    #[test]
    fn test_top_slab() {
        // 0 + 15k + 30k + 45k + 60k + 30% of 500k (150k) = 300k slab tax
        let result = tax(2_000_000.0);
        assert!((result.slab_tax - 300_000.0).abs() < 1e-6);
        assert_eq!(result.marginal_rate_pct, 30.0);
        assert_eq!(result.breakdown.last().unwrap().upper, None);
    }

    #[test]
    fn test_zero_income() {
        let result = tax(0.0);
        assert_eq!(result.total_tax, 0.0);
        assert_eq!(result.effective_rate_pct, 0.0);
    }

    #[test]
    fn test_negative_income_rejected() {
        assert!(income_tax_india_new_regime(&IncomeTaxInput {
            taxable_income: -1.0
        })
        .is_err());
    }

    #[test]
    fn test_gst_add() {
        let result = gst(&GstInput {
            amount: 1000.0,
            rate_pct: 18.0,
            mode: GstMode::Add,
        })
        .unwrap();
        assert_eq!(
            result,
            GstResult {
                net: 1000.0,
                gst: 180.0,
                gross: 1180.0
            }
        );
    }

    #[test]
    fn test_gst_remove_round_trip() {
        let result = gst(&GstInput {
            amount: 1180.0,
            rate_pct: 18.0,
            mode: GstMode::Remove,
        })
        .unwrap();
        assert!((result.net - 1000.0).abs() < 1e-9);
        assert!((result.gst - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_gst_mode_serialization() {
        let json = serde_json::to_string(&GstMode::Remove).unwrap();
        assert_eq!(json, "\"remove\"");
    }
}
