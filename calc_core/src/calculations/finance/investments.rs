//! # Investment Calculations
//!
//! Growth and discounting formulas: SIP, PPF, fixed deposits, NPV, ROI and
//! inflation impact. All rates are annual percentages.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::validation::{ensure_finite, require_finite_input, require_non_negative, require_positive};

use super::loans::monthly_rate;

/// Days per year used for deposit tenure
pub const DAYS_PER_YEAR: f64 = 365.0;
/// Average days per month used when tenure is given in months
pub const DAYS_PER_MONTH: f64 = 30.4167;

// =============================================================================
// SIP
// =============================================================================

/// Systematic investment plan: fixed monthly contributions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipInput {
    pub monthly_investment: f64,
    pub annual_rate_pct: f64,
    pub years: f64,
}

impl SipInput {
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("monthly_investment", self.monthly_investment)?;
        require_non_negative("annual_rate_pct", self.annual_rate_pct)?;
        require_positive("years", self.years)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipResult {
    /// Sum of all contributions
    pub invested_amount: f64,
    /// Corpus at the end of the tenure
    pub future_value: f64,
    /// future_value - invested_amount
    pub estimated_returns: f64,
}

/// Future value of a SIP: `P*((1+i)^n - 1)/i`, or `P*n` at zero rate.
pub fn sip_future_value(input: &SipInput) -> CalcResult<SipResult> {
    input.validate()?;

    let i = monthly_rate(input.annual_rate_pct);
    let n = input.years * 12.0;
    let p = input.monthly_investment;

    let future_value = if i == 0.0 {
        p * n
    } else {
        p * ((1.0 + i).powf(n) - 1.0) / i
    };
    let future_value = ensure_finite("sip_future_value", "future_value", future_value)?;
    let invested_amount = p * n;

    Ok(SipResult {
        invested_amount,
        future_value,
        estimated_returns: future_value - invested_amount,
    })
}

// =============================================================================
// PPF
// =============================================================================

/// Public provident fund: one deposit at the start of every year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PpfInput {
    pub yearly_deposit: f64,
    pub annual_rate_pct: f64,
    pub years: u32,
}

impl PpfInput {
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("yearly_deposit", self.yearly_deposit)?;
        require_non_negative("annual_rate_pct", self.annual_rate_pct)?;
        if self.years == 0 {
            return Err(CalcError::invalid_input("years", "0", "Must be at least one year"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PpfResult {
    pub total_invested: f64,
    pub maturity_value: f64,
    pub total_interest: f64,
}

/// Maturity value with annual compounding and deposits at the start of
/// each year: `D*((1+r)^n - 1)/r*(1+r)`.
pub fn ppf_maturity(input: &PpfInput) -> CalcResult<PpfResult> {
    input.validate()?;

    let r = input.annual_rate_pct / 100.0;
    let n = input.years as f64;
    let d = input.yearly_deposit;

    let maturity_value = if r == 0.0 {
        d * n
    } else {
        d * ((1.0 + r).powf(n) - 1.0) / r * (1.0 + r)
    };
    let maturity_value = ensure_finite("ppf_maturity", "maturity_value", maturity_value)?;
    let total_invested = d * n;

    Ok(PpfResult {
        total_invested,
        maturity_value,
        total_interest: maturity_value - total_invested,
    })
}

// =============================================================================
// Fixed Deposit
// =============================================================================

/// How often FD interest is compounded.
///
/// In JSON this is the number of periods per year: `1`, `2`, `4` or `12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum CompoundingFrequency {
    Annually,
    SemiAnnually,
    Quarterly,
    Monthly,
}

impl CompoundingFrequency {
    /// Compounding periods per year (1, 2, 4 or 12)
    pub fn periods_per_year(&self) -> f64 {
        match self {
            CompoundingFrequency::Annually => 1.0,
            CompoundingFrequency::SemiAnnually => 2.0,
            CompoundingFrequency::Quarterly => 4.0,
            CompoundingFrequency::Monthly => 12.0,
        }
    }

    /// Parse a period count into a frequency
    pub fn from_periods(periods: u32) -> CalcResult<Self> {
        match periods {
            1 => Ok(CompoundingFrequency::Annually),
            2 => Ok(CompoundingFrequency::SemiAnnually),
            4 => Ok(CompoundingFrequency::Quarterly),
            12 => Ok(CompoundingFrequency::Monthly),
            other => Err(CalcError::invalid_input(
                "compounding",
                other.to_string(),
                "Compounding periods per year must be 1, 2, 4 or 12",
            )),
        }
    }
}

impl TryFrom<u32> for CompoundingFrequency {
    type Error = CalcError;

    fn try_from(periods: u32) -> CalcResult<Self> {
        Self::from_periods(periods)
    }
}

impl From<CompoundingFrequency> for u32 {
    fn from(frequency: CompoundingFrequency) -> Self {
        frequency.periods_per_year() as u32
    }
}

/// Deposit tenure as years + months + days.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Tenure {
    #[serde(default)]
    pub years: u32,
    #[serde(default)]
    pub months: u32,
    #[serde(default)]
    pub days: u32,
}

impl Tenure {
    pub fn days(days: u32) -> Self {
        Self {
            years: 0,
            months: 0,
            days,
        }
    }

    /// Total tenure in days (months approximated as 30.4167 days)
    pub fn total_days(&self) -> f64 {
        self.years as f64 * DAYS_PER_YEAR + self.months as f64 * DAYS_PER_MONTH + self.days as f64
    }

    /// Tenure in fractional years
    pub fn in_years(&self) -> f64 {
        self.total_days() / DAYS_PER_YEAR
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedDepositInput {
    pub principal: f64,
    pub annual_rate_pct: f64,
    pub tenure: Tenure,
    pub compounding: CompoundingFrequency,
}

impl FixedDepositInput {
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("principal", self.principal)?;
        require_non_negative("annual_rate_pct", self.annual_rate_pct)?;
        if self.tenure.total_days() <= 0.0 {
            return Err(CalcError::invalid_input(
                "tenure",
                "0 days",
                "Tenure must be positive",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedDepositResult {
    pub maturity_amount: f64,
    pub interest_earned: f64,
    /// Tenure used in the formula, in years
    pub tenure_years: f64,
}

/// FD maturity: `A = P*(1 + r/n)^(n*t)`.
pub fn fixed_deposit(input: &FixedDepositInput) -> CalcResult<FixedDepositResult> {
    input.validate()?;

    let r = input.annual_rate_pct / 100.0;
    let n = input.compounding.periods_per_year();
    let t = input.tenure.in_years();

    let maturity_amount = input.principal * (1.0 + r / n).powf(n * t);
    let maturity_amount = ensure_finite("fixed_deposit", "maturity_amount", maturity_amount)?;

    Ok(FixedDepositResult {
        maturity_amount,
        interest_earned: maturity_amount - input.principal,
        tenure_years: t,
    })
}

// =============================================================================
// NPV
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpvInput {
    /// Outflow at t = 0 (entered as a positive amount)
    pub initial_investment: f64,
    pub discount_rate_pct: f64,
    /// Cash flows for periods 1..N, in order; may be negative
    pub cash_flows: Vec<f64>,
}

impl NpvInput {
    pub fn validate(&self) -> CalcResult<()> {
        require_non_negative("initial_investment", self.initial_investment)?;
        require_non_negative("discount_rate_pct", self.discount_rate_pct)?;
        if self.cash_flows.is_empty() {
            return Err(CalcError::missing_field("cash_flows"));
        }
        for (idx, cf) in self.cash_flows.iter().enumerate() {
            require_finite_input(&format!("cash_flows[{}]", idx), *cf)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpvResult {
    pub npv: f64,
    /// Sum of discounted cash flows, before subtracting the investment
    pub present_value_of_inflows: f64,
    /// Present value of each period's cash flow
    pub discounted_cash_flows: Vec<f64>,
}

impl NpvResult {
    /// Positive NPV means the investment clears the discount rate
    pub fn is_profitable(&self) -> bool {
        self.npv > 0.0
    }
}

/// `NPV = -C0 + Σ CFt/(1+r)^t` for t = 1..N.
pub fn net_present_value(input: &NpvInput) -> CalcResult<NpvResult> {
    input.validate()?;

    let r = input.discount_rate_pct / 100.0;
    let discounted_cash_flows: Vec<f64> = input
        .cash_flows
        .iter()
        .enumerate()
        .map(|(idx, cf)| cf / (1.0 + r).powi(idx as i32 + 1))
        .collect();
    let present_value_of_inflows: f64 = discounted_cash_flows.iter().sum();
    let npv = ensure_finite(
        "net_present_value",
        "npv",
        present_value_of_inflows - input.initial_investment,
    )?;

    Ok(NpvResult {
        npv,
        present_value_of_inflows,
        discounted_cash_flows,
    })
}

// =============================================================================
// ROI
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiInput {
    pub initial_value: f64,
    pub final_value: f64,
    /// Holding period; enables the annualized figure when present
    #[serde(default)]
    pub years: Option<f64>,
}

impl RoiInput {
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("initial_value", self.initial_value)?;
        require_non_negative("final_value", self.final_value)?;
        if let Some(years) = self.years {
            require_positive("years", years)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiResult {
    pub gain: f64,
    pub roi_pct: f64,
    /// Compound annual growth rate, if a holding period was given
    pub annualized_roi_pct: Option<f64>,
}

/// `roi = (final - initial)/initial*100`, annualized as
/// `((final/initial)^(1/years) - 1)*100`.
pub fn return_on_investment(input: &RoiInput) -> CalcResult<RoiResult> {
    input.validate()?;

    let gain = input.final_value - input.initial_value;
    let roi_pct = ensure_finite("return_on_investment", "roi_pct", gain / input.initial_value * 100.0)?;
    let annualized_roi_pct = match input.years {
        Some(years) => {
            let cagr = ((input.final_value / input.initial_value).powf(1.0 / years) - 1.0) * 100.0;
            Some(ensure_finite("return_on_investment", "annualized_roi_pct", cagr)?)
        }
        None => None,
    };

    Ok(RoiResult {
        gain,
        roi_pct,
        annualized_roi_pct,
    })
}

// =============================================================================
// Inflation
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InflationInput {
    pub amount: f64,
    pub annual_rate_pct: f64,
    pub years: f64,
}

impl InflationInput {
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("amount", self.amount)?;
        require_non_negative("annual_rate_pct", self.annual_rate_pct)?;
        require_positive("years", self.years)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InflationResult {
    /// What today's amount will cost after `years`
    pub future_cost: f64,
    /// What today's amount will be worth in today's money after `years`
    pub purchasing_power: f64,
    /// Cumulative price increase in percent
    pub cumulative_inflation_pct: f64,
}

/// Future cost `A*(1+r)^y` and purchasing power `A/(1+r)^y`.
pub fn inflation_impact(input: &InflationInput) -> CalcResult<InflationResult> {
    input.validate()?;

    let factor = (1.0 + input.annual_rate_pct / 100.0).powf(input.years);
    let factor = ensure_finite("inflation_impact", "growth_factor", factor)?;

    Ok(InflationResult {
        future_cost: ensure_finite("inflation_impact", "future_cost", input.amount * factor)?,
        purchasing_power: input.amount / factor,
        cumulative_inflation_pct: (factor - 1.0) * 100.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sip_zero_rate() {
        let input = SipInput {
            monthly_investment: 1000.0,
            annual_rate_pct: 0.0,
            years: 2.0,
        };
        let result = sip_future_value(&input).unwrap();
        assert_eq!(result.future_value, 24_000.0);
        assert_eq!(result.estimated_returns, 0.0);
    }

    #[test]
    fn test_sip_with_returns() {
        // 5000/month at 12% for 10 years: P*((1.01)^120 - 1)/0.01 ≈ 1,150,193.4
        let input = SipInput {
            monthly_investment: 5000.0,
            annual_rate_pct: 12.0,
            years: 10.0,
        };
        let result = sip_future_value(&input).unwrap();
        assert!((result.future_value - 1_150_193.4).abs() < 1.0);
        assert_eq!(result.invested_amount, 600_000.0);
    }

    #[test]
    fn test_ppf_single_year() {
        // One deposit of 1000 at 10% compounds once: 1100
        let input = PpfInput {
            yearly_deposit: 1000.0,
            annual_rate_pct: 10.0,
            years: 1,
        };
        let result = ppf_maturity(&input).unwrap();
        assert!((result.maturity_value - 1100.0).abs() < 1e-9);
    }

    #[test]
    fn test_ppf_rejects_zero_years() {
        let input = PpfInput {
            yearly_deposit: 1000.0,
            annual_rate_pct: 7.1,
            years: 0,
        };
        assert!(ppf_maturity(&input).is_err());
    }

    #[test]
    fn test_fixed_deposit_annual() {
        let input = FixedDepositInput {
            principal: 10_000.0,
            annual_rate_pct: 10.0,
            tenure: Tenure {
                years: 2,
                months: 0,
                days: 0,
            },
            compounding: CompoundingFrequency::Annually,
        };
        let result = fixed_deposit(&input).unwrap();
        assert!((result.maturity_amount - 12_100.0).abs() < 1e-6);
        assert!((result.interest_earned - 2_100.0).abs() < 1e-6);
    }

    #[test]
    fn test_fixed_deposit_days_tenure() {
        let input = FixedDepositInput {
            principal: 10_000.0,
            annual_rate_pct: 8.0,
            tenure: Tenure::days(365),
            compounding: CompoundingFrequency::Quarterly,
        };
        let result = fixed_deposit(&input).unwrap();
        // (1.02)^4 = 1.08243216
        assert!((result.maturity_amount - 10_824.3216).abs() < 1e-3);
    }

    #[test]
    fn test_fixed_deposit_month_approximation() {
        let tenure = Tenure {
            years: 0,
            months: 6,
            days: 0,
        };
        assert!((tenure.total_days() - 182.5002).abs() < 1e-9);
    }

    #[test]
    fn test_fixed_deposit_rejects_empty_tenure() {
        let input = FixedDepositInput {
            principal: 10_000.0,
            annual_rate_pct: 8.0,
            tenure: Tenure::default(),
            compounding: CompoundingFrequency::Monthly,
        };
        assert!(fixed_deposit(&input).is_err());
    }

    #[test]
    fn test_compounding_from_periods() {
        assert_eq!(
            CompoundingFrequency::from_periods(4).unwrap(),
            CompoundingFrequency::Quarterly
        );
        assert!(CompoundingFrequency::from_periods(3).is_err());
    }

    #[test]
    fn test_compounding_json_is_period_count() {
        let input: FixedDepositInput = serde_json::from_str(
            r#"{"principal":1000,"annual_rate_pct":8,"tenure":{"years":1},"compounding":4}"#,
        )
        .unwrap();
        assert_eq!(input.compounding, CompoundingFrequency::Quarterly);
        assert_eq!(serde_json::to_value(input.compounding).unwrap(), serde_json::json!(4));

        let bad = serde_json::from_str::<FixedDepositInput>(
            r#"{"principal":1000,"annual_rate_pct":8,"tenure":{"years":1},"compounding":3}"#,
        );
        assert!(bad.unwrap_err().to_string().contains("1, 2, 4 or 12"));
        assert!(serde_json::from_str::<CompoundingFrequency>(r#""Quarterly""#).is_err());
    }

    #[test]
    fn test_npv() {
        // -1000 + 500/1.1 + 600/1.21 = -1000 + 454.545 + 495.868 = -49.587
        let input = NpvInput {
            initial_investment: 1000.0,
            discount_rate_pct: 10.0,
            cash_flows: vec![500.0, 600.0],
        };
        let result = net_present_value(&input).unwrap();
        assert!((result.npv - (-49.587)).abs() < 1e-3);
        assert!(!result.is_profitable());
        assert_eq!(result.discounted_cash_flows.len(), 2);
    }

    #[test]
    fn test_npv_requires_cash_flows() {
        let input = NpvInput {
            initial_investment: 1000.0,
            discount_rate_pct: 10.0,
            cash_flows: vec![],
        };
        let err = net_present_value(&input).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_FIELD");
    }

    #[test]
    fn test_roi() {
        let input = RoiInput {
            initial_value: 1000.0,
            final_value: 1210.0,
            years: Some(2.0),
        };
        let result = return_on_investment(&input).unwrap();
        assert!((result.roi_pct - 21.0).abs() < 1e-9);
        assert!((result.annualized_roi_pct.unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_inflation() {
        let input = InflationInput {
            amount: 100.0,
            annual_rate_pct: 10.0,
            years: 2.0,
        };
        let result = inflation_impact(&input).unwrap();
        assert!((result.future_cost - 121.0).abs() < 1e-9);
        assert!((result.purchasing_power - 100.0 / 1.21).abs() < 1e-9);
        assert!((result.cumulative_inflation_pct - 21.0).abs() < 1e-9);
    }
}
