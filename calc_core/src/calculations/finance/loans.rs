//! # Loan Calculations
//!
//! EMI (equated monthly installment), the month-by-month amortization
//! schedule behind it, and credit card payoff simulation.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::finance::loans::{loan_emi, LoanEmiInput};
//!
//! let input = LoanEmiInput::new(100_000.0, 0.0, 5.0);
//! let result = loan_emi(&input).unwrap();
//! assert!((result.emi - 100_000.0 / 60.0).abs() < 1e-9);
//! assert!(result.total_interest.abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::validation::{ensure_finite, require_non_negative, require_positive};

/// Hard cap on simulated months for credit card payoff (40 years)
pub const MAX_PAYOFF_MONTHS: u32 = 480;

/// Longest amortization schedule produced, in months (100 years)
pub const MAX_SCHEDULE_MONTHS: u32 = 1200;

/// Monthly rate from an annual percentage (`12% -> 0.01`)
#[inline]
pub fn monthly_rate(annual_rate_pct: f64) -> f64 {
    annual_rate_pct / 1200.0
}

/// Input parameters for an EMI calculation.
///
/// ## JSON Example
///
/// ```json
/// { "principal": 500000.0, "annual_rate_pct": 8.5, "years": 20.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanEmiInput {
    /// Amount borrowed
    pub principal: f64,

    /// Nominal annual interest rate in percent (e.g. 8.5)
    pub annual_rate_pct: f64,

    /// Loan tenure in years (fractional years allowed)
    pub years: f64,
}

impl LoanEmiInput {
    pub fn new(principal: f64, annual_rate_pct: f64, years: f64) -> Self {
        Self {
            principal,
            annual_rate_pct,
            years,
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("principal", self.principal)?;
        require_non_negative("annual_rate_pct", self.annual_rate_pct)?;
        require_positive("years", self.years)?;
        Ok(())
    }

    /// Number of monthly installments
    pub fn months(&self) -> f64 {
        self.years * 12.0
    }
}

/// Results from an EMI calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanEmiResult {
    /// Fixed monthly installment
    pub emi: f64,

    /// Total interest paid over the tenure
    pub total_interest: f64,

    /// Total of all installments (principal + interest)
    pub total_payment: f64,
}

/// EMI for a fully amortizing loan.
///
/// `i = rate/1200`, `n = years*12`,
/// `emi = P*i*(1+i)^n / ((1+i)^n - 1)`, or `P/n` when the rate is zero.
pub fn loan_emi(input: &LoanEmiInput) -> CalcResult<LoanEmiResult> {
    input.validate()?;

    let i = monthly_rate(input.annual_rate_pct);
    let n = input.months();

    let emi = if i == 0.0 {
        input.principal / n
    } else {
        let growth = (1.0 + i).powf(n);
        input.principal * i * growth / (growth - 1.0)
    };
    let emi = ensure_finite("loan_emi", "emi", emi)?;

    let total_payment = ensure_finite("loan_emi", "total_payment", emi * n)?;
    let total_interest = if i == 0.0 {
        0.0
    } else {
        total_payment - input.principal
    };

    Ok(LoanEmiResult {
        emi,
        total_interest,
        total_payment,
    })
}

/// One month of an amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AmortizationRow {
    /// 1-based month number
    pub month: u32,
    pub payment: f64,
    pub principal_paid: f64,
    pub interest_paid: f64,
    /// Outstanding balance after this payment
    pub balance: f64,
}

/// Month-by-month amortization schedule for an EMI loan.
///
/// Tenure is rounded to whole months and may not exceed
/// [`MAX_SCHEDULE_MONTHS`]. The final row absorbs rounding drift so the
/// balance closes at exactly zero.
pub fn loan_amortization_schedule(input: &LoanEmiInput) -> CalcResult<Vec<AmortizationRow>> {
    input.validate()?;

    let months = input.months().round();
    if months < 1.0 {
        return Err(CalcError::invalid_input(
            "years",
            input.years.to_string(),
            "Tenure must be at least one month",
        ));
    }
    if months > MAX_SCHEDULE_MONTHS as f64 {
        return Err(CalcError::invalid_input(
            "years",
            input.years.to_string(),
            format!("Schedule is limited to {} months", MAX_SCHEDULE_MONTHS),
        ));
    }
    let months = months as u32;
    let whole = LoanEmiInput::new(input.principal, input.annual_rate_pct, months as f64 / 12.0);
    let emi = loan_emi(&whole)?.emi;
    let i = monthly_rate(input.annual_rate_pct);

    let mut balance = input.principal;
    let mut rows = Vec::new();
    for month in 1..=months {
        let interest_paid = balance * i;
        let mut principal_paid = emi - interest_paid;
        if month == months {
            principal_paid = balance;
        }
        balance -= principal_paid;
        rows.push(AmortizationRow {
            month,
            payment: principal_paid + interest_paid,
            principal_paid,
            interest_paid,
            balance: balance.max(0.0),
        });
    }
    Ok(rows)
}

/// Input parameters for credit card payoff.
///
/// ## JSON Example
///
/// ```json
/// { "balance": 5000.0, "apr_pct": 18.0, "monthly_payment": 200.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditCardPayoffInput {
    /// Current card balance
    pub balance: f64,

    /// Annual percentage rate in percent
    pub apr_pct: f64,

    /// Fixed payment made every month
    pub monthly_payment: f64,
}

impl CreditCardPayoffInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("balance", self.balance)?;
        require_non_negative("apr_pct", self.apr_pct)?;
        require_positive("monthly_payment", self.monthly_payment)?;
        Ok(())
    }
}

/// Results from credit card payoff simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditCardPayoffResult {
    /// Months until the balance reaches zero
    pub months: u32,

    /// Interest accrued over the payoff period
    pub total_interest: f64,

    /// Sum of all payments (the final payment may be partial)
    pub total_paid: f64,
}

impl CreditCardPayoffResult {
    /// Payoff time as (years, months)
    pub fn years_and_months(&self) -> (u32, u32) {
        (self.months / 12, self.months % 12)
    }
}

/// Simulate paying off a card balance with a fixed monthly payment.
///
/// Each month accrues `balance * apr/1200` interest and then applies the
/// payment. Fails with "payment too low" when the payment does not exceed
/// the first month's interest or the balance is still open after
/// [`MAX_PAYOFF_MONTHS`].
pub fn credit_card_payoff(input: &CreditCardPayoffInput) -> CalcResult<CreditCardPayoffResult> {
    input.validate()?;

    let rate = monthly_rate(input.apr_pct);
    let first_interest = input.balance * rate;
    if input.monthly_payment <= first_interest {
        return Err(CalcError::calculation_failed(
            "credit_card_payoff",
            format!(
                "Payment too low: {:.2} does not cover the first month's interest of {:.2}",
                input.monthly_payment, first_interest
            ),
        ));
    }

    let mut balance = input.balance;
    let mut total_interest = 0.0;
    let mut total_paid = 0.0;
    let mut months = 0;

    while balance > 0.0 {
        if months >= MAX_PAYOFF_MONTHS {
            return Err(CalcError::calculation_failed(
                "credit_card_payoff",
                format!("Payment too low: balance not repaid within {} months", MAX_PAYOFF_MONTHS),
            ));
        }
        months += 1;
        let interest = balance * rate;
        total_interest += interest;
        balance += interest;

        let payment = input.monthly_payment.min(balance);
        total_paid += payment;
        balance -= payment;
    }

    Ok(CreditCardPayoffResult {
        months,
        total_interest: ensure_finite("credit_card_payoff", "total_interest", total_interest)?,
        total_paid: ensure_finite("credit_card_payoff", "total_paid", total_paid)?,
    })
}
