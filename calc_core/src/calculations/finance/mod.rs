//! # Financial Calculations
//!
//! Pure functions over validated non-negative amounts and annual rates.
//! Every function rejects negative principal/rate/amount inputs and
//! NaN/Infinity results with a [`CalcError`](crate::errors::CalcError).
//!
//! - [`loans`] - EMI, amortization schedule, credit card payoff
//! - [`investments`] - SIP, PPF, fixed deposit, NPV, ROI, inflation
//! - [`tax`] - Indian income tax (new regime), GST

pub mod investments;
pub mod loans;
pub mod tax;

pub use investments::{
    fixed_deposit, inflation_impact, net_present_value, ppf_maturity, return_on_investment,
    sip_future_value, CompoundingFrequency, FixedDepositInput, FixedDepositResult, InflationInput,
    InflationResult, NpvInput, NpvResult, PpfInput, PpfResult, RoiInput, RoiResult, SipInput,
    SipResult, Tenure,
};
pub use loans::{
    credit_card_payoff, loan_amortization_schedule, loan_emi, AmortizationRow,
    CreditCardPayoffInput, CreditCardPayoffResult, LoanEmiInput, LoanEmiResult,
};
pub use tax::{
    gst, income_tax_india_new_regime, GstInput, GstMode, GstResult, IncomeTaxInput,
    IncomeTaxResult, SlabTax,
};
