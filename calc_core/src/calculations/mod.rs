//! # Calculators
//!
//! Every calculator follows the same pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable), usually with `validate()`
//! - `*Result` - Calculation results (JSON-serializable)
//! - `fn(&input) -> CalcResult<*Result>` - Pure calculation function
//!
//! [`CalculationItem`] wraps every input so a calculation can be described
//! as JSON (`{"type": "loan-emi", ...}`) and dispatched through
//! [`calculate`].
//!
//! ## Available Calculations
//!
//! - [`finance`] - EMI, SIP, PPF, FD, NPV, ROI, inflation, tax, GST
//! - [`health`] - BMI, BMR/TDEE, body fat, blood pressure, water, steps
//! - [`arithmetic`] - GCD/LCM, modulo, logarithms, percentages, ratios, Ohm's law
//! - [`fraction`] - Fraction arithmetic and mixed numbers
//! - [`base_conversion`] - Binary/decimal/hex
//! - [`matrix`] - Matrix add/subtract/multiply/transpose
//! - [`conversion`] - Units and currencies
//! - [`generators`] - Passwords, password strength, random integers
//! - [`chemistry`] - Molar mass

pub mod arithmetic;
pub mod base_conversion;
pub mod chemistry;
pub mod conversion;
pub mod finance;
pub mod fraction;
pub mod generators;
pub mod health;
pub mod matrix;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::CalcResult;
use crate::expression::{self, ExpressionInput, GraphInput, GraphPoint};
use crate::formulas::Formula;
use crate::random::secure_rng;

use arithmetic::{
    GcdLcmInput, GcdLcmResult, LogarithmInput, LogarithmResult, ModuloInput, ModuloResult,
    OhmsLawInput, OhmsLawResult, PercentageInput, PercentageResult, Proportion, ProportionInput,
};
use base_conversion::{BaseConversionInput, BaseConversionResult};
use chemistry::{MolarMassInput, MolarMassResult};
use conversion::{CurrencyConversionInput, CurrencyConversionResult, UnitConversionInput};
use finance::{
    AmortizationRow, CreditCardPayoffInput, CreditCardPayoffResult, FixedDepositInput,
    FixedDepositResult, GstInput, GstResult, IncomeTaxInput, IncomeTaxResult, InflationInput,
    InflationResult, LoanEmiInput, LoanEmiResult, NpvInput, NpvResult, PpfInput, PpfResult,
    RoiInput, RoiResult, SipInput, SipResult,
};
use fraction::{FractionInput, FractionResult};
use generators::{PasswordOptions, PasswordStrength, PasswordStrengthInput, RandomIntegersInput};
use health::{
    BloodPressureCategory, BloodPressureInput, BmiInput, BmiResult, BmrInput, BodyFatInput,
    StepsInput, StepsResult, TdeeInput, WaterIntakeInput,
};
use matrix::{Matrix, MatrixInput};

/// Enum wrapper for all calculation types.
///
/// The `type` tag matches the calculator's [`Formula`] id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CalculationItem {
    // Finance
    LoanEmi(LoanEmiInput),
    LoanAmortization(LoanEmiInput),
    CreditCardPayoff(CreditCardPayoffInput),
    Sip(SipInput),
    Ppf(PpfInput),
    FixedDeposit(FixedDepositInput),
    Npv(NpvInput),
    Roi(RoiInput),
    Inflation(InflationInput),
    IncomeTax(IncomeTaxInput),
    Gst(GstInput),
    // Health
    Bmi(BmiInput),
    Bmr(BmrInput),
    Tdee(TdeeInput),
    BodyFat(BodyFatInput),
    BloodPressure(BloodPressureInput),
    WaterIntake(WaterIntakeInput),
    StepsToCalories(StepsInput),
    // Math
    GcdLcm(GcdLcmInput),
    Fraction(FractionInput),
    BaseConversion(BaseConversionInput),
    Matrix(MatrixInput),
    Percentage(PercentageInput),
    Proportion(ProportionInput),
    Modulo(ModuloInput),
    Logarithm(LogarithmInput),
    OhmsLaw(OhmsLawInput),
    Expression(ExpressionInput),
    Graph(GraphInput),
    UnitConversion(UnitConversionInput),
    CurrencyConversion(CurrencyConversionInput),
    // Generators
    Password(PasswordOptions),
    PasswordStrength(PasswordStrengthInput),
    RandomIntegers(RandomIntegersInput),
    MolarMass(MolarMassInput),
}

/// Result of dispatching a [`CalculationItem`], tagged the same way.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "result", rename_all = "kebab-case")]
pub enum CalculationOutput {
    LoanEmi(LoanEmiResult),
    LoanAmortization(Vec<AmortizationRow>),
    CreditCardPayoff(CreditCardPayoffResult),
    Sip(SipResult),
    Ppf(PpfResult),
    FixedDeposit(FixedDepositResult),
    Npv(NpvResult),
    Roi(RoiResult),
    Inflation(InflationResult),
    IncomeTax(IncomeTaxResult),
    Gst(GstResult),
    Bmi(BmiResult),
    /// kcal/day
    Bmr(f64),
    /// kcal/day
    Tdee(f64),
    /// Percent
    BodyFat(f64),
    BloodPressure(BloodPressureCategory),
    /// Liters/day
    WaterIntake(f64),
    StepsToCalories(StepsResult),
    GcdLcm(GcdLcmResult),
    Fraction(FractionResult),
    BaseConversion(BaseConversionResult),
    Matrix(Matrix),
    Percentage(PercentageResult),
    Proportion(Proportion),
    Modulo(ModuloResult),
    Logarithm(LogarithmResult),
    OhmsLaw(OhmsLawResult),
    Expression(f64),
    Graph(Vec<GraphPoint>),
    UnitConversion(f64),
    CurrencyConversion(CurrencyConversionResult),
    Password(String),
    PasswordStrength(PasswordStrength),
    RandomIntegers(Vec<i64>),
    MolarMass(MolarMassResult),
}

impl CalculationItem {
    /// The registry entry for this calculator
    pub fn formula(&self) -> Formula {
        match self {
            CalculationItem::LoanEmi(_) => Formula::LoanEmi,
            CalculationItem::LoanAmortization(_) => Formula::LoanAmortization,
            CalculationItem::CreditCardPayoff(_) => Formula::CreditCardPayoff,
            CalculationItem::Sip(_) => Formula::Sip,
            CalculationItem::Ppf(_) => Formula::Ppf,
            CalculationItem::FixedDeposit(_) => Formula::FixedDeposit,
            CalculationItem::Npv(_) => Formula::NetPresentValue,
            CalculationItem::Roi(_) => Formula::ReturnOnInvestment,
            CalculationItem::Inflation(_) => Formula::Inflation,
            CalculationItem::IncomeTax(_) => Formula::IncomeTax,
            CalculationItem::Gst(_) => Formula::Gst,
            CalculationItem::Bmi(_) => Formula::Bmi,
            CalculationItem::Bmr(_) => Formula::Bmr,
            CalculationItem::Tdee(_) => Formula::Tdee,
            CalculationItem::BodyFat(_) => Formula::BodyFat,
            CalculationItem::BloodPressure(_) => Formula::BloodPressure,
            CalculationItem::WaterIntake(_) => Formula::WaterIntake,
            CalculationItem::StepsToCalories(_) => Formula::StepsToCalories,
            CalculationItem::GcdLcm(_) => Formula::GcdLcm,
            CalculationItem::Fraction(_) => Formula::FractionArithmetic,
            CalculationItem::BaseConversion(_) => Formula::BaseConversion,
            CalculationItem::Matrix(_) => Formula::MatrixOperation,
            CalculationItem::Percentage(_) => Formula::Percentage,
            CalculationItem::Proportion(_) => Formula::Proportion,
            CalculationItem::Modulo(_) => Formula::Modulo,
            CalculationItem::Logarithm(_) => Formula::Logarithm,
            CalculationItem::OhmsLaw(_) => Formula::OhmsLaw,
            CalculationItem::Expression(_) => Formula::Expression,
            CalculationItem::Graph(_) => Formula::Graph,
            CalculationItem::UnitConversion(_) => Formula::UnitConversion,
            CalculationItem::CurrencyConversion(_) => Formula::CurrencyConversion,
            CalculationItem::Password(_) => Formula::Password,
            CalculationItem::PasswordStrength(_) => Formula::PasswordStrength,
            CalculationItem::RandomIntegers(_) => Formula::RandomIntegers,
            CalculationItem::MolarMass(_) => Formula::MolarMass,
        }
    }

    /// Get the calculation type as a string (the `type` tag)
    pub fn calc_type(&self) -> &'static str {
        self.formula().id()
    }

    /// Human-readable calculator name
    pub fn label(&self) -> &'static str {
        self.formula().metadata().name
    }
}

/// Run a calculation using OS randomness for the generators.
pub fn calculate(item: &CalculationItem) -> CalcResult<CalculationOutput> {
    calculate_with(item, &mut secure_rng()?)
}

/// Run a calculation with an explicit random source.
pub fn calculate_with(item: &CalculationItem, rng: &mut dyn RngCore) -> CalcResult<CalculationOutput> {
    debug!(calc_type = item.calc_type(), "Running calculation");

    let output = dispatch(item, rng);
    if let Err(e) = &output {
        warn!(calc_type = item.calc_type(), code = e.error_code(), "Calculation failed: {}", e);
    }
    output
}

fn dispatch(item: &CalculationItem, rng: &mut dyn RngCore) -> CalcResult<CalculationOutput> {
    use CalculationItem as I;
    use CalculationOutput as O;

    Ok(match item {
        I::LoanEmi(input) => O::LoanEmi(finance::loan_emi(input)?),
        I::LoanAmortization(input) => O::LoanAmortization(finance::loan_amortization_schedule(input)?),
        I::CreditCardPayoff(input) => O::CreditCardPayoff(finance::credit_card_payoff(input)?),
        I::Sip(input) => O::Sip(finance::sip_future_value(input)?),
        I::Ppf(input) => O::Ppf(finance::ppf_maturity(input)?),
        I::FixedDeposit(input) => O::FixedDeposit(finance::fixed_deposit(input)?),
        I::Npv(input) => O::Npv(finance::net_present_value(input)?),
        I::Roi(input) => O::Roi(finance::return_on_investment(input)?),
        I::Inflation(input) => O::Inflation(finance::inflation_impact(input)?),
        I::IncomeTax(input) => O::IncomeTax(finance::income_tax_india_new_regime(input)?),
        I::Gst(input) => O::Gst(finance::gst(input)?),
        I::Bmi(input) => O::Bmi(health::bmi(input)?),
        I::Bmr(input) => O::Bmr(health::bmr_mifflin_st_jeor(input)?),
        I::Tdee(input) => O::Tdee(health::tdee(input)?),
        I::BodyFat(input) => O::BodyFat(health::body_fat_us_navy(input)?),
        I::BloodPressure(input) => O::BloodPressure(health::blood_pressure_category(input)?),
        I::WaterIntake(input) => O::WaterIntake(health::water_intake_liters(input)?),
        I::StepsToCalories(input) => O::StepsToCalories(health::steps_to_calories(input)?),
        I::GcdLcm(input) => O::GcdLcm(arithmetic::gcd_lcm(input)?),
        I::Fraction(input) => O::Fraction(fraction::fraction_arithmetic(input)?),
        I::BaseConversion(input) => O::BaseConversion(base_conversion::convert_base(input)?),
        I::Matrix(input) => O::Matrix(matrix::matrix_operation(input)?),
        I::Percentage(input) => O::Percentage(arithmetic::percentage(input)?),
        I::Proportion(input) => O::Proportion(arithmetic::proportion(input)?),
        I::Modulo(input) => O::Modulo(arithmetic::modulo(input)?),
        I::Logarithm(input) => O::Logarithm(arithmetic::logarithm(input)?),
        I::OhmsLaw(input) => O::OhmsLaw(arithmetic::ohms_law(input)?),
        I::Expression(input) => O::Expression(expression::evaluate(input)?),
        I::Graph(input) => O::Graph(expression::sample(input)?),
        I::UnitConversion(input) => O::UnitConversion(conversion::convert_units(input)?),
        I::CurrencyConversion(input) => O::CurrencyConversion(conversion::convert_currency(input)?),
        I::Password(options) => O::Password(generators::generate_password(options, rng)?),
        I::PasswordStrength(input) => O::PasswordStrength(generators::password_strength(input)),
        I::RandomIntegers(input) => O::RandomIntegers(generators::random_integers(input, rng)?),
        I::MolarMass(input) => O::MolarMass(chemistry::molar_mass(input)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::testing::{seeded, NeverDraw};

    fn parse(json: &str) -> CalculationItem {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_json_dispatch_loan_emi() {
        let item = parse(r#"{"type":"loan-emi","principal":100000,"annual_rate_pct":0,"years":1}"#);
        assert_eq!(item.calc_type(), "loan-emi");
        match calculate_with(&item, &mut NeverDraw).unwrap() {
            CalculationOutput::LoanEmi(result) => assert!((result.emi - 100000.0 / 12.0).abs() < 1e-9),
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[test]
    fn test_nested_percentage_tag() {
        let item = parse(r#"{"type":"percentage","kind":"percent_of","percent":20,"of":50}"#);
        let output = calculate_with(&item, &mut NeverDraw).unwrap();
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["type"], "percentage");
        assert_eq!(json["result"]["value"], 10.0);
    }

    #[test]
    fn test_scalar_output_serializes_adjacently() {
        let item = parse(r#"{"type":"expression","expression":"2^10"}"#);
        let json = serde_json::to_value(calculate_with(&item, &mut NeverDraw).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({"type": "expression", "result": 1024.0}));
    }

    #[test]
    fn test_type_tag_matches_registry_id() {
        let items = [
            r#"{"type":"npv","initial_investment":100,"discount_rate_pct":10,"cash_flows":[110]}"#,
            r#"{"type":"ohms-law","voltage":12,"current":2}"#,
            r#"{"type":"molar-mass","formula":"NaCl"}"#,
            r#"{"type":"fraction","left":{"numerator":1,"denominator":2},"op":"add","right":{"numerator":1,"denominator":3}}"#,
        ];
        for json in items {
            let item = parse(json);
            let tag = serde_json::to_value(&item).unwrap()["type"].clone();
            assert_eq!(tag, item.calc_type());
            assert!(calculate_with(&item, &mut NeverDraw).is_ok(), "{} failed", json);
        }
    }

    #[test]
    fn test_generators_use_injected_source() {
        let item = parse(r#"{"type":"random-integers","min":1,"max":6,"count":3}"#);
        let first = calculate_with(&item, &mut seeded(42)).unwrap();
        let second = calculate_with(&item, &mut seeded(42)).unwrap();
        match (first, second) {
            (CalculationOutput::RandomIntegers(a), CalculationOutput::RandomIntegers(b)) => assert_eq!(a, b),
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[test]
    fn test_errors_propagate() {
        let item = parse(r#"{"type":"bmi","weight_kg":70,"height_cm":0}"#);
        let err = calculate_with(&item, &mut NeverDraw).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(serde_json::from_str::<CalculationItem>(r#"{"type":"beam","span":10}"#).is_err());
    }
}
