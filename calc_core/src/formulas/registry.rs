//! # Formula Registry
//!
//! Central registry of every calculator in the catalog. Each formula has
//! metadata: a stable id, the formula text, variable definitions, the
//! assumptions baked into it and the function that implements it.
//!
//! The registry drives three things:
//! - `calc_cli list` and the generated FORMULAS.md reference
//! - Mapping an AI suggestion back to a real calculator
//! - [`CalculationItem::formula`](crate::calculations::CalculationItem::formula)
//!
//! ## Usage
//!
//! ```rust
//! use calc_core::formulas::registry::{Formula, FormulaCategory};
//!
//! let emi = Formula::from_id("loan-emi").unwrap();
//! assert_eq!(emi.metadata().category, FormulaCategory::Finance);
//! println!("Formula: {}", emi.metadata().formula_plain);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Formula Categories
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormulaCategory {
    /// Loans, investments, tax
    Finance,
    /// Body metrics and vital signs
    Health,
    /// Arithmetic, algebra, conversions, expressions
    Math,
    /// Randomness, validators, chemistry
    Generators,
}

impl FormulaCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            FormulaCategory::Finance => "Finance",
            FormulaCategory::Health => "Health",
            FormulaCategory::Math => "Math",
            FormulaCategory::Generators => "Generators & Validators",
        }
    }

    /// Sort order for listings (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            FormulaCategory::Finance => 1,
            FormulaCategory::Health => 2,
            FormulaCategory::Math => 3,
            FormulaCategory::Generators => 4,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in a formula.
#[derive(Debug, Clone, Serialize)]
pub struct Variable {
    /// Symbol (e.g., "P", "r", "n")
    pub symbol: &'static str,
    pub description: &'static str,
    /// Units, or "-" for dimensionless
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Formula Metadata
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct FormulaMetadata {
    /// Stable kebab-case id used on the command line and in suggestions
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Plain-text formula for listings and markdown
    pub formula_plain: &'static str,
    /// Published source, when the formula has one
    pub reference: Option<&'static str>,
    pub variables: Vec<Variable>,
    pub assumptions: Vec<&'static str>,
    pub category: FormulaCategory,
    /// Source module where the formula implementation lives
    pub source_module: &'static str,
    pub source_function: &'static str,
}

// ============================================================================
// Formula Enum
// ============================================================================

/// Every calculator in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Formula {
    // -------------------------------------------------------------------------
    // Finance
    // -------------------------------------------------------------------------
    LoanEmi,
    LoanAmortization,
    CreditCardPayoff,
    Sip,
    Ppf,
    FixedDeposit,
    NetPresentValue,
    ReturnOnInvestment,
    Inflation,
    IncomeTax,
    Gst,

    // -------------------------------------------------------------------------
    // Health
    // -------------------------------------------------------------------------
    Bmi,
    Bmr,
    Tdee,
    BodyFat,
    BloodPressure,
    WaterIntake,
    StepsToCalories,

    // -------------------------------------------------------------------------
    // Math
    // -------------------------------------------------------------------------
    GcdLcm,
    FractionArithmetic,
    BaseConversion,
    MatrixOperation,
    Percentage,
    Proportion,
    Modulo,
    Logarithm,
    OhmsLaw,
    Expression,
    Graph,
    UnitConversion,
    CurrencyConversion,

    // -------------------------------------------------------------------------
    // Generators & validators
    // -------------------------------------------------------------------------
    Password,
    PasswordStrength,
    RandomIntegers,
    MolarMass,
}

impl Formula {
    /// Get the full metadata for this formula
    pub fn metadata(&self) -> FormulaMetadata {
        match self {
            // Finance
            Formula::LoanEmi => FormulaMetadata {
                id: "loan-emi",
                name: "Loan EMI",
                description: "Fixed monthly installment that fully amortizes a loan",
                formula_plain: "EMI = P*i*(1+i)^n / ((1+i)^n - 1), i = rate/1200, n = years*12; EMI = P/n when i = 0",
                reference: None,
                variables: vec![
                    Variable::new("P", "Principal", "currency"),
                    Variable::new("i", "Monthly interest rate", "-"),
                    Variable::new("n", "Number of monthly installments", "months"),
                ],
                assumptions: vec!["Fixed rate for the whole tenure", "Payments at the end of each month"],
                category: FormulaCategory::Finance,
                source_module: "calculations/finance/loans.rs",
                source_function: "loan_emi",
            },

            Formula::LoanAmortization => FormulaMetadata {
                id: "loan-amortization",
                name: "Loan Amortization Schedule",
                description: "Month-by-month split of each EMI into interest and principal",
                formula_plain: "interest_k = balance_(k-1)*i, principal_k = EMI - interest_k, balance_k = balance_(k-1) - principal_k",
                reference: None,
                variables: vec![
                    Variable::new("EMI", "Monthly installment", "currency"),
                    Variable::new("i", "Monthly interest rate", "-"),
                    Variable::new("balance", "Outstanding principal", "currency"),
                ],
                assumptions: vec!["Final installment absorbs rounding so the balance closes at zero"],
                category: FormulaCategory::Finance,
                source_module: "calculations/finance/loans.rs",
                source_function: "loan_amortization_schedule",
            },

            Formula::CreditCardPayoff => FormulaMetadata {
                id: "credit-card-payoff",
                name: "Credit Card Payoff",
                description: "Months and total interest to clear a balance with a fixed payment",
                formula_plain: "balance_k = balance_(k-1)*(1 + APR/1200) - payment, iterated until balance <= 0",
                reference: None,
                variables: vec![
                    Variable::new("balance", "Outstanding balance", "currency"),
                    Variable::new("APR", "Annual percentage rate", "%"),
                    Variable::new("payment", "Fixed monthly payment", "currency"),
                ],
                assumptions: vec![
                    "Interest compounds monthly",
                    "No new charges",
                    "Fails when the payment never clears the balance within 480 months",
                ],
                category: FormulaCategory::Finance,
                source_module: "calculations/finance/loans.rs",
                source_function: "credit_card_payoff",
            },

            Formula::Sip => FormulaMetadata {
                id: "sip",
                name: "SIP Future Value",
                description: "Future value of fixed monthly contributions",
                formula_plain: "FV = P*((1+i)^n - 1)/i; FV = P*n when i = 0",
                reference: None,
                variables: vec![
                    Variable::new("P", "Monthly investment", "currency"),
                    Variable::new("i", "Monthly rate (annual/1200)", "-"),
                    Variable::new("n", "Number of contributions", "months"),
                ],
                assumptions: vec!["Constant return rate", "Contributions at the end of each month"],
                category: FormulaCategory::Finance,
                source_module: "calculations/finance/investments.rs",
                source_function: "sip_future_value",
            },

            Formula::Ppf => FormulaMetadata {
                id: "ppf",
                name: "PPF Maturity",
                description: "Maturity value of a yearly deposit compounded annually",
                formula_plain: "M = D*((1+r)^n - 1)/r*(1+r); M = D*n when r = 0",
                reference: None,
                variables: vec![
                    Variable::new("D", "Yearly deposit", "currency"),
                    Variable::new("r", "Annual rate", "-"),
                    Variable::new("n", "Years", "years"),
                ],
                assumptions: vec!["Deposit at the start of each year", "Rate fixed for the whole term"],
                category: FormulaCategory::Finance,
                source_module: "calculations/finance/investments.rs",
                source_function: "ppf_maturity",
            },

            Formula::FixedDeposit => FormulaMetadata {
                id: "fixed-deposit",
                name: "Fixed Deposit Maturity",
                description: "Compound interest on a lump sum over a tenure in days",
                formula_plain: "A = P*(1 + r/n)^(n*t), t = days/365",
                reference: None,
                variables: vec![
                    Variable::new("P", "Principal", "currency"),
                    Variable::new("r", "Annual rate", "-"),
                    Variable::new("n", "Compounding periods per year (1, 2, 4, 12)", "-"),
                    Variable::new("t", "Tenure", "years"),
                ],
                assumptions: vec!["365 days per year", "30.4167 days per month when tenure is given in months"],
                category: FormulaCategory::Finance,
                source_module: "calculations/finance/investments.rs",
                source_function: "fixed_deposit",
            },

            Formula::NetPresentValue => FormulaMetadata {
                id: "npv",
                name: "Net Present Value",
                description: "Discounted sum of future cash flows minus the initial investment",
                formula_plain: "NPV = -C0 + sum(CF_t / (1+r)^t), t = 1..N",
                reference: None,
                variables: vec![
                    Variable::new("C0", "Initial investment", "currency"),
                    Variable::new("CF_t", "Cash flow at the end of period t", "currency"),
                    Variable::new("r", "Discount rate per period", "-"),
                ],
                assumptions: vec!["Evenly spaced periods"],
                category: FormulaCategory::Finance,
                source_module: "calculations/finance/investments.rs",
                source_function: "net_present_value",
            },

            Formula::ReturnOnInvestment => FormulaMetadata {
                id: "roi",
                name: "Return on Investment",
                description: "Total and annualized return between two values",
                formula_plain: "ROI = (final - initial)/initial*100; annualized = ((final/initial)^(1/years) - 1)*100",
                reference: None,
                variables: vec![
                    Variable::new("initial", "Amount invested", "currency"),
                    Variable::new("final", "Current value", "currency"),
                    Variable::new("years", "Holding period (optional)", "years"),
                ],
                assumptions: vec![],
                category: FormulaCategory::Finance,
                source_module: "calculations/finance/investments.rs",
                source_function: "return_on_investment",
            },

            Formula::Inflation => FormulaMetadata {
                id: "inflation",
                name: "Inflation Impact",
                description: "Future cost of today's amount and its eroded purchasing power",
                formula_plain: "future_cost = A*(1+r)^y, purchasing_power = A/(1+r)^y",
                reference: None,
                variables: vec![
                    Variable::new("A", "Amount today", "currency"),
                    Variable::new("r", "Annual inflation rate", "-"),
                    Variable::new("y", "Years", "years"),
                ],
                assumptions: vec!["Constant inflation rate"],
                category: FormulaCategory::Finance,
                source_module: "calculations/finance/investments.rs",
                source_function: "inflation_impact",
            },

            Formula::IncomeTax => FormulaMetadata {
                id: "income-tax",
                name: "Income Tax (India, New Regime)",
                description: "Slab tax with the section 87A rebate and 4% health and education cess",
                formula_plain: "tax = sum(slab_amount*slab_rate); tax = 0 when income <= 700000; total = tax*1.04",
                reference: Some("Income Tax Act 1961, section 115BAC slabs (FY 2023-24)"),
                variables: vec![
                    Variable::new("income", "Taxable income", "INR"),
                    Variable::new("slab_rate", "0/5/10/15/20/30 % above 0/3L/6L/9L/12L/15L", "%"),
                ],
                assumptions: vec!["Fixed sample slab table", "No surcharge", "No marginal relief above the rebate limit"],
                category: FormulaCategory::Finance,
                source_module: "calculations/finance/tax.rs",
                source_function: "income_tax_india_new_regime",
            },

            Formula::Gst => FormulaMetadata {
                id: "gst",
                name: "GST Add/Remove",
                description: "Add GST to a net amount or extract it from a gross amount",
                formula_plain: "add: gst = net*rate/100, gross = net + gst; remove: net = gross*100/(100+rate)",
                reference: None,
                variables: vec![
                    Variable::new("amount", "Net or gross amount", "currency"),
                    Variable::new("rate", "GST rate", "%"),
                ],
                assumptions: vec![],
                category: FormulaCategory::Finance,
                source_module: "calculations/finance/tax.rs",
                source_function: "gst",
            },

            // Health
            Formula::Bmi => FormulaMetadata {
                id: "bmi",
                name: "Body Mass Index",
                description: "Weight relative to height squared, with WHO category",
                formula_plain: "BMI = kg / m^2",
                reference: Some("WHO adult BMI classification"),
                variables: vec![
                    Variable::new("kg", "Body weight", "kg"),
                    Variable::new("m", "Height", "m"),
                ],
                assumptions: vec!["Adults only", "Does not distinguish muscle from fat"],
                category: FormulaCategory::Health,
                source_module: "calculations/health.rs",
                source_function: "bmi",
            },

            Formula::Bmr => FormulaMetadata {
                id: "bmr",
                name: "Basal Metabolic Rate",
                description: "Resting energy expenditure",
                formula_plain: "BMR = 10*w + 6.25*h - 5*a + 5 (male) or - 161 (female)",
                reference: Some("Mifflin-St Jeor equation (1990)"),
                variables: vec![
                    Variable::new("w", "Weight", "kg"),
                    Variable::new("h", "Height", "cm"),
                    Variable::new("a", "Age", "years"),
                ],
                assumptions: vec![],
                category: FormulaCategory::Health,
                source_module: "calculations/health.rs",
                source_function: "bmr_mifflin_st_jeor",
            },

            Formula::Tdee => FormulaMetadata {
                id: "tdee",
                name: "Total Daily Energy Expenditure",
                description: "BMR scaled by an activity multiplier",
                formula_plain: "TDEE = BMR * factor, factor in {1.2, 1.375, 1.55, 1.725, 1.9}",
                reference: None,
                variables: vec![
                    Variable::new("BMR", "Basal metabolic rate", "kcal/day"),
                    Variable::new("factor", "Activity multiplier", "-"),
                ],
                assumptions: vec![],
                category: FormulaCategory::Health,
                source_module: "calculations/health.rs",
                source_function: "tdee",
            },

            Formula::BodyFat => FormulaMetadata {
                id: "body-fat",
                name: "Body Fat (US Navy)",
                description: "Body fat percentage from circumference measurements",
                formula_plain: "male: 495/(1.0324 - 0.19077*log10(waist-neck) + 0.15456*log10(h)) - 450; \
                                female: 495/(1.29579 - 0.35004*log10(waist+hip-neck) + 0.22100*log10(h)) - 450",
                reference: Some("U.S. Navy circumference method (Hodgdon and Beckett, 1984)"),
                variables: vec![
                    Variable::new("h", "Height", "cm"),
                    Variable::new("neck", "Neck circumference", "cm"),
                    Variable::new("waist", "Waist circumference", "cm"),
                    Variable::new("hip", "Hip circumference (female only)", "cm"),
                ],
                assumptions: vec!["Results outside (0, 100] % are rejected"],
                category: FormulaCategory::Health,
                source_module: "calculations/health.rs",
                source_function: "body_fat_us_navy",
            },

            Formula::BloodPressure => FormulaMetadata {
                id: "blood-pressure",
                name: "Blood Pressure Category",
                description: "Classify a systolic/diastolic reading",
                formula_plain: "crisis: >180 or >120; stage 2: >=140 or >=90; stage 1: >=130 or >=80; elevated: >=120; else normal",
                reference: Some("ACC/AHA 2017 hypertension guideline"),
                variables: vec![
                    Variable::new("SBP", "Systolic pressure", "mmHg"),
                    Variable::new("DBP", "Diastolic pressure", "mmHg"),
                ],
                assumptions: vec!["Bands checked from most to least severe"],
                category: FormulaCategory::Health,
                source_module: "calculations/health.rs",
                source_function: "blood_pressure_category",
            },

            Formula::WaterIntake => FormulaMetadata {
                id: "water-intake",
                name: "Daily Water Intake",
                description: "Recommended daily water intake by weight and activity",
                formula_plain: "liters = w*0.033 + adj, adj in {0, 0.35, 0.7, 1.05, 1.4}",
                reference: None,
                variables: vec![
                    Variable::new("w", "Weight", "kg"),
                    Variable::new("adj", "Activity adjustment", "L"),
                ],
                assumptions: vec!["Temperate climate"],
                category: FormulaCategory::Health,
                source_module: "calculations/health.rs",
                source_function: "water_intake_liters",
            },

            Formula::StepsToCalories => FormulaMetadata {
                id: "steps-to-calories",
                name: "Steps to Calories",
                description: "Distance and energy burned from a step count",
                formula_plain: "stride = h*0.415, km = steps*stride/100000, kcal = km*w*0.78",
                reference: None,
                variables: vec![
                    Variable::new("h", "Height", "cm"),
                    Variable::new("w", "Weight", "kg"),
                    Variable::new("steps", "Step count", "-"),
                ],
                assumptions: vec!["Walking pace on level ground"],
                category: FormulaCategory::Health,
                source_module: "calculations/health.rs",
                source_function: "steps_to_calories",
            },

            // Math
            Formula::GcdLcm => FormulaMetadata {
                id: "gcd-lcm",
                name: "GCD and LCM",
                description: "Greatest common divisor and least common multiple of integers",
                formula_plain: "gcd(a, b) = gcd(b, a mod b); lcm(a, b) = |a*b| / gcd(a, b)",
                reference: Some("Euclid's algorithm"),
                variables: vec![Variable::new("a, b", "Integers", "-")],
                assumptions: vec!["lcm is 0 when either input is 0"],
                category: FormulaCategory::Math,
                source_module: "calculations/arithmetic.rs",
                source_function: "gcd_lcm",
            },

            Formula::FractionArithmetic => FormulaMetadata {
                id: "fraction",
                name: "Fraction Arithmetic",
                description: "Add, subtract, multiply or divide fractions and simplify the result",
                formula_plain: "a/b + c/d = (ad + cb)/bd, reduced by gcd with a positive denominator",
                reference: None,
                variables: vec![
                    Variable::new("a/b", "Left fraction", "-"),
                    Variable::new("c/d", "Right fraction", "-"),
                ],
                assumptions: vec!["Denominators must be non-zero"],
                category: FormulaCategory::Math,
                source_module: "calculations/fraction.rs",
                source_function: "fraction_arithmetic",
            },

            Formula::BaseConversion => FormulaMetadata {
                id: "base-conversion",
                name: "Number Base Conversion",
                description: "Convert integers between binary, decimal and hexadecimal",
                formula_plain: "value = sum(digit_k * radix^k)",
                reference: None,
                variables: vec![Variable::new("radix", "2, 10 or 16", "-")],
                assumptions: vec!["Signed 64-bit range", "Negative values rendered as sign and magnitude"],
                category: FormulaCategory::Math,
                source_module: "calculations/base_conversion.rs",
                source_function: "convert_base",
            },

            Formula::MatrixOperation => FormulaMetadata {
                id: "matrix",
                name: "Matrix Operations",
                description: "Add, subtract, multiply or transpose matrices up to 5x5",
                formula_plain: "(AB)_ij = sum_k A_ik * B_kj",
                reference: None,
                variables: vec![
                    Variable::new("A", "Left matrix", "-"),
                    Variable::new("B", "Right matrix", "-"),
                ],
                assumptions: vec!["Add/subtract need equal shapes", "Multiply needs cols(A) = rows(B)"],
                category: FormulaCategory::Math,
                source_module: "calculations/matrix.rs",
                source_function: "matrix_operation",
            },

            Formula::Percentage => FormulaMetadata {
                id: "percentage",
                name: "Percentage",
                description: "X% of Y, X as a percent of Y, and percentage change",
                formula_plain: "X% of Y = X*Y/100; X is (X*100/Y)% of Y; change = (new - old)*100/old",
                reference: None,
                variables: vec![
                    Variable::new("X, Y", "Values", "-"),
                    Variable::new("old, new", "Before and after values", "-"),
                ],
                assumptions: vec!["Change from 0 to 0 is 0%"],
                category: FormulaCategory::Math,
                source_module: "calculations/arithmetic.rs",
                source_function: "percentage",
            },

            Formula::Proportion => FormulaMetadata {
                id: "proportion",
                name: "Ratio Solver",
                description: "Solve A:B = C:D for the single missing term",
                formula_plain: "A*D = B*C",
                reference: None,
                variables: vec![Variable::new("A, B, C, D", "Ratio terms, exactly one unknown", "-")],
                assumptions: vec!["Exactly one term may be missing"],
                category: FormulaCategory::Math,
                source_module: "calculations/arithmetic.rs",
                source_function: "proportion",
            },

            Formula::Modulo => FormulaMetadata {
                id: "modulo",
                name: "Modulo",
                description: "Quotient, truncated remainder and Euclidean remainder",
                formula_plain: "a = q*b + r",
                reference: None,
                variables: vec![
                    Variable::new("a", "Dividend", "-"),
                    Variable::new("b", "Divisor (non-zero)", "-"),
                ],
                assumptions: vec![],
                category: FormulaCategory::Math,
                source_module: "calculations/arithmetic.rs",
                source_function: "modulo",
            },

            Formula::Logarithm => FormulaMetadata {
                id: "logarithm",
                name: "Logarithms",
                description: "Common, natural, binary and arbitrary-base logarithms",
                formula_plain: "log_b(x) = ln(x)/ln(b)",
                reference: None,
                variables: vec![
                    Variable::new("x", "Value (> 0)", "-"),
                    Variable::new("b", "Base (> 0, != 1)", "-"),
                ],
                assumptions: vec![],
                category: FormulaCategory::Math,
                source_module: "calculations/arithmetic.rs",
                source_function: "logarithm",
            },

            Formula::OhmsLaw => FormulaMetadata {
                id: "ohms-law",
                name: "Ohm's Law",
                description: "Solve V = I*R for the missing quantity and report power",
                formula_plain: "V = I*R, P = V*I",
                reference: None,
                variables: vec![
                    Variable::new("V", "Voltage", "V"),
                    Variable::new("I", "Current", "A"),
                    Variable::new("R", "Resistance", "ohm"),
                ],
                assumptions: vec!["Exactly one quantity may be missing"],
                category: FormulaCategory::Math,
                source_module: "calculations/arithmetic.rs",
                source_function: "ohms_law",
            },

            Formula::Expression => FormulaMetadata {
                id: "expression",
                name: "Scientific Expression",
                description: "Evaluate an arithmetic expression with functions and constants",
                formula_plain: "+ - * / ^, sin cos tan log ln sqrt abs, pi e, x",
                reference: None,
                variables: vec![Variable::new("x", "Optional variable binding", "-")],
                assumptions: vec!["Trigonometry in radians unless degrees mode is chosen"],
                category: FormulaCategory::Math,
                source_module: "expression/mod.rs",
                source_function: "evaluate",
            },

            Formula::Graph => FormulaMetadata {
                id: "graph",
                name: "Function Graph",
                description: "Sample y = f(x) over an interval",
                formula_plain: "x_k = from + k*(to - from)/(samples - 1)",
                reference: None,
                variables: vec![
                    Variable::new("f", "Expression in x", "-"),
                    Variable::new("from, to", "Interval bounds", "-"),
                ],
                assumptions: vec!["Undefined points are reported as gaps"],
                category: FormulaCategory::Math,
                source_module: "expression/graph.rs",
                source_function: "sample",
            },

            Formula::UnitConversion => FormulaMetadata {
                id: "unit-conversion",
                name: "Unit Conversion",
                description: "Length, mass, temperature, area, volume, speed, time and data units",
                formula_plain: "to = from_value * factor_from / factor_to; temperatures via Celsius",
                reference: None,
                variables: vec![Variable::new("value", "Quantity in the source unit", "-")],
                assumptions: vec!["Data units are binary (1 KB = 1024 B)"],
                category: FormulaCategory::Math,
                source_module: "calculations/conversion.rs",
                source_function: "convert_units",
            },

            Formula::CurrencyConversion => FormulaMetadata {
                id: "currency-conversion",
                name: "Currency Conversion",
                description: "Convert between currencies at fixed sample rates",
                formula_plain: "to_amount = amount * per_usd(to) / per_usd(from)",
                reference: None,
                variables: vec![Variable::new("amount", "Amount in the source currency", "currency")],
                assumptions: vec!["Sample rates, not live market data"],
                category: FormulaCategory::Math,
                source_module: "calculations/conversion.rs",
                source_function: "convert_currency",
            },

            // Generators & validators
            Formula::Password => FormulaMetadata {
                id: "password",
                name: "Password Generator",
                description: "Random password from selected character classes",
                formula_plain: "char_k = pool[uniform(0, |pool|)]",
                reference: None,
                variables: vec![
                    Variable::new("length", "Password length (4..=128)", "chars"),
                    Variable::new("pool", "Union of selected classes", "-"),
                ],
                assumptions: vec!["OS cryptographic randomness"],
                category: FormulaCategory::Generators,
                source_module: "calculations/generators.rs",
                source_function: "generate_password",
            },

            Formula::PasswordStrength => FormulaMetadata {
                id: "password-strength",
                name: "Password Strength",
                description: "Weighted score with a strength band and improvement hints",
                formula_plain: "length >= 8/12/16: +10/+15/+20; each class +10; 2/3/4 classes +5/+10/+15; max 100, max 20 below 8 chars",
                reference: None,
                variables: vec![Variable::new("password", "Candidate password", "-")],
                assumptions: vec!["Does not check breach lists or dictionary words"],
                category: FormulaCategory::Generators,
                source_module: "calculations/generators.rs",
                source_function: "password_strength",
            },

            Formula::RandomIntegers => FormulaMetadata {
                id: "random-integers",
                name: "Random Integers",
                description: "Uniform integers in an inclusive range",
                formula_plain: "v = min + uniform(0, max - min + 1)",
                reference: None,
                variables: vec![
                    Variable::new("min, max", "Inclusive bounds", "-"),
                    Variable::new("count", "How many (1..=1000)", "-"),
                ],
                assumptions: vec!["Rejection sampling, no modulo bias"],
                category: FormulaCategory::Generators,
                source_module: "calculations/generators.rs",
                source_function: "random_integers",
            },

            Formula::MolarMass => FormulaMetadata {
                id: "molar-mass",
                name: "Molar Mass",
                description: "Molar mass and mass composition of a chemical formula",
                formula_plain: "M = sum(count_e * atomic_mass_e)",
                reference: Some("IUPAC standard atomic weights"),
                variables: vec![Variable::new("formula", "Element tokens like C6H12O6", "-")],
                assumptions: vec!["No parentheses, hydrates or charges"],
                category: FormulaCategory::Generators,
                source_module: "calculations/chemistry.rs",
                source_function: "molar_mass",
            },
        }
    }

    /// Stable id, e.g. `"loan-emi"`
    pub fn id(&self) -> &'static str {
        self.metadata().id
    }

    /// Look a formula up by its id (case-insensitive).
    pub fn from_id(id: &str) -> Option<Formula> {
        let id = id.trim();
        ALL_FORMULAS
            .iter()
            .copied()
            .find(|f| f.id().eq_ignore_ascii_case(id))
    }

    /// Get all formulas in a category
    pub fn in_category(category: FormulaCategory) -> Vec<Formula> {
        ALL_FORMULAS
            .iter()
            .copied()
            .filter(|f| f.metadata().category == category)
            .collect()
    }

    /// All categories that have formulas, in sort order
    pub fn all_categories() -> Vec<FormulaCategory> {
        let mut categories: Vec<FormulaCategory> = Vec::new();
        for formula in ALL_FORMULAS {
            let category = formula.metadata().category;
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        categories.sort_by_key(|c| c.sort_order());
        categories
    }
}

/// All formulas in the catalog
pub static ALL_FORMULAS: &[Formula] = &[
    Formula::LoanEmi,
    Formula::LoanAmortization,
    Formula::CreditCardPayoff,
    Formula::Sip,
    Formula::Ppf,
    Formula::FixedDeposit,
    Formula::NetPresentValue,
    Formula::ReturnOnInvestment,
    Formula::Inflation,
    Formula::IncomeTax,
    Formula::Gst,
    Formula::Bmi,
    Formula::Bmr,
    Formula::Tdee,
    Formula::BodyFat,
    Formula::BloodPressure,
    Formula::WaterIntake,
    Formula::StepsToCalories,
    Formula::GcdLcm,
    Formula::FractionArithmetic,
    Formula::BaseConversion,
    Formula::MatrixOperation,
    Formula::Percentage,
    Formula::Proportion,
    Formula::Modulo,
    Formula::Logarithm,
    Formula::OhmsLaw,
    Formula::Expression,
    Formula::Graph,
    Formula::UnitConversion,
    Formula::CurrencyConversion,
    Formula::Password,
    Formula::PasswordStrength,
    Formula::RandomIntegers,
    Formula::MolarMass,
];

// ============================================================================
// Markdown Generation
// ============================================================================

/// Generate the FORMULAS.md reference from the registry.
///
/// Run `cargo run --bin gen-formulas` to regenerate.
pub fn generate_formulas_markdown() -> String {
    let mut output = String::with_capacity(24_000);

    output.push_str(
        r#"# Tally Formula Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-formulas`

Every calculator in the catalog with its formula, variables and assumptions.

---

"#,
    );

    let categories = Formula::all_categories();

    for category in &categories {
        output.push_str(&format!("## {}\n\n", category.display_name()));

        for formula in Formula::in_category(*category) {
            let meta = formula.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("`{}` - {}\n\n", meta.id, meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!(
                        "| {} | {} | {} |\n",
                        var.symbol, var.description, var.units
                    ));
                }
                output.push('\n');
            }

            if let Some(reference) = meta.reference {
                output.push_str(&format!("**Reference:** {}\n\n", reference));
            }

            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Formulas:** {}\n- **Categories:** {}\n",
        ALL_FORMULAS.len(),
        categories.len()
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_formulas_have_metadata() {
        assert_eq!(ALL_FORMULAS.len(), 35);

        for formula in ALL_FORMULAS {
            let meta = formula.metadata();
            assert!(!meta.name.is_empty(), "Formula {:?} has no name", formula);
            assert!(!meta.formula_plain.is_empty(), "Formula {:?} has no formula", formula);
            assert!(!meta.variables.is_empty(), "Formula {:?} has no variables", formula);
            assert!(meta.source_module.ends_with(".rs"));
        }

        let bmr = Formula::Bmr.metadata();
        assert!(bmr.formula_plain.contains("6.25*h"));
    }

    #[test]
    fn test_ids_are_unique_and_resolvable() {
        let mut ids: Vec<&str> = ALL_FORMULAS.iter().map(|f| f.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), ALL_FORMULAS.len());

        for formula in ALL_FORMULAS {
            assert_eq!(Formula::from_id(formula.id()), Some(*formula));
        }
        assert_eq!(Formula::from_id(" BMI "), Some(Formula::Bmi));
        assert_eq!(Formula::from_id("beam"), None);
    }

    #[test]
    fn test_categories_sorted() {
        let categories = Formula::all_categories();
        assert_eq!(
            categories,
            vec![
                FormulaCategory::Finance,
                FormulaCategory::Health,
                FormulaCategory::Math,
                FormulaCategory::Generators
            ]
        );
        assert_eq!(Formula::in_category(FormulaCategory::Health).len(), 7);
    }

    #[test]
    fn test_generate_formulas_markdown() {
        let md = generate_formulas_markdown();
        assert!(md.starts_with("# Tally Formula Reference"));
        assert!(md.contains("## Finance"));
        assert!(md.contains("### Loan EMI"));
        assert!(md.contains("**Reference:** Mifflin-St Jeor equation (1990)"));
        assert!(md.contains("- **Total Formulas:** 35"));
    }
}
