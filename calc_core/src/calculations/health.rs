//! # Health Calculations
//!
//! Body-metric formulas in metric units (kg, cm, years). Imperial inputs
//! can be converted first with the wrappers in [`crate::units`].
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::health::{bmi, BmiCategory, BmiInput};
//!
//! let result = bmi(&BmiInput { weight_kg: 70.0, height_cm: 175.0 }).unwrap();
//! assert!((result.bmi - 22.86).abs() < 0.01);
//! assert_eq!(result.category, BmiCategory::NormalWeight);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{Centimeters, Inches, Kilograms, Pounds};
use crate::validation::{ensure_finite, require_positive};

// =============================================================================
// BMI
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmiInput {
    pub weight_kg: f64,
    pub height_cm: f64,
}

impl BmiInput {
    /// Build from pounds and inches
    pub fn from_imperial(weight: Pounds, height: Inches) -> Self {
        let kg: Kilograms = weight.into();
        let cm: Centimeters = height.into();
        Self {
            weight_kg: kg.0,
            height_cm: cm.0,
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        require_positive("weight_kg", self.weight_kg)?;
        require_positive("height_cm", self.height_cm)?;
        Ok(())
    }
}

/// WHO BMI bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    NormalWeight,
    Overweight,
    ObesityClassI,
    ObesityClassII,
    ObesityClassIII,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::NormalWeight
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else if bmi < 35.0 {
            BmiCategory::ObesityClassI
        } else if bmi < 40.0 {
            BmiCategory::ObesityClassII
        } else {
            BmiCategory::ObesityClassIII
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::NormalWeight => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::ObesityClassI => "Obesity class I",
            BmiCategory::ObesityClassII => "Obesity class II",
            BmiCategory::ObesityClassIII => "Obesity class III",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmiResult {
    pub bmi: f64,
    pub category: BmiCategory,
}

/// `BMI = kg / m²`
pub fn bmi(input: &BmiInput) -> CalcResult<BmiResult> {
    input.validate()?;
    let height_m = input.height_cm / 100.0;
    let value = ensure_finite("bmi", "bmi", input.weight_kg / (height_m * height_m))?;
    Ok(BmiResult {
        bmi: value,
        category: BmiCategory::from_bmi(value),
    })
}

// =============================================================================
// BMR / TDEE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmrInput {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: f64,
    pub sex: Sex,
}

impl BmrInput {
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("weight_kg", self.weight_kg)?;
        require_positive("height_cm", self.height_cm)?;
        require_positive("age_years", self.age_years)?;
        Ok(())
    }
}

/// Basal metabolic rate (kcal/day), Mifflin-St Jeor:
/// `10w + 6.25h - 5a + (male ? 5 : -161)`.
pub fn bmr_mifflin_st_jeor(input: &BmrInput) -> CalcResult<f64> {
    input.validate()?;
    let sex_offset = match input.sex {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
    };
    let bmr = 10.0 * input.weight_kg + 6.25 * input.height_cm - 5.0 * input.age_years + sex_offset;
    if bmr <= 0.0 {
        return Err(CalcError::domain(
            "bmr_mifflin_st_jeor",
            "inputs give a non-positive metabolic rate",
        ));
    }
    ensure_finite("bmr_mifflin_st_jeor", "bmr", bmr)
}

/// Activity multipliers applied to BMR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Physical job or twice-daily training
    ExtraActive,
}

impl ActivityLevel {
    pub fn factor(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TdeeInput {
    pub bmr: f64,
    pub activity: ActivityLevel,
}

/// Total daily energy expenditure: `bmr * activity factor`.
pub fn tdee(input: &TdeeInput) -> CalcResult<f64> {
    require_positive("bmr", input.bmr)?;
    ensure_finite("tdee", "tdee", input.bmr * input.activity.factor())
}

// =============================================================================
// Body Fat (US Navy)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyFatInput {
    pub sex: Sex,
    pub height_cm: f64,
    pub neck_cm: f64,
    pub waist_cm: f64,
    /// Required for female measurements
    #[serde(default)]
    pub hip_cm: Option<f64>,
}

impl BodyFatInput {
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("height_cm", self.height_cm)?;
        require_positive("neck_cm", self.neck_cm)?;
        require_positive("waist_cm", self.waist_cm)?;
        match (self.sex, self.hip_cm) {
            (Sex::Female, None) => return Err(CalcError::missing_field("hip_cm")),
            (_, Some(hip)) => require_positive("hip_cm", hip)?,
            (Sex::Male, None) => {}
        }
        Ok(())
    }
}

/// Body fat percentage by the US Navy circumference method (cm).
///
/// Male: `495 / (1.0324 - 0.19077·log10(waist - neck) + 0.15456·log10(height)) - 450`
///
/// Female: `495 / (1.29579 - 0.35004·log10(waist + hip - neck) + 0.22100·log10(height)) - 450`
pub fn body_fat_us_navy(input: &BodyFatInput) -> CalcResult<f64> {
    input.validate()?;

    let percent = match input.sex {
        Sex::Male => {
            let girth = input.waist_cm - input.neck_cm;
            if girth <= 0.0 {
                return Err(CalcError::domain(
                    "body_fat_us_navy",
                    "waist must be larger than neck",
                ));
            }
            495.0 / (1.0324 - 0.19077 * girth.log10() + 0.15456 * input.height_cm.log10()) - 450.0
        }
        Sex::Female => {
            let hip = input.hip_cm.unwrap_or_default();
            let girth = input.waist_cm + hip - input.neck_cm;
            if girth <= 0.0 {
                return Err(CalcError::domain(
                    "body_fat_us_navy",
                    "waist plus hip must be larger than neck",
                ));
            }
            495.0 / (1.29579 - 0.35004 * girth.log10() + 0.22100 * input.height_cm.log10()) - 450.0
        }
    };

    let percent = ensure_finite("body_fat_us_navy", "body_fat_pct", percent)?;
    if percent <= 0.0 || percent > 100.0 {
        return Err(CalcError::domain(
            "body_fat_us_navy",
            format!("implausible result of {:.1}% - check measurements", percent),
        ));
    }
    Ok(percent)
}

// =============================================================================
// Blood Pressure
// =============================================================================

/// ACC/AHA blood pressure categories, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BloodPressureCategory {
    Normal,
    Elevated,
    HypertensionStage1,
    HypertensionStage2,
    HypertensiveCrisis,
}

impl BloodPressureCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            BloodPressureCategory::Normal => "Normal",
            BloodPressureCategory::Elevated => "Elevated",
            BloodPressureCategory::HypertensionStage1 => "Hypertension Stage 1",
            BloodPressureCategory::HypertensionStage2 => "Hypertension Stage 2",
            BloodPressureCategory::HypertensiveCrisis => "Hypertensive Crisis",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BloodPressureInput {
    /// mmHg
    pub systolic: f64,
    /// mmHg
    pub diastolic: f64,
}

impl BloodPressureInput {
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("systolic", self.systolic)?;
        require_positive("diastolic", self.diastolic)?;
        if self.systolic < self.diastolic {
            return Err(CalcError::invalid_input(
                "systolic",
                self.systolic.to_string(),
                "Systolic pressure must not be below diastolic",
            ));
        }
        Ok(())
    }
}

/// Threshold table checked high-to-low; the first band matched wins.
/// Each entry is (category, systolic threshold, diastolic threshold,
/// strict comparison).
const BP_BANDS: [(BloodPressureCategory, f64, f64, bool); 4] = [
    (BloodPressureCategory::HypertensiveCrisis, 180.0, 120.0, true),
    (BloodPressureCategory::HypertensionStage2, 140.0, 90.0, false),
    (BloodPressureCategory::HypertensionStage1, 130.0, 80.0, false),
    (BloodPressureCategory::Elevated, 120.0, f64::INFINITY, false),
];

/// Classify a reading; either number crossing a band's threshold places it
/// in that band.
pub fn blood_pressure_category(input: &BloodPressureInput) -> CalcResult<BloodPressureCategory> {
    input.validate()?;
    for (category, sys, dia, strict) in BP_BANDS {
        let hit = if strict {
            input.systolic > sys || input.diastolic > dia
        } else {
            input.systolic >= sys || input.diastolic >= dia
        };
        if hit {
            return Ok(category);
        }
    }
    Ok(BloodPressureCategory::Normal)
}

// =============================================================================
// Water Intake
// =============================================================================

/// Liters per kilogram of body weight
pub const WATER_L_PER_KG: f64 = 0.033;

/// Activity tiers for the water intake adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityTier {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityTier {
    /// Extra liters per day for this tier
    pub fn adjustment_liters(&self) -> f64 {
        match self {
            ActivityTier::Sedentary => 0.0,
            ActivityTier::Light => 0.35,
            ActivityTier::Moderate => 0.7,
            ActivityTier::Active => 1.05,
            ActivityTier::VeryActive => 1.4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterIntakeInput {
    pub weight_kg: f64,
    pub activity: ActivityTier,
}

/// Daily water intake in liters: `weight*0.033 + tier adjustment`.
pub fn water_intake_liters(input: &WaterIntakeInput) -> CalcResult<f64> {
    require_positive("weight_kg", input.weight_kg)?;
    ensure_finite(
        "water_intake",
        "liters",
        input.weight_kg * WATER_L_PER_KG + input.activity.adjustment_liters(),
    )
}

// =============================================================================
// Steps to Calories
// =============================================================================

/// Stride length as a fraction of height
pub const STRIDE_HEIGHT_RATIO: f64 = 0.415;
/// Walking energy cost, kcal per kg of body weight per km
pub const KCAL_PER_KG_KM: f64 = 0.78;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepsInput {
    pub steps: u64,
    pub weight_kg: f64,
    pub height_cm: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepsResult {
    pub stride_cm: f64,
    pub distance_km: f64,
    pub calories: f64,
}

/// Estimate walking distance and calories burned from a step count.
pub fn steps_to_calories(input: &StepsInput) -> CalcResult<StepsResult> {
    require_positive("weight_kg", input.weight_kg)?;
    require_positive("height_cm", input.height_cm)?;

    let stride_cm = input.height_cm * STRIDE_HEIGHT_RATIO;
    let distance_km = input.steps as f64 * stride_cm / 100_000.0;
    let calories = ensure_finite(
        "steps_to_calories",
        "calories",
        distance_km * input.weight_kg * KCAL_PER_KG_KM,
    )?;

    Ok(StepsResult {
        stride_cm,
        distance_km,
        calories,
    })
}
