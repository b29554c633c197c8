//! # calc_core - Calculator Formula Library
//!
//! `calc_core` is the computational heart of Tally: a catalog of small,
//! independent calculators covering finance, health, general math and
//! generators. All inputs and outputs are JSON-serializable, so the same
//! calculation can be driven from the CLI, a test or another program.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, never a silent NaN
//! - **No I/O**: Randomness is injected, network calls live in the caller
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculations::{calculate, CalculationItem, CalculationOutput};
//!
//! let item: CalculationItem = serde_json::from_str(
//!     r#"{"type": "bmi", "weight_kg": 70.0, "height_cm": 175.0}"#,
//! ).unwrap();
//!
//! if let CalculationOutput::Bmi(result) = calculate(&item).unwrap() {
//!     assert!((result.bmi - 22.857).abs() < 1e-3);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - All calculators and the JSON dispatch enum
//! - [`expression`] - Scientific expression parser, evaluator and graph sampler
//! - [`formulas`] - Formula registry and reference generation
//! - [`suggestion`] - Prompt and reply types for AI formula suggestions
//! - [`random`] - Injectable random sources
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod expression;
pub mod formulas;
pub mod random;
pub mod suggestion;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, calculate_with, CalculationItem, CalculationOutput};
pub use errors::{CalcError, CalcResult, ErrorCategory};
pub use formulas::{Formula, FormulaCategory};
pub use random::secure_rng;
