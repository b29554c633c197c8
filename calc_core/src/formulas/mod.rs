//! # Formula Catalog
//!
//! Metadata for every calculator: ids, formulas, variables and
//! assumptions. The implementations live in [`crate::calculations`] and
//! [`crate::expression`]; this module describes them.
//!
//! - [`registry`] - The [`Formula`] enum, lookup and markdown generation

pub mod registry;

pub use registry::{
    generate_formulas_markdown, Formula, FormulaCategory, FormulaMetadata, Variable, ALL_FORMULAS,
};
