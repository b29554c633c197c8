//! # Expression Evaluator
//!
//! Scientific-calculator and graphing support. Expressions are tokenized,
//! parsed into an [`Expr`] tree by a recursive-descent parser and then
//! evaluated; no text is ever executed as code.
//!
//! Supported syntax: decimal numbers, `+ - * / ^`, parentheses, unary
//! minus, `sin cos tan log ln sqrt abs`, the constants `pi` and `e`, and
//! the variable `x`.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::expression::{evaluate, AngleMode, ExpressionInput};
//!
//! let input = ExpressionInput {
//!     expression: "2 * sin(30) + x".to_string(),
//!     angle_mode: AngleMode::Degrees,
//!     x: Some(1.0),
//! };
//! assert!((evaluate(&input).unwrap() - 2.0).abs() < 1e-12);
//! ```

pub mod eval;
pub mod graph;
pub mod lexer;
pub mod parser;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;

pub use eval::{AngleMode, EvalContext};
pub use graph::{sample, GraphInput, GraphPoint};
pub use parser::{parse, Expr, Function};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpressionInput {
    pub expression: String,
    #[serde(default)]
    pub angle_mode: AngleMode,
    #[serde(default)]
    pub x: Option<f64>,
}

/// Parse and evaluate in one step.
pub fn evaluate(input: &ExpressionInput) -> CalcResult<f64> {
    let expr = parse(&input.expression)?;
    expr.eval(&EvalContext {
        angle_mode: input.angle_mode,
        x: input.x,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(expression: String) -> ExpressionInput {
        ExpressionInput {
            expression,
            angle_mode: AngleMode::Radians,
            x: None,
        }
    }

    #[test]
    fn test_evaluate_nested_input() {
        let ok = format!("{}2{}", "(".repeat(20), ")".repeat(20));
        assert_eq!(evaluate(&input(ok)).unwrap(), 2.0);

        let deep = format!("{}1{}", "(".repeat(5000), ")".repeat(5000));
        assert_eq!(evaluate(&input(deep)).unwrap_err().error_code(), "PARSE_ERROR");
    }
}
