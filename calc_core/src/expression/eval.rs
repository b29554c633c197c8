//! Evaluation of parsed expressions.

use serde::{Deserialize, Serialize};

use super::parser::{BinaryOp, Expr, Function};
use crate::errors::{CalcError, CalcResult};

/// How trigonometric arguments are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    #[default]
    Radians,
    Degrees,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EvalContext {
    pub angle_mode: AngleMode,
    /// Value bound to `x`; evaluating `x` without a binding is an error
    pub x: Option<f64>,
}

impl EvalContext {
    pub fn with_x(self, x: f64) -> Self {
        Self { x: Some(x), ..self }
    }
}

impl Expr {
    /// Evaluate the tree. Undefined operations are domain errors and any
    /// NaN/Infinity that still slips through is a non-finite error.
    pub fn eval(&self, ctx: &EvalContext) -> CalcResult<f64> {
        let value = match self {
            Expr::Number(v) => *v,
            Expr::Variable => ctx.x.ok_or_else(|| CalcError::missing_field("x"))?,
            Expr::Neg(inner) => -inner.eval(ctx)?,
            Expr::Binary(op, lhs, rhs) => binary(*op, lhs.eval(ctx)?, rhs.eval(ctx)?)?,
            Expr::Call(function, arg) => call(*function, arg.eval(ctx)?, ctx.angle_mode)?,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(CalcError::non_finite("expression", "value"))
        }
    }
}

fn binary(op: BinaryOp, a: f64, b: f64) -> CalcResult<f64> {
    match op {
        BinaryOp::Add => Ok(a + b),
        BinaryOp::Sub => Ok(a - b),
        BinaryOp::Mul => Ok(a * b),
        BinaryOp::Div => {
            if b == 0.0 {
                return Err(CalcError::domain("division", "division by zero"));
            }
            Ok(a / b)
        }
        BinaryOp::Pow => {
            if a == 0.0 && b < 0.0 {
                return Err(CalcError::domain("power", "zero raised to a negative power"));
            }
            if a < 0.0 && b.fract() != 0.0 {
                return Err(CalcError::domain(
                    "power",
                    "negative base with a fractional exponent",
                ));
            }
            Ok(a.powf(b))
        }
    }
}

fn call(function: Function, arg: f64, mode: AngleMode) -> CalcResult<f64> {
    let angle = match mode {
        AngleMode::Radians => arg,
        AngleMode::Degrees => arg.to_radians(),
    };
    match function {
        Function::Sin => Ok(angle.sin()),
        Function::Cos => Ok(angle.cos()),
        Function::Tan => {
            if angle.cos().abs() < 1e-12 {
                return Err(CalcError::domain("tan", "argument is an odd multiple of 90°"));
            }
            Ok(angle.tan())
        }
        Function::Log | Function::Ln if arg <= 0.0 => Err(CalcError::domain(
            function.name(),
            format!("logarithm of non-positive number {}", arg),
        )),
        Function::Log => Ok(arg.log10()),
        Function::Ln => Ok(arg.ln()),
        Function::Sqrt => {
            if arg < 0.0 {
                return Err(CalcError::domain("sqrt", format!("square root of negative number {}", arg)));
            }
            Ok(arg.sqrt())
        }
        Function::Abs => Ok(arg.abs()),
    }
}

#[cfg(test)]
mod tests {
    use super::super::parser::parse;
    use super::*;

    fn eval(source: &str) -> CalcResult<f64> {
        parse(source)?.eval(&EvalContext::default())
    }

    fn eval_deg(source: &str) -> CalcResult<f64> {
        parse(source)?.eval(&EvalContext {
            angle_mode: AngleMode::Degrees,
            x: None,
        })
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval("1 + 2 * 3").unwrap(), 7.0);
        assert_eq!(eval("(1 + 2) * 3").unwrap(), 9.0);
        assert_eq!(eval("2^3^2").unwrap(), 512.0);
        assert_eq!(eval("-2^2").unwrap(), -4.0);
        assert_eq!(eval("2^-1").unwrap(), 0.5);
        assert_eq!(eval("10 / 4 - 1").unwrap(), 1.5);
    }

    #[test]
    fn test_functions_and_constants() {
        assert!((eval("sin(pi / 2)").unwrap() - 1.0).abs() < 1e-12);
        assert!((eval("ln(e)").unwrap() - 1.0).abs() < 1e-12);
        assert!((eval("log(1000)").unwrap() - 3.0).abs() < 1e-12);
        assert_eq!(eval("sqrt(16) + abs(-3)").unwrap(), 7.0);
    }

    #[test]
    fn test_degrees_mode() {
        assert!((eval_deg("sin(30)").unwrap() - 0.5).abs() < 1e-12);
        assert!((eval_deg("cos(60)").unwrap() - 0.5).abs() < 1e-12);
        assert!(eval_deg("tan(90)").is_err());
    }

    #[test]
    fn test_domain_errors() {
        assert_eq!(eval("1 / 0").unwrap_err().error_code(), "DOMAIN_ERROR");
        assert_eq!(eval("sqrt(-1)").unwrap_err().error_code(), "DOMAIN_ERROR");
        assert_eq!(eval("ln(0)").unwrap_err().error_code(), "DOMAIN_ERROR");
        assert_eq!(eval("(-8)^0.5").unwrap_err().error_code(), "DOMAIN_ERROR");
        assert_eq!(eval("0^-1").unwrap_err().error_code(), "DOMAIN_ERROR");
    }

    #[test]
    fn test_overflow_is_non_finite() {
        assert_eq!(eval("10^400").unwrap_err().error_code(), "NON_FINITE_RESULT");
    }

    #[test]
    fn test_variable_binding() {
        let expr = parse("x^2 + 1").unwrap();
        assert_eq!(expr.eval(&EvalContext::default().with_x(3.0)).unwrap(), 10.0);
        assert_eq!(
            expr.eval(&EvalContext::default()).unwrap_err().error_code(),
            "MISSING_FIELD"
        );
    }
}
