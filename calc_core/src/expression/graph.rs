//! Function plotting: sample `y = f(x)` over an interval.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::eval::{AngleMode, EvalContext};
use super::parser::parse;
use crate::errors::{CalcError, CalcResult};
use crate::validation::require_finite_input;

pub const DEFAULT_SAMPLES: usize = 201;
pub const MAX_SAMPLES: usize = 10_000;

fn default_samples() -> usize {
    DEFAULT_SAMPLES
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphInput {
    pub expression: String,
    pub from: f64,
    pub to: f64,
    #[serde(default = "default_samples")]
    pub samples: usize,
    #[serde(default)]
    pub angle_mode: AngleMode,
}

impl GraphInput {
    pub fn validate(&self) -> CalcResult<()> {
        require_finite_input("from", self.from)?;
        require_finite_input("to", self.to)?;
        if self.from >= self.to {
            return Err(CalcError::invalid_input(
                "to",
                self.to.to_string(),
                "Upper bound must be greater than lower bound",
            ));
        }
        if self.samples < 2 || self.samples > MAX_SAMPLES {
            return Err(CalcError::invalid_input(
                "samples",
                self.samples.to_string(),
                format!("Sample count must be between 2 and {}", MAX_SAMPLES),
            ));
        }
        Ok(())
    }
}

/// One sampled point. `y` is `None` where the expression is undefined,
/// which a plotter draws as a gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphPoint {
    pub x: f64,
    pub y: Option<f64>,
}

/// Sample the expression at `samples` evenly spaced points, endpoints included.
///
/// Parse errors fail the whole call. Per-point domain and non-finite
/// errors become gaps.
pub fn sample(input: &GraphInput) -> CalcResult<Vec<GraphPoint>> {
    input.validate()?;
    let expr = parse(&input.expression)?;
    let ctx = EvalContext {
        angle_mode: input.angle_mode,
        x: None,
    };
    let step = (input.to - input.from) / (input.samples - 1) as f64;

    let points: Vec<GraphPoint> = (0..input.samples)
        .map(|i| {
            let x = if i + 1 == input.samples {
                input.to
            } else {
                input.from + step * i as f64
            };
            GraphPoint {
                x,
                y: expr.eval(&ctx.with_x(x)).ok(),
            }
        })
        .collect();

    let gaps = points.iter().filter(|p| p.y.is_none()).count();
    debug!(expression = %input.expression, samples = input.samples, gaps, "Sampled graph");
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(expression: &str, from: f64, to: f64, samples: usize) -> CalcResult<Vec<GraphPoint>> {
        sample(&GraphInput {
            expression: expression.to_string(),
            from,
            to,
            samples,
            angle_mode: AngleMode::Radians,
        })
    }

    #[test]
    fn test_endpoints_and_spacing() {
        let points = graph("2*x", -1.0, 1.0, 5).unwrap();
        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert_eq!(points[4].y, Some(2.0));
    }

    #[test]
    fn test_gaps_where_undefined() {
        let points = graph("1/x", -1.0, 1.0, 3).unwrap();
        assert_eq!(points[0].y, Some(-1.0));
        assert_eq!(points[1].y, None);
        assert_eq!(points[2].y, Some(1.0));

        let roots = graph("sqrt(x)", -1.0, 1.0, 3).unwrap();
        assert_eq!(roots.iter().filter(|p| p.y.is_none()).count(), 1);
    }

    #[test]
    fn test_parse_error_fails_whole_graph() {
        assert_eq!(graph("x +", 0.0, 1.0, 10).unwrap_err().error_code(), "PARSE_ERROR");
    }

    #[test]
    fn test_invalid_range() {
        assert!(graph("x", 1.0, 1.0, 10).is_err());
        assert!(graph("x", 0.0, 1.0, 1).is_err());
    }
}
