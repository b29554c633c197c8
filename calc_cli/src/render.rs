//! Human-readable rendering of calculation results.
//!
//! Results are rendered from their JSON form so every calculator gets
//! output without a bespoke printer. A few results with a natural display
//! name are special-cased.

use calc_core::calculations::CalculationOutput;
use calc_core::formulas::{Formula, FormulaMetadata};
use calc_core::CalcError;
use serde_json::Value;

/// Fixed decimals with trailing zeros trimmed.
pub fn format_number(value: f64, precision: usize) -> String {
    let text = format!("{:.*}", precision, value);
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    };
    if text == "-0" {
        "0".to_string()
    } else {
        text
    }
}

fn scalar(value: &Value, precision: usize) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) => format_number(f, precision),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

fn render_value(value: &Value, precision: usize, indent: usize, out: &mut String) {
    let pad = "  ".repeat(indent);
    match value {
        Value::Object(map) => {
            for (key, field) in map {
                if is_scalar(field) {
                    out.push_str(&format!("{}{}: {}\n", pad, key, scalar(field, precision)));
                } else {
                    out.push_str(&format!("{}{}:\n", pad, key));
                    render_value(field, precision, indent + 1, out);
                }
            }
        }
        Value::Array(items) if items.iter().all(|v| matches!(v, Value::Object(_))) && !items.is_empty() => {
            render_table(items, precision, &pad, out);
        }
        Value::Array(items) if items.iter().all(Value::is_array) => {
            for row in items {
                let cells: Vec<String> = row
                    .as_array()
                    .map(|cells| cells.iter().map(|c| scalar(c, precision)).collect())
                    .unwrap_or_default();
                out.push_str(&format!("{}[ {} ]\n", pad, cells.join("  ")));
            }
        }
        Value::Array(items) => {
            let cells: Vec<String> = items.iter().map(|c| scalar(c, precision)).collect();
            out.push_str(&format!("{}{}\n", pad, cells.join(", ")));
        }
        other => out.push_str(&format!("{}{}\n", pad, scalar(other, precision))),
    }
}

/// Rows of flat objects as an aligned table.
fn render_table(rows: &[Value], precision: usize, pad: &str, out: &mut String) {
    let headers: Vec<&String> = match rows.first() {
        Some(Value::Object(first)) => first.keys().collect(),
        _ => return,
    };
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .map(|h| row.get(h.as_str()).map_or_else(String::new, |v| scalar(v, precision)))
                .collect()
        })
        .collect();
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| cells.iter().map(|r| r[i].len()).chain([h.len()]).max().unwrap_or(0))
        .collect();

    let line = |values: Vec<&str>| -> String {
        let joined: Vec<String> = values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:>width$}", v, width = w))
            .collect();
        format!("{}{}\n", pad, joined.join("  "))
    };
    out.push_str(&line(headers.iter().map(|h| h.as_str()).collect()));
    for row in &cells {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
    }
}

/// Render one calculation result as text.
pub fn render_output(output: &CalculationOutput, precision: usize) -> String {
    match output {
        CalculationOutput::Password(password) => format!("{}\n", password),
        CalculationOutput::BloodPressure(category) => format!("{}\n", category.display_name()),
        CalculationOutput::Bmi(result) => format!(
            "BMI: {}\nCategory: {}\n",
            format_number(result.bmi, precision),
            result.category.display_name()
        ),
        CalculationOutput::PasswordStrength(strength) => {
            let mut out = format!("Score: {}/100 ({})\n", strength.score, strength.band.display_name());
            for hint in &strength.feedback {
                out.push_str(&format!("  - {}\n", hint));
            }
            out
        }
        CalculationOutput::Graph(points) => {
            let mut out = String::new();
            for point in points {
                let y = point
                    .y
                    .map_or_else(|| "undefined".to_string(), |y| format_number(y, precision));
                out.push_str(&format!("{:>12}  {}\n", format_number(point.x, precision), y));
            }
            out
        }
        other => {
            let mut out = String::new();
            match serde_json::to_value(other) {
                Ok(json) => render_value(&json["result"], precision, 0, &mut out),
                Err(e) => out.push_str(&format!("<unrenderable result: {}>\n", e)),
            }
            out
        }
    }
}

pub fn render_error(error: &CalcError) -> String {
    format!("[{}] {}", error.error_code(), error)
}

pub fn render_formula(formula: Formula, detailed: bool) -> String {
    let meta: FormulaMetadata = formula.metadata();
    let mut out = format!("{:<22} {}\n", meta.id, meta.name);
    if detailed {
        out.push_str(&format!("{:<22} {}\n", "", meta.formula_plain));
        for var in &meta.variables {
            out.push_str(&format!("{:<22}   {} - {} [{}]\n", "", var.symbol, var.description, var.units));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_core::calculations::finance::{loan_emi, LoanEmiInput};
    use calc_core::calculations::matrix::Matrix;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(2.5, 4), "2.5");
        assert_eq!(format_number(3.0, 4), "3");
        assert_eq!(format_number(1.0 / 3.0, 2), "0.33");
        assert_eq!(format_number(-0.00001, 2), "0");
        assert_eq!(format_number(100.0, 0), "100");
    }

    #[test]
    fn test_render_struct_result() {
        let result = loan_emi(&LoanEmiInput::new(1200.0, 0.0, 1.0)).unwrap();
        let text = render_output(&CalculationOutput::LoanEmi(result), 2);
        assert!(text.contains("emi: 100\n"));
        assert!(text.contains("total_interest: 0\n"));
    }

    #[test]
    fn test_render_matrix_rows() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.5], vec![3.0, 4.0]]).unwrap();
        let text = render_output(&CalculationOutput::Matrix(m), 2);
        assert_eq!(text, "[ 1  2.5 ]\n[ 3  4 ]\n");
    }

    #[test]
    fn test_render_scalar_result() {
        assert_eq!(render_output(&CalculationOutput::Expression(0.1 + 0.2), 4), "0.3\n");
    }

    #[test]
    fn test_render_formula_listing() {
        let line = render_formula(Formula::Bmi, false);
        assert!(line.starts_with("bmi"));
        assert!(line.contains("Body Mass Index"));
        assert!(render_formula(Formula::Bmi, true).contains("kg / m^2"));
    }
}
