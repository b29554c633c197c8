//! # Tally CLI
//!
//! Command-line front end for the calc_core formula library. Runs
//! JSON-described calculations, evaluates and graphs expressions,
//! generates passwords, lists the catalog and asks the AI suggestion
//! service which calculator fits a description.

mod cli;
mod config;
mod logger;
mod render;
mod suggest;

use std::io::Read;
use std::process::ExitCode;

use anyhow::{Context, Result};
use calc_core::calculations::generators::{PasswordOptions, PasswordStrengthInput};
use calc_core::calculations::{calculate, CalculationItem, CalculationOutput};
use calc_core::expression::{AngleMode, ExpressionInput, GraphInput};
use calc_core::formulas::{Formula, FormulaCategory, ALL_FORMULAS};
use calc_core::suggestion::SuggestionRequest;
use clap::Parser;
use serde_json::json;
use tracing::{debug, info};

use crate::cli::{AngleArgs, Cli, Command};
use crate::config::AppConfig;
use crate::suggest::{FormulaSuggester, GeminiSuggester};

/// Resolved output settings for one invocation.
struct Output {
    json: bool,
    precision: usize,
}

impl Output {
    fn result(&self, output: &CalculationOutput) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(output)?);
        } else {
            print!("{}", render::render_output(output, self.precision));
        }
        Ok(())
    }
}

impl AngleArgs {
    fn mode(self) -> AngleMode {
        if self.degrees {
            AngleMode::Degrees
        } else {
            AngleMode::Radians
        }
    }
}

fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read calculation from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(source).with_context(|| format!("Failed to read {}", source))
    }
}

/// Accept a single calculation object or an array of them.
fn parse_items(text: &str) -> Result<Vec<CalculationItem>> {
    let value: serde_json::Value = serde_json::from_str(text).context("Input is not valid JSON")?;
    let items = if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value(value).map(|item| vec![item])
    };
    items.context("Input does not describe a known calculation")
}

/// Returns true when every calculation succeeded.
fn run_items(items: &[CalculationItem], out: &Output) -> Result<bool> {
    let mut all_ok = true;
    let mut json_results = Vec::with_capacity(items.len());

    for item in items {
        match calculate(item) {
            Ok(output) if out.json => json_results.push(serde_json::to_value(&output)?),
            Ok(output) => {
                if items.len() > 1 {
                    println!("== {} ==", item.label());
                }
                out.result(&output)?;
            }
            Err(e) => {
                all_ok = false;
                if out.json {
                    json_results.push(json!({ "type": item.calc_type(), "error": e }));
                } else {
                    eprintln!("{}: {}", item.label(), render::render_error(&e));
                }
            }
        }
    }

    if out.json {
        let payload = if items.len() == 1 {
            json_results.pop().unwrap_or_default()
        } else {
            serde_json::Value::Array(json_results)
        };
        println!("{}", serde_json::to_string_pretty(&payload)?);
    }
    Ok(all_ok)
}

fn parse_category(name: &str) -> Result<FormulaCategory> {
    match name.to_ascii_lowercase().as_str() {
        "finance" => Ok(FormulaCategory::Finance),
        "health" => Ok(FormulaCategory::Health),
        "math" => Ok(FormulaCategory::Math),
        "generators" => Ok(FormulaCategory::Generators),
        other => anyhow::bail!("Unknown category '{}' (finance, health, math, generators)", other),
    }
}

fn list(category: Option<&str>, detailed: bool, out: &Output) -> Result<()> {
    let formulas: Vec<Formula> = match category {
        Some(name) => Formula::in_category(parse_category(name)?),
        None => ALL_FORMULAS.to_vec(),
    };

    if out.json {
        let metadata: Vec<_> = formulas.iter().map(Formula::metadata).collect();
        println!("{}", serde_json::to_string_pretty(&metadata)?);
        return Ok(());
    }

    for cat in Formula::all_categories() {
        let in_cat: Vec<&Formula> = formulas.iter().filter(|f| f.metadata().category == cat).collect();
        if in_cat.is_empty() {
            continue;
        }
        println!("{}", cat.display_name());
        for formula in in_cat {
            print!("  {}", render::render_formula(*formula, detailed));
        }
    }
    Ok(())
}

async fn suggest(text: &str, config: &AppConfig, out: &Output) -> Result<()> {
    let request = SuggestionRequest::new(text)?;
    let suggester = GeminiSuggester::from_config(&config.suggest)?;
    let suggestion = suggester.suggest(&request).await?;
    let formula = suggestion.formula();
    info!(suggested = %suggestion.suggested_function, matched = formula.is_some(), "Received suggestion");

    if out.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "suggestedFunction": suggestion.suggested_function,
                "explanation": suggestion.explanation,
                "formula": formula.map(|f| f.metadata()),
            }))?
        );
        return Ok(());
    }

    match formula {
        Some(formula) => {
            let meta = formula.metadata();
            println!("{} ({})", meta.name, meta.id);
            println!("  {}", meta.formula_plain);
        }
        None => println!("{} (not in the catalog)", suggestion.suggested_function),
    }
    println!();
    println!("{}", suggestion.explanation);
    Ok(())
}

async fn run(cli: Cli) -> Result<bool> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let out = Output {
        json: cli.json || config.output.json,
        precision: config.output.precision,
    };
    debug!(?config, "Resolved configuration");

    let single = |item: CalculationItem| run_items(&[item], &out);

    match cli.command {
        Command::Run { input } => {
            let items = parse_items(&read_input(&input)?)?;
            info!(count = items.len(), "Running calculations");
            run_items(&items, &out)
        }
        Command::Eval { expression, angle, x } => single(CalculationItem::Expression(ExpressionInput {
            expression,
            angle_mode: angle.mode(),
            x,
        })),
        Command::Graph {
            expression,
            from,
            to,
            samples,
            angle,
        } => single(CalculationItem::Graph(GraphInput {
            expression,
            from,
            to,
            samples,
            angle_mode: angle.mode(),
        })),
        Command::Password {
            length,
            no_uppercase,
            no_lowercase,
            no_digits,
            no_symbols,
            check,
        } => match check {
            Some(password) => single(CalculationItem::PasswordStrength(PasswordStrengthInput { password })),
            None => single(CalculationItem::Password(PasswordOptions {
                length,
                uppercase: !no_uppercase,
                lowercase: !no_lowercase,
                digits: !no_digits,
                symbols: !no_symbols,
            })),
        },
        Command::List { category, detailed } => list(category.as_deref(), detailed, &out).map(|_| true),
        Command::Suggest { text } => suggest(&text.join(" "), &config, &out).await.map(|_| true),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_and_array() {
        let single = parse_items(r#"{"type":"gst","amount":100,"rate_pct":18,"mode":"add"}"#).unwrap();
        assert_eq!(single.len(), 1);

        let many = parse_items(
            r#"[{"type":"bmr","weight_kg":70,"height_cm":175,"age_years":30,"sex":"Male"},
                {"type":"modulo","dividend":-7,"divisor":3}]"#,
        )
        .unwrap();
        assert_eq!(many.len(), 2);
        assert_eq!(many[1].calc_type(), "modulo");
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = parse_items(r#"{"type":"warp-drive"}"#).unwrap_err();
        assert!(format!("{:#}", err).contains("known calculation"));
        assert!(parse_items("not json").is_err());
    }

    #[test]
    fn test_run_items_reports_failures() {
        let out = Output {
            json: true,
            precision: 4,
        };
        let items = parse_items(
            r#"[{"type":"logarithm","value":100},
                {"type":"logarithm","value":-1}]"#,
        )
        .unwrap();
        assert!(!run_items(&items, &out).unwrap());
        assert!(run_items(&items[..1], &out).unwrap());
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("Health").unwrap(), FormulaCategory::Health);
        assert!(parse_category("astrology").is_err());
    }
}
