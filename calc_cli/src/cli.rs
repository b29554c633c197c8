use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "calc_cli")]
#[command(about = "Tally: finance, health, math and generator calculators")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./tally.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run calculations described as JSON (a single object or an array)
    Run {
        /// JSON file, or "-" for stdin
        input: String,
    },

    /// Evaluate a scientific expression
    Eval {
        expression: String,
        #[command(flatten)]
        angle: AngleArgs,
        /// Value for the variable x
        #[arg(short, long, allow_hyphen_values = true)]
        x: Option<f64>,
    },

    /// Sample y = f(x) over an interval
    Graph {
        expression: String,
        #[arg(long, default_value_t = -10.0, allow_hyphen_values = true)]
        from: f64,
        #[arg(long, default_value_t = 10.0, allow_hyphen_values = true)]
        to: f64,
        #[arg(long, default_value_t = 21)]
        samples: usize,
        #[command(flatten)]
        angle: AngleArgs,
    },

    /// Generate a password, or score one with --check
    Password {
        #[arg(short, long, default_value_t = 16)]
        length: usize,
        #[arg(long)]
        no_uppercase: bool,
        #[arg(long)]
        no_lowercase: bool,
        #[arg(long)]
        no_digits: bool,
        #[arg(long)]
        no_symbols: bool,
        /// Score an existing password instead of generating one
        #[arg(long, value_name = "PASSWORD")]
        check: Option<String>,
    },

    /// List the formula catalog
    List {
        /// Only show one category (finance, health, math, generators)
        #[arg(long)]
        category: Option<String>,
        /// Show formula text and variables
        #[arg(long)]
        detailed: bool,
    },

    /// Ask the AI service which calculator fits a description
    Suggest {
        /// Free-text description
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

#[derive(Args, Debug, Clone, Copy)]
pub struct AngleArgs {
    /// Interpret trigonometric arguments in degrees
    #[arg(long)]
    pub degrees: bool,
}
