//! Defines the command-line arguments and subcommands for the Drill CLI.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "drill",
    version,
    about = "Trace, check and batch-evaluate coding-exercise functions."
)]
pub struct DrillArgs {
    /// Suppress per-call traces; batch summaries are still printed.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// When to colour output.
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, global = true)]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Invoke a function once and print its trace.
    Run {
        /// Registered function name.
        function: String,
        /// Argument-text, e.g. "'abc', 3, sep='-'".
        #[arg(default_value = "")]
        arguments: String,
    },
    /// Invoke a function and compare the result to an expected literal.
    Test {
        function: String,
        /// Expected value as a literal, e.g. "10" or "'cba'".
        expected: String,
        #[arg(default_value = "")]
        arguments: String,
    },
    /// Evaluate every case of a YAML or JSON suite file.
    Eval {
        /// Path to the suite file.
        #[arg(required = true)]
        file: PathBuf,
        /// Run only the case with this argument-text.
        #[arg(long)]
        case: Option<String>,
        /// Also print the tally as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List all registered functions.
    List,
}
