//! The Drill Command-Line Interface.
//!
//! Thin dispatch over the library: every subcommand builds the default
//! registry, binds a runner and calls one runner operation.

use crate::cli::args::{ColorMode, Command, DrillArgs};
use crate::errors::{print_error, DrillError};
use crate::output::{SharedOutput, StdoutSink};
use crate::registry::{build_default_registry, Registry};
use crate::runner::{RunnerConfig, TestRunner};
use crate::suite::load_suite;
use crate::syntax::{parse_arguments, parse_value};
use clap::Parser;
use std::path::Path;
use std::process;
use termcolor::ColorChoice;
use tracing_subscriber::EnvFilter;

pub mod args;

/// The main entry point for the CLI.
pub fn run() {
    let args = DrillArgs::parse();
    init_tracing();

    match dispatch(&args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            print_error(e);
            process::exit(1);
        }
    }
}

/// Logs go to stderr, filtered by `DRILL_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("DRILL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Runs one subcommand and returns the process exit code.
fn dispatch(args: &DrillArgs) -> Result<i32, DrillError> {
    let registry = build_default_registry();
    let output = SharedOutput::new(StdoutSink::new(color_choice(args.color)));
    let config = RunnerConfig {
        no_print: args.quiet,
        ..RunnerConfig::default()
    };

    match &args.command {
        Command::Run {
            function,
            arguments,
        } => {
            let call = parse_arguments(arguments)?;
            TestRunner::with_config(function, &registry, config)?
                .with_output(output)
                .run(&call)?;
            Ok(0)
        }
        Command::Test {
            function,
            expected,
            arguments,
        } => {
            let expected = parse_value(expected)?;
            let call = parse_arguments(arguments)?;
            let passed = TestRunner::with_config(function, &registry, config)?
                .with_output(output)
                .test(expected, &call)?;
            Ok(if passed { 0 } else { 1 })
        }
        Command::Eval { file, case, json } => {
            handle_eval(file, case.as_deref(), *json, args.quiet, &registry, output)
        }
        Command::List => {
            for name in registry.list() {
                println!("{}", name);
            }
            Ok(0)
        }
    }
}

fn handle_eval(
    file: &Path,
    case: Option<&str>,
    json: bool,
    quiet: bool,
    registry: &Registry,
    output: SharedOutput,
) -> Result<i32, DrillError> {
    let mut suite = load_suite(file)?;
    suite.config.no_print |= quiet;
    let tally = suite.runner(registry)?.with_output(output).tally(&suite.batch, case)?;

    if json {
        let report = serde_json::json!({
            "suite": file.display().to_string(),
            "function": suite.function,
            "passed": tally.passed,
            "failed": tally.failed(),
            "total": tally.total,
            "success": tally.all_passed(),
        });
        println!("{}", report);
    }
    Ok(if tally.all_passed() { 0 } else { 1 })
}

fn color_choice(mode: ColorMode) -> ColorChoice {
    match mode {
        ColorMode::Auto => ColorChoice::Auto,
        ColorMode::Always => ColorChoice::Always,
        ColorMode::Never => ColorChoice::Never,
    }
}
