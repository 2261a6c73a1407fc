//! The test runner.
//!
//! A [`TestRunner`] is bound to one callable, resolved by name from a
//! [`Registry`] when the runner is built. It offers three ways to exercise it:
//!
//! - [`TestRunner::run`] invokes once and prints an ` [IN]` / `[OUT]` trace.
//! - [`TestRunner::test`] invokes once, compares against an expected value and
//!   prints the comparison.
//! - [`TestRunner::evaluate`] runs a [`Batch`] of argument-text cases, prints
//!   only the failures and finishes with a `<passed>/<total> test(s) passed.`
//!   summary.
//!
//! ```rust
//! use drill::{build_default_registry, CallArgs, RunnerConfig, TestRunner};
//!
//! let registry = build_default_registry();
//! let config = RunnerConfig { no_print: true, ..RunnerConfig::default() };
//! let runner = TestRunner::with_config("double", &registry, config).unwrap();
//! assert!(runner.test(10, &CallArgs::positional([5])).unwrap());
//! assert!(!runner.test(11, &CallArgs::positional([5])).unwrap());
//! ```

use crate::batch::{Batch, BatchCase, Tally};
use crate::call::{render_call, CallArgs};
use crate::errors::{DrillError, ErrorKind, SourceContext};
use crate::output::{SharedOutput, Tone};
use crate::registry::{Callable, Registry};
use crate::syntax::parse_arguments_in;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Printing and return behaviour of a runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Suppress the per-call traces of `run` and `test` and the failure blocks
    /// of `evaluate`.
    pub no_print: bool,
    /// Make `run` hand its result back to the caller.
    pub return_output: bool,
    /// Width of divider lines.
    pub rule_width: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            no_print: false,
            return_output: false,
            rule_width: 80,
        }
    }
}

pub struct TestRunner {
    name: String,
    func: Callable,
    config: RunnerConfig,
    output: SharedOutput,
}

impl TestRunner {
    /// Binds a runner to the callable registered as `name`, with default
    /// configuration and stdout output.
    pub fn new(name: &str, registry: &Registry) -> Result<Self, DrillError> {
        Self::with_config(name, registry, RunnerConfig::default())
    }

    pub fn with_config(
        name: &str,
        registry: &Registry,
        config: RunnerConfig,
    ) -> Result<Self, DrillError> {
        let func = registry.resolve(name)?;
        debug!(callable = name, ?config, "runner bound");
        Ok(Self {
            name: name.to_string(),
            func,
            config,
            output: SharedOutput::default(),
        })
    }

    /// Binds a runner from a dynamic value, which must be text.
    ///
    /// Fails with `InvalidName` before any lookup or invocation otherwise.
    pub fn from_value(
        name: &Value,
        registry: &Registry,
        config: RunnerConfig,
    ) -> Result<Self, DrillError> {
        match name {
            Value::Str(name) => Self::with_config(name, registry, config),
            other => Err(DrillError::new(ErrorKind::InvalidName {
                found: other.type_name().to_string(),
            })
            .with_help("pass the callable's name as a quoted string")),
        }
    }

    /// Redirects all printing to `output`.
    pub fn with_output(mut self, output: impl Into<SharedOutput>) -> Self {
        self.output = output.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    // ------------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------------

    /// Invokes the callable once and prints the trace.
    ///
    /// Returns the result only when `return_output` is set.
    pub fn run(&self, args: &CallArgs) -> Result<Option<Value>, DrillError> {
        let result = self.invoke(args, true)?;
        Ok(self.config.return_output.then_some(result))
    }

    /// Invokes the callable once and reports whether the result equals
    /// `expected`. Printing never affects the answer.
    pub fn test(&self, expected: impl Into<Value>, args: &CallArgs) -> Result<bool, DrillError> {
        let expected = expected.into();
        let actual = self.invoke(args, false)?;
        if !self.config.no_print {
            self.print_comparison(args, &actual, &expected);
        }
        Ok(actual == expected)
    }

    /// Runs every case of `batch`, or only the case keyed `test_key` when one
    /// is given. Failures and the summary line are printed; nothing is
    /// returned. The first error aborts the rest of the batch.
    pub fn evaluate(&self, batch: &Batch, test_key: Option<&str>) -> Result<(), DrillError> {
        self.tally(batch, test_key).map(|_| ())
    }

    pub(crate) fn tally(&self, batch: &Batch, test_key: Option<&str>) -> Result<Tally, DrillError> {
        let selected: Vec<&BatchCase> = match test_key {
            Some(key) => vec![batch.find(key).ok_or_else(|| {
                DrillError::new(ErrorKind::UnknownCase { key: key.into() })
            })?],
            None => batch.iter().collect(),
        };

        let mut tally = Tally {
            passed: 0,
            total: selected.len(),
        };
        for case in selected {
            let source = SourceContext::from_text(format!("{} case", self.name), &case.arguments);
            let args = parse_arguments_in(&case.arguments, &source)?;
            let actual = self.invoke(&args, false)?;
            if actual == case.expected {
                tally.passed += 1;
                trace!(case = %case.arguments, "pass");
            } else {
                debug!(case = %case.arguments, actual = %actual.repr(), expected = %case.expected.repr(), "fail");
                if !self.config.no_print {
                    self.print_comparison(&args, &actual, &case.expected);
                }
            }
        }

        let tone = if tally.all_passed() { Tone::Pass } else { Tone::Fail };
        self.output.emit(&tally.summary(), tone);
        self.print_rule('=');
        Ok(tally)
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    /// The single invocation path. `echo` is false when called on behalf of a
    /// comparison, which prints its own trace.
    fn invoke(&self, args: &CallArgs, echo: bool) -> Result<Value, DrillError> {
        trace!(callable = %self.name, args = args.len(), "invoke");
        let result = (self.func)(args).inspect_err(|e| {
            debug!(callable = %self.name, error = %e, "callable raised");
        })?;

        if echo && !self.config.no_print {
            self.print_call(args);
            self.output.emit(&format!("[OUT] {}", result.repr()), Tone::Output);
            self.print_rule('=');
        }
        Ok(result)
    }

    fn print_call(&self, args: &CallArgs) {
        self.output
            .emit(&format!(" [IN] {}", render_call(&self.name, args)), Tone::Input);
    }

    fn print_comparison(&self, args: &CallArgs, actual: &Value, expected: &Value) {
        self.print_call(args);
        self.output.emit(&format!("[OUT] {}", actual.repr()), Tone::Output);
        self.print_rule('-');
        self.output.emit(&format!("[EXP] {}", expected.repr()), Tone::Expected);
        self.print_rule('=');
    }

    fn print_rule(&self, key: char) {
        let rule: String = std::iter::repeat(key).take(self.config.rule_width).collect();
        self.output.emit(&rule, Tone::Rule);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputBuffer;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn quiet_runner(name: &str) -> (TestRunner, Rc<RefCell<OutputBuffer>>) {
        let buffer = Rc::new(RefCell::new(OutputBuffer::new()));
        let registry = crate::registry::build_default_registry();
        let config = RunnerConfig {
            rule_width: 4,
            ..RunnerConfig::default()
        };
        let runner = TestRunner::with_config(name, &registry, config)
            .unwrap()
            .with_output(buffer.clone());
        (runner, buffer)
    }

    #[test]
    fn test_does_not_echo_the_nested_run() {
        let (runner, buffer) = quiet_runner("double");
        assert!(runner.test(10, &CallArgs::positional([5])).unwrap());
        assert_eq!(
            buffer.borrow().lines,
            vec![" [IN] double(5)", "[OUT] 10", "----", "[EXP] 10", "===="]
        );
    }

    #[test]
    fn unknown_test_key_fails() {
        let (runner, _) = quiet_runner("double");
        let batch = Batch::new().case("1", 2);
        let err = runner.evaluate(&batch, Some("2")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownCase { key: "2".into() });
    }

    #[test]
    fn test_key_selects_one_case() {
        let (runner, buffer) = quiet_runner("double");
        let batch = Batch::new().case("1", 2).case("3", 5);
        let tally = runner.tally(&batch, Some("1")).unwrap();
        assert_eq!(tally, Tally { passed: 1, total: 1 });
        assert_eq!(buffer.borrow().lines, vec!["1/1 test(s) passed.", "===="]);
    }
}
