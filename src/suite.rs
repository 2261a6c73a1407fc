//! Suite files: one batch for one callable, stored as YAML (or JSON, which the
//! YAML loader also reads).
//!
//! ```yaml
//! function: double
//! no_print: false
//! cases:
//!   "5": 10
//!   "3": 5
//! ```
//!
//! Case keys are argument-text. Bare scalar keys such as `5` or `true` are
//! rendered back to their literal text, so quoting single-argument keys is
//! optional.

use crate::batch::Batch;
use crate::errors::{to_source_span, DrillError, ErrorKind, SourceContext};
use crate::registry::Registry;
use crate::runner::{RunnerConfig, TestRunner};
use crate::value::Value;
use serde::Deserialize;
use serde_yaml::{Mapping, Value as YamlValue};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawSuite {
    function: YamlValue,
    #[serde(flatten)]
    config: RunnerConfig,
    #[serde(default)]
    cases: Mapping,
}

/// Every top-level key a suite file may use.
const SUITE_KEYS: &[&str] = &["function", "no_print", "return_output", "rule_width", "cases"];

#[derive(Debug, Clone, PartialEq)]
pub struct Suite {
    pub function: String,
    pub config: RunnerConfig,
    pub batch: Batch,
}

impl Suite {
    /// Builds the runner this suite describes.
    pub fn runner(&self, registry: &Registry) -> Result<TestRunner, DrillError> {
        TestRunner::with_config(&self.function, registry, self.config)
    }
}

/// Reads and parses a suite file.
pub fn load_suite(path: &Path) -> Result<Suite, DrillError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        DrillError::new(ErrorKind::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    })?;
    parse_suite(&text, &path.display().to_string())
}

/// Parses suite text; `name` is used in diagnostics.
pub fn parse_suite(text: &str, name: &str) -> Result<Suite, DrillError> {
    let source = SourceContext::from_text(name, text);
    let raw: RawSuite = serde_yaml::from_str(text).map_err(|e| {
        let err = format_error(name, e.to_string());
        match e.location() {
            Some(loc) => err.with_source(&source, to_source_span(loc.index(), loc.index())),
            None => err,
        }
    })?;

    check_keys(text, name)?;

    let function = match raw.function {
        YamlValue::String(s) => s,
        other => {
            return Err(DrillError::new(ErrorKind::InvalidName {
                found: describe(&other).to_string(),
            })
            .with_help("`function` must be the callable's name as text"))
        }
    };

    let mut batch = Batch::new();
    for (key, expected) in raw.cases {
        let arguments = key_text(&key).ok_or_else(|| {
            format_error(name, format!("case key must be argument text, got {}", describe(&key)))
        })?;
        let expected: Value = serde_yaml::from_value(expected).map_err(|e| {
            format_error(name, format!("case `{}`: {}", arguments, e))
        })?;
        batch.insert(arguments, expected);
    }

    Ok(Suite {
        function,
        config: raw.config,
        batch,
    })
}

/// Flattened config fields accept anything, so unknown keys are caught here.
fn check_keys(text: &str, name: &str) -> Result<(), DrillError> {
    let top: Mapping = serde_yaml::from_str(text).map_err(|e| format_error(name, e.to_string()))?;
    for key in top.keys() {
        let known = key.as_str().is_some_and(|k| SUITE_KEYS.contains(&k));
        if !known {
            let shown = key_text(key).unwrap_or_else(|| describe(key).to_string());
            return Err(format_error(name, format!("unknown key `{}`", shown))
                .with_help(format!("suite keys are: {}", SUITE_KEYS.join(", "))));
        }
    }
    Ok(())
}

fn key_text(key: &YamlValue) -> Option<String> {
    match key {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        YamlValue::Null => Some("None".to_string()),
        _ => None,
    }
}

fn describe(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "bool",
        YamlValue::Number(_) => "number",
        YamlValue::String(_) => "str",
        YamlValue::Sequence(_) => "list",
        YamlValue::Mapping(_) => "mapping",
        YamlValue::Tagged(_) => "tagged value",
    }
}

fn format_error(path: &str, message: String) -> DrillError {
    DrillError::new(ErrorKind::SuiteFormat {
        path: path.to_string(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cases_in_file_order() {
        let suite = parse_suite(
            "function: double\nno_print: true\ncases:\n  '5': 10\n  3: 5\n  \"'a'\": aa\n",
            "inline",
        )
        .unwrap();
        assert_eq!(suite.function, "double");
        assert!(suite.config.no_print);
        assert_eq!(suite.config.rule_width, 80);
        let keys: Vec<&str> = suite.batch.iter().map(|c| c.arguments.as_str()).collect();
        assert_eq!(keys, vec!["5", "3", "'a'"]);
        assert_eq!(suite.batch.get("'a'"), Some(&Value::from("aa")));
    }

    #[test]
    fn json_suites_load_too() {
        let suite = parse_suite(r#"{"function": "add", "cases": {"1, 2": 3}}"#, "inline.json").unwrap();
        assert_eq!(suite.batch.get("1, 2"), Some(&Value::Int(3)));
    }

    #[test]
    fn non_text_function_is_rejected() {
        let err = parse_suite("function: 42\ncases: {}\n", "inline").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidName { found: "number".into() });
    }

    #[test]
    fn misspelled_key_is_rejected() {
        let err = parse_suite("function: double\nno_prnt: true\ncases: {}\n", "inline").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::SuiteFormat {
                path: "inline".into(),
                message: "unknown key `no_prnt`".into(),
            }
        );
        assert!(err.diagnostic_info.help.unwrap().contains("no_print"));
    }

    #[test]
    fn malformed_yaml_points_at_location() {
        let err = parse_suite("function: [double\n", "inline").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::SuiteFormat { .. }));
        assert!(err.source_info.is_some());
    }
}
