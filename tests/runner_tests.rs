//! run / test behaviour of the runner, observed through captured output.

mod common;

use common::{lines, rule, runner};
use drill::{CallArgs, ErrorKind, RunnerConfig, TestRunner, Value};
use pretty_assertions::assert_eq;

#[test]
fn run_prints_trace_and_returns_nothing_by_default() {
    let (runner, buffer) = runner("double", RunnerConfig::default());
    let result = runner.run(&CallArgs::positional([5])).unwrap();
    assert_eq!(result, None);
    assert_eq!(
        lines(&buffer),
        vec![" [IN] double(5)".to_string(), "[OUT] 10".to_string(), rule('=')]
    );
}

#[test]
fn run_returns_result_when_asked() {
    let config = RunnerConfig {
        return_output: true,
        ..RunnerConfig::default()
    };
    let (runner, _) = runner("double", config);
    assert_eq!(runner.run(&CallArgs::positional([5])).unwrap(), Some(Value::Int(10)));
}

#[test]
fn no_print_silences_run() {
    let config = RunnerConfig {
        no_print: true,
        return_output: true,
        ..RunnerConfig::default()
    };
    let (runner, buffer) = runner("double", config);
    assert_eq!(runner.run(&CallArgs::positional([2])).unwrap(), Some(Value::Int(4)));
    assert!(lines(&buffer).is_empty());
}

#[test]
fn test_reports_match_and_mismatch() {
    let (runner, buffer) = runner("double", RunnerConfig::default());
    assert!(runner.test(10, &CallArgs::positional([5])).unwrap());
    assert!(!runner.test(11, &CallArgs::positional([5])).unwrap());

    let expected: Vec<String> = vec![
        " [IN] double(5)".into(),
        "[OUT] 10".into(),
        rule('-'),
        "[EXP] 10".into(),
        rule('='),
        " [IN] double(5)".into(),
        "[OUT] 10".into(),
        rule('-'),
        "[EXP] 11".into(),
        rule('='),
    ];
    assert_eq!(lines(&buffer), expected);
}

#[test]
fn test_answer_does_not_depend_on_printing() {
    let loud = runner("double", RunnerConfig::default()).0;
    let quiet = runner(
        "double",
        RunnerConfig {
            no_print: true,
            ..RunnerConfig::default()
        },
    );
    for (expected, n) in [(4, 2), (5, 2), (0, 0)] {
        let args = CallArgs::positional([n]);
        assert_eq!(
            loud.test(expected, &args).unwrap(),
            quiet.0.test(expected, &args).unwrap()
        );
    }
    assert!(common::lines(&quiet.1).is_empty());
}

#[test]
fn mismatched_types_are_unequal() {
    let (runner, _) = runner("double", RunnerConfig::default());
    let args = CallArgs::positional([5]);
    assert!(!runner.test(10.0, &args).unwrap());
    assert!(!runner.test("10", &args).unwrap());
}

#[test]
fn text_values_are_quoted_everywhere() {
    let (runner, buffer) = runner("shout", RunnerConfig::default());
    assert!(runner.test("HI", &CallArgs::positional(["hi"])).unwrap());
    let out = lines(&buffer);
    assert_eq!(out[0], " [IN] shout('hi')");
    assert_eq!(out[1], "[OUT] 'HI'");
    assert_eq!(out[3], "[EXP] 'HI'");
}

#[test]
fn text_with_quotes_is_echoed_as_given() {
    let (runner, buffer) = runner("shout", RunnerConfig::default());
    runner.run(&CallArgs::positional([r"it's a\b"])).unwrap();
    let out = lines(&buffer);
    assert_eq!(out[0], r" [IN] shout('it's a\b')");
    assert_eq!(out[1], r"[OUT] 'IT'S A\B'");
}

#[test]
fn named_arguments_render_after_positional() {
    let (runner, buffer) = runner("double", RunnerConfig::default());
    runner.run(&CallArgs::new().kwarg("n", 3)).unwrap();
    assert_eq!(lines(&buffer)[0], " [IN] double(n=3)");
}

#[test]
fn repeated_calls_are_identical() {
    let (runner, buffer) = runner("double", RunnerConfig::default());
    let args = CallArgs::positional([7]);
    let first = runner.test(14, &args).unwrap();
    let first_out = lines(&buffer);
    buffer.borrow_mut().clear();
    let second = runner.test(14, &args).unwrap();
    assert_eq!(first, second);
    assert_eq!(first_out, lines(&buffer));
}

#[test]
fn callable_errors_propagate_unchanged() {
    let (runner, buffer) = runner("explode", RunnerConfig::default());
    let err = runner.run(&CallArgs::new()).unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::Raised {
            func: "explode".into(),
            message: "boom".into()
        }
    );
    assert_eq!(err.diagnostic_info.error_code, "drill::callable::raised");
    assert!(lines(&buffer).is_empty());

    let err = runner.test(1, &CallArgs::new()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Raised { .. }));
}

#[test]
fn arity_errors_come_from_the_callable() {
    let (runner, _) = runner("double", RunnerConfig::default());
    let err = runner.run(&CallArgs::new()).unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::MissingArgument {
            func: "double".into(),
            param: "n".into()
        }
    );
}

#[test]
fn non_text_name_fails_before_lookup() {
    let registry = common::registry();
    let err = TestRunner::from_value(&Value::Int(3), &registry, RunnerConfig::default())
        .err()
        .unwrap();
    assert_eq!(err.kind, ErrorKind::InvalidName { found: "int".into() });

    let ok = TestRunner::from_value(&Value::from("double"), &registry, RunnerConfig::default());
    assert!(ok.is_ok());
}

#[test]
fn unknown_name_fails_at_construction() {
    let err = TestRunner::new("triple", &common::registry()).err().unwrap();
    assert_eq!(err.kind, ErrorKind::UnknownCallable { name: "triple".into() });
}

#[test]
fn rule_width_is_configurable() {
    let config = RunnerConfig {
        rule_width: 10,
        ..RunnerConfig::default()
    };
    let (runner, buffer) = runner("double", config);
    runner.run(&CallArgs::positional([1])).unwrap();
    assert_eq!(lines(&buffer)[2], "==========");
}
