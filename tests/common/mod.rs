//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use drill::errors::raised;
use drill::output::OutputBuffer;
use drill::{CallArgs, DrillError, Registry, RunnerConfig, TestRunner, Value};
use std::cell::RefCell;
use std::rc::Rc;

pub type Buffer = Rc<RefCell<OutputBuffer>>;

pub fn double(args: &CallArgs) -> Result<Value, DrillError> {
    Ok(Value::Int(args.int("double", 0, "n")? * 2))
}

pub fn shout(args: &CallArgs) -> Result<Value, DrillError> {
    Ok(Value::Str(args.text("shout", 0, "text")?.to_uppercase()))
}

pub fn explode(_: &CallArgs) -> Result<Value, DrillError> {
    Err(raised("explode", "boom"))
}

pub fn registry() -> Registry {
    let mut registry = Registry::new();
    registry.register("double", double);
    registry.register("shout", shout);
    registry.register("explode", explode);
    registry
}

/// A runner writing into a fresh buffer.
pub fn runner(name: &str, config: RunnerConfig) -> (TestRunner, Buffer) {
    let buffer = Rc::new(RefCell::new(OutputBuffer::new()));
    let runner = TestRunner::with_config(name, &registry(), config)
        .expect("fixture callable is registered")
        .with_output(buffer.clone());
    (runner, buffer)
}

pub fn lines(buffer: &Buffer) -> Vec<String> {
    buffer.borrow().lines.clone()
}

pub fn rule(key: char) -> String {
    std::iter::repeat(key).take(80).collect()
}
