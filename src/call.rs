//! Invocation records and call rendering.
//!
//! A [`CallArgs`] is everything one call of a target callable receives: ordered
//! positional arguments and ordered named arguments. The rendering helpers
//! here produce the echo text shown in traces, e.g. `greet('Ada', greeting='Hi')`.

use crate::errors::{missing_argument, type_mismatch, DrillError};
use crate::value::Value;

/// Positional and named arguments for one invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    pub positional: Vec<Value>,
    pub named: Vec<(String, Value)>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds positional-only arguments.
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            positional: values.into_iter().map(Into::into).collect(),
            named: Vec::new(),
        }
    }

    /// Appends a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Sets a named argument, replacing an earlier one with the same name.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.named.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.named.push((name, value)),
        }
        self
    }

    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    pub fn named_value(&self, name: &str) -> Option<&Value> {
        self.named.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    // ------------------------------------------------------------------------
    // Parameter binding for callables
    // ------------------------------------------------------------------------

    /// Binds parameter `name` at position `index`: the positional argument when
    /// there is one, otherwise the named argument of that name. Callables
    /// reject a parameter given both ways before binding.
    pub fn bind(&self, index: usize, name: &str) -> Option<&Value> {
        self.positional
            .get(index)
            .or_else(|| self.named_value(name))
    }

    pub fn require(&self, func: &str, index: usize, name: &str) -> Result<&Value, DrillError> {
        self.bind(index, name)
            .ok_or_else(|| missing_argument(func, name))
    }

    pub fn int(&self, func: &str, index: usize, name: &str) -> Result<i64, DrillError> {
        let value = self.require(func, index, name)?;
        value
            .as_int()
            .ok_or_else(|| type_mismatch(func, name, "int", value.type_name()))
    }

    pub fn text(&self, func: &str, index: usize, name: &str) -> Result<&str, DrillError> {
        let value = self.require(func, index, name)?;
        value
            .as_str()
            .ok_or_else(|| type_mismatch(func, name, "str", value.type_name()))
    }

    pub fn list(&self, func: &str, index: usize, name: &str) -> Result<&[Value], DrillError> {
        let value = self.require(func, index, name)?;
        value
            .as_list()
            .ok_or_else(|| type_mismatch(func, name, "list", value.type_name()))
    }
}

// ============================================================================
// RENDERING
// ============================================================================

/// Comma-joined positional arguments, text values quoted.
pub(crate) fn render_positional(values: &[Value]) -> String {
    values
        .iter()
        .map(Value::repr)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Comma-joined `name=value` pairs, text values quoted.
pub(crate) fn render_named(named: &[(String, Value)]) -> String {
    named
        .iter()
        .map(|(k, v)| format!("{}={}", k, v.repr()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// The echo of a call: `name(positional, named)`.
pub(crate) fn render_call(name: &str, args: &CallArgs) -> String {
    let parts: Vec<String> = [
        render_positional(&args.positional),
        render_named(&args.named),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect();
    format!("{}({})", name, parts.join(", "))
}
