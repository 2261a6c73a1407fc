//! Batch cases: argument-text mapped to an expected value.

use crate::value::Value;
use serde::Serialize;

/// One entry of a [`Batch`].
#[derive(Debug, Clone, PartialEq)]
pub struct BatchCase {
    /// Literal rendering of the call's arguments, e.g. `'abc', 3`.
    pub arguments: String,
    pub expected: Value,
}

/// An insertion-ordered mapping from argument-text to expected value.
///
/// Keys are unique: inserting an existing argument-text replaces its expected
/// value in place.
///
/// ```rust
/// use drill::{Batch, Value};
/// let batch: Batch = [("5", 10), ("3", 5), ("5", 11)].into_iter().collect();
/// assert_eq!(batch.len(), 2);
/// assert_eq!(batch.get("5"), Some(&Value::Int(11)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    cases: Vec<BatchCase>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, arguments: impl Into<String>, expected: impl Into<Value>) {
        let arguments = arguments.into();
        let expected = expected.into();
        match self.cases.iter_mut().find(|c| c.arguments == arguments) {
            Some(case) => case.expected = expected,
            None => self.cases.push(BatchCase {
                arguments,
                expected,
            }),
        }
    }

    /// Builder form of [`Batch::insert`].
    pub fn case(mut self, arguments: impl Into<String>, expected: impl Into<Value>) -> Self {
        self.insert(arguments, expected);
        self
    }

    pub fn get(&self, arguments: &str) -> Option<&Value> {
        self.find(arguments).map(|c| &c.expected)
    }

    pub(crate) fn find(&self, arguments: &str) -> Option<&BatchCase> {
        self.cases.iter().find(|c| c.arguments == arguments)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BatchCase> {
        self.cases.iter()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Batch {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut batch = Batch::new();
        for (k, v) in iter {
            batch.insert(k, v);
        }
        batch
    }
}

impl<'a> IntoIterator for &'a Batch {
    type Item = &'a BatchCase;
    type IntoIter = std::slice::Iter<'a, BatchCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pass count over a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub passed: usize,
    pub total: usize,
}

impl Tally {
    pub fn failed(&self) -> usize {
        self.total - self.passed
    }

    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }

    /// The summary line printed after a batch.
    pub fn summary(&self) -> String {
        format!("{}/{} test(s) passed.", self.passed, self.total)
    }
}
