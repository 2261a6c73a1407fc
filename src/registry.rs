//! # Callable Registry
//!
//! Maps a callable's name, as text, to the function that implements it. This
//! is how a [`TestRunner`](crate::runner::TestRunner) turns "the function
//! called `double`" into something it can invoke.
//!
//! ## Usage Workflow
//! ```rust
//! use drill::registry::{build_default_registry, Registry};
//! use drill::{CallArgs, Value};
//!
//! let mut registry = build_default_registry();
//! registry.register("triple", |args: &CallArgs| {
//!     Ok(Value::Int(args.int("triple", 0, "n")? * 3))
//! });
//! assert!(registry.has("double"));
//! assert!(registry.has("triple"));
//! ```
//!
//! ## Registry Invariant
//! A registry is built once by the caller and passed by reference to every
//! runner constructed from it. Runners resolve their callable at construction
//! and never consult a hidden or global registry.

use crate::call::CallArgs;
use crate::errors::{DrillError, ErrorKind};
use crate::exercises;
use crate::value::Value;
use im::HashMap;

// ============================================================================
// CORE TYPES
// ============================================================================

/// A target callable: receives one invocation's arguments and returns a value
/// or raises an error.
pub type Callable = fn(&CallArgs) -> Result<Value, DrillError>;

/// Registry for all callables, inspectable at runtime.
#[derive(Default, Clone)]
pub struct Registry {
    callables: HashMap<String, Callable>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Callable> {
        self.callables.get(name).copied()
    }

    /// Looks a callable up, failing with `UnknownCallable` when it is missing.
    pub fn resolve(&self, name: &str) -> Result<Callable, DrillError> {
        self.get(name).ok_or_else(|| {
            let err = DrillError::new(ErrorKind::UnknownCallable { name: name.into() });
            match self.closest(name) {
                Some(near) => err.with_help(format!("did you mean '{}'?", near)),
                None => err,
            }
        })
    }

    /// Registered names, sorted.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.callables.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn register(&mut self, name: &str, func: Callable) {
        self.callables.insert(name.to_string(), func);
    }

    pub fn remove(&mut self, name: &str) -> Option<Callable> {
        self.callables.remove(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.callables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.callables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callables.is_empty()
    }

    // A registered name sharing a prefix or differing only in case.
    fn closest(&self, name: &str) -> Option<String> {
        let lower = name.to_lowercase();
        self.list().into_iter().find(|candidate| {
            let cand = candidate.to_lowercase();
            cand == lower || (lower.len() >= 3 && cand.starts_with(&lower))
        })
    }
}

/// Builds a registry with the standard exercise library registered.
///
/// # Example
/// ```rust
/// use drill::registry::build_default_registry;
/// let registry = build_default_registry();
/// assert!(!registry.is_empty());
/// ```
pub fn build_default_registry() -> Registry {
    let mut registry = Registry::new();
    exercises::register_all_exercises(&mut registry);
    registry
}
