//! Drill: a small trace-and-compare harness for coding-exercise functions.
//!
//! Bind a [`TestRunner`] to a callable by name, then `run` it, `test` it
//! against an expected value, or `evaluate` a [`Batch`] of cases.

pub use crate::batch::{Batch, BatchCase, Tally};
pub use crate::call::CallArgs;
pub use crate::errors::{DrillError, ErrorKind};
pub use crate::registry::{build_default_registry, Callable, Registry};
pub use crate::runner::{RunnerConfig, TestRunner};
pub use crate::value::Value;

pub mod batch;
pub mod call;
pub mod cli;
pub mod errors;
pub mod exercises;
pub mod output;
pub mod registry;
pub mod runner;
pub mod suite;
pub mod syntax;
pub mod value;
