//! Argument-text syntax: the pest grammar and the parser built on it.

pub mod parser;

pub use parser::{parse_arguments, parse_arguments_in, parse_value};
