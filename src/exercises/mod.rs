//! # Exercise Library
//!
//! The callables a curriculum's exercises are checked against. Every exercise
//! is a plain [`Callable`](crate::registry::Callable); none holds state.
//!
//! ## Module Structure
//!
//! - **`math`**: numeric exercises (`double`, `add`, `square`, `factorial`, ...)
//! - **`text`**: string and list exercises (`reverse`, `is_palindrome`, `greet`, ...)

use crate::call::CallArgs;
use crate::errors::{arity_mismatch, raised, DrillError};
use crate::registry::Registry;

pub mod math;
pub mod text;

/// Registers every exercise with the given registry.
pub fn register_all_exercises(registry: &mut Registry) {
    math::register_math_exercises(registry);
    text::register_text_exercises(registry);
}

// ============================================================================
// SHARED HELPERS
// ============================================================================

/// Fails when more arguments were supplied than `params` names, when a named
/// argument matches none of them, or when a named argument repeats a parameter
/// already bound by position.
pub(crate) fn check_params(func: &str, args: &CallArgs, params: &[&str]) -> Result<(), DrillError> {
    if args.positional.len() > params.len() {
        return Err(arity_mismatch(func, format!("at most {}", params.len()), args.len()));
    }
    for (name, _) in &args.named {
        match params.iter().position(|p| *p == name.as_str()) {
            None => {
                return Err(raised(
                    func,
                    format!("got an unexpected keyword argument '{}'", name),
                ))
            }
            Some(index) if index < args.positional.len() => {
                return Err(raised(
                    func,
                    format!("got multiple values for argument '{}'", name),
                ))
            }
            Some(_) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn named_argument_may_fill_a_later_parameter() {
        let args = CallArgs::positional(["Ada"]).kwarg("greeting", "Hi");
        assert!(check_params("greet", &args, &["name", "greeting"]).is_ok());
    }

    #[test]
    fn named_argument_cannot_rebind_a_positional_one() {
        let args = CallArgs::positional([5]).kwarg("n", 6);
        let err = check_params("double", &args, &["n"]).unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::Raised {
                func: "double".into(),
                message: "got multiple values for argument 'n'".into(),
            }
        );
    }

    #[test]
    fn unknown_keyword_is_rejected() {
        let args = CallArgs::positional([5]).kwarg("m", 6);
        let err = check_params("double", &args, &["n"]).unwrap_err();
        assert!(err.to_string().contains("unexpected keyword argument 'm'"));
    }

    #[test]
    fn too_many_positionals_is_an_arity_error() {
        let err = check_params("double", &CallArgs::positional([1, 2]), &["n"]).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ArityMismatch { .. }));
    }
}
