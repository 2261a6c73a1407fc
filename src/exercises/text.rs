//! # Text Exercises
//!
//! - **`reverse`**: text backwards, or a list in reverse order
//! - **`is_palindrome`**: ignores case and anything that is not alphanumeric
//! - **`count_vowels`**, **`greet`**, **`repeat`**

use super::check_params;
use crate::errors::{invalid_operation, type_mismatch};
use crate::registry::{Callable, Registry};
use crate::value::Value;

/// Usage: reverse(seq)
///   - seq: str or list
///
/// Example:
///   reverse('abc') ; => 'cba'
pub const REVERSE: Callable = |args| {
    check_params("reverse", args, &["seq"])?;
    match args.require("reverse", 0, "seq")? {
        Value::Str(s) => Ok(Value::Str(s.chars().rev().collect())),
        Value::List(items) => Ok(Value::List(items.iter().rev().cloned().collect())),
        other => Err(type_mismatch("reverse", "seq", "str or list", other.type_name())),
    }
};

/// Usage: is_palindrome(text)
///
/// Example:
///   is_palindrome('A man, a plan, a canal: Panama') ; => true
pub const IS_PALINDROME: Callable = |args| {
    check_params("is_palindrome", args, &["text"])?;
    let text = args.text("is_palindrome", 0, "text")?;
    let cleaned: Vec<char> = text
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();
    Ok(Value::Bool(cleaned.iter().eq(cleaned.iter().rev())))
};

/// Usage: count_vowels(text)
pub const COUNT_VOWELS: Callable = |args| {
    check_params("count_vowels", args, &["text"])?;
    let text = args.text("count_vowels", 0, "text")?;
    let count = text
        .chars()
        .filter(|c| matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'))
        .count();
    Ok(Value::Int(count as i64))
};

/// Usage: greet(name, greeting='Hello')
///
/// Example:
///   greet('Ada', greeting='Hi') ; => 'Hi, Ada!'
pub const GREET: Callable = |args| {
    check_params("greet", args, &["name", "greeting"])?;
    let name = args.text("greet", 0, "name")?;
    let greeting = match args.bind(1, "greeting") {
        Some(_) => args.text("greet", 1, "greeting")?,
        None => "Hello",
    };
    Ok(Value::Str(format!("{}, {}!", greeting, name)))
};

/// Longest text `repeat` will build, in bytes.
pub const MAX_REPEAT_LEN: usize = 1 << 24;

/// Usage: repeat(text, times)
///   - times: int; zero or negative yields ''
///
/// Fails when the result would exceed [`MAX_REPEAT_LEN`] bytes.
pub const REPEAT: Callable = |args| {
    check_params("repeat", args, &["text", "times"])?;
    let text = args.text("repeat", 0, "text")?;
    let times = args.int("repeat", 1, "times")?;
    let times = usize::try_from(times.max(0)).unwrap_or(usize::MAX);
    match text.len().checked_mul(times) {
        Some(len) if len <= MAX_REPEAT_LEN => Ok(Value::Str(text.repeat(times))),
        _ => Err(invalid_operation("repeat", "result too large")),
    }
};

pub fn register_text_exercises(registry: &mut Registry) {
    registry.register("reverse", REVERSE);
    registry.register("is_palindrome", IS_PALINDROME);
    registry.register("count_vowels", COUNT_VOWELS);
    registry.register("greet", GREET);
    registry.register("repeat", REPEAT);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call::CallArgs;
    use crate::errors::ErrorKind;

    #[test]
    fn reverse_text_and_lists() {
        assert_eq!(REVERSE(&CallArgs::positional(["abc"])).unwrap(), Value::from("cba"));
        let list = CallArgs::new().arg(vec![1, 2, 3]);
        assert_eq!(REVERSE(&list).unwrap(), Value::from(vec![3, 2, 1]));
        assert!(REVERSE(&CallArgs::positional([1])).is_err());
    }

    #[test]
    fn palindromes() {
        let check = |s: &str| IS_PALINDROME(&CallArgs::positional([s])).unwrap();
        assert_eq!(check("A man, a plan, a canal: Panama"), Value::Bool(true));
        assert_eq!(check("drill"), Value::Bool(false));
        assert_eq!(check(""), Value::Bool(true));
    }

    #[test]
    fn greet_uses_default_greeting() {
        assert_eq!(GREET(&CallArgs::positional(["Ada"])).unwrap(), Value::from("Hello, Ada!"));
        let args = CallArgs::positional(["Ada"]).kwarg("greeting", "Hi");
        assert_eq!(GREET(&args).unwrap(), Value::from("Hi, Ada!"));
    }

    #[test]
    fn repeat_and_count() {
        let args = CallArgs::new().arg("ab").arg(3);
        assert_eq!(REPEAT(&args).unwrap(), Value::from("ababab"));
        let args = CallArgs::new().arg("ab").arg(-1);
        assert_eq!(REPEAT(&args).unwrap(), Value::from(""));
        assert_eq!(COUNT_VOWELS(&CallArgs::positional(["Education"])).unwrap(), Value::Int(5));
    }

    #[test]
    fn repeat_refuses_oversized_results() {
        let args = CallArgs::new().arg("ab").arg(Value::Int(i64::MAX));
        let err = REPEAT(&args).unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::InvalidOperation {
                func: "repeat".into(),
                reason: "result too large".into(),
            }
        );
        let args = CallArgs::new().arg("a").arg((MAX_REPEAT_LEN + 1) as i64);
        assert!(REPEAT(&args).is_err());
        // empty text never grows
        let args = CallArgs::new().arg("").arg(Value::Int(i64::MAX));
        assert_eq!(REPEAT(&args).unwrap(), Value::from(""));
    }

    #[test]
    fn greet_rejects_name_given_twice() {
        let args = CallArgs::positional(["Ada"]).kwarg("name", "Bob");
        let err = GREET(&args).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Raised { .. }));
    }
}
