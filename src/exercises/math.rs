//! # Numeric Exercises
//!
//! ## Exercises Provided
//!
//! - **Arithmetic**: `double`, `add`, `square`
//! - **Integer**: `factorial`, `is_even`, `fizzbuzz`
//! - **Aggregates**: `maximum`, `sum_list`
//!
//! Int arguments produce int results; a float anywhere produces a float.

use super::check_params;
use crate::call::CallArgs;
use crate::errors::{invalid_operation, type_mismatch, DrillError};
use crate::registry::{Callable, Registry};
use crate::value::Value;

// ============================================================================
// NUMERIC HELPERS
// ============================================================================

fn number<'a>(args: &'a CallArgs, func: &str, index: usize, name: &str) -> Result<&'a Value, DrillError> {
    let value = args.require(func, index, name)?;
    match value {
        Value::Int(_) | Value::Float(_) => Ok(value),
        other => Err(type_mismatch(func, name, "number", other.type_name())),
    }
}

fn overflow(func: &str) -> DrillError {
    invalid_operation(func, "result does not fit in an int")
}

/// Applies `int_op` when both operands are ints, `float_op` otherwise.
fn combine(
    func: &str,
    a: &Value,
    b: &Value,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Value, DrillError> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => int_op(*x, *y).map(Value::Int).ok_or_else(|| overflow(func)),
        _ => {
            // both already checked numeric by `number`
            let x = a.as_float().unwrap_or_default();
            let y = b.as_float().unwrap_or_default();
            Ok(Value::Float(float_op(x, y)))
        }
    }
}

// ============================================================================
// ARITHMETIC
// ============================================================================

/// Doubles a number.
///
/// Usage: double(n)
///
/// Example:
///   double(5) ; => 10
pub const DOUBLE: Callable = |args| {
    check_params("double", args, &["n"])?;
    let n = number(args, "double", 0, "n")?;
    combine("double", n, n, i64::checked_add, |x, y| x + y)
};

/// Adds two numbers.
///
/// Usage: add(a, b)
///
/// Example:
///   add(2, 3) ; => 5
pub const ADD: Callable = |args| {
    check_params("add", args, &["a", "b"])?;
    let a = number(args, "add", 0, "a")?;
    let b = number(args, "add", 1, "b")?;
    combine("add", a, b, i64::checked_add, |x, y| x + y)
};

/// Squares a number.
///
/// Usage: square(n)
pub const SQUARE: Callable = |args| {
    check_params("square", args, &["n"])?;
    let n = number(args, "square", 0, "n")?;
    combine("square", n, n, i64::checked_mul, |x, y| x * y)
};

// ============================================================================
// INTEGER EXERCISES
// ============================================================================

/// Computes n!.
///
/// Usage: factorial(n)
///   - n: non-negative int
///
/// Example:
///   factorial(5) ; => 120
pub const FACTORIAL: Callable = |args| {
    check_params("factorial", args, &["n"])?;
    let n = args.int("factorial", 0, "n")?;
    if n < 0 {
        return Err(invalid_operation(
            "factorial",
            format!("not defined for negative values, got {}", n),
        ));
    }
    (1..=n)
        .try_fold(1i64, |acc, k| acc.checked_mul(k))
        .map(Value::Int)
        .ok_or_else(|| overflow("factorial"))
};

/// Usage: is_even(n)
pub const IS_EVEN: Callable = |args| {
    check_params("is_even", args, &["n"])?;
    let n = args.int("is_even", 0, "n")?;
    Ok(Value::Bool(n % 2 == 0))
};

/// The classic: 'Fizz' for multiples of 3, 'Buzz' for 5, 'FizzBuzz' for both,
/// otherwise the number as text.
///
/// Usage: fizzbuzz(n)
pub const FIZZBUZZ: Callable = |args| {
    check_params("fizzbuzz", args, &["n"])?;
    let n = args.int("fizzbuzz", 0, "n")?;
    let text = match (n % 3 == 0, n % 5 == 0) {
        (true, true) => "FizzBuzz".to_string(),
        (true, false) => "Fizz".to_string(),
        (false, true) => "Buzz".to_string(),
        (false, false) => n.to_string(),
    };
    Ok(Value::Str(text))
};

// ============================================================================
// AGGREGATES
// ============================================================================

fn numeric_items<'a>(func: &str, items: &'a [Value]) -> Result<&'a [Value], DrillError> {
    match items.iter().find(|v| v.as_float().is_none()) {
        Some(bad) => Err(type_mismatch(func, "numbers", "list of numbers", &format!("list containing {}", bad.type_name()))),
        None => Ok(items),
    }
}

/// Largest item of a non-empty list of numbers.
///
/// Usage: maximum(numbers)
pub const MAXIMUM: Callable = |args| {
    check_params("maximum", args, &["numbers"])?;
    let items = numeric_items("maximum", args.list("maximum", 0, "numbers")?)?;
    let mut iter = items.iter();
    let Some(first) = iter.next() else {
        return Err(invalid_operation("maximum", "arg is an empty list"));
    };
    let best = iter.fold(first, |best, item| {
        if item.as_float() > best.as_float() {
            item
        } else {
            best
        }
    });
    Ok(best.clone())
};

/// Sum of a list of numbers; an empty list sums to 0.
///
/// Usage: sum_list(numbers)
pub const SUM_LIST: Callable = |args| {
    check_params("sum_list", args, &["numbers"])?;
    let items = numeric_items("sum_list", args.list("sum_list", 0, "numbers")?)?;
    items.iter().try_fold(Value::Int(0), |acc, item| {
        combine("sum_list", &acc, item, i64::checked_add, |x, y| x + y)
    })
};

pub fn register_math_exercises(registry: &mut Registry) {
    registry.register("double", DOUBLE);
    registry.register("add", ADD);
    registry.register("square", SQUARE);
    registry.register("factorial", FACTORIAL);
    registry.register("is_even", IS_EVEN);
    registry.register("fizzbuzz", FIZZBUZZ);
    registry.register("maximum", MAXIMUM);
    registry.register("sum_list", SUM_LIST);
}
