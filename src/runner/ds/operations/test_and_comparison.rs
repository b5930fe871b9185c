use std::cmp::Ordering;

use crate::runner::ds::value::{NumberType, Value};

/// The language's `==`. Numbers compare by numeric value across integer and
/// float, functions by identity, everything else structurally. Values of
/// different types are never equal.
pub fn strict_equality(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Nil, Value::Nil) => true,
        (Value::Boolean(x), Value::Boolean(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y) == Some(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Function(x), Value::Function(y)) => x.ptr_eq(y),
        _ => false,
    }
}

pub fn compare_numbers(a: &NumberType, b: &NumberType) -> Option<Ordering> {
    match (a, b) {
        (NumberType::Integer(x), NumberType::Integer(y)) => Some(x.cmp(y)),
        _ => a.as_f64().partial_cmp(&b.as_f64()),
    }
}
