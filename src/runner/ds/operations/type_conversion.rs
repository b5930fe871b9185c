use crate::runner::ds::value::Value;

pub const TYPE_STR_NIL: &str = "nil";
pub const TYPE_STR_BOOLEAN: &str = "boolean";
pub const TYPE_STR_NUMBER: &str = "number";
pub const TYPE_STR_STRING: &str = "string";
pub const TYPE_STR_FUNCTION: &str = "function";

pub fn get_type(a: &Value) -> &'static str {
    match a {
        Value::Nil => TYPE_STR_NIL,
        Value::Boolean(_) => TYPE_STR_BOOLEAN,
        Value::Number(_) => TYPE_STR_NUMBER,
        Value::String(_) => TYPE_STR_STRING,
        Value::Function(_) => TYPE_STR_FUNCTION,
    }
}

/// `nil` and `false` are falsey, everything else is truthy.
pub fn to_boolean(v: &Value) -> bool {
    !matches!(v, Value::Nil | Value::Boolean(false))
}
