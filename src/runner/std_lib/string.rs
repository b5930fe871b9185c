use crate::runner::ds::value::{NumberType, Value};
use crate::runner::ds::error::IxError;
use crate::runner::eval::context::EvalContext;
use crate::runner::eval::types::ValueResult;

use super::core::BuiltinEntry;

pub(super) const BUILTINS: &[BuiltinEntry] = &[
    BuiltinEntry {
        name: "str",
        arity: 1,
        func: native_str,
    },
    BuiltinEntry {
        name: "len",
        arity: 1,
        func: native_len,
    },
];

/// str(value) - the value's printed form.
fn native_str(_ctx: &mut EvalContext<'_>, args: Vec<Value>) -> ValueResult {
    Ok(Value::String(
        args.first().map(|v| v.to_string()).unwrap_or_default(),
    ))
}

/// len(string) - character count.
fn native_len(_ctx: &mut EvalContext<'_>, args: Vec<Value>) -> ValueResult {
    match args.first() {
        Some(Value::String(s)) => Ok(Value::Number(NumberType::Integer(
            s.chars().count() as i64,
        ))),
        Some(other) => Err(IxError::type_error(format!(
            "len expects a string, found {}",
            other.type_name()
        ))),
        None => Err(IxError::type_error("len expects a string")),
    }
}
