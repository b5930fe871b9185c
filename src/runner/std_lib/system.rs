use std::time::{SystemTime, UNIX_EPOCH};

use crate::runner::ds::value::{NumberType, Value};
use crate::runner::eval::context::EvalContext;
use crate::runner::eval::types::ValueResult;

use super::core::BuiltinEntry;

pub(super) const BUILTINS: &[BuiltinEntry] = &[
    BuiltinEntry {
        name: "time",
        arity: 0,
        func: native_time,
    },
    BuiltinEntry {
        name: "type_of",
        arity: 1,
        func: native_type_of,
    },
];

/// time() - milliseconds since the Unix epoch.
fn native_time(_ctx: &mut EvalContext<'_>, _args: Vec<Value>) -> ValueResult {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0);
    Ok(Value::Number(NumberType::Integer(millis)))
}

fn native_type_of(_ctx: &mut EvalContext<'_>, args: Vec<Value>) -> ValueResult {
    Ok(Value::String(
        args.first().map(|v| v.type_name()).unwrap_or("nil").to_string(),
    ))
}
