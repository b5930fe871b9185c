//! Core built-ins registration.

use crate::runner::ds::function_object::{FunctionObject, NativeFn};
use crate::runner::ds::lex_env::Environment;
use crate::runner::ds::value::Value;

use super::string;
use super::system;

#[derive(Clone, Copy)]
pub struct BuiltinEntry {
    pub name: &'static str,
    pub arity: usize,
    pub func: NativeFn,
}

lazy_static! {
    static ref CORE_BUILTINS: Vec<BuiltinEntry> = {
        let mut entries = vec![];
        entries.extend_from_slice(string::BUILTINS);
        entries.extend_from_slice(system::BUILTINS);
        entries
    };
}

/// Installs every core native into `env`, replacing any existing binding of
/// the same name.
pub fn register_core_builtins(env: &Environment) {
    for entry in CORE_BUILTINS.iter() {
        env.define_builtin(
            entry.name,
            Value::Function(FunctionObject::new_native(
                entry.name,
                entry.arity,
                entry.func,
            )),
        );
    }
}

pub fn builtin_names() -> Vec<&'static str> {
    CORE_BUILTINS.iter().map(|e| e.name).collect()
}
