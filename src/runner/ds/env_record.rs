use std::collections::HashMap;

use crate::runner::ds::value::Value;

pub trait EnvironmentRecord {
    fn has_binding(&self, name: &str) -> bool;
    /// Creates or replaces the binding for `name`.
    fn create_binding(&mut self, name: String, value: Value);
    /// Overwrites an existing binding. Returns `false` if `name` is not bound here.
    fn set_mutable_binding(&mut self, name: &str, value: Value) -> bool;
    fn get_binding_value(&self, name: &str) -> Option<Value>;
    fn binding_names(&self) -> Vec<String>;
}

pub enum EnvironmentRecordType {
    Declarative(DeclarativeEnvironmentRecord),
    Function(FunctionEnvironmentRecord),
}

impl EnvironmentRecordType {
    pub fn as_env_record(&self) -> &dyn EnvironmentRecord {
        match self {
            EnvironmentRecordType::Declarative(d) => d,
            EnvironmentRecordType::Function(d) => d,
        }
    }

    pub fn as_env_record_mut(&mut self) -> &mut dyn EnvironmentRecord {
        match self {
            EnvironmentRecordType::Declarative(d) => d,
            EnvironmentRecordType::Function(d) => d,
        }
    }
}

#[derive(Default)]
pub struct DeclarativeEnvironmentRecord {
    bindings: HashMap<String, Value>,
}

impl DeclarativeEnvironmentRecord {
    pub fn new() -> Self {
        DeclarativeEnvironmentRecord {
            bindings: HashMap::new(),
        }
    }
}

impl EnvironmentRecord for DeclarativeEnvironmentRecord {
    fn has_binding(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    fn create_binding(&mut self, name: String, value: Value) {
        self.bindings.insert(name, value);
    }

    fn set_mutable_binding(&mut self, name: &str, value: Value) -> bool {
        match self.bindings.get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    fn get_binding_value(&self, name: &str) -> Option<Value> {
        self.bindings.get(name).cloned()
    }

    fn binding_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.bindings.keys().cloned().collect();
        names.sort();
        names
    }
}

/// The record of a call frame. Holds the parameters and the body's
/// top-level declarations.
pub struct FunctionEnvironmentRecord {
    base: DeclarativeEnvironmentRecord,
    pub function_name: Option<String>,
}

impl FunctionEnvironmentRecord {
    pub fn new(function_name: Option<String>) -> Self {
        FunctionEnvironmentRecord {
            base: DeclarativeEnvironmentRecord::new(),
            function_name,
        }
    }
}

impl EnvironmentRecord for FunctionEnvironmentRecord {
    fn has_binding(&self, name: &str) -> bool {
        self.base.has_binding(name)
    }

    fn create_binding(&mut self, name: String, value: Value) {
        self.base.create_binding(name, value)
    }

    fn set_mutable_binding(&mut self, name: &str, value: Value) -> bool {
        self.base.set_mutable_binding(name, value)
    }

    fn get_binding_value(&self, name: &str) -> Option<Value> {
        self.base.get_binding_value(name)
    }

    fn binding_names(&self) -> Vec<String> {
        self.base.binding_names()
    }
}
