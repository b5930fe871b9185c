//! Core types for the evaluation engine.

use crate::runner::ds::error::IxError;
use crate::runner::ds::value::Value;

/// Completion record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionType {
    /// Execution continues with the next statement.
    Normal,
    /// A `return` is unwinding to the nearest call (or ending the program).
    Return,
}

/// Completion record.
/// Every statement evaluation returns one; `return` travels outward as a
/// value rather than as an error.
#[derive(Debug, Clone)]
pub struct Completion {
    pub completion_type: CompletionType,
    pub value: Option<Value>,
}

impl Completion {
    pub fn normal() -> Self {
        Completion {
            completion_type: CompletionType::Normal,
            value: None,
        }
    }

    pub fn return_value(value: Value) -> Self {
        Completion {
            completion_type: CompletionType::Return,
            value: Some(value),
        }
    }

    pub fn is_normal(&self) -> bool {
        self.completion_type == CompletionType::Normal
    }

    /// Check if this is an abrupt completion (not normal).
    pub fn is_abrupt(&self) -> bool {
        !self.is_normal()
    }

    /// Get the value, or nil if none.
    pub fn get_value(&self) -> Value {
        self.value.clone().unwrap_or(Value::Nil)
    }
}

/// Result type for statement execution.
pub type EvalResult = Result<Completion, IxError>;

/// Result type for value-returning operations.
pub type ValueResult = Result<Value, IxError>;
