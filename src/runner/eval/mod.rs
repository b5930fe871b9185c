//! Evaluation of the AST against a chain of environments.

pub mod context;
pub mod expression;
pub mod function;
pub mod statement;
pub mod types;

pub use context::EvalContext;
pub use types::{Completion, CompletionType, EvalResult, ValueResult};
