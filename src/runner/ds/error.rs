use thiserror::Error;

use crate::parser::ast::Meta;

/// What went wrong. Every kind aborts execution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    #[error("undefined variable '{0}'")]
    UndefinedVariable(String),
    #[error("can only call functions, found {0}")]
    NotCallable(String),
    #[error("expected {expected} arguments but got {found}")]
    ArityMismatch { expected: usize, found: usize },
    #[error("type error: {0}")]
    TypeError(String),
    #[error("'{0}' is already defined in this scope")]
    Redeclaration(String),
    #[error("stack overflow: call depth exceeded {0}")]
    StackOverflow(usize),
    #[error("syntax error: {0}")]
    SyntaxError(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}{}", .kind, location_suffix(.meta))]
pub struct IxError {
    pub kind: ErrorKind,
    /// Source span of the node that failed, when known.
    pub meta: Option<Meta>,
}

fn location_suffix(meta: &Option<Meta>) -> String {
    match meta {
        Some(meta) => format!(" at {}..{}", meta.start_index, meta.end_index),
        None => String::new(),
    }
}

impl IxError {
    pub fn new(kind: ErrorKind) -> Self {
        IxError { kind, meta: None }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        IxError::new(ErrorKind::TypeError(message.into()))
    }

    pub fn at(mut self, meta: &Meta) -> Self {
        self.meta = Some(*meta);
        self
    }

    /// Attaches `meta` only if no inner node has claimed the error yet.
    pub fn or_at(mut self, meta: &Meta) -> Self {
        if self.meta.is_none() {
            self.meta = Some(*meta);
        }
        self
    }
}

impl From<ErrorKind> for IxError {
    fn from(kind: ErrorKind) -> Self {
        IxError::new(kind)
    }
}
