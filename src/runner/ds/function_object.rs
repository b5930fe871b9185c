use std::fmt;
use std::rc::Rc;

use crate::parser::ast::FunctionData;
use crate::runner::ds::lex_env::Environment;
use crate::runner::ds::value::Value;
use crate::runner::eval::context::EvalContext;
use crate::runner::eval::types::ValueResult;

pub type NativeFn = fn(&mut EvalContext<'_>, Vec<Value>) -> ValueResult;

/// A function's code paired with the environment it was created in.
pub struct Closure {
    pub def: Rc<FunctionData>,
    /// Captured by reference; every call's frame is a child of this.
    pub environment: Environment,
}

pub struct NativeFunction {
    pub name: &'static str,
    pub arity: usize,
    pub func: NativeFn,
}

#[derive(Clone)]
pub enum FunctionObject {
    Closure(Rc<Closure>),
    Native(Rc<NativeFunction>),
}

impl FunctionObject {
    pub fn new_closure(def: Rc<FunctionData>, environment: Environment) -> Self {
        FunctionObject::Closure(Rc::new(Closure { def, environment }))
    }

    pub fn new_native(name: &'static str, arity: usize, func: NativeFn) -> Self {
        FunctionObject::Native(Rc::new(NativeFunction { name, arity, func }))
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            FunctionObject::Closure(c) => c.def.name(),
            FunctionObject::Native(n) => Some(n.name),
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            FunctionObject::Closure(c) => c.def.params.len(),
            FunctionObject::Native(n) => n.arity,
        }
    }

    pub fn ptr_eq(&self, other: &FunctionObject) -> bool {
        match (self, other) {
            (FunctionObject::Closure(a), FunctionObject::Closure(b)) => Rc::ptr_eq(a, b),
            (FunctionObject::Native(a), FunctionObject::Native(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for FunctionObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionObject::Closure(_) => match self.name() {
                Some(name) => write!(f, "<fn {}>", name),
                None => write!(f, "<fn>"),
            },
            FunctionObject::Native(n) => write!(f, "<native fn {}>", n.name),
        }
    }
}
