use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::trace;
use uuid::Uuid;

use crate::runner::config::RedeclarationPolicy;
use crate::runner::ds::env_record::{
    DeclarativeEnvironmentRecord, EnvironmentRecordType, FunctionEnvironmentRecord,
};
use crate::runner::ds::error::{ErrorKind, IxError};
use crate::runner::ds::value::Value;

pub struct LexEnvironment {
    pub id: Uuid,
    pub inner: EnvironmentRecordType,
    pub outer: Option<Environment>,
    policy: RedeclarationPolicy,
}

/// Shared handle to one scope in a scope chain.
///
/// Cloning the handle does not copy bindings: every clone sees every
/// `define` and `assign` made through any other. Closures keep their
/// defining scope alive this way after the frame that created it is gone.
#[derive(Clone)]
pub struct Environment(Rc<RefCell<LexEnvironment>>);

impl Environment {
    /// A root scope with no parent.
    pub fn new_global(policy: RedeclarationPolicy) -> Self {
        Environment::with_record(
            EnvironmentRecordType::Declarative(DeclarativeEnvironmentRecord::new()),
            None,
            policy,
        )
    }

    fn with_record(
        record: EnvironmentRecordType,
        outer: Option<Environment>,
        policy: RedeclarationPolicy,
    ) -> Self {
        let env = Environment(Rc::new(RefCell::new(LexEnvironment {
            id: Uuid::new_v4(),
            inner: record,
            outer,
            policy,
        })));
        trace!(env = %env.id(), depth = env.depth(), "created environment");
        env
    }

    /// A new, empty scope whose parent is `self`. Used for blocks.
    pub fn child_scope(&self) -> Environment {
        Environment::with_record(
            EnvironmentRecordType::Declarative(DeclarativeEnvironmentRecord::new()),
            Some(self.clone()),
            self.policy(),
        )
    }

    /// A call frame whose parent is `self` (the callee's captured scope).
    pub fn new_function_scope(&self, function_name: Option<&str>) -> Environment {
        Environment::with_record(
            EnvironmentRecordType::Function(FunctionEnvironmentRecord::new(
                function_name.map(str::to_string),
            )),
            Some(self.clone()),
            self.policy(),
        )
    }

    pub fn define(&self, name: &str, value: Value) -> Result<(), IxError> {
        let mut env = self.0.borrow_mut();
        if env.policy == RedeclarationPolicy::Forbid
            && env.inner.as_env_record().has_binding(name)
        {
            return Err(IxError::new(ErrorKind::Redeclaration(name.to_string())));
        }
        env.inner
            .as_env_record_mut()
            .create_binding(name.to_string(), value);
        Ok(())
    }

    /// Binds `name` here regardless of the redeclaration policy. Used when
    /// the host installs natives.
    pub fn define_builtin(&self, name: &str, value: Value) {
        self.0
            .borrow_mut()
            .inner
            .as_env_record_mut()
            .create_binding(name.to_string(), value);
    }

    /// Resolves `name` in the nearest scope that binds it.
    pub fn get(&self, name: &str) -> Result<Value, IxError> {
        let mut current = self.clone();
        loop {
            let outer = {
                let env = current.0.borrow();
                if let Some(value) = env.inner.as_env_record().get_binding_value(name) {
                    return Ok(value);
                }
                env.outer.clone()
            };
            match outer {
                Some(outer) => current = outer,
                None => return Err(IxError::new(ErrorKind::UndefinedVariable(name.to_string()))),
            }
        }
    }

    /// Overwrites the slot in the nearest scope that binds `name`. Never
    /// creates a binding.
    pub fn assign(&self, name: &str, value: Value) -> Result<(), IxError> {
        let mut current = self.clone();
        loop {
            let outer = {
                let mut env = current.0.borrow_mut();
                if env.inner.as_env_record().has_binding(name) {
                    env.inner.as_env_record_mut().set_mutable_binding(name, value);
                    return Ok(());
                }
                env.outer.clone()
            };
            match outer {
                Some(outer) => current = outer,
                None => return Err(IxError::new(ErrorKind::UndefinedVariable(name.to_string()))),
            }
        }
    }

    /// Whether `name` is bound in this scope, ignoring parents.
    pub fn has_binding(&self, name: &str) -> bool {
        self.0.borrow().inner.as_env_record().has_binding(name)
    }

    /// Number of parents between this scope and the root.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.outer();
        while let Some(env) = current {
            depth += 1;
            current = env.outer();
        }
        depth
    }

    pub fn id(&self) -> Uuid {
        self.0.borrow().id
    }

    pub fn binding_names(&self) -> Vec<String> {
        self.0.borrow().inner.as_env_record().binding_names()
    }

    pub fn outer(&self) -> Option<Environment> {
        self.0.borrow().outer.clone()
    }

    pub fn policy(&self) -> RedeclarationPolicy {
        self.0.borrow().policy
    }

    /// Name of the function this frame was created for, if it is a call frame.
    pub fn function_name(&self) -> Option<String> {
        match &self.0.borrow().inner {
            EnvironmentRecordType::Function(record) => record.function_name.clone(),
            EnvironmentRecordType::Declarative(_) => None,
        }
    }

    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("id", &self.id())
            .field("depth", &self.depth())
            .field("function", &self.function_name())
            .field("bindings", &self.binding_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global() -> Environment {
        Environment::new_global(RedeclarationPolicy::Allow)
    }

    #[test]
    fn get_walks_outward() {
        let root = global();
        root.define("x", Value::from(1)).unwrap();
        let inner = root.child_scope().child_scope();
        assert_eq!(inner.get("x").unwrap(), Value::from(1));
        assert_eq!(inner.depth(), 2);
    }

    #[test]
    fn assign_mutates_declaring_scope() {
        let root = global();
        root.define("x", Value::from(1)).unwrap();
        let inner = root.child_scope();
        inner.assign("x", Value::from(2)).unwrap();
        assert!(!inner.has_binding("x"));
        assert_eq!(root.get("x").unwrap(), Value::from(2));
    }

    #[test]
    fn assign_undefined_fails_without_binding() {
        let root = global();
        let err = root.child_scope().assign("y", Value::Nil).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UndefinedVariable("y".to_string()));
        assert!(root.binding_names().is_empty());
    }

    #[test]
    fn shadowing_leaves_outer_untouched() {
        let root = global();
        root.define("x", Value::from(1)).unwrap();
        let inner = root.child_scope();
        inner.define("x", Value::from(10)).unwrap();
        inner.assign("x", Value::from(11)).unwrap();
        assert_eq!(inner.get("x").unwrap(), Value::from(11));
        assert_eq!(root.get("x").unwrap(), Value::from(1));
    }

    #[test]
    fn forbid_policy_rejects_same_scope_redefinition() {
        let root = Environment::new_global(RedeclarationPolicy::Forbid);
        root.define("x", Value::from(1)).unwrap();
        let err = root.define("x", Value::from(2)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Redeclaration("x".to_string()));
        // Inner scopes inherit the policy but may still shadow.
        let inner = root.child_scope();
        assert_eq!(inner.policy(), RedeclarationPolicy::Forbid);
        inner.define("x", Value::from(3)).unwrap();
    }

    #[test]
    fn clones_share_bindings() {
        let root = global();
        let alias = root.clone();
        alias.define("x", Value::from(5)).unwrap();
        assert!(root.ptr_eq(&alias));
        assert_eq!(root.id(), alias.id());
        assert_eq!(root.get("x").unwrap(), Value::from(5));
    }

    #[test]
    fn function_scope_records_name() {
        let frame = global().new_function_scope(Some("count"));
        assert_eq!(frame.function_name(), Some("count".to_string()));
        assert_eq!(frame.child_scope().function_name(), None);
        assert!(format!("{:?}", frame).contains("Some(\"count\")"));
    }
}
