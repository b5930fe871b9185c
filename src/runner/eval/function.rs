//! Closure creation and function calls.

use std::rc::Rc;

use tracing::debug;

use crate::parser::ast::FunctionData;
use crate::runner::ds::error::{ErrorKind, IxError};
use crate::runner::ds::function_object::{Closure, FunctionObject};
use crate::runner::ds::value::Value;
use crate::stack::ensure_sufficient_stack;

use super::context::EvalContext;
use super::statement::execute_statements;
use super::types::{CompletionType, ValueResult};

/// Pairs `def` with the current scope. The scope is shared, not copied.
pub fn instantiate_closure(def: &Rc<FunctionData>, ctx: &mut EvalContext) -> Value {
    debug!(
        function = def.name().unwrap_or("<anonymous>"),
        arity = def.params.len(),
        env = %ctx.lex_env.id(),
        "created closure"
    );
    Value::Function(FunctionObject::new_closure(
        def.clone(),
        ctx.lex_env.clone(),
    ))
}

/// Calls `function` with already-evaluated arguments.
///
/// Arity is checked before anything is bound or run. Closure bodies run in a
/// fresh frame whose parent is the closure's captured scope, never the
/// caller's. Falling off the end of a body yields nil.
pub fn call_function(
    function: &FunctionObject,
    args: Vec<Value>,
    ctx: &mut EvalContext,
) -> ValueResult {
    let expected = function.arity();
    if args.len() != expected {
        return Err(IxError::new(ErrorKind::ArityMismatch {
            expected,
            found: args.len(),
        }));
    }
    if ctx.call_depth >= ctx.config.max_call_depth {
        return Err(IxError::new(ErrorKind::StackOverflow(
            ctx.config.max_call_depth,
        )));
    }

    ctx.call_depth += 1;
    let result = match function {
        FunctionObject::Closure(closure) => {
            ensure_sufficient_stack(|| call_closure(closure, args, ctx))
        }
        FunctionObject::Native(native) => (native.func)(ctx, args),
    };
    ctx.call_depth -= 1;
    result
}

fn call_closure(closure: &Closure, args: Vec<Value>, ctx: &mut EvalContext) -> ValueResult {
    let frame = closure.environment.new_function_scope(closure.def.name());
    debug!(
        function = closure.def.name().unwrap_or("<anonymous>"),
        depth = ctx.call_depth,
        frame = %frame.id(),
        "calling closure"
    );
    for (param, value) in closure.def.params.iter().zip(args) {
        frame
            .define(&param.name, value)
            .map_err(|e| e.at(&param.meta))?;
    }

    let caller_env = ctx.replace_lex_env(frame);
    let result = execute_statements(&closure.def.body.body, ctx);
    ctx.replace_lex_env(caller_env);

    let completion = result?;
    Ok(match completion.completion_type {
        CompletionType::Return => completion.get_value(),
        CompletionType::Normal => Value::Nil,
    })
}
