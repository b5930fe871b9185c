//! Statement execution.

use tracing::debug;

use crate::parser::ast::{
    BlockStatementData, DeclarationType, ExpressionType, HasMeta, ProgramData, StatementType,
    VariableDeclarationData,
};
use crate::runner::ds::error::IxError;
use crate::runner::ds::operations::type_conversion::to_boolean;
use crate::runner::ds::value::Value;
use crate::stack::ensure_sufficient_stack;

use super::context::EvalContext;
use super::expression::evaluate_expression;
use super::function::instantiate_closure;
use super::types::{Completion, CompletionType, EvalResult};

/// Runs the program's top-level statements in `ctx.lex_env`. A top-level
/// `return` ends the program and its value becomes the result.
pub fn execute_program(
    program: &ProgramData,
    ctx: &mut EvalContext,
) -> Result<Option<Value>, IxError> {
    let completion = execute_statements(&program.body, ctx)?;
    Ok(match completion.completion_type {
        CompletionType::Return => Some(completion.get_value()),
        CompletionType::Normal => None,
    })
}

/// Executes `statements` in order, stopping at the first abrupt completion.
pub fn execute_statements(statements: &[StatementType], ctx: &mut EvalContext) -> EvalResult {
    for stmt in statements {
        let completion = execute_statement(stmt, ctx)?;
        if completion.is_abrupt() {
            return Ok(completion);
        }
    }
    Ok(Completion::normal())
}

/// Execute a statement and return its completion.
pub fn execute_statement(stmt: &StatementType, ctx: &mut EvalContext) -> EvalResult {
    ensure_sufficient_stack(|| execute_statement_inner(stmt, ctx))
}

fn execute_statement_inner(stmt: &StatementType, ctx: &mut EvalContext) -> EvalResult {
    match stmt {
        StatementType::ExpressionStatement { expression, .. } => {
            evaluate_expression(expression, ctx)?;
            Ok(Completion::normal())
        }

        StatementType::BlockStatement(block) => execute_block_statement(block, ctx),

        StatementType::DeclarationStatement(decl) => execute_declaration(decl, ctx),

        StatementType::IfStatement {
            test,
            consequent,
            alternate,
            ..
        } => execute_if_statement(test, consequent, alternate.as_deref(), ctx),

        StatementType::ReturnStatement { argument, .. } => {
            let value = match argument {
                Some(arg) => evaluate_expression(arg, ctx)?,
                None => Value::Nil,
            };
            Ok(Completion::return_value(value))
        }

        StatementType::PrintStatement { argument, .. } => {
            let value = evaluate_expression(argument, ctx)?;
            ctx.print_line(&value.to_string());
            Ok(Completion::normal())
        }
    }
}

fn execute_block_statement(block: &BlockStatementData, ctx: &mut EvalContext) -> EvalResult {
    let saved_env = ctx.push_block_scope();
    let result = execute_statements(&block.body, ctx);
    ctx.replace_lex_env(saved_env);
    result
}

fn execute_declaration(decl: &DeclarationType, ctx: &mut EvalContext) -> EvalResult {
    match decl {
        DeclarationType::VariableDeclaration(data) => execute_variable_declaration(data, ctx),
        DeclarationType::FunctionDeclaration(def) => {
            let closure = instantiate_closure(def, ctx);
            // The closure captured this scope, so defining its name here is
            // what makes recursion resolve.
            if let Some(id) = &def.id {
                debug!(function = %id.name, env = %ctx.lex_env.id(), "declared function");
                ctx.lex_env
                    .define(&id.name, closure)
                    .map_err(|e| e.at(&id.meta))?;
            }
            Ok(Completion::normal())
        }
    }
}

fn execute_variable_declaration(
    data: &VariableDeclarationData,
    ctx: &mut EvalContext,
) -> EvalResult {
    let value = match &data.init {
        Some(init) => evaluate_expression(init, ctx)?,
        None => Value::Nil,
    };
    ctx.lex_env
        .define(&data.id.name, value)
        .map_err(|e| e.at(data.id.get_meta()))?;
    Ok(Completion::normal())
}

fn execute_if_statement(
    test: &ExpressionType,
    consequent: &StatementType,
    alternate: Option<&StatementType>,
    ctx: &mut EvalContext,
) -> EvalResult {
    let test_value = evaluate_expression(test, ctx)?;
    if to_boolean(&test_value) {
        execute_statement(consequent, ctx)
    } else if let Some(alternate) = alternate {
        execute_statement(alternate, ctx)
    } else {
        Ok(Completion::normal())
    }
}
