//! Early errors detected on the AST before anything runs.
//!
//! - reading a local variable inside its own initializer (`{ let a = a; }`)
//! - the same parameter name twice in one function
//!
//! Top-level bindings are not tracked, so `let a = a;` at the top level is
//! left to fail (or not) at run time against whatever `a` already exists.

use std::collections::HashMap;

use crate::parser::ast::{
    DeclarationType, ExpressionType, FunctionData, IdentifierData, ProgramData, StatementType,
};
use crate::runner::ds::error::{ErrorKind, IxError};
use crate::stack::ensure_sufficient_stack;

pub fn check_program(program: &ProgramData) -> Result<(), IxError> {
    ScopeChecker::default().check_statements(&program.body)
}

#[derive(Default)]
struct ScopeChecker {
    /// `false` while the binding's initializer is still being checked.
    scopes: Vec<HashMap<String, bool>>,
}

impl ScopeChecker {
    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), false);
        }
    }

    fn define(&mut self, name: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), true);
        }
    }

    fn check_statements(&mut self, statements: &[StatementType]) -> Result<(), IxError> {
        for stmt in statements {
            self.check_statement(stmt)?;
        }
        Ok(())
    }

    fn check_statement(&mut self, stmt: &StatementType) -> Result<(), IxError> {
        match stmt {
            StatementType::ExpressionStatement { expression, .. } => {
                self.check_expression(expression)
            }
            StatementType::PrintStatement { argument, .. } => self.check_expression(argument),
            StatementType::ReturnStatement { argument, .. } => match argument {
                Some(argument) => self.check_expression(argument),
                None => Ok(()),
            },
            StatementType::BlockStatement(block) => {
                self.begin_scope();
                let result = self.check_statements(&block.body);
                self.end_scope();
                result
            }
            StatementType::IfStatement {
                test,
                consequent,
                alternate,
                ..
            } => {
                self.check_expression(test)?;
                self.check_statement(consequent)?;
                match alternate {
                    Some(alternate) => self.check_statement(alternate),
                    None => Ok(()),
                }
            }
            StatementType::DeclarationStatement(DeclarationType::VariableDeclaration(data)) => {
                self.declare(&data.id.name);
                if let Some(init) = &data.init {
                    self.check_expression(init)?;
                }
                self.define(&data.id.name);
                Ok(())
            }
            StatementType::DeclarationStatement(DeclarationType::FunctionDeclaration(def)) => {
                if let Some(id) = &def.id {
                    self.define(&id.name);
                }
                self.check_function(def)
            }
        }
    }

    fn check_function(&mut self, def: &FunctionData) -> Result<(), IxError> {
        self.begin_scope();
        let result = self.check_function_scope(def);
        self.end_scope();
        result
    }

    fn check_function_scope(&mut self, def: &FunctionData) -> Result<(), IxError> {
        for param in &def.params {
            if self.is_bound_in_current_scope(param) {
                return Err(syntax_error(
                    format!("duplicate parameter '{}'", param.name),
                    param,
                ));
            }
            self.define(&param.name);
        }
        self.check_statements(&def.body.body)
    }

    fn is_bound_in_current_scope(&self, id: &IdentifierData) -> bool {
        self.scopes
            .last()
            .map_or(false, |scope| scope.contains_key(&id.name))
    }

    fn check_expression(&mut self, expr: &ExpressionType) -> Result<(), IxError> {
        ensure_sufficient_stack(|| self.check_expression_inner(expr))
    }

    fn check_expression_inner(&mut self, expr: &ExpressionType) -> Result<(), IxError> {
        match expr {
            ExpressionType::Literal(_) => Ok(()),
            ExpressionType::Identifier(id) => {
                let in_own_initializer = self
                    .scopes
                    .last()
                    .and_then(|scope| scope.get(&id.name))
                    .map_or(false, |defined| !*defined);
                if in_own_initializer {
                    Err(syntax_error(
                        format!("can't read local variable '{}' in its own initializer", id.name),
                        id,
                    ))
                } else {
                    Ok(())
                }
            }
            ExpressionType::AssignmentExpression { right, .. } => self.check_expression(right),
            ExpressionType::UnaryExpression { argument, .. } => self.check_expression(argument),
            ExpressionType::BinaryExpression { left, right, .. }
            | ExpressionType::LogicalExpression { left, right, .. } => {
                self.check_expression(left)?;
                self.check_expression(right)
            }
            ExpressionType::CallExpression {
                callee, arguments, ..
            } => {
                self.check_expression(callee)?;
                for arg in arguments {
                    self.check_expression(arg)?;
                }
                Ok(())
            }
            ExpressionType::FunctionExpression(def) => self.check_function(def),
        }
    }
}

fn syntax_error(message: String, id: &IdentifierData) -> IxError {
    IxError::new(ErrorKind::SyntaxError(message)).at(&id.meta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::IxParser;

    fn check(script: &str) -> Result<(), IxError> {
        let program = IxParser::parse_to_ast_from_str(script).unwrap();
        check_program(&program)
    }

    #[test]
    fn local_self_reference_in_initializer_is_rejected() {
        let err = check("{ let a = a; }").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::SyntaxError(_)));
        assert!(check("fn f() { let a = 1 + a; }").is_err());
    }

    #[test]
    fn top_level_self_reference_is_left_to_runtime() {
        assert!(check("let a = 1; let a = a;").is_ok());
    }

    #[test]
    fn shadowing_outer_name_in_initializer_is_allowed() {
        assert!(check("let a = 1; { let b = a; }").is_ok());
        assert!(check("fn f(a) { { let b = a; } }").is_ok());
    }

    #[test]
    fn duplicate_parameters_are_rejected() {
        let err = check("fn f(a, b, a) {}").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::SyntaxError("duplicate parameter 'a'".to_string())
        );
        assert!(check("let g = fn (x, x) { return x; };").is_err());
    }

    #[test]
    fn recursion_is_not_a_self_reference() {
        assert!(check("{ fn fact(n) { if (n < 2) return 1; return n * fact(n - 1); } }").is_ok());
    }
}
