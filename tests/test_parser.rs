//! Tests for source text to AST.

extern crate ix;

use ix::parser::ast::{
    BinaryOperator, DeclarationType, ExpressionType, LiteralType, LogicalOperator, Meta,
    NumberLiteralType, StatementType, UnaryOperator,
};
use ix::parser::IxParser;
use ix::runner::ds::error::ErrorKind;
use pretty_assertions::assert_eq;

fn parse_single_expression(script: &str) -> ExpressionType {
    let mut program = IxParser::parse_to_ast_from_str(script).unwrap();
    assert_eq!(program.body.len(), 1);
    match program.body.remove(0) {
        StatementType::ExpressionStatement { expression, .. } => expression,
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_statement_forms() {
    let program = IxParser::parse_to_ast_from_str(
        r#"
        let a = 1;
        let b;
        fn f(x, y) { return x; }
        print a;
        { a; }
        if (a) return; else print 2;
        "#,
    )
    .unwrap();
    assert_eq!(program.body.len(), 6);

    match &program.body[1] {
        StatementType::DeclarationStatement(DeclarationType::VariableDeclaration(data)) => {
            assert_eq!(data.id.name, "b");
            assert!(data.init.is_none());
        }
        other => panic!("unexpected {:?}", other),
    }
    match &program.body[2] {
        StatementType::DeclarationStatement(DeclarationType::FunctionDeclaration(def)) => {
            assert_eq!(def.name(), Some("f"));
            let params: Vec<&str> = def.params.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(params, vec!["x", "y"]);
            assert_eq!(def.body.body.len(), 1);
        }
        other => panic!("unexpected {:?}", other),
    }
    assert!(matches!(program.body[3], StatementType::PrintStatement { .. }));
    assert!(matches!(program.body[4], StatementType::BlockStatement(_)));
    match &program.body[5] {
        StatementType::IfStatement {
            consequent,
            alternate,
            ..
        } => {
            assert!(matches!(
                **consequent,
                StatementType::ReturnStatement { argument: None, .. }
            ));
            assert!(alternate.is_some());
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_binary_operators_are_left_associative() {
    match parse_single_expression("1 - 2 - 3;") {
        ExpressionType::BinaryExpression {
            operator,
            left,
            meta,
            ..
        } => {
            assert_eq!(operator, BinaryOperator::Subtract);
            assert_eq!(meta, Meta::new(0, 9));
            assert!(matches!(
                *left,
                ExpressionType::BinaryExpression {
                    operator: BinaryOperator::Subtract,
                    ..
                }
            ));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_precedence() {
    match parse_single_expression("a or b and 1 + 2 * 3 < 4;") {
        ExpressionType::LogicalExpression {
            operator, right, ..
        } => {
            assert_eq!(operator, LogicalOperator::Or);
            assert!(matches!(
                *right,
                ExpressionType::LogicalExpression {
                    operator: LogicalOperator::And,
                    ..
                }
            ));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_chained_calls() {
    match parse_single_expression("make()(1, 2);") {
        ExpressionType::CallExpression {
            callee, arguments, ..
        } => {
            assert_eq!(arguments.len(), 2);
            assert!(matches!(*callee, ExpressionType::CallExpression { .. }));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_assignment_is_right_associative() {
    match parse_single_expression("a = b = 3;") {
        ExpressionType::AssignmentExpression { left, right, .. } => {
            assert_eq!(left.name, "a");
            assert!(matches!(*right, ExpressionType::AssignmentExpression { .. }));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_literals() {
    let literal = |script: &str| match parse_single_expression(script) {
        ExpressionType::Literal(data) => data.value,
        other => panic!("unexpected {:?}", other),
    };
    assert_eq!(
        literal("42;"),
        LiteralType::NumberLiteral(NumberLiteralType::IntegerLiteral(42))
    );
    assert_eq!(
        literal("2.5;"),
        LiteralType::NumberLiteral(NumberLiteralType::FloatLiteral(2.5))
    );
    assert_eq!(
        literal(r#""a\tb\"c";"#),
        LiteralType::StringLiteral("a\tb\"c".to_string())
    );
    assert_eq!(literal("nil;"), LiteralType::NilLiteral);
    assert_eq!(literal("false;"), LiteralType::BooleanLiteral(false));
}

#[test]
fn test_unary_nesting() {
    match parse_single_expression("!-x;") {
        ExpressionType::UnaryExpression {
            operator, argument, ..
        } => {
            assert_eq!(operator, UnaryOperator::LogicalNot);
            assert!(matches!(
                *argument,
                ExpressionType::UnaryExpression {
                    operator: UnaryOperator::Minus,
                    ..
                }
            ));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_function_literal() {
    match parse_single_expression("fn (n) { return n; };") {
        ExpressionType::FunctionExpression(def) => {
            assert_eq!(def.name(), None);
            assert_eq!(def.params.len(), 1);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_syntax_error_carries_position() {
    let err = IxParser::parse_to_ast_from_str("let x = ;").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::SyntaxError(_)));
    assert!(err.meta.is_some());
}

#[test]
fn test_integer_literal_out_of_range() {
    let err = IxParser::parse_to_ast_from_str("99999999999999999999;").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::SyntaxError(_)));
    assert_eq!(err.meta, Some(Meta::new(0, 20)));
}
