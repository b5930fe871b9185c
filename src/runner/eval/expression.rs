//! Expression evaluation.

use std::cmp::Ordering;

use crate::parser::ast::{
    BinaryOperator, ExpressionType, LiteralData, LiteralType, LogicalOperator, Meta,
    NumberLiteralType, UnaryOperator,
};
use crate::runner::ds::error::{ErrorKind, IxError};
use crate::runner::ds::operations::test_and_comparison::{compare_numbers, strict_equality};
use crate::runner::ds::operations::type_conversion::to_boolean;
use crate::runner::ds::value::{NumberType, Value};
use crate::stack::ensure_sufficient_stack;

use super::context::EvalContext;
use super::function::{call_function, instantiate_closure};
use super::types::ValueResult;

/// Evaluate an expression and return its value.
pub fn evaluate_expression(expr: &ExpressionType, ctx: &mut EvalContext) -> ValueResult {
    ensure_sufficient_stack(|| evaluate_expression_inner(expr, ctx))
}

fn evaluate_expression_inner(expr: &ExpressionType, ctx: &mut EvalContext) -> ValueResult {
    match expr {
        ExpressionType::Literal(lit) => Ok(evaluate_literal(lit)),

        ExpressionType::Identifier(id) => ctx.lex_env.get(&id.name).map_err(|e| e.at(&id.meta)),

        ExpressionType::AssignmentExpression { meta, left, right } => {
            let value = evaluate_expression(right, ctx)?;
            ctx.lex_env
                .assign(&left.name, value.clone())
                .map_err(|e| e.at(meta))?;
            Ok(value)
        }

        ExpressionType::UnaryExpression {
            meta,
            operator,
            argument,
        } => {
            let value = evaluate_expression(argument, ctx)?;
            evaluate_unary_expression(*operator, &value).map_err(|e| e.at(meta))
        }

        ExpressionType::BinaryExpression {
            meta,
            operator,
            left,
            right,
        } => {
            let left_value = evaluate_expression(left, ctx)?;
            let right_value = evaluate_expression(right, ctx)?;
            evaluate_binary_expression(*operator, &left_value, &right_value)
                .map_err(|e| e.at(meta))
        }

        ExpressionType::LogicalExpression {
            operator,
            left,
            right,
            ..
        } => evaluate_logical_expression(*operator, left, right, ctx),

        ExpressionType::CallExpression {
            meta,
            callee,
            arguments,
        } => evaluate_call_expression(meta, callee, arguments, ctx),

        ExpressionType::FunctionExpression(def) => Ok(instantiate_closure(def, ctx)),
    }
}

fn evaluate_literal(lit: &LiteralData) -> Value {
    match &lit.value {
        LiteralType::NilLiteral => Value::Nil,
        LiteralType::BooleanLiteral(b) => Value::Boolean(*b),
        LiteralType::StringLiteral(s) => Value::String(s.clone()),
        LiteralType::NumberLiteral(NumberLiteralType::IntegerLiteral(i)) => {
            Value::Number(NumberType::Integer(*i))
        }
        LiteralType::NumberLiteral(NumberLiteralType::FloatLiteral(f)) => {
            Value::Number(NumberType::Float(*f))
        }
    }
}

fn evaluate_call_expression(
    meta: &Meta,
    callee: &ExpressionType,
    arguments: &[ExpressionType],
    ctx: &mut EvalContext,
) -> ValueResult {
    let function = match evaluate_expression(callee, ctx)? {
        Value::Function(f) => f,
        other => {
            return Err(
                IxError::new(ErrorKind::NotCallable(other.type_name().to_string())).at(meta),
            )
        }
    };
    let mut args = Vec::with_capacity(arguments.len());
    for arg in arguments {
        args.push(evaluate_expression(arg, ctx)?);
    }
    call_function(&function, args, ctx).map_err(|e| e.or_at(meta))
}

fn evaluate_unary_expression(operator: UnaryOperator, value: &Value) -> ValueResult {
    match operator {
        UnaryOperator::LogicalNot => Ok(Value::Boolean(!to_boolean(value))),
        UnaryOperator::Minus => match value {
            Value::Number(NumberType::Integer(i)) => i
                .checked_neg()
                .map(|n| Value::Number(NumberType::Integer(n)))
                .ok_or_else(|| IxError::type_error(format!("integer overflow in -{}", i))),
            Value::Number(NumberType::Float(f)) => Ok(Value::Number(NumberType::Float(-f))),
            _ => Err(IxError::type_error(format!(
                "bad operand type for unary -: {}",
                value.type_name()
            ))),
        },
    }
}

/// `and`/`or` short-circuit and yield whichever operand decided the result.
fn evaluate_logical_expression(
    operator: LogicalOperator,
    left: &ExpressionType,
    right: &ExpressionType,
    ctx: &mut EvalContext,
) -> ValueResult {
    let left_value = evaluate_expression(left, ctx)?;
    let decided = match operator {
        LogicalOperator::Or => to_boolean(&left_value),
        LogicalOperator::And => !to_boolean(&left_value),
    };
    if decided {
        Ok(left_value)
    } else {
        evaluate_expression(right, ctx)
    }
}

pub fn evaluate_binary_expression(
    operator: BinaryOperator,
    left: &Value,
    right: &Value,
) -> ValueResult {
    match operator {
        BinaryOperator::Add => add_values(left, right),
        BinaryOperator::Subtract => apply_numeric_op(
            operator,
            left,
            right,
            i64::checked_sub,
            |a, b| a - b,
        ),
        BinaryOperator::Multiply => apply_numeric_op(
            operator,
            left,
            right,
            i64::checked_mul,
            |a, b| a * b,
        ),
        BinaryOperator::Divide => divide_values(left, right),
        BinaryOperator::Modulo => modulo_values(left, right),
        BinaryOperator::LessThan => compare_values(operator, left, right, |o| o == Ordering::Less),
        BinaryOperator::GreaterThan => {
            compare_values(operator, left, right, |o| o == Ordering::Greater)
        }
        BinaryOperator::LessThanEqual => {
            compare_values(operator, left, right, |o| o != Ordering::Greater)
        }
        BinaryOperator::GreaterThanEqual => {
            compare_values(operator, left, right, |o| o != Ordering::Less)
        }
        BinaryOperator::Equal => Ok(Value::Boolean(strict_equality(left, right))),
        BinaryOperator::NotEqual => Ok(Value::Boolean(!strict_equality(left, right))),
    }
}

// ============================================================================
// Arithmetic operations
// ============================================================================

fn add_values(left: &Value, right: &Value) -> ValueResult {
    if matches!(left, Value::String(_)) || matches!(right, Value::String(_)) {
        return Ok(Value::String(format!("{}{}", left, right)));
    }
    apply_numeric_op(
        BinaryOperator::Add,
        left,
        right,
        i64::checked_add,
        |a, b| a + b,
    )
}

fn divide_values(left: &Value, right: &Value) -> ValueResult {
    match (left, right) {
        (Value::Number(_), Value::Number(NumberType::Integer(0))) => {
            Err(IxError::type_error("division by zero"))
        }
        (Value::Number(NumberType::Integer(a)), Value::Number(NumberType::Integer(b))) => {
            match a.checked_rem(*b) {
                Some(0) => a
                    .checked_div(*b)
                    .map(|q| Value::Number(NumberType::Integer(q)))
                    .ok_or_else(|| overflow_error(BinaryOperator::Divide, *a, *b)),
                Some(_) => Ok(Value::Number(NumberType::Float(*a as f64 / *b as f64))),
                None => Err(overflow_error(BinaryOperator::Divide, *a, *b)),
            }
        }
        _ => apply_numeric_op(
            BinaryOperator::Divide,
            left,
            right,
            i64::checked_div,
            |a, b| a / b,
        ),
    }
}

fn modulo_values(left: &Value, right: &Value) -> ValueResult {
    if let (Value::Number(_), Value::Number(NumberType::Integer(0))) = (left, right) {
        return Err(IxError::type_error("modulo by zero"));
    }
    apply_numeric_op(
        BinaryOperator::Modulo,
        left,
        right,
        i64::checked_rem,
        |a, b| a % b,
    )
}

/// Integer pairs use `int_op`, which reports overflow as `None`. Any float
/// operand promotes both sides to `f64`.
fn apply_numeric_op<F, G>(
    operator: BinaryOperator,
    left: &Value,
    right: &Value,
    int_op: F,
    float_op: G,
) -> ValueResult
where
    F: Fn(i64, i64) -> Option<i64>,
    G: Fn(f64, f64) -> f64,
{
    match (left, right) {
        (Value::Number(NumberType::Integer(a)), Value::Number(NumberType::Integer(b))) => {
            int_op(*a, *b)
                .map(|n| Value::Number(NumberType::Integer(n)))
                .ok_or_else(|| overflow_error(operator, *a, *b))
        }
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(NumberType::Float(float_op(
            a.as_f64(),
            b.as_f64(),
        )))),
        _ => Err(unsupported_operands(operator, left, right)),
    }
}

fn overflow_error(operator: BinaryOperator, a: i64, b: i64) -> IxError {
    IxError::type_error(format!(
        "integer overflow in {} {} {}",
        a,
        operator.symbol(),
        b
    ))
}

fn unsupported_operands(operator: BinaryOperator, left: &Value, right: &Value) -> IxError {
    IxError::type_error(format!(
        "unsupported operand types for {}: {} and {}",
        operator.symbol(),
        left.type_name(),
        right.type_name()
    ))
}

// ============================================================================
// Comparison operations
// ============================================================================

fn compare_values<F>(operator: BinaryOperator, left: &Value, right: &Value, test: F) -> ValueResult
where
    F: Fn(Ordering) -> bool,
{
    let ordering = match (left, right) {
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => return Err(unsupported_operands(operator, left, right)),
    };
    // NaN orders against nothing.
    Ok(Value::Boolean(ordering.map_or(false, test)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(i: i64) -> Value {
        Value::from(i)
    }

    #[test]
    fn integer_arithmetic_stays_integral() {
        assert_eq!(
            evaluate_binary_expression(BinaryOperator::Add, &int(2), &int(3)).unwrap(),
            int(5)
        );
        assert_eq!(
            evaluate_binary_expression(BinaryOperator::Divide, &int(6), &int(3)).unwrap(),
            int(2)
        );
    }

    #[test]
    fn uneven_division_promotes() {
        assert_eq!(
            evaluate_binary_expression(BinaryOperator::Divide, &int(7), &int(2)).unwrap(),
            Value::from(3.5)
        );
    }

    #[test]
    fn overflow_is_a_type_error() {
        let err = evaluate_binary_expression(BinaryOperator::Add, &int(i64::MAX), &int(1))
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::TypeError(_)));
        let err = evaluate_unary_expression(UnaryOperator::Minus, &int(i64::MIN)).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::TypeError(_)));
    }

    #[test]
    fn division_by_integer_zero_fails() {
        for op in [BinaryOperator::Divide, BinaryOperator::Modulo].iter() {
            let err = evaluate_binary_expression(*op, &int(1), &int(0)).unwrap_err();
            assert!(matches!(err.kind, ErrorKind::TypeError(_)));
        }
    }

    #[test]
    fn string_concatenation_uses_textual_form() {
        assert_eq!(
            evaluate_binary_expression(BinaryOperator::Add, &Value::from("n="), &int(4)).unwrap(),
            Value::from("n=4")
        );
    }

    #[test]
    fn comparisons_mix_number_kinds() {
        assert_eq!(
            evaluate_binary_expression(BinaryOperator::LessThanEqual, &int(2), &Value::from(2.0))
                .unwrap(),
            Value::from(true)
        );
        let err = evaluate_binary_expression(BinaryOperator::LessThan, &int(1), &Value::Nil)
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::TypeError(_)));
    }
}
