use std::rc::Rc;
use std::time::Instant;

use pest::error::{Error, ErrorVariant, InputLocation};
use pest::iterators::{Pair, Pairs};
use pest::{Parser, Position};
use pest_derive::Parser;
use tracing::debug;

use super::ast::*;
use crate::runner::ds::error::{ErrorKind, IxError};

#[derive(Parser)]
#[grammar = "parser/ix_grammar.pest"] // relative to src
pub struct IxParser;

const TAB_WIDTH: usize = 2;

type BuildResult<T> = Result<T, Error<Rule>>;

impl IxParser {
    /// Parses `script` into a program. Grammar and AST-building failures both
    /// come back as [`ErrorKind::SyntaxError`] carrying the offending span.
    pub fn parse_to_ast_from_str(script: &str) -> Result<ProgramData, IxError> {
        parse_to_ast(script).map_err(to_syntax_error)
    }

    /// Renders the raw pest pair tree, one rule per line. Handy when the
    /// grammar misbehaves.
    pub fn parse_to_token_tree(script: &str) -> Result<String, IxError> {
        parse_to_token_tree(script).map_err(to_syntax_error)
    }
}

pub fn parse_to_token_tree(script: &str) -> BuildResult<String> {
    let mut tree = vec![];
    let start = Instant::now();
    let result = IxParser::parse(Rule::script, script);
    debug!(
        elapsed_us = start.elapsed().as_micros() as u64,
        "parsed token tree"
    );
    for pair in result? {
        tree.push(pair_to_string(pair, 0).join("\n"));
    }
    Ok(tree.join("\n"))
}

fn pair_to_string(pair: Pair<Rule>, level: usize) -> Vec<String> {
    let mut tree = vec![];
    let span = pair.as_span();
    let rule_name = format!(
        "{:?} => ({},{}) #{:?}",
        pair.as_rule(),
        span.start(),
        span.end(),
        span.as_str()
    );
    tree.push(format!("{}{}", " ".repeat(level * TAB_WIDTH), rule_name));
    for child_pair in pair.into_inner() {
        tree.append(pair_to_string(child_pair, level + 1).as_mut());
    }
    tree
}

pub fn parse_to_ast(script: &str) -> BuildResult<ProgramData> {
    let start = Instant::now();
    let mut pairs = IxParser::parse(Rule::script, script)?;
    let script_pair = match pairs.next() {
        Some(pair) => pair,
        None => {
            return Err(Error::new_from_pos(
                ErrorVariant::CustomError {
                    message: "Parser produced no script".to_string(),
                },
                Position::from_start(script),
            ))
        }
    };
    let meta = meta_of(&script_pair);
    let body = build_ast_from_statement_list(script_pair.into_inner())?;
    debug!(
        statements = body.len(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "built ast"
    );
    Ok(ProgramData { meta, body })
}

fn to_syntax_error(error: Error<Rule>) -> IxError {
    let meta = match error.location {
        InputLocation::Pos(pos) => Meta::new(pos, pos),
        InputLocation::Span((start, end)) => Meta::new(start, end),
    };
    IxError::new(ErrorKind::SyntaxError(error.variant.message().to_string())).at(&meta)
}

fn get_unexpected_error(message: &str, pair: &Pair<Rule>) -> Error<Rule> {
    let message = format!("Unexpected state reached [{:?}] - {}", pair.as_rule(), message);
    Error::new_from_span(ErrorVariant::CustomError { message }, pair.as_span())
}

fn meta_of(pair: &Pair<Rule>) -> Meta {
    let span = pair.as_span();
    Meta::new(span.start(), span.end())
}

fn next_inner<'i>(iter: &mut Pairs<'i, Rule>, parent: &Pair<'i, Rule>) -> BuildResult<Pair<'i, Rule>> {
    iter.next()
        .ok_or_else(|| get_unexpected_error("missing child", parent))
}

fn build_ast_from_statement_list(pairs: Pairs<Rule>) -> BuildResult<Vec<StatementType>> {
    let mut statements = vec![];
    for pair in pairs {
        match pair.as_rule() {
            Rule::statement => statements.push(build_ast_from_statement(pair)?),
            Rule::EOI => { /* Do nothing */ }
            _ => return Err(get_unexpected_error("expected a statement", &pair)),
        }
    }
    Ok(statements)
}

fn build_ast_from_statement(pair: Pair<Rule>) -> BuildResult<StatementType> {
    let parent = pair.clone();
    let inner_pair = next_inner(&mut pair.into_inner(), &parent)?;
    let meta = meta_of(&inner_pair);
    Ok(match inner_pair.as_rule() {
        Rule::function_declaration => StatementType::DeclarationStatement(
            DeclarationType::FunctionDeclaration(Rc::new(build_ast_from_function(inner_pair)?)),
        ),
        Rule::variable_declaration => {
            let parent = inner_pair.clone();
            let mut inner_iter = inner_pair.into_inner();
            let id = build_identifier(&next_inner(&mut inner_iter, &parent)?);
            let init = match inner_iter.next() {
                Some(init) => Some(build_ast_from_expression(init)?),
                None => None,
            };
            StatementType::DeclarationStatement(DeclarationType::VariableDeclaration(
                VariableDeclarationData { meta, id, init },
            ))
        }
        Rule::print_statement => {
            let parent = inner_pair.clone();
            let argument = next_inner(&mut inner_pair.into_inner(), &parent)?;
            StatementType::PrintStatement {
                meta,
                argument: build_ast_from_expression(argument)?,
            }
        }
        Rule::return_statement => StatementType::ReturnStatement {
            meta,
            argument: match inner_pair.into_inner().next() {
                Some(argument) => Some(build_ast_from_expression(argument)?),
                None => None,
            },
        },
        Rule::if_statement => {
            let parent = inner_pair.clone();
            let mut inner_iter = inner_pair.into_inner();
            let test = build_ast_from_expression(next_inner(&mut inner_iter, &parent)?)?;
            let consequent = build_ast_from_statement(next_inner(&mut inner_iter, &parent)?)?;
            let alternate = match inner_iter.next() {
                Some(alternate) => Some(Box::new(build_ast_from_statement(alternate)?)),
                None => None,
            };
            StatementType::IfStatement {
                meta,
                test,
                consequent: Box::new(consequent),
                alternate,
            }
        }
        Rule::block_statement => StatementType::BlockStatement(BlockStatementData {
            meta,
            body: build_ast_from_statement_list(inner_pair.into_inner())?,
        }),
        Rule::expression_statement => {
            let parent = inner_pair.clone();
            let expression = next_inner(&mut inner_pair.into_inner(), &parent)?;
            StatementType::ExpressionStatement {
                meta,
                expression: build_ast_from_expression(expression)?,
            }
        }
        _ => return Err(get_unexpected_error("unknown statement", &inner_pair)),
    })
}

/// Builds both `fn name(..) {..}` declarations and `fn (..) {..}` literals.
fn build_ast_from_function(pair: Pair<Rule>) -> BuildResult<FunctionData> {
    let meta = meta_of(&pair);
    let parent = pair.clone();
    let mut id = None;
    let mut params = vec![];
    let mut body = None;
    for child in pair.into_inner() {
        match child.as_rule() {
            Rule::identifier => id = Some(build_identifier(&child)),
            Rule::formal_parameters => {
                params = child.into_inner().map(|p| build_identifier(&p)).collect();
            }
            Rule::function_body => {
                body = Some(FunctionBodyData {
                    meta: meta_of(&child),
                    body: build_ast_from_statement_list(child.into_inner())?,
                });
            }
            _ => return Err(get_unexpected_error("unexpected function part", &child)),
        }
    }
    let body = body.ok_or_else(|| get_unexpected_error("function without a body", &parent))?;
    Ok(FunctionData {
        meta,
        id,
        params,
        body,
    })
}

fn build_identifier(pair: &Pair<Rule>) -> IdentifierData {
    IdentifierData::new(pair.as_str(), meta_of(pair))
}

fn build_ast_from_expression(pair: Pair<Rule>) -> BuildResult<ExpressionType> {
    let meta = meta_of(&pair);
    match pair.as_rule() {
        Rule::assignment_expression => {
            let parent = pair.clone();
            let mut inner_iter = pair.into_inner();
            let left = build_identifier(&next_inner(&mut inner_iter, &parent)?);
            let right = build_ast_from_expression(next_inner(&mut inner_iter, &parent)?)?;
            Ok(ExpressionType::AssignmentExpression {
                meta,
                left,
                right: Box::new(right),
            })
        }
        Rule::logical_or_expression | Rule::logical_and_expression => {
            build_ast_from_logical_chain(pair)
        }
        Rule::equality_expression
        | Rule::relational_expression
        | Rule::additive_expression
        | Rule::multiplicative_expression => build_ast_from_binary_chain(pair),
        Rule::unary_expression => {
            let parent = pair.clone();
            let mut inner_iter = pair.into_inner();
            let first = next_inner(&mut inner_iter, &parent)?;
            if first.as_rule() == Rule::unary_operator {
                let operator = match first.as_str() {
                    "-" => UnaryOperator::Minus,
                    "!" => UnaryOperator::LogicalNot,
                    _ => return Err(get_unexpected_error("unknown unary operator", &first)),
                };
                let argument = build_ast_from_expression(next_inner(&mut inner_iter, &parent)?)?;
                Ok(ExpressionType::UnaryExpression {
                    meta,
                    operator,
                    argument: Box::new(argument),
                })
            } else {
                build_ast_from_expression(first)
            }
        }
        Rule::call_expression => {
            let parent = pair.clone();
            let mut inner_iter = pair.into_inner();
            let mut expression = build_ast_from_expression(next_inner(&mut inner_iter, &parent)?)?;
            for arguments_pair in inner_iter {
                let end_index = arguments_pair.as_span().end();
                let arguments = arguments_pair
                    .into_inner()
                    .map(build_ast_from_expression)
                    .collect::<BuildResult<Vec<_>>>()?;
                expression = ExpressionType::CallExpression {
                    meta: Meta::new(meta.start_index, end_index),
                    callee: Box::new(expression),
                    arguments,
                };
            }
            Ok(expression)
        }
        Rule::function_expression => Ok(ExpressionType::FunctionExpression(Rc::new(
            build_ast_from_function(pair)?,
        ))),
        Rule::identifier => Ok(ExpressionType::Identifier(build_identifier(&pair))),
        Rule::nil_literal
        | Rule::boolean_literal
        | Rule::numeric_literal
        | Rule::string_literal => Ok(ExpressionType::Literal(build_ast_from_literal(pair)?)),
        _ => Err(get_unexpected_error("unknown expression", &pair)),
    }
}

fn build_ast_from_logical_chain(pair: Pair<Rule>) -> BuildResult<ExpressionType> {
    let start_index = pair.as_span().start();
    let parent = pair.clone();
    let mut inner_iter = pair.into_inner();
    let mut left = build_ast_from_expression(next_inner(&mut inner_iter, &parent)?)?;
    while let Some(operator_pair) = inner_iter.next() {
        let operator = match operator_pair.as_rule() {
            Rule::or_operator => LogicalOperator::Or,
            Rule::and_operator => LogicalOperator::And,
            _ => return Err(get_unexpected_error("unknown logical operator", &operator_pair)),
        };
        let right_pair = next_inner(&mut inner_iter, &parent)?;
        let end_index = right_pair.as_span().end();
        left = ExpressionType::LogicalExpression {
            meta: Meta::new(start_index, end_index),
            operator,
            left: Box::new(left),
            right: Box::new(build_ast_from_expression(right_pair)?),
        };
    }
    Ok(left)
}

fn build_ast_from_binary_chain(pair: Pair<Rule>) -> BuildResult<ExpressionType> {
    let start_index = pair.as_span().start();
    let parent = pair.clone();
    let mut inner_iter = pair.into_inner();
    let mut left = build_ast_from_expression(next_inner(&mut inner_iter, &parent)?)?;
    while let Some(operator_pair) = inner_iter.next() {
        let operator = get_binary_operator(&operator_pair)?;
        let right_pair = next_inner(&mut inner_iter, &parent)?;
        let end_index = right_pair.as_span().end();
        left = ExpressionType::BinaryExpression {
            meta: Meta::new(start_index, end_index),
            operator,
            left: Box::new(left),
            right: Box::new(build_ast_from_expression(right_pair)?),
        };
    }
    Ok(left)
}

fn get_binary_operator(pair: &Pair<Rule>) -> BuildResult<BinaryOperator> {
    Ok(match pair.as_str() {
        "+" => BinaryOperator::Add,
        "-" => BinaryOperator::Subtract,
        "*" => BinaryOperator::Multiply,
        "/" => BinaryOperator::Divide,
        "%" => BinaryOperator::Modulo,
        "<" => BinaryOperator::LessThan,
        ">" => BinaryOperator::GreaterThan,
        "<=" => BinaryOperator::LessThanEqual,
        ">=" => BinaryOperator::GreaterThanEqual,
        "==" => BinaryOperator::Equal,
        "!=" => BinaryOperator::NotEqual,
        _ => return Err(get_unexpected_error("unknown binary operator", pair)),
    })
}

fn build_ast_from_literal(pair: Pair<Rule>) -> BuildResult<LiteralData> {
    let meta = meta_of(&pair);
    let value = match pair.as_rule() {
        Rule::nil_literal => LiteralType::NilLiteral,
        Rule::boolean_literal => LiteralType::BooleanLiteral(pair.as_str() == "true"),
        Rule::numeric_literal => {
            let text = pair.as_str();
            if text.contains('.') {
                match text.parse::<f64>() {
                    Ok(f) => LiteralType::NumberLiteral(NumberLiteralType::FloatLiteral(f)),
                    Err(_) => return Err(get_unexpected_error("malformed number", &pair)),
                }
            } else {
                match text.parse::<i64>() {
                    Ok(i) => LiteralType::NumberLiteral(NumberLiteralType::IntegerLiteral(i)),
                    Err(_) => {
                        return Err(get_unexpected_error("integer literal out of range", &pair))
                    }
                }
            }
        }
        Rule::string_literal => {
            let characters = pair
                .clone()
                .into_inner()
                .next()
                .map(|p| unescape(p.as_str()))
                .unwrap_or_default();
            LiteralType::StringLiteral(characters)
        }
        _ => return Err(get_unexpected_error("unknown literal", &pair)),
    };
    Ok(LiteralData { meta, value })
}

fn unescape(raw: &str) -> String {
    let mut s = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            s.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => s.push('\n'),
            Some('t') => s.push('\t'),
            Some('r') => s.push('\r'),
            Some('0') => s.push('\0'),
            Some(other) => s.push(other),
            None => s.push('\\'),
        }
    }
    s
}
