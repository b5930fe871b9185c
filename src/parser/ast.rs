use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Meta {
    pub start_index: usize,
    pub end_index: usize,
}

impl Meta {
    pub fn new(start_index: usize, end_index: usize) -> Self {
        Meta {
            start_index,
            end_index,
        }
    }
}

pub trait HasMeta {
    fn get_meta(&self) -> &Meta;
}

#[derive(Debug, PartialEq)]
pub struct IdentifierData {
    pub name: String,
    pub meta: Meta,
}

impl IdentifierData {
    pub fn new(name: impl Into<String>, meta: Meta) -> Self {
        IdentifierData {
            name: name.into(),
            meta,
        }
    }
}

impl HasMeta for IdentifierData {
    fn get_meta(&self) -> &Meta {
        &self.meta
    }
}

#[derive(Debug, PartialEq)]
pub struct ProgramData {
    pub meta: Meta,
    pub body: Vec<StatementType>,
}

#[derive(Debug, PartialEq)]
pub enum StatementType {
    ExpressionStatement {
        meta: Meta,
        expression: ExpressionType,
    },
    BlockStatement(BlockStatementData),
    DeclarationStatement(DeclarationType),
    IfStatement {
        meta: Meta,
        test: ExpressionType,
        consequent: Box<StatementType>,
        alternate: Option<Box<StatementType>>,
    },
    ReturnStatement {
        meta: Meta,
        argument: Option<ExpressionType>,
    },
    PrintStatement {
        meta: Meta,
        argument: ExpressionType,
    },
}

impl HasMeta for StatementType {
    fn get_meta(&self) -> &Meta {
        match self {
            StatementType::ExpressionStatement { meta, .. } => meta,
            StatementType::BlockStatement(data) => &data.meta,
            StatementType::DeclarationStatement(data) => data.get_meta(),
            StatementType::IfStatement { meta, .. } => meta,
            StatementType::ReturnStatement { meta, .. } => meta,
            StatementType::PrintStatement { meta, .. } => meta,
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct BlockStatementData {
    pub meta: Meta,
    pub body: Vec<StatementType>,
}

#[derive(Debug, PartialEq)]
pub enum DeclarationType {
    VariableDeclaration(VariableDeclarationData),
    /// Shared with every closure created from it.
    FunctionDeclaration(Rc<FunctionData>),
}

impl HasMeta for DeclarationType {
    fn get_meta(&self) -> &Meta {
        match self {
            DeclarationType::VariableDeclaration(data) => &data.meta,
            DeclarationType::FunctionDeclaration(data) => &data.meta,
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct VariableDeclarationData {
    pub meta: Meta,
    pub id: IdentifierData,
    pub init: Option<ExpressionType>,
}

#[derive(Debug, PartialEq)]
pub struct FunctionData {
    pub meta: Meta,
    /// `None` for function literals.
    pub id: Option<IdentifierData>,
    pub params: Vec<IdentifierData>,
    pub body: FunctionBodyData,
}

impl FunctionData {
    pub fn name(&self) -> Option<&str> {
        self.id.as_ref().map(|id| id.name.as_str())
    }
}

#[derive(Debug, PartialEq)]
pub struct FunctionBodyData {
    pub meta: Meta,
    pub body: Vec<StatementType>,
}

#[derive(Debug, PartialEq)]
pub enum ExpressionType {
    Literal(LiteralData),
    Identifier(IdentifierData),
    AssignmentExpression {
        meta: Meta,
        left: IdentifierData,
        right: Box<ExpressionType>,
    },
    UnaryExpression {
        meta: Meta,
        operator: UnaryOperator,
        argument: Box<ExpressionType>,
    },
    BinaryExpression {
        meta: Meta,
        operator: BinaryOperator,
        left: Box<ExpressionType>,
        right: Box<ExpressionType>,
    },
    LogicalExpression {
        meta: Meta,
        operator: LogicalOperator,
        left: Box<ExpressionType>,
        right: Box<ExpressionType>,
    },
    CallExpression {
        meta: Meta,
        callee: Box<ExpressionType>,
        arguments: Vec<ExpressionType>,
    },
    FunctionExpression(Rc<FunctionData>),
}

impl HasMeta for ExpressionType {
    fn get_meta(&self) -> &Meta {
        match self {
            ExpressionType::Literal(data) => &data.meta,
            ExpressionType::Identifier(data) => &data.meta,
            ExpressionType::AssignmentExpression { meta, .. } => meta,
            ExpressionType::UnaryExpression { meta, .. } => meta,
            ExpressionType::BinaryExpression { meta, .. } => meta,
            ExpressionType::LogicalExpression { meta, .. } => meta,
            ExpressionType::CallExpression { meta, .. } => meta,
            ExpressionType::FunctionExpression(data) => &data.meta,
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct LiteralData {
    pub meta: Meta,
    pub value: LiteralType,
}

#[derive(Debug, PartialEq)]
pub enum LiteralType {
    NilLiteral,
    BooleanLiteral(bool),
    StringLiteral(String),
    NumberLiteral(NumberLiteralType),
}

#[derive(Debug, PartialEq)]
pub enum NumberLiteralType {
    IntegerLiteral(i64),
    FloatLiteral(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Minus,
    LogicalNot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    LessThan,
    GreaterThan,
    LessThanEqual,
    GreaterThanEqual,
    Equal,
    NotEqual,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::LessThan => "<",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::LessThanEqual => "<=",
            BinaryOperator::GreaterThanEqual => ">=",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

// ============================================================================
// Teardown
// ============================================================================
//
// Operator chains parse into left-deep trees, and the derived drop glue
// recurses once per level. Statement lists own every expression tree, so
// their owners unlink the trees and free the nodes from a work list instead.

impl Drop for ProgramData {
    fn drop(&mut self) {
        drop_statements_iteratively(&mut self.body);
    }
}

impl Drop for FunctionBodyData {
    fn drop(&mut self) {
        drop_statements_iteratively(&mut self.body);
    }
}

fn drop_statements_iteratively(statements: &mut [StatementType]) {
    let mut pending = Vec::new();
    for stmt in statements.iter_mut() {
        take_statement_expressions(stmt, &mut pending);
    }
    while let Some(mut expr) = pending.pop() {
        take_child_expressions(&mut expr, &mut pending);
    }
}

fn detached() -> ExpressionType {
    ExpressionType::Literal(LiteralData {
        meta: Meta::default(),
        value: LiteralType::NilLiteral,
    })
}

fn take_boxed(expr: &mut Box<ExpressionType>, pending: &mut Vec<ExpressionType>) {
    pending.push(std::mem::replace(&mut **expr, detached()));
}

fn take_statement_expressions(stmt: &mut StatementType, pending: &mut Vec<ExpressionType>) {
    match stmt {
        StatementType::ExpressionStatement { expression, .. } => {
            pending.push(std::mem::replace(expression, detached()))
        }
        StatementType::PrintStatement { argument, .. } => {
            pending.push(std::mem::replace(argument, detached()))
        }
        StatementType::ReturnStatement { argument, .. } => pending.extend(argument.take()),
        StatementType::DeclarationStatement(DeclarationType::VariableDeclaration(data)) => {
            pending.extend(data.init.take())
        }
        StatementType::DeclarationStatement(DeclarationType::FunctionDeclaration(_)) => {}
        StatementType::BlockStatement(block) => {
            for inner in block.body.iter_mut() {
                take_statement_expressions(inner, pending);
            }
        }
        StatementType::IfStatement {
            test,
            consequent,
            alternate,
            ..
        } => {
            pending.push(std::mem::replace(test, detached()));
            take_statement_expressions(consequent, pending);
            if let Some(alternate) = alternate {
                take_statement_expressions(alternate, pending);
            }
        }
    }
}

fn take_child_expressions(expr: &mut ExpressionType, pending: &mut Vec<ExpressionType>) {
    match expr {
        ExpressionType::AssignmentExpression { right, .. } => take_boxed(right, pending),
        ExpressionType::UnaryExpression { argument, .. } => take_boxed(argument, pending),
        ExpressionType::BinaryExpression { left, right, .. }
        | ExpressionType::LogicalExpression { left, right, .. } => {
            take_boxed(left, pending);
            take_boxed(right, pending);
        }
        ExpressionType::CallExpression {
            callee, arguments, ..
        } => {
            take_boxed(callee, pending);
            pending.extend(arguments.drain(..));
        }
        ExpressionType::Literal(_)
        | ExpressionType::Identifier(_)
        | ExpressionType::FunctionExpression(_) => {}
    }
}
