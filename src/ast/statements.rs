use crate::{environment::types::Variable, Span};

use super::ast::{Expr, Stmt};

/// Expression Statement
/// A call evaluated for its side effect.
#[derive(Debug, Clone)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: Span,
}

/// Declaration Statement
/// `LET name (: Type)? (= value)?;`
#[derive(Debug, Clone)]
pub struct DeclarationStmt {
    pub name: String,
    pub type_name: Option<String>,
    pub value: Option<Expr>,
    pub variable: Option<Variable>,
    pub span: Span,
}

/// Assignment Statement
#[derive(Debug, Clone)]
pub struct AssignmentStmt {
    pub receiver: Expr,
    pub value: Expr,
    pub span: Span,
}

/// If Statement
#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_statements: Vec<Stmt>,
    pub else_statements: Vec<Stmt>,
    pub span: Span,
}

/// For Statement
/// Iterates an `IntegerIterable`, binding `name` to each element.
#[derive(Debug, Clone)]
pub struct ForStmt {
    pub name: String,
    pub value: Expr,
    pub statements: Vec<Stmt>,
    pub span: Span,
}

/// While Statement
#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub condition: Expr,
    pub statements: Vec<Stmt>,
    pub span: Span,
}

/// Return Statement
#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub value: Expr,
    pub span: Span,
}
