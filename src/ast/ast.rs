use crate::{
    environment::types::{Function, Type, Variable},
    Span,
};

use super::{
    expressions::{AccessExpr, BinaryExpr, FunctionExpr, GroupExpr, LiteralExpr},
    statements::{AssignmentStmt, DeclarationStmt, ExpressionStmt, ForStmt, IfStmt, ReturnStmt, WhileStmt},
};

/// Source
/// The root of a program: every field, then every method.
#[derive(Debug, Clone)]
pub struct Source {
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
    pub span: Span,
}

/// Field
/// A top-level variable, `LET name: Type (= value)?;`.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub type_name: String,
    pub value: Option<Expr>,
    /// Filled by the analyzer
    pub variable: Option<Variable>,
    pub span: Span,
}

/// Method
/// A top-level function, `DEF name(param: Type, ...)(: Type)? DO ... END`.
#[derive(Debug, Clone)]
pub struct Method {
    pub name: String,
    /// Parameter names paired with their type names, in declared order
    pub parameters: Vec<(String, String)>,
    pub return_type_name: Option<String>,
    pub statements: Vec<Stmt>,
    /// Filled by the analyzer
    pub function: Option<Function>,
    pub span: Span,
}

/// Statement Types
#[derive(Debug, Clone)]
pub enum Stmt {
    Expression(ExpressionStmt),
    Declaration(DeclarationStmt),
    Assignment(AssignmentStmt),
    If(IfStmt),
    For(ForStmt),
    While(WhileStmt),
    Return(ReturnStmt),
}

impl Stmt {
    /// Returns the span of the statement.
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Expression(stmt) => &stmt.span,
            Stmt::Declaration(stmt) => &stmt.span,
            Stmt::Assignment(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::For(stmt) => &stmt.span,
            Stmt::While(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
        }
    }
}

/// Expression Types
#[derive(Debug, Clone)]
pub enum Expr {
    Literal(LiteralExpr),
    Group(GroupExpr),
    Binary(BinaryExpr),
    Access(AccessExpr),
    Function(FunctionExpr),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Literal(expr) => &expr.span,
            Expr::Group(expr) => &expr.span,
            Expr::Binary(expr) => &expr.span,
            Expr::Access(expr) => &expr.span,
            Expr::Function(expr) => &expr.span,
        }
    }

    /// Returns the type filled in by the analyzer, if any.
    pub fn get_type(&self) -> Option<&Type> {
        match self {
            Expr::Literal(expr) => expr.ty.as_ref(),
            Expr::Group(expr) => expr.ty.as_ref(),
            Expr::Binary(expr) => expr.ty.as_ref(),
            Expr::Access(expr) => expr.variable.as_ref().map(|variable| &variable.ty),
            Expr::Function(expr) => expr.function.as_ref().map(|function| &function.return_type),
        }
    }
}
