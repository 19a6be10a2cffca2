use num_traits::ToPrimitive;

use crate::{
    ast::{
        ast::Expr,
        expressions::{AccessExpr, BinaryExpr, BinaryOperator, FunctionExpr, Literal, LiteralExpr},
    },
    environment::types::{
        is_assignable, require_assignable, Type, BOOLEAN, CHARACTER, COMPARABLE, DECIMAL, INTEGER, NIL, STRING,
    },
    errors::errors::{Error, ErrorImpl},
};

use super::analyzer::Analyzer;

/// Resolves and types an expression, filling its metadata slot.
pub fn analyze_expr(analyzer: &mut Analyzer, expr: &mut Expr) -> Result<Type, Error> {
    match expr {
        Expr::Literal(literal) => analyze_literal(literal),
        Expr::Group(group) => {
            if !matches!(*group.expression, Expr::Binary(_)) {
                return Err(Error::new(ErrorImpl::InvalidGroup, group.span.start.clone()));
            }
            let ty = analyze_expr(analyzer, &mut group.expression)?;
            group.ty = Some(ty.clone());
            Ok(ty)
        }
        Expr::Binary(binary) => analyze_binary(analyzer, binary),
        Expr::Access(access) => analyze_access(analyzer, access),
        Expr::Function(function) => analyze_function(analyzer, function),
    }
}

fn analyze_literal(expr: &mut LiteralExpr) -> Result<Type, Error> {
    let out_of_range = |literal: String| {
        Error::new(ErrorImpl::LiteralOutOfRange { literal }, expr.span.start.clone())
    };

    let ty = match &expr.literal {
        Literal::Nil => NIL.clone(),
        Literal::Boolean(_) => BOOLEAN.clone(),
        Literal::Character(_) => CHARACTER.clone(),
        Literal::String(_) => STRING.clone(),
        Literal::Integer(value) => {
            if value.to_i32().is_none() {
                return Err(out_of_range(value.to_string()));
            }
            INTEGER.clone()
        }
        Literal::Decimal(value) => {
            if !value.to_f64().is_some_and(f64::is_finite) {
                return Err(out_of_range(value.to_string()));
            }
            DECIMAL.clone()
        }
    };

    expr.ty = Some(ty.clone());
    Ok(ty)
}

fn analyze_binary(analyzer: &mut Analyzer, expr: &mut BinaryExpr) -> Result<Type, Error> {
    let left = analyze_expr(analyzer, &mut expr.left)?;
    let right = analyze_expr(analyzer, &mut expr.right)?;

    let both = |ty: &Type| left == *ty && right == *ty;
    let either = |ty: &Type| left == *ty || right == *ty;

    let result = match expr.operator {
        BinaryOperator::And | BinaryOperator::Or if both(&*BOOLEAN) => Some(BOOLEAN.clone()),
        operator if operator.is_comparison() => {
            if is_assignable(&COMPARABLE, &left) && is_assignable(&COMPARABLE, &right) {
                Some(BOOLEAN.clone())
            } else {
                None
            }
        }
        BinaryOperator::Plus if either(&*STRING) => Some(STRING.clone()),
        BinaryOperator::Plus if both(&*INTEGER) => Some(INTEGER.clone()),
        BinaryOperator::Plus if both(&*DECIMAL) => Some(DECIMAL.clone()),
        BinaryOperator::Minus | BinaryOperator::Multiply | BinaryOperator::Divide => {
            if both(&*INTEGER) {
                Some(INTEGER.clone())
            } else if either(&*DECIMAL) {
                Some(DECIMAL.clone())
            } else {
                None
            }
        }
        _ => None,
    };

    let Some(ty) = result else {
        return Err(Error::new(
            ErrorImpl::InvalidOperator {
                operator: expr.operator.to_string(),
                left: left.to_string(),
                right: right.to_string(),
            },
            expr.span.start.clone(),
        ));
    };

    expr.ty = Some(ty.clone());
    Ok(ty)
}

fn analyze_access(analyzer: &mut Analyzer, expr: &mut AccessExpr) -> Result<Type, Error> {
    let variable = match &mut expr.receiver {
        Some(receiver) => {
            let receiver_type = analyze_expr(analyzer, receiver)?;
            receiver_type.get_field(&expr.name, expr.span.start.clone())?.clone()
        }
        None => analyzer.lookup_variable(&expr.name, expr.span.start.clone())?.clone(),
    };

    let ty = variable.ty.clone();
    expr.variable = Some(variable);
    Ok(ty)
}

fn analyze_function(analyzer: &mut Analyzer, expr: &mut FunctionExpr) -> Result<Type, Error> {
    let mut argument_types = Vec::with_capacity(expr.arguments.len());
    for argument in &mut expr.arguments {
        argument_types.push(analyze_expr(analyzer, argument)?);
    }

    let arity = expr.arguments.len();
    let function = match &mut expr.receiver {
        Some(receiver) => {
            let receiver_type = analyze_expr(analyzer, receiver)?;
            receiver_type.get_method(&expr.name, arity, expr.span.start.clone())?.clone()
        }
        None => analyzer.lookup_function(&expr.name, arity, expr.span.start.clone())?.clone(),
    };

    for ((argument, argument_type), parameter_type) in
        expr.arguments.iter().zip(&argument_types).zip(&function.parameter_types)
    {
        require_assignable(parameter_type, argument_type, argument.get_span().start.clone())?;
    }

    let ty = function.return_type.clone();
    expr.function = Some(function);
    Ok(ty)
}
