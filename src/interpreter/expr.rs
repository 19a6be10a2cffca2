use std::cmp::Ordering;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::{
    ast::{
        ast::Expr,
        expressions::{BinaryExpr, BinaryOperator, FunctionExpr, Literal},
    },
    environment::value::{PlcObject, Value},
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::interpreter::Interpreter;

/// Evaluates an expression to a runtime value.
pub fn evaluate(interpreter: &mut Interpreter, expr: &Expr) -> Result<PlcObject, Error> {
    match expr {
        Expr::Literal(literal) => Ok(match &literal.literal {
            Literal::Nil => PlcObject::nil(),
            Literal::Boolean(value) => PlcObject::boolean(*value),
            Literal::Integer(value) => PlcObject::integer(value.clone()),
            Literal::Decimal(value) => PlcObject::decimal(value.clone()),
            Literal::Character(value) => PlcObject::character(*value),
            Literal::String(value) => PlcObject::string(value.clone()),
        }),
        Expr::Group(group) => evaluate(interpreter, &group.expression),
        Expr::Binary(binary) => evaluate_binary(interpreter, binary),
        Expr::Access(access) => {
            let position = access.span.start.clone();
            match &access.receiver {
                Some(receiver) => {
                    let receiver = evaluate(interpreter, receiver)?;
                    Ok(receiver.get_field(&access.name, position)?.clone())
                }
                None => Ok(interpreter.lookup_variable(&access.name, position)?.clone()),
            }
        }
        Expr::Function(function) => evaluate_function(interpreter, function),
    }
}

fn evaluate_function(interpreter: &mut Interpreter, expr: &FunctionExpr) -> Result<PlcObject, Error> {
    let position = expr.span.start.clone();

    let receiver = match &expr.receiver {
        Some(receiver) => Some(evaluate(interpreter, receiver)?),
        None => None,
    };

    let mut arguments = Vec::with_capacity(expr.arguments.len());
    for argument in &expr.arguments {
        arguments.push(evaluate(interpreter, argument)?);
    }

    match receiver {
        Some(receiver) => receiver.call_method(&expr.name, &arguments, position),
        None => interpreter.call_function(&expr.name, arguments, position),
    }
}

fn evaluate_binary(interpreter: &mut Interpreter, expr: &BinaryExpr) -> Result<PlcObject, Error> {
    let position = expr.span.start.clone();
    let left = evaluate(interpreter, &expr.left)?;

    match expr.operator {
        BinaryOperator::And => {
            if !require_boolean(&left, position.clone())? {
                return Ok(PlcObject::boolean(false));
            }
            let right = evaluate(interpreter, &expr.right)?;
            Ok(PlcObject::boolean(require_boolean(&right, position)?))
        }
        BinaryOperator::Or => {
            if require_boolean(&left, position.clone())? {
                return Ok(PlcObject::boolean(true));
            }
            let right = evaluate(interpreter, &expr.right)?;
            Ok(PlcObject::boolean(require_boolean(&right, position)?))
        }
        operator => {
            let right = evaluate(interpreter, &expr.right)?;
            apply_binary(operator, &left, &right, position)
        }
    }
}

/// Applies a strict operator to two evaluated operands.
pub fn apply_binary(
    operator: BinaryOperator,
    left: &PlcObject,
    right: &PlcObject,
    position: Position,
) -> Result<PlcObject, Error> {
    match operator {
        BinaryOperator::Equals => Ok(PlcObject::boolean(equals(left, right))),
        BinaryOperator::NotEquals => Ok(PlcObject::boolean(!equals(left, right))),
        BinaryOperator::Less => compare(left, right, position).map(|ordering| PlcObject::boolean(ordering.is_lt())),
        BinaryOperator::LessEquals => {
            compare(left, right, position).map(|ordering| PlcObject::boolean(ordering.is_le()))
        }
        BinaryOperator::Greater => compare(left, right, position).map(|ordering| PlcObject::boolean(ordering.is_gt())),
        BinaryOperator::GreaterEquals => {
            compare(left, right, position).map(|ordering| PlcObject::boolean(ordering.is_ge()))
        }
        BinaryOperator::Plus => {
            if matches!(left.value, Value::String(_)) || matches!(right.value, Value::String(_)) {
                return Ok(PlcObject::string(format!("{}{}", left, right)));
            }

            match (&left.value, &right.value) {
                (Value::Integer(a), Value::Integer(b)) => Ok(PlcObject::integer(a + b)),
                (Value::Decimal(a), Value::Decimal(b)) => Ok(PlcObject::decimal(a + b)),
                _ => Err(mismatch(left, right, position)),
            }
        }
        BinaryOperator::Minus => match (&left.value, &right.value) {
            (Value::Integer(a), Value::Integer(b)) => Ok(PlcObject::integer(a - b)),
            (Value::Decimal(a), Value::Decimal(b)) => Ok(PlcObject::decimal(a - b)),
            _ => Err(mismatch(left, right, position)),
        },
        BinaryOperator::Multiply => match (&left.value, &right.value) {
            (Value::Integer(a), Value::Integer(b)) => Ok(PlcObject::integer(a * b)),
            (Value::Decimal(a), Value::Decimal(b)) => Ok(PlcObject::decimal(a * b)),
            _ => Err(mismatch(left, right, position)),
        },
        BinaryOperator::Divide => match (&left.value, &right.value) {
            (Value::Integer(_), Value::Integer(b)) if b.is_zero() => Err(Error::new(ErrorImpl::DivisionByZero, position)),
            (Value::Decimal(_), Value::Decimal(b)) if b.is_zero() => Err(Error::new(ErrorImpl::DivisionByZero, position)),
            // BigInt division truncates toward zero
            (Value::Integer(a), Value::Integer(b)) => Ok(PlcObject::integer(a / b)),
            (Value::Decimal(a), Value::Decimal(b)) => Ok(PlcObject::decimal(divide_decimal(a, b))),
            _ => Err(mismatch(left, right, position)),
        },
        BinaryOperator::And | BinaryOperator::Or => {
            let left = require_boolean(left, position.clone())?;
            let right = require_boolean(right, position)?;
            Ok(PlcObject::boolean(match operator {
                BinaryOperator::And => left && right,
                _ => left || right,
            }))
        }
    }
}

/// Decimals are equal only when both value and scale match, so `1.0 != 1.00`.
fn equals(left: &PlcObject, right: &PlcObject) -> bool {
    match (&left.value, &right.value) {
        (Value::Decimal(a), Value::Decimal(b)) => a.as_bigint_and_exponent() == b.as_bigint_and_exponent(),
        _ => left == right,
    }
}

fn compare(left: &PlcObject, right: &PlcObject, position: Position) -> Result<Ordering, Error> {
    match (&left.value, &right.value) {
        (Value::Integer(a), Value::Integer(b)) => Ok(a.cmp(b)),
        (Value::Decimal(a), Value::Decimal(b)) => Ok(a.cmp(b)),
        (Value::Character(a), Value::Character(b)) => Ok(a.cmp(b)),
        (Value::String(a), Value::String(b)) => Ok(a.cmp(b)),
        _ => Err(mismatch(left, right, position)),
    }
}

/// Divides at the dividend's scale, rounding half to even.
///
/// `b` must be non-zero.
pub fn divide_decimal(a: &BigDecimal, b: &BigDecimal) -> BigDecimal {
    let (a_digits, a_scale) = a.as_bigint_and_exponent();
    let (b_digits, b_scale) = b.as_bigint_and_exponent();

    // a / b at scale `a_scale` is a_digits * 10^b_scale / b_digits
    let mut numerator = a_digits;
    let mut denominator = b_digits;
    if b_scale >= 0 {
        numerator *= power_of_ten(b_scale.unsigned_abs());
    } else {
        denominator *= power_of_ten(b_scale.unsigned_abs());
    }

    BigDecimal::new(round_half_even(&numerator, &denominator), a_scale)
}

fn power_of_ten(exponent: u64) -> BigInt {
    let exponent = u32::try_from(exponent).unwrap_or(u32::MAX);
    BigInt::from(10u8).pow(exponent)
}

/// `numerator / denominator` rounded to the nearest integer, ties to even.
fn round_half_even(numerator: &BigInt, denominator: &BigInt) -> BigInt {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder.is_zero() {
        return quotient;
    }

    let step = if numerator.is_negative() == denominator.is_negative() {
        BigInt::from(1)
    } else {
        BigInt::from(-1)
    };

    let two = BigInt::from(2);
    let twice = remainder.abs() * &two;
    match twice.cmp(&denominator.abs()) {
        Ordering::Greater => quotient + step,
        Ordering::Equal if !(&quotient % &two).is_zero() => quotient + step,
        _ => quotient,
    }
}

pub(super) fn require_boolean(value: &PlcObject, position: Position) -> Result<bool, Error> {
    match value.value {
        Value::Boolean(value) => Ok(value),
        _ => Err(Error::new(
            ErrorImpl::RuntimeTypeMismatch {
                expected: String::from("Boolean"),
                received: value.ty.to_string(),
            },
            position,
        )),
    }
}

fn mismatch(left: &PlcObject, right: &PlcObject, position: Position) -> Error {
    Error::new(
        ErrorImpl::RuntimeTypeMismatch {
            expected: left.ty.to_string(),
            received: right.ty.to_string(),
        },
        position,
    )
}
