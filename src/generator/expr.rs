use crate::{
    ast::{
        ast::Expr,
        expressions::{BinaryOperator, Literal},
    },
    errors::errors::Error,
};

use super::generator::{unanalyzed, Generator};

/// Emits Java source for the given expression.
pub fn gen_expression(generator: &mut Generator, expression: &Expr) -> Result<(), Error> {
    if expression.get_type().is_none() {
        return Err(unanalyzed(expression.get_span()));
    }

    match expression {
        Expr::Literal(literal) => {
            let text = match &literal.literal {
                Literal::Nil => String::from("null"),
                Literal::Boolean(value) => value.to_string(),
                Literal::Integer(value) => value.to_string(),
                Literal::Decimal(value) => value.to_string(),
                Literal::Character(value) => format!("'{}'", escape(&value.to_string())),
                Literal::String(value) => format!("\"{}\"", escape(value)),
            };
            generator.write(&text);
        }
        Expr::Group(group) => {
            generator.write("(");
            gen_expression(generator, &group.expression)?;
            generator.write(")");
        }
        Expr::Binary(binary) => {
            gen_expression(generator, &binary.left)?;
            let operator = match binary.operator {
                BinaryOperator::And => String::from("&&"),
                BinaryOperator::Or => String::from("||"),
                operator => operator.to_string(),
            };
            generator.write(&format!(" {} ", operator));
            gen_expression(generator, &binary.right)?;
        }
        Expr::Access(access) => {
            let variable = access.variable.as_ref().ok_or_else(|| unanalyzed(&access.span))?;

            if let Some(receiver) = &access.receiver {
                gen_expression(generator, receiver)?;
                generator.write(".");
            }
            generator.write(&variable.jvm_name);
        }
        Expr::Function(call) => {
            let function = call.function.as_ref().ok_or_else(|| unanalyzed(&call.span))?;

            if let Some(receiver) = &call.receiver {
                gen_expression(generator, receiver)?;
                generator.write(".");
            }
            generator.write(&function.jvm_name);
            generator.write("(");
            for (index, argument) in call.arguments.iter().enumerate() {
                if index != 0 {
                    generator.write(", ");
                }
                gen_expression(generator, argument)?;
            }
            generator.write(")");
        }
    }

    Ok(())
}

/// Escapes a literal for a Java source file.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\u{8}' => escaped.push_str("\\b"),
            c => escaped.push(c),
        }
    }
    escaped
}
