use crate::{
    ast::ast::Stmt,
    errors::errors::Error,
};

use super::{
    expr::gen_expression,
    generator::{unanalyzed, Generator},
};

/// Emits one statement at the current position, without a trailing newline.
pub fn gen_statement(generator: &mut Generator, statement: &Stmt) -> Result<(), Error> {
    match statement {
        Stmt::Expression(stmt) => {
            gen_expression(generator, &stmt.expression)?;
            generator.write(";");
        }
        Stmt::Declaration(stmt) => {
            let variable = stmt.variable.as_ref().ok_or_else(|| unanalyzed(&stmt.span))?;

            generator.write(&format!("{} {}", variable.ty.get_jvm_name(), variable.jvm_name));
            if let Some(value) = &stmt.value {
                generator.write(" = ");
                gen_expression(generator, value)?;
            }
            generator.write(";");
        }
        Stmt::Assignment(stmt) => {
            gen_expression(generator, &stmt.receiver)?;
            generator.write(" = ");
            gen_expression(generator, &stmt.value)?;
            generator.write(";");
        }
        Stmt::If(stmt) => {
            generator.write("if (");
            gen_expression(generator, &stmt.condition)?;
            generator.write(") ");
            generator.gen_block(&stmt.then_statements)?;

            if !stmt.else_statements.is_empty() {
                generator.write(" else ");
                generator.gen_block(&stmt.else_statements)?;
            }
        }
        Stmt::For(stmt) => {
            generator.write(&format!("for (int {} : ", stmt.name));
            gen_expression(generator, &stmt.value)?;
            generator.write(") ");
            generator.gen_block(&stmt.statements)?;
        }
        Stmt::While(stmt) => {
            generator.write("while (");
            gen_expression(generator, &stmt.condition)?;
            generator.write(") ");
            generator.gen_block(&stmt.statements)?;
        }
        Stmt::Return(stmt) => {
            generator.write("return ");
            gen_expression(generator, &stmt.value)?;
            generator.write(";");
        }
    }

    Ok(())
}
