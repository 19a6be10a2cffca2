//! Main generator module.
//!
//! Holds the output buffer and indentation state and emits the class skeleton:
//! fields, the JVM entry point and one Java method per program method. Statements
//! and expressions are emitted by the sibling modules.

use tracing::debug;

use crate::{
    ast::ast::{Field, Method, Source, Stmt},
    errors::errors::{Error, ErrorImpl},
    Span,
};

use super::{expr::gen_expression, stmt::gen_statement};

/// The state of a single emission run.
#[derive(Debug, Default)]
pub struct Generator {
    /// The Java source written so far
    output: String,
    /// Current indentation depth, four spaces per level
    indent: usize,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    /// Starts a new line at the current indentation.
    pub fn newline(&mut self) {
        self.output.push('\n');
        for _ in 0..self.indent {
            self.output.push_str("    ");
        }
    }

    pub fn into_output(self) -> String {
        self.output
    }

    /// Emits `{`, the statements one per line, and `}`. Empty blocks become `{}`.
    pub fn gen_block(&mut self, statements: &[Stmt]) -> Result<(), Error> {
        self.write("{");

        if !statements.is_empty() {
            self.indent += 1;
            for statement in statements {
                self.newline();
                gen_statement(self, statement)?;
            }
            self.indent -= 1;
            self.newline();
        }

        self.write("}");
        Ok(())
    }
}

/// The error for a node the analyzer has not filled in.
pub fn unanalyzed(span: &Span) -> Error {
    Error::new(ErrorImpl::UnanalyzedNode, span.start.clone())
}

/// Emits an analyzed program as a Java class named `Main`.
///
/// # Returns
///
/// The Java source, or an `UnanalyzedNode` error if analysis did not run.
pub fn generate(source: &Source) -> Result<String, Error> {
    let mut generator = Generator::new();
    generator.write("public class Main {");
    generator.indent += 1;
    generator.write("\n");

    if !source.fields.is_empty() {
        for field in &source.fields {
            generator.newline();
            gen_field(&mut generator, field)?;
        }
        generator.write("\n");
    }

    generator.newline();
    generator.write("public static void main(String[] args) {");
    generator.indent += 1;
    generator.newline();
    generator.write("System.exit(new Main().main());");
    generator.indent -= 1;
    generator.newline();
    generator.write("}");
    generator.write("\n");

    for method in &source.methods {
        generator.newline();
        gen_method(&mut generator, method)?;
        generator.write("\n");
    }

    generator.indent -= 1;
    generator.newline();
    generator.write("}");
    generator.write("\n");

    debug!(fields = source.fields.len(), methods = source.methods.len(), "generated class");
    Ok(generator.into_output())
}

fn gen_field(generator: &mut Generator, field: &Field) -> Result<(), Error> {
    let variable = field.variable.as_ref().ok_or_else(|| unanalyzed(&field.span))?;

    generator.write(&format!("{} {}", variable.ty.get_jvm_name(), variable.jvm_name));
    if let Some(value) = &field.value {
        generator.write(" = ");
        gen_expression(generator, value)?;
    }
    generator.write(";");

    Ok(())
}

fn gen_method(generator: &mut Generator, method: &Method) -> Result<(), Error> {
    let function = method.function.as_ref().ok_or_else(|| unanalyzed(&method.span))?;

    let parameters: Vec<String> = function
        .parameter_types
        .iter()
        .zip(&method.parameters)
        .map(|(ty, (name, _))| format!("{} {}", ty.get_jvm_name(), name))
        .collect();

    generator.write(&format!(
        "{} {}({}) ",
        function.return_type.get_jvm_name(),
        function.jvm_name,
        parameters.join(", ")
    ));
    generator.gen_block(&method.statements)
}
