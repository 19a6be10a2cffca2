use tracing::{debug, trace};

use crate::{
    ast::{
        ast::{Expr, Field, Method, Source, Stmt},
        statements::{AssignmentStmt, DeclarationStmt, ForStmt, IfStmt, WhileStmt},
    },
    environment::{
        scope::{Environment, ScopeId},
        types::{
            require_assignable, Function, Type, TypeRegistry, Variable, ANY, BOOLEAN, INTEGER, INTEGER_ITERABLE, NIL,
        },
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::expr::analyze_expr;

/// State of the static pass: the known types and the scope chain of declarations.
#[derive(Debug)]
pub struct Analyzer {
    pub registry: TypeRegistry,
    environment: Environment<Variable, Function>,
    scope: ScopeId,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::with_registry(TypeRegistry::new())
    }

    /// Creates an analyzer whose root scope holds the builtin `print`.
    pub fn with_registry(registry: TypeRegistry) -> Self {
        let mut environment = Environment::new();
        let root = environment.root();

        let print = Function::new("print", "System.out.println", vec![ANY.clone()], NIL.clone());
        // A fresh root scope is empty, this cannot collide
        let _ = environment.define_function(root, "print", 1, print, Position::null());

        Analyzer {
            registry,
            environment,
            scope: root,
        }
    }

    /// Pre-defines a variable in the root scope, for values supplied by the host.
    pub fn define_variable(&mut self, name: &str, ty: Type) -> Result<(), Error> {
        let root = self.environment.root();
        self.environment
            .define_variable(root, name, Variable::new(name, name, ty), Position::null())
    }

    /// Pre-defines a host function in the root scope.
    pub fn define_function(&mut self, function: Function) -> Result<(), Error> {
        let root = self.environment.root();
        let name = function.name.clone();
        self.environment
            .define_function(root, &name, function.arity(), function, Position::null())
    }

    pub fn lookup_variable(&self, name: &str, position: Position) -> Result<&Variable, Error> {
        self.environment.lookup_variable(self.scope, name, position)
    }

    pub fn lookup_function(&self, name: &str, arity: usize, position: Position) -> Result<&Function, Error> {
        self.environment.lookup_function(self.scope, name, arity, position)
    }

    pub fn resolve_type(&self, name: &str, position: Position) -> Result<Type, Error> {
        self.registry.lookup(name, position)
    }

    /// Number of live scopes, the root included.
    pub fn scope_depth(&self) -> usize {
        self.environment.depth()
    }

    fn declare(&mut self, variable: Variable, position: Position) -> Result<(), Error> {
        let name = variable.name.clone();
        self.environment.define_variable(self.scope, &name, variable, position)
    }

    /// Runs `f` in a fresh child of the current scope, released afterwards even on error.
    fn in_child_scope<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, Error>) -> Result<T, Error> {
        let parent = self.scope;
        let child = self.environment.child(parent);
        trace!(depth = self.environment.depth(), "enter scope");

        self.scope = child;
        let result = f(self);
        self.scope = parent;

        self.environment.release(child);
        trace!(depth = self.environment.depth(), "leave scope");
        result
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Analyzes a whole program in place with a default analyzer.
///
/// # Returns
///
/// A tuple containing:
/// - The Analyzer (with the populated top-level scope)
/// - Ok if every node was resolved, or the first Error found
pub fn analyze(source: &mut Source) -> (Analyzer, Result<(), Error>) {
    let mut analyzer = Analyzer::new();
    let result = analyze_source(&mut analyzer, source);
    (analyzer, result)
}

pub fn analyze_source(analyzer: &mut Analyzer, source: &mut Source) -> Result<(), Error> {
    for field in &mut source.fields {
        analyze_field(analyzer, field)?;
    }

    for method in &mut source.methods {
        analyze_method(analyzer, method)?;
    }

    let main = analyzer
        .lookup_function("main", 0, source.span.end.clone())
        .map_err(|_| Error::new(ErrorImpl::MissingEntryPoint, source.span.end.clone()))?;

    let position = source
        .methods
        .iter()
        .find(|method| method.name == "main" && method.parameters.is_empty())
        .map(|method| method.span.start.clone())
        .unwrap_or_else(|| source.span.start.clone());

    require_assignable(&INTEGER, &main.return_type, position)
}

fn analyze_field(analyzer: &mut Analyzer, field: &mut Field) -> Result<(), Error> {
    let ty = analyzer.resolve_type(&field.type_name, field.span.start.clone())?;

    if let Some(value) = &mut field.value {
        let value_type = analyze_expr(analyzer, value)?;
        require_assignable(&ty, &value_type, value.get_span().start.clone())?;
    }

    let variable = Variable::new(&field.name, &field.name, ty);
    analyzer.declare(variable.clone(), field.span.start.clone())?;
    field.variable = Some(variable);

    Ok(())
}

fn analyze_method(analyzer: &mut Analyzer, method: &mut Method) -> Result<(), Error> {
    let position = method.span.start.clone();

    let parameter_types = method
        .parameters
        .iter()
        .map(|(_, type_name)| analyzer.resolve_type(type_name, position.clone()))
        .collect::<Result<Vec<Type>, Error>>()?;

    let return_type = match &method.return_type_name {
        Some(type_name) => analyzer.resolve_type(type_name, position.clone())?,
        None => NIL.clone(),
    };

    // Registered before the body so the method can call itself
    let function = Function::new(&method.name, &method.name, parameter_types.clone(), return_type);
    let scope = analyzer.scope;
    analyzer
        .environment
        .define_function(scope, &method.name, function.arity(), function.clone(), position.clone())?;
    method.function = Some(function);
    debug!(method = %method.name, arity = parameter_types.len(), "registered method");

    analyzer.in_child_scope(|analyzer| {
        for ((name, _), ty) in method.parameters.iter().zip(parameter_types) {
            analyzer.declare(Variable::new(name, name, ty), position.clone())?;
        }

        analyze_block(analyzer, &mut method.statements)
    })
}

fn analyze_block(analyzer: &mut Analyzer, statements: &mut [Stmt]) -> Result<(), Error> {
    for stmt in statements {
        analyze_stmt(analyzer, stmt)?;
    }
    Ok(())
}

pub fn analyze_stmt(analyzer: &mut Analyzer, stmt: &mut Stmt) -> Result<(), Error> {
    match stmt {
        Stmt::Expression(stmt) => {
            if !matches!(stmt.expression, Expr::Function(_)) {
                return Err(Error::new(ErrorImpl::InvalidExpressionStatement, stmt.span.start.clone()));
            }
            analyze_expr(analyzer, &mut stmt.expression)?;
            Ok(())
        }
        Stmt::Declaration(stmt) => analyze_declaration(analyzer, stmt),
        Stmt::Assignment(stmt) => analyze_assignment(analyzer, stmt),
        Stmt::If(stmt) => analyze_if(analyzer, stmt),
        Stmt::For(stmt) => analyze_for(analyzer, stmt),
        Stmt::While(stmt) => analyze_while(analyzer, stmt),
        Stmt::Return(stmt) => {
            analyze_expr(analyzer, &mut stmt.value)?;
            Ok(())
        }
    }
}

fn analyze_declaration(analyzer: &mut Analyzer, stmt: &mut DeclarationStmt) -> Result<(), Error> {
    let declared = match &stmt.type_name {
        Some(type_name) => Some(analyzer.resolve_type(type_name, stmt.span.start.clone())?),
        None => None,
    };

    let value_type = match &mut stmt.value {
        Some(value) => Some((analyze_expr(analyzer, value)?, value.get_span().start.clone())),
        None => None,
    };

    let ty = match (declared, value_type) {
        (Some(declared), Some((value_type, position))) => {
            require_assignable(&declared, &value_type, position)?;
            declared
        }
        (Some(declared), None) => declared,
        (None, Some((value_type, _))) => value_type,
        (None, None) => {
            return Err(Error::new(
                ErrorImpl::ExpectedExplicitValue {
                    variable: stmt.name.clone(),
                },
                stmt.span.start.clone(),
            ))
        }
    };

    let variable = Variable::new(&stmt.name, &stmt.name, ty);
    analyzer.declare(variable.clone(), stmt.span.start.clone())?;
    stmt.variable = Some(variable);

    Ok(())
}

fn analyze_assignment(analyzer: &mut Analyzer, stmt: &mut AssignmentStmt) -> Result<(), Error> {
    if !matches!(stmt.receiver, Expr::Access(_)) {
        return Err(Error::new(ErrorImpl::UnassignableReceiver, stmt.receiver.get_span().start.clone()));
    }

    let receiver_type = analyze_expr(analyzer, &mut stmt.receiver)?;
    let value_type = analyze_expr(analyzer, &mut stmt.value)?;

    require_assignable(&receiver_type, &value_type, stmt.value.get_span().start.clone())
}

fn analyze_if(analyzer: &mut Analyzer, stmt: &mut IfStmt) -> Result<(), Error> {
    let condition = analyze_expr(analyzer, &mut stmt.condition)?;
    require_assignable(&BOOLEAN, &condition, stmt.condition.get_span().start.clone())?;

    if stmt.then_statements.is_empty() {
        return Err(Error::new(
            ErrorImpl::EmptyBody {
                construct: String::from("IF"),
            },
            stmt.span.start.clone(),
        ));
    }

    analyzer.in_child_scope(|analyzer| analyze_block(analyzer, &mut stmt.then_statements))?;
    analyzer.in_child_scope(|analyzer| analyze_block(analyzer, &mut stmt.else_statements))
}

fn analyze_for(analyzer: &mut Analyzer, stmt: &mut ForStmt) -> Result<(), Error> {
    let iterable = analyze_expr(analyzer, &mut stmt.value)?;
    require_assignable(&INTEGER_ITERABLE, &iterable, stmt.value.get_span().start.clone())?;

    if stmt.statements.is_empty() {
        return Err(Error::new(
            ErrorImpl::EmptyBody {
                construct: String::from("FOR"),
            },
            stmt.span.start.clone(),
        ));
    }

    let position = stmt.span.start.clone();
    analyzer.in_child_scope(|analyzer| {
        analyzer.declare(Variable::new(&stmt.name, &stmt.name, INTEGER.clone()), position)?;
        analyze_block(analyzer, &mut stmt.statements)
    })
}

fn analyze_while(analyzer: &mut Analyzer, stmt: &mut WhileStmt) -> Result<(), Error> {
    let condition = analyze_expr(analyzer, &mut stmt.condition)?;
    require_assignable(&BOOLEAN, &condition, stmt.condition.get_span().start.clone())?;

    analyzer.in_child_scope(|analyzer| analyze_block(analyzer, &mut stmt.statements))
}
