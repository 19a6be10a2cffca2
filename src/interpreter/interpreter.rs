use std::rc::Rc;

use tracing::{debug, trace};

use crate::{
    ast::{
        ast::{Expr, Method, Source, Stmt},
        statements::{AssignmentStmt, ForStmt, IfStmt, WhileStmt},
    },
    environment::{
        scope::{Environment, ScopeId},
        value::{PlcObject, Value},
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{
    expr::{evaluate, require_boolean},
    print_handler::PrintHandler,
};

/// A function implemented by the host, called with the evaluated arguments.
pub type NativeFunction = Rc<dyn Fn(&[PlcObject]) -> Result<PlcObject, Error>>;

/// A callable bound in a runtime scope.
#[derive(Clone)]
pub enum RuntimeFunction<'a> {
    Native(NativeFunction),
    /// A method of the program, closing over the scope it was defined in.
    Method { method: &'a Method, scope: ScopeId },
}

impl std::fmt::Debug for RuntimeFunction<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeFunction::Native(_) => write!(f, "Native"),
            RuntimeFunction::Method { method, scope } => {
                write!(f, "Method({}/{}, {:?})", method.name, method.parameters.len(), scope)
            }
        }
    }
}

/// Outcome of executing a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Normal,
    /// Unwinds to the nearest call frame.
    Return(PlcObject),
}

/// Evaluates an analyzed program.
#[derive(Debug)]
pub struct Interpreter<'a> {
    environment: Environment<PlcObject, RuntimeFunction<'a>>,
    scope: ScopeId,
    print_handler: PrintHandler,
}

impl<'a> Interpreter<'a> {
    pub fn new() -> Self {
        Self::with_print_handler(PrintHandler::default())
    }

    /// Creates an interpreter whose root scope holds the builtin `print`, writing to `print_handler`.
    pub fn with_print_handler(print_handler: PrintHandler) -> Self {
        let mut environment = Environment::new();
        let root = environment.root();

        let handler = print_handler.clone();
        let print: NativeFunction = Rc::new(move |arguments: &[PlcObject]| -> Result<PlcObject, Error> {
            for argument in arguments {
                handler.println(&argument.to_string());
            }
            Ok(PlcObject::nil())
        });
        // A fresh root scope is empty, this cannot collide
        let _ = environment.define_function(root, "print", 1, RuntimeFunction::Native(print), Position::null());

        Interpreter {
            environment,
            scope: root,
            print_handler,
        }
    }

    pub fn print_handler(&self) -> &PrintHandler {
        &self.print_handler
    }

    /// Pre-defines a variable in the root scope, for values supplied by the host.
    pub fn define_variable(&mut self, name: &str, value: PlcObject) -> Result<(), Error> {
        let root = self.environment.root();
        self.environment.define_variable(root, name, value, Position::null())
    }

    /// Pre-defines a native function in the root scope.
    pub fn define_function(&mut self, name: &str, arity: usize, function: NativeFunction) -> Result<(), Error> {
        let root = self.environment.root();
        self.environment
            .define_function(root, name, arity, RuntimeFunction::Native(function), Position::null())
    }

    pub fn lookup_variable(&self, name: &str, position: Position) -> Result<&PlcObject, Error> {
        self.environment.lookup_variable(self.scope, name, position)
    }

    pub fn lookup_variable_mut(&mut self, name: &str, position: Position) -> Result<&mut PlcObject, Error> {
        self.environment.lookup_variable_mut(self.scope, name, position)
    }

    /// Number of live scopes, the root included.
    pub fn scope_depth(&self) -> usize {
        self.environment.depth()
    }

    /// Runs the program: binds fields and methods in the root scope, then calls `main()`.
    pub fn run(&mut self, source: &'a Source) -> Result<PlcObject, Error> {
        let root = self.environment.root();

        for field in &source.fields {
            let value = match &field.value {
                Some(value) => evaluate(self, value)?,
                None => PlcObject::nil(),
            };
            self.environment
                .define_variable(root, &field.name, value, field.span.start.clone())?;
        }

        for method in &source.methods {
            let function = RuntimeFunction::Method { method, scope: root };
            self.environment.define_function(
                root,
                &method.name,
                method.parameters.len(),
                function,
                method.span.start.clone(),
            )?;
        }

        self.call_function("main", Vec::new(), source.span.end.clone())
    }

    /// Invokes the function bound to `name` with the given arity in the current scope chain.
    pub fn call_function(
        &mut self,
        name: &str,
        arguments: Vec<PlcObject>,
        position: Position,
    ) -> Result<PlcObject, Error> {
        let function = self
            .environment
            .lookup_function(self.scope, name, arguments.len(), position)?
            .clone();

        match function {
            RuntimeFunction::Native(native) => native(&arguments),
            RuntimeFunction::Method { method, scope } => self.invoke(method, scope, arguments),
        }
    }

    fn invoke(&mut self, method: &'a Method, scope: ScopeId, arguments: Vec<PlcObject>) -> Result<PlcObject, Error> {
        debug!(method = %method.name, arity = arguments.len(), "call");

        // Each call gets its own frame under the defining scope, never the caller's
        let flow = self.in_child_scope(scope, |interpreter| {
            for ((name, _), argument) in method.parameters.iter().zip(arguments) {
                let frame = interpreter.scope;
                interpreter
                    .environment
                    .define_variable(frame, name, argument, method.span.start.clone())?;
            }

            execute_block(interpreter, &method.statements)
        })?;

        match flow {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(PlcObject::nil()),
        }
    }

    fn declare(&mut self, name: &str, value: PlcObject, position: Position) -> Result<(), Error> {
        self.environment.define_variable(self.scope, name, value, position)
    }

    /// Runs `f` in a fresh child of `parent`, restoring the current scope and
    /// releasing the child afterwards even on error.
    fn in_child_scope<T>(
        &mut self,
        parent: ScopeId,
        f: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let previous = self.scope;
        let child = self.environment.child(parent);
        trace!(depth = self.environment.depth(), "enter scope");

        self.scope = child;
        let result = f(self);
        self.scope = previous;

        self.environment.release(child);
        trace!(depth = self.environment.depth(), "leave scope");
        result
    }
}

impl Default for Interpreter<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs an analyzed program with a default interpreter and returns `main`'s result.
pub fn interpret(source: &Source) -> Result<PlcObject, Error> {
    Interpreter::new().run(source)
}

pub fn execute_block(interpreter: &mut Interpreter, statements: &[Stmt]) -> Result<Flow, Error> {
    for stmt in statements {
        if let Flow::Return(value) = execute_stmt(interpreter, stmt)? {
            return Ok(Flow::Return(value));
        }
    }

    Ok(Flow::Normal)
}

pub fn execute_stmt(interpreter: &mut Interpreter, stmt: &Stmt) -> Result<Flow, Error> {
    match stmt {
        Stmt::Expression(stmt) => {
            evaluate(interpreter, &stmt.expression)?;
            Ok(Flow::Normal)
        }
        Stmt::Declaration(stmt) => {
            let value = match &stmt.value {
                Some(value) => evaluate(interpreter, value)?,
                None => PlcObject::nil(),
            };
            interpreter.declare(&stmt.name, value, stmt.span.start.clone())?;
            Ok(Flow::Normal)
        }
        Stmt::Assignment(stmt) => {
            execute_assignment(interpreter, stmt)?;
            Ok(Flow::Normal)
        }
        Stmt::If(stmt) => execute_if(interpreter, stmt),
        Stmt::For(stmt) => execute_for(interpreter, stmt),
        Stmt::While(stmt) => execute_while(interpreter, stmt),
        Stmt::Return(stmt) => Ok(Flow::Return(evaluate(interpreter, &stmt.value)?)),
    }
}

fn execute_assignment(interpreter: &mut Interpreter, stmt: &AssignmentStmt) -> Result<(), Error> {
    let Expr::Access(access) = &stmt.receiver else {
        return Err(Error::new(ErrorImpl::UnassignableReceiver, stmt.receiver.get_span().start.clone()));
    };

    let value = evaluate(interpreter, &stmt.value)?;
    let position = access.span.start.clone();

    match &access.receiver {
        None => {
            *interpreter.lookup_variable_mut(&access.name, position)? = value;
        }
        Some(receiver) if is_place(receiver) => {
            let target = resolve_place(interpreter, receiver)?;
            target.set_field(&access.name, value, position)?;
        }
        // The receiver is a temporary, the write is not observable afterwards
        Some(receiver) => {
            let mut target = evaluate(interpreter, receiver)?;
            target.set_field(&access.name, value, position)?;
        }
    }

    Ok(())
}

/// Whether the expression designates a variable or a field path rooted at one.
fn is_place(expr: &Expr) -> bool {
    match expr {
        Expr::Access(access) => access.receiver.as_deref().map_or(true, is_place),
        _ => false,
    }
}

fn resolve_place<'i>(interpreter: &'i mut Interpreter, expr: &Expr) -> Result<&'i mut PlcObject, Error> {
    let Expr::Access(access) = expr else {
        return Err(Error::new(ErrorImpl::UnassignableReceiver, expr.get_span().start.clone()));
    };

    let position = access.span.start.clone();
    match &access.receiver {
        None => interpreter.lookup_variable_mut(&access.name, position),
        Some(receiver) => resolve_place(interpreter, receiver)?.get_field_mut(&access.name, position),
    }
}

fn execute_if(interpreter: &mut Interpreter, stmt: &IfStmt) -> Result<Flow, Error> {
    let condition = evaluate(interpreter, &stmt.condition)?;
    let statements = if require_boolean(&condition, stmt.condition.get_span().start.clone())? {
        &stmt.then_statements
    } else {
        &stmt.else_statements
    };

    let scope = interpreter.scope;
    interpreter.in_child_scope(scope, |interpreter| execute_block(interpreter, statements))
}

fn execute_for(interpreter: &mut Interpreter, stmt: &ForStmt) -> Result<Flow, Error> {
    let iterable = evaluate(interpreter, &stmt.value)?;
    let Value::Iterable(elements) = iterable.value else {
        return Err(Error::new(
            ErrorImpl::NotIterable {
                received: iterable.ty.to_string(),
            },
            stmt.value.get_span().start.clone(),
        ));
    };

    let scope = interpreter.scope;
    for element in elements {
        let flow = interpreter.in_child_scope(scope, |interpreter| {
            interpreter.declare(&stmt.name, element, stmt.span.start.clone())?;
            execute_block(interpreter, &stmt.statements)
        })?;

        if let Flow::Return(_) = flow {
            return Ok(flow);
        }
    }

    Ok(Flow::Normal)
}

fn execute_while(interpreter: &mut Interpreter, stmt: &WhileStmt) -> Result<Flow, Error> {
    let scope = interpreter.scope;

    loop {
        let condition = evaluate(interpreter, &stmt.condition)?;
        if !require_boolean(&condition, stmt.condition.get_span().start.clone())? {
            return Ok(Flow::Normal);
        }

        let flow = interpreter.in_child_scope(scope, |interpreter| execute_block(interpreter, &stmt.statements))?;
        if let Flow::Return(_) = flow {
            return Ok(flow);
        }
    }
}
