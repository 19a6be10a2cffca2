use std::{fmt::Display, sync::Arc};

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

lazy_static! {
    pub static ref NIL: Type = Type::builtin("Nil", "Void");
    pub static ref ANY: Type = Type::builtin("Any", "Object");
    pub static ref COMPARABLE: Type = Type::builtin("Comparable", "Comparable");
    pub static ref BOOLEAN: Type = Type::builtin("Boolean", "boolean");
    pub static ref INTEGER: Type = Type::builtin("Integer", "int");
    pub static ref DECIMAL: Type = Type::builtin("Decimal", "double");
    pub static ref CHARACTER: Type = Type::builtin("Character", "char");
    pub static ref STRING: Type = Type::builtin("String", "String");
    pub static ref INTEGER_ITERABLE: Type = Type::builtin("IntegerIterable", "Iterable<Integer>");
}

#[derive(Debug)]
pub struct TypeData {
    name: String,
    jvm_name: String,
    fields: FxHashMap<String, Variable>,
    methods: FxHashMap<(String, usize), Function>,
}

/// Nominal type descriptor.
///
/// Cheap to clone, compared by name.
#[derive(Debug, Clone)]
pub struct Type(Arc<TypeData>);

impl Type {
    pub fn builtin(name: &str, jvm_name: &str) -> Self {
        Type(Arc::new(TypeData {
            name: String::from(name),
            jvm_name: String::from(jvm_name),
            fields: FxHashMap::default(),
            methods: FxHashMap::default(),
        }))
    }

    /// Creates a record type with the given fields and method signatures.
    ///
    /// Method signatures list only explicit arguments, the receiver is implicit.
    pub fn record(name: &str, jvm_name: &str, fields: Vec<(String, Type)>, methods: Vec<Function>) -> Self {
        let fields = fields
            .into_iter()
            .map(|(field, ty)| {
                let variable = Variable::new(&field, &field, ty);
                (field, variable)
            })
            .collect();

        let methods = methods
            .into_iter()
            .map(|method| ((method.name.clone(), method.arity()), method))
            .collect();

        Type(Arc::new(TypeData {
            name: String::from(name),
            jvm_name: String::from(jvm_name),
            fields,
            methods,
        }))
    }

    pub fn get_name(&self) -> &str {
        &self.0.name
    }

    pub fn get_jvm_name(&self) -> &str {
        &self.0.jvm_name
    }

    pub fn get_field(&self, name: &str, position: Position) -> Result<&Variable, Error> {
        self.0.fields.get(name).ok_or_else(|| {
            Error::new(
                ErrorImpl::UndefinedName {
                    name: format!("{}.{}", self.0.name, name),
                },
                position,
            )
        })
    }

    pub fn get_method(&self, name: &str, arity: usize, position: Position) -> Result<&Function, Error> {
        self.0.methods.get(&(String::from(name), arity)).ok_or_else(|| {
            Error::new(
                ErrorImpl::UndefinedName {
                    name: format!("{}.{}/{}", self.0.name, name, arity),
                },
                position,
            )
        })
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.0.name == other.0.name
    }
}

impl Eq for Type {}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.name)
    }
}

/// A resolved variable binding.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub jvm_name: String,
    pub ty: Type,
}

impl Variable {
    pub fn new(name: &str, jvm_name: &str, ty: Type) -> Self {
        Variable {
            name: String::from(name),
            jvm_name: String::from(jvm_name),
            ty,
        }
    }
}

/// A resolved function signature, keyed by name and arity.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub jvm_name: String,
    pub parameter_types: Vec<Type>,
    pub return_type: Type,
}

impl Function {
    pub fn new(name: &str, jvm_name: &str, parameter_types: Vec<Type>, return_type: Type) -> Self {
        Function {
            name: String::from(name),
            jvm_name: String::from(jvm_name),
            parameter_types,
            return_type,
        }
    }

    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }
}

/// The set of named types known to a run.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: FxHashMap<String, Type>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        let mut types = FxHashMap::default();
        for ty in [
            &*NIL,
            &*ANY,
            &*COMPARABLE,
            &*BOOLEAN,
            &*INTEGER,
            &*DECIMAL,
            &*CHARACTER,
            &*STRING,
            &*INTEGER_ITERABLE,
        ] {
            types.insert(ty.get_name().to_string(), ty.clone());
        }

        TypeRegistry { types }
    }

    pub fn lookup(&self, name: &str, position: Position) -> Result<Type, Error> {
        self.types.get(name).cloned().ok_or_else(|| {
            Error::new(
                ErrorImpl::UnknownType {
                    type_: String::from(name),
                },
                position,
            )
        })
    }

    /// Registers a host-defined record type.
    pub fn register(&mut self, ty: Type) -> Result<(), Error> {
        if self.types.contains_key(ty.get_name()) {
            return Err(Error::new(
                ErrorImpl::DuplicateDefinition {
                    name: ty.get_name().to_string(),
                },
                Position::null(),
            ));
        }

        self.types.insert(ty.get_name().to_string(), ty);
        Ok(())
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a value of type `source` may be used where `target` is required.
pub fn is_assignable(target: &Type, source: &Type) -> bool {
    if target == source || *target == *ANY {
        return true;
    }

    *target == *COMPARABLE && [&*INTEGER, &*DECIMAL, &*CHARACTER, &*STRING].contains(&source)
}

pub fn require_assignable(target: &Type, source: &Type, position: Position) -> Result<(), Error> {
    if is_assignable(target, source) {
        Ok(())
    } else {
        Err(Error::new(
            ErrorImpl::TypeMismatch {
                expected: target.to_string(),
                received: source.to_string(),
            },
            position,
        ))
    }
}
