use std::{fmt::Display, rc::Rc};

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use rustc_hash::FxHashMap;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::types::{Type, BOOLEAN, CHARACTER, DECIMAL, INTEGER, INTEGER_ITERABLE, NIL, STRING};

/// A method implemented by the host, called with the receiver and the evaluated arguments.
pub type NativeMethod = Rc<dyn Fn(&PlcObject, &[PlcObject]) -> Result<PlcObject, Error>>;

#[derive(Clone)]
pub struct Record {
    fields: FxHashMap<String, PlcObject>,
    methods: FxHashMap<(String, usize), NativeMethod>,
}

impl Record {
    pub fn new() -> Self {
        Record {
            fields: FxHashMap::default(),
            methods: FxHashMap::default(),
        }
    }

    pub fn with_field(mut self, name: &str, value: PlcObject) -> Self {
        self.fields.insert(String::from(name), value);
        self
    }

    pub fn with_method(mut self, name: &str, arity: usize, method: NativeMethod) -> Self {
        self.methods.insert((String::from(name), arity), method);
        self
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Record")
            .field("fields", &self.fields)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

/// The closed set of runtime representations.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Boolean(bool),
    Integer(BigInt),
    Decimal(BigDecimal),
    Character(char),
    String(String),
    Iterable(Vec<PlcObject>),
    Record(Record),
}

/// A runtime value together with its type.
#[derive(Debug, Clone, PartialEq)]
pub struct PlcObject {
    pub ty: Type,
    pub value: Value,
}

impl PlcObject {
    pub fn nil() -> Self {
        PlcObject {
            ty: NIL.clone(),
            value: Value::Nil,
        }
    }

    pub fn boolean(value: bool) -> Self {
        PlcObject {
            ty: BOOLEAN.clone(),
            value: Value::Boolean(value),
        }
    }

    pub fn integer(value: BigInt) -> Self {
        PlcObject {
            ty: INTEGER.clone(),
            value: Value::Integer(value),
        }
    }

    pub fn decimal(value: BigDecimal) -> Self {
        PlcObject {
            ty: DECIMAL.clone(),
            value: Value::Decimal(value),
        }
    }

    pub fn character(value: char) -> Self {
        PlcObject {
            ty: CHARACTER.clone(),
            value: Value::Character(value),
        }
    }

    pub fn string(value: String) -> Self {
        PlcObject {
            ty: STRING.clone(),
            value: Value::String(value),
        }
    }

    /// An `IntegerIterable` over the given integers.
    pub fn integers<I: IntoIterator<Item = i64>>(values: I) -> Self {
        PlcObject {
            ty: INTEGER_ITERABLE.clone(),
            value: Value::Iterable(values.into_iter().map(|value| PlcObject::integer(BigInt::from(value))).collect()),
        }
    }

    pub fn record(ty: Type, record: Record) -> Self {
        PlcObject {
            ty,
            value: Value::Record(record),
        }
    }

    pub fn get_field(&self, name: &str, position: Position) -> Result<&PlcObject, Error> {
        match &self.value {
            Value::Record(record) => record.fields.get(name).ok_or_else(|| self.undefined(name, position)),
            _ => Err(self.undefined(name, position)),
        }
    }

    pub fn get_field_mut(&mut self, name: &str, position: Position) -> Result<&mut PlcObject, Error> {
        let error = self.undefined(name, position);
        match &mut self.value {
            Value::Record(record) => record.fields.get_mut(name).ok_or(error),
            _ => Err(error),
        }
    }

    pub fn set_field(&mut self, name: &str, value: PlcObject, position: Position) -> Result<(), Error> {
        *self.get_field_mut(name, position)? = value;
        Ok(())
    }

    pub fn call_method(&self, name: &str, arguments: &[PlcObject], position: Position) -> Result<PlcObject, Error> {
        let method = match &self.value {
            Value::Record(record) => record.methods.get(&(String::from(name), arguments.len())).cloned(),
            _ => None,
        };

        match method {
            Some(method) => method(self, arguments),
            None => Err(self.undefined(&format!("{}/{}", name, arguments.len()), position)),
        }
    }

    fn undefined(&self, name: &str, position: Position) -> Error {
        Error::new(
            ErrorImpl::UndefinedName {
                name: format!("{}.{}", self.ty, name),
            },
            position,
        )
    }
}

impl Display for PlcObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Value::Nil => write!(f, "NIL"),
            Value::Boolean(value) => write!(f, "{}", value),
            Value::Integer(value) => write!(f, "{}", value),
            Value::Decimal(value) => write!(f, "{}", value),
            Value::Character(value) => write!(f, "{}", value),
            Value::String(value) => write!(f, "{}", value),
            Value::Iterable(values) => {
                let items: Vec<String> = values.iter().map(|value| value.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
            Value::Record(record) => {
                let mut names: Vec<&String> = record.fields.keys().collect();
                names.sort();
                let items: Vec<String> = names
                    .into_iter()
                    .map(|name| format!("{}: {}", name, record.fields[name]))
                    .collect();
                write!(f, "{} {{ {} }}", self.ty, items.join(", "))
            }
        }
    }
}
