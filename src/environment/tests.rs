//! Unit tests for the environment module.

use std::rc::Rc;

use num_bigint::BigInt;

use super::{
    scope::Environment,
    types::{
        is_assignable, require_assignable, Function, Type, TypeRegistry, ANY, BOOLEAN, CHARACTER, COMPARABLE,
        DECIMAL, INTEGER, INTEGER_ITERABLE, NIL, STRING,
    },
    value::{PlcObject, Record},
};
use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

fn all_builtins() -> Vec<Type> {
    vec![
        NIL.clone(),
        ANY.clone(),
        COMPARABLE.clone(),
        BOOLEAN.clone(),
        INTEGER.clone(),
        DECIMAL.clone(),
        CHARACTER.clone(),
        STRING.clone(),
        INTEGER_ITERABLE.clone(),
    ]
}

fn point_type() -> Type {
    Type::record(
        "Point",
        "Point",
        vec![(String::from("x"), INTEGER.clone()), (String::from("y"), INTEGER.clone())],
        vec![Function::new("scale", "scale", vec![INTEGER.clone()], NIL.clone())],
    )
}

#[test]
fn test_assignable_to_itself_and_any() {
    let mut types = all_builtins();
    types.push(point_type());

    for ty in &types {
        assert!(is_assignable(ty, ty), "{} should accept itself", ty);
        assert!(is_assignable(&ANY, ty), "Any should accept {}", ty);
    }
}

#[test]
fn test_comparable_accepts_exactly_the_ordered_types() {
    let accepted = [&*INTEGER, &*DECIMAL, &*CHARACTER, &*STRING];

    for ty in all_builtins() {
        if ty == *COMPARABLE {
            continue;
        }
        assert_eq!(is_assignable(&COMPARABLE, &ty), accepted.contains(&&ty), "Comparable vs {}", ty);
    }

    assert!(!is_assignable(&COMPARABLE, &ANY));
    assert!(!is_assignable(&COMPARABLE, &point_type()));
}

#[test]
fn test_assignability_is_directional() {
    assert!(!is_assignable(&INTEGER, &ANY));
    assert!(!is_assignable(&INTEGER, &DECIMAL));
    assert!(!is_assignable(&STRING, &COMPARABLE));
}

#[test]
fn test_require_assignable_reports_both_types() {
    let error = require_assignable(&INTEGER, &DECIMAL, Position::null()).unwrap_err();

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::TypeMismatch {
            expected: String::from("Integer"),
            received: String::from("Decimal")
        }
    );
}

#[test]
fn test_registry_lookup_and_register() {
    let mut registry = TypeRegistry::new();

    assert_eq!(registry.lookup("Integer", Position::null()).unwrap(), *INTEGER);
    assert_eq!(registry.lookup("IntegerIterable", Position::null()).unwrap().get_jvm_name(), "Iterable<Integer>");
    assert_eq!(registry.lookup("Point", Position::null()).unwrap_err().get_error_name(), "UnknownType");

    registry.register(point_type()).unwrap();
    assert_eq!(registry.lookup("Point", Position::null()).unwrap(), point_type());
    assert_eq!(registry.register(point_type()).unwrap_err().get_error_name(), "DuplicateDefinition");
}

#[test]
fn test_record_type_members() {
    let point = point_type();

    assert_eq!(point.get_field("x", Position::null()).unwrap().ty, *INTEGER);
    assert!(point.get_field("z", Position::null()).is_err());
    assert_eq!(point.get_method("scale", 1, Position::null()).unwrap().return_type, *NIL);
    assert!(point.get_method("scale", 0, Position::null()).is_err());
}

#[test]
fn test_lookup_walks_outward() {
    let mut environment: Environment<i32, ()> = Environment::new();
    let root = environment.root();
    environment.define_variable(root, "x", 1, Position::null()).unwrap();

    let child = environment.child(root);
    environment.define_variable(child, "y", 2, Position::null()).unwrap();

    assert_eq!(*environment.lookup_variable(child, "x", Position::null()).unwrap(), 1);
    assert_eq!(*environment.lookup_variable(child, "y", Position::null()).unwrap(), 2);
    assert!(environment.lookup_variable(root, "y", Position::null()).is_err());
}

#[test]
fn test_shadowing_and_duplicates() {
    let mut environment: Environment<i32, ()> = Environment::new();
    let root = environment.root();
    environment.define_variable(root, "x", 1, Position::null()).unwrap();

    let error = environment.define_variable(root, "x", 2, Position::null()).unwrap_err();
    assert_eq!(error.get_error_name(), "DuplicateDefinition");

    let child = environment.child(root);
    environment.define_variable(child, "x", 3, Position::null()).unwrap();
    assert_eq!(*environment.lookup_variable(child, "x", Position::null()).unwrap(), 3);
    assert_eq!(*environment.lookup_variable(root, "x", Position::null()).unwrap(), 1);
}

#[test]
fn test_functions_are_keyed_by_arity() {
    let mut environment: Environment<(), &str> = Environment::new();
    let root = environment.root();
    environment.define_function(root, "f", 0, "nullary", Position::null()).unwrap();
    environment.define_function(root, "f", 1, "unary", Position::null()).unwrap();

    assert_eq!(*environment.lookup_function(root, "f", 1, Position::null()).unwrap(), "unary");
    assert_eq!(
        environment.lookup_function(root, "f", 2, Position::null()).unwrap_err().get_error_name(),
        "UndefinedName"
    );
    assert!(environment.define_function(root, "f", 0, "again", Position::null()).is_err());
}

#[test]
fn test_release_is_lifo() {
    let mut environment: Environment<i32, ()> = Environment::new();
    let root = environment.root();
    let outer = environment.child(root);
    let _inner = environment.child(outer);
    assert_eq!(environment.depth(), 3);

    environment.release(outer);
    assert_eq!(environment.depth(), 1);

    let again = environment.child(root);
    assert!(environment.lookup_variable(again, "anything", Position::null()).is_err());
}

#[test]
fn test_variables_keep_insertion_order() {
    let mut environment: Environment<i32, ()> = Environment::new();
    let root = environment.root();
    for (index, name) in ["b", "a", "c"].iter().enumerate() {
        environment.define_variable(root, name, index as i32, Position::null()).unwrap();
    }

    let names: Vec<&str> = environment.variables(root).map(|(name, _)| name).collect();
    assert_eq!(names, vec!["b", "a", "c"]);
}

#[test]
fn test_record_fields_and_methods() {
    let record = Record::new()
        .with_field("x", PlcObject::integer(BigInt::from(1)))
        .with_method(
            "describe",
            0,
            Rc::new(|receiver: &PlcObject, _: &[PlcObject]| -> Result<PlcObject, Error> {
                Ok(PlcObject::string(receiver.to_string()))
            }),
        );
    let mut point = PlcObject::record(point_type(), record);

    point.set_field("x", PlcObject::integer(BigInt::from(5)), Position::null()).unwrap();
    assert_eq!(point.get_field("x", Position::null()).unwrap(), &PlcObject::integer(BigInt::from(5)));
    assert!(point.set_field("z", PlcObject::nil(), Position::null()).is_err());

    let described = point.call_method("describe", &[], Position::null()).unwrap();
    assert_eq!(described, PlcObject::string(String::from("Point { x: 5 }")));
    assert!(point.call_method("describe", &[PlcObject::nil()], Position::null()).is_err());
}

#[test]
fn test_copies_do_not_alias() {
    let original = PlcObject::record(point_type(), Record::new().with_field("x", PlcObject::integer(BigInt::from(1))));
    let mut copy = original.clone();
    copy.set_field("x", PlcObject::integer(BigInt::from(2)), Position::null()).unwrap();

    assert_eq!(original.get_field("x", Position::null()).unwrap(), &PlcObject::integer(BigInt::from(1)));
}

#[test]
fn test_display_forms() {
    assert_eq!(PlcObject::nil().to_string(), "NIL");
    assert_eq!(PlcObject::boolean(true).to_string(), "true");
    assert_eq!(PlcObject::character('c').to_string(), "c");
    assert_eq!(PlcObject::integers([1, 2, 3]).to_string(), "[1, 2, 3]");
    assert_eq!(PlcObject::integers([]).ty, *INTEGER_ITERABLE);
}
