//! Unit tests for the generator module.

use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::generator::generate;
use crate::{
    analyzer::analyzer::{analyze_source, Analyzer},
    ast::ast::Source,
    environment::types::INTEGER_ITERABLE,
    errors::errors::ErrorImpl,
    lexer::lexer::tokenize,
    parser::parser::parse,
};

fn parse_source(program: &str) -> Source {
    let tokens = tokenize(program.to_string(), Some("test.plc".to_string())).unwrap();
    parse(tokens, Rc::new("test.plc".to_string())).1.unwrap()
}

fn emit(program: &str) -> String {
    let mut analyzer = Analyzer::new();
    analyzer.define_variable("list", INTEGER_ITERABLE.clone()).unwrap();

    let mut source = parse_source(program);
    analyze_source(&mut analyzer, &mut source).unwrap();
    generate(&source).unwrap()
}

/// Emits `body` as the statements of `main` and returns the lines between its braces.
fn emit_body(body: &str) -> String {
    let output = emit(&format!("DEF main(): Integer DO {} RETURN 0; END", body));

    let start = output.find("int main() {\n").unwrap() + "int main() {\n".len();
    let end = output[start..].find("        return 0;").unwrap() + start;
    output[start..end].to_string()
}

#[test]
fn test_generate_minimal_class() {
    let output = emit("DEF main(): Integer DO print(\"Hello, World!\"); RETURN 0; END");

    assert_eq!(
        output,
        "public class Main {\n\
         \n    public static void main(String[] args) {\
         \n        System.exit(new Main().main());\
         \n    }\n\
         \n    int main() {\
         \n        System.out.println(\"Hello, World!\");\
         \n        return 0;\
         \n    }\n\
         \n}\n"
    );
}

#[test]
fn test_generate_fields_and_methods() {
    let output = emit(
        "LET x: Integer = 1;
        LET y: Decimal;
        DEF area(w: Integer, h: Decimal): Decimal DO RETURN h; END
        DEF log() DO END
        DEF main(): Integer DO RETURN x; END",
    );

    assert_eq!(
        output,
        "public class Main {\n\
         \n    int x = 1;\
         \n    double y;\n\
         \n    public static void main(String[] args) {\
         \n        System.exit(new Main().main());\
         \n    }\n\
         \n    double area(int w, double h) {\
         \n        return h;\
         \n    }\n\
         \n    Void log() {}\n\
         \n    int main() {\
         \n        return x;\
         \n    }\n\
         \n}\n"
    );
}

#[test]
fn test_generate_declarations_and_assignments() {
    assert_eq!(
        emit_body("LET a: String; LET b = 'c'; LET d: Any = \"e\"; a = \"z\";"),
        "        String a;\n        char b = 'c';\n        Object d = \"e\";\n        a = \"z\";\n"
    );
}

#[test]
fn test_generate_if() {
    assert_eq!(
        emit_body("IF TRUE DO print(1); END"),
        "        if (true) {\n            System.out.println(1);\n        }\n"
    );

    assert_eq!(
        emit_body("IF FALSE DO print(1); ELSE print(2); END"),
        "        if (false) {\n            System.out.println(1);\n        } else {\n            System.out.println(2);\n        }\n"
    );
}

#[test]
fn test_generate_loops() {
    assert_eq!(
        emit_body("FOR n IN list DO print(n); END"),
        "        for (int n : list) {\n            System.out.println(n);\n        }\n"
    );

    assert_eq!(emit_body("WHILE FALSE DO END"), "        while (false) {}\n");

    assert_eq!(
        emit_body("LET i = 0; WHILE i < 3 DO i = i + 1; END"),
        "        int i = 0;\n        while (i < 3) {\n            i = i + 1;\n        }\n"
    );
}

#[test]
fn test_generate_expressions() {
    assert_eq!(
        emit_body("print(TRUE AND (1 < 2 OR FALSE)); print(NIL); print(3.50 * 2.0);"),
        "        System.out.println(true && (1 < 2 || false));\n        System.out.println(null);\n        System.out.println(3.50 * 2.0);\n"
    );
}

#[test]
fn test_generate_escapes_literals() {
    assert_eq!(
        emit_body("print(\"say \\\"hi\\\"\\n\"); print('\\'');"),
        "        System.out.println(\"say \\\"hi\\\"\\n\");\n        System.out.println('\\'');\n"
    );
}

#[test]
fn test_generate_requires_analysis() {
    let source = parse_source("DEF main(): Integer DO RETURN 0; END");

    let error = generate(&source).unwrap_err();
    assert_eq!(error.get_kind(), &ErrorImpl::UnanalyzedNode);
}
