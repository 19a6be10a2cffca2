//! Integration tests for end-to-end runs.
//!
//! These tests drive complete programs through tokenization, parsing, analysis and
//! then either interpretation or Java emission, the way the CLI does.

use std::rc::Rc;

use num_bigint::BigInt;
use plc::{
    analyzer::analyzer::{analyze, analyze_source, Analyzer},
    ast::ast::Source,
    environment::{
        types::INTEGER_ITERABLE,
        value::{PlcObject, Value},
    },
    errors::errors::{Error, ErrorPhase},
    generator::generator::generate,
    interpreter::{interpreter::Interpreter, print_handler::PrintHandler},
    lexer::lexer::tokenize,
    parser::parser::parse,
    render_error,
};
use pretty_assertions::assert_eq;

fn front_end(program: &str) -> Result<Source, Error> {
    let tokens = tokenize(program.to_string(), Some("test.plc".to_string()))?;
    let (_, source) = parse(tokens, Rc::new("test.plc".to_string()));
    let mut source = source?;
    analyze(&mut source).1?;
    Ok(source)
}

fn run(program: &str) -> Result<(PlcObject, String), Error> {
    let source = front_end(program)?;

    let mut interpreter = Interpreter::with_print_handler(PrintHandler::buffer());
    let result = interpreter.run(&source)?;
    Ok((result, interpreter.print_handler().get_output()))
}

#[test]
fn test_hello_world() {
    let (result, output) = run("DEF main(): Integer DO print(\"Hello, World!\"); RETURN 0; END").unwrap();

    assert_eq!(result, PlcObject::integer(BigInt::from(0)));
    assert_eq!(output, "Hello, World!\n");
}

#[test]
fn test_fizzbuzz() {
    let program = "
        LET limit: Integer = 15;

        DEF divides(n: Integer, d: Integer): Boolean DO
            RETURN n - (n / d) * d == 0;
        END

        DEF main(): Integer DO
            LET i = 1;
            WHILE i <= limit DO
                IF divides(i, 15) DO
                    print(\"FizzBuzz\");
                ELSE
                    IF divides(i, 3) DO
                        print(\"Fizz\");
                    ELSE
                        IF divides(i, 5) DO print(\"Buzz\"); ELSE print(i); END
                    END
                END
                i = i + 1;
            END
            RETURN 0;
        END
    ";

    let (_, output) = run(program).unwrap();
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 15);
    assert_eq!(lines[2], "Fizz");
    assert_eq!(lines[4], "Buzz");
    assert_eq!(lines[6], "7");
    assert_eq!(lines[14], "FizzBuzz");
}

#[test]
fn test_fibonacci_with_fields() {
    let program = "
        LET calls: Integer = 0;

        DEF fib(n: Integer): Integer DO
            calls = calls + 1;
            IF n < 2 DO RETURN n; END
            RETURN fib(n - 1) + fib(n - 2);
        END

        DEF main(): Integer DO
            LET result = fib(10);
            print(\"calls: \" + calls);
            RETURN result;
        END
    ";

    let (result, output) = run(program).unwrap();

    assert_eq!(result, PlcObject::integer(BigInt::from(55)));
    assert_eq!(output, "calls: 177\n");
}

#[test]
fn test_decimal_average() {
    let program = "
        DEF main(): Integer DO
            LET total = 10.00;
            print(total / 3.0);
            print(total / 4.0);
            RETURN 0;
        END
    ";

    let (_, output) = run(program).unwrap();
    assert_eq!(output, "3.33\n2.50\n");
}

#[test]
fn test_host_provided_iterable() {
    let program = "
        DEF main(): Integer DO
            LET sum = 0;
            FOR n IN numbers DO sum = sum + n * n; END
            RETURN sum;
        END
    ";

    let tokens = tokenize(program.to_string(), Some("test.plc".to_string())).unwrap();
    let mut source = parse(tokens, Rc::new("test.plc".to_string())).1.unwrap();

    let mut analyzer = Analyzer::new();
    analyzer.define_variable("numbers", INTEGER_ITERABLE.clone()).unwrap();
    analyze_source(&mut analyzer, &mut source).unwrap();

    let mut interpreter = Interpreter::with_print_handler(PrintHandler::Silent);
    interpreter.define_variable("numbers", PlcObject::integers(1..=4)).unwrap();
    let result = interpreter.run(&source).unwrap();

    assert!(matches!(result.value, Value::Integer(ref sum) if *sum == BigInt::from(30)));
}

#[test]
fn test_error_phases() {
    let syntax = front_end("DEF main(): Integer DO RETURN 1 END").unwrap_err();
    assert_eq!(syntax.phase(), ErrorPhase::Syntax);

    let analysis = front_end("DEF main(): Integer DO RETURN TRUE + 1; END").unwrap_err();
    assert_eq!(analysis.phase(), ErrorPhase::Analysis);

    let runtime = run("DEF main(): Integer DO RETURN 1 / 0; END").unwrap_err();
    assert_eq!(runtime.phase(), ErrorPhase::Runtime);
}

#[test]
fn test_rendered_diagnostic() {
    let program = "DEF main(): Integer DO\n    RETURN missing;\nEND\n";
    let error = front_end(program).unwrap_err();

    assert_eq!(
        render_error(&error, program, "test.plc"),
        "Error: UndefinedName (`missing` is not defined in this scope)\n\
         -> test.plc\n  \
           |\n\
         2 | RETURN missing;\n  \
           | -------^\n"
    );
}

#[test]
fn test_emit_java() {
    let program = "
        LET greeting: String = \"hi\";
        DEF shout(times: Integer) DO
            LET i = 0;
            WHILE i < times DO print(greeting); i = i + 1; END
        END
        DEF main(): Integer DO shout(2); RETURN 0; END
    ";

    let source = front_end(program).unwrap();
    let java = generate(&source).unwrap();

    assert_eq!(
        java,
        "public class Main {\n\
         \n    String greeting = \"hi\";\n\
         \n    public static void main(String[] args) {\
         \n        System.exit(new Main().main());\
         \n    }\n\
         \n    Void shout(int times) {\
         \n        int i = 0;\
         \n        while (i < times) {\
         \n            System.out.println(greeting);\
         \n            i = i + 1;\
         \n        }\
         \n    }\n\
         \n    int main() {\
         \n        shout(2);\
         \n        return 0;\
         \n    }\n\
         \n}\n"
    );
}
