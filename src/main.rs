use std::{env, fs, path::PathBuf, process, rc::Rc, time::Instant};

use num_bigint::Sign;
use num_traits::ToPrimitive;
use plc::{
    analyzer::analyzer::analyze,
    display_error,
    environment::value::Value,
    errors::errors::Error,
    generator::generator::generate,
    init_tracing,
    interpreter::interpreter::Interpreter,
    lexer::lexer::tokenize,
    parser::parser::parse,
};
use tracing::info;

const USAGE: &str = "Usage: plc <file> [--emit <out.java>] [--check]";

/// What to do once the program has been analyzed.
#[derive(Debug, PartialEq)]
enum Mode {
    Run,
    Check,
    Emit(PathBuf),
}

#[derive(Debug)]
struct Options {
    file: PathBuf,
    mode: Mode,
}

fn parse_args(args: &[String]) -> Option<Options> {
    let mut file = None;
    let mut mode = Mode::Run;

    let mut args = args.iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--check" if mode == Mode::Run => mode = Mode::Check,
            "--emit" if mode == Mode::Run => mode = Mode::Emit(PathBuf::from(args.next()?)),
            flag if flag.starts_with("--") => return None,
            path if file.is_none() => file = Some(PathBuf::from(path)),
            _ => return None,
        }
    }

    Some(Options { file: file?, mode })
}

fn main() {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(options) = parse_args(&args) else {
        eprintln!("{}", USAGE);
        process::exit(2);
    };

    let file_name = options
        .file
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| options.file.to_string_lossy().to_string());

    let contents = match fs::read_to_string(&options.file) {
        Ok(contents) => contents,
        Err(error) => {
            eprintln!("Failed to read {}: {}", options.file.display(), error);
            process::exit(1);
        }
    };

    match run(&options, &contents, &file_name) {
        Ok(code) => process::exit(code),
        Err(error) => {
            display_error(&error, &contents, &options.file.to_string_lossy());
            process::exit(1);
        }
    }
}

/// Runs every phase the mode asks for and returns the process exit code.
fn run(options: &Options, contents: &str, file_name: &str) -> Result<i32, Error> {
    let start = Instant::now();

    let tokens = tokenize(contents.to_string(), Some(String::from(file_name)))?;
    info!("Tokenized in {:?}", start.elapsed());

    let parse_start = Instant::now();
    let (_, source) = parse(tokens, Rc::new(String::from(file_name)));
    let mut source = source?;
    info!("Parsed in {:?}", parse_start.elapsed());

    let analyze_start = Instant::now();
    let (_, analyzed) = analyze(&mut source);
    analyzed?;
    info!("Analyzed in {:?}", analyze_start.elapsed());

    match &options.mode {
        Mode::Check => Ok(0),
        Mode::Emit(output) => {
            let generate_start = Instant::now();
            let java = generate(&source)?;
            if let Err(error) = fs::write(output, java) {
                eprintln!("Failed to write {}: {}", output.display(), error);
                return Ok(1);
            }
            info!("Generated {} in {:?}", output.display(), generate_start.elapsed());
            Ok(0)
        }
        Mode::Run => {
            let run_start = Instant::now();
            let result = Interpreter::new().run(&source)?;
            info!("Interpreted in {:?}", run_start.elapsed());
            info!("Total time: {:?}", start.elapsed());

            Ok(match &result.value {
                Value::Integer(value) => value.to_i32().unwrap_or(match value.sign() {
                    Sign::Minus => i32::MIN,
                    _ => i32::MAX,
                }),
                _ => 0,
            })
        }
    }
}
