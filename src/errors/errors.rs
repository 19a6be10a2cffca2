use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// The phase of a run an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPhase {
    Syntax,
    Analysis,
    Runtime,
}

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::InvalidEscape { .. } => "InvalidEscape",
            ErrorImpl::UnterminatedLiteral => "UnterminatedLiteral",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::UndefinedName { .. } => "UndefinedName",
            ErrorImpl::DuplicateDefinition { .. } => "DuplicateDefinition",
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::InvalidOperator { .. } => "InvalidOperator",
            ErrorImpl::LiteralOutOfRange { .. } => "LiteralOutOfRange",
            ErrorImpl::MissingEntryPoint => "MissingEntryPoint",
            ErrorImpl::EmptyBody { .. } => "EmptyBody",
            ErrorImpl::ExpectedExplicitValue { .. } => "ExpectedExplicitValue",
            ErrorImpl::InvalidExpressionStatement => "InvalidExpressionStatement",
            ErrorImpl::InvalidGroup => "InvalidGroup",
            ErrorImpl::UnassignableReceiver => "UnassignableReceiver",
            ErrorImpl::DivisionByZero => "DivisionByZero",
            ErrorImpl::NotIterable { .. } => "NotIterable",
            ErrorImpl::RuntimeTypeMismatch { .. } => "RuntimeTypeMismatch",
            ErrorImpl::UnanalyzedNode => "UnanalyzedNode",
        }
    }

    pub fn phase(&self) -> ErrorPhase {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::InvalidEscape { .. }
            | ErrorImpl::UnterminatedLiteral => ErrorPhase::Syntax,
            ErrorImpl::DivisionByZero
            | ErrorImpl::NotIterable { .. }
            | ErrorImpl::RuntimeTypeMismatch { .. } => ErrorPhase::Runtime,
            // Names and receivers are checked by both passes
            _ => ErrorPhase::Analysis,
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::InvalidEscape { escape } => ErrorTip::Suggestion(format!(
                "Invalid escape `\\{}`, expected one of \\b \\n \\r \\t \\' \\\" \\\\",
                escape
            )),
            ErrorImpl::UnterminatedLiteral => {
                ErrorTip::Suggestion(String::from("Literal is missing its closing quote"))
            }
            ErrorImpl::UnknownType { type_ } => {
                ErrorTip::Suggestion(format!("Unknown type `{}` found", type_))
            }
            ErrorImpl::UndefinedName { name } => {
                ErrorTip::Suggestion(format!("`{}` is not defined in this scope", name))
            }
            ErrorImpl::DuplicateDefinition { name } => {
                ErrorTip::Suggestion(format!("`{}` is already defined in this scope", name))
            }
            ErrorImpl::TypeMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::InvalidOperator {
                operator,
                left,
                right,
            } => ErrorTip::Suggestion(format!(
                "Operator `{}` cannot be applied to `{}` and `{}`",
                operator, left, right
            )),
            ErrorImpl::LiteralOutOfRange { literal } => ErrorTip::Suggestion(format!(
                "Literal `{}` does not fit in its type",
                literal
            )),
            ErrorImpl::MissingEntryPoint => ErrorTip::Suggestion(String::from(
                "Define a zero-argument method `main` returning Integer",
            )),
            ErrorImpl::EmptyBody { construct } => {
                ErrorTip::Suggestion(format!("The body of `{}` must not be empty", construct))
            }
            ErrorImpl::ExpectedExplicitValue { variable } => ErrorTip::Suggestion(format!(
                "Expected a type or an initial value for `{}`",
                variable
            )),
            ErrorImpl::InvalidExpressionStatement => ErrorTip::Suggestion(String::from(
                "Only function calls may be used as statements",
            )),
            ErrorImpl::InvalidGroup => ErrorTip::Suggestion(String::from(
                "Parentheses may only surround binary expressions",
            )),
            ErrorImpl::UnassignableReceiver => ErrorTip::Suggestion(String::from(
                "Only variables and fields can be assigned to",
            )),
            ErrorImpl::DivisionByZero => ErrorTip::None,
            ErrorImpl::NotIterable { received } => {
                ErrorTip::Suggestion(format!("`{}` cannot be iterated over", received))
            }
            ErrorImpl::RuntimeTypeMismatch { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Expected a `{}` value, received `{}`",
                    expected, received
                ))
            }
            ErrorImpl::UnanalyzedNode => ErrorTip::Suggestion(String::from(
                "Run the analyzer before emitting code",
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.internal_error, self.position.0)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Lexing and parsing
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("invalid escape sequence: \\{escape}")]
    InvalidEscape { escape: char },
    #[error("unterminated literal")]
    UnterminatedLiteral,

    // Analysis
    #[error("unknown type {type_} found")]
    UnknownType { type_: String },
    #[error("{name:?} is not defined")]
    UndefinedName { name: String },
    #[error("{name:?} is already defined")]
    DuplicateDefinition { name: String },
    #[error("types do not match: expected {expected:?}, received {received:?}")]
    TypeMismatch { expected: String, received: String },
    #[error("invalid operator {operator:?} for {left:?} and {right:?}")]
    InvalidOperator {
        operator: String,
        left: String,
        right: String,
    },
    #[error("literal {literal} is out of range")]
    LiteralOutOfRange { literal: String },
    #[error("missing entry point: no method `main()` defined")]
    MissingEntryPoint,
    #[error("empty body in {construct}")]
    EmptyBody { construct: String },
    #[error("expected explicit type or value for {variable:?}")]
    ExpectedExplicitValue { variable: String },
    #[error("expression statements must be function calls")]
    InvalidExpressionStatement,
    #[error("grouped expressions must contain a binary expression")]
    InvalidGroup,
    #[error("assignment receiver is not a variable or field")]
    UnassignableReceiver,

    // Runtime
    #[error("division by zero")]
    DivisionByZero,
    #[error("value of type {received:?} is not iterable")]
    NotIterable { received: String },
    #[error("runtime types do not match: expected {expected:?}, received {received:?}")]
    RuntimeTypeMismatch { expected: String, received: String },

    // Emission
    #[error("node has not been analyzed")]
    UnanalyzedNode,
}
