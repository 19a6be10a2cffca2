//! Abstract Syntax Tree (AST) definitions.
//!
//! The tree produced by the parser. Its shape never changes after parsing;
//! the analyzer fills the `Option` metadata slots (types, variables,
//! functions) in place and later passes only read them.

pub mod ast;
pub mod expressions;
pub mod statements;
