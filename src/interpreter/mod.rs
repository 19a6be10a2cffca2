//! Tree-walking evaluation of analyzed programs.

pub mod expr;
pub mod interpreter;
pub mod print_handler;
