//! Java source emission for analyzed programs.

pub mod expr;
pub mod generator;
pub mod stmt;

#[cfg(test)]
mod tests;
