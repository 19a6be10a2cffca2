//! Static analysis.
//!
//! Resolves every name to its declaration and types every expression,
//! filling the metadata slots of the tree in place. Analysis stops at the
//! first violation.

pub mod analyzer;
pub mod expr;
