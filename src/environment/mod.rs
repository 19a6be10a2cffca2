//! Shared scope and type model.
//!
//! Both the analyzer and the interpreter resolve names through the same
//! arena of chained scopes:
//!
//! - `types` - type descriptors, the type registry and assignability
//! - `scope` - the scope arena, generic over what a binding holds
//! - `value` - runtime values

pub mod scope;
pub mod types;
pub mod value;

#[cfg(test)]
mod tests;
