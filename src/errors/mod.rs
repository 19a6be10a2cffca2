//! Error types and error handling for the language.
//!
//! This module defines the error types used by every phase of a run.
//! It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing, parsing, analysis and evaluation
//! - Phase classification of each variant
//! - Helpful error messages and suggestions

pub mod errors;
