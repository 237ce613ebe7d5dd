//! # pierogi
//!
//! pierogi is a small dynamically-typed scripting language written in Rust.
//! It lexes, parses and evaluates source text with support for numbers,
//! strings, booleans, lists, first-class functions with closures and
//! conditionals.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::Error,
    interpreter::{evaluator::core::Context, value::core::Value},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` enum and related types that represent the
/// syntactic structure of source code as a tree. The AST is built by the parser
/// and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines one expression variant per language construct.
/// - Attaches source lines to AST nodes for error reporting.
/// - Renders expressions back into source-like text for diagnostics.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing, or
/// evaluating code, together with the kind tags and severities hosts use to
/// present them.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line numbers and the nearest lexeme or expression.
/// - Bundles everything an I/O sink needs into a `Report`.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, scoping and I/O to provide a complete runtime for source
/// code evaluation.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;

/// Interprets a source unit in a fresh session on the console.
///
/// Every top-level expression is evaluated in order; their values are
/// returned. Output of `print` goes to standard output.
///
/// # Errors
/// Returns the first lexical, syntactic or runtime error.
///
/// # Examples
/// ```
/// use pierogi::{interpret, interpreter::value::core::Value};
///
/// let values = interpret("x = 2 x ^ 10").unwrap();
/// assert_eq!(values, vec![Value::Number(2.0), Value::Number(1024.0)]);
///
/// // Example with an intentional error ('y' is not defined).
/// assert!(interpret("y + 1").is_err());
/// ```
pub fn interpret(source: &str) -> Result<Vec<Value>, Error> {
    Context::new().interpret(source)
}
