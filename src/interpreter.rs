/// The environment module implements lexical scoping.
///
/// An environment is a chain of frames, each mapping symbols to values, with
/// the builtins below the root. It supports pushing and popping scopes,
/// binding into the innermost scope, outward lookup, and O(1) snapshots for
/// closure capture.
pub mod environment;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the expression tree against an environment,
/// implements operator semantics, conditionals and function calls, and raises
/// typed runtime errors. It is the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates every expression variant with one exhaustive match.
/// - Manages scopes for `if` branches and function calls.
/// - Reports runtime errors such as undefined symbols, type mismatches or
///   division by zero.
pub mod evaluator;
/// The I/O sink.
///
/// The interpreter prints, reads input and reports errors only through the
/// [`io::Io`] trait, so hosts decide where text goes.
pub mod io;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as numbers,
/// strings, identifiers, operators, delimiters, and keywords. This is the first
/// stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with kind, lexeme and
///   line.
/// - Decodes numeric and string literals, including escape sequences.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// expression trees by recursive descent, one function per precedence tier.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes.
/// - Validates grammar, reporting errors with the offending token and line.
pub mod parser;
/// Stack growth for deeply recursive parsing and evaluation.
pub mod stack;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares all the value types used during interpretation: nil,
/// booleans, numbers, strings, lists and functions, with their equality rules
/// and print representation.
pub mod value;
