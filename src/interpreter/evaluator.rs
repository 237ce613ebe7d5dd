/// Core evaluation logic and context management.
///
/// Contains the `Context` session type, its configuration, the main dispatch
/// over expression variants and the top-level `interpret` / `run` entry
/// points.
pub mod core;

/// Binary operator evaluation logic.
///
/// Handles arithmetic, comparisons, equality, short-circuit logic, string
/// concatenation and list construction.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation and logical not.
pub mod unary;

/// Scoped and binding forms: `if` branches, definitions, function literals
/// and expression sequences.
pub mod block;

/// Function calls.
///
/// Checks arity, evaluates arguments and dispatches to native or user-defined
/// functions, managing closure environments and the call depth limit.
pub mod call;

/// Builtin functions.
///
/// The table of native functions and constants every session starts with.
pub mod builtin;
