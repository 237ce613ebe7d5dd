/// Parser entry points and the top of the precedence ladder.
///
/// Contains `parse`, the definition tier, and the `if` and function-literal
/// block forms.
pub mod core;

/// Binary operator tiers.
///
/// One function per precedence level, from logic (`and`, `or`) down to
/// exponentiation, each building `Expr::Binary` nodes stamped with the line of
/// their operator token.
pub mod binary;

/// Prefix operators, call suffixes and primary expressions.
pub mod unary;

/// Utility functions for the parser.
///
/// Token expectations, comma-separated lists, identifiers and `{ ... }`
/// blocks shared by several grammar rules.
pub mod utils;
