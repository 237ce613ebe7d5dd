/// The `Value` enum and its conversions, equality and print representation.
pub mod core;
/// Function values.
///
/// Defines the two kinds of callable values: native functions backed by a
/// Rust function pointer, and user-defined functions that carry their
/// parameters, body and a snapshot of the environment they were created in.
pub mod function;
/// Persistent singly-linked list.
///
/// Lists are immutable and share structure: prepending an item with `cons` or
/// dropping the first item with `rest` is O(1) and never copies or disturbs
/// the original list.
pub mod list;
