use std::{fmt, rc::Rc};

use crate::{
    ast::LiteralValue,
    interpreter::value::{function::Function, list::List},
};

/// Represents a runtime value in the interpreter.
///
/// Values are immutable: every operation produces a new value. Lists and
/// functions are reference counted, so cloning a value is cheap.
///
/// Equality is variant-exact. Values of different variants never compare
/// equal (`2 == "2"` is `false`, `nil == false` is `false`), lists compare
/// item by item, and functions compare by identity.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absence of a value.
    Nil,
    /// A boolean value (`true` or `false`).
    /// Produced by comparison and logical operators, and required as the
    /// condition of an `if` expression.
    Bool(bool),
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// An owned string.
    String(String),
    /// A persistent list of values.
    List(List),
    /// A native or user-defined function.
    Function(Rc<Function>),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<List> for Value {
    fn from(v: List) -> Self {
        Self::List(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::List(v.into_iter().collect())
    }
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Nil => Self::Nil,
            LiteralValue::Bool(b) => Self::Bool(*b),
            LiteralValue::Number(n) => Self::Number(*n),
            LiteralValue::String(s) => Self::String(s.clone()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            #[allow(clippy::float_cmp)]
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Value {
    /// Returns the number if the value is a [`Value::Number`].
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean if the value is a [`Value::Bool`].
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the string slice if the value is a [`Value::String`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the list if the value is a [`Value::List`].
    #[must_use]
    pub const fn as_list(&self) -> Option<&List> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    /// Returns the function if the value is a [`Value::Function`].
    #[must_use]
    pub const fn as_function(&self) -> Option<&Rc<Function>> {
        match self {
            Self::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Name of the value's variant, as used in diagnostics.
    ///
    /// # Example
    /// ```
    /// use pierogi::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Number(1.0).type_name(), "number");
    /// assert_eq!(Value::Nil.type_name(), "nil");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Function(_) => "function",
        }
    }

    /// Renders the value the way `print` shows it: like [`Display`], except
    /// that a top-level string is written raw, without quotes or escapes.
    ///
    /// [`Display`]: fmt::Display
    ///
    /// # Example
    /// ```
    /// use pierogi::interpreter::value::core::Value;
    ///
    /// let s = Value::from("a\"b");
    /// assert_eq!(s.to_string(), r#""a\"b""#);
    /// assert_eq!(s.to_plain_string(), "a\"b");
    /// ```
    #[must_use]
    pub fn to_plain_string(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Formats a number with the shortest representation that round-trips,
/// without a trailing `.0` for integral values.
///
/// # Example
/// ```
/// use pierogi::interpreter::value::core::format_number;
///
/// assert_eq!(format_number(5.0), "5");
/// assert_eq!(format_number(0.25), "0.25");
/// assert_eq!(format_number(-3.0), "-3");
/// ```
#[must_use]
pub fn format_number(n: f64) -> String {
    format!("{n}")
}

/// Re-escapes the characters a string literal cannot contain verbatim:
/// backslash, double quote and newline.
///
/// # Example
/// ```
/// use pierogi::interpreter::value::core::escape_string;
///
/// assert_eq!(escape_string("say \"hi\"\n"), r#"say \"hi\"\n"#);
/// ```
#[must_use]
pub fn escape_string(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            other => escaped.push(other),
        }
    }
    escaped
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::String(s) => write!(f, "\"{}\"", escape_string(s)),
            Self::List(l) => write!(f, "{l}"),
            Self::Function(func) => write!(f, "{func}"),
        }
    }
}
