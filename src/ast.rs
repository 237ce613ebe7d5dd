use std::{fmt, rc::Rc};

use crate::interpreter::value::core::{escape_string, format_number};

/// Represents a literal value in the language.
///
/// `LiteralValue` covers the constants that can appear directly in source
/// code: `nil`, `true`, `false`, numbers and string literals. The string
/// payload is the decoded text, with escape sequences already substituted.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// The `nil` literal.
    Nil,
    /// A boolean literal: `true` or `false`.
    Bool(bool),
    /// A 64-bit floating-point literal.
    Number(f64),
    /// A decoded string literal.
    String(String),
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Everything in the language is an expression: definitions, conditionals and
/// function literals all produce values. Each variant models one syntactic
/// construct and records the source line it was parsed from, which the
/// evaluator uses when reporting errors.
///
/// Nodes are never mutated after the parser builds them. Equality is
/// structural, lines included.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (`nil`, boolean, number or string).
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// List literal expression, e.g. `[1, 2, 3]`.
    List {
        /// Item expressions, in source order.
        items: Vec<Self>,
        /// Line number of the opening bracket.
        line:  usize,
    },
    /// Reference to a bound symbol.
    Identifier {
        /// Name of the symbol.
        symbol: String,
        /// Line number in the source code.
        line:   usize,
    },
    /// A definition `symbol = value`, itself evaluating to `value`.
    Definition {
        /// The symbol being bound.
        symbol: String,
        /// The bound expression.
        value:  Box<Self>,
        /// Line number of the `=` token.
        line:   usize,
    },
    /// A parenthesized expression.
    Group {
        /// The wrapped expression.
        inner: Box<Self>,
        /// Line number of the opening parenthesis.
        line:  usize,
    },
    /// A prefix operation (negation or logical not).
    Unary {
        /// The unary operator to apply.
        op:      UnaryOperator,
        /// The operand expression.
        operand: Box<Self>,
        /// Line number of the operator token.
        line:    usize,
    },
    /// A binary operation (arithmetic, comparison, logic, concatenation,
    /// cons).
    Binary {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number of the operator token.
        line:  usize,
    },
    /// Conditional expression with two mandatory branches.
    If {
        /// The condition, which must evaluate to a boolean.
        condition:   Box<Self>,
        /// Expressions evaluated when the condition holds.
        consequent:  Vec<Self>,
        /// Expressions evaluated otherwise.
        alternative: Vec<Self>,
        /// Line number of the `if` keyword.
        line:        usize,
    },
    /// Function literal, e.g. `\x, y { x + y }`.
    ///
    /// Parameters and body sit behind `Rc` so that function values can keep
    /// them alive after the tree they were parsed into is dropped.
    Function {
        /// Parameter names, in order.
        parameters: Rc<[String]>,
        /// Body expressions; the last one yields the call's result.
        body:       Rc<[Self]>,
        /// Line number of the backslash.
        line:       usize,
    },
    /// Function call expression, e.g. `f(1, 2)`.
    Call {
        /// Expression producing the function to call.
        callee:    Box<Self>,
        /// Argument expressions, evaluated left to right.
        arguments: Vec<Self>,
        /// Line number of the opening parenthesis.
        line:      usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use pierogi::ast::Expr;
    ///
    /// let expr = Expr::Identifier { symbol: "x".to_string(),
    ///                               line:   5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::List { line, .. }
            | Self::Identifier { line, .. }
            | Self::Definition { line, .. }
            | Self::Group { line, .. }
            | Self::Unary { line, .. }
            | Self::Binary { line, .. }
            | Self::If { line, .. }
            | Self::Function { line, .. }
            | Self::Call { line, .. } => *line,
        }
    }

    /// Moves the direct children of `self` onto `pending`, leaving `nil`
    /// literals in boxed slots. Shared function bodies are only taken when
    /// this node holds the last reference.
    fn detach_children(&mut self, pending: &mut Vec<Self>) {
        fn take(slot: &mut Expr, pending: &mut Vec<Expr>) {
            pending.push(std::mem::replace(slot, Expr::placeholder()));
        }

        match self {
            Self::Literal { .. } | Self::Identifier { .. } => {},
            Self::Definition { value: child, .. }
            | Self::Group { inner: child, .. }
            | Self::Unary { operand: child, .. } => take(child, pending),
            Self::Binary { left, right, .. } => {
                take(left, pending);
                take(right, pending);
            },
            Self::If { condition,
                       consequent,
                       alternative,
                       .. } => {
                take(condition, pending);
                pending.append(consequent);
                pending.append(alternative);
            },
            Self::Call { callee, arguments, .. } => {
                take(callee, pending);
                pending.append(arguments);
            },
            Self::List { items, .. } => pending.append(items),
            Self::Function { body, .. } => {
                if let Some(body) = Rc::get_mut(body) {
                    for expr in body.iter_mut() {
                        take(expr, pending);
                    }
                }
            },
        }
    }

    const fn placeholder() -> Self {
        Self::Literal { value: LiteralValue::Nil,
                        line:  0, }
    }
}

// Iterative, so dropping a deeply nested tree never exhausts the stack.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);

        while let Some(mut expr) = pending.pop() {
            expr.detach_children(&mut pending);
        }
    }
}

/// Represents a binary operator.
///
/// One variant per binary expression kind of the language, ordered loosely
/// from the loosest-binding to the tightest.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Logical and (`and`), short-circuiting.
    And,
    /// Logical or (`or`), short-circuiting.
    Or,
    /// Equal to (`==`)
    Equals,
    /// Not equal to (`/=`)
    NotEqual,
    /// Less than (`<`)
    LessThan,
    /// Greater than (`>`)
    GreaterThan,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// List construction (`:`)
    Cons,
    /// String concatenation (`..`)
    Concatenation,
    /// Addition (`+`)
    Addition,
    /// Subtraction (`-`)
    Subtraction,
    /// Multiplication (`*`)
    Multiplication,
    /// Division (`/`)
    Division,
    /// Exponentiation (`^`)
    Exponent,
}

/// Represents a prefix operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negation,
    /// Logical not (e.g. `not x`).
    Not,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOperator::{
            Addition, And, Concatenation, Cons, Division, Equals, Exponent, GreaterEqual,
            GreaterThan, LessEqual, LessThan, Multiplication, NotEqual, Or, Subtraction,
        };
        let operator = match self {
            And => "and",
            Or => "or",
            Equals => "==",
            NotEqual => "/=",
            LessThan => "<",
            GreaterThan => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Cons => ":",
            Concatenation => "..",
            Addition => "+",
            Subtraction => "-",
            Multiplication => "*",
            Division => "/",
            Exponent => "^",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negation => write!(f, "-"),
            Self::Not => write!(f, "not "),
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::String(s) => write!(f, "\"{}\"", escape_string(s)),
        }
    }
}

/// Writes `items` separated by `separator`.
fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Expr], separator: &str) -> fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            write!(f, "{separator}")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Renders the expression back into source-like text.
///
/// The rendering is what runtime errors report as the "nearest expression",
/// so it favours readability over byte-exact reproduction of the input.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal { value, .. } => write!(f, "{value}"),
            Self::List { items, .. } => {
                write!(f, "[")?;
                write_joined(f, items, ", ")?;
                write!(f, "]")
            },
            Self::Identifier { symbol, .. } => write!(f, "{symbol}"),
            Self::Definition { symbol, value, .. } => write!(f, "{symbol} = {value}"),
            Self::Group { inner, .. } => write!(f, "({inner})"),
            Self::Unary { op, operand, .. } => write!(f, "{op}{operand}"),
            Self::Binary { left, op, right, .. } => write!(f, "{left} {op} {right}"),
            Self::If { condition,
                       consequent,
                       alternative,
                       .. } => {
                write!(f, "if {condition} {{ ")?;
                write_joined(f, consequent, " ")?;
                write!(f, " }} else {{ ")?;
                write_joined(f, alternative, " ")?;
                write!(f, " }}")
            },
            Self::Function { parameters, body, .. } => {
                write!(f, "\\{}", parameters.join(", "))?;
                if !parameters.is_empty() {
                    write!(f, " ")?;
                }
                write!(f, "{{ ")?;
                write_joined(f, body, " ")?;
                write!(f, " }}")
            },
            Self::Call { callee, arguments, .. } => {
                write!(f, "{callee}(")?;
                write_joined(f, arguments, ", ")?;
                write!(f, ")")
            },
        }
    }
}
