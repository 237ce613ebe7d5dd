use thiserror::Error;

use crate::error::{ErrorKind, Report, Severity};

/// Represents all errors that can occur during evaluation.
///
/// Variants that concern an operation carry `expr`, a source-like rendering
/// of the expression being evaluated, so the host can point at it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Tried to use a symbol that no frame binds.
    #[error("Error on line {line}: Undefined symbol '{name}'.")]
    UndefinedSymbol {
        /// The name of the symbol.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The callee of a call did not evaluate to a function.
    #[error("Error on line {line}: Value of '{expr}' cannot be called.")]
    UncallableValue {
        /// The callee expression.
        expr: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An operand had the wrong variant for its operator.
    #[error("Error on line {line}: Incompatible types in '{expr}'.")]
    IncompatibleTypes {
        /// The offending expression.
        expr: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A division produced infinity or NaN.
    #[error("Error on line {line}: Division by zero in '{expr}'.")]
    DivisionByZero {
        /// The offending expression.
        expr: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The wrong number of arguments was supplied to a function.
    #[error("Error on line {line}: '{expr}' expects {expected} argument(s) but got {found}.")]
    IncorrectNumberOfArguments {
        /// The call expression, or the function when called from a builtin.
        expr:     String,
        /// Arity of the function.
        expected: usize,
        /// Number of arguments supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A builtin received arguments it cannot work with.
    #[error("Error on line {line}: Invalid use of builtin '{name}': {details}.")]
    BuiltinContractViolation {
        /// The builtin's name.
        name:    String,
        /// What was wrong.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// User-defined calls nested deeper than the configured limit.
    #[error("Error on line {line}: Stack overflow after {depth} nested calls.")]
    StackOverflow {
        /// The configured maximum depth.
        depth: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
}

impl RuntimeError {
    /// Returns the kind tag of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UndefinedSymbol { .. } => ErrorKind::UndefinedSymbol,
            Self::UncallableValue { .. } => ErrorKind::UncallableValue,
            Self::IncompatibleTypes { .. } => ErrorKind::IncompatibleTypes,
            Self::DivisionByZero { .. } => ErrorKind::DivisionByZero,
            Self::IncorrectNumberOfArguments { .. } => ErrorKind::IncorrectNumberOfArguments,
            Self::BuiltinContractViolation { .. } => ErrorKind::BuiltinContractViolation,
            Self::StackOverflow { .. } => ErrorKind::StackOverflow,
        }
    }

    /// Returns the nearest symbol or expression text.
    #[must_use]
    pub fn near(&self) -> &str {
        match self {
            Self::UndefinedSymbol { name, .. } | Self::BuiltinContractViolation { name, .. } => {
                name
            },
            Self::UncallableValue { expr, .. }
            | Self::IncompatibleTypes { expr, .. }
            | Self::DivisionByZero { expr, .. }
            | Self::IncorrectNumberOfArguments { expr, .. } => expr,
            Self::StackOverflow { .. } => "",
        }
    }

    /// Returns the line the error was raised on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UndefinedSymbol { line, .. }
            | Self::UncallableValue { line, .. }
            | Self::IncompatibleTypes { line, .. }
            | Self::DivisionByZero { line, .. }
            | Self::IncorrectNumberOfArguments { line, .. }
            | Self::BuiltinContractViolation { line, .. }
            | Self::StackOverflow { line, .. } => *line,
        }
    }

    /// Builds the sink-facing [`Report`].
    #[must_use]
    pub fn report(&self) -> Report {
        Report { kind:     self.kind(),
                 severity: Severity::Runtime,
                 near:     self.near().to_string(),
                 line:     self.line(), }
    }
}
