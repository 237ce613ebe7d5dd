use std::fmt;

use thiserror::Error;

/// Static errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code. Static errors are detected before any expression of the unit is
/// evaluated.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while evaluating an expression
/// tree, such as type mismatches, undefined symbols or division by zero.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// The kind tag of an error, independent of where it was raised.
///
/// Hosts switch on this tag to format diagnostics; it deliberately carries no
/// payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnterminatedString,
    UnrecognizedCharacter,
    UnknownEscapeSequence,
    UnmatchedParenthesis,
    UnexpectedToken,
    MissingIdentifier,
    UndefinedSymbol,
    UncallableValue,
    IncompatibleTypes,
    DivisionByZero,
    IncorrectNumberOfArguments,
    BuiltinContractViolation,
    StackOverflow,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UnterminatedString => "unterminated string",
            Self::UnrecognizedCharacter => "unrecognized character",
            Self::UnknownEscapeSequence => "unknown escape sequence",
            Self::UnmatchedParenthesis => "unmatched parenthesis",
            Self::UnexpectedToken => "unexpected token",
            Self::MissingIdentifier => "missing identifier",
            Self::UndefinedSymbol => "undefined symbol",
            Self::UncallableValue => "uncallable value",
            Self::IncompatibleTypes => "incompatible types",
            Self::DivisionByZero => "division by zero",
            Self::IncorrectNumberOfArguments => "incorrect number of arguments",
            Self::BuiltinContractViolation => "builtin contract violation",
            Self::StackOverflow => "stack overflow",
        };
        write!(f, "{name}")
    }
}

/// Whether an error was found before evaluation (lexing or parsing) or
/// during it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Static,
    Runtime,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static => write!(f, "syntax error"),
            Self::Runtime => write!(f, "runtime error"),
        }
    }
}

/// Everything an I/O sink needs to render a diagnostic.
///
/// `near` is the nearest lexeme for static errors and a source-like rendering
/// of the nearest expression for runtime errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// The error kind tag.
    pub kind:     ErrorKind,
    /// Static or runtime.
    pub severity: Severity,
    /// Text of the nearest lexeme or expression.
    pub near:     String,
    /// The 1-based source line.
    pub line:     usize,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.near.is_empty() {
            write!(f,
                   "Error on line {}: {} ({}) at end of input.",
                   self.line, self.kind, self.severity)
        } else {
            write!(f,
                   "Error on line {}: {} ({}) near \"{}\".",
                   self.line, self.kind, self.severity, self.near)
        }
    }
}

/// Any error that aborts the interpretation of a source unit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A lexical or syntactic error.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// An error raised during evaluation.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Returns the kind tag of the wrapped error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(e) => e.kind(),
            Self::Runtime(e) => e.kind(),
        }
    }

    /// Returns [`Severity::Static`] for parse errors and
    /// [`Severity::Runtime`] otherwise.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::Parse(_) => Severity::Static,
            Self::Runtime(_) => Severity::Runtime,
        }
    }

    /// Returns the source line the error was attributed to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Parse(e) => e.line(),
            Self::Runtime(e) => e.line(),
        }
    }

    /// Bundles kind, severity, nearest text and line for an I/O sink.
    #[must_use]
    pub fn report(&self) -> Report {
        match self {
            Self::Parse(e) => e.report(),
            Self::Runtime(e) => e.report(),
        }
    }
}
