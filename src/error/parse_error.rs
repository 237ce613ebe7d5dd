use thiserror::Error;

use crate::error::{ErrorKind, Report, Severity};

/// Represents all errors that can occur during lexing or parsing.
///
/// Every variant records the offending lexeme (empty at end of input) and the
/// line it was found on. Lexing and parsing are fail-fast: the first error
/// aborts the whole unit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// End of input was reached inside a string literal.
    #[error("Error on line {line}: Unterminated string {lexeme}.")]
    UnterminatedString {
        /// The partial string literal.
        lexeme: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// A character that starts no token.
    #[error("Error on line {line}: Unrecognized character '{lexeme}'.")]
    UnrecognizedCharacter {
        /// The character.
        lexeme: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// A backslash inside a string followed by an unsupported character.
    #[error("Error on line {line}: Unknown escape sequence in {lexeme}.")]
    UnknownEscapeSequence {
        /// The string literal up to and including the bad escape.
        lexeme: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    #[error("Error on line {line}: Expected closing parenthesis ')' but found {}.", describe(.token))]
    UnmatchedParenthesis {
        /// The token found instead.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Found an unexpected token while parsing.
    #[error("Error on line {line}: Unexpected {}.", describe(.token))]
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Something other than a bare identifier on the left of `=` or in a
    /// parameter list.
    #[error("Error on line {line}: Expected an identifier but found {}.", describe(.token))]
    MissingIdentifier {
        /// The token found instead.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
}

impl ParseError {
    /// Returns the kind tag of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnterminatedString { .. } => ErrorKind::UnterminatedString,
            Self::UnrecognizedCharacter { .. } => ErrorKind::UnrecognizedCharacter,
            Self::UnknownEscapeSequence { .. } => ErrorKind::UnknownEscapeSequence,
            Self::UnmatchedParenthesis { .. } => ErrorKind::UnmatchedParenthesis,
            Self::UnexpectedToken { .. } => ErrorKind::UnexpectedToken,
            Self::MissingIdentifier { .. } => ErrorKind::MissingIdentifier,
        }
    }

    /// Returns the nearest lexeme.
    #[must_use]
    pub fn near(&self) -> &str {
        match self {
            Self::UnterminatedString { lexeme, .. }
            | Self::UnrecognizedCharacter { lexeme, .. }
            | Self::UnknownEscapeSequence { lexeme, .. } => lexeme,
            Self::UnmatchedParenthesis { token, .. }
            | Self::UnexpectedToken { token, .. }
            | Self::MissingIdentifier { token, .. } => token,
        }
    }

    /// Returns the line the error was found on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnterminatedString { line, .. }
            | Self::UnrecognizedCharacter { line, .. }
            | Self::UnknownEscapeSequence { line, .. }
            | Self::UnmatchedParenthesis { line, .. }
            | Self::UnexpectedToken { line, .. }
            | Self::MissingIdentifier { line, .. } => *line,
        }
    }

    /// Builds the sink-facing [`Report`].
    #[must_use]
    pub fn report(&self) -> Report {
        Report { kind:     self.kind(),
                 severity: Severity::Static,
                 near:     self.near().to_string(),
                 line:     self.line(), }
    }
}

/// Names a parser-reported token; the empty lexeme stands for end of input.
fn describe(token: &str) -> String {
    if token.is_empty() {
        "end of input".to_string()
    } else {
        format!("token '{token}'")
    }
}
