use std::fmt;

use logos::{Lexer, Logos, Skip};
use tracing::debug;

use crate::{
    ast::LiteralValue,
    error::ParseError,
    interpreter::parser::core::ParseResult,
};

/// The kind of a lexical token, with the decoded literal for numbers,
/// strings and identifiers.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexError)]
pub enum TokenKind {
    /// Numeric literal tokens, such as `3`, `3.14` or `0.5`. A `.` that is
    /// not followed by a digit is left for the next token.
    #[regex(r"[0-9]+", lex_number)]
    Number(f64),
    /// String literal tokens. The payload is the decoded text.
    #[token("\"", lex_string)]
    String(String),
    /// Identifier tokens; symbol names such as `x` or `make_adder`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// `not`
    #[token("not")]
    Not,
    /// `true`
    #[token("true")]
    True,
    /// `false`
    #[token("false")]
    False,
    /// `nil`
    #[token("nil")]
    Nil,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `:`
    #[token(":")]
    Colon,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `\`
    #[token("\\")]
    Backslash,
    /// `=`
    #[token("=")]
    Equal,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `/=`
    #[token("/=")]
    SlashEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `..`
    #[token("..")]
    DotDot,
    /// `# Comments` up to the end of the line.
    #[token("#", skip_comment)]
    Comment,
    /// Line breaks.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        Skip
    })]
    NewLine,
    /// Spaces, tabs and carriage returns.
    #[regex(r"[ \t\r]+", logos::skip)]
    Ignored,
    /// End of input. Never produced by a pattern; [`lex`] appends it.
    Eof,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
pub struct LexerExtras {
    /// The current line number in the source being tokenized, starting at 1.
    pub line: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line: 1 }
    }
}

/// Why a token could not be produced.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LexError {
    /// A character that starts no token.
    #[default]
    UnrecognizedCharacter,
    /// End of input inside a string literal.
    UnterminatedString,
    /// A backslash in a string followed by something other than `n`, `"` or
    /// `\`.
    UnknownEscapeSequence,
}

impl LexError {
    fn into_parse_error(self, lexeme: String, line: usize) -> ParseError {
        match self {
            Self::UnrecognizedCharacter => ParseError::UnrecognizedCharacter { lexeme, line },
            Self::UnterminatedString => ParseError::UnterminatedString { lexeme, line },
            Self::UnknownEscapeSequence => ParseError::UnknownEscapeSequence { lexeme, line },
        }
    }
}

/// A token together with its raw text and the line it ended on.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind:   TokenKind,
    /// The raw source slice; empty for [`TokenKind::Eof`].
    pub lexeme: String,
    pub line:   usize,
}

impl Token {
    /// The decoded literal carried by number and string tokens.
    ///
    /// # Example
    /// ```
    /// use pierogi::{ast::LiteralValue, interpreter::lexer::lex};
    ///
    /// let tokens = lex(r#""a\"b" 2.5 x"#).unwrap();
    ///
    /// assert_eq!(tokens[0].literal(), Some(LiteralValue::String("a\"b".to_string())));
    /// assert_eq!(tokens[1].literal(), Some(LiteralValue::Number(2.5)));
    /// assert_eq!(tokens[2].literal(), None);
    /// ```
    #[must_use]
    pub fn literal(&self) -> Option<LiteralValue> {
        match &self.kind {
            TokenKind::Number(n) => Some(LiteralValue::Number(*n)),
            TokenKind::String(s) => Some(LiteralValue::String(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == TokenKind::Eof {
            write!(f, "end of input")
        } else {
            write!(f, "{}", self.lexeme)
        }
    }
}

/// Converts source text into tokens.
///
/// The whole input is consumed and the result always ends with exactly one
/// [`TokenKind::Eof`] token. Whitespace, newlines and comments produce no
/// tokens. Lexing is fail-fast: the first malformed construct aborts it.
///
/// # Errors
/// - `UnrecognizedCharacter` for a character that starts no token.
/// - `UnterminatedString` when the input ends inside a string literal.
/// - `UnknownEscapeSequence` for an unsupported `\x` inside a string.
///
/// # Example
/// ```
/// use pierogi::interpreter::lexer::{TokenKind, lex};
///
/// let kinds: Vec<TokenKind> = lex("x /= 5.").unwrap().into_iter().map(|t| t.kind).collect();
///
/// assert_eq!(kinds,
///            vec![TokenKind::Identifier("x".to_string()),
///                 TokenKind::SlashEqual,
///                 TokenKind::Number(5.0),
///                 TokenKind::Dot,
///                 TokenKind::Eof]);
/// ```
pub fn lex(source: &str) -> ParseResult<Vec<Token>> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let lexeme = lexer.slice().to_string();
        let line = lexer.extras.line;
        match result {
            Ok(kind) => tokens.push(Token { kind, lexeme, line }),
            Err(e) => return Err(e.into_parse_error(lexeme, line)),
        }
    }

    tokens.push(Token { kind:   TokenKind::Eof,
                        lexeme: String::new(),
                        line:   lexer.extras.line, });

    debug!(tokens = tokens.len(), "lexed source");
    Ok(tokens)
}

/// Extends an integer part with a fraction, but only when the `.` is followed
/// by a digit.
fn lex_number(lex: &mut Lexer<TokenKind>) -> Option<f64> {
    let rest = lex.remainder();
    let mut chars = rest.chars();

    if chars.next() == Some('.')
       && chars.next().is_some_and(|c| c.is_ascii_digit())
    {
        let digits = rest[1..].find(|c: char| !c.is_ascii_digit())
                              .unwrap_or(rest.len() - 1);
        lex.bump(1 + digits);
    }

    lex.slice().parse().ok()
}

/// Consumes the rest of a `#` comment, stopping before the newline so that it
/// is still counted.
fn skip_comment(lex: &mut Lexer<TokenKind>) -> Skip {
    let length = lex.remainder().find('\n').unwrap_or(lex.remainder().len());
    lex.bump(length);
    Skip
}

/// Consumes a string literal whose opening quote has just been matched.
fn lex_string(lex: &mut Lexer<TokenKind>) -> Result<String, LexError> {
    let scan = scan_string(lex.remainder());
    lex.bump(scan.consumed);
    lex.extras.line += scan.newlines;
    scan.result
}

struct StringScan {
    /// Bytes consumed, closing quote included.
    consumed: usize,
    /// Raw newlines consumed.
    newlines: usize,
    result:   Result<String, LexError>,
}

/// Decodes a string literal body up to and including its closing quote.
fn scan_string(body: &str) -> StringScan {
    let mut decoded = String::new();
    let mut newlines = 0;
    let mut chars = body.char_indices();

    while let Some((index, c)) = chars.next() {
        match c {
            '"' => {
                return StringScan { consumed: index + 1,
                                    newlines,
                                    result: Ok(decoded) };
            },
            '\\' => match chars.next() {
                Some((_, 'n')) => decoded.push('\n'),
                Some((_, '"')) => decoded.push('"'),
                Some((_, '\\')) => decoded.push('\\'),
                Some((at, other)) => {
                    if other == '\n' {
                        newlines += 1;
                    }
                    return StringScan { consumed: at + other.len_utf8(),
                                        newlines,
                                        result: Err(LexError::UnknownEscapeSequence) };
                },
                None => break,
            },
            '\n' => {
                newlines += 1;
                decoded.push('\n');
            },
            other => decoded.push(other),
        }
    }

    StringScan { consumed: body.len(),
                 newlines,
                 result: Err(LexError::UnterminatedString) }
}
