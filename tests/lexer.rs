use pierogi::{
    error::{ErrorKind, ParseError},
    interpreter::lexer::{Token, TokenKind, lex},
};
use pretty_assertions::assert_eq;

fn kinds(src: &str) -> Vec<TokenKind> {
    lex(src).unwrap_or_else(|e| panic!("Failed to lex {src:?}: {e}"))
            .into_iter()
            .map(|token| token.kind)
            .collect()
}

fn ident(name: &str) -> TokenKind {
    TokenKind::Identifier(name.to_string())
}

fn lex_error(src: &str) -> ParseError {
    match lex(src) {
        Ok(tokens) => panic!("Lexing {src:?} succeeded with {tokens:?}"),
        Err(e) => e,
    }
}

#[test]
fn empty_input_is_a_single_eof() {
    let tokens = lex("").unwrap();

    assert_eq!(tokens,
               vec![Token { kind:   TokenKind::Eof,
                            lexeme: String::new(),
                            line:   1, }]);
}

#[test]
fn stream_always_ends_with_exactly_one_eof() {
    for src in ["x", "1 + 2", "# only a comment", "\n\n\n", "f(\"a\", [1, 2])"] {
        let kinds = kinds(src);
        let eofs = kinds.iter().filter(|kind| **kind == TokenKind::Eof).count();

        assert_eq!(eofs, 1, "{src:?}");
        assert_eq!(kinds.last(), Some(&TokenKind::Eof), "{src:?}");
    }
}

#[test]
fn trailing_whitespace_and_comments_change_nothing() {
    assert_eq!(kinds("x + 1"), kinds("x + 1   \t# trailing comment\n\n"));
    assert_eq!(kinds("x + 1"), kinds("# leading\nx\n+\r\n1"));
}

#[test]
fn keywords_and_identifiers() {
    assert_eq!(kinds("and or not true false nil if else iffy nil_ _x x1"),
               vec![TokenKind::And,
                    TokenKind::Or,
                    TokenKind::Not,
                    TokenKind::True,
                    TokenKind::False,
                    TokenKind::Nil,
                    TokenKind::If,
                    TokenKind::Else,
                    ident("iffy"),
                    ident("nil_"),
                    ident("_x"),
                    ident("x1"),
                    TokenKind::Eof]);
}

#[test]
fn operators_prefer_the_longest_match() {
    assert_eq!(kinds("= == / /= < <= > >= . .. : ^ \\"),
               vec![TokenKind::Equal,
                    TokenKind::EqualEqual,
                    TokenKind::Slash,
                    TokenKind::SlashEqual,
                    TokenKind::Less,
                    TokenKind::LessEqual,
                    TokenKind::Greater,
                    TokenKind::GreaterEqual,
                    TokenKind::Dot,
                    TokenKind::DotDot,
                    TokenKind::Colon,
                    TokenKind::Caret,
                    TokenKind::Backslash,
                    TokenKind::Eof]);
}

#[test]
fn brackets_and_punctuation() {
    assert_eq!(kinds("( ) [ ] { } , + - *"),
               vec![TokenKind::LParen,
                    TokenKind::RParen,
                    TokenKind::LBracket,
                    TokenKind::RBracket,
                    TokenKind::LBrace,
                    TokenKind::RBrace,
                    TokenKind::Comma,
                    TokenKind::Plus,
                    TokenKind::Minus,
                    TokenKind::Star,
                    TokenKind::Eof]);
}

#[test]
fn numbers_with_and_without_fraction() {
    assert_eq!(kinds("0 42 2.75 0.5"),
               vec![TokenKind::Number(0.0),
                    TokenKind::Number(42.0),
                    TokenKind::Number(2.75),
                    TokenKind::Number(0.5),
                    TokenKind::Eof]);
}

#[test]
fn dot_without_digit_is_not_part_of_the_number() {
    assert_eq!(kinds("5."),
               vec![TokenKind::Number(5.0), TokenKind::Dot, TokenKind::Eof]);
    assert_eq!(kinds("1..2"),
               vec![TokenKind::Number(1.0),
                    TokenKind::DotDot,
                    TokenKind::Number(2.0),
                    TokenKind::Eof]);
    assert_eq!(kinds("-7"),
               vec![TokenKind::Minus, TokenKind::Number(7.0), TokenKind::Eof]);
}

#[test]
fn escape_sequences_are_decoded() {
    let tokens = lex(r#""\"incoming line break:\nfinished\"""#).unwrap();

    assert_eq!(tokens[0].kind,
               TokenKind::String("\"incoming line break:\nfinished\"".to_string()));
    assert_eq!(tokens[0].lexeme, r#""\"incoming line break:\nfinished\"""#);
    assert_eq!(tokens[1].kind, TokenKind::Eof);
}

#[test]
fn backslash_escape_and_empty_string() {
    assert_eq!(kinds(r#""a\\b" """#),
               vec![TokenKind::String("a\\b".to_string()),
                    TokenKind::String(String::new()),
                    TokenKind::Eof]);
}

#[test]
fn comment_markers_inside_strings_are_text() {
    assert_eq!(kinds("\"# not a comment\" # a comment"),
               vec![TokenKind::String("# not a comment".to_string()), TokenKind::Eof]);
}

#[test]
fn lines_are_counted() {
    let tokens = lex("a\nb # comment\n\nc").unwrap();
    let lines: Vec<usize> = tokens.iter().map(|token| token.line).collect();

    assert_eq!(lines, vec![1, 2, 4, 4]);
}

#[test]
fn multi_line_string_reports_its_last_line() {
    let tokens = lex("x\n\"one\ntwo\" y").unwrap();

    assert_eq!(tokens[1].kind, TokenKind::String("one\ntwo".to_string()));
    assert_eq!(tokens[1].line, 3);
    assert_eq!(tokens[2].line, 3);
}

#[test]
fn unterminated_string() {
    let error = lex_error("x = \"abc");

    assert_eq!(error.kind(), ErrorKind::UnterminatedString);
    assert_eq!(error.near(), "\"abc");
    assert_eq!(error.line(), 1);
}

#[test]
fn unknown_escape_sequence() {
    let error = lex_error("\n\"ab\\qc\"");

    assert_eq!(error.kind(), ErrorKind::UnknownEscapeSequence);
    assert_eq!(error.near(), "\"ab\\q");
    assert_eq!(error.line(), 2);
}

#[test]
fn unrecognized_character() {
    let error = lex_error("1 +\n\n @ 2");

    assert_eq!(error,
               ParseError::UnrecognizedCharacter { lexeme: "@".to_string(),
                                                   line:   3, });
}

#[test]
fn non_ascii_identifiers_are_rejected() {
    assert_eq!(lex_error("żurek = 1").kind(), ErrorKind::UnrecognizedCharacter);
}
