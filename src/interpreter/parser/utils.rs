use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{ParseResult, parse_expression},
    },
};

/// Builds an `UnexpectedToken` error pointing at `token`.
pub(in crate::interpreter::parser) fn unexpected(token: &Token) -> ParseError {
    ParseError::UnexpectedToken { token: token.lexeme.clone(),
                                  line:  token.line, }
}

/// The error for a stream that ran out without an `Eof` token.
pub(in crate::interpreter::parser) const fn end_of_input() -> ParseError {
    ParseError::UnexpectedToken { token: String::new(),
                                  line:  1, }
}

/// Consumes the next token, which must be of kind `kind`.
///
/// # Errors
/// `UnexpectedToken` at the token found instead.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    kind: &TokenKind)
                                                    -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a Token>
{
    match tokens.next() {
        Some(token) if token.kind == *kind => Ok(token),
        Some(token) => Err(unexpected(token)),
        None => Err(end_of_input()),
    }
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by list literals and call argument lists. It
/// repeatedly calls `parse_item` to parse one element, expecting either a
/// comma, to continue the list, or the closing token, to end it. An
/// immediately encountered closing token produces an empty list. A trailing
/// comma is rejected, because the closing token cannot start an item.
///
/// Grammar (simplified): `list := (item ("," item)*)? closing`
///
/// # Parameters
/// - `tokens`: Token iterator positioned after the opening token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (e.g. `]` or `)`).
/// - `mismatch`: Builds the error when something other than a comma or the
///   closing token follows an item.
///
/// # Returns
/// A vector of parsed items.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &TokenKind,
    mismatch: fn(&Token) -> ParseError)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut items = Vec::new();
    if let Some(token) = tokens.peek()
       && token.kind == *closing
    {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.next() {
            Some(token) if token.kind == TokenKind::Comma => {},
            Some(token) if token.kind == *closing => break,
            Some(token) => return Err(mismatch(token)),
            None => return Err(end_of_input()),
        }
    }
    Ok(items)
}

/// Parses a plain identifier and returns its name.
///
/// # Errors
/// `MissingIdentifier` if the next token is not an identifier.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a Token>
{
    match tokens.next() {
        Some(Token { kind: TokenKind::Identifier(symbol),
                     .. }) => Ok(symbol.clone()),
        Some(token) => Err(ParseError::MissingIdentifier { token: token.lexeme.clone(),
                                                           line:  token.line, }),
        None => Err(end_of_input()),
    }
}

/// Parses a block `{ expression+ }`.
///
/// # Errors
/// `UnexpectedToken` if the opening brace is missing, the block is empty, or
/// the input ends before the closing brace.
pub(in crate::interpreter::parser) fn parse_block<'a, I>(tokens: &mut Peekable<I>)
                                                         -> ParseResult<Vec<Expr>>
    where I: Iterator<Item = &'a Token> + Clone
{
    expect(tokens, &TokenKind::LBrace)?;

    let mut body = Vec::new();
    loop {
        match tokens.peek() {
            Some(&token) if token.kind == TokenKind::RBrace => {
                if body.is_empty() {
                    return Err(unexpected(token));
                }
                tokens.next();
                return Ok(body);
            },
            Some(_) => body.push(parse_expression(tokens)?),
            None => return Err(end_of_input()),
        }
    }
}
