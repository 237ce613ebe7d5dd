use std::iter::Peekable;

use crate::{
    ast::{Expr, LiteralValue, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, parse_expression, parse_function, parse_if},
            utils::{end_of_input, parse_comma_separated, unexpected},
        },
        stack::ensure_sufficient_stack,
    },
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`    (numeric negation)
/// - `not`  (logical not)
///
/// Unary operators nest, so `not -x` is parsed as `not (-x)`.
///
/// Grammar:
/// ```text
///     unary := ("-" | "not") unary
///            | call
/// ```
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    let op = match tokens.peek() {
        Some(token) if token.kind == TokenKind::Minus => UnaryOperator::Negation,
        Some(token) if token.kind == TokenKind::Not => UnaryOperator::Not,
        _ => return parse_call(tokens),
    };

    let line = tokens.next().map_or(0, |token| token.line);
    let operand = ensure_sufficient_stack(|| parse_unary(tokens))?;
    Ok(Expr::Unary { op,
                     operand: Box::new(operand),
                     line })
}

/// Parses a primary expression followed by any number of call suffixes, so
/// `f()()` calls the result of `f()`.
///
/// Grammar: `call := primary ("(" arguments? ")")*`
///
/// # Errors
/// - `UnmatchedParenthesis` if an argument list is not closed by `)`.
pub(crate) fn parse_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut expr = parse_primary(tokens)?;

    while let Some(&open) = tokens.peek()
          && open.kind == TokenKind::LParen
    {
        tokens.next();
        let arguments =
            parse_comma_separated(tokens, parse_expression, &TokenKind::RParen, unmatched)?;
        expr = Expr::Call { callee: Box::new(expr),
                            arguments,
                            line: open.line };
    }

    Ok(expr)
}

/// Parses a primary (atomic) expression.
///
/// Grammar (simplified):
/// ```text
///     primary := "nil" | "true" | "false" | number | string
///              | identifier
///              | "(" expression ")"
///              | "[" (expression ("," expression)*)? "]"
///              | "if" expression block "else" block
///              | "\" parameters? block
/// ```
///
/// # Errors
/// - `UnexpectedToken` if the next token cannot start an expression.
/// - `UnmatchedParenthesis` if a group is not closed by `)`.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    let token = tokens.next().ok_or_else(end_of_input)?;
    let line = token.line;

    let literal = |value: LiteralValue| -> ParseResult<Expr> { Ok(Expr::Literal { value, line }) };

    match &token.kind {
        TokenKind::Nil => literal(LiteralValue::Nil),
        TokenKind::True => literal(LiteralValue::Bool(true)),
        TokenKind::False => literal(LiteralValue::Bool(false)),
        TokenKind::Number(n) => literal(LiteralValue::Number(*n)),
        TokenKind::String(s) => literal(LiteralValue::String(s.clone())),
        TokenKind::Identifier(symbol) => Ok(Expr::Identifier { symbol: symbol.clone(),
                                                               line }),
        TokenKind::LParen => {
            let inner = parse_expression(tokens)?;
            match tokens.next() {
                Some(close) if close.kind == TokenKind::RParen => {
                    Ok(Expr::Group { inner: Box::new(inner),
                                     line })
                },
                Some(other) => Err(unmatched(other)),
                None => Err(end_of_input()),
            }
        },
        TokenKind::LBracket => {
            let items =
                parse_comma_separated(tokens, parse_expression, &TokenKind::RBracket, unexpected)?;
            Ok(Expr::List { items, line })
        },
        TokenKind::If => parse_if(tokens, line),
        TokenKind::Backslash => parse_function(tokens, line),
        _ => Err(unexpected(token)),
    }
}

fn unmatched(token: &Token) -> ParseError {
    ParseError::UnmatchedParenthesis { token: token.lexeme.clone(),
                                       line:  token.line, }
}
