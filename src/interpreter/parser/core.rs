use std::{iter::Peekable, rc::Rc};

use tracing::debug;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            binary::parse_logic,
            utils::{expect, parse_block, parse_identifier},
        },
        stack::ensure_sufficient_stack,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a token stream into its top-level expressions.
///
/// Expressions are parsed one after another until the `Eof` token; they need
/// no separators (`x = 1 y = x` is two expressions). Parsing is fail-fast:
/// the first syntax error aborts the whole stream.
///
/// # Parameters
/// - `tokens`: The output of [`lex`](crate::interpreter::lexer::lex).
///
/// # Returns
/// The top-level expressions in source order.
///
/// # Example
/// ```
/// use pierogi::{
///     ast::{Expr, LiteralValue},
///     interpreter::{lexer::lex, parser::core::parse},
/// };
///
/// let tokens = lex("(5)").unwrap();
/// let program = parse(&tokens).unwrap();
///
/// let five = Expr::Literal { value: LiteralValue::Number(5.0),
///                            line:  1, };
/// assert_eq!(program,
///            vec![Expr::Group { inner: Box::new(five),
///                               line:  1, }]);
/// ```
pub fn parse(tokens: &[Token]) -> ParseResult<Vec<Expr>> {
    let mut tokens = tokens.iter().peekable();
    let mut program = Vec::new();

    while let Some(token) = tokens.peek()
          && token.kind != TokenKind::Eof
    {
        program.push(parse_expression(&mut tokens)?);
    }

    debug!(expressions = program.len(), "parsed source");
    Ok(program)
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, definition, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := definition`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    ensure_sufficient_stack(|| parse_definition(tokens))
}

/// Parses a definition `symbol = expression`.
///
/// Definitions are right-associative (`a = b = 1` binds both) and the target
/// must be a bare identifier.
///
/// Grammar: `definition := logic ("=" definition)?`
///
/// # Errors
/// - `MissingIdentifier` if the left side of `=` is anything but an
///   identifier; the error points at the first token of the left side.
pub fn parse_definition<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    let first = tokens.peek().copied();
    let target = parse_logic(tokens)?;

    if let Some(&equal) = tokens.peek()
       && equal.kind == TokenKind::Equal
    {
        tokens.next();

        let Expr::Identifier { symbol, .. } = &target else {
            let (token, line) = first.map_or_else(|| (String::new(), equal.line),
                                                  |t| (t.lexeme.clone(), t.line));
            return Err(ParseError::MissingIdentifier { token, line });
        };

        let value = ensure_sufficient_stack(|| parse_definition(tokens))?;
        return Ok(Expr::Definition { symbol: symbol.clone(),
                                     value: Box::new(value),
                                     line: equal.line });
    }

    Ok(target)
}

/// Parses an `if` expression. Both branches are mandatory.
///
/// Syntax:
/// ```text
///     if <condition> { <expr>+ } else { <expr>+ }
/// ```
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `if` keyword.
/// - `line`: Line number of the `if` token.
///
/// # Errors
/// - `UnexpectedToken` if a brace or the `else` keyword is missing, or a
///   branch is empty.
pub fn parse_if<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    let condition = parse_expression(tokens)?;
    let consequent = parse_block(tokens)?;
    expect(tokens, &TokenKind::Else)?;
    let alternative = parse_block(tokens)?;

    Ok(Expr::If { condition: Box::new(condition),
                  consequent,
                  alternative,
                  line })
}

/// Parses a function literal.
///
/// Syntax:
/// ```text
///     \ <param> ("," <param>)* { <expr>+ }
///     \ { <expr>+ }
/// ```
///
/// # Parameters
/// - `tokens`: Token stream positioned after the backslash.
/// - `line`: Line number of the backslash.
///
/// # Errors
/// - `MissingIdentifier` if a parameter is not a bare identifier.
/// - `UnexpectedToken` if the body block is malformed.
pub fn parse_function<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut parameters = Vec::new();

    if !matches!(tokens.peek(), Some(token) if token.kind == TokenKind::LBrace) {
        loop {
            parameters.push(parse_identifier(tokens)?);

            match tokens.peek() {
                Some(token) if token.kind == TokenKind::Comma => {
                    tokens.next();
                },
                _ => break,
            }
        }
    }

    let body = parse_block(tokens)?;

    Ok(Expr::Function { parameters: Rc::from(parameters),
                        body: Rc::from(body),
                        line })
}
