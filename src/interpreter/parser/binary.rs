use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{core::ParseResult, unary::parse_unary},
        stack::ensure_sufficient_stack,
    },
};

/// Parses one left-associative tier.
///
/// Repeatedly parses `operand` and folds it into `Expr::Binary` nodes while
/// the next token maps to one of `operators`.
///
/// The rule is: `tier := operand (operator operand)*`
///
/// # Parameters
/// - `tokens`: Token stream.
/// - `operand`: Parser for the next tighter tier.
/// - `operators`: Operators accepted at this tier.
fn parse_left_associative<'a, I>(tokens: &mut Peekable<I>,
                                 operand: fn(&mut Peekable<I>) -> ParseResult<Expr>,
                                 operators: &[BinaryOperator])
                                 -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut left = operand(tokens)?;
    while let Some(&token) = tokens.peek()
          && let Some(op) = token_to_binary_operator(&token.kind)
          && operators.contains(&op)
    {
        tokens.next();
        let right = operand(tokens)?;
        left = Expr::Binary { left: Box::new(left),
                              op,
                              right: Box::new(right),
                              line: token.line };
    }
    Ok(left)
}

/// Parses logical `and` / `or`. Both share one tier and associate to the
/// left; short-circuiting is decided at evaluation.
///
/// The rule is: `logic := equality (("and" | "or") equality)*`
pub fn parse_logic<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_left_associative(tokens,
                           parse_equality,
                           &[BinaryOperator::And, BinaryOperator::Or])
}

/// Parses `==` and `/=`.
///
/// The rule is: `equality := comparison (("==" | "/=") comparison)*`
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_left_associative(tokens,
                           parse_comparison,
                           &[BinaryOperator::Equals, BinaryOperator::NotEqual])
}

/// Parses the ordering comparisons `<`, `>`, `<=` and `>=`.
///
/// The rule is: `comparison := construction (("<" | ">" | "<=" | ">=")
/// construction)*`
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_left_associative(tokens,
                           parse_construction,
                           &[BinaryOperator::LessThan,
                             BinaryOperator::GreaterThan,
                             BinaryOperator::LessEqual,
                             BinaryOperator::GreaterEqual])
}

/// Parses list construction with `:`.
///
/// Cons is right-associative: `1 : 2 : []` parses as `1 : (2 : [])`.
///
/// The rule is: `construction := concatenation (":" construction)?`
pub fn parse_construction<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    let left = parse_concatenation(tokens)?;

    if let Some(&token) = tokens.peek()
       && token.kind == TokenKind::Colon
    {
        tokens.next();
        let right = ensure_sufficient_stack(|| parse_construction(tokens))?;
        return Ok(Expr::Binary { left: Box::new(left),
                                 op: BinaryOperator::Cons,
                                 right: Box::new(right),
                                 line: token.line });
    }

    Ok(left)
}

/// Parses string concatenation with `..`.
///
/// The rule is: `concatenation := term (".." term)*`
pub fn parse_concatenation<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_left_associative(tokens, parse_term, &[BinaryOperator::Concatenation])
}

/// Parses addition and subtraction expressions.
///
/// The rule is: `term := factor (("+" | "-") factor)*`
pub fn parse_term<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_left_associative(tokens,
                           parse_factor,
                           &[BinaryOperator::Addition, BinaryOperator::Subtraction])
}

/// Parses multiplication and division expressions.
///
/// The rule is: `factor := power (("*" | "/") power)*`
pub fn parse_factor<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_left_associative(tokens,
                           parse_power,
                           &[BinaryOperator::Multiplication, BinaryOperator::Division])
}

/// Parses exponentiation.
///
/// Chains of `^` group to the left: `2 ^ 3 ^ 2` is `(2 ^ 3) ^ 2`.
///
/// The rule is: `power := unary ("^" unary)*`
pub fn parse_power<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_left_associative(tokens, parse_unary, &[BinaryOperator::Exponent])
}

/// Maps a token to its binary operator, if it is one.
///
/// `=` is not a binary operator; definitions are handled by their own tier.
///
/// # Example
/// ```
/// use pierogi::{
///     ast::BinaryOperator,
///     interpreter::{lexer::TokenKind, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&TokenKind::SlashEqual),
///            Some(BinaryOperator::NotEqual));
/// assert_eq!(token_to_binary_operator(&TokenKind::Equal), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &TokenKind) -> Option<BinaryOperator> {
    use BinaryOperator::{
        Addition, And, Concatenation, Cons, Division, Equals, Exponent, GreaterEqual,
        GreaterThan, LessEqual, LessThan, Multiplication, NotEqual, Or, Subtraction,
    };

    match token {
        TokenKind::And => Some(And),
        TokenKind::Or => Some(Or),
        TokenKind::EqualEqual => Some(Equals),
        TokenKind::SlashEqual => Some(NotEqual),
        TokenKind::Less => Some(LessThan),
        TokenKind::Greater => Some(GreaterThan),
        TokenKind::LessEqual => Some(LessEqual),
        TokenKind::GreaterEqual => Some(GreaterEqual),
        TokenKind::Colon => Some(Cons),
        TokenKind::DotDot => Some(Concatenation),
        TokenKind::Plus => Some(Addition),
        TokenKind::Minus => Some(Subtraction),
        TokenKind::Star => Some(Multiplication),
        TokenKind::Slash => Some(Division),
        TokenKind::Caret => Some(Exponent),
        _ => None,
    }
}
