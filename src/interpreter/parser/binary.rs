use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, primary::parse_primary},
    },
};

/// Parses a chain of binary operations.
///
/// `+`, `-`, `*`, `/` and `%` all bind equally and associate to the left,
/// so `2 + 3 * 4` is `(2 + 3) * 4`.
///
/// The rule is: `binary := primary (("+" | "-" | "*" | "/" | "%") primary)*`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// An `Expr::Binary` tree, or the lone primary when no operator follows.
pub fn parse_binary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_primary(tokens)?;
    while let Some((token, line)) = tokens.peek()
          && let Some(op) = token_to_binary_operator(token)
    {
        let line = *line;
        tokens.next();
        let right = parse_primary(tokens)?;
        left = Expr::Binary { op,
                              left: Box::new(left),
                              right: Box::new(right),
                              line };
    }
    Ok(left)
}

/// Maps an operator token to its [`BinaryOperator`], if it is one.
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        _ => None,
    }
}
