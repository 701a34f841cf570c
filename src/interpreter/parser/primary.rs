use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::{expect, parse_identifier},
        },
    },
};

/// Parses a primary (atomic) expression.
///
/// Primary expressions are:
/// - number literals, optionally followed by `∞` (`3∞` means `3 * ∞`)
/// - string literals
/// - identifiers with any number of `.attr` accesses
/// - the glyph `∞`, optionally followed by a number (`∞2` means `∞ * 2`)
/// - parenthesized expressions
///
/// Grammar (simplified):
/// ```text
///     primary := number "∞"?
///              | string
///              | identifier ("." identifier)*
///              | "∞" number?
///              | "(" expression ")"
/// ```
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (token, line) = tokens.next()
                              .ok_or_else(|| ParseError::UnexpectedEndOfInput { expected:
                                                                                    "an expression".to_string(), })?;
    let line = *line;

    match token {
        Token::Number(n) => {
            if let Some((Token::Infinity, _)) = tokens.peek() {
                tokens.next();
                return Ok(Expr::Binary { op: BinaryOperator::Mul,
                                         left: Box::new(Expr::Number(*n)),
                                         right: Box::new(Expr::Infinity),
                                         line });
            }
            Ok(Expr::Number(*n))
        },
        Token::Str(s) => Ok(Expr::Str(s.clone())),
        Token::Identifier(name) => {
            let mut expr = Expr::Identifier { name: name.clone(),
                                              line };
            while let Some((Token::Dot, _)) = tokens.peek() {
                tokens.next();
                let (attribute, _) = parse_identifier(tokens)?;
                expr = Expr::Member { base: Box::new(expr),
                                      attribute,
                                      line };
            }
            Ok(expr)
        },
        Token::Infinity => {
            if let Some((Token::Number(n), _)) = tokens.peek() {
                let n = *n;
                tokens.next();
                return Ok(Expr::Binary { op: BinaryOperator::Mul,
                                         left: Box::new(Expr::Infinity),
                                         right: Box::new(Expr::Number(n)),
                                         line });
            }
            Ok(Expr::Infinity)
        },
        Token::Infty => Err(ParseError::InftyInExpression { line }),
        Token::LParen => {
            let expr = parse_expression(tokens)?;
            expect(tokens, &Token::RParen)?;
            Ok(expr)
        },
        tok => Err(ParseError::UnexpectedToken { expected: "an expression".to_string(),
                                                 found: tok.to_string(),
                                                 line }),
    }
}
