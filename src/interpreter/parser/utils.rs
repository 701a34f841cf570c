use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{lexer::Token, parser::core::ParseResult},
};

/// Consumes the next token, which must equal `expected`.
///
/// Only meaningful for tokens without a payload (punctuation and keywords).
///
/// # Returns
/// The line of the consumed token.
///
/// # Errors
/// Returns `UnexpectedToken` naming both tokens if they differ, or
/// `UnexpectedEndOfInput` when the stream is exhausted.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token)
                                                    -> ParseResult<usize>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((tok, line)) if tok == expected => Ok(*line),
        Some((tok, line)) => Err(ParseError::UnexpectedToken { expected: expected.to_string(),
                                                               found:    tok.to_string(),
                                                               line:     *line, }),
        None => Err(ParseError::UnexpectedEndOfInput { expected: expected.to_string() }),
    }
}

/// Parses a plain identifier and returns its name with its line.
///
/// Keywords are never identifiers, so `print` or `ds2` are rejected here.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<(String, usize)>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Identifier(s), line)) => Ok((s.clone(), *line)),
        Some((tok, line)) => Err(ParseError::UnexpectedToken { expected: "an identifier".to_string(),
                                                               found:    tok.to_string(),
                                                               line:     *line, }),
        None => Err(ParseError::UnexpectedEndOfInput { expected: "an identifier".to_string() }),
    }
}

/// Parses a number literal.
pub(in crate::interpreter::parser) fn parse_number<'a, I>(tokens: &mut Peekable<I>)
                                                          -> ParseResult<f64>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Number(n), _)) => Ok(*n),
        Some((tok, line)) => Err(ParseError::UnexpectedToken { expected: "a number".to_string(),
                                                               found:    tok.to_string(),
                                                               line:     *line, }),
        None => Err(ParseError::UnexpectedEndOfInput { expected: "a number".to_string() }),
    }
}
