use std::iter::Peekable;

use crate::{
    ast::{Expr, Node},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{binary::parse_binary, statement::parse_statement},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole token sequence into a [`Node::Program`].
///
/// Top-level statements are parsed in order until the tokens are exhausted.
///
/// Grammar: `program := statement*`
///
/// # Parameters
/// - `tokens`: `(Token, line)` pairs as produced by [`crate::tokenize`].
///
/// # Returns
/// The program node owning every top-level statement.
///
/// # Example
/// ```
/// use simulang::{ast::Node, interpreter::parser::core::parse_program, tokenize};
///
/// let tokens = tokenize("octyl time := 42;").unwrap();
/// let program = parse_program(&tokens).unwrap();
///
/// assert!(matches!(program, Node::Program(ref statements) if statements.len() == 1));
/// ```
pub fn parse_program(tokens: &[(Token, usize)]) -> ParseResult<Node> {
    let mut iter = tokens.iter().peekable();
    let mut statements = Vec::new();

    while iter.peek().is_some() {
        statements.push(parse_statement(&mut iter)?);
    }

    Ok(Node::Program(statements))
}

/// Parses a full expression.
///
/// The language has a single binary precedence level, so this simply enters
/// [`parse_binary`].
///
/// Grammar: `expression := binary`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_binary(tokens)
}
