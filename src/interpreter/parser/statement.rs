use std::iter::Peekable;

use crate::{
    ast::{BoundaryRange, CompareOperator, Expr, FunctionDef, Node},
    error::ParseError,
    interpreter::{
        evaluator::core::ENTRY_POINT,
        lexer::Token,
        parser::{
            block::{parse_block, parse_colon_block},
            core::{ParseResult, parse_expression},
            utils::{expect, parse_identifier, parse_number},
        },
    },
};

/// Parses a single statement.
///
/// The leading token selects the statement form:
/// - `posit` starts a function declaration.
/// - `coeternal` / `octyl` start a constant / variable declaration.
/// - `print`, `recur`, `equiangular`, `delineator`, `intertillage`,
///   `bifurcator`, `boundary`, `sol` and `contradiction` start their
///   respective constructs.
/// - an identifier starts either a call (`name();`) or a reassignment
///   (`name := expr;`).
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
///
/// # Returns
/// A parsed [`Node`].
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((token, line)) = tokens.peek() else {
        return Err(ParseError::UnexpectedEndOfInput { expected: "a statement".to_string() });
    };

    match token {
        Token::Posit => parse_function(tokens),
        Token::Coeternal | Token::Octyl => parse_declaration(tokens),
        Token::Print => parse_print(tokens),
        Token::Recur => parse_recur(tokens),
        Token::Equiangular => parse_conditional(tokens),
        Token::Delineator => parse_delineator(tokens),
        Token::Intertillage => parse_intertillage(tokens),
        Token::Bifurcator => parse_bifurcator(tokens),
        Token::Boundary => parse_boundary(tokens),
        Token::Sol => parse_sol_block(tokens),
        Token::Contradiction => parse_contradiction(tokens),
        Token::Identifier(_) => parse_call_or_reassignment(tokens),
        tok => Err(ParseError::UnexpectedToken { expected: "a statement".to_string(),
                                                 found:    tok.to_string(),
                                                 line:     *line, }),
    }
}

/// Parses a function declaration.
///
/// Two spellings exist:
///
/// ```text
///     posit name(): { ... }
///     posit varnothing nabla infty ds2(): { ... }
/// ```
///
/// The second one declares the entry point `ds2`.
fn parse_function<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::Posit)?;

    let name = if let Some((Token::Varnothing, _)) = tokens.peek() {
        tokens.next();
        expect(tokens, &Token::Nabla)?;
        expect(tokens, &Token::Infty)?;
        expect(tokens, &Token::Ds2)?;
        ENTRY_POINT.to_string()
    } else {
        parse_identifier(tokens)?.0
    };

    expect(tokens, &Token::LParen)?;
    expect(tokens, &Token::RParen)?;
    let body = parse_colon_block(tokens)?;

    Ok(Node::Function(FunctionDef { name, body, line }))
}

/// Parses `coeternal name := expr;` or `octyl name := expr;`.
///
/// `coeternal` declares a constant, `octyl` a variable.
fn parse_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let is_const = matches!(tokens.next(), Some((Token::Coeternal, _)));
    let (name, line) = parse_identifier(tokens)?;
    expect(tokens, &Token::Assign)?;
    let value = parse_expression(tokens)?;
    expect(tokens, &Token::Semicolon)?;

    Ok(Node::Assignment { name,
                          value,
                          is_const,
                          line })
}

/// Parses `name();` or `name := expr;`.
fn parse_call_or_reassignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (name, line) = parse_identifier(tokens)?;

    match tokens.next() {
        Some((Token::LParen, _)) => {
            expect(tokens, &Token::RParen)?;
            expect(tokens, &Token::Semicolon)?;
            Ok(Node::Call { name, line })
        },
        Some((Token::Assign, _)) => {
            let value = parse_expression(tokens)?;
            expect(tokens, &Token::Semicolon)?;
            Ok(Node::Assignment { name,
                                  value,
                                  is_const: false,
                                  line })
        },
        Some((tok, line)) => Err(ParseError::UnexpectedToken { expected: "'(' or ':='".to_string(),
                                                               found:    tok.to_string(),
                                                               line:     *line, }),
        None => Err(ParseError::UnexpectedEndOfInput { expected: "'(' or ':='".to_string() }),
    }
}

/// Parses `print(expr);`.
fn parse_print<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::Print)?;
    expect(tokens, &Token::LParen)?;
    let value = parse_expression(tokens)?;
    expect(tokens, &Token::RParen)?;
    expect(tokens, &Token::Semicolon)?;

    Ok(Node::Print { value, line })
}

/// Parses `recur ds2(bound?);`.
///
/// The optional bound is a number literal, which may carry a trailing `∞`.
/// The glyph is consumed and otherwise ignored.
fn parse_recur<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::Recur)?;
    expect(tokens, &Token::Ds2)?;
    expect(tokens, &Token::LParen)?;

    let mut bound = None;
    if let Some((Token::Number(n), _)) = tokens.peek() {
        bound = Some(*n);
        tokens.next();
        if let Some((Token::Infinity, _)) = tokens.peek() {
            tokens.next();
        }
    }

    expect(tokens, &Token::RParen)?;
    expect(tokens, &Token::Semicolon)?;

    Ok(Node::Recur { bound, line })
}

/// Parses `equiangular left <op> right: { ... }`.
fn parse_conditional<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::Equiangular)?;
    let left = parse_expression(tokens)?;

    let op = match tokens.next() {
        Some((Token::EqualEqual, _)) => CompareOperator::Equal,
        Some((Token::BangEqual, _)) => CompareOperator::NotEqual,
        Some((Token::Less, _)) => CompareOperator::Less,
        Some((Token::Greater, _)) => CompareOperator::Greater,
        Some((Token::LessEqual, _)) => CompareOperator::LessEqual,
        Some((Token::GreaterEqual, _)) => CompareOperator::GreaterEqual,
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { expected: "a comparison operator".to_string(),
                                                     found:    tok.to_string(),
                                                     line:     *line, });
        },
        None => {
            return Err(ParseError::UnexpectedEndOfInput { expected:
                                                              "a comparison operator".to_string(), });
        },
    };

    let right = parse_expression(tokens)?;
    let body = parse_colon_block(tokens)?;

    Ok(Node::Conditional { op,
                           left,
                           right,
                           body,
                           line })
}

/// Parses `delineator "label": { ... }`.
fn parse_delineator<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::Delineator)?;
    let label = match tokens.next() {
        Some((Token::Str(s), _)) => s.clone(),
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { expected: "a string label".to_string(),
                                                     found:    tok.to_string(),
                                                     line:     *line, });
        },
        None => {
            return Err(ParseError::UnexpectedEndOfInput { expected: "a string label".to_string() });
        },
    };
    let body = parse_colon_block(tokens)?;

    Ok(Node::Delineator { label, body })
}

/// Parses `intertillage [start..end] -> name: { ... }`.
fn parse_intertillage<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::Intertillage)?;
    let (start, end) = parse_range_literal(tokens)?;
    expect(tokens, &Token::Arrow)?;
    let (variable, _) = parse_identifier(tokens)?;
    let body = parse_colon_block(tokens)?;

    Ok(Node::Intertillage { start,
                            end,
                            variable,
                            body,
                            line })
}

/// Parses `bifurcator origin? [left, right] -> outer(l, r): { ... }`.
///
/// The origin is present unless the keyword is directly followed by `[`.
fn parse_bifurcator<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::Bifurcator)?;

    let origin = match tokens.peek() {
        Some((Token::LBracket, _)) => None,
        _ => Some(parse_expression(tokens)?),
    };

    expect(tokens, &Token::LBracket)?;
    let left = parse_expression(tokens)?;
    expect(tokens, &Token::Comma)?;
    let right = parse_expression(tokens)?;
    expect(tokens, &Token::RBracket)?;
    expect(tokens, &Token::Arrow)?;

    let (outer, _) = parse_identifier(tokens)?;
    expect(tokens, &Token::LParen)?;
    let (left_var, _) = parse_identifier(tokens)?;
    expect(tokens, &Token::Comma)?;
    let (right_var, _) = parse_identifier(tokens)?;
    expect(tokens, &Token::RParen)?;

    let body = parse_colon_block(tokens)?;

    Ok(Node::Bifurcator { origin,
                          left,
                          right,
                          outer,
                          left_var,
                          right_var,
                          body,
                          line })
}

/// Parses `boundary [start..end] -> name: { ... }` or
/// `boundary expr -> name: { ... }`.
fn parse_boundary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::Boundary)?;

    let range = if let Some((Token::LBracket, _)) = tokens.peek() {
        let (start, end) = parse_range_literal(tokens)?;
        BoundaryRange::Span { start, end }
    } else {
        BoundaryRange::Reference(parse_expression(tokens)?)
    };

    expect(tokens, &Token::Arrow)?;
    let (variable, _) = parse_identifier(tokens)?;
    let body = parse_colon_block(tokens)?;

    Ok(Node::Boundary { range,
                        variable,
                        body,
                        line })
}

/// Parses `sol mode property value { ... }`.
///
/// Unlike the other blocks, no colon precedes the body.
fn parse_sol_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::Sol)?;
    let (mode, _) = parse_identifier(tokens)?;
    let (property, _) = parse_identifier(tokens)?;
    let value = parse_number(tokens)?;
    let body = parse_block(tokens)?;

    Ok(Node::SolBlock { mode,
                        property,
                        value,
                        body })
}

/// Parses both contradiction forms.
///
/// ```text
///     contradiction (first, second) -> [focal, truth]: { ... }
///     contradiction statement -> name: { ... }
/// ```
///
/// A `(` right after the keyword always selects the paired form.
fn parse_contradiction<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::Contradiction)?;

    if let Some((Token::LParen, _)) = tokens.peek() {
        tokens.next();
        let first = parse_expression(tokens)?;
        expect(tokens, &Token::Comma)?;
        let second = parse_expression(tokens)?;
        expect(tokens, &Token::RParen)?;
        expect(tokens, &Token::Arrow)?;
        expect(tokens, &Token::LBracket)?;
        let (focal_var, _) = parse_identifier(tokens)?;
        expect(tokens, &Token::Comma)?;
        let (truth_var, _) = parse_identifier(tokens)?;
        expect(tokens, &Token::RBracket)?;
        let body = parse_colon_block(tokens)?;

        return Ok(Node::Contradiction { first,
                                        second,
                                        focal_var,
                                        truth_var,
                                        body,
                                        line });
    }

    let statement = parse_expression(tokens)?;
    expect(tokens, &Token::Arrow)?;
    let (variable, _) = parse_identifier(tokens)?;
    let body = parse_colon_block(tokens)?;

    Ok(Node::ContradictionInfer { statement,
                                  variable,
                                  body,
                                  line })
}

/// Parses `[start..end]`.
fn parse_range_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<(Expr, Expr)>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LBracket)?;
    let start = parse_expression(tokens)?;
    expect(tokens, &Token::DotDot)?;
    let end = parse_expression(tokens)?;
    expect(tokens, &Token::RBracket)?;

    Ok((start, end))
}
