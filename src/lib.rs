//! # simulang
//!
//! simulang is an interpreter for SimuLang, a small language whose values
//! include symbolic infinities such as `∞`, `3∞` or `∞+1`. Programs declare
//! constants, iterate over ranges that may reach into the transfinite, build
//! boundary frames and derive contradictions, all inside bounded loops.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::error::Error;

use logos::Logos;

use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        evaluator::{core::Interpreter, environment::Environment},
        generator::OfflineGenerator,
        lexer::{LexerExtras, Token},
        parser::core::parse_program,
        runtime::{BufferSink, RunContext, Warning},
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Node` and `Expr` enums that represent a parsed
/// program as a tree. The AST is built by the parser and walked by the
/// evaluator.
///
/// # Responsibilities
/// - Defines statement and expression types for all language constructs.
/// - Attaches source lines to nodes for error reporting.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while lexing, parsing or
/// running a program. Every error carries the source line it refers to.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Supports integration with standard error handling traits and reporting
///   utilities.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, the per-run context and the concept generator.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Defines the seams a caller plugs into: output, cancellation and concept
///   generation.
pub mod interpreter;
/// General utilities for safe numeric conversion and number formatting.
///
/// # Responsibilities
/// - Safely convert between `i64` and `f64` without silent data loss.
/// - Render numbers the way the language prints them.
pub mod util;

/// The outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Every variable bound when the run finished.
    pub environment: Environment,
    /// The warnings raised during the run, in order.
    pub warnings:    Vec<Warning>,
}

/// Splits source text into tokens paired with their 1-based line.
///
/// # Errors
/// Returns `UnexpectedCharacter` for the first character no token rule
/// accepts.
///
/// # Example
/// ```
/// use simulang::{interpreter::lexer::Token, tokenize};
///
/// let tokens = tokenize("octyl x := 1;\nprint(x);").unwrap();
///
/// assert_eq!(tokens[0], (Token::Octyl, 1));
/// assert_eq!(tokens[5], (Token::Print, 2));
/// assert!(tokenize("octyl x := 1 $ 2;").is_err());
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        if let Ok(tok) = token {
            tokens.push((tok, lexer.extras.line));
        } else {
            let character = lexer.slice().chars().next().unwrap_or_default();
            return Err(ParseError::UnexpectedCharacter { character,
                                                         position: lexer.span().start,
                                                         line: lexer.extras.line });
        }
    }

    Ok(tokens)
}

/// Tokenizes and parses source text into a [`Node::Program`].
///
/// # Example
/// ```
/// use simulang::compile;
///
/// assert!(compile("coeternal light := ∞;").is_ok());
/// assert!(compile("coeternal light := ;").is_err());
/// ```
pub fn compile(source: &str) -> Result<Node, ParseError> {
    parse_program(&tokenize(source)?)
}

/// Compiles and runs a program.
///
/// Output, warnings and concept generation go through `context`. When
/// compilation or execution fails, the error message is also written to the
/// context's output sink before it is returned.
///
/// # Errors
/// Returns the `ParseError` or `RuntimeError` that aborted the run.
///
/// # Example
/// ```
/// use simulang::{
///     interpreter::{
///         generator::OfflineGenerator,
///         runtime::{BufferSink, RunContext},
///         value::infinity::SymbolicInfinity,
///     },
///     run,
/// };
///
/// let mut sink = BufferSink::new();
/// let report = run("coeternal light := ∞;", RunContext::new(&mut sink, &OfflineGenerator)).unwrap();
///
/// assert_eq!(report.environment.lookup("light"), Some(&SymbolicInfinity::new(1).into()));
/// assert!(report.warnings.is_empty());
/// ```
pub fn run(source: &str, context: RunContext<'_>) -> Result<RunReport, Box<dyn Error>> {
    let program = match compile(source) {
        Ok(program) => program,
        Err(e) => {
            context.sink.write_line(&e.to_string());
            return Err(Box::new(e));
        },
    };

    let mut interpreter = Interpreter::new(context);
    if let Err(e) = interpreter.execute(&program) {
        interpreter.report_error(&e);
        return Err(Box::new(e));
    }

    let (environment, warnings) = interpreter.finish();
    Ok(RunReport { environment,
                   warnings })
}

/// Runs a program with default limits and no concept generator, returning
/// every line it wrote.
///
/// Contradiction and string-boundary blocks fall back to their local texts.
///
/// # Errors
/// Returns an error if parsing or evaluation fails.
///
/// # Examples
/// ```
/// use simulang::get_result;
///
/// let lines = get_result("print(4.0);").unwrap();
/// assert_eq!(lines, ["4"]);
///
/// // Example with an intentional error (unknown variable).
/// let res = get_result("print(y);");
/// assert!(res.is_err());
/// ```
pub fn get_result(source: &str) -> Result<Vec<String>, Box<dyn Error>> {
    let mut sink = BufferSink::new();
    run(source, RunContext::new(&mut sink, &OfflineGenerator))?;
    Ok(sink.into_lines())
}
