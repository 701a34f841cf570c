/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the program tree, evaluates expressions, runs
/// function passes and compound blocks, manages the variable environment and
/// the function table, and writes output and warnings to the run's sink.
///
/// # Responsibilities
/// - Executes every statement kind, including the bounded `recur` loop.
/// - Implements the arithmetic of numbers and symbolic infinities.
/// - Reports runtime errors such as undefined names or const violations.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// paired with its source line: keywords, identifiers, numbers, strings,
/// operators and punctuation including the infinity glyph.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with line numbers.
/// - Skips whitespace and `//` comments.
/// - Reports lexical errors for characters no rule accepts.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// a [`crate::ast::Node::Program`] by recursive descent.
///
/// # Responsibilities
/// - Converts tokens into statement and expression nodes.
/// - Validates the grammar, reporting the expected and found token.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the values a program computes with: numbers,
/// strings, sequences, four-sided frames and symbolic infinities.
///
/// # Responsibilities
/// - Defines the `Value` enum and the `Frame` record.
/// - Implements the symbolic infinity algebra and its integer projection.
/// - Renders values for printing.
pub mod value;
/// The runtime module holds what a caller hands to a run.
///
/// # Responsibilities
/// - Defines the per-run context: output sink, concept generator,
///   cancellation token and limits.
/// - Defines the warnings reported while running.
pub mod runtime;
/// The generator module connects the interpreter to a concept generator.
///
/// Contradiction and string-boundary blocks ask an external collaborator for
/// natural-language text. This module defines that seam together with an
/// offline implementation, a shell-command implementation and a timeout
/// wrapper.
pub mod generator;
