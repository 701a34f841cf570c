/// Parser entry points.
///
/// Holds the program-level entry point, the expression entry point and the
/// shared result type.
pub mod core;

/// Binary expression parsing.
///
/// Handles the single, left-associative level of arithmetic operators.
pub mod binary;

/// Primary expression parsing.
///
/// Parses literals, identifiers with member access, the infinity glyph and
/// parenthesized sub-expressions.
pub mod primary;

/// Block parsing.
///
/// Parses brace-delimited statement lists shared by functions and every
/// compound construct.
pub mod block;

/// Statement parsing.
///
/// One function per statement form: declarations, printing, recursion,
/// calls and the compound blocks of the language.
pub mod statement;

/// Utility functions for the parser.
///
/// Token expectations and identifier/number helpers shared by all parsing
/// functions.
pub mod utils;
