/// Lexing and parsing errors.
///
/// Covers characters the lexer cannot match at all and grammar violations
/// detected by the parser before anything is executed.
pub mod parse_error;
/// Runtime errors.
///
/// Contains every error that aborts a run once execution has started: name
/// lookups, constant violations, unsupported operations and malformed range
/// inputs.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
