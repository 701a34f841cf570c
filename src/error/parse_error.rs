#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// No token rule matched at the current position.
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// Byte offset of the character in the source.
        position:  usize,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A required token was absent.
    UnexpectedToken {
        /// Description of what the grammar required.
        expected: String,
        /// The token that was found instead.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Reached the end of input while a token was still required.
    UnexpectedEndOfInput {
        /// Description of what the grammar required.
        expected: String,
    },
    /// The keyword `infty` was used where an expression was expected.
    InftyInExpression {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter { character,
                                        position,
                                        line, } => write!(f,
                                                          "Error on line {line}: Unexpected character '{character}' at position {position}."),
            Self::UnexpectedToken { expected,
                                    found,
                                    line, } => {
                write!(f, "Error on line {line}: Expected {expected} but found {found}.")
            },
            Self::UnexpectedEndOfInput { expected } => {
                write!(f, "Error: Unexpected end of input, expected {expected}.")
            },
            Self::InftyInExpression { line } => write!(f,
                                                       "Error on line {line}: Use '∞' (symbol) in expressions, not 'infty'."),
        }
    }
}

impl std::error::Error for ParseError {}
