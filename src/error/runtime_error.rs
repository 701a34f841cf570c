#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during execution.
///
/// Every variant aborts the current run at the point of occurrence. Loop
/// ceilings, range truncation and reversed ranges are not errors; they are
/// reported as warnings instead.
pub enum RuntimeError {
    /// Tried to read a variable that was never bound.
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a function that is not in the function table.
    UndefinedFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to rebind a constant to a different value.
    ConstViolation {
        /// The name of the constant.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The operator is not defined for the given operands.
    UnsupportedOperation {
        /// Details about the operator and operand kinds.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A boundary or intertillage bound could not be turned into a range.
    UnsupportedBoundaryRange {
        /// Details about the rejected value.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A symbolic infinity could not be projected to a finite offset.
    UnsupportedSymbolicOperation {
        /// Details about the symbolic value.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Member access on a value without that attribute.
    UnknownAttribute {
        /// The attribute name.
        attribute: String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// Function calls nested deeper than the configured limit.
    CallDepthExceeded {
        /// The function whose call crossed the limit.
        name:  String,
        /// The limit in effect.
        limit: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Attempted division or modulo by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A value did not fit into a 64 bit integer.
    NumericOverflow {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedVariable { name, line } => {
                write!(f, "Error on line {line}: Undefined variable '{name}'.")
            },
            Self::UndefinedFunction { name, line } => {
                write!(f, "Error on line {line}: Undefined function '{name}'.")
            },
            Self::ConstViolation { name, line } => {
                write!(f, "Error on line {line}: Cannot reassign constant '{name}'.")
            },
            Self::UnsupportedOperation { details, line } => {
                write!(f, "Error on line {line}: Unsupported operation: {details}.")
            },
            Self::UnsupportedBoundaryRange { details, line } => {
                write!(f, "Error on line {line}: Unsupported boundary range: {details}.")
            },
            Self::UnsupportedSymbolicOperation { details, line } => write!(f,
                                                                           "Error on line {line}: Unsupported symbolic operation: {details}."),
            Self::UnknownAttribute { attribute, line } => {
                write!(f, "Error on line {line}: Object has no attribute '{attribute}'.")
            },
            Self::CallDepthExceeded { name, limit, line } => write!(f,
                                                                    "Error on line {line}: Calling '{name}' exceeds the call depth limit of {limit}."),
            Self::DivisionByZero { line } => write!(f, "Error on line {line}: Division by zero."),
            Self::NumericOverflow { line } => write!(f,
                                                     "Error on line {line}: Value does not fit into a 64 bit integer."),
        }
    }
}

impl std::error::Error for RuntimeError {}
