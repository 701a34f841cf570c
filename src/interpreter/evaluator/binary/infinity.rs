use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::infinity::{InfinityOp, SymbolicInfinity},
    },
};

impl Interpreter<'_> {
    /// Combines an infinity with a finite number, in either operand order.
    ///
    /// - `*` yields a fresh infinity whose coefficient is the number.
    /// - `+` and `-` shift the infinity by the number. The infinity is always
    ///   the base, so `5 - ∞` and `∞ - 5` give the same value. Shifting an
    ///   offset combines the amounts instead of nesting another level.
    ///
    /// # Errors
    /// `UnsupportedOperation` for `/` and `%`.
    ///
    /// # Example
    /// ```
    /// use simulang::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::infinity::SymbolicInfinity},
    /// };
    ///
    /// let shifted =
    ///     Interpreter::eval_infinity_scalar(BinaryOperator::Add, &SymbolicInfinity::new(1), 5.0, 1)
    ///         .unwrap();
    ///
    /// assert_eq!(shifted.to_string(), "5+∞");
    /// assert_eq!(shifted.to_integer(1).unwrap(), 1_000_000_005);
    /// ```
    pub fn eval_infinity_scalar(op: BinaryOperator,
                                infinity: &SymbolicInfinity,
                                number: f64,
                                line: usize)
                                -> EvalResult<SymbolicInfinity> {
        match op {
            BinaryOperator::Mul => SymbolicInfinity::scaled(number, line),
            BinaryOperator::Add => Ok(infinity.shifted(InfinityOp::Add, number)),
            BinaryOperator::Sub => Ok(infinity.shifted(InfinityOp::Sub, number)),
            BinaryOperator::Div | BinaryOperator::Mod => {
                Err(RuntimeError::UnsupportedOperation { details: format!("'{op}' with a \
                                                                           symbolic infinity"),
                                                         line })
            },
        }
    }

    /// Combines two infinities.
    ///
    /// `+` merges offsets as described on [`SymbolicInfinity::add_symbolic`];
    /// `-` keeps only the coefficient difference.
    ///
    /// # Errors
    /// `UnsupportedOperation` for `*`, `/` and `%`.
    pub fn eval_infinity_pair(op: BinaryOperator,
                              left: &SymbolicInfinity,
                              right: &SymbolicInfinity,
                              line: usize)
                              -> EvalResult<SymbolicInfinity> {
        match op {
            BinaryOperator::Add => Ok(left.add_symbolic(right)),
            BinaryOperator::Sub => Ok(left.sub_symbolic(right)),
            BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Mod => {
                Err(RuntimeError::UnsupportedOperation { details: format!("'{op}' between two \
                                                                           symbolic infinities"),
                                                         line })
            },
        }
    }
}
