use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::evaluator::core::{EvalResult, Interpreter},
};

impl Interpreter<'_> {
    /// Evaluates an arithmetic operation between two finite numbers.
    ///
    /// Division and modulo check for a zero divisor. Modulo is floored, so the
    /// result takes the sign of the divisor.
    ///
    /// # Example
    /// ```
    /// use simulang::{ast::BinaryOperator, interpreter::evaluator::core::Interpreter};
    ///
    /// assert_eq!(Interpreter::eval_scalar_op(BinaryOperator::Div, 9.0, 2.0, 1).unwrap(), 4.5);
    /// assert_eq!(Interpreter::eval_scalar_op(BinaryOperator::Mod, -7.0, 3.0, 1).unwrap(), 2.0);
    /// assert!(Interpreter::eval_scalar_op(BinaryOperator::Mod, 1.0, 0.0, 1).is_err());
    /// ```
    pub fn eval_scalar_op(op: BinaryOperator, left: f64, right: f64, line: usize) -> EvalResult<f64> {
        match op {
            BinaryOperator::Add => Ok(left + right),
            BinaryOperator::Sub => Ok(left - right),
            BinaryOperator::Mul => Ok(left * right),
            BinaryOperator::Div => {
                if right == 0.0 {
                    return Err(RuntimeError::DivisionByZero { line });
                }
                Ok(left / right)
            },
            BinaryOperator::Mod => {
                if right == 0.0 {
                    return Err(RuntimeError::DivisionByZero { line });
                }
                let remainder = left % right;
                if remainder != 0.0 && (remainder < 0.0) != (right < 0.0) {
                    Ok(remainder + right)
                } else {
                    Ok(remainder)
                }
            },
        }
    }
}
