use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

impl Interpreter<'_> {
    /// Evaluates a binary operation between two values.
    ///
    /// Two numbers use ordinary arithmetic (`eval_scalar_op`). A number and
    /// an infinity, in either order, go to `eval_infinity_scalar`; two
    /// infinities go to `eval_infinity_pair`. Every other combination is
    /// rejected.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Example
    /// ```
    /// use simulang::{
    ///     ast::BinaryOperator,
    ///     interpreter::{
    ///         evaluator::core::Interpreter,
    ///         value::{core::Value, infinity::SymbolicInfinity},
    ///     },
    /// };
    ///
    /// let sum = Interpreter::eval_binary(BinaryOperator::Add,
    ///                                    &Value::Number(3.0),
    ///                                    &Value::Number(4.0),
    ///                                    1).unwrap();
    /// assert_eq!(sum, Value::Number(7.0));
    ///
    /// let scaled = Interpreter::eval_binary(BinaryOperator::Mul,
    ///                                       &Value::Number(2.0),
    ///                                       &Value::Infinity(SymbolicInfinity::new(1)),
    ///                                       1).unwrap();
    /// assert_eq!(scaled, Value::Infinity(SymbolicInfinity::new(2)));
    ///
    /// let text = Interpreter::eval_binary(BinaryOperator::Add,
    ///                                     &Value::from("a"),
    ///                                     &Value::Number(1.0),
    ///                                     1);
    /// assert!(text.is_err());
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        use Value::{Infinity, Number};

        match (left, right) {
            (Number(a), Number(b)) => Self::eval_scalar_op(op, *a, *b, line).map(Number),
            (Number(n), Infinity(s)) | (Infinity(s), Number(n)) => {
                Self::eval_infinity_scalar(op, s, *n, line).map(Infinity)
            },
            (Infinity(a), Infinity(b)) => Self::eval_infinity_pair(op, a, b, line).map(Infinity),
            _ => Err(RuntimeError::UnsupportedOperation { details: format!("'{op}' between {} \
                                                                            and {}",
                                                                           left.type_name(),
                                                                           right.type_name()),
                                                          line }),
        }
    }
}
