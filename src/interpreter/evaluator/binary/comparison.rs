use std::cmp::Ordering;

use crate::{
    ast::CompareOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

impl Interpreter<'_> {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// Numbers compare numerically. A symbolic infinity compares through its
    /// integer projection, against numbers as well as other infinities.
    /// Strings compare lexicographically. Any other pair only supports
    /// `==` and `!=`, which compare structurally.
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
    /// - `left`: The left-hand value.
    /// - `right`: The right-hand value.
    /// - `line`: Current line number used for error reporting.
    ///
    /// # Example
    /// ```
    /// use simulang::{
    ///     ast::CompareOperator,
    ///     interpreter::{
    ///         evaluator::core::Interpreter,
    ///         value::{core::Value, infinity::SymbolicInfinity},
    ///     },
    /// };
    ///
    /// let huge = Value::Number(5e9);
    /// let two_inf = Value::Infinity(SymbolicInfinity::new(2));
    ///
    /// assert!(Interpreter::eval_comparison(CompareOperator::Greater, &huge, &two_inf, 1).unwrap());
    /// assert!(Interpreter::eval_comparison(CompareOperator::Less,
    ///                                      &Value::from("a"),
    ///                                      &Value::from("b"),
    ///                                      1).unwrap());
    /// ```
    pub fn eval_comparison(op: CompareOperator,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<bool> {
        let Some(ordering) = Self::ordering(left, right, line)? else {
            return match op {
                CompareOperator::Equal => Ok(left == right),
                CompareOperator::NotEqual => Ok(left != right),
                _ => Err(RuntimeError::UnsupportedOperation { details: format!("'{op}' between \
                                                                                {} and {}",
                                                                               left.type_name(),
                                                                               right.type_name()),
                                                              line }),
            };
        };

        // NaN
        let Some(ordering) = ordering else {
            return Ok(op == CompareOperator::NotEqual);
        };

        Ok(match op {
               CompareOperator::Equal => ordering.is_eq(),
               CompareOperator::NotEqual => ordering.is_ne(),
               CompareOperator::Less => ordering.is_lt(),
               CompareOperator::Greater => ordering.is_gt(),
               CompareOperator::LessEqual => ordering.is_le(),
               CompareOperator::GreaterEqual => ordering.is_ge(),
           })
    }

    /// Orders two values, or returns `None` when the pair has no ordering.
    #[allow(clippy::cast_precision_loss)]
    fn ordering(left: &Value, right: &Value, line: usize) -> EvalResult<Option<Option<Ordering>>> {
        use Value::{Infinity, Number, Str};

        Ok(match (left, right) {
               (Number(a), Number(b)) => Some(a.partial_cmp(b)),
               (Infinity(a), Number(b)) => Some((a.to_integer(line)? as f64).partial_cmp(b)),
               (Number(a), Infinity(b)) => Some(a.partial_cmp(&(b.to_integer(line)? as f64))),
               (Infinity(a), Infinity(b)) => Some(Some(a.to_integer(line)?.cmp(&b.to_integer(line)?))),
               (Str(a), Str(b)) => Some(Some(a.cmp(b))),
               _ => None,
           })
    }
}
