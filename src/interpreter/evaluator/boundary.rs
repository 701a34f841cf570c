use crate::{
    ast::{BinaryOperator, BoundaryRange, Node},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter, Signal},
        generator::PromptKind,
        value::{
            core::{Frame, Value},
            infinity::InfinityOp,
        },
    },
    util::num::{i64_to_f64_checked, truncate_to_i64},
};

/// Leading points listed on `top`/`bottom` before an open-ended end.
const OPEN_EDGE_POINTS: i64 = 5;
/// Points on each of `left` and `right`.
const SIDE_POINTS: i64 = 3;

fn unsupported(details: String, line: usize) -> RuntimeError {
    RuntimeError::UnsupportedBoundaryRange { details, line }
}

/// The first value of an edge, or the edge itself when it is not a sequence.
fn first_point(edge: &Value, line: usize) -> EvalResult<Value> {
    match edge {
        Value::Sequence(items) => {
            items.first()
                 .cloned()
                 .ok_or_else(|| unsupported("empty frame edge".to_string(), line))
        },
        other => Ok(other.clone()),
    }
}

/// The last value of an edge, or the edge itself when it is not a sequence.
fn last_point(edge: &Value, line: usize) -> EvalResult<Value> {
    match edge {
        Value::Sequence(items) => {
            items.last()
                 .cloned()
                 .ok_or_else(|| unsupported("empty frame edge".to_string(), line))
        },
        other => Ok(other.clone()),
    }
}

/// Projects a finite or symbolic value onto an integer.
fn project(value: &Value, line: usize) -> EvalResult<i64> {
    match value {
        Value::Number(n) => truncate_to_i64(*n, line),
        Value::Infinity(s) => s.to_integer(line),
        other => Err(unsupported(format!("cannot span a {}", other.type_name()), line)),
    }
}

impl Interpreter<'_> {
    /// Executes `boundary range -> variable: { body }`.
    ///
    /// Two string bounds ask the concept generator what lies around them; the
    /// answer (or a fixed sentence naming both) fills all four frame edges.
    /// Any other bounds build a numeric frame, see [`Self::build_frame`].
    ///
    /// The range is either an explicit `[start..end]` or an expression that
    /// is unwrapped: a frame yields the first point of its `top` and the last
    /// point of its `bottom`, a sequence of at least two values yields its
    /// first and last element, and a number or infinity is used for both
    /// bounds.
    ///
    /// # Example
    /// ```
    /// use simulang::get_result;
    ///
    /// let lines = get_result("boundary [2..5] -> frame: { print(frame.top); print(frame.right); }")
    ///     .unwrap();
    ///
    /// assert_eq!(lines, ["[1, 2, 3, 4, 5, 6]", "[6, 7, 8]"]);
    /// ```
    pub(super) fn execute_boundary(&mut self,
                                   range: &BoundaryRange,
                                   variable: &str,
                                   body: &[Node],
                                   line: usize)
                                   -> EvalResult<Option<Signal>> {
        let (start, end) = match range {
            BoundaryRange::Span { start, end } => (self.eval(start)?, self.eval(end)?),
            BoundaryRange::Reference(expr) => Self::unwrap_range(&self.eval(expr)?, line)?,
        };

        let frame = match (&start, &end) {
            (Value::Str(s), Value::Str(e)) => {
                let inputs = [s.clone(), e.clone()];
                let text = self.generate_or_else(PromptKind::Boundary, &inputs, || {
                                   format!("Around '{s}' and '{e}', symbolic tension forms a \
                                            transitional envelope.")
                               });
                Frame::uniform(&Value::Str(text))
            },
            _ => self.build_frame(&start, &end, line)?,
        };

        self.environment.set(variable, frame.into(), false, line)?;
        self.execute_body(body)
    }

    fn unwrap_range(value: &Value, line: usize) -> EvalResult<(Value, Value)> {
        match value {
            Value::Frame(frame) => {
                Ok((first_point(&frame.top, line)?, last_point(&frame.bottom, line)?))
            },
            Value::Sequence(items) if items.len() >= 2 => {
                Ok((items[0].clone(), items[items.len() - 1].clone()))
            },
            Value::Number(_) | Value::Infinity(_) => Ok((value.clone(), value.clone())),
            other => Err(unsupported(format!("cannot unwrap {other}"), line)),
        }
    }

    /// Builds the frame around `start..end`.
    ///
    /// - `top` and `bottom` list every integer from `start - 1` to `end + 1`.
    ///   With a symbolic `end` they list the first five points from `start`,
    ///   a `...` marker and `end + 1` instead.
    /// - `left` holds three points counting up from `start - 1`.
    /// - `right` holds three points counting up from `end + 1`, or from `end`
    ///   itself when it is symbolic.
    ///
    /// # Errors
    /// `UnsupportedBoundaryRange` when a finite span exceeds the configured
    /// maximum range, plus any arithmetic error on the bounds.
    pub fn build_frame(&self, start: &Value, end: &Value, line: usize) -> EvalResult<Frame> {
        let add = |value: &Value, delta: i64| -> EvalResult<Value> {
            let delta = Value::Number(i64_to_f64_checked(delta, line)?);
            Self::eval_binary(BinaryOperator::Add, value, &delta, line)
        };

        let below_start = Self::eval_binary(BinaryOperator::Sub, start, &Value::Number(1.0), line)?;
        let left = (0..SIDE_POINTS).map(|i| add(&below_start, i))
                                   .collect::<EvalResult<Vec<_>>>()?;

        let (edge, right) = if let Value::Infinity(end) = end {
            let mut edge = (0..OPEN_EDGE_POINTS).map(|i| add(start, i))
                                                .collect::<EvalResult<Vec<_>>>()?;
            edge.push(Value::from("..."));
            edge.push(end.shifted(InfinityOp::Add, 1.0).into());

            let right = (0..SIDE_POINTS).map(|i| {
                                            let i = i64_to_f64_checked(i, line)?;
                                            Ok(end.shifted(InfinityOp::Add, i).into())
                                        })
                                        .collect::<EvalResult<Vec<Value>>>()?;
            (edge, right)
        } else {
            let above_end = add(end, 1)?;
            let edge = self.span(&below_start, &add(end, 2)?, line)?;
            let right = (0..SIDE_POINTS).map(|i| add(&above_end, i))
                                        .collect::<EvalResult<Vec<_>>>()?;
            (edge, right)
        };

        let edge = Value::from(edge);
        Ok(Frame { top:    edge.clone(),
                   left:   left.into(),
                   bottom: edge,
                   right:  right.into(), })
    }

    /// Every integer in `from..to`.
    fn span(&self, from: &Value, to: &Value, line: usize) -> EvalResult<Vec<Value>> {
        let from = project(from, line)?;
        let to = project(to, line)?;

        let max_range = i64::try_from(self.context.limits.max_range).unwrap_or(i64::MAX);
        if to.saturating_sub(from) > max_range {
            return Err(unsupported(format!("span of {from}..{to} exceeds {max_range} points"),
                                   line));
        }

        (from..to).map(|i| Ok(Value::Number(i64_to_f64_checked(i, line)?)))
                  .collect()
    }
}
