use crate::{
    ast::{Expr, Node},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter, Signal},
        runtime::Warning,
        value::{core::Value, infinity::SymbolicInfinity},
    },
    util::num::{i64_to_f64_checked, truncate_to_i64},
};

/// A resolved `intertillage` range: the bound values and their offsets.
struct Range {
    start:        Value,
    end:          Value,
    start_offset: i64,
    end_offset:   i64,
}

impl Range {
    /// The value bound to the loop variable at `offset`.
    ///
    /// A symbolic bound is bound verbatim at its own offset. Between symbolic
    /// bounds the variable is an induction value counting up from the start;
    /// with a finite start it is the plain offset.
    fn value_at(&self, offset: i64, line: usize) -> EvalResult<Value> {
        match (&self.start, &self.end) {
            (Value::Infinity(_), _) if offset == self.start_offset => Ok(self.start.clone()),
            (_, Value::Infinity(_)) if offset == self.end_offset => Ok(self.end.clone()),
            (Value::Infinity(start), _) => {
                let delta = i64_to_f64_checked(offset - self.start_offset, line)?;
                Ok(Value::Infinity(SymbolicInfinity::induction(start.coefficient, delta)))
            },
            _ => Ok(Value::Number(i64_to_f64_checked(offset, line)?)),
        }
    }
}

/// Projects a range bound onto an absolute offset.
fn bound_offset(value: &Value, line: usize) -> EvalResult<i64> {
    match value {
        Value::Number(n) => truncate_to_i64(*n, line),
        Value::Infinity(s) => s.absolute_offset(line),
        _ => Err(RuntimeError::UnsupportedBoundaryRange { details: format!("intertillage bound \
                                                                            must be a number or \
                                                                            symbolic infinity, \
                                                                            found {}",
                                                                           value.type_name()),
                                                          line }),
    }
}

impl Interpreter<'_> {
    /// Executes `intertillage [start..end] -> variable: { body }`.
    ///
    /// Both bounds are projected onto integer offsets and the body runs once
    /// per offset, inclusive. Descending bounds are swapped with a
    /// `BoundsReversed` warning, and ranges longer than the configured
    /// maximum are cut to it with a `RangeTruncated` warning.
    ///
    /// For long ranges only the output of the first `display_head` and last
    /// `display_tail` iterations is shown, separated by a single `...` line.
    /// The iterations in between still run.
    ///
    /// The loop variable is rebound on every iteration as a regular variable.
    /// A `recur` in the body ends the loop and is passed on.
    ///
    /// # Example
    /// ```
    /// use simulang::get_result;
    ///
    /// let lines = get_result("intertillage [3..1] -> i: { print(i); }").unwrap();
    ///
    /// assert_eq!(lines,
    ///            ["⚠️ Reversing intertillage bounds: start=3, end=1", "1", "2", "3"]);
    /// ```
    pub(super) fn execute_intertillage(&mut self,
                                       start: &Expr,
                                       end: &Expr,
                                       variable: &str,
                                       body: &[Node],
                                       line: usize)
                                       -> EvalResult<Option<Signal>> {
        let start = self.eval(start)?;
        let end = self.eval(end)?;
        let mut range = Range { start_offset: bound_offset(&start, line)?,
                                end_offset: bound_offset(&end, line)?,
                                start,
                                end };

        if range.start_offset > range.end_offset {
            self.warn(Warning::BoundsReversed { start: range.start_offset,
                                                end:   range.end_offset, });
            std::mem::swap(&mut range.start_offset, &mut range.end_offset);
            std::mem::swap(&mut range.start, &mut range.end);
        }

        let limits = self.context.limits;
        let max_range = i64::try_from(limits.max_range).unwrap_or(i64::MAX);
        let size = range.end_offset
                        .checked_sub(range.start_offset)
                        .and_then(|d| d.checked_add(1))
                        .ok_or(RuntimeError::NumericOverflow { line })?;

        if size > max_range {
            self.warn(Warning::RangeTruncated { limit: limits.max_range });
            range.end_offset = range.start_offset.saturating_add(max_range - 1);
        }

        let was_muted = self.muted;
        let outcome = self.iterate(&range, variable, body, line);
        self.muted = was_muted;
        outcome
    }

    fn iterate(&mut self,
               range: &Range,
               variable: &str,
               body: &[Node],
               line: usize)
               -> EvalResult<Option<Signal>> {
        let limits = self.context.limits;
        let head = i64::try_from(limits.display_head).unwrap_or(i64::MAX);
        let tail = i64::try_from(limits.display_tail).unwrap_or(i64::MAX);
        let size = range.end_offset - range.start_offset + 1;

        let elide = size > head.saturating_add(tail);
        let split = range.start_offset.saturating_add(head);
        let tail_from = range.end_offset.saturating_sub(tail) + 1;
        let was_muted = self.muted;

        for offset in range.start_offset..=range.end_offset {
            if !self.context.cancel.should_continue() {
                break;
            }

            if elide && offset == split {
                self.muted = was_muted;
                self.emit("...");
            }
            self.muted = was_muted || (elide && offset >= split && offset < tail_from);

            let value = range.value_at(offset, line)?;
            self.environment.set(variable, value, false, line)?;

            if let Some(signal) = self.execute_body(body)? {
                return Ok(Some(signal));
            }
        }

        Ok(None)
    }
}
