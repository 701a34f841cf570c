use crate::{
    ast::{CompareOperator, Expr, Node},
    interpreter::{
        evaluator::core::{EvalResult, Interpreter, Signal},
        value::core::Value,
    },
    util::num::format_number,
};

impl Interpreter<'_> {
    /// Executes `equiangular left <op> right: { body }`.
    ///
    /// The body runs once when the comparison holds. There is no else
    /// branch.
    pub(super) fn execute_conditional(&mut self,
                                      op: CompareOperator,
                                      left: &Expr,
                                      right: &Expr,
                                      body: &[Node],
                                      line: usize)
                                      -> EvalResult<Option<Signal>> {
        let left = self.eval(left)?;
        let right = self.eval(right)?;

        if Self::eval_comparison(op, &left, &right, line)? {
            return self.execute_body(body);
        }
        Ok(None)
    }

    /// Executes `delineator "label": { body }`, framing the body's output
    /// with begin and end markers.
    ///
    /// The end marker is only written when the body completes or signals.
    pub(super) fn execute_delineator(&mut self,
                                     label: &str,
                                     body: &[Node])
                                     -> EvalResult<Option<Signal>> {
        self.emit(&format!("⎯⎯ delineator: {label} ⎯⎯"));
        let signal = self.execute_body(body)?;
        self.emit(&format!("⎯⎯ end delineator: {label} ⎯⎯"));
        Ok(signal)
    }

    /// Executes `bifurcator origin[left, right] -> outer(l, r): { body }`.
    ///
    /// Prints a summary line, binds the origin (1 when omitted) and both
    /// branches, then runs the body once.
    ///
    /// # Example
    /// ```
    /// use simulang::get_result;
    ///
    /// let lines = get_result("bifurcator 10[2, 3] -> a(x, y): { print(x); print(y); }").unwrap();
    ///
    /// assert_eq!(lines,
    ///            ["🔀 Bifurcator 'a': Left → 2, Right → 3 (Origin: 10)", "2", "3"]);
    /// ```
    pub(super) fn execute_bifurcator(&mut self,
                                     origin: Option<&Expr>,
                                     left: &Expr,
                                     right: &Expr,
                                     [outer, left_var, right_var]: [&String; 3],
                                     body: &[Node],
                                     line: usize)
                                     -> EvalResult<Option<Signal>> {
        let origin = match origin {
            Some(expr) => self.eval(expr)?,
            None => Value::Number(1.0),
        };
        let left = self.eval(left)?;
        let right = self.eval(right)?;

        self.emit(&format!("🔀 Bifurcator '{outer}': Left → {left}, Right → {right} (Origin: \
                            {origin})"));

        self.environment.set(outer, origin, false, line)?;
        self.environment.set(left_var, left, false, line)?;
        self.environment.set(right_var, right, false, line)?;

        self.execute_body(body)
    }

    /// Executes `sol mode property value { body }`.
    ///
    /// Purely declarative: prints a summary line and runs the body once.
    pub(super) fn execute_sol(&mut self,
                              mode: &str,
                              property: &str,
                              value: f64,
                              body: &[Node])
                              -> EvalResult<Option<Signal>> {
        self.emit(&format!("🌞 sol {mode} {property} = {}", format_number(value)));
        self.execute_body(body)
    }
}
