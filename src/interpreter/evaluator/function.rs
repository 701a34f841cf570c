use std::rc::Rc;

use crate::{
    ast::{FunctionDef, Node},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{ENTRY_POINT, EvalResult, Interpreter, Signal},
        runtime::Warning,
    },
    util::num::truncate_to_i64,
};

impl Interpreter<'_> {
    /// Runs the top-level statements of a program, then its entry point.
    ///
    /// Function declarations only register; every other statement executes
    /// in source order. A `recur` outside of any function has nothing to
    /// restart and is ignored. Afterwards the function named
    /// [`ENTRY_POINT`] runs once, if the program declared one.
    pub(super) fn execute_program(&mut self, statements: &[Node]) -> EvalResult<()> {
        for statement in statements {
            self.execute(statement)?;
        }

        if let Some(entry) = self.functions.get(ENTRY_POINT).cloned() {
            self.run_function(&entry)?;
        }

        Ok(())
    }

    /// Adds a function to the table, replacing any previous one of the same
    /// name.
    pub(super) fn register_function(&mut self, def: &FunctionDef) {
        self.functions.insert(def.name.clone(), Rc::new(def.clone()));
    }

    /// Executes `name();`.
    ///
    /// The callee runs under its own pass loop, so a `recur` inside it never
    /// restarts the caller.
    pub(super) fn execute_call(&mut self, name: &str, line: usize) -> EvalResult<()> {
        let def = self.functions
                      .get(name)
                      .cloned()
                      .ok_or_else(|| RuntimeError::UndefinedFunction { name: name.to_string(),
                                                                       line })?;

        let limit = self.context.limits.max_depth;
        if self.depth >= limit {
            return Err(RuntimeError::CallDepthExceeded { name: name.to_string(),
                                                         limit,
                                                         line });
        }

        self.run_function(&def)
    }

    /// Runs a function body pass after pass.
    ///
    /// A pass that completes without `recur` ends the function. A `recur`
    /// skips the rest of its pass and starts a new one; when it carries a
    /// bound, that bound becomes the pass ceiling. Reaching the ceiling
    /// raises `LoopBounded` and ends the function. Cancellation is checked
    /// before every pass.
    pub fn run_function(&mut self, def: &FunctionDef) -> EvalResult<()> {
        self.depth += 1;
        let outcome = self.run_passes(def);
        self.depth -= 1;
        outcome
    }

    fn run_passes(&mut self, def: &FunctionDef) -> EvalResult<()> {
        let mut ceiling = self.context.limits.max_passes;
        let mut passes = 0;

        while self.context.cancel.should_continue() {
            let Some(Signal::Recur(bound)) = self.execute_body(&def.body)? else {
                break;
            };

            if let Some(bound) = bound {
                ceiling = usize::try_from(truncate_to_i64(bound, def.line)?).unwrap_or(0);
            }

            passes += 1;
            if passes >= ceiling {
                self.warn(Warning::LoopBounded { ceiling });
                break;
            }
        }

        Ok(())
    }
}
