use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{Expr, FunctionDef, Node},
    error::RuntimeError,
    interpreter::{
        evaluator::environment::Environment,
        generator::PromptKind,
        runtime::{RunContext, Warning},
        value::{core::Value, infinity::SymbolicInfinity},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Name of the function that runs automatically after the top-level
/// statements of a program.
pub const ENTRY_POINT: &str = "ds2";

/// A control signal travelling up from a statement to its enclosing function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal {
    /// Start a new pass of the enclosing function, optionally replacing its
    /// pass ceiling.
    Recur(Option<f64>),
}

/// The tree-walking executor for one run.
///
/// Holds everything a run mutates: the variable environment, the function
/// table and the warnings raised so far. The caller-provided [`RunContext`]
/// supplies output, concept generation, cancellation and limits.
///
/// ## Usage
///
/// An `Interpreter` is created per run. Executing a [`Node::Program`] runs
/// its top-level statements and then the entry point, if one is registered.
///
/// ```
/// use simulang::{
///     compile,
///     interpreter::{
///         evaluator::core::Interpreter,
///         generator::OfflineGenerator,
///         runtime::{BufferSink, RunContext},
///         value::core::Value,
///     },
/// };
///
/// let program = compile("octyl x := 2 + 3; print(x);").unwrap();
///
/// let mut sink = BufferSink::new();
/// let mut interpreter = Interpreter::new(RunContext::new(&mut sink, &OfflineGenerator));
/// interpreter.execute(&program).unwrap();
///
/// assert_eq!(interpreter.environment.lookup("x"), Some(&Value::Number(5.0)));
/// drop(interpreter);
/// assert_eq!(sink.lines(), ["5"]);
/// ```
pub struct Interpreter<'a> {
    pub(super) context: RunContext<'a>,
    /// Variables bound so far.
    pub environment:    Environment,
    /// Functions registered so far, by name.
    pub functions:      HashMap<String, Rc<FunctionDef>>,
    /// Warnings raised so far, in order.
    pub warnings:       Vec<Warning>,
    /// Set while printed output is being elided.
    pub(super) muted:   bool,
    /// Number of function bodies currently running.
    pub(super) depth:   usize,
}

impl<'a> Interpreter<'a> {
    /// Creates an interpreter with an empty environment and function table.
    #[must_use]
    pub fn new(context: RunContext<'a>) -> Self {
        Self { context,
               environment: Environment::new(),
               functions: HashMap::new(),
               warnings: Vec::new(),
               muted: false,
               depth: 0 }
    }

    /// Consumes the interpreter, returning the final environment and the
    /// warnings raised.
    #[must_use]
    pub fn finish(self) -> (Environment, Vec<Warning>) {
        (self.environment, self.warnings)
    }

    /// Executes a single statement.
    ///
    /// Compound statements run their bodies in place. A `recur` anywhere
    /// inside a body stops that body and is returned to the caller, so it
    /// reaches the nearest enclosing function loop.
    ///
    /// # Returns
    /// `Some(Signal)` when the statement (or its body) requested a new pass,
    /// `None` otherwise.
    pub fn execute(&mut self, node: &Node) -> EvalResult<Option<Signal>> {
        match node {
            Node::Program(statements) => {
                self.execute_program(statements)?;
                Ok(None)
            },
            Node::Function(def) => {
                self.register_function(def);
                Ok(None)
            },
            Node::Assignment { name,
                               value,
                               is_const,
                               line, } => {
                let value = self.eval(value)?;
                self.environment.set(name, value, *is_const, *line)?;
                Ok(None)
            },
            Node::Print { value, .. } => {
                let value = self.eval(value)?;
                self.emit(&value.to_string());
                Ok(None)
            },
            Node::Recur { bound, .. } => Ok(Some(Signal::Recur(*bound))),
            Node::Call { name, line } => {
                self.execute_call(name, *line)?;
                Ok(None)
            },
            Node::Conditional { op,
                                left,
                                right,
                                body,
                                line, } => self.execute_conditional(*op, left, right, body, *line),
            Node::Delineator { label, body } => self.execute_delineator(label, body),
            Node::Intertillage { start,
                                 end,
                                 variable,
                                 body,
                                 line, } => self.execute_intertillage(start, end, variable, body, *line),
            Node::Bifurcator { origin,
                               left,
                               right,
                               outer,
                               left_var,
                               right_var,
                               body,
                               line, } => self.execute_bifurcator(origin.as_ref(),
                                                                  left,
                                                                  right,
                                                                  [outer, left_var, right_var],
                                                                  body,
                                                                  *line),
            Node::Boundary { range,
                             variable,
                             body,
                             line, } => self.execute_boundary(range, variable, body, *line),
            Node::Contradiction { first,
                                  second,
                                  focal_var,
                                  truth_var,
                                  body,
                                  line, } => self.execute_contradiction([first, second],
                                                                        focal_var,
                                                                        truth_var,
                                                                        body,
                                                                        *line),
            Node::ContradictionInfer { statement,
                                       variable,
                                       body,
                                       line, } => {
                self.execute_contradiction_infer(statement, variable, body, *line)
            },
            Node::SolBlock { mode,
                             property,
                             value,
                             body, } => self.execute_sol(mode, property, *value, body),
        }
    }

    /// Runs the statements of a body in order.
    ///
    /// Stops at the first statement that returns a signal and hands it on.
    pub fn execute_body(&mut self, body: &[Node]) -> EvalResult<Option<Signal>> {
        for node in body {
            if let Some(signal) = self.execute(node)? {
                return Ok(Some(signal));
            }
        }
        Ok(None)
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// Identifiers read the environment, member access reads frame fields and
    /// binary operations follow the arithmetic of [`Self::eval_binary`].
    pub fn eval(&self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Number(n) => Ok(Value::Number(*n)),
            Expr::Str(s) => Ok(Value::Str(s.clone())),
            Expr::Identifier { name, line } => self.environment.get(name, *line).cloned(),
            Expr::Member { base,
                           attribute,
                           line, } => self.eval_member(base, attribute, *line),
            Expr::Infinity => Ok(Value::Infinity(SymbolicInfinity::default())),
            Expr::Binary { op,
                           left,
                           right,
                           line, } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Self::eval_binary(*op, &left, &right, *line)
            },
        }
    }

    fn eval_member(&self, base: &Expr, attribute: &str, line: usize) -> EvalResult<Value> {
        let base = self.eval(base)?;
        let unknown = || RuntimeError::UnknownAttribute { attribute: attribute.to_string(),
                                                          line };
        match &base {
            Value::Frame(frame) => frame.attribute(attribute).cloned().ok_or_else(unknown),
            _ => Err(unknown()),
        }
    }

    /// Writes a line of program output unless output is currently elided.
    pub(super) fn emit(&mut self, line: &str) {
        if !self.muted {
            self.context.sink.write_line(line);
        }
    }

    /// Writes the message of an error that aborted the run to the output
    /// sink, even while output is elided.
    pub fn report_error(&mut self, error: &RuntimeError) {
        self.context.sink.write_line(&error.to_string());
    }

    /// Records a warning and writes it to the output sink.
    pub(super) fn warn(&mut self, warning: Warning) {
        self.context.sink.write_line(&format!("⚠️ {warning}"));
        self.warnings.push(warning);
    }

    /// Asks the concept generator for a text.
    ///
    /// On failure a `GeneratorFallback` warning is raised and `fallback`
    /// provides the text instead.
    pub(super) fn generate_or_else<F>(&mut self,
                                      kind: PromptKind,
                                      inputs: &[String],
                                      fallback: F)
                                      -> String
        where F: FnOnce() -> String
    {
        match self.context.generator.generate(kind, inputs) {
            Ok(text) => text,
            Err(e) => {
                self.warn(Warning::GeneratorFallback { kind,
                                                       reason: e.to_string() });
                fallback()
            },
        }
    }
}
