use std::collections::HashMap;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// A bound value together with its const flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// The current value.
    pub value:    Value,
    /// Whether the name was declared with `coeternal`.
    pub is_const: bool,
}

/// The flat variable scope of one run.
///
/// There is no lexical nesting: every block, loop and function reads and
/// writes the same mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    bindings: HashMap<String, Binding>,
}

impl Environment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `value`.
    ///
    /// A const binding only accepts its own value again, which is then a
    /// no-op. Non-const bindings are overwritten, and the const flag of the
    /// new binding is the one given here.
    ///
    /// # Errors
    /// `ConstViolation` when `name` is const and `value` differs from it.
    ///
    /// # Example
    /// ```
    /// use simulang::interpreter::{evaluator::environment::Environment, value::core::Value};
    ///
    /// let mut env = Environment::new();
    /// env.set("light", Value::Number(1.0), true, 1).unwrap();
    ///
    /// assert!(env.set("light", Value::Number(1.0), false, 2).is_ok());
    /// assert!(env.set("light", Value::Number(2.0), false, 3).is_err());
    /// assert!(env.is_const("light"));
    /// ```
    pub fn set(&mut self, name: &str, value: Value, is_const: bool, line: usize) -> EvalResult<()> {
        if let Some(existing) = self.bindings.get(name)
           && existing.is_const
        {
            if existing.value == value {
                return Ok(());
            }
            return Err(RuntimeError::ConstViolation { name: name.to_string(),
                                                      line });
        }

        self.bindings.insert(name.to_string(), Binding { value, is_const });
        Ok(())
    }

    /// Reads the value bound to `name`.
    ///
    /// # Errors
    /// `UndefinedVariable` when nothing is bound to `name`.
    pub fn get(&self, name: &str, line: usize) -> EvalResult<&Value> {
        self.lookup(name)
            .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string(),
                                                             line })
    }

    /// Reads the value bound to `name`, if any.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name).map(|b| &b.value)
    }

    /// Returns `true` if `name` is bound as a constant.
    #[must_use]
    pub fn is_const(&self, name: &str) -> bool {
        self.bindings.get(name).is_some_and(|b| b.is_const)
    }
}
