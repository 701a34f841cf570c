use std::collections::HashSet;

use crate::{
    ast::{Expr, Node},
    interpreter::{
        evaluator::core::{EvalResult, Interpreter, Signal},
        generator::{GeneratorError, PromptKind},
        runtime::Warning,
    },
};

/// Fixed names the paired form binds its two input statements to.
const FIRST_STATEMENT: &str = "c";
const SECOND_STATEMENT: &str = "c_";

/// Upper-cases the first character and lower-cases the rest.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase()
                         .chain(chars.flat_map(char::to_lowercase))
                         .collect()
                })
}

/// Derives a focal point between two statements without the concept
/// generator.
///
/// The words both statements share (ignoring case and periods) are joined in
/// the order they appear in `first`. Without shared words the statements are
/// merged word by word, keeping equal words and replacing the others with
/// `...`. Either way the result is capitalized.
///
/// # Example
/// ```
/// use simulang::interpreter::evaluator::contradiction::focal_point;
///
/// assert_eq!(focal_point("Light is a wave.", "Light is a particle."), "Light is a");
/// assert_eq!(focal_point("up high", "down low"), "... ...");
/// ```
#[must_use]
pub fn focal_point(first: &str, second: &str) -> String {
    let normalize = |s: &str| {
        s.to_lowercase()
         .replace('.', "")
         .split_whitespace()
         .map(str::to_string)
         .collect::<Vec<_>>()
    };
    let first_words = normalize(first);
    let second_words = normalize(second).into_iter().collect::<HashSet<_>>();

    let mut shared: Vec<&str> = Vec::new();
    for word in &first_words {
        if second_words.contains(word) && !shared.contains(&word.as_str()) {
            shared.push(word);
        }
    }

    if !shared.is_empty() {
        return capitalize(&shared.join(" "));
    }

    let merged = first.split_whitespace()
                      .zip(second.split_whitespace())
                      .map(|(a, b)| if a == b { a } else { "..." })
                      .collect::<Vec<_>>();
    capitalize(&merged.join(" "))
}

/// Builds the fallback truth statement for a contradiction pair.
///
/// # Example
/// ```
/// use simulang::interpreter::evaluator::contradiction::truth_statement;
///
/// assert_eq!(truth_statement("day", "night", "Dusk"),
///            "Between 'day' and 'night', Dusk remains.");
/// ```
#[must_use]
pub fn truth_statement(first: &str, second: &str, focal: &str) -> String {
    format!("Between '{first}' and '{second}', {focal} remains.")
}

impl Interpreter<'_> {
    /// Executes `contradiction (first, second) -> [focal, truth]: { body }`.
    ///
    /// The concept generator classifies the pair, then derives a focal point
    /// and a truth statement from it. If any of the three requests fails,
    /// both results come from [`focal_point`] and [`truth_statement`]
    /// instead.
    ///
    /// Besides the two named results, the inputs are bound to `c` and `c_`.
    pub(super) fn execute_contradiction(&mut self,
                                        statements: [&Expr; 2],
                                        focal_var: &str,
                                        truth_var: &str,
                                        body: &[Node],
                                        line: usize)
                                        -> EvalResult<Option<Signal>> {
        let first = self.eval(statements[0])?;
        let second = self.eval(statements[1])?;
        let (c1, c2) = (first.to_string(), second.to_string());

        let (focal, truth) = match self.synthesize(&c1, &c2) {
            Ok(pair) => pair,
            Err((kind, e)) => {
                self.warn(Warning::GeneratorFallback { kind,
                                                       reason: e.to_string() });
                let focal = focal_point(&c1, &c2);
                let truth = truth_statement(&c1, &c2, &focal);
                (focal, truth)
            },
        };

        self.environment.set(FIRST_STATEMENT, first, false, line)?;
        self.environment.set(SECOND_STATEMENT, second, false, line)?;
        self.environment.set(focal_var, focal.into(), false, line)?;
        self.environment.set(truth_var, truth.into(), false, line)?;

        self.execute_body(body)
    }

    fn synthesize(&self, c1: &str, c2: &str) -> Result<(String, String), (PromptKind, GeneratorError)> {
        let generator = self.context.generator;
        let ask = |kind: PromptKind, inputs: &[String]| {
            generator.generate(kind, inputs).map_err(|e| (kind, e))
        };

        let classification = ask(PromptKind::Classification, &[c1.to_string(), c2.to_string()])?;
        let focal = ask(PromptKind::FocalPoint,
                        &[classification.clone(), c1.to_string(), c2.to_string()])?;
        let truth = ask(PromptKind::Truth,
                        &[classification, c1.to_string(), c2.to_string(), focal.clone()])?;

        Ok((focal, truth))
    }

    /// Executes `contradiction statement -> variable: { body }`.
    ///
    /// Binds the generated contradiction of `statement`, or `Not(statement)`
    /// when the concept generator fails.
    ///
    /// # Example
    /// ```
    /// use simulang::get_result;
    ///
    /// let lines = get_result(r#"contradiction "time flows" -> c: { print(c); }"#).unwrap();
    ///
    /// assert_eq!(lines.last().map(String::as_str), Some("Not(time flows)"));
    /// ```
    pub(super) fn execute_contradiction_infer(&mut self,
                                              statement: &Expr,
                                              variable: &str,
                                              body: &[Node],
                                              line: usize)
                                              -> EvalResult<Option<Signal>> {
        let statement = self.eval(statement)?.to_string();
        let contradiction = self.generate_or_else(PromptKind::Contradiction,
                                                  std::slice::from_ref(&statement),
                                                  || format!("Not({statement})"));

        self.environment.set(variable, contradiction.into(), false, line)?;
        self.execute_body(body)
    }
}
