/// Binary operator evaluation logic.
///
/// Handles arithmetic between numbers and symbolic infinities and the
/// comparisons used by conditional blocks.
pub mod binary;

/// Core evaluation logic and the interpreter state.
///
/// Contains the statement dispatcher, expression evaluation, the control
/// signal type and output helpers.
pub mod core;

/// The flat variable environment and its const rules.
pub mod environment;

/// Programs, function passes and calls.
///
/// Registers functions, runs the entry point and drives the bounded pass
/// loop that `recur` controls.
pub mod function;

/// Evaluation of `intertillage` ranges.
///
/// Projects symbolic bounds to offsets, binds the induction variable and
/// elides the output of long ranges.
pub mod intertillage;

/// Evaluation of `boundary` blocks and the frames they build.
pub mod boundary;

/// Evaluation of both `contradiction` forms and their local fallbacks.
pub mod contradiction;

/// The remaining block statements: `equiangular`, `delineator`,
/// `bifurcator` and `sol`.
pub mod blocks;
