/// Symbolic infinity.
///
/// Defines `SymbolicInfinity`, the closed value algebra for transfinite
/// quantities: its constructors, its arithmetic against numbers and other
/// infinities, its projection to large finite integers and its textual form.
pub mod infinity;

/// Runtime values.
///
/// Defines the `Value` enum and the four-field `Frame` record produced by
/// boundary blocks, together with their display rules.
pub mod core;
