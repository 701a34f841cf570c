/// Dispatch of binary operations by operand kinds.
pub mod core;

/// Arithmetic between two finite numbers.
pub mod scalar;

/// Arithmetic involving symbolic infinities.
///
/// Covers a number against an infinity in either order and two infinities
/// against each other.
pub mod infinity;

/// Comparison operators used by `equiangular`.
pub mod comparison;
