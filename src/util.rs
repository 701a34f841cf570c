/// Numeric conversion and formatting helpers.
///
/// Runtime numbers are `f64`, but ranges, loop ceilings and symbolic
/// projections work on integers. These helpers convert between the two
/// without silent data loss and render numbers the way `print` shows them.
pub mod num;
