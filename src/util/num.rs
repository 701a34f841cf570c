use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Converts an `f64` to `i64`, truncating any fractional part.
///
/// This is the conversion used wherever a finite number stands for an
/// offset: range bounds, symbolic right operands and loop ceilings.
///
/// ## Errors
/// Returns `NumericOverflow` for non-finite values or values outside the
/// `i64` range.
///
/// ## Example
/// ```
/// use simulang::{error::RuntimeError, util::num::truncate_to_i64};
///
/// assert_eq!(truncate_to_i64(7.9, 1).unwrap(), 7);
/// assert_eq!(truncate_to_i64(-2.5, 1).unwrap(), -2);
///
/// let err = truncate_to_i64(f64::NAN, 3).unwrap_err();
/// assert!(matches!(err, RuntimeError::NumericOverflow { line: 3 }));
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn truncate_to_i64(value: f64, line: usize) -> EvalResult<i64> {
    if !value.is_finite() || value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return Err(RuntimeError::NumericOverflow { line });
    }
    Ok(value.trunc() as i64)
}

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `NumericOverflow` if the value exceeds `MAX_SAFE_U64_INT` in
/// absolute value.
///
/// ## Example
/// ```
/// use simulang::util::num::{MAX_SAFE_U64_INT, i64_to_f64_checked};
///
/// assert_eq!(i64_to_f64_checked(1_000_000_001, 1).unwrap(), 1_000_000_001.0);
///
/// let big = MAX_SAFE_U64_INT as i64 + 1;
/// assert!(i64_to_f64_checked(big, 1).is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub const fn i64_to_f64_checked(value: i64, line: usize) -> EvalResult<f64> {
    if value.unsigned_abs() > MAX_SAFE_U64_INT {
        return Err(RuntimeError::NumericOverflow { line });
    }
    Ok(value as f64)
}

/// Renders a number for output.
///
/// Mathematically whole values are shown without a decimal point, everything
/// else uses the shortest representation that round-trips.
///
/// ## Example
/// ```
/// use simulang::util::num::format_number;
///
/// assert_eq!(format_number(4.0), "4");
/// assert_eq!(format_number(-0.0), "0");
/// assert_eq!(format_number(3.5), "3.5");
/// assert_eq!(format_number(2_000_000_000.0), "2000000000");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_finite() && value.fract() == 0.0 {
        return format!("{value:.0}");
    }
    value.to_string()
}
