use std::{fmt, rc::Rc};

use ordered_float::OrderedFloat;

use crate::{
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
    util::num::{format_number, truncate_to_i64},
};

/// The finite stand-in for one unit of infinity when a symbolic value has to
/// be projected onto an integer offset.
pub const BASE_INFINITY: i64 = 1_000_000_000;

/// The operation a [`SymbolicInfinity`] applies to its base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfinityOp {
    /// `base + right`
    Add,
    /// `base - right`
    Sub,
    /// `base * right`
    Mul,
    /// `base / right`
    Div,
}

impl fmt::Display for InfinityOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        };
        write!(f, "{symbol}")
    }
}

/// A transfinite quantity such as `∞`, `3∞` or `5+∞`.
///
/// Without an operation the value denotes `coefficient * ∞` and both `right`
/// and `base` are unused. With an operation it denotes `base <op> right`,
/// where a missing base falls back to `coefficient * ∞`.
///
/// Values are immutable; every operation returns a new value. Bases are
/// shared, so cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolicInfinity {
    /// Multiple of infinity.
    pub coefficient: i64,
    /// Operation applied to the base, if any.
    pub operation:   Option<InfinityOp>,
    /// The finite right operand of `operation`.
    pub right:       Option<OrderedFloat<f64>>,
    /// The infinity the operation applies to.
    pub base:        Option<Rc<Self>>,
    /// Marks loop-induction values. Only changes how offsets are rendered:
    /// `∞+1` for an induction value, `1+∞` otherwise.
    pub is_iterator: bool,
}

impl Default for SymbolicInfinity {
    fn default() -> Self {
        Self::new(1)
    }
}

impl SymbolicInfinity {
    /// Creates `coefficient * ∞`.
    #[must_use]
    pub const fn new(coefficient: i64) -> Self {
        Self { coefficient,
               operation: None,
               right: None,
               base: None,
               is_iterator: false }
    }

    /// Creates `base <op> right`.
    #[must_use]
    pub fn offset(base: impl Into<Rc<Self>>, operation: InfinityOp, right: f64) -> Self {
        Self { coefficient: 1,
               operation:   Some(operation),
               right:       Some(OrderedFloat(right)),
               base:        Some(base.into()),
               is_iterator: false, }
    }

    /// Moves the value by `amount` in the direction of `operation`.
    ///
    /// A value that already is an `Add` or `Sub` offset keeps its base and
    /// gets a combined offset, so repeated shifts never nest. Anything else
    /// becomes the base of a new offset.
    ///
    /// # Example
    /// ```
    /// use simulang::interpreter::value::infinity::{InfinityOp, SymbolicInfinity};
    ///
    /// let mut x = SymbolicInfinity::new(1);
    /// for _ in 0..3 {
    ///     x = x.shifted(InfinityOp::Add, 1.0);
    /// }
    /// assert_eq!(x.to_string(), "3+∞");
    ///
    /// let back = x.shifted(InfinityOp::Sub, 5.0);
    /// assert_eq!(back.to_string(), "2-∞");
    /// assert_eq!(back.to_integer(1).unwrap(), 999_999_998);
    /// ```
    #[must_use]
    pub fn shifted(&self, operation: InfinityOp, amount: f64) -> Self {
        let signed = |op: InfinityOp, value: f64| if op == InfinityOp::Sub { -value } else { value };

        if let Some(current @ (InfinityOp::Add | InfinityOp::Sub)) = self.operation
           && let (Some(base), Some(right)) = (&self.base, self.right)
        {
            let net = signed(current, right.0) + signed(operation, amount);
            let operation = if net < 0.0 { InfinityOp::Sub } else { InfinityOp::Add };
            return Self::offset(Rc::clone(base), operation, net.abs());
        }

        Self::offset(self.clone(), operation, amount)
    }

    /// Creates the loop-induction value `coefficient∞ + delta`.
    #[must_use]
    pub fn induction(coefficient: i64, delta: f64) -> Self {
        Self { is_iterator: true,
               ..Self::offset(Self::new(coefficient), InfinityOp::Add, delta) }
    }

    /// Creates `factor * ∞`. Only the integer part of `factor` is kept.
    ///
    /// # Example
    /// ```
    /// use simulang::interpreter::value::infinity::SymbolicInfinity;
    ///
    /// let scaled = SymbolicInfinity::scaled(3.0, 1).unwrap();
    ///
    /// assert_eq!(scaled, SymbolicInfinity::new(3));
    /// assert_eq!(scaled.to_string(), "3∞");
    /// ```
    pub fn scaled(factor: f64, line: usize) -> EvalResult<Self> {
        Ok(Self::new(truncate_to_i64(factor, line)?))
    }

    /// The coefficient of the infinity this value is built on.
    ///
    /// For a plain value that is its own coefficient, otherwise the
    /// coefficient of its base.
    #[must_use]
    pub fn base_coefficient(&self) -> i64 {
        match (&self.operation, &self.base) {
            (Some(_), Some(base)) => base.coefficient,
            _ => self.coefficient,
        }
    }

    fn right_or_zero(&self) -> f64 {
        self.right.map_or(0.0, |r| r.0)
    }

    /// Adds two symbolic infinities.
    ///
    /// Offsets created by `+` are carried over onto the left operand's base
    /// coefficient: when both operands carry one they are summed, when only
    /// one does it is kept. Without any `+` offset the base coefficients are
    /// summed.
    ///
    /// # Example
    /// ```
    /// use simulang::interpreter::value::infinity::{InfinityOp, SymbolicInfinity};
    ///
    /// let i = SymbolicInfinity::offset(SymbolicInfinity::new(2), InfinityOp::Add, 3.0);
    /// let t = SymbolicInfinity::offset(SymbolicInfinity::new(1), InfinityOp::Add, 4.0);
    ///
    /// let sum = i.add_symbolic(&t);
    /// assert_eq!(sum, SymbolicInfinity::offset(SymbolicInfinity::new(2), InfinityOp::Add, 7.0));
    ///
    /// let plain = SymbolicInfinity::new(2).add_symbolic(&SymbolicInfinity::new(3));
    /// assert_eq!(plain, SymbolicInfinity::new(5));
    /// ```
    #[must_use]
    pub fn add_symbolic(&self, other: &Self) -> Self {
        let coefficient = self.base_coefficient();
        let left_adds = self.operation == Some(InfinityOp::Add);
        let right_adds = other.operation == Some(InfinityOp::Add);

        match (left_adds, right_adds) {
            (true, true) => {
                Self::offset(Self::new(coefficient),
                             InfinityOp::Add,
                             self.right_or_zero() + other.right_or_zero())
            },
            (true, false) => {
                Self::offset(Self::new(coefficient), InfinityOp::Add, self.right_or_zero())
            },
            (false, true) => {
                Self::offset(Self::new(coefficient), InfinityOp::Add, other.right_or_zero())
            },
            (false, false) => Self::new(coefficient + other.base_coefficient()),
        }
    }

    /// Subtracts two symbolic infinities. Only the coefficients take part.
    #[must_use]
    pub const fn sub_symbolic(&self, other: &Self) -> Self {
        Self::new(self.coefficient - other.coefficient)
    }

    /// Projects the value onto a finite integer.
    ///
    /// The base is resolved recursively (or taken as `BASE_INFINITY *
    /// coefficient` when absent), then the stored operation is applied with
    /// the integer part of the right operand. Division floors.
    ///
    /// # Errors
    /// - `UnsupportedSymbolicOperation` when an operation lacks its operand.
    /// - `DivisionByZero` for a zero divisor.
    /// - `NumericOverflow` when the result leaves the `i64` range.
    ///
    /// # Example
    /// ```
    /// use simulang::interpreter::value::infinity::{InfinityOp, SymbolicInfinity};
    ///
    /// assert_eq!(SymbolicInfinity::new(3).to_integer(1).unwrap(), 3_000_000_000);
    ///
    /// let shifted = SymbolicInfinity::offset(SymbolicInfinity::new(2), InfinityOp::Sub, 5.0);
    /// assert_eq!(shifted.to_integer(1).unwrap(), 1_999_999_995);
    /// ```
    pub fn to_integer(&self, line: usize) -> EvalResult<i64> {
        let base = match &self.base {
            Some(base) => base.to_integer(line)?,
            None => scale_base(self.coefficient, line)?,
        };
        self.apply_operation(base, line)
    }

    /// Projects the value onto an absolute range offset.
    ///
    /// Unlike [`Self::to_integer`] the base is not resolved: the offset is
    /// always `BASE_INFINITY * coefficient` adjusted by the operation.
    ///
    /// # Example
    /// ```
    /// use simulang::interpreter::value::infinity::{InfinityOp, SymbolicInfinity};
    ///
    /// let end = SymbolicInfinity::offset(SymbolicInfinity::new(1), InfinityOp::Add, 4.0);
    ///
    /// assert_eq!(end.absolute_offset(1).unwrap(), 1_000_000_004);
    /// ```
    pub fn absolute_offset(&self, line: usize) -> EvalResult<i64> {
        let base = scale_base(self.coefficient, line)?;
        self.apply_operation(base, line)
    }

    fn apply_operation(&self, base: i64, line: usize) -> EvalResult<i64> {
        let Some(operation) = self.operation else {
            return Ok(base);
        };
        let right = self.right
                        .ok_or_else(|| RuntimeError::UnsupportedSymbolicOperation {
                            details: format!("'{operation}' on {self} has no right operand"),
                            line,
                        })?;
        let right = truncate_to_i64(right.0, line)?;

        let result = match operation {
            InfinityOp::Add => base.checked_add(right),
            InfinityOp::Sub => base.checked_sub(right),
            InfinityOp::Mul => base.checked_mul(right),
            InfinityOp::Div => {
                if right == 0 {
                    return Err(RuntimeError::DivisionByZero { line });
                }
                floor_div(base, right)
            },
        };
        result.ok_or(RuntimeError::NumericOverflow { line })
    }
}

fn scale_base(coefficient: i64, line: usize) -> EvalResult<i64> {
    BASE_INFINITY.checked_mul(coefficient)
                 .ok_or(RuntimeError::NumericOverflow { line })
}

fn floor_div(a: i64, b: i64) -> Option<i64> {
    let quotient = a.checked_div(b)?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        return quotient.checked_sub(1);
    }
    Some(quotient)
}

fn coefficient_prefix(coefficient: i64) -> String {
    if coefficient == 1 {
        String::new()
    } else {
        coefficient.to_string()
    }
}

impl fmt::Display for SymbolicInfinity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operation = match self.operation {
            None | Some(InfinityOp::Mul) => {
                return write!(f, "{}∞", coefficient_prefix(self.coefficient));
            },
            Some(op) => op,
        };

        let base = match &self.base {
            Some(base) if matches!(base.operation, None | Some(InfinityOp::Mul)) => {
                format!("{}∞", coefficient_prefix(base.coefficient))
            },
            Some(base) => format!("({base})"),
            None => format!("{}∞", coefficient_prefix(self.coefficient)),
        };
        let right = self.right
                        .map_or_else(|| "∞".to_string(), |r| format_number(r.0));

        match operation {
            InfinityOp::Add | InfinityOp::Sub if !self.is_iterator => {
                write!(f, "{right}{operation}{base}")
            },
            _ => write!(f, "{base}{operation}{right}"),
        }
    }
}
