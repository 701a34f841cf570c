use std::{fmt, rc::Rc};

use crate::{interpreter::value::infinity::SymbolicInfinity, util::num::format_number};

/// Represents a runtime value in the interpreter.
///
/// The union is closed: printing, arithmetic, comparison and member access
/// all match on it exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A finite number. Whole values display and compare as integers.
    Number(f64),
    /// A string.
    Str(String),
    /// An ordered sequence of values, e.g. the sides of a frame.
    Sequence(Rc<Vec<Self>>),
    /// A four-field record produced by `boundary`.
    Frame(Rc<Frame>),
    /// A symbolic infinity.
    Infinity(SymbolicInfinity),
}

/// The `top`/`bottom`/`left`/`right` record bound by a `boundary` block.
///
/// Each field holds either a sequence or a single value.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Upper edge.
    pub top:    Value,
    /// Left edge.
    pub left:   Value,
    /// Lower edge.
    pub bottom: Value,
    /// Right edge.
    pub right:  Value,
}

impl Frame {
    /// Builds a frame whose four fields all hold `value`.
    #[must_use]
    pub fn uniform(value: &Value) -> Self {
        Self { top:    value.clone(),
               left:   value.clone(),
               bottom: value.clone(),
               right:  value.clone(), }
    }

    /// Looks up a field by name.
    ///
    /// # Example
    /// ```
    /// use simulang::interpreter::value::core::{Frame, Value};
    ///
    /// let frame = Frame::uniform(&Value::from("edge"));
    ///
    /// assert_eq!(frame.attribute("left"), Some(&Value::from("edge")));
    /// assert_eq!(frame.attribute("middle"), None);
    /// ```
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        match name {
            "top" => Some(&self.top),
            "left" => Some(&self.left),
            "bottom" => Some(&self.bottom),
            "right" => Some(&self.right),
            _ => None,
        }
    }
}

impl Value {
    /// Returns a short name of the value's kind for error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Str(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Frame(_) => "frame",
            Self::Infinity(_) => "symbolic infinity",
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<SymbolicInfinity> for Value {
    fn from(v: SymbolicInfinity) -> Self {
        Self::Infinity(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Sequence(Rc::new(v))
    }
}

impl From<Frame> for Value {
    fn from(v: Frame) -> Self {
        Self::Frame(Rc::new(v))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::Str(s) => write!(f, "{s}"),
            Self::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            },
            Self::Frame(frame) => write!(f,
                                         "{{top: {}, left: {}, bottom: {}, right: {}}}",
                                         frame.top, frame.left, frame.bottom, frame.right),
            Self::Infinity(s) => write!(f, "{s}"),
        }
    }
}
