use std::fmt;

/// Binary operators available in expressions.
///
/// All of them share a single precedence level and associate to the left, so
/// `1 + 2 * 3` evaluates as `(1 + 2) * 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
        };
        write!(f, "{symbol}")
    }
}

/// Comparison operators accepted by `equiangular`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOperator {
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
}

impl fmt::Display for CompareOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
        };
        write!(f, "{symbol}")
    }
}

/// An expression node.
///
/// Expressions never have side effects; they only read the environment.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal.
    Number(f64),
    /// A string literal without its quotes.
    Str(String),
    /// Reference to a variable by name.
    Identifier {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// Attribute access such as `frame.top`.
    Member {
        /// The expression whose attribute is read.
        base:      Box<Self>,
        /// The attribute name.
        attribute: String,
        /// Line number in the source code.
        line:      usize,
    },
    /// The bare infinity glyph `∞`.
    Infinity,
    /// A binary operation.
    Binary {
        /// The operator.
        op:    BinaryOperator,
        /// Left operand.
        left:  Box<Self>,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
}

/// A function declared with `posit`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// Function name. The entry point is always called `ds2`.
    pub name: String,
    /// Statements executed on every pass.
    pub body: Vec<Node>,
    /// Line of the `posit` keyword.
    pub line: usize,
}

/// The range operand of a `boundary` block.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryRange {
    /// An explicit `[start..end]` literal.
    Span {
        /// Lower bound.
        start: Expr,
        /// Upper bound.
        end:   Expr,
    },
    /// Any other expression, unwrapped at runtime.
    Reference(Expr),
}

/// A statement node of the abstract syntax tree.
///
/// Every compound construct owns its body as an ordered list of statements.
/// The tree is built once per compilation and only read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// The whole program: its top-level statements in source order.
    Program(Vec<Self>),
    /// `posit name(): { ... }`
    Function(FunctionDef),
    /// `coeternal x := e;`, `octyl x := e;` or `x := e;`
    Assignment {
        /// Bound name.
        name:     String,
        /// Value expression.
        value:    Expr,
        /// Whether the binding is declared constant.
        is_const: bool,
        /// Line number in the source code.
        line:     usize,
    },
    /// `print(e);`
    Print {
        /// The printed expression.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// `recur ds2(n);`
    Recur {
        /// Optional replacement for the loop ceiling.
        bound: Option<f64>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `name();`
    Call {
        /// Name of the called function.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// `equiangular a <op> b: { ... }`
    Conditional {
        /// Comparison operator.
        op:    CompareOperator,
        /// Left operand.
        left:  Expr,
        /// Right operand.
        right: Expr,
        /// Statements executed when the comparison holds.
        body:  Vec<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `delineator "label": { ... }`
    Delineator {
        /// The label printed around the body.
        label: String,
        /// Statements executed between the markers.
        body:  Vec<Self>,
    },
    /// `intertillage [a..b] -> i: { ... }`
    Intertillage {
        /// Start bound.
        start:    Expr,
        /// End bound.
        end:      Expr,
        /// Induction variable.
        variable: String,
        /// Statements executed on every iteration.
        body:     Vec<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// `bifurcator o[l, r] -> a(x, y): { ... }`
    Bifurcator {
        /// Optional origin, `1` when absent.
        origin:    Option<Expr>,
        /// Left branch value.
        left:      Expr,
        /// Right branch value.
        right:     Expr,
        /// Name bound to the origin.
        outer:     String,
        /// Name bound to the left value.
        left_var:  String,
        /// Name bound to the right value.
        right_var: String,
        /// Statements executed once.
        body:      Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `boundary [a..b] -> f: { ... }` or `boundary e -> f: { ... }`
    Boundary {
        /// The range operand.
        range:    BoundaryRange,
        /// Name bound to the resulting frame.
        variable: String,
        /// Statements executed once.
        body:     Vec<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// `contradiction (a, b) -> [fp, t]: { ... }`
    Contradiction {
        /// First statement.
        first:     Expr,
        /// Second statement.
        second:    Expr,
        /// Name bound to the focal point.
        focal_var: String,
        /// Name bound to the truth statement.
        truth_var: String,
        /// Statements executed once.
        body:      Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `contradiction e -> c: { ... }`
    ContradictionInfer {
        /// The statement to contradict.
        statement: Expr,
        /// Name bound to the contradiction.
        variable:  String,
        /// Statements executed once.
        body:      Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `sol mode property value { ... }`
    SolBlock {
        /// Mode identifier, e.g. `day`.
        mode:     String,
        /// Property identifier, e.g. `intensity`.
        property: String,
        /// Declared value.
        value:    f64,
        /// Statements executed once.
        body:     Vec<Self>,
    },
}
