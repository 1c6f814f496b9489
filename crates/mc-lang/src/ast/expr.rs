// ---------------------------------------------------------------------------
// Variable references
// ---------------------------------------------------------------------------

/// One step of an access path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Dot notation, e.g. `user.name`.
    Property(String),
    /// Bracket notation, e.g. `headers["Accept"]` or `items[0]`. Numeric
    /// indices keep their decimal text.
    Index(String),
}

impl Access {
    pub fn key(&self) -> &str {
        match self {
            Self::Property(k) | Self::Index(k) => k,
        }
    }
}

/// A named variable plus a (possibly empty) access chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarRef {
    pub name: String,
    pub path: Vec<Access>,
}

impl VarRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    FloorDiv,
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
    Concat,
    And,
    Or,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::FloorDiv => "//",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::Concat => "..",
            Self::And => "and",
            Self::Or => "or",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Eq | Self::Ne | Self::Gt | Self::Lt | Self::Ge | Self::Le
        )
    }

    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod | Self::FloorDiv
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

/// Table literal. The two forms never mix.
#[derive(Debug, Clone, PartialEq)]
pub enum TableLit {
    /// `{1, 2, 3}`
    Array(Vec<Expr>),
    /// `{name = "John", age = 30}`, pairs in source order.
    Dict(Vec<(String, Expr)>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Bool(bool),
    Str(String),
    Table(TableLit),
    /// Inclusive numeric range, `1..10`.
    Range { start: f64, end: f64 },
    Var(VarRef),
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    /// `value >> a` binds, `value >> a, b` destructures.
    Attribution { value: Box<Expr>, vars: Vec<String> },
    /// Global call when `target` is `None` (`.random_int 1 10`), method
    /// call otherwise (`email.split "@"`).
    Call {
        target: Option<Box<Expr>>,
        name: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn not(operand: Expr) -> Self {
        Self::Unary {
            op: UnaryOp::Not,
            operand: Box::new(operand),
        }
    }

    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(VarRef::new(name))
    }

    pub fn str(s: impl Into<String>) -> Self {
        Self::Str(s.into())
    }

    /// True for a bare binding line such as `headers["Authorization"] >> token`.
    pub fn is_attribution(&self) -> bool {
        matches!(self, Self::Attribution { .. })
    }
}
