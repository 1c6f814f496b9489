use std::fmt;

use super::{Access, Expr, TableLit, UnaryOp, VarRef};

// Canonical text form. Binary and unary nodes are fully parenthesised so the
// rendering shows how the parser grouped the input.

impl fmt::Display for VarRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for access in &self.path {
            match access {
                Access::Property(p) => write!(f, ".{p}")?,
                Access::Index(k) => write!(f, "[\"{k}\"]")?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for TableLit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Array(items) => {
                f.write_str("[")?;
                write_list(f, items)?;
                f.write_str("]")
            }
            Self::Dict(pairs) if pairs.is_empty() => f.write_str("[]"),
            Self::Dict(pairs) => {
                f.write_str("{")?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k} = {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Str(s) => write!(f, "\"{s}\""),
            Self::Table(t) => write!(f, "{t}"),
            Self::Range { start, end } => write!(f, "{start}..{end}"),
            Self::Var(v) => write!(f, "{v}"),
            Self::Binary { op, left, right } => write!(f, "({left} {} {right})", op.symbol()),
            Self::Unary {
                op: UnaryOp::Not,
                operand,
            } => write!(f, "(not {operand})"),
            Self::Attribution { value, vars } => write!(f, "{value} >> [{}]", vars.join(" ")),
            Self::Call { target, name, args } => {
                if let Some(t) = target {
                    write!(f, "{t}")?;
                }
                write!(f, ".{name}(")?;
                write_list(f, args)?;
                f.write_str(")")
            }
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
