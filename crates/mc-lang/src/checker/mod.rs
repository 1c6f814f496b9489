mod funcs;
pub mod lint;
mod suggest;

use std::fmt;

use crate::ast::{Expr, TableLit};

pub use suggest::suggest_function;

/// Names the evaluator resolves from the request context before looking at
/// bound variables.
pub const CONTEXT_NAMES: &[&str] = &[
    "call_count",
    "request",
    "method",
    "path",
    "query",
    "headers",
    "body",
];

const RESERVED: &[&str] = &["and", "or", "not", "True", "False"];

/// Severity level for semantic diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticErrorKind {
    UnknownFunction,
    MissingTarget,
    UnexpectedTarget,
    InvalidTarget,
    TooFewArgs,
    TooManyArgs,
    InvalidIdentifier,
    EmptyAttribution,
    InvalidPattern,
    UnboundVariable,
    ShadowsContext,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SemanticError {
    pub kind: SemanticErrorKind,
    pub severity: Severity,
    pub message: String,
    /// Closest registered function name for unknown calls.
    pub suggestion: Option<String>,
}

impl SemanticError {
    pub(crate) fn error(kind: SemanticErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: Severity::Error,
            message: message.into(),
            suggestion: None,
        }
    }

    pub(crate) fn warning(kind: SemanticErrorKind, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(kind, message)
        }
    }
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean .{s}?)")?;
        }
        Ok(())
    }
}

impl std::error::Error for SemanticError {}

// ---------------------------------------------------------------------------
// Public entry
// ---------------------------------------------------------------------------

/// Validate an expression tree and stop at the first problem.
pub fn validate(expr: &Expr) -> Result<(), SemanticError> {
    match check_expr(expr).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Walk the whole tree and collect every semantic error, in source order.
pub fn check_expr(expr: &Expr) -> Vec<SemanticError> {
    let mut errors = Vec::new();
    walk(expr, &mut errors);
    errors
}

/// `[A-Za-z_][A-Za-z0-9_]*`, excluding keywords and boolean literals.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !RESERVED.contains(&name)
}

fn walk(expr: &Expr, errors: &mut Vec<SemanticError>) {
    match expr {
        Expr::Number(_) | Expr::Bool(_) | Expr::Str(_) | Expr::Range { .. } | Expr::Var(_) => {}
        Expr::Table(TableLit::Array(items)) => items.iter().for_each(|e| walk(e, errors)),
        Expr::Table(TableLit::Dict(pairs)) => pairs.iter().for_each(|(_, e)| walk(e, errors)),
        Expr::Binary { left, right, .. } => {
            walk(left, errors);
            walk(right, errors);
        }
        Expr::Unary { operand, .. } => walk(operand, errors),
        Expr::Attribution { value, vars } => {
            walk(value, errors);
            if vars.is_empty() {
                errors.push(SemanticError::error(
                    SemanticErrorKind::EmptyAttribution,
                    "attribution requires at least one variable name",
                ));
            }
            for name in vars.iter().filter(|n| !is_valid_identifier(n)) {
                errors.push(SemanticError::error(
                    SemanticErrorKind::InvalidIdentifier,
                    format!("invalid variable name: {name}"),
                ));
            }
        }
        Expr::Call { target, name, args } => {
            funcs::check_call(target.as_deref(), name, args, errors);
            if let Some(t) = target {
                walk(t, errors);
            }
            args.iter().for_each(|a| walk(a, errors));
        }
    }
}

#[cfg(test)]
mod tests;
