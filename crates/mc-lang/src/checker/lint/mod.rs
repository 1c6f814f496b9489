use std::collections::HashSet;

use crate::ast::{Expr, TableLit};
use crate::condition::ConditionLine;

use super::{CONTEXT_NAMES, SemanticError, SemanticErrorKind};

#[cfg(test)]
mod tests;

/// Run lint checks over a condition block, producing `Severity::Warning`
/// diagnostics. Lines are visited in order, so a `>>` on an earlier line
/// binds names for the lines after it.
pub fn lint_block(lines: &[ConditionLine]) -> Vec<(usize, SemanticError)> {
    let mut bound: HashSet<String> = HashSet::new();
    let mut warnings = Vec::new();
    for line in lines {
        let mut found = Vec::new();
        lint_expr(&line.expr, &mut bound, &mut found);
        warnings.extend(found.into_iter().map(|w| (line.line, w)));
    }
    warnings
}

fn lint_expr(expr: &Expr, bound: &mut HashSet<String>, warnings: &mut Vec<SemanticError>) {
    match expr {
        Expr::Number(_) | Expr::Bool(_) | Expr::Str(_) | Expr::Range { .. } => {}
        Expr::Var(var) => {
            let name = var.name.as_str();
            if !CONTEXT_NAMES.contains(&name) && !bound.contains(name) {
                warnings.push(SemanticError::warning(
                    SemanticErrorKind::UnboundVariable,
                    format!("variable `{name}` is read before any `>>` binds it"),
                ));
            }
        }
        Expr::Table(TableLit::Array(items)) => {
            items.iter().for_each(|e| lint_expr(e, bound, warnings))
        }
        Expr::Table(TableLit::Dict(pairs)) => {
            pairs.iter().for_each(|(_, e)| lint_expr(e, bound, warnings))
        }
        Expr::Binary { left, right, .. } => {
            lint_expr(left, bound, warnings);
            lint_expr(right, bound, warnings);
        }
        Expr::Unary { operand, .. } => lint_expr(operand, bound, warnings),
        Expr::Attribution { value, vars } => {
            lint_expr(value, bound, warnings);
            for name in vars {
                if CONTEXT_NAMES.contains(&name.as_str()) {
                    warnings.push(SemanticError::warning(
                        SemanticErrorKind::ShadowsContext,
                        format!(
                            "binding `{name}` can never be read back: the request context name wins"
                        ),
                    ));
                }
                bound.insert(name.clone());
            }
        }
        Expr::Call { target, args, .. } => {
            if let Some(t) = target {
                lint_expr(t, bound, warnings);
            }
            args.iter().for_each(|a| lint_expr(a, bound, warnings));
        }
    }
}
