use crate::ast::Expr;
use crate::builtins::{TargetKind, builtin};

use super::suggest::suggest_function;
use super::{SemanticError, SemanticErrorKind};

/// Check one call site against the registry: known name, target usage,
/// argument count, and a compilable pattern for literal `matches` arguments.
pub(super) fn check_call(
    target: Option<&Expr>,
    name: &str,
    args: &[Expr],
    errors: &mut Vec<SemanticError>,
) {
    let Some(sig) = builtin(name) else {
        let mut err = SemanticError::error(
            SemanticErrorKind::UnknownFunction,
            format!("unknown function: .{name}"),
        );
        err.suggestion = suggest_function(name).map(str::to_string);
        errors.push(err);
        return;
    };

    match (sig.requires_target, target.is_some()) {
        (true, false) => errors.push(SemanticError::error(
            SemanticErrorKind::MissingTarget,
            format!("function .{name} requires a target (e.g., value.{name}(...))"),
        )),
        (false, true) => errors.push(SemanticError::error(
            SemanticErrorKind::UnexpectedTarget,
            format!(
                "function .{name} does not take a target (use .{name}(...) instead of value.{name}(...))"
            ),
        )),
        (true, true) => {
            if let Some(kind) = target.and_then(literal_kind)
                && !sig.accepts(kind)
            {
                let expected: Vec<&str> = sig.targets.iter().map(|t| t.name()).collect();
                errors.push(SemanticError::error(
                    SemanticErrorKind::InvalidTarget,
                    format!(
                        "function .{name} cannot be called on a {} (expects {})",
                        kind.name(),
                        expected.join(" or ")
                    ),
                ));
            }
        }
        _ => {}
    }

    if args.len() < sig.min_args {
        errors.push(SemanticError::error(
            SemanticErrorKind::TooFewArgs,
            format!(
                "function .{name} requires at least {} argument(s), got {}",
                sig.min_args,
                args.len()
            ),
        ));
    }
    if let Some(max) = sig.max_args
        && args.len() > max
    {
        errors.push(SemanticError::error(
            SemanticErrorKind::TooManyArgs,
            format!(
                "function .{name} accepts at most {max} argument(s), got {}",
                args.len()
            ),
        ));
    }

    if name == "matches"
        && let Some(Expr::Str(pattern)) = args.first()
        && let Err(e) = regex_syntax::Parser::new().parse(pattern)
    {
        errors.push(SemanticError::error(
            SemanticErrorKind::InvalidPattern,
            format!("function .matches: invalid regex pattern {pattern:?}: {e}"),
        ));
    }
}

/// Kind of a literal call target. Ranges and computed targets are only
/// known at runtime.
fn literal_kind(expr: &Expr) -> Option<TargetKind> {
    match expr {
        Expr::Str(_) => Some(TargetKind::String),
        Expr::Number(_) => Some(TargetKind::Number),
        Expr::Bool(_) => Some(TargetKind::Boolean),
        Expr::Table(_) => Some(TargetKind::Table),
        _ => None,
    }
}
