use mc_lang::ConditionLine;

use crate::context::ExecutionContext;
use crate::error::EvalError;
use crate::eval::evaluate;

/// Combine a block's condition lines into one verdict.
///
/// An empty block matches. A plain line is AND-ed into the running result;
/// once that result is false, remaining AND lines are skipped while `or`
/// lines are still evaluated, and an `or` line that holds sets the result
/// back to true.
pub fn evaluate_block(
    lines: &[ConditionLine],
    ctx: &mut ExecutionContext,
) -> Result<bool, EvalError> {
    run_block(lines, ctx).map_err(|(_, e)| e)
}

/// [`evaluate_block`] with runtime errors folded into a non-match. The error
/// is logged with its line number.
pub fn match_block(lines: &[ConditionLine], ctx: &mut ExecutionContext) -> bool {
    match run_block(lines, ctx) {
        Ok(matched) => matched,
        Err((line, error)) => {
            mc_warn!(eval, line, error = %error, "condition evaluation failed, block does not match");
            false
        }
    }
}

pub(crate) fn run_block(
    lines: &[ConditionLine],
    ctx: &mut ExecutionContext,
) -> Result<bool, (usize, EvalError)> {
    let mut result = true;
    for cond in lines {
        if !cond.is_or && !result {
            mc_trace!(eval, line = cond.line, "skipping AND line after false result");
            continue;
        }
        let verdict = line_verdict(cond, ctx).map_err(|e| (cond.line, e))?;
        mc_trace!(eval, line = cond.line, or = cond.is_or, verdict, "condition line evaluated");
        if cond.is_or {
            result = result || verdict;
        } else {
            result = verdict;
        }
    }
    mc_debug!(eval, lines = lines.len(), matched = result, "condition block evaluated");
    Ok(result)
}

/// A bare binding line (`headers["X"] >> token`) holds once it has bound.
/// Any other line must produce a boolean.
fn line_verdict(cond: &ConditionLine, ctx: &mut ExecutionContext) -> Result<bool, EvalError> {
    let value = evaluate(&cond.expr, ctx)?;
    if cond.expr.is_attribution() {
        return Ok(true);
    }
    value.as_bool().ok_or(EvalError::NonBoolean(value.kind()))
}

#[cfg(test)]
mod tests {
    use mc_lang::{ConditionLine, parse_expr};

    use super::*;
    use crate::context::RequestContext;

    fn and(text: &str) -> ConditionLine {
        ConditionLine {
            expr: parse_expr(text).unwrap(),
            is_or: false,
            line: 1,
        }
    }

    fn or(text: &str) -> ConditionLine {
        ConditionLine {
            is_or: true,
            ..and(text)
        }
    }

    fn ctx() -> ExecutionContext {
        ExecutionContext::seeded(1, RequestContext::new("GET", "/"), 1)
    }

    #[test]
    fn empty_block_matches() {
        assert!(evaluate_block(&[], &mut ctx()).unwrap());
    }

    #[test]
    fn and_short_circuit_skips_erroring_line() {
        let lines = [and("False"), and("1 / 0 == 1")];
        assert!(!evaluate_block(&lines, &mut ctx()).unwrap());
    }

    #[test]
    fn or_line_rescues_false_result() {
        let lines = [and("False"), or("True")];
        assert!(evaluate_block(&lines, &mut ctx()).unwrap());
    }

    #[test]
    fn and_after_or_still_applies() {
        let lines = [and("False"), or("True"), and("False")];
        assert!(!evaluate_block(&lines, &mut ctx()).unwrap());
    }

    #[test]
    fn or_lines_evaluated_after_false() {
        let lines = [and("False"), or("1 / 0 == 1")];
        assert_eq!(
            evaluate_block(&lines, &mut ctx()).unwrap_err(),
            EvalError::DivisionByZero
        );
    }

    #[test]
    fn non_boolean_line_is_error() {
        let err = evaluate_block(&[and("1 + 1")], &mut ctx()).unwrap_err();
        assert_eq!(err, EvalError::NonBoolean("number"));
    }

    #[test]
    fn binding_line_holds() {
        let mut c = ctx();
        assert!(evaluate_block(&[and("42 >> answer")], &mut c).unwrap());
        assert_eq!(c.variable("answer").and_then(|v| v.as_number()), Some(42.0));
    }

    #[test]
    fn match_block_treats_errors_as_no_match() {
        let lines = [and("missing == 1")];
        assert!(!match_block(&lines, &mut ctx()));
        assert!(matches!(
            run_block(&lines, &mut ctx()),
            Err((1, EvalError::UndefinedVariable(ref n))) if n == "missing"
        ));
    }
}
