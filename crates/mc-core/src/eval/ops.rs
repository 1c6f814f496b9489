use mc_lang::ast::BinOp;

use crate::error::EvalError;
use crate::value::Value;

pub(super) fn binary(op: BinOp, left: Value, right: Value) -> Result<Value, EvalError> {
    match op {
        BinOp::Eq => Ok(Value::Bool(left.loose_eq(&right))),
        BinOp::Ne => Ok(Value::Bool(!left.loose_eq(&right))),
        BinOp::Concat => Ok(Value::Str(format!("{left}{right}"))),
        BinOp::And | BinOp::Or => {
            let (Some(a), Some(b)) = (left.as_bool(), right.as_bool()) else {
                return Err(mismatch(op, "boolean operands", &left, &right));
            };
            Ok(Value::Bool(if op == BinOp::And { a && b } else { a || b }))
        }
        BinOp::Gt | BinOp::Lt | BinOp::Ge | BinOp::Le => {
            let (a, b) = numbers(op, &left, &right)?;
            let result = match op {
                BinOp::Gt => a > b,
                BinOp::Lt => a < b,
                BinOp::Ge => a >= b,
                _ => a <= b,
            };
            Ok(Value::Bool(result))
        }
        BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod | BinOp::FloorDiv => {
            let (a, b) = numbers(op, &left, &right)?;
            arithmetic(op, a, b).map(Value::Number)
        }
    }
}

fn arithmetic(op: BinOp, a: f64, b: f64) -> Result<f64, EvalError> {
    match op {
        BinOp::Add => Ok(a + b),
        BinOp::Sub => Ok(a - b),
        BinOp::Mul => Ok(a * b),
        BinOp::Div if b == 0.0 => Err(EvalError::DivisionByZero),
        BinOp::Div => Ok(a / b),
        BinOp::FloorDiv if b == 0.0 => Err(EvalError::DivisionByZero),
        BinOp::FloorDiv => Ok((a / b).floor()),
        BinOp::Mod if b == 0.0 => Err(EvalError::ModuloByZero),
        // Truncated remainder: the result takes the sign of `a`.
        _ => Ok(a % b),
    }
}

/// `not` accepts a boolean or a missing value (which counts as false).
pub(super) fn not(operand: Value) -> Result<Value, EvalError> {
    match operand {
        Value::Bool(b) => Ok(Value::Bool(!b)),
        Value::Absent => Ok(Value::Bool(true)),
        other => Err(EvalError::TypeMismatch {
            context: "'not' operator".to_string(),
            expected: "a boolean operand",
            found: other.kind().to_string(),
        }),
    }
}

fn numbers(op: BinOp, left: &Value, right: &Value) -> Result<(f64, f64), EvalError> {
    match (left.as_number(), right.as_number()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(mismatch(op, "numeric operands", left, right)),
    }
}

fn mismatch(op: BinOp, expected: &'static str, left: &Value, right: &Value) -> EvalError {
    EvalError::TypeMismatch {
        context: format!("'{}' operator", op.symbol()),
        expected,
        found: format!("{} and {}", left.kind(), right.kind()),
    }
}
