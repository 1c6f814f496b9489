mod access;
mod builtins;
mod ops;

use std::collections::BTreeMap;

use mc_lang::ast::{Expr, TableLit, UnaryOp};

use crate::context::ExecutionContext;
use crate::error::EvalError;
use crate::value::Value;


/// Evaluate one expression tree against a request context.
///
/// Operands are evaluated left to right; `and` / `or` evaluate both sides.
/// Only attribution mutates the context.
pub fn evaluate(expr: &Expr, ctx: &mut ExecutionContext) -> Result<Value, EvalError> {
    match expr {
        Expr::Number(n) => Ok(Value::Number(*n)),
        Expr::Bool(b) => Ok(Value::Bool(*b)),
        Expr::Str(s) => Ok(Value::Str(s.clone())),
        Expr::Range { start, end } => Ok(Value::Range {
            start: *start,
            end: *end,
        }),
        Expr::Table(TableLit::Array(items)) => {
            let values = items
                .iter()
                .map(|e| evaluate(e, ctx))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Seq(values))
        }
        Expr::Table(TableLit::Dict(pairs)) => {
            let mut map = BTreeMap::new();
            for (key, e) in pairs {
                map.insert(key.clone(), evaluate(e, ctx)?);
            }
            Ok(Value::Map(map))
        }
        Expr::Var(var) => access::resolve(var, ctx),
        Expr::Binary { op, left, right } => {
            let l = evaluate(left, ctx)?;
            let r = evaluate(right, ctx)?;
            ops::binary(*op, l, r)
        }
        Expr::Unary {
            op: UnaryOp::Not,
            operand,
        } => ops::not(evaluate(operand, ctx)?),
        Expr::Attribution { value, vars } => {
            let v = evaluate(value, ctx)?;
            match (value.as_ref(), vars.as_slice()) {
                (Expr::Var(var), [name]) if access::is_headers_table(var, ctx) => {
                    ctx.bind_headers(name.clone(), v.clone());
                }
                _ => assign(vars, &v, ctx)?,
            }
            Ok(v)
        }
        Expr::Call { target, name, args } => {
            let target = match target {
                Some(t) => Some(evaluate(t, ctx)?),
                None => None,
            };
            let args = args
                .iter()
                .map(|a| evaluate(a, ctx))
                .collect::<Result<Vec<_>, _>>()?;
            builtins::call(name, target, args, ctx.rng())
        }
    }
}

/// One name binds the whole value; several names destructure a table.
/// Names without a matching key or position stay unbound.
fn assign(vars: &[String], value: &Value, ctx: &mut ExecutionContext) -> Result<(), EvalError> {
    if let [name] = vars {
        ctx.bind(name.clone(), value.clone());
        return Ok(());
    }
    match value {
        Value::Map(map) => {
            for name in vars {
                if let Some(v) = map.get(name) {
                    ctx.bind(name.clone(), v.clone());
                }
            }
        }
        Value::Seq(items) => {
            for (name, v) in vars.iter().zip(items) {
                ctx.bind(name.clone(), v.clone());
            }
        }
        other => {
            return Err(EvalError::Destructure {
                kind: other.kind(),
                count: vars.len(),
            });
        }
    }
    Ok(())
}
