use mc_lang::ast::{Access, VarRef};

use crate::context::ExecutionContext;
use crate::error::EvalError;
use crate::value::Value;

/// Which table the access chain is currently inside. Keys into the headers
/// table are lower-cased before lookup.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Scope {
    Request,
    Headers,
    Other,
}

/// True when `var` names the headers table itself: `headers`,
/// `request.headers`, or a variable already bound to one of those.
pub(super) fn is_headers_table(var: &VarRef, ctx: &ExecutionContext) -> bool {
    match (var.name.as_str(), var.path.as_slice()) {
        ("headers", []) => true,
        ("request", [access]) => access.key() == "headers",
        (name, []) => ctx.is_header_table(name),
        _ => false,
    }
}

/// Resolve a variable reference: request-context names first, then bound
/// variables, then the access chain step by step.
pub(super) fn resolve(var: &VarRef, ctx: &ExecutionContext) -> Result<Value, EvalError> {
    let (mut current, mut scope) = base(&var.name, ctx)?;

    for (i, access) in var.path.iter().enumerate() {
        let key = match scope {
            Scope::Headers => access.key().to_ascii_lowercase(),
            _ => access.key().to_string(),
        };
        if current.is_absent() {
            let walked = VarRef {
                name: var.name.clone(),
                path: var.path[..i].to_vec(),
            };
            return Err(EvalError::AccessOnAbsent {
                path: walked.to_string(),
                key,
            });
        }
        current = step(current, access, &key)?;
        scope = if scope == Scope::Request && key == "headers" {
            Scope::Headers
        } else {
            Scope::Other
        };
    }

    Ok(current)
}

fn base(name: &str, ctx: &ExecutionContext) -> Result<(Value, Scope), EvalError> {
    let req = ctx.request();
    let found = match name {
        "call_count" => (Value::Number(ctx.call_count as f64), Scope::Other),
        "request" => (req.to_value(), Scope::Request),
        "method" => (Value::from(req.method.as_str()), Scope::Other),
        "path" => (Value::from(req.path.as_str()), Scope::Other),
        "query" => (req.query_value(), Scope::Other),
        "headers" => (req.headers_value(), Scope::Headers),
        "body" => (req.body.clone(), Scope::Other),
        _ => {
            let value = ctx
                .variable(name)
                .cloned()
                .ok_or_else(|| EvalError::UndefinedVariable(name.to_string()))?;
            let scope = if ctx.is_header_table(name) {
                Scope::Headers
            } else {
                Scope::Other
            };
            (value, scope)
        }
    };
    Ok(found)
}

fn step(current: Value, access: &Access, key: &str) -> Result<Value, EvalError> {
    match (current, access) {
        (Value::Map(mut map), _) => Ok(map.remove(key).unwrap_or(Value::Absent)),
        (Value::Seq(items), Access::Index(_)) => match key.parse::<usize>() {
            Ok(i) => Ok(items.into_iter().nth(i).unwrap_or(Value::Absent)),
            Err(_) => Err(EvalError::InvalidAccess {
                key: key.to_string(),
                kind: "table",
            }),
        },
        (other, _) => Err(EvalError::InvalidAccess {
            key: key.to_string(),
            kind: other.kind(),
        }),
    }
}
