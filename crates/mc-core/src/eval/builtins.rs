use mc_lang::builtin;
use rand::Rng;
use rand::rngs::StdRng;
use regex::Regex;

use crate::error::EvalError;
use crate::value::Value;

/// Dispatch a call by name. Target and arity are re-checked here so trees
/// that skipped validation still fail cleanly.
pub(super) fn call(
    name: &str,
    target: Option<Value>,
    args: Vec<Value>,
    rng: &mut StdRng,
) -> Result<Value, EvalError> {
    let sig = builtin(name).ok_or_else(|| EvalError::UnknownFunction(name.to_string()))?;
    if sig.requires_target != target.is_some() {
        let message = if sig.requires_target {
            "requires a target"
        } else {
            "does not take a target"
        };
        return Err(EvalError::builtin(name, message));
    }
    if args.len() < sig.min_args || sig.max_args.is_some_and(|max| args.len() > max) {
        return Err(EvalError::builtin(
            name,
            format!("wrong number of arguments: {}", args.len()),
        ));
    }

    let target = target.unwrap_or_default();
    match name {
        "split" => split(&target, &args[0]),
        "contains" => contains(name, &target, &args[0]).map(Value::Bool),
        "not_contains" => contains(name, &target, &args[0]).map(|b| Value::Bool(!b)),
        "matches" => regex_match(&target, &args[0]),
        "upper" => Ok(Value::Str(string_target(name, &target)?.to_uppercase())),
        "lower" => Ok(Value::Str(string_target(name, &target)?.to_lowercase())),
        "trim" => Ok(Value::from(string_target(name, &target)?.trim())),
        "substring" => substring(&target, &args[0], &args[1]),
        "len" => len(&target),
        "is_string" => Ok(Value::Bool(matches!(target, Value::Str(_)))),
        "is_number" => Ok(Value::Bool(matches!(target, Value::Number(_)))),
        "is_boolean" => Ok(Value::Bool(matches!(target, Value::Bool(_)))),
        "is_table" => Ok(Value::Bool(target.is_table())),
        "round" => Ok(Value::Number(number_target(name, &target)?.round())),
        "floor" => Ok(Value::Number(number_target(name, &target)?.floor())),
        "ceil" => Ok(Value::Number(number_target(name, &target)?.ceil())),
        "abs" => Ok(Value::Number(number_target(name, &target)?.abs())),
        "random" => Ok(Value::Number(rng.random::<f64>())),
        "random_bool" => Ok(Value::Bool(rng.random::<bool>())),
        "random_int" => random_int(&args[0], &args[1], rng),
        "random_float" => random_float(&args[0], &args[1], rng),
        "random_choice" => random_choice(&target, rng),
        _ => Err(EvalError::UnknownFunction(name.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Argument helpers
// ---------------------------------------------------------------------------

fn string_target<'a>(name: &str, target: &'a Value) -> Result<&'a str, EvalError> {
    target.as_str().ok_or_else(|| EvalError::TypeMismatch {
        context: format!("function .{name}"),
        expected: "a string target",
        found: target.kind().to_string(),
    })
}

fn number_target(name: &str, target: &Value) -> Result<f64, EvalError> {
    target.as_number().ok_or_else(|| EvalError::TypeMismatch {
        context: format!("function .{name}"),
        expected: "a number target",
        found: target.kind().to_string(),
    })
}

fn string_arg<'a>(name: &str, arg: &'a Value) -> Result<&'a str, EvalError> {
    arg.as_str().ok_or_else(|| EvalError::TypeMismatch {
        context: format!("function .{name}"),
        expected: "a string argument",
        found: arg.kind().to_string(),
    })
}

/// Numeric argument truncated to an integer.
fn int_arg(name: &str, arg: &Value) -> Result<i64, EvalError> {
    match arg.as_number() {
        Some(n) if n.is_finite() => Ok(n.trunc() as i64),
        _ => Err(EvalError::TypeMismatch {
            context: format!("function .{name}"),
            expected: "a numeric argument",
            found: arg.kind().to_string(),
        }),
    }
}

fn float_arg(name: &str, arg: &Value) -> Result<f64, EvalError> {
    arg.as_number().ok_or_else(|| EvalError::TypeMismatch {
        context: format!("function .{name}"),
        expected: "a numeric argument",
        found: arg.kind().to_string(),
    })
}

// ---------------------------------------------------------------------------
// String and table functions
// ---------------------------------------------------------------------------

fn split(target: &Value, sep: &Value) -> Result<Value, EvalError> {
    let s = string_target("split", target)?;
    let sep = string_arg("split", sep)?;
    let parts: Vec<Value> = if sep.is_empty() {
        s.chars().map(|c| Value::Str(c.to_string())).collect()
    } else {
        s.split(sep).map(Value::from).collect()
    };
    Ok(Value::Seq(parts))
}

fn contains(name: &str, target: &Value, needle: &Value) -> Result<bool, EvalError> {
    match target {
        Value::Str(s) => Ok(s.contains(string_arg(name, needle)?)),
        Value::Seq(items) => Ok(items.iter().any(|item| item.loose_eq(needle))),
        Value::Map(map) => Ok(map.contains_key(string_arg(name, needle)?)),
        Value::Range { start, end } => {
            let n = float_arg(name, needle)?;
            Ok(*start <= n && n <= *end)
        }
        other => Err(EvalError::TypeMismatch {
            context: format!("function .{name}"),
            expected: "a string, table or range target",
            found: other.kind().to_string(),
        }),
    }
}

fn regex_match(target: &Value, pattern: &Value) -> Result<Value, EvalError> {
    let s = string_target("matches", target)?;
    let pattern = string_arg("matches", pattern)?;
    let re = Regex::new(pattern).map_err(|e| EvalError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;
    Ok(Value::Bool(re.is_match(s)))
}

/// Characters in `[start, end)`. Bounds outside the string are an error.
fn substring(target: &Value, start: &Value, end: &Value) -> Result<Value, EvalError> {
    let chars: Vec<char> = string_target("substring", target)?.chars().collect();
    let start = int_arg("substring", start)?;
    let end = int_arg("substring", end)?;
    let len = chars.len() as i64;
    if start < 0 || start >= len || end < 0 || end > len || start > end {
        return Err(EvalError::builtin(
            "substring",
            format!("indices [{start}, {end}) out of range for length {len}"),
        ));
    }
    Ok(Value::Str(chars[start as usize..end as usize].iter().collect()))
}

fn len(target: &Value) -> Result<Value, EvalError> {
    let n = match target {
        Value::Str(s) => s.chars().count(),
        Value::Seq(items) => items.len(),
        Value::Map(map) => map.len(),
        other => {
            return Err(EvalError::TypeMismatch {
                context: "function .len".to_string(),
                expected: "a string or table target",
                found: other.kind().to_string(),
            });
        }
    };
    Ok(Value::Number(n as f64))
}

// ---------------------------------------------------------------------------
// Random functions
// ---------------------------------------------------------------------------

fn random_int(min: &Value, max: &Value, rng: &mut StdRng) -> Result<Value, EvalError> {
    let min = int_arg("random_int", min)?;
    let max = int_arg("random_int", max)?;
    if min > max {
        return Err(EvalError::builtin(
            "random_int",
            format!("min ({min}) must not exceed max ({max})"),
        ));
    }
    Ok(Value::Number(rng.random_range(min..=max) as f64))
}

fn random_float(min: &Value, max: &Value, rng: &mut StdRng) -> Result<Value, EvalError> {
    let min = float_arg("random_float", min)?;
    let max = float_arg("random_float", max)?;
    if !min.is_finite() || !max.is_finite() {
        return Err(EvalError::builtin(
            "random_float",
            format!("bounds must be finite, got [{min}, {max}]"),
        ));
    }
    if min > max {
        return Err(EvalError::builtin(
            "random_float",
            format!("min ({min}) must not exceed max ({max})"),
        ));
    }
    let span = max - min;
    if !span.is_finite() {
        return Err(EvalError::builtin(
            "random_float",
            format!("range [{min}, {max}] is too wide"),
        ));
    }
    Ok(Value::Number(min + rng.random::<f64>() * span))
}

fn random_choice(target: &Value, rng: &mut StdRng) -> Result<Value, EvalError> {
    let items: Vec<&Value> = match target {
        Value::Seq(items) => items.iter().collect(),
        Value::Map(map) => map.values().collect(),
        other => {
            return Err(EvalError::TypeMismatch {
                context: "function .random_choice".to_string(),
                expected: "a table target",
                found: other.kind().to_string(),
            });
        }
    };
    if items.is_empty() {
        return Err(EvalError::builtin("random_choice", "cannot choose from an empty table"));
    }
    Ok(items[rng.random_range(0..items.len())].clone())
}
