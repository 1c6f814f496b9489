use std::collections::BTreeMap;
use std::fmt;

/// Runtime value produced by evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    Number(f64),
    Bool(bool),
    Str(String),
    Seq(Vec<Value>),
    Map(BTreeMap<String, Value>),
    /// Inclusive numeric range from a `a..b` literal.
    Range { start: f64, end: f64 },
    /// Result of looking up a key or index that is not there.
    #[default]
    Absent,
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Bool(_) => "boolean",
            Self::Str(_) => "string",
            Self::Seq(_) | Self::Map(_) => "table",
            Self::Range { .. } => "range",
            Self::Absent => "missing value",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn is_table(&self) -> bool {
        matches!(self, Self::Seq(_) | Self::Map(_))
    }

    /// Language-level `==`. Values of different kinds are unequal, except
    /// that a missing value equals `""`, `False` and another missing value.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Absent, Self::Absent) => true,
            (Self::Absent, Self::Str(s)) | (Self::Str(s), Self::Absent) => s.is_empty(),
            (Self::Absent, Self::Bool(b)) | (Self::Bool(b), Self::Absent) => !b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Seq(a), Self::Seq(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loose_eq(y))
            }
            (Self::Map(a), Self::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| b.get(k).is_some_and(|w| v.loose_eq(w)))
            }
            (
                Self::Range { start: s1, end: e1 },
                Self::Range { start: s2, end: e2 },
            ) => s1 == s2 && e1 == e2,
            _ => false,
        }
    }
}

/// Text used for `..` concatenation and template interpolation.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => f.write_str(s),
            Self::Seq(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k} = {v}")?;
                }
                f.write_str("}")
            }
            Self::Range { start, end } => write!(f, "{start}..{end}"),
            Self::Absent => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Seq(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self::Map(map)
    }
}

/// JSON request bodies. `null` becomes a missing value.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as J;
        match json {
            J::Null => Self::Absent,
            J::Bool(b) => Self::Bool(b),
            J::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            J::String(s) => Self::Str(s),
            J::Array(items) => Self::Seq(items.into_iter().map(Value::from).collect()),
            J::Object(map) => Self::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Value::Number(42.0).to_string(), "42");
        assert_eq!(Value::Number(3.5).to_string(), "3.5");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::from("x").to_string(), "x");
        assert_eq!(Value::Absent.to_string(), "");
        assert_eq!(
            Value::Seq(vec![1.0.into(), "a".into()]).to_string(),
            "[1, a]"
        );
    }

    #[test]
    fn loose_equality() {
        assert!(Value::Absent.loose_eq(&Value::from("")));
        assert!(Value::Bool(false).loose_eq(&Value::Absent));
        assert!(!Value::Absent.loose_eq(&Value::Number(0.0)));
        assert!(!Value::Number(1.0).loose_eq(&Value::from("1")));
        assert!(
            Value::Seq(vec![1.0.into(), 2.0.into()])
                .loose_eq(&Value::Seq(vec![1.0.into(), 2.0.into()]))
        );
    }

    #[test]
    fn from_json() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"user": {"id": 7, "tags": ["a"], "nick": null}}"#).unwrap();
        let Value::Map(root) = Value::from(json) else {
            panic!("expected map");
        };
        let Some(Value::Map(user)) = root.get("user") else {
            panic!("expected user map");
        };
        assert_eq!(user.get("id"), Some(&Value::Number(7.0)));
        assert_eq!(user.get("tags"), Some(&Value::Seq(vec!["a".into()])));
        assert_eq!(user.get("nick"), Some(&Value::Absent));
    }
}
