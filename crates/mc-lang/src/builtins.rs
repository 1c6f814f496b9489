//! Signatures of the built-in function library.
//!
//! The registry is the single source of truth for the parser (method call
//! vs. property access), the validator (target and arity rules) and the
//! evaluator (dispatch by name).

/// Kind of value a built-in accepts as its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Any,
    String,
    Number,
    Boolean,
    Table,
}

impl TargetKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Any => "any value",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Table => "table",
        }
    }
}

impl BuiltinSig {
    /// Whether a target of `kind` satisfies this signature.
    pub fn accepts(&self, kind: TargetKind) -> bool {
        self.targets
            .iter()
            .any(|t| *t == TargetKind::Any || *t == kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinSig {
    pub name: &'static str,
    pub requires_target: bool,
    pub min_args: usize,
    /// `None` means no upper bound.
    pub max_args: Option<usize>,
    pub targets: &'static [TargetKind],
    pub description: &'static str,
}

const fn method(
    name: &'static str,
    args: usize,
    targets: &'static [TargetKind],
    description: &'static str,
) -> BuiltinSig {
    BuiltinSig {
        name,
        requires_target: true,
        min_args: args,
        max_args: Some(args),
        targets,
        description,
    }
}

const fn global(name: &'static str, args: usize, description: &'static str) -> BuiltinSig {
    BuiltinSig {
        name,
        requires_target: false,
        min_args: args,
        max_args: Some(args),
        targets: &[],
        description,
    }
}

const STRING: &[TargetKind] = &[TargetKind::String];
const NUMBER: &[TargetKind] = &[TargetKind::Number];
const TABLE: &[TargetKind] = &[TargetKind::Table];
const ANY: &[TargetKind] = &[TargetKind::Any];
const STRING_OR_TABLE: &[TargetKind] = &[TargetKind::String, TargetKind::Table];

pub static BUILTINS: &[BuiltinSig] = &[
    method("split", 1, STRING, "split a string by a separator"),
    method("contains", 1, STRING_OR_TABLE, "substring, element or range membership"),
    method("not_contains", 1, STRING_OR_TABLE, "negation of contains"),
    method("matches", 1, STRING, "regular expression match"),
    method("upper", 0, STRING, "convert to uppercase"),
    method("lower", 0, STRING, "convert to lowercase"),
    method("trim", 0, STRING, "strip surrounding whitespace"),
    method("substring", 2, STRING, "characters in [start, end)"),
    method("len", 0, STRING_OR_TABLE, "length of a string or table"),
    method("is_string", 0, ANY, "value is a string"),
    method("is_number", 0, ANY, "value is a number"),
    method("is_boolean", 0, ANY, "value is a boolean"),
    method("is_table", 0, ANY, "value is a table"),
    method("round", 0, NUMBER, "round to the nearest integer"),
    method("floor", 0, NUMBER, "round down"),
    method("ceil", 0, NUMBER, "round up"),
    method("abs", 0, NUMBER, "absolute value"),
    global("random", 0, "random float in [0, 1)"),
    global("random_bool", 0, "random boolean"),
    global("random_int", 2, "random integer in [min, max]"),
    global("random_float", 2, "random float in [min, max]"),
    method("random_choice", 0, TABLE, "random element of a table"),
];

pub fn builtin(name: &str) -> Option<&'static BuiltinSig> {
    BUILTINS.iter().find(|sig| sig.name == name)
}

pub fn is_builtin(name: &str) -> bool {
    builtin(name).is_some()
}

pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|sig| sig.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name() {
        let sig = builtin("substring").unwrap();
        assert!(sig.requires_target);
        assert_eq!((sig.min_args, sig.max_args), (2, Some(2)));
        assert!(builtin("random_int").is_some_and(|s| !s.requires_target));
        assert!(builtin("nope").is_none());
    }

    #[test]
    fn target_kinds() {
        let upper = builtin("upper").unwrap();
        assert!(upper.accepts(TargetKind::String));
        assert!(!upper.accepts(TargetKind::Number));
        assert!(builtin("is_string").unwrap().accepts(TargetKind::Boolean));
        assert!(builtin("len").unwrap().accepts(TargetKind::Table));
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = builtin_names().collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
