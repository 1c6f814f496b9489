use crate::ast::Expr;
use crate::parser::parse_expr;

use super::*;

fn check(text: &str) -> Vec<SemanticError> {
    check_expr(&parse_expr(text).unwrap())
}

fn first_message(text: &str) -> String {
    validate(&parse_expr(text).unwrap()).unwrap_err().message
}

// ---------------------------------------------------------------------------
// Valid expressions
// ---------------------------------------------------------------------------

#[test]
fn valid_expressions_pass() {
    for text in [
        "call_count > 3",
        r#"headers["Authorization"] >> token"#,
        r#"email.split "@" >> user, domain"#,
        "name.upper.substring 0 5",
        ".random_int 1 100 > 50",
        "{1, 2, 3}.random_choice",
        "(1..10).contains call_count",
        r#"body.user.email.matches "^[a-z]+@""#,
        "x.is_number and x.abs > 1",
        "",
    ] {
        assert!(check(text).is_empty(), "unexpected errors for {text:?}");
    }
}

// ---------------------------------------------------------------------------
// Calls
// ---------------------------------------------------------------------------

#[test]
fn unknown_function_with_suggestion() {
    let errs = check(".randm");
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].kind, SemanticErrorKind::UnknownFunction);
    assert_eq!(errs[0].message, "unknown function: .randm");
    assert_eq!(errs[0].suggestion.as_deref(), Some("random"));
    assert_eq!(
        errs[0].to_string(),
        "unknown function: .randm (did you mean .random?)"
    );
}

#[test]
fn arity_messages() {
    assert_eq!(
        first_message(".random_int 1"),
        "function .random_int requires at least 2 argument(s), got 1"
    );
    assert_eq!(
        first_message(".random_int 1 2 3"),
        "function .random_int accepts at most 2 argument(s), got 3"
    );
    assert_eq!(
        first_message("name.substring 1"),
        "function .substring requires at least 2 argument(s), got 1"
    );
}

#[test]
fn target_usage_messages() {
    assert_eq!(
        first_message(".upper"),
        "function .upper requires a target (e.g., value.upper(...))"
    );
    assert_eq!(
        first_message(r#""x".random"#),
        "function .random does not take a target (use .random(...) instead of value.random(...))"
    );
}

#[test]
fn literal_target_kinds() {
    assert_eq!(
        first_message("(1).upper"),
        "function .upper cannot be called on a number (expects string)"
    );
    assert_eq!(
        first_message("True.len"),
        "function .len cannot be called on a boolean (expects string or table)"
    );
    assert_eq!(check("(1).upper")[0].kind, SemanticErrorKind::InvalidTarget);
    assert!(check(r#""abc".upper"#).is_empty());
    assert!(check("(2.5).round").is_empty());
    assert!(check("False.is_boolean").is_empty());
    assert!(check("name.upper").is_empty());
}

#[test]
fn nested_calls_are_checked() {
    let errs = check(r#".random_int ("a".upper 1) 2"#);
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].kind, SemanticErrorKind::TooManyArgs);
}

#[test]
fn invalid_regex_literal() {
    let errs = check(r#"path.matches "([a-z""#);
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].kind, SemanticErrorKind::InvalidPattern);
}

#[test]
fn collects_every_error() {
    let errs = check(".upper and .random 1 and .nope");
    let kinds: Vec<_> = errs.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SemanticErrorKind::MissingTarget,
            SemanticErrorKind::TooManyArgs,
            SemanticErrorKind::UnknownFunction,
        ]
    );
}

// ---------------------------------------------------------------------------
// Attribution
// ---------------------------------------------------------------------------

#[test]
fn attribution_names() {
    assert_eq!(first_message("1 >> True"), "invalid variable name: True");
    assert_eq!(first_message("1 >> a, not"), "invalid variable name: not");

    let empty = Expr::Attribution {
        value: Box::new(Expr::Number(1.0)),
        vars: vec![],
    };
    let err = validate(&empty).unwrap_err();
    assert_eq!(err.kind, SemanticErrorKind::EmptyAttribution);
    assert_eq!(err.message, "attribution requires at least one variable name");
}

#[test]
fn identifier_rule() {
    assert!(is_valid_identifier("token"));
    assert!(is_valid_identifier("_x1"));
    assert!(!is_valid_identifier(""));
    assert!(!is_valid_identifier("1x"));
    assert!(!is_valid_identifier("a-b"));
    assert!(!is_valid_identifier("and"));
    assert!(!is_valid_identifier("False"));
}

#[test]
fn errors_are_error_severity() {
    assert!(check(".nope").iter().all(|e| e.severity == Severity::Error));
}
