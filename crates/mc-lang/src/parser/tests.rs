use crate::ast::{Access, BinOp, Expr, TableLit};
use crate::lexer::LexMode;

use super::*;

fn render(text: &str) -> String {
    parse_expr(text).unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Literals
// ---------------------------------------------------------------------------

#[test]
fn literals() {
    assert_eq!(parse_expr("42").unwrap(), Expr::Number(42.0));
    assert_eq!(parse_expr("3.14").unwrap(), Expr::Number(3.14));
    assert_eq!(parse_expr("True").unwrap(), Expr::Bool(true));
    assert_eq!(parse_expr("False").unwrap(), Expr::Bool(false));
    assert_eq!(parse_expr(r#""hello""#).unwrap(), Expr::str("hello"));
}

#[test]
fn empty_condition_is_false() {
    assert_eq!(parse_expr("").unwrap(), Expr::Bool(false));
    assert_eq!(parse_expr("   ").unwrap(), Expr::Bool(false));
}

// ---------------------------------------------------------------------------
// Precedence
// ---------------------------------------------------------------------------

#[test]
fn arithmetic_precedence() {
    assert_eq!(render("1 + 2 * 3"), "(1 + (2 * 3))");
    assert_eq!(render("(1 + 2) * 3"), "((1 + 2) * 3)");
    assert_eq!(render("10 - 4 - 3"), "((10 - 4) - 3)");
    assert_eq!(render("7 // 2 % 3"), "((7 // 2) % 3)");
}

#[test]
fn logical_precedence() {
    assert_eq!(render("True or False and True"), "(True or (False and True))");
    assert_eq!(
        render("x + 1 > 3 and y == 2"),
        "(((x + 1) > 3) and (y == 2))"
    );
}

#[test]
fn not_binds_tighter_than_comparison() {
    assert_eq!(render("not True"), "(not True)");
    assert_eq!(render("not x == y"), "((not x) == y)");
    assert_eq!(render("not not x"), "(not (not x))");
}

#[test]
fn concat_sits_between_comparison_and_additive() {
    assert_eq!(render(r#"a .. b + 1 == "x2""#), r#"((a .. (b + 1)) == "x2")"#);
}

#[test]
fn comparison_does_not_chain() {
    let err = parse_expr("a < b < c").unwrap_err();
    assert_eq!(err.token.as_deref(), Some("<"));
}

// ---------------------------------------------------------------------------
// Attribution
// ---------------------------------------------------------------------------

#[test]
fn attribution_single_and_destructuring() {
    assert_eq!(render("42 >> answer"), "42 >> [answer]");
    assert_eq!(render("result >> x, y, z"), "result >> [x y z]");
    assert_eq!(
        render(r#"email.split "@" >> user, domain"#),
        r#"email.split("@") >> [user domain]"#
    );
}

#[test]
fn attribution_binds_looser_than_comparison() {
    let expr = parse_expr("x > 1 >> flag and flag").unwrap();
    let Expr::Binary {
        op: BinOp::And,
        left,
        ..
    } = expr
    else {
        panic!("expected and");
    };
    assert!(matches!(*left, Expr::Attribution { ref vars, .. } if vars == &["flag"]));
}

#[test]
fn attribution_chains() {
    assert_eq!(render("1 >> a >> b"), "1 >> [a] >> [b]");
}

#[test]
fn attribution_requires_identifier() {
    assert!(parse_expr("x >> 5").is_err());
    assert!(parse_expr("x >>").is_err());
}

// ---------------------------------------------------------------------------
// Variables, access paths and calls
// ---------------------------------------------------------------------------

#[test]
fn access_paths() {
    let expr = parse_expr("user.contacts[0].email").unwrap();
    let Expr::Var(var) = &expr else {
        panic!("expected variable");
    };
    assert_eq!(var.name, "user");
    assert_eq!(
        var.path,
        vec![
            Access::Property("contacts".into()),
            Access::Index("0".into()),
            Access::Property("email".into()),
        ]
    );
    assert_eq!(expr.to_string(), r#"user.contacts["0"].email"#);
    assert_eq!(
        render(r#"headers["Authorization"]"#),
        r#"headers["Authorization"]"#
    );
}

#[test]
fn builtin_name_after_variable_is_method_call() {
    assert_eq!(render("name.upper"), "name.upper()");
    assert_eq!(render("name.substring 0 5"), "name.substring(0, 5)");
    assert_eq!(
        render("user.name.upper.substring 0 5"),
        "user.name.upper().substring(0, 5)"
    );
    assert_eq!(
        render(r#"name.substring 0 5 == "Hello""#),
        r#"(name.substring(0, 5) == "Hello")"#
    );
}

#[test]
fn global_calls() {
    assert_eq!(render(".random"), ".random()");
    assert_eq!(render(".random_int 1 100"), ".random_int(1, 100)");
    assert_eq!(render(".random_int 1 100 > 50"), "(.random_int(1, 100) > 50)");
    assert!(matches!(
        parse_expr(".random_float 0.5 1.5").unwrap(),
        Expr::Call { target: None, ref args, .. } if args.len() == 2
    ));
}

#[test]
fn method_call_on_literals_and_groups() {
    assert_eq!(render(r#""abc".upper"#), r#""abc".upper()"#);
    assert_eq!(render("{1, 2, 3}.contains 2"), "[1, 2, 3].contains(2)");
    assert_eq!(render("(1..5).contains 3"), "1..5.contains(3)");
}

#[test]
fn detached_global_after_value_is_trailing() {
    assert!(parse_expr("x .random").is_err());
}

// ---------------------------------------------------------------------------
// Tables and ranges
// ---------------------------------------------------------------------------

#[test]
fn tables() {
    assert_eq!(render("{1, 2, 3}"), "[1, 2, 3]");
    assert_eq!(render("{1 2 3}"), "[1, 2, 3]");
    assert_eq!(
        render(r#"{name = "John", age = 30}"#),
        r#"{name = "John", age = 30}"#
    );
    assert_eq!(render("{}"), "[]");
    assert!(matches!(
        parse_expr("{a = 1}").unwrap(),
        Expr::Table(TableLit::Dict(ref pairs)) if pairs.len() == 1
    ));
}

#[test]
fn mixed_table_is_error() {
    assert!(parse_expr("{1, a = 2}").is_err());
    assert!(parse_expr("{a = 1, 2}").is_err());
    assert!(parse_expr("{1, 2").is_err());
}

#[test]
fn range_versus_concat() {
    assert_eq!(
        parse_expr("1..10").unwrap(),
        Expr::Range {
            start: 1.0,
            end: 10.0
        }
    );
    assert_eq!(render("0.5..1.5"), "0.5..1.5");
    assert_eq!(render("1 .. 10"), "(1 .. 10)");
    assert_eq!(render(r#"1..x"#), "(1 .. x)");
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn malformed_expressions() {
    let err = parse_expr("(1 + 2").unwrap_err();
    assert!(err.message.contains("end of expression"));
    assert_eq!(err.position, 6);

    assert!(parse_expr("1 +").is_err());
    assert!(parse_expr(r#"user["name""#).is_err());
    assert!(parse_expr("user[name]").is_err());
    assert!(parse_expr("and").is_err());
    assert!(parse_expr(")").is_err());
}

#[test]
fn trailing_tokens_rejected() {
    let err = parse_expr("1 2").unwrap_err();
    assert_eq!(err.token.as_deref(), Some("2"));
    assert_eq!(err.position, 2);
}

#[test]
fn strict_mode_rejects_stray_characters() {
    assert_eq!(
        parse_expr("a @== b").unwrap().to_string(),
        "(a == b)"
    );
    assert!(parse_expr_with("a @== b", LexMode::Strict).is_err());
}
