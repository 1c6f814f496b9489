use crate::checker::{SemanticErrorKind, Severity};
use crate::condition::compile_block;

use super::*;

fn lint(text: &str) -> Vec<(usize, SemanticError)> {
    lint_block(&compile_block(text).unwrap())
}

#[test]
fn clean_block() {
    let text = "> headers[\"Authorization\"] >> token\n> token == \"\" or not token\n";
    assert!(lint(text).is_empty());
}

#[test]
fn read_before_binding() {
    let warnings = lint("> token == \"x\"\n> headers[\"X\"] >> token\n");
    assert_eq!(warnings.len(), 1);
    let (line, w) = &warnings[0];
    assert_eq!(*line, 1);
    assert_eq!(w.kind, SemanticErrorKind::UnboundVariable);
    assert_eq!(w.severity, Severity::Warning);
}

#[test]
fn binding_in_same_line_counts() {
    assert!(lint("> body.id >> id and id > 0").is_empty());
}

#[test]
fn shadowing_context_name() {
    let warnings = lint("> 1 >> call_count");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].1.kind, SemanticErrorKind::ShadowsContext);
}
