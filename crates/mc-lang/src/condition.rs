use crate::ast::Expr;
use crate::checker::validate;
use crate::error::{LoadError, SyntaxError};
use crate::lexer::LexMode;
use crate::parser::parse_expr_with;

/// One parsed `>` line of a response's condition block.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionLine {
    pub expr: Expr,
    /// Written as `> or …`.
    pub is_or: bool,
    /// 1-based line number in the source text.
    pub line: usize,
}

/// Parse a raw source line. Lines that do not start with `>` are not
/// conditions and yield `Ok(None)`.
///
/// ```text
/// > call_count > 3          # AND line
/// > or headers["X-Debug"]   # OR line
/// ```
pub fn parse_condition_line(
    raw: &str,
    line: usize,
    mode: LexMode,
) -> Result<Option<ConditionLine>, SyntaxError> {
    let Some(rest) = raw.trim_start().strip_prefix('>') else {
        return Ok(None);
    };
    let body = strip_comment(rest).trim();
    let (is_or, text) = match body.strip_prefix("or") {
        Some(after) if after.is_empty() || after.starts_with(char::is_whitespace) => {
            (true, after.trim_start())
        }
        _ => (false, body),
    };
    let expr = parse_expr_with(text, mode)?;
    Ok(Some(ConditionLine { expr, is_or, line }))
}

pub fn compile_block(text: &str) -> Result<Vec<ConditionLine>, LoadError> {
    compile_block_with(text, LexMode::Lenient)
}

/// Parse and validate every condition line in `text`. The first failing
/// line aborts loading.
pub fn compile_block_with(text: &str, mode: LexMode) -> Result<Vec<ConditionLine>, LoadError> {
    let mut lines = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let parsed = parse_condition_line(raw, line, mode)
            .map_err(|source| LoadError::Syntax { line, source })?;
        if let Some(cond) = parsed {
            validate(&cond.expr).map_err(|source| LoadError::Semantic { line, source })?;
            lines.push(cond);
        }
    }
    Ok(lines)
}

/// Cut a trailing `# comment`, ignoring `#` inside string literals.
fn strip_comment(text: &str) -> &str {
    let mut in_string = false;
    for (i, c) in text.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &text[..i],
            _ => {}
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::SemanticErrorKind;

    fn line(raw: &str) -> ConditionLine {
        parse_condition_line(raw, 1, LexMode::Lenient)
            .unwrap()
            .unwrap()
    }

    #[test]
    fn markers() {
        let and = line("> call_count > 3");
        assert!(!and.is_or);
        assert_eq!(and.expr.to_string(), "(call_count > 3)");

        let or = line("  > or method == \"POST\"");
        assert!(or.is_or);
        assert_eq!(or.expr.to_string(), "(method == \"POST\")");
    }

    #[test]
    fn identifier_starting_with_or_is_not_a_marker() {
        let l = line("> order_id == 1");
        assert!(!l.is_or);
        assert_eq!(l.expr.to_string(), "(order_id == 1)");
    }

    #[test]
    fn comments_stripped_outside_strings() {
        assert_eq!(line("> x == 1 # note").expr.to_string(), "(x == 1)");
        assert_eq!(
            line(r##"> tag == "#1" # note"##).expr.to_string(),
            r##"(tag == "#1")"##
        );
    }

    #[test]
    fn bare_marker_is_false() {
        assert_eq!(line(">").expr, Expr::Bool(false));
        assert_eq!(line("> # only a comment").expr, Expr::Bool(false));
    }

    #[test]
    fn non_condition_lines_ignored() {
        assert!(
            parse_condition_line("HTTP 200", 1, LexMode::Lenient)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn compile_reports_line_numbers() {
        let text = "GET /users\n> call_count > 1\n> \"abc\".uper\n";
        let err = compile_block(text).unwrap_err();
        assert_eq!(err.line(), 3);
        let LoadError::Semantic { source, .. } = &err else {
            panic!("expected semantic error");
        };
        assert_eq!(source.kind, SemanticErrorKind::UnknownFunction);
        assert_eq!(
            err.to_string(),
            "line 3: unknown function: .uper (did you mean .upper?)"
        );
    }

    #[test]
    fn compile_syntax_error() {
        let err = compile_block("> (1 + 2").unwrap_err();
        assert!(matches!(err, LoadError::Syntax { line: 1, .. }));
    }

    #[test]
    fn compile_block_keeps_order() {
        let lines = compile_block("> a >> x\n\n> or x == 1\n").unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!((lines[0].line, lines[1].line), (1, 3));
        assert!(lines[1].is_or);
    }
}
