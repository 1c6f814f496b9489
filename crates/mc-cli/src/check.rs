use std::fmt;
use std::path::PathBuf;

use anyhow::Result;
use mc_lang::{LexMode, Severity, check_expr, lint_block, parse_condition_line};

/// One finding in a condition file.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub line: usize,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Error => write!(f, "{}: error: {}", self.line, self.message),
            Severity::Warning => write!(f, "{}: warning: {}", self.line, self.message),
        }
    }
}

/// Every syntax and semantic problem in `text`, plus lint warnings over the
/// lines that parsed. Unlike block loading, checking does not stop at the
/// first failing line.
pub fn check_text(text: &str, mode: LexMode) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut parsed = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        match parse_condition_line(raw, line, mode) {
            Ok(Some(cond)) => {
                diagnostics.extend(check_expr(&cond.expr).into_iter().map(|e| Diagnostic {
                    line,
                    severity: e.severity,
                    message: e.to_string(),
                }));
                parsed.push(cond);
            }
            Ok(None) => {}
            Err(e) => diagnostics.push(Diagnostic {
                line,
                severity: Severity::Error,
                message: e.to_string(),
            }),
        }
    }

    diagnostics.extend(lint_block(&parsed).into_iter().map(|(line, w)| Diagnostic {
        line,
        severity: w.severity,
        message: w.to_string(),
    }));
    diagnostics.sort_by_key(|d| d.line);
    diagnostics
}

/// Check each file and print `path:line: severity: message`. Fails when any
/// file has an error.
pub fn run(files: &[PathBuf], mode: LexMode) -> Result<()> {
    let mut error_count = 0;
    for path in files {
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
        let diagnostics = check_text(&text, mode);
        for d in &diagnostics {
            println!("{}:{d}", path.display());
        }
        let errors = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count();
        tracing::info!(
            domain = "load",
            file = %path.display(),
            errors,
            warnings = diagnostics.len() - errors,
            "condition file checked"
        );
        error_count += errors;
    }
    if error_count > 0 {
        anyhow::bail!("{error_count} error(s) found");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_block_has_no_diagnostics() {
        let text = "# comment\n> method == \"GET\"\n> or call_count > 2\n";
        assert!(check_text(text, LexMode::Lenient).is_empty());
    }

    #[test]
    fn reports_every_failing_line() {
        let text = "> (1 + 2\n> .nope\n> \"abc\".uper\n";
        let diagnostics = check_text(text, LexMode::Lenient);
        let lines: Vec<usize> = diagnostics.iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![1, 2, 3]);
        assert!(diagnostics.iter().all(|d| d.severity == Severity::Error));
        assert!(diagnostics[2].message.contains("did you mean .upper?"));
    }

    #[test]
    fn lint_warnings_included() {
        let text = "> token == \"x\"\n";
        let diagnostics = check_text(text, LexMode::Lenient);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert!(diagnostics[0].to_string().starts_with("1: warning:"));
    }

    #[test]
    fn strict_mode_rejects_stray_characters() {
        assert!(check_text("> 1 @== 1", LexMode::Lenient).is_empty());
        assert_eq!(check_text("> 1 @== 1", LexMode::Strict).len(), 1);
    }
}
