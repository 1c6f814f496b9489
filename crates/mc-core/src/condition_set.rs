use mc_config::{LexerConfig, OnError};
use mc_lang::{ConditionLine, LexMode, LoadError, SemanticError, compile_block_with, lint_block};
use orion_error::prelude::*;
use orion_error::ErrorOweBase;

use crate::block::{evaluate_block, match_block};
use crate::context::ExecutionContext;
use crate::error::{CondReason, CondResult};

/// A compiled, validated condition block.
///
/// Immutable after compilation and shared read-only between requests; each
/// request brings its own [`ExecutionContext`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionSet {
    lines: Vec<ConditionLine>,
}

impl ConditionSet {
    pub fn compile(text: &str) -> CondResult<Self> {
        Self::compile_with(text, &LexerConfig::default())
    }

    /// Parse and validate every `>` line of `text`. Lint warnings are logged,
    /// the first syntax or semantic error aborts with its line number.
    pub fn compile_with(text: &str, lexer: &LexerConfig) -> CondResult<Self> {
        let mode = if lexer.strict {
            LexMode::Strict
        } else {
            LexMode::Lenient
        };
        let lines = compile_block_with(text, mode).map_err(|e| {
            let reason = match e {
                LoadError::Syntax { .. } => CondReason::Syntax,
                LoadError::Semantic { .. } => CondReason::Semantic,
            };
            StructError::from(reason).with_detail(e.to_string())
        })?;

        let set = Self { lines };
        let warnings = set.warnings();
        for (line, warning) in &warnings {
            mc_warn!(load, line, warning = %warning, "condition lint");
        }
        mc_info!(
            load,
            lines = set.lines.len(),
            warnings = warnings.len(),
            "condition block compiled"
        );
        Ok(set)
    }

    pub fn from_lines(lines: Vec<ConditionLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[ConditionLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lint diagnostics with their line numbers.
    pub fn warnings(&self) -> Vec<(usize, SemanticError)> {
        lint_block(&self.lines)
    }

    /// Verdict with runtime errors surfaced.
    pub fn evaluate(&self, ctx: &mut ExecutionContext) -> CondResult<bool> {
        evaluate_block(&self.lines, ctx).owe(CondReason::Evaluation)
    }

    /// Verdict with runtime errors logged and treated as a non-match.
    pub fn matches(&self, ctx: &mut ExecutionContext) -> bool {
        match_block(&self.lines, ctx)
    }

    /// Verdict under the configured error policy.
    pub fn decide(&self, ctx: &mut ExecutionContext, on_error: OnError) -> CondResult<bool> {
        match on_error {
            OnError::NoMatch => Ok(self.matches(ctx)),
            OnError::Fail => self.evaluate(ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RequestContext;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn shareable_between_requests() {
        assert_send_sync::<ConditionSet>();
    }

    #[test]
    fn compile_errors_carry_reason() {
        let err = ConditionSet::compile("> (1 + 2").unwrap_err();
        assert!(err.to_string().contains("condition syntax error"));

        let err = ConditionSet::compile("> .nope").unwrap_err();
        assert!(err.to_string().contains("condition semantic error"));
    }

    #[test]
    fn strict_lexer_from_config() {
        let strict = LexerConfig { strict: true };
        assert!(ConditionSet::compile("> 1 @== 1").is_ok());
        assert!(ConditionSet::compile_with("> 1 @== 1", &strict).is_err());
    }

    #[test]
    fn decide_follows_policy() {
        let set = ConditionSet::compile("> 1 / 0 > 1").unwrap();
        let mut ctx = ExecutionContext::seeded(1, RequestContext::default(), 3);
        assert!(!set.decide(&mut ctx, OnError::NoMatch).unwrap());
        let err = set.decide(&mut ctx, OnError::Fail).unwrap_err();
        assert!(err.to_string().contains("condition evaluation error"));
    }
}
