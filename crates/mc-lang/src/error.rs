use crate::checker::SemanticError;
use crate::lexer::Token;

/// Lexing or parsing failure for a single condition expression.
///
/// `position` is the byte offset into the condition text where the offending
/// token (or end of input) starts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message} at position {position}")]
pub struct SyntaxError {
    pub message: String,
    pub token: Option<String>,
    pub position: usize,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, token: Option<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            token,
            position,
        }
    }

    pub(crate) fn unexpected(tok: &Token) -> Self {
        Self::new(
            format!("unexpected token {:?}", tok.text),
            Some(tok.text.clone()),
            tok.pos,
        )
    }

    pub(crate) fn end_of_input(expected: &str, position: usize) -> Self {
        Self::new(
            format!("unexpected end of expression, expected {expected}"),
            None,
            position,
        )
    }
}

/// Load-time failure of a condition block, tagged with the 1-based source line.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    #[error("line {line}: {source}")]
    Syntax { line: usize, source: SyntaxError },
    #[error("line {line}: {source}")]
    Semantic { line: usize, source: SemanticError },
}

impl LoadError {
    pub fn line(&self) -> usize {
        match self {
            Self::Syntax { line, .. } | Self::Semantic { line, .. } => *line,
        }
    }
}
