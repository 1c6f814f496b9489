use serde::Deserialize;

/// `[lexer]` section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LexerConfig {
    /// Reject characters that start no token instead of skipping them.
    pub strict: bool,
}
