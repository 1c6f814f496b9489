use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::eval::EvalConfig;
use crate::lexer::LexerConfig;
use crate::logging::LoggingConfig;
use crate::validate;

// ---------------------------------------------------------------------------
// MockCondConfig
// ---------------------------------------------------------------------------

/// Resolved contents of `mockcond.toml`. All sections are optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MockCondConfig {
    pub logging: LoggingConfig,
    pub lexer: LexerConfig,
    pub eval: EvalConfig,
}

impl MockCondConfig {
    /// Read and parse a `mockcond.toml` file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.as_ref().display()))?;
        content.parse()
    }
}

impl FromStr for MockCondConfig {
    type Err = anyhow::Error;

    fn from_str(toml_str: &str) -> anyhow::Result<Self> {
        let config: MockCondConfig = toml::from_str(toml_str)?;
        validate::validate(&config)?;
        Ok(config)
    }
}
