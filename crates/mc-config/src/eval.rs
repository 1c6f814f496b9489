use serde::Deserialize;

/// `[eval]` section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    pub on_error: OnError,
    /// Fixed seed for the per-request RNG. Unset means OS entropy.
    pub seed: Option<u64>,
}

/// What a runtime error inside a condition block turns into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnError {
    /// The block does not match; the error is logged.
    #[default]
    NoMatch,
    /// The error is returned to the caller.
    Fail,
}
