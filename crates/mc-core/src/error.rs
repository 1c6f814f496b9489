use derive_more::From;
use orion_error::{ErrorCode, StructError, UvsReason};

// ---------------------------------------------------------------------------
// Runtime evaluation errors
// ---------------------------------------------------------------------------

/// Failure while evaluating one expression against a request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    #[error("undefined variable: {0}")]
    UndefinedVariable(String),
    #[error("{context} requires {expected}, got {found}")]
    TypeMismatch {
        context: String,
        expected: &'static str,
        found: String,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulo by zero")]
    ModuloByZero,
    #[error("cannot access {key:?} on a missing value in `{path}`")]
    AccessOnAbsent { path: String, key: String },
    #[error("cannot access {key:?} on {kind}")]
    InvalidAccess { key: String, kind: &'static str },
    #[error("cannot destructure {kind} into {count} variables")]
    Destructure { kind: &'static str, count: usize },
    #[error("unknown function: .{0}")]
    UnknownFunction(String),
    #[error("function .{name}: {message}")]
    Builtin { name: String, message: String },
    #[error("invalid regex pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },
    #[error("condition must evaluate to a boolean, got {0}")]
    NonBoolean(&'static str),
}

impl EvalError {
    pub(crate) fn builtin(name: &str, message: impl Into<String>) -> Self {
        Self::Builtin {
            name: name.to_string(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Crate-boundary error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, thiserror::Error, From)]
pub enum CondReason {
    #[error("condition syntax error")]
    Syntax,
    #[error("condition semantic error")]
    Semantic,
    #[error("condition evaluation error")]
    Evaluation,
    #[error("{0}")]
    Uvs(UvsReason),
}

impl ErrorCode for CondReason {
    fn error_code(&self) -> i32 {
        match self {
            Self::Syntax => 3001,
            Self::Semantic => 3002,
            Self::Evaluation => 3003,
            Self::Uvs(u) => u.error_code(),
        }
    }
}

pub type CondError = StructError<CondReason>;
pub type CondResult<T> = Result<T, CondError>;
