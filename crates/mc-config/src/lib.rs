pub mod eval;
pub mod lexer;
pub mod logging;
pub mod mockcond;
mod validate;

pub use eval::{EvalConfig, OnError};
pub use lexer::LexerConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use mockcond::MockCondConfig;
