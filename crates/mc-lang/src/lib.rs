pub mod ast;
pub mod builtins;
mod checker;
mod condition;
mod error;
pub mod lexer;
mod parser;

pub use builtins::{BUILTINS, BuiltinSig, TargetKind, builtin, builtin_names, is_builtin};
pub use checker::lint::lint_block;
pub use checker::{
    CONTEXT_NAMES, SemanticError, SemanticErrorKind, Severity, check_expr, is_valid_identifier,
    suggest_function, validate,
};
pub use condition::{ConditionLine, compile_block, compile_block_with, parse_condition_line};
pub use error::{LoadError, SyntaxError};
pub use lexer::{LexMode, Token, TokenKind};
pub use parser::{parse_expr, parse_expr_with, parse_tokens};
