#[macro_use]
mod log_macros;

pub mod block;
pub mod condition_set;
pub mod context;
pub mod error;
pub mod eval;
pub mod value;

pub use block::{evaluate_block, match_block};
pub use condition_set::ConditionSet;
pub use context::{ExecutionContext, RequestContext};
pub use error::{CondError, CondReason, CondResult, EvalError};
pub use eval::evaluate;
pub use value::Value;
