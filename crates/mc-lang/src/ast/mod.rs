mod display;
mod expr;

pub use expr::*;
