//! Operator-precedence parser turning expressions such as `A(B + C')` into
//! gate trees.
//!
//! Supported syntax:
//! * variables `A`..`F` (case-insensitive),
//! * `*` (AND), `+` (OR), `^` (XOR), `%` (NAND), `$` (NOR),
//! * postfix `'` (NOT),
//! * parentheses, and juxtaposition as implicit AND (`AB` is `A * B`).
#[allow(clippy::module_inception)]
mod parser;
mod token;

pub use crate::parser::parser::{parse, MAX_DEPTH};
pub use crate::parser::token::Operator;
