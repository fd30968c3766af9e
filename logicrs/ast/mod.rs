//! Gate trees produced by the parser and consumed by evaluation,
//! truth-table generation, and netlist serialization.
mod node;
mod print;

pub use crate::ast::node::*;
pub use crate::ast::print::TreePrinter;
