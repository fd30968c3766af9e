//! The compilation pipeline: expression -> gate tree -> {minimized SOP and
//! POS, netlist}.
mod analysis;
#[allow(clippy::module_inception)]
mod compiler;
mod options;

pub use crate::compiler::analysis::*;
pub use crate::compiler::compiler::Compiler;
pub use crate::compiler::options::*;
