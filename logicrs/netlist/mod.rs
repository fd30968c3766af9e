//! Flattened node/edge graphs of gate trees, rendered as Cytoscape-style
//! JSON element lists or as Graphviz DOT.
pub(crate) mod dot_writer;
#[allow(clippy::module_inception)]
mod netlist;

pub use crate::netlist::netlist::*;
