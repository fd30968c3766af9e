use std::fmt::Display;

use serde::Serialize;

use crate::ast::LogicNode;
use crate::minimizer::TruthTable;
use crate::netlist::Netlist;

/// Everything known about one compiled output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    /// Name of the output, e.g. `X`.
    pub label: String,
    /// Expression the output was compiled from.
    pub expression: String,
    pub sop: String,
    pub pos: String,
    pub minterms: Vec<u8>,
    pub maxterms: Vec<u8>,
    pub netlist: Netlist,

    /// Gate tree of the expression. Constant functions recovered from
    /// minterms have none.
    #[serde(skip)]
    pub tree: Option<LogicNode>,
}

impl Analysis {
    /// Truth table of the output, rebuilt from its minterms.
    #[must_use]
    pub fn truth_table(&self) -> TruthTable {
        // Minterms always come from a table, so they are in range.
        TruthTable::from_terms(self.minterms.iter().copied().map(usize::from)).unwrap_or_default()
    }
}

impl Display for Analysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} = {}", self.label, self.expression)?;
        writeln!(f, "SOP: {}", self.sop)?;
        writeln!(f, "POS: {}", self.pos)?;
        write!(f, "minterms: {:?}", self.minterms)
    }
}

/// Minterms of one channel of a combined compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelAnalysis {
    pub label: String,
    pub expression: String,
    /// Whether the expression parsed. Channels that did not parse have no
    /// minterms and no part in the netlist.
    pub valid: bool,
    pub minterms: Vec<u8>,
}

/// Several outputs compiled into one shared netlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinedAnalysis {
    pub channels: Vec<ChannelAnalysis>,
    pub netlist: Netlist,
}

impl Display for CombinedAnalysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (idx, channel) in self.channels.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            if channel.valid {
                write!(f, "{}: {:?}", channel.label, channel.minterms)?;
            } else {
                write!(f, "{}: invalid expression '{}'", channel.label, channel.expression)?;
            }
        }
        Ok(())
    }
}
