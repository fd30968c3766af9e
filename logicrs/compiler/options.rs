use bon::Builder;

use crate::minimizer::CoverStrategy;

/// Default JSON budget of a single-output netlist, in bytes.
pub const NETLIST_CAPACITY: usize = 8192;

/// Default JSON budget of a combined netlist, in bytes.
pub const COMBINED_NETLIST_CAPACITY: usize = 65536;

#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct CompileOptions {
    #[builder(default = CoverStrategy::AllPrimes)]
    pub cover: CoverStrategy,

    #[builder(default = NETLIST_CAPACITY)]
    pub netlist_capacity: usize,

    #[builder(default = COMBINED_NETLIST_CAPACITY)]
    pub combined_netlist_capacity: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions::builder().build()
    }
}
