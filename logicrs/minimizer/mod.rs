//! Quine-McCluskey minimization of functions over the inputs `A..F`.
//!
//! The pipeline is: gate tree -> [`truth_table`] (or [`maxterms`]) ->
//! [`find_prime_implicants`] -> [`select_cover`] -> [`format::sop`] (or
//! [`format::pos`] for maxterm-derived implicants).
mod cover;
pub mod format;
mod implicant;
mod qmc;
mod truth_table;

pub use crate::minimizer::cover::*;
pub use crate::minimizer::implicant::*;
pub use crate::minimizer::qmc::find_prime_implicants;
pub use crate::minimizer::truth_table::*;
