//! # Compiler for six-input boolean expressions.
//!
//! Turn textual boolean algebra such as `A(B + C')` into
//! * a minimized sum-of-products and product-of-sums form
//!   ([Quine-McCluskey](https://en.wikipedia.org/wiki/Quine%E2%80%93McCluskey_algorithm)),
//! * the minterms and maxterms of the function over the inputs `A` to `F`,
//! * a flattened gate netlist, serialized as Cytoscape-style JSON elements
//!   or as a Graphviz DOT digraph.
//!
//! The following snippet compiles `A*B + C'`, prints its minimized forms,
//! and serializes its netlist.
//!
//! ```rust
//! use logicrs::compiler::{CompileOptions, Compiler};
//!
//! let compiler = Compiler::new(CompileOptions::default());
//! let analysis = compiler.compile("X", "A*B + C'").unwrap();
//!
//! println!("SOP: {}", analysis.sop);
//! println!("POS: {}", analysis.pos);
//! println!("{} minterms", analysis.minterms.len());
//! println!("{}", analysis.netlist.to_json().unwrap());
//! ```
//!
//! ---
//!
//! The stages can be used on their own as well:
//!
//! * [`crate::parser::parse`] -- parse an expression into a [`crate::ast::LogicNode`]
//! * [`crate::minimizer::truth_table`] -- collect the minterms of a gate tree
//! * [`crate::minimizer::find_prime_implicants`] -- find all prime implicants of a truth table
//! * [`crate::minimizer::select_cover`] -- optionally reduce the primes to a cover
//! * [`crate::minimizer::format::sop`] and [`crate::minimizer::format::pos`] -- render implicants
//! * [`crate::netlist::generate`] -- draw a gate tree as a netlist
//! * [`crate::program::from_minterms`] -- recover an equation from a list of minterms
//!
//! Expression syntax, from tightest to loosest binding: postfix `'` (NOT),
//! `*` (AND) and `%` (NAND), then `+` (OR), `^` (XOR), and `$` (NOR).
//! Juxtaposition is AND, so `AB'` means `A * B'`.

pub mod ast;
pub mod compiler;
pub mod error;
/// Variables, polarities, and literals.
pub mod literal;
pub mod minimizer;
pub mod netlist;
pub mod parser;
pub mod program;
