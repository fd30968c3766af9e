use std::fmt::Display;

use bitvec::prelude::*;
use tabled::{builder::Builder, grid::config::HorizontalLine, settings::Theme};

use crate::ast::LogicNode;
use crate::error::TruthTableError;
use crate::literal::{Variable, VariableIdx, MAX_VARIABLES};

/// Number of input combinations of the six inputs.
pub const DOMAIN: usize = 1 << MAX_VARIABLES;

/// Set of input combinations (`0..63`) for which a function takes a given
/// value: minterms for High, maxterms for Low. Terms iterate in ascending
/// order and never repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruthTable {
    terms: BitArray<[u64; 1], Lsb0>,
}

impl TruthTable {
    #[must_use]
    pub fn new() -> Self {
        TruthTable {
            terms: BitArray::new([0]),
        }
    }

    /// Build a table from explicit terms.
    ///
    /// # Errors
    /// Returns an error on the first term outside of `0..63`.
    pub fn from_terms(terms: impl IntoIterator<Item = usize>) -> Result<Self, TruthTableError> {
        let mut table = TruthTable::new();
        for term in terms {
            table.insert(term)?;
        }
        Ok(table)
    }

    /// Add a term to the table. Returns whether the term was not present
    /// yet.
    ///
    /// # Errors
    /// Returns an error if the term lies outside of `0..63`.
    pub fn insert(&mut self, term: usize) -> Result<bool, TruthTableError> {
        if term >= DOMAIN {
            return Err(TruthTableError {
                term,
                limit: DOMAIN,
            });
        }

        let present = self.terms[term];
        self.terms.set(term, true);
        Ok(!present)
    }

    #[must_use]
    pub fn contains(&self, term: u8) -> bool {
        usize::from(term) < DOMAIN && self.terms[usize::from(term)]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.count_ones()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.not_any()
    }

    /// Iterate over the terms in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.terms
            .iter_ones()
            .filter_map(|term| u8::try_from(term).ok())
    }

    /// Terms missing from this table.
    #[must_use]
    pub fn complement(&self) -> TruthTable {
        let mut complement = TruthTable::new();
        for term in (0..DOMAIN).filter(|term| !self.terms[*term]) {
            complement.terms.set(term, true);
        }
        complement
    }

    /// Collect the terms into a vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.iter().collect()
    }

    fn from_tree(tree: Option<&LogicNode>, value: bool) -> TruthTable {
        let mut table = TruthTable::new();
        let Some(tree) = tree else {
            return table;
        };

        for (term, mask) in (0..DOMAIN).zip(0_u32..) {
            if tree.evaluate(mask) == value {
                table.terms.set(term, true);
            }
        }
        table
    }
}

impl Default for TruthTable {
    fn default() -> Self {
        TruthTable::new()
    }
}

/// Evaluate `tree` for every combination of the six inputs and collect the
/// combinations where it is High. An absent tree has no minterms.
#[must_use]
pub fn truth_table(tree: Option<&LogicNode>) -> TruthTable {
    TruthTable::from_tree(tree, true)
}

/// Evaluate `tree` for every combination of the six inputs and collect the
/// combinations where it is Low. An absent tree has no maxterms either.
#[must_use]
pub fn maxterms(tree: Option<&LogicNode>) -> TruthTable {
    TruthTable::from_tree(tree, false)
}

/// Draws all 64 input rows with the output column set for the terms present.
impl Display for TruthTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut builder = Builder::default();
        builder.push_record(
            (0..MAX_VARIABLES)
                .map(|idx| Variable::from_index(VariableIdx(idx)).to_string())
                .chain(std::iter::once("out".to_owned())),
        );

        for row in 0..DOMAIN {
            builder.push_record(
                (0..MAX_VARIABLES)
                    .map(|bit| if (row >> bit) & 1 == 1 { "1" } else { "0" })
                    .chain(std::iter::once(if self.terms[row] { "1" } else { "0" })),
            );
        }

        let mut style = Theme::default();
        style.insert_horizontal_line(1, HorizontalLine::full('-', '-', ' ', ' '));
        let output = builder.build().with(style).to_string();
        write!(f, "{output}")
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{maxterms, truth_table, TruthTable, DOMAIN};
    use crate::ast::LogicNode;
    use crate::error::TruthTableError;

    #[test]
    fn inserts_deduplicate() {
        let mut table = TruthTable::new();
        assert_eq!(table.insert(5), Ok(true));
        assert_eq!(table.insert(5), Ok(false));
        assert_eq!(table.insert(1), Ok(true));
        assert_eq!(table.to_vec(), vec![1, 5]);
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.insert(64),
            Err(TruthTableError {
                term: 64,
                limit: DOMAIN
            })
        );
    }

    #[test]
    fn minterms_span_all_six_inputs() {
        let tree = LogicNode::var('A') & LogicNode::var('B');
        let minterms = truth_table(Some(&tree));
        // A and B set, C..F free.
        assert_eq!(minterms.len(), 16);
        assert!(minterms.iter().all(|term| term & 0b11 == 0b11));
    }

    #[test]
    fn minterms_and_maxterms_partition_the_domain() {
        let tree = (LogicNode::var('A') ^ LogicNode::var('D')) | !LogicNode::var('F');
        let minterms = truth_table(Some(&tree));
        let maxterms = maxterms(Some(&tree));

        assert_eq!(minterms.len() + maxterms.len(), DOMAIN);
        assert!(minterms.iter().all(|term| !maxterms.contains(term)));
        assert_eq!(minterms.complement(), maxterms);
    }

    #[test]
    fn absent_tree_has_no_terms() {
        assert!(truth_table(None).is_empty());
        assert!(maxterms(None).is_empty());
    }

    #[test]
    fn renders_grid() {
        let table = TruthTable::from_terms([0, 63]).unwrap();
        let rendered = table.to_string();

        // Header plus one line per input combination.
        assert!(rendered.lines().count() > DOMAIN);
        assert!(rendered.contains("out"));
    }
}
