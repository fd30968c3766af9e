use clap::ValueEnum;
use tracing::debug;

use crate::minimizer::{Implicant, ImplicantList, TruthTable};

/// How prime implicants are turned into the final two-level form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum CoverStrategy {
    /// Keep every prime implicant. May contain redundant terms.
    #[default]
    AllPrimes,
    /// Keep the essential primes, then add the prime covering most of the
    /// remaining terms until the whole table is covered.
    Greedy,
}

impl std::fmt::Display for CoverStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoverStrategy::AllPrimes => write!(f, "all-primes"),
            CoverStrategy::Greedy => write!(f, "greedy"),
        }
    }
}

/// Flag every prime that is the only cover of at least one term of `table`.
pub fn mark_essential(primes: &mut ImplicantList, table: &TruthTable) {
    for implicant in primes.as_mut_slice() {
        implicant.essential = false;
    }

    for term in table.iter() {
        let mut covering = primes
            .as_slice()
            .iter()
            .enumerate()
            .filter(|(_, implicant)| implicant.covers(term))
            .map(|(idx, _)| idx);

        if let (Some(only), None) = (covering.next(), covering.next()) {
            primes.as_mut_slice()[only].essential = true;
        }
    }
}

/// Reduce the prime implicants of `table` according to `strategy`. The
/// implicants kept stay in their original order.
pub fn select_cover(primes: &mut ImplicantList, table: &TruthTable, strategy: CoverStrategy) {
    mark_essential(primes, table);
    if strategy == CoverStrategy::AllPrimes {
        return;
    }

    let mut selected = primes
        .iter()
        .map(Implicant::is_essential)
        .collect::<Vec<_>>();
    let covered = |selected: &[bool], term: u8| {
        primes
            .iter()
            .zip(selected)
            .any(|(implicant, keep)| *keep && implicant.covers(term))
    };

    loop {
        let uncovered = table
            .iter()
            .filter(|term| !covered(selected.as_slice(), *term))
            .collect::<Vec<_>>();
        if uncovered.is_empty() {
            break;
        }

        // Ties go to the earliest prime.
        let mut best: Option<(usize, usize)> = None;
        for (idx, implicant) in primes.iter().enumerate() {
            if selected[idx] {
                continue;
            }
            let gain = uncovered
                .iter()
                .filter(|term| implicant.covers(**term))
                .count();
            if gain > best.map_or(0, |(_, best_gain)| best_gain) {
                best = Some((idx, gain));
            }
        }

        // Primes of the table always cover it.
        let Some((idx, _)) = best else {
            break;
        };
        selected[idx] = true;
    }

    let before = primes.len();
    let mut keep = selected.into_iter();
    primes.retain(|_| keep.next().unwrap_or(false));
    debug!(before, after = primes.len(), "selected greedy cover");
}
