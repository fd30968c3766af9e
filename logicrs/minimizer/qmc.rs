use tracing::{debug, instrument};

use crate::error::MinimizeError;
use crate::minimizer::{Implicant, ImplicantList, TruthTable};

/// Merge every pair of equal-mask implicants that differ in one bit. Both
/// inputs of a merge are flagged as used.
fn combine_pass(current: &mut ImplicantList) -> Result<ImplicantList, MinimizeError> {
    let mut next = ImplicantList::new();
    current.clear_used();

    let implicants = current.as_mut_slice();
    for fst in 0..implicants.len() {
        for snd in fst + 1..implicants.len() {
            let Some(combined) = implicants[fst].combine(&implicants[snd]) else {
                continue;
            };

            implicants[fst].used = true;
            implicants[snd].used = true;
            next.insert(combined)?;
        }
    }

    Ok(next)
}

/// Find every prime implicant of the function whose terms are in `table`.
///
/// Returns the complete set of primes in the order they were discovered,
/// not a minimum cover; see [`crate::minimizer::select_cover`] for that.
///
/// # Errors
/// Returns [`MinimizeError::CapacityExceeded`] if a pass produces more
/// implicants than [`crate::minimizer::MAX_IMPLICANTS`].
#[instrument(skip_all, fields(terms = table.len()))]
pub fn find_prime_implicants(table: &TruthTable) -> Result<ImplicantList, MinimizeError> {
    let mut current = ImplicantList::new();
    for term in table.iter() {
        current.insert(Implicant::minterm(term))?;
    }

    let mut primes = ImplicantList::new();
    let mut pass = 0;
    loop {
        let next = combine_pass(&mut current)?;

        for implicant in current.iter().filter(|implicant| !implicant.used) {
            primes.insert(Implicant::new(implicant.value(), implicant.mask()))?;
        }

        debug!(
            pass,
            current = current.len(),
            combined = next.len(),
            primes = primes.len(),
            "finished combination pass"
        );

        if next.is_empty() {
            break;
        }
        current = next;
        pass += 1;
    }

    Ok(primes)
}
