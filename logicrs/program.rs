//! Direct programming of a function from an explicit list of minterms, the
//! inverse of compiling an expression.
use tracing::{debug, instrument, warn};

use crate::error::MinimizeError;
use crate::minimizer::{find_prime_implicants, format, select_cover, CoverStrategy, TruthTable};

/// Parse a comma-separated list of minterms such as `"0, 15, 63"`.
///
/// Empty, non-numeric, and out-of-range tokens are skipped with a warning;
/// repeated terms collapse into one.
#[must_use]
pub fn parse_minterm_csv(csv: &str) -> TruthTable {
    let mut table = TruthTable::new();

    for (position, token) in csv.split(',').enumerate() {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        match token.parse::<usize>() {
            Ok(term) => {
                if let Err(err) = table.insert(term) {
                    warn!(position, token, %err, "skipping minterm");
                }
            }
            Err(err) => warn!(position, token, %err, "skipping malformed minterm"),
        }
    }

    table
}

/// Minimize the function given by its minterms and render it as a sum of
/// products.
///
/// # Errors
/// Returns an error if the minimizer runs out of implicant capacity.
#[instrument(level = "debug", err)]
pub fn from_minterms(csv: &str, strategy: CoverStrategy) -> Result<String, MinimizeError> {
    let table = parse_minterm_csv(csv);
    let mut primes = find_prime_implicants(&table)?;
    select_cover(&mut primes, &table, strategy);

    let sop = format::sop(&primes);
    debug!(minterms = table.len(), %sop, "recovered equation");
    Ok(sop)
}
