//! Rendering of implicant lists as two-level algebraic forms.
use crate::minimizer::{Implicant, ImplicantList};

const TRUE: &str = "1 (True)";
const FALSE: &str = "0 (False)";

fn product(implicant: &Implicant) -> String {
    implicant.literals().map(|literal| literal.to_string()).collect()
}

fn sum(implicant: &Implicant) -> String {
    let literals = implicant
        .literals()
        .map(|literal| (!literal).to_string())
        .collect::<Vec<_>>();
    format!("({})", literals.join(" + "))
}

/// Render minterm-derived implicants as a sum of products, e.g. `AB' + CD`.
///
/// No implicants is the constant `0 (False)`; a fully eliminated implicant
/// is the constant `1 (True)`.
#[must_use]
pub fn sop(implicants: &ImplicantList) -> String {
    if implicants.is_empty() {
        return FALSE.to_owned();
    }
    if implicants.is_tautology() {
        return TRUE.to_owned();
    }

    implicants
        .iter()
        .map(product)
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Render maxterm-derived implicants as a product of sums, e.g.
/// `(A + B')(C + D)`. Literal polarity is inverted with respect to
/// [`sop`].
///
/// No implicants (no maxterms) is the constant `1 (True)`; a fully
/// eliminated implicant is the constant `0 (False)`.
#[must_use]
pub fn pos(implicants: &ImplicantList) -> String {
    if implicants.is_empty() {
        return TRUE.to_owned();
    }
    if implicants.is_tautology() {
        return FALSE.to_owned();
    }

    implicants.iter().map(sum).collect()
}
