use std::hash::{Hash, Hasher};

use rustc_hash::FxHashSet;

use crate::error::MinimizeError;
use crate::literal::{Literal, Polarity, Variable, VariableIdx, MAX_VARIABLES};

/// Mask with every input eliminated.
pub const FULL_MASK: u8 = 0b11_1111;

/// Upper bound on implicants kept in one list. Six inputs never come close
/// to it; reaching it means the input was not a 6-input function.
pub const MAX_IMPLICANTS: usize = 512;

/// A cube of the 6-dimensional input space. Bits of `value` are fixed where
/// `mask` is 0 and eliminated where `mask` is 1.
///
/// Two implicants are equal when both `value` and `mask` match; the
/// algorithm flags do not take part in comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Implicant {
    value: u8,
    mask: u8,
    pub(crate) used: bool,
    pub(crate) essential: bool,
}

impl Implicant {
    /// Create a new implicant. Bits outside of the six inputs are dropped
    /// and value bits under the mask are cleared.
    #[must_use]
    pub fn new(value: u8, mask: u8) -> Self {
        let mask = mask & FULL_MASK;
        Implicant {
            value: value & FULL_MASK & !mask,
            mask,
            used: false,
            essential: false,
        }
    }

    /// Implicant covering exactly one input combination.
    #[must_use]
    pub fn minterm(term: u8) -> Self {
        Implicant::new(term, 0)
    }

    #[must_use]
    pub fn value(&self) -> u8 {
        self.value
    }

    #[must_use]
    pub fn mask(&self) -> u8 {
        self.mask
    }

    /// Whether the implicant is the only cover of some term. Computed by
    /// [`crate::minimizer::mark_essential`].
    #[must_use]
    pub fn is_essential(&self) -> bool {
        self.essential
    }

    /// Every input is eliminated: the implicant covers the whole domain.
    #[must_use]
    pub fn is_tautology(&self) -> bool {
        self.mask == FULL_MASK
    }

    /// Merge two implicants with equal masks whose values differ in exactly
    /// one bit. The differing bit becomes eliminated.
    #[must_use]
    pub fn combine(&self, other: &Implicant) -> Option<Implicant> {
        if self.mask != other.mask {
            return None;
        }

        let diff = self.value ^ other.value;
        if diff.is_power_of_two() {
            Some(Implicant::new(self.value & !diff, self.mask | diff))
        } else {
            None
        }
    }

    /// Check whether the input combination `term` lies inside the cube.
    #[must_use]
    pub fn covers(&self, term: u8) -> bool {
        term & FULL_MASK & !self.mask == self.value
    }

    /// Literals of the product term, from `A` to `F`. A value bit of 1
    /// gives a positive literal.
    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        (0..MAX_VARIABLES)
            .filter(|bit| (self.mask >> bit) & 1 == 0)
            .map(|bit| {
                Literal::new(
                    Polarity::from((self.value >> bit) & 1 == 1),
                    Variable::from_index(VariableIdx(bit)),
                )
            })
    }

    /// Number of inputs that are not eliminated.
    #[must_use]
    pub fn literal_count(&self) -> u32 {
        MAX_VARIABLES - self.mask.count_ones()
    }
}

impl PartialEq for Implicant {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.mask == other.mask
    }
}

impl Eq for Implicant {}

impl Hash for Implicant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
        self.mask.hash(state);
    }
}

/// Ordered, duplicate-free list of implicants.
#[derive(Debug, Clone, Default)]
pub struct ImplicantList {
    implicants: Vec<Implicant>,
    seen: FxHashSet<Implicant>,
}

impl ImplicantList {
    #[must_use]
    pub fn new() -> Self {
        ImplicantList::default()
    }

    /// Append an implicant unless an equal one is already present. Returns
    /// whether it was appended.
    ///
    /// # Errors
    /// Returns an error if the list already holds [`MAX_IMPLICANTS`].
    pub fn insert(&mut self, implicant: Implicant) -> Result<bool, MinimizeError> {
        if self.seen.contains(&implicant) {
            return Ok(false);
        }

        if self.implicants.len() >= MAX_IMPLICANTS {
            return Err(MinimizeError::CapacityExceeded {
                capacity: MAX_IMPLICANTS,
            });
        }

        self.seen.insert(implicant);
        self.implicants.push(implicant);
        Ok(true)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.implicants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.implicants.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Implicant> {
        self.implicants.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Implicant] {
        &self.implicants
    }

    /// Check whether any implicant covers the input combination `term`.
    #[must_use]
    pub fn covers(&self, term: u8) -> bool {
        self.implicants.iter().any(|implicant| implicant.covers(term))
    }

    /// The list describes a constant-true function.
    #[must_use]
    pub fn is_tautology(&self) -> bool {
        self.implicants.iter().any(Implicant::is_tautology)
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Implicant] {
        &mut self.implicants
    }

    pub(crate) fn clear_used(&mut self) {
        for implicant in &mut self.implicants {
            implicant.used = false;
        }
    }

    /// Keep only the implicants for which `keep` returns true, preserving
    /// their order.
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&Implicant) -> bool) {
        let seen = &mut self.seen;
        self.implicants.retain(|implicant| {
            let kept = keep(implicant);
            if !kept {
                seen.remove(implicant);
            }
            kept
        });
    }
}

impl PartialEq for ImplicantList {
    fn eq(&self, other: &Self) -> bool {
        self.implicants == other.implicants
    }
}

impl Eq for ImplicantList {}

impl<'a> IntoIterator for &'a ImplicantList {
    type Item = &'a Implicant;
    type IntoIter = std::slice::Iter<'a, Implicant>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
