use std::fmt::Display;

/// Number of physical inputs, named `A` through `F`.
pub const MAX_VARIABLES: u32 = 6;

/// Widest input mask a variable can be read from.
const MASK_WIDTH: u32 = 32;

/// Bit position of a variable within an input mask. `A` is bit 0, `B` is
/// bit 1, and so on.
#[derive(PartialEq, Eq, Clone, PartialOrd, Ord, Debug, Copy, Hash)]
pub struct VariableIdx(pub u32);

/// Variable given by its (upper-cased) letter.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct Variable {
    letter: char,
}

impl Variable {
    /// Create a variable, normalizing the letter to uppercase.
    #[must_use]
    pub fn new(letter: char) -> Variable {
        Variable {
            letter: letter.to_ascii_uppercase(),
        }
    }

    /// Variable sitting at the given bit of the input mask.
    ///
    /// # Panics
    /// Panics if the index does not name a letter.
    #[must_use]
    pub fn from_index(idx: VariableIdx) -> Variable {
        let letter = char::from_u32(u32::from('A') + idx.0).expect("index must name a letter");
        Variable { letter }
    }

    /// Get the letter of the variable.
    #[must_use]
    pub fn letter(&self) -> char {
        self.letter
    }

    /// Bit of the input mask this variable reads, if it falls inside the
    /// mask at all. Letters before `A` (digits) have no bit.
    #[must_use]
    pub fn index(&self) -> Option<VariableIdx> {
        u32::from(self.letter)
            .checked_sub(u32::from('A'))
            .filter(|idx| *idx < MASK_WIDTH)
            .map(VariableIdx)
    }

    /// Check whether the variable is one of the device inputs `A..F`.
    #[must_use]
    pub fn is_input(&self) -> bool {
        self.index().is_some_and(|idx| idx.0 < MAX_VARIABLES)
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter)
    }
}

/// Polarity of a variable.
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Copy)]
pub enum Polarity {
    Positive,
    Negative,
}

impl From<bool> for Polarity {
    fn from(item: bool) -> Self {
        if item {
            Polarity::Positive
        } else {
            Polarity::Negative
        }
    }
}

impl std::ops::Not for Polarity {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Polarity::Positive => Polarity::Negative,
            Polarity::Negative => Polarity::Positive,
        }
    }
}

/// Literal given by [`Variable`] and [`Polarity`]. Negative literals are
/// rendered with a postfix prime, e.g. `B'`.
#[derive(Eq, PartialEq, Debug, Clone, Copy, PartialOrd, Ord)]
pub struct Literal {
    variable: Variable,
    polarity: Polarity,
}

impl Literal {
    #[must_use]
    pub fn new(polarity: Polarity, variable: Variable) -> Literal {
        Literal { variable, polarity }
    }

    #[must_use]
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    #[must_use]
    pub fn variable(&self) -> Variable {
        self.variable
    }
}

impl std::ops::Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        Literal {
            variable: self.variable,
            polarity: !self.polarity,
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prime = if self.polarity == Polarity::Positive {
            ""
        } else {
            "'"
        };
        write!(f, "{}{prime}", self.variable)
    }
}
