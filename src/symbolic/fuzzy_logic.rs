//! Three-valued logic for assumption queries.
//!
//! Every structural predicate on an expression (`is_integer`, `is_even`, `is_real`, ...)
//! answers `True`, `False` or `Unknown`. Collapsing `Unknown` into `False` changes results
//! (an even multiple of pi with unknown parity is not the same as an odd one), so the
//! evaluators keep the three states apart all the way through.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fuzzy {
    True,
    False,
    Unknown,
}

impl Fuzzy {
    pub fn from_bool(b: bool) -> Fuzzy {
        if b { Fuzzy::True } else { Fuzzy::False }
    }

    /// `Some(bool)` when the value is known.
    pub fn known(self) -> Option<bool> {
        match self {
            Fuzzy::True => Some(true),
            Fuzzy::False => Some(false),
            Fuzzy::Unknown => None,
        }
    }

    pub fn is_true(self) -> bool {
        self == Fuzzy::True
    }

    pub fn is_false(self) -> bool {
        self == Fuzzy::False
    }

    pub fn is_unknown(self) -> bool {
        self == Fuzzy::Unknown
    }

    pub fn not(self) -> Fuzzy {
        match self {
            Fuzzy::True => Fuzzy::False,
            Fuzzy::False => Fuzzy::True,
            Fuzzy::Unknown => Fuzzy::Unknown,
        }
    }

    pub fn and(self, other: Fuzzy) -> Fuzzy {
        match (self, other) {
            (Fuzzy::False, _) | (_, Fuzzy::False) => Fuzzy::False,
            (Fuzzy::True, Fuzzy::True) => Fuzzy::True,
            _ => Fuzzy::Unknown,
        }
    }

    pub fn or(self, other: Fuzzy) -> Fuzzy {
        match (self, other) {
            (Fuzzy::True, _) | (_, Fuzzy::True) => Fuzzy::True,
            (Fuzzy::False, Fuzzy::False) => Fuzzy::False,
            _ => Fuzzy::Unknown,
        }
    }
}

/// Conjunction over an iterator; `False` wins over `Unknown`.
pub fn fuzzy_and<I: IntoIterator<Item = Fuzzy>>(values: I) -> Fuzzy {
    values.into_iter().fold(Fuzzy::True, Fuzzy::and)
}

/// Disjunction over an iterator; `True` wins over `Unknown`.
pub fn fuzzy_or<I: IntoIterator<Item = Fuzzy>>(values: I) -> Fuzzy {
    values.into_iter().fold(Fuzzy::False, Fuzzy::or)
}

impl From<bool> for Fuzzy {
    fn from(b: bool) -> Self {
        Fuzzy::from_bool(b)
    }
}

impl fmt::Display for Fuzzy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Fuzzy::True => write!(f, "True"),
            Fuzzy::False => write!(f, "False"),
            Fuzzy::Unknown => write!(f, "None"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_or_tables() {
        assert_eq!(Fuzzy::True.and(Fuzzy::Unknown), Fuzzy::Unknown);
        assert_eq!(Fuzzy::False.and(Fuzzy::Unknown), Fuzzy::False);
        assert_eq!(Fuzzy::True.or(Fuzzy::Unknown), Fuzzy::True);
        assert_eq!(Fuzzy::False.or(Fuzzy::Unknown), Fuzzy::Unknown);
        assert_eq!(Fuzzy::Unknown.not(), Fuzzy::Unknown);
    }

    #[test]
    fn test_fold_helpers() {
        assert_eq!(fuzzy_and(vec![Fuzzy::True, Fuzzy::True]), Fuzzy::True);
        assert_eq!(fuzzy_and(vec![Fuzzy::Unknown, Fuzzy::False]), Fuzzy::False);
        assert_eq!(fuzzy_or(vec![Fuzzy::Unknown, Fuzzy::False]), Fuzzy::Unknown);
        assert_eq!(fuzzy_and(Vec::<Fuzzy>::new()), Fuzzy::True);
    }
}
