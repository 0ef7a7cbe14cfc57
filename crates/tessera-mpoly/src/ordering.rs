//! Monomial orderings.
//!
//! The ordering decides how exponent fields are laid out inside packed
//! words, so that comparing two packed vectors word by word (after the
//! comparison mask is applied) agrees with comparing them as exponent
//! vectors.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A monomial ordering.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonomialOrder {
    /// Lexicographic order with x_0 > x_1 > ... > x_{n-1}.
    #[default]
    Lex,

    /// Graded lexicographic order.
    ///
    /// First compares total degree, then uses lex as tiebreaker.
    Deglex,

    /// Graded reverse lexicographic order.
    ///
    /// First compares total degree; on a tie the monomial with the smaller
    /// exponent in the last differing variable is larger.
    Degrevlex,
}

impl MonomialOrder {
    /// Returns true if the ordering carries a synthetic total-degree field.
    #[must_use]
    pub const fn is_graded(&self) -> bool {
        matches!(self, MonomialOrder::Deglex | MonomialOrder::Degrevlex)
    }

    /// Returns true if variable fields are compared in reverse.
    #[must_use]
    pub const fn is_reversed(&self) -> bool {
        matches!(self, MonomialOrder::Degrevlex)
    }

    /// Compares two unpacked exponent vectors of equal length.
    ///
    /// This is the reference comparison; packed comparison must agree with it.
    #[must_use]
    pub fn compare_unpacked<T: Ord + Clone + std::iter::Sum>(&self, a: &[T], b: &[T]) -> Ordering {
        debug_assert_eq!(a.len(), b.len());
        if self.is_graded() {
            let da: T = a.iter().cloned().sum();
            let db: T = b.iter().cloned().sum();
            match da.cmp(&db) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }

        if self.is_reversed() {
            for (x, y) in a.iter().zip(b).rev() {
                match y.cmp(x) {
                    Ordering::Equal => continue,
                    ord => return ord,
                }
            }
            Ordering::Equal
        } else {
            a.cmp(b)
        }
    }

    /// Returns a short name for the ordering.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            MonomialOrder::Lex => "lex",
            MonomialOrder::Deglex => "deglex",
            MonomialOrder::Degrevlex => "degrevlex",
        }
    }
}

impl std::fmt::Display for MonomialOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
