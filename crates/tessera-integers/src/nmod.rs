//! Word-size modular arithmetic.
//!
//! `Nmod` is a runtime modulus context for residues stored as bare `u64`
//! values in `[0, n)`. Polynomials keep their coefficients as plain words
//! and pass the context to every arithmetic call.

use std::fmt;

/// A word-size modulus `n` with `1 <= n < 2^64`.
///
/// Residues are canonical: every value handed to or returned from the
/// arithmetic methods lies in `[0, n)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nmod {
    n: u64,
}

impl Nmod {
    /// Creates a modulus context.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    #[must_use]
    pub fn new(n: u64) -> Self {
        assert!(n != 0, "modulus cannot be zero");
        Self { n }
    }

    /// Returns the modulus.
    #[must_use]
    pub const fn modulus(&self) -> u64 {
        self.n
    }

    /// Reduces an arbitrary word into `[0, n)`.
    #[must_use]
    pub const fn reduce(&self, a: u64) -> u64 {
        a % self.n
    }

    /// Reduces a signed value into `[0, n)`.
    #[must_use]
    pub fn reduce_signed(&self, a: i64) -> u64 {
        let r = self.reduce(a.unsigned_abs());
        if a < 0 {
            self.neg(r)
        } else {
            r
        }
    }

    /// Computes `-a mod n`. Zero is a fixed point.
    #[must_use]
    pub const fn neg(&self, a: u64) -> u64 {
        if a == 0 {
            0
        } else {
            self.n - a
        }
    }

    /// Computes `a + b mod n`.
    #[must_use]
    pub const fn add(&self, a: u64, b: u64) -> u64 {
        // a, b < n, so a + b can only wrap when n > 2^63
        let (s, carry) = a.overflowing_add(b);
        if carry || s >= self.n {
            s.wrapping_sub(self.n)
        } else {
            s
        }
    }

    /// Computes `a - b mod n`.
    #[must_use]
    pub const fn sub(&self, a: u64, b: u64) -> u64 {
        if a >= b {
            a - b
        } else {
            self.n - (b - a)
        }
    }

    /// Computes `a * b mod n`.
    #[must_use]
    pub const fn mul(&self, a: u64, b: u64) -> u64 {
        ((a as u128 * b as u128) % self.n as u128) as u64
    }
}

impl fmt::Debug for Nmod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nmod({})", self.n)
    }
}

impl fmt::Display for Nmod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Z/{}Z", self.n)
    }
}
