//! Coefficient rings.
//!
//! Polynomials store bare coefficient values; the ring that gives them
//! meaning is passed alongside, the same way the context is.

use std::fmt::Debug;

use num_traits::Zero;
use tessera_integers::{Integer, Nmod};

/// Arithmetic on stored coefficients.
pub trait CoeffRing {
    /// The stored coefficient type.
    type Elem: Clone + Default + PartialEq + Debug;

    /// The additive identity.
    fn zero(&self) -> Self::Elem {
        Self::Elem::default()
    }

    /// Returns true if `a` is zero.
    fn is_zero(&self, a: &Self::Elem) -> bool;

    /// Computes `-a`. Zero must map to zero.
    fn neg(&self, a: &Self::Elem) -> Self::Elem;

    /// Computes `a + b`.
    fn add(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem;
}

impl CoeffRing for Nmod {
    type Elem = u64;

    fn is_zero(&self, a: &u64) -> bool {
        *a == 0
    }

    fn neg(&self, a: &u64) -> u64 {
        Nmod::neg(self, *a)
    }

    fn add(&self, a: &u64, b: &u64) -> u64 {
        Nmod::add(self, *a, *b)
    }
}

/// The integers, for polynomials with `Integer` coefficients.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntegerRing;

impl CoeffRing for IntegerRing {
    type Elem = Integer;

    fn is_zero(&self, a: &Integer) -> bool {
        a.is_zero()
    }

    fn neg(&self, a: &Integer) -> Integer {
        -a
    }

    fn add(&self, a: &Integer, b: &Integer) -> Integer {
        a + b
    }
}
