//! Negation.
//!
//! Negation leaves every monomial where it is, so the packed exponents are
//! copied as raw words and never decoded. The in-place form skips even
//! that copy.

use crate::coeff::CoeffRing;
use crate::context::MpolyCtx;
use crate::error::Result;
use crate::mpoly::Mpoly;

impl<C: Clone + Default> Mpoly<C> {
    /// Sets `self` to `-src`.
    ///
    /// `self` ends up with `src`'s length and width. A destination that was
    /// wider than `src` is narrowed, since its old exponents are all
    /// overwritten.
    ///
    /// # Errors
    ///
    /// `AllocationFailure` if `self` cannot be grown, or `CorruptData` if
    /// widening `self` meets a malformed exponent. `self` keeps its old
    /// terms in either case.
    pub fn neg_into<R>(&mut self, src: &Self, ring: &R, ctx: &MpolyCtx) -> Result<()>
    where
        R: CoeffRing<Elem = C>,
    {
        let len = src.len();
        self.fit_length(len, ctx)?;
        if self.bits() < src.bits() {
            self.fit_bits(src.bits(), ctx)?;
        } else {
            self.reset_bits(src.bits(), ctx)?;
        }

        for (d, s) in self.coeffs_mut().iter_mut().zip(src.coeffs()) {
            *d = ring.neg(s);
        }
        let words = src.exps(ctx);
        self.exps_mut()[..words.len()].copy_from_slice(words);

        self.set_length(len)
    }

    /// Negates every coefficient in place. Exponents are untouched.
    pub fn neg_assign<R>(&mut self, ring: &R)
    where
        R: CoeffRing<Elem = C>,
    {
        let len = self.len();
        for c in &mut self.coeffs_mut()[..len] {
            *c = ring.neg(c);
        }
    }

    /// Returns `-self` as a new polynomial.
    ///
    /// # Errors
    ///
    /// `AllocationFailure` if the result cannot be allocated.
    pub fn neg<R>(&self, ring: &R, ctx: &MpolyCtx) -> Result<Self>
    where
        R: CoeffRing<Elem = C>,
    {
        let mut out = Self::with_capacity(self.len(), self.bits(), ctx)?;
        out.neg_into(self, ring, ctx)?;
        Ok(out)
    }
}
