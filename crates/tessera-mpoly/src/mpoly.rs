//! Sparse multivariate polynomials with packed exponents.
//!
//! A polynomial owns two parallel arrays: one coefficient per term and
//! `words_per_exp(bits)` exponent words per term. Both are sized to the
//! allocated capacity; `length` marks how many leading terms are active.
//! All terms share one field width `bits`, which only grows through
//! [`Mpoly::fit_bits`].

use std::cmp::Ordering;

use log::debug;
use tessera_integers::Integer;

use crate::coeff::CoeffRing;
use crate::context::MpolyCtx;
use crate::error::{MpolyError, Result};
use crate::monomial::{self, cmp_mask, overflow_mask};
use crate::packing::{self, exp_bits_required, exp_bits_required_ui, fix_bits, words_per_exp};

/// A sparse multivariate polynomial.
///
/// Active terms are expected to be in canonical form (descending in the
/// context ordering, no zero coefficients), but only the operations that
/// say so enforce it.
#[derive(Clone, Debug)]
pub struct Mpoly<C> {
    /// Coefficients, one per allocated term.
    coeffs: Vec<C>,
    /// Packed exponents, `words_per_exp(bits)` words per allocated term.
    exps: Vec<u64>,
    /// Number of active terms.
    length: usize,
    /// Bits per exponent field.
    bits: u32,
}

/// Polynomial over Z/nZ for a word-size n.
pub type NmodMpoly = Mpoly<u64>;

/// Polynomial with arbitrary precision integer coefficients.
pub type FmpzMpoly = Mpoly<Integer>;

impl<C> Default for Mpoly<C> {
    fn default() -> Self {
        Self {
            coeffs: Vec::new(),
            exps: Vec::new(),
            length: 0,
            bits: packing::MPOLY_MIN_BITS,
        }
    }
}

impl<C: Clone + Default> Mpoly<C> {
    /// Creates the zero polynomial at the context's default width.
    #[must_use]
    pub fn new(ctx: &MpolyCtx) -> Self {
        Self {
            bits: ctx.default_bits(),
            ..Self::default()
        }
    }

    /// Creates the zero polynomial with room for `alloc` terms at `bits`.
    ///
    /// # Errors
    ///
    /// `UnsupportedBits` for a zero width or one too wide to normalize,
    /// `AllocationFailure` if the storage cannot be reserved.
    pub fn with_capacity(alloc: usize, bits: u32, ctx: &MpolyCtx) -> Result<Self> {
        if bits == 0 {
            return Err(MpolyError::UnsupportedBits(bits));
        }
        let mut poly = Self {
            bits: fix_bits(bits)?,
            ..Self::default()
        };
        poly.fit_length(alloc, ctx)?;
        Ok(poly)
    }

    /// Returns the number of active terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns true if there are no active terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns true if this is the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.is_empty()
    }

    /// Returns the number of allocated term slots.
    #[must_use]
    pub fn alloc(&self) -> usize {
        self.coeffs.len()
    }

    /// Returns the bits per exponent field.
    #[must_use]
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Returns the number of words per packed exponent at the current width.
    #[must_use]
    pub fn words_per_exp(&self, ctx: &MpolyCtx) -> usize {
        words_per_exp(self.bits, ctx)
    }

    /// Coefficients of the active terms.
    #[must_use]
    pub fn coeffs(&self) -> &[C] {
        &self.coeffs[..self.length]
    }

    /// Packed exponents of the active terms.
    #[must_use]
    pub fn exps(&self, ctx: &MpolyCtx) -> &[u64] {
        &self.exps[..self.length * self.words_per_exp(ctx)]
    }

    /// Coefficient storage for every allocated slot, for batch writes
    /// followed by [`Mpoly::set_length`].
    pub fn coeffs_mut(&mut self) -> &mut [C] {
        &mut self.coeffs
    }

    /// Exponent storage for every allocated slot, packed at [`Mpoly::bits`].
    pub fn exps_mut(&mut self) -> &mut [u64] {
        &mut self.exps
    }

    /// Grows storage to hold at least `required` terms.
    ///
    /// Capacity at least doubles when it grows. Coefficients and exponents
    /// grow together, and both are reserved before either changes, so a
    /// failed allocation leaves the polynomial as it was.
    ///
    /// # Errors
    ///
    /// `AllocationFailure` if the allocator refuses.
    pub fn fit_length(&mut self, required: usize, ctx: &MpolyCtx) -> Result<()> {
        let alloc = self.alloc();
        if required <= alloc {
            return Ok(());
        }

        let new_alloc = required.max(alloc.saturating_mul(2));
        let n = self.words_per_exp(ctx);
        self.coeffs.try_reserve_exact(new_alloc - alloc)?;
        self.exps.try_reserve_exact((new_alloc - alloc).saturating_mul(n))?;

        debug!("fit_length: {alloc} -> {new_alloc} terms ({n} words each)");
        self.coeffs.resize(new_alloc, C::default());
        self.exps.resize(new_alloc * n, 0);
        Ok(())
    }

    /// Widens exponent fields to at least `required` bits.
    ///
    /// A no-op when `required <= bits`. Otherwise the active terms are
    /// re-packed into a fresh array at `fix_bits(required)`, which replaces
    /// the old one only once every term has been converted.
    ///
    /// # Errors
    ///
    /// `UnsupportedBits` if `required` is too wide to normalize,
    /// `AllocationFailure`, or `CorruptData` if an existing exponent is
    /// malformed. The polynomial is unchanged on error.
    pub fn fit_bits(&mut self, required: u32, ctx: &MpolyCtx) -> Result<()> {
        if required <= self.bits {
            return Ok(());
        }

        let new_bits = fix_bits(required)?;
        let old_n = self.words_per_exp(ctx);
        let new_n = words_per_exp(new_bits, ctx);
        let size = self.alloc().saturating_mul(new_n);

        let mut exps = Vec::new();
        exps.try_reserve_exact(size)?;
        exps.resize(size, 0);
        for i in 0..self.length {
            packing::repack(
                &self.exps[i * old_n..(i + 1) * old_n],
                self.bits,
                &mut exps[i * new_n..(i + 1) * new_n],
                new_bits,
                ctx,
            )?;
        }

        debug!(
            "fit_bits: {} -> {} bits, {} -> {} words per exponent",
            self.bits, new_bits, old_n, new_n
        );
        self.exps = exps;
        self.bits = new_bits;
        Ok(())
    }

    /// Sets the number of active terms after a batch write.
    ///
    /// Canonical form is not checked.
    ///
    /// # Errors
    ///
    /// `LengthExceedsCapacity` if `new_length` is beyond the allocation.
    pub fn set_length(&mut self, new_length: usize) -> Result<()> {
        if new_length > self.alloc() {
            return Err(MpolyError::LengthExceedsCapacity {
                length: new_length,
                alloc: self.alloc(),
            });
        }
        self.length = new_length;
        Ok(())
    }

    /// Keeps only the first `new_length` terms. Storage is retained.
    pub fn truncate(&mut self, new_length: usize) {
        self.length = self.length.min(new_length);
    }

    /// Replaces the exponent array with a zeroed one at `bits`, dropping
    /// the exponents of every term. Used when all terms are about to be
    /// overwritten.
    pub(crate) fn reset_bits(&mut self, bits: u32, ctx: &MpolyCtx) -> Result<()> {
        if bits == self.bits {
            return Ok(());
        }
        let size = self.alloc().saturating_mul(words_per_exp(bits, ctx));
        let mut exps = Vec::new();
        exps.try_reserve_exact(size)?;
        exps.resize(size, 0);
        self.exps = exps;
        self.bits = bits;
        Ok(())
    }

    /// Converts a caller's term index, rejecting negative and
    /// out-of-range values alike.
    pub(crate) fn check_index(&self, index: i64) -> Result<usize> {
        usize::try_from(index)
            .ok()
            .filter(|&i| i < self.length)
            .ok_or(MpolyError::IndexOutOfRange {
                index,
                length: self.length,
            })
    }

    /// Returns the coefficient of term `index`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` unless `0 <= index < len()`.
    pub fn get_term_coeff(&self, index: i64) -> Result<&C> {
        let i = self.check_index(index)?;
        Ok(&self.coeffs[i])
    }

    /// Overwrites the coefficient of term `index`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` unless `0 <= index < len()`.
    pub fn set_term_coeff(&mut self, index: i64, c: C) -> Result<()> {
        let i = self.check_index(index)?;
        self.coeffs[i] = c;
        Ok(())
    }

    /// Returns the packed exponent words of term `index`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` unless `0 <= index < len()`.
    pub fn term_exp_words(&self, index: i64, ctx: &MpolyCtx) -> Result<&[u64]> {
        let i = self.check_index(index)?;
        let n = self.words_per_exp(ctx);
        Ok(&self.exps[i * n..(i + 1) * n])
    }

    /// Appends a term with word-size exponents, widening the polynomial
    /// first if the exponents need more bits.
    ///
    /// # Errors
    ///
    /// Exponent validation errors, or `AllocationFailure`.
    pub fn push_term_ui(&mut self, c: C, exps: &[u64], ctx: &MpolyCtx) -> Result<()> {
        let required = exp_bits_required_ui(exps, ctx)?;
        self.fit_bits(required, ctx)?;
        self.fit_length(self.length + 1, ctx)?;

        let n = self.words_per_exp(ctx);
        let i = self.length;
        packing::pack_ui_into(&mut self.exps[i * n..(i + 1) * n], exps, self.bits, ctx)?;
        self.coeffs[i] = c;
        self.length += 1;
        Ok(())
    }

    /// Appends a term with arbitrary precision exponents, widening the
    /// polynomial first if the exponents need more bits.
    ///
    /// # Errors
    ///
    /// Exponent validation errors, or `AllocationFailure`.
    pub fn push_term(&mut self, c: C, exps: &[Integer], ctx: &MpolyCtx) -> Result<()> {
        let required = exp_bits_required(exps, ctx)?;
        self.fit_bits(required, ctx)?;
        self.fit_length(self.length + 1, ctx)?;

        let n = self.words_per_exp(ctx);
        let i = self.length;
        packing::pack_into(&mut self.exps[i * n..(i + 1) * n], exps, self.bits, ctx)?;
        self.coeffs[i] = c;
        self.length += 1;
        Ok(())
    }

    /// Sorts the active terms into descending order.
    ///
    /// Like terms end up adjacent; see [`Mpoly::combine_like_terms`].
    ///
    /// # Errors
    ///
    /// `UnsupportedBits` or `AllocationFailure`.
    pub fn sort_terms(&mut self, ctx: &MpolyCtx) -> Result<()> {
        let n = self.words_per_exp(ctx);
        let mask = cmp_mask(self.bits, ctx)?;

        let mut perm: Vec<usize> = (0..self.length).collect();
        perm.sort_by(|&a, &b| {
            monomial::cmp(
                &self.exps[b * n..(b + 1) * n],
                &self.exps[a * n..(a + 1) * n],
                &mask,
            )
        });

        let mut coeffs = Vec::new();
        coeffs.try_reserve_exact(self.alloc())?;
        let mut exps = Vec::new();
        exps.try_reserve_exact(self.exps.len())?;
        for &i in &perm {
            coeffs.push(self.coeffs[i].clone());
            exps.extend_from_slice(&self.exps[i * n..(i + 1) * n]);
        }
        coeffs.resize(self.alloc(), C::default());
        exps.resize(self.exps.len(), 0);

        self.coeffs = coeffs;
        self.exps = exps;
        Ok(())
    }

    /// Merges adjacent terms with equal exponents and drops zero
    /// coefficients. Run [`Mpoly::sort_terms`] first.
    pub fn combine_like_terms<R>(&mut self, ring: &R, ctx: &MpolyCtx)
    where
        R: CoeffRing<Elem = C>,
    {
        let n = self.words_per_exp(ctx);
        let mut out = 0usize;
        let mut i = 0usize;
        while i < self.length {
            let mut c = self.coeffs[i].clone();
            let mut j = i + 1;
            while j < self.length && self.exps[j * n..(j + 1) * n] == self.exps[i * n..(i + 1) * n] {
                c = ring.add(&c, &self.coeffs[j]);
                j += 1;
            }
            if !ring.is_zero(&c) {
                self.coeffs[out] = c;
                self.exps.copy_within(i * n..(i + 1) * n, out * n);
                out += 1;
            }
            i = j;
        }
        self.length = out;
    }

    /// Checks canonical form: strictly descending exponents, no zero
    /// coefficients, no guard bits set.
    #[must_use]
    pub fn is_canonical<R>(&self, ring: &R, ctx: &MpolyCtx) -> bool
    where
        R: CoeffRing<Elem = C>,
    {
        let (Ok(cmpmask), Ok(guards)) = (cmp_mask(self.bits, ctx), overflow_mask(self.bits, ctx)) else {
            return false;
        };
        let n = self.words_per_exp(ctx);
        let exps = self.exps(ctx);

        if self.coeffs().iter().any(|c| ring.is_zero(c)) {
            return false;
        }
        if exps.chunks_exact(n).any(|e| monomial::overflowed(e, &guards)) {
            return false;
        }
        exps.chunks_exact(n)
            .zip(exps.chunks_exact(n).skip(1))
            .all(|(a, b)| monomial::cmp(a, b, &cmpmask) == Ordering::Greater)
    }

    /// Returns the largest total degree over the active terms, or `None`
    /// for the zero polynomial.
    ///
    /// # Errors
    ///
    /// `CorruptData` if an exponent is malformed.
    pub fn total_degree(&self, ctx: &MpolyCtx) -> Result<Option<Integer>> {
        let n = self.words_per_exp(ctx);
        let mut max: Option<Integer> = None;
        for e in self.exps(ctx).chunks_exact(n) {
            let degree: Integer = packing::unpack(e, self.bits, ctx)?.into_iter().sum();
            if max.as_ref().map_or(true, |m| degree > *m) {
                max = Some(degree);
            }
        }
        Ok(max)
    }
}

impl<C: Clone + Default + PartialEq> Mpoly<C> {
    /// Compares active terms, looking through differences in `bits`.
    #[must_use]
    pub fn equal(&self, other: &Self, ctx: &MpolyCtx) -> bool {
        if self.length != other.length || self.coeffs() != other.coeffs() {
            return false;
        }
        if self.bits == other.bits {
            return self.exps(ctx) == other.exps(ctx);
        }

        let (n1, n2) = (self.words_per_exp(ctx), other.words_per_exp(ctx));
        self.exps(ctx)
            .chunks_exact(n1)
            .zip(other.exps(ctx).chunks_exact(n2))
            .all(|(a, b)| {
                match (packing::unpack(a, self.bits, ctx), packing::unpack(b, other.bits, ctx)) {
                    (Ok(x), Ok(y)) => x == y,
                    _ => false,
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coeff::IntegerRing;
    use crate::ordering::MonomialOrder;
    use tessera_integers::Nmod;

    fn ctx3() -> MpolyCtx {
        MpolyCtx::new(3, MonomialOrder::Degrevlex)
    }

    #[test]
    fn test_new_is_zero() {
        let ctx = ctx3();
        let p = NmodMpoly::new(&ctx);
        assert!(p.is_zero());
        assert_eq!(p.alloc(), 0);
        assert_eq!(p.bits(), ctx.default_bits());
    }

    #[test]
    fn test_fit_length_grows_both_arrays() {
        let ctx = ctx3();
        let mut p = NmodMpoly::new(&ctx);
        p.fit_length(3, &ctx).unwrap();
        assert_eq!(p.alloc(), 3);
        assert_eq!(p.exps_mut().len(), 3 * p.words_per_exp(&ctx));

        p.push_term_ui(5, &[1, 2, 3], &ctx).unwrap();
        p.fit_length(4, &ctx).unwrap();
        assert_eq!(p.alloc(), 6);
        assert_eq!(p.coeffs(), &[5]);
        assert_eq!(p.get_term_exp_ui(0, &ctx).unwrap(), vec![1, 2, 3]);

        // Smaller requests do nothing
        p.fit_length(2, &ctx).unwrap();
        assert_eq!(p.alloc(), 6);
    }

    #[test]
    fn test_fit_bits_repacks_terms() {
        let ctx = ctx3();
        let mut p = NmodMpoly::new(&ctx);
        p.push_term_ui(1, &[3, 0, 1], &ctx).unwrap();
        p.push_term_ui(2, &[0, 1, 1], &ctx).unwrap();
        assert_eq!(p.bits(), 8);

        p.fit_bits(20, &ctx).unwrap();
        assert_eq!(p.bits(), 20);
        assert_eq!(p.words_per_exp(&ctx), 2);
        assert_eq!(p.get_term_exp_ui(0, &ctx).unwrap(), vec![3, 0, 1]);
        assert_eq!(p.get_term_exp_ui(1, &ctx).unwrap(), vec![0, 1, 1]);

        p.fit_bits(100, &ctx).unwrap();
        assert_eq!(p.bits(), 128);
        assert_eq!(p.get_term_exp_ui(1, &ctx).unwrap(), vec![0, 1, 1]);
    }

    #[test]
    fn test_fit_bits_is_atomic() {
        let ctx = MpolyCtx::new(2, MonomialOrder::Lex);
        let mut p = NmodMpoly::new(&ctx);
        p.push_term_ui(1, &[1, 1], &ctx).unwrap();
        // Corrupt the stored exponent by setting a guard bit
        p.exps_mut()[0] |= 0x80;
        let before = p.clone();

        assert!(matches!(p.fit_bits(16, &ctx), Err(MpolyError::CorruptData(_))));
        assert_eq!(p.bits(), before.bits());
        assert_eq!(p.exps(&ctx), before.exps(&ctx));
    }

    #[test]
    fn test_fit_bits_rejects_unrepresentable_width() {
        let ctx = ctx3();
        let mut empty = NmodMpoly::new(&ctx);
        assert_eq!(
            empty.fit_bits(u32::MAX, &ctx),
            Err(MpolyError::UnsupportedBits(u32::MAX))
        );
        assert_eq!(empty.bits(), ctx.default_bits());

        let mut p = NmodMpoly::new(&ctx);
        p.push_term_ui(4, &[1, 2, 3], &ctx).unwrap();
        let before = p.clone();
        assert_eq!(p.fit_bits(u32::MAX, &ctx), Err(MpolyError::UnsupportedBits(u32::MAX)));
        assert_eq!(p.bits(), before.bits());
        assert_eq!(p.exps(&ctx), before.exps(&ctx));

        assert!(matches!(
            NmodMpoly::with_capacity(1, u32::MAX, &ctx),
            Err(MpolyError::UnsupportedBits(u32::MAX))
        ));
    }

    #[test]
    fn test_fit_length_failure_leaves_poly_unchanged() {
        let ctx = ctx3();
        let mut p = NmodMpoly::new(&ctx);
        p.push_term_ui(4, &[1, 2, 3], &ctx).unwrap();
        p.push_term_ui(9, &[0, 0, 1], &ctx).unwrap();
        let before = p.clone();

        assert!(matches!(
            p.fit_length(usize::MAX, &ctx),
            Err(MpolyError::AllocationFailure(_))
        ));
        assert!(p.equal(&before, &ctx));
        assert_eq!(p.alloc(), before.alloc());
        assert_eq!(p.bits(), before.bits());
        assert_eq!(p.coeffs(), before.coeffs());

        assert!(matches!(
            NmodMpoly::with_capacity(usize::MAX, 8, &ctx),
            Err(MpolyError::AllocationFailure(_))
        ));
    }

    #[test]
    fn test_push_term_promotes() {
        let ctx = MpolyCtx::new(2, MonomialOrder::Lex);
        let mut p = NmodMpoly::new(&ctx);
        p.push_term_ui(7, &[1000, 0], &ctx).unwrap();
        assert_eq!(p.bits(), 11);
        p.push_term_ui(9, &[u64::MAX, 0], &ctx).unwrap();
        assert_eq!(p.bits(), 128);
        assert_eq!(p.get_term_exp_ui(0, &ctx).unwrap(), vec![1000, 0]);
        assert_eq!(p.get_term_exp_ui(1, &ctx).unwrap(), vec![u64::MAX, 0]);
    }

    #[test]
    fn test_set_length() {
        let ctx = ctx3();
        let mut p = NmodMpoly::with_capacity(2, 8, &ctx).unwrap();
        let n = p.words_per_exp(&ctx);
        let e0 = packing::pack_ui(&[2, 0, 0], 8, &ctx).unwrap();
        let e1 = packing::pack_ui(&[0, 1, 0], 8, &ctx).unwrap();
        p.coeffs_mut()[..2].copy_from_slice(&[4, 6]);
        p.exps_mut()[..n].copy_from_slice(&e0);
        p.exps_mut()[n..2 * n].copy_from_slice(&e1);
        p.set_length(2).unwrap();

        assert_eq!(p.len(), 2);
        assert!(p.is_canonical(&Nmod::new(7), &ctx));
        assert_eq!(
            p.set_length(3),
            Err(MpolyError::LengthExceedsCapacity { length: 3, alloc: 2 })
        );
        assert_eq!(p.len(), 2);

        p.truncate(1);
        assert_eq!(p.len(), 1);
        assert_eq!(p.alloc(), 2);
    }

    #[test]
    fn test_sort_and_combine() {
        let ctx = MpolyCtx::new(2, MonomialOrder::Deglex);
        let ring = Nmod::new(5);
        let mut p = NmodMpoly::new(&ctx);
        p.push_term_ui(1, &[0, 1], &ctx).unwrap();
        p.push_term_ui(2, &[2, 0], &ctx).unwrap();
        p.push_term_ui(3, &[0, 1], &ctx).unwrap();
        p.push_term_ui(4, &[1, 1], &ctx).unwrap();
        p.push_term_ui(1, &[1, 1], &ctx).unwrap();
        assert!(!p.is_canonical(&ring, &ctx));

        p.sort_terms(&ctx).unwrap();
        p.combine_like_terms(&ring, &ctx);

        // x^2*2 + y*4; the x*y terms cancel mod 5
        assert_eq!(p.len(), 2);
        assert_eq!(p.coeffs(), &[2, 4]);
        assert_eq!(p.get_term_exp_ui(0, &ctx).unwrap(), vec![2, 0]);
        assert_eq!(p.get_term_exp_ui(1, &ctx).unwrap(), vec![0, 1]);
        assert!(p.is_canonical(&ring, &ctx));
    }

    #[test]
    fn test_term_coeff_access() {
        let ctx = ctx3();
        let mut p = FmpzMpoly::new(&ctx);
        p.push_term(Integer::new(-3), &[Integer::new(1), Integer::new(0), Integer::new(0)], &ctx)
            .unwrap();
        assert_eq!(p.get_term_coeff(0), Ok(&Integer::new(-3)));
        p.set_term_coeff(0, Integer::new(8)).unwrap();
        assert_eq!(p.coeffs(), &[Integer::new(8)]);
        assert_eq!(
            p.get_term_coeff(-1),
            Err(MpolyError::IndexOutOfRange { index: -1, length: 1 })
        );
        assert!(p.is_canonical(&IntegerRing, &ctx));
    }

    #[test]
    fn test_equal_across_bits() {
        let ctx = ctx3();
        let mut a = NmodMpoly::new(&ctx);
        a.push_term_ui(1, &[1, 2, 3], &ctx).unwrap();
        let mut b = a.clone();
        b.fit_bits(64, &ctx).unwrap();
        assert!(a.equal(&b, &ctx));

        b.set_term_coeff(0, 2).unwrap();
        assert!(!a.equal(&b, &ctx));
    }

    #[test]
    fn test_total_degree() {
        let ctx = ctx3();
        let mut p = NmodMpoly::new(&ctx);
        assert_eq!(p.total_degree(&ctx), Ok(None));
        p.push_term_ui(1, &[1, 2, 3], &ctx).unwrap();
        p.push_term_ui(1, &[4, 0, 0], &ctx).unwrap();
        assert_eq!(p.total_degree(&ctx), Ok(Some(Integer::new(6))));
    }
}
