//! Word-level operations on packed exponent vectors.
//!
//! Packing exists so that these run over a handful of machine words
//! instead of per-variable loops over big integers. Comparison XORs each
//! word with a mask that flips the fields compared in reverse, then
//! compares from the most significant word down. Addition is a plain
//! multi-word add; a carry out of any field lands in that field's guard
//! bit, where [`overflowed`] finds it.

use std::cmp::Ordering;

use crate::context::MpolyCtx;
use crate::error::{MpolyError, Result};
use crate::packing::{words_per_exp, Layout};

/// Per-word XOR mask realising the context ordering at `bits` per field.
///
/// All zero except under degrevlex, where every variable field is flipped.
///
/// # Errors
///
/// Returns `UnsupportedBits` for a width the codec cannot represent.
pub fn cmp_mask(bits: u32, ctx: &MpolyCtx) -> Result<Vec<u64>> {
    let layout = Layout::new(bits)?;
    let n = words_per_exp(bits, ctx);
    let mut mask = vec![0u64; n];
    if ctx.ord().is_reversed() {
        for (w, word) in mask.iter_mut().enumerate() {
            for k in 0..ctx.nvars() {
                *word |= layout.field_mask_in_word(k, w);
            }
        }
    }
    Ok(mask)
}

/// Per-word mask of every field's guard bit.
///
/// # Errors
///
/// Returns `UnsupportedBits` for a width the codec cannot represent.
pub fn overflow_mask(bits: u32, ctx: &MpolyCtx) -> Result<Vec<u64>> {
    let layout = Layout::new(bits)?;
    let mut mask = vec![0u64; words_per_exp(bits, ctx)];
    for k in 0..ctx.nfields() {
        let (w, shift) = layout.guard_position(k);
        mask[w] |= 1u64 << shift;
    }
    Ok(mask)
}

/// Compares two packed vectors of equal width under `cmpmask`.
#[must_use]
pub fn cmp(a: &[u64], b: &[u64], cmpmask: &[u64]) -> Ordering {
    debug_assert_eq!(a.len(), b.len());
    debug_assert_eq!(a.len(), cmpmask.len());
    for i in (0..a.len()).rev() {
        match (a[i] ^ cmpmask[i]).cmp(&(b[i] ^ cmpmask[i])) {
            Ordering::Equal => continue,
            ord => return ord,
        }
    }
    Ordering::Equal
}

/// Writes `a + b` into `out`, carrying across words.
///
/// The result is meaningful only if no guard bit ends up set.
pub fn add(out: &mut [u64], a: &[u64], b: &[u64]) {
    debug_assert_eq!(out.len(), a.len());
    debug_assert_eq!(out.len(), b.len());
    let mut carry = false;
    for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
        let (s, c1) = x.overflowing_add(y);
        let (s, c2) = s.overflowing_add(u64::from(carry));
        *o = s;
        carry = c1 || c2;
    }
}

/// Returns true if any guard bit selected by `mask` is set.
#[must_use]
pub fn overflowed(words: &[u64], mask: &[u64]) -> bool {
    words.iter().zip(mask).any(|(&w, &m)| w & m != 0)
}

/// Multiplies two monomials: adds their packed vectors and checks the
/// guard bits.
///
/// # Errors
///
/// Returns `ExponentOverflow` if some field of the product does not fit
/// in `bits - 1` bits. The caller decides whether to widen and retry.
pub fn mul_checked(a: &[u64], b: &[u64], bits: u32, ctx: &MpolyCtx) -> Result<Vec<u64>> {
    let mask = overflow_mask(bits, ctx)?;
    let mut out = vec![0u64; a.len()];
    add(&mut out, a, b);
    if overflowed(&out, &mask) {
        return Err(MpolyError::ExponentOverflow { bits });
    }
    Ok(out)
}
