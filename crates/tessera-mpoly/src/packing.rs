//! Exponent vector packing.
//!
//! An exponent vector is stored as `words_per_exp(bits, ctx)` little-endian
//! `u64` words. For `bits <= 64` several fields share a word; wider fields
//! are a multiple of 64 bits and span whole words. The top bit of every
//! field is a guard bit: packing never sets it, so a carry out of a field
//! during packed addition shows up there instead of corrupting the
//! neighbouring field.
//!
//! Field `k` holds the value laid out by [`MpolyCtx::field_of_var`], with
//! the total degree in the most significant field for graded orderings.

use tessera_integers::Integer;

use crate::context::MpolyCtx;
use crate::error::{MpolyError, Result};

/// Bits in a machine word.
pub const WORD_BITS: u32 = u64::BITS;

/// Smallest field width handed out by [`fix_bits`].
pub const MPOLY_MIN_BITS: u32 = 8;

/// How fields sit inside words for a given width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Layout {
    /// `bits <= 64`: several fields per word.
    Packed { bits: u32, fields_per_word: usize },
    /// `bits > 64`: each field spans `words_per_field` words.
    Multi { words_per_field: usize },
}

impl Layout {
    pub(crate) fn new(bits: u32) -> Result<Self> {
        match bits {
            0 => Err(MpolyError::UnsupportedBits(bits)),
            1..=WORD_BITS => Ok(Layout::Packed {
                bits,
                fields_per_word: (WORD_BITS / bits) as usize,
            }),
            _ if bits % WORD_BITS == 0 => Ok(Layout::Multi {
                words_per_field: (bits / WORD_BITS) as usize,
            }),
            _ => Err(MpolyError::UnsupportedBits(bits)),
        }
    }

    /// Word index and shift of the guard bit of field `k`.
    pub(crate) fn guard_position(self, k: usize) -> (usize, u32) {
        match self {
            Layout::Packed {
                bits,
                fields_per_word,
            } => (
                k / fields_per_word,
                (k % fields_per_word) as u32 * bits + bits - 1,
            ),
            Layout::Multi { words_per_field } => ((k + 1) * words_per_field - 1, WORD_BITS - 1),
        }
    }

    /// Bit mask covering the whole of field `k` inside word `word`.
    pub(crate) fn field_mask_in_word(self, k: usize, word: usize) -> u64 {
        match self {
            Layout::Packed {
                bits,
                fields_per_word,
            } => {
                if k / fields_per_word == word {
                    field_mask(bits) << ((k % fields_per_word) as u32 * bits)
                } else {
                    0
                }
            }
            Layout::Multi { words_per_field } => {
                if word / words_per_field == k {
                    u64::MAX
                } else {
                    0
                }
            }
        }
    }
}

const fn field_mask(bits: u32) -> u64 {
    if bits >= WORD_BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Normalizes a requested field width.
///
/// Widths up to a word are raised to at least [`MPOLY_MIN_BITS`]; wider
/// ones are rounded up to a multiple of [`WORD_BITS`].
///
/// # Errors
///
/// Returns `UnsupportedBits` if rounding up does not fit in a `u32`.
pub fn fix_bits(bits: u32) -> Result<u32> {
    if bits <= WORD_BITS {
        Ok(bits.max(MPOLY_MIN_BITS))
    } else {
        bits.div_ceil(WORD_BITS)
            .checked_mul(WORD_BITS)
            .ok_or(MpolyError::UnsupportedBits(bits))
    }
}

/// Number of words one packed exponent vector occupies at `bits` per field.
///
/// Non-decreasing in `bits`. Always at least one word.
#[must_use]
pub fn words_per_exp(bits: u32, ctx: &MpolyCtx) -> usize {
    let nfields = ctx.nfields();
    let words = if bits <= WORD_BITS {
        let fields_per_word = (WORD_BITS / bits.max(1)) as usize;
        nfields.div_ceil(fields_per_word)
    } else {
        nfields * bits.div_ceil(WORD_BITS) as usize
    };
    words.max(1)
}

/// Smallest normalized width that holds `exps` with every guard bit clear.
///
/// # Errors
///
/// Returns `VariableCountMismatch` if `exps` has the wrong length.
pub fn exp_bits_required_ui(exps: &[u64], ctx: &MpolyCtx) -> Result<u32> {
    check_len(exps.len(), ctx)?;
    let max_var = exps.iter().copied().max().unwrap_or(0);
    let mut needed = u128::BITS - u128::from(max_var).leading_zeros();
    if ctx.ord().is_graded() {
        let degree: u128 = exps.iter().map(|&e| u128::from(e)).sum();
        needed = needed.max(u128::BITS - degree.leading_zeros());
    }
    fix_bits(needed + 1)
}

/// Smallest normalized width that holds `exps` with every guard bit clear.
///
/// # Errors
///
/// Returns `VariableCountMismatch` on a length mismatch and
/// `NegativeExponent` if any entry is negative.
pub fn exp_bits_required(exps: &[Integer], ctx: &MpolyCtx) -> Result<u32> {
    check_len(exps.len(), ctx)?;
    check_non_negative(exps)?;
    let mut needed = exps.iter().map(Integer::bit_len).max().unwrap_or(0);
    if ctx.ord().is_graded() {
        let degree: Integer = exps.iter().sum();
        needed = needed.max(degree.bit_len());
    }
    let needed = u32::try_from(needed + 1).map_err(|_| MpolyError::ExponentOverflow { bits: u32::MAX })?;
    fix_bits(needed)
}

/// Packs `exps` at `bits` per field into a fresh word vector.
///
/// # Errors
///
/// `ExponentOverflow` if any field (including the degree of graded
/// orderings) needs more than `bits - 1` bits, plus the validation errors
/// of [`pack_ui_into`].
pub fn pack_ui(exps: &[u64], bits: u32, ctx: &MpolyCtx) -> Result<Vec<u64>> {
    let mut out = vec![0; words_per_exp(bits, ctx)];
    pack_ui_into(&mut out, exps, bits, ctx)?;
    Ok(out)
}

/// Packs `exps` into `out`, which must hold exactly `words_per_exp` words.
///
/// `out` is only written once every field is known to fit.
///
/// # Errors
///
/// `VariableCountMismatch`, `UnsupportedBits`, `ExponentOverflow`, or
/// `CorruptData` if `out` has the wrong length.
pub fn pack_ui_into(out: &mut [u64], exps: &[u64], bits: u32, ctx: &MpolyCtx) -> Result<()> {
    check_len(exps.len(), ctx)?;
    let layout = Layout::new(bits)?;
    check_out_len(out, bits, ctx)?;

    let degree: u128 = exps.iter().map(|&e| u128::from(e)).sum();
    let limit = bits - 1;
    let fits = |v: u128| u128::BITS - v.leading_zeros() <= limit;
    if !exps.iter().all(|&e| fits(u128::from(e))) || (ctx.ord().is_graded() && !fits(degree)) {
        return Err(MpolyError::ExponentOverflow { bits });
    }

    out.fill(0);
    for (var, &e) in exps.iter().enumerate() {
        write_field_u128(out, layout, ctx.field_of_var(var), u128::from(e));
    }
    if let Some(k) = ctx.degree_field() {
        write_field_u128(out, layout, k, degree);
    }
    Ok(())
}

/// Packs arbitrary precision exponents at `bits` per field.
///
/// # Errors
///
/// As [`pack_into`].
pub fn pack(exps: &[Integer], bits: u32, ctx: &MpolyCtx) -> Result<Vec<u64>> {
    let mut out = vec![0; words_per_exp(bits, ctx)];
    pack_into(&mut out, exps, bits, ctx)?;
    Ok(out)
}

/// Packs arbitrary precision exponents into `out`.
///
/// `out` is only written once every field is known to fit.
///
/// # Errors
///
/// `VariableCountMismatch`, `NegativeExponent`, `UnsupportedBits`,
/// `ExponentOverflow`, or `CorruptData` if `out` has the wrong length.
pub fn pack_into(out: &mut [u64], exps: &[Integer], bits: u32, ctx: &MpolyCtx) -> Result<()> {
    check_len(exps.len(), ctx)?;
    check_non_negative(exps)?;
    let layout = Layout::new(bits)?;
    check_out_len(out, bits, ctx)?;

    let limit = (bits - 1) as usize;
    let degree: Option<Integer> = ctx.ord().is_graded().then(|| exps.iter().sum());
    let too_wide = exps.iter().chain(degree.as_ref()).any(|e| e.bit_len() > limit);
    if too_wide {
        return Err(MpolyError::ExponentOverflow { bits });
    }

    out.fill(0);
    for (var, e) in exps.iter().enumerate() {
        write_field_integer(out, layout, ctx.field_of_var(var), e);
    }
    if let (Some(k), Some(d)) = (ctx.degree_field(), degree.as_ref()) {
        write_field_integer(out, layout, k, d);
    }
    Ok(())
}

/// Unpacks into word-size exponents.
///
/// # Errors
///
/// `CorruptData` if a guard bit is set, the degree field disagrees with
/// the variables, or `words` has the wrong length; `ExponentOverflow`
/// (with `bits` of 64) if a wide field holds a value beyond `u64`.
pub fn unpack_ui(words: &[u64], bits: u32, ctx: &MpolyCtx) -> Result<Vec<u64>> {
    let layout = Layout::new(bits)?;
    check_words(words, layout, bits, ctx)?;

    let mut exps = Vec::with_capacity(ctx.nvars());
    for var in 0..ctx.nvars() {
        let v = read_field_u128(words, layout, ctx.field_of_var(var));
        let e = u64::try_from(v).map_err(|_| MpolyError::ExponentOverflow { bits: WORD_BITS })?;
        exps.push(e);
    }

    if let Some(k) = ctx.degree_field() {
        let stored = read_field_integer(words, layout, k);
        let sum: Integer = exps.iter().map(|&e| Integer::from(e)).sum();
        if stored != sum {
            return Err(MpolyError::CorruptData("degree field does not match exponents"));
        }
    }
    Ok(exps)
}

/// Unpacks into arbitrary precision exponents. Inverse of [`pack`].
///
/// # Errors
///
/// `CorruptData` if a guard bit is set, the degree field disagrees with
/// the variables, or `words` has the wrong length.
pub fn unpack(words: &[u64], bits: u32, ctx: &MpolyCtx) -> Result<Vec<Integer>> {
    let layout = Layout::new(bits)?;
    check_words(words, layout, bits, ctx)?;

    let exps: Vec<Integer> = (0..ctx.nvars())
        .map(|var| read_field_integer(words, layout, ctx.field_of_var(var)))
        .collect();

    if let Some(k) = ctx.degree_field() {
        let stored = read_field_integer(words, layout, k);
        if stored != exps.iter().sum::<Integer>() {
            return Err(MpolyError::CorruptData("degree field does not match exponents"));
        }
    }
    Ok(exps)
}

/// Re-encodes one packed vector from `src_bits` to `dst_bits`.
///
/// # Errors
///
/// `CorruptData` for malformed input, `ExponentOverflow` if a field does
/// not fit the destination width.
pub fn repack(src: &[u64], src_bits: u32, dst: &mut [u64], dst_bits: u32, ctx: &MpolyCtx) -> Result<()> {
    if src_bits == dst_bits {
        let src_layout = Layout::new(src_bits)?;
        check_words(src, src_layout, src_bits, ctx)?;
        check_out_len(dst, dst_bits, ctx)?;
        dst.copy_from_slice(src);
        return Ok(());
    }

    match (Layout::new(src_bits)?, Layout::new(dst_bits)?) {
        (src_layout @ Layout::Packed { .. }, dst_layout @ Layout::Packed { .. }) => {
            check_words(src, src_layout, src_bits, ctx)?;
            check_out_len(dst, dst_bits, ctx)?;
            let limit = dst_bits - 1;
            let mut fields = Vec::with_capacity(ctx.nfields());
            for k in 0..ctx.nfields() {
                let v = read_field_u128(src, src_layout, k);
                if u128::BITS - v.leading_zeros() > limit {
                    return Err(MpolyError::ExponentOverflow { bits: dst_bits });
                }
                fields.push(v);
            }
            dst.fill(0);
            for (k, v) in fields.into_iter().enumerate() {
                write_field_u128(dst, dst_layout, k, v);
            }
            Ok(())
        }
        _ => {
            let exps = unpack(src, src_bits, ctx)?;
            pack_into(dst, &exps, dst_bits, ctx)
        }
    }
}

fn check_len(found: usize, ctx: &MpolyCtx) -> Result<()> {
    if found == ctx.nvars() {
        Ok(())
    } else {
        Err(MpolyError::VariableCountMismatch {
            expected: ctx.nvars(),
            found,
        })
    }
}

fn check_non_negative(exps: &[Integer]) -> Result<()> {
    match exps.iter().position(Integer::is_negative) {
        Some(var) => Err(MpolyError::NegativeExponent { var }),
        None => Ok(()),
    }
}

fn check_out_len(out: &[u64], bits: u32, ctx: &MpolyCtx) -> Result<()> {
    if out.len() == words_per_exp(bits, ctx) {
        Ok(())
    } else {
        Err(MpolyError::CorruptData("exponent buffer has the wrong length"))
    }
}

fn check_words(words: &[u64], layout: Layout, bits: u32, ctx: &MpolyCtx) -> Result<()> {
    check_out_len(words, bits, ctx)?;
    for k in 0..ctx.nfields() {
        let (w, shift) = layout.guard_position(k);
        if (words[w] >> shift) & 1 == 1 {
            return Err(MpolyError::CorruptData("guard bit set in packed exponent"));
        }
    }
    Ok(())
}

// Callers have already checked that `value` fits below the guard bit.
fn write_field_u128(words: &mut [u64], layout: Layout, k: usize, value: u128) {
    match layout {
        Layout::Packed {
            bits,
            fields_per_word,
        } => {
            let shift = (k % fields_per_word) as u32 * bits;
            words[k / fields_per_word] |= (value as u64) << shift;
        }
        Layout::Multi { words_per_field } => {
            let start = k * words_per_field;
            words[start] = value as u64;
            words[start + 1] = (value >> WORD_BITS) as u64;
        }
    }
}

fn write_field_integer(words: &mut [u64], layout: Layout, k: usize, value: &Integer) {
    match layout {
        Layout::Packed { .. } => {
            let v = value.to_u64().unwrap_or(0);
            write_field_u128(words, layout, k, u128::from(v));
        }
        Layout::Multi { words_per_field } => {
            let start = k * words_per_field;
            let written = value.write_words_le(&mut words[start..start + words_per_field]);
            debug_assert!(written);
        }
    }
}

fn read_field_u128(words: &[u64], layout: Layout, k: usize) -> u128 {
    match layout {
        Layout::Packed {
            bits,
            fields_per_word,
        } => {
            let shift = (k % fields_per_word) as u32 * bits;
            u128::from((words[k / fields_per_word] >> shift) & field_mask(bits))
        }
        Layout::Multi { words_per_field } => {
            let field = &words[k * words_per_field..(k + 1) * words_per_field];
            if field[2..].iter().any(|&w| w != 0) {
                u128::MAX
            } else {
                u128::from(field[0]) | (u128::from(field[1]) << WORD_BITS)
            }
        }
    }
}

fn read_field_integer(words: &[u64], layout: Layout, k: usize) -> Integer {
    match layout {
        Layout::Packed { .. } => {
            let v = read_field_u128(words, layout, k);
            Integer::from(v as u64)
        }
        Layout::Multi { words_per_field } => {
            Integer::from_words_le(&words[k * words_per_field..(k + 1) * words_per_field])
        }
    }
}
