//! Reading single terms back out of packed storage.

use tessera_integers::Integer;

use crate::context::MpolyCtx;
use crate::error::{MpolyError, Result};
use crate::mpoly::Mpoly;
use crate::packing::{self, words_per_exp};

impl<C: Clone + Default> Mpoly<C> {
    /// Returns the exponent vector of term `index`, one entry per variable.
    ///
    /// Negative indices are rejected the same way as `index >= len()`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` for a bad index, `CorruptData` if the stored
    /// exponent is malformed.
    pub fn get_term_exp(&self, index: i64, ctx: &MpolyCtx) -> Result<Vec<Integer>> {
        let words = self.term_exp_words(index, ctx)?;
        packing::unpack(words, self.bits(), ctx)
    }

    /// Like [`Mpoly::get_term_exp`], with word-size exponents.
    ///
    /// # Errors
    ///
    /// As [`Mpoly::get_term_exp`], plus `ExponentOverflow` if an exponent
    /// does not fit in a `u64`.
    pub fn get_term_exp_ui(&self, index: i64, ctx: &MpolyCtx) -> Result<Vec<u64>> {
        let words = self.term_exp_words(index, ctx)?;
        packing::unpack_ui(words, self.bits(), ctx)
    }

    /// Returns the exponent of variable `var` in term `index`.
    ///
    /// # Errors
    ///
    /// `VariableCountMismatch` if `var` is not a variable of the context,
    /// otherwise as [`Mpoly::get_term_exp_ui`].
    pub fn get_term_var_exp_ui(&self, index: i64, var: usize, ctx: &MpolyCtx) -> Result<u64> {
        if var >= ctx.nvars() {
            return Err(MpolyError::VariableCountMismatch {
                expected: ctx.nvars(),
                found: var + 1,
            });
        }
        Ok(self.get_term_exp_ui(index, ctx)?[var])
    }

    /// Writes the exponent vector of term `index` into `out`.
    ///
    /// `out` is only written once the term has been decoded.
    ///
    /// # Errors
    ///
    /// `VariableCountMismatch` if `out` does not have one slot per
    /// variable, otherwise as [`Mpoly::get_term_exp`].
    pub fn term_exp_into(&self, out: &mut [Integer], index: i64, ctx: &MpolyCtx) -> Result<()> {
        if out.len() != ctx.nvars() {
            return Err(MpolyError::VariableCountMismatch {
                expected: ctx.nvars(),
                found: out.len(),
            });
        }
        let i = self.check_index(index)?;
        let n = words_per_exp(self.bits(), ctx);
        let exps = packing::unpack(&self.exps(ctx)[i * n..(i + 1) * n], self.bits(), ctx)?;
        for (slot, e) in out.iter_mut().zip(exps) {
            *slot = e;
        }
        Ok(())
    }
}
