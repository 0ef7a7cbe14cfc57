//! Polynomial contexts and their configuration.
//!
//! A context fixes the variable count and the monomial ordering, and from
//! those the layout of exponent fields inside packed words. It is never
//! mutated after construction and is passed by reference to every
//! operation that interprets packed exponents.

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{MpolyError, Result};
use crate::ordering::MonomialOrder;
use crate::packing::{fix_bits, MPOLY_MIN_BITS};

/// Shared, read-only description of a polynomial ring's variables.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MpolyCtx {
    nvars: usize,
    ord: MonomialOrder,
    default_bits: u32,
}

impl MpolyCtx {
    /// Creates a context with the minimum default field width.
    #[must_use]
    pub fn new(nvars: usize, ord: MonomialOrder) -> Self {
        Self {
            nvars,
            ord,
            default_bits: MPOLY_MIN_BITS,
        }
    }

    /// Creates a context whose fresh polynomials start at `bits` per field.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedBits` for a zero width or one too wide to
    /// normalize.
    pub fn with_default_bits(nvars: usize, ord: MonomialOrder, bits: u32) -> Result<Self> {
        if bits == 0 {
            return Err(MpolyError::UnsupportedBits(bits));
        }
        Ok(Self {
            nvars,
            ord,
            default_bits: fix_bits(bits)?,
        })
    }

    /// Returns the number of variables.
    #[must_use]
    pub const fn nvars(&self) -> usize {
        self.nvars
    }

    /// Returns the monomial ordering.
    #[must_use]
    pub const fn ord(&self) -> MonomialOrder {
        self.ord
    }

    /// Returns the width new polynomials are created with.
    #[must_use]
    pub const fn default_bits(&self) -> u32 {
        self.default_bits
    }

    /// Number of packed fields: one per variable plus the degree field of
    /// graded orderings.
    #[must_use]
    pub const fn nfields(&self) -> usize {
        self.nvars + self.ord.is_graded() as usize
    }

    /// Index of the packed field that stores variable `var`.
    ///
    /// Field 0 is the least significant. Lex and deglex store x_0 in the
    /// most significant variable field, degrevlex stores it in field 0.
    #[must_use]
    pub const fn field_of_var(&self, var: usize) -> usize {
        if self.ord.is_reversed() {
            var
        } else {
            self.nvars - 1 - var
        }
    }

    /// Index of the synthesized total-degree field, if the ordering has one.
    #[must_use]
    pub const fn degree_field(&self) -> Option<usize> {
        if self.ord.is_graded() {
            Some(self.nvars)
        } else {
            None
        }
    }
}

/// Deserializable description of a context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContextConfig {
    /// Number of variables.
    pub nvars: usize,

    /// Monomial ordering (`lex`, `deglex` or `degrevlex`).
    pub ordering: MonomialOrder,

    /// Initial bits per exponent field for new polynomials.
    pub default_bits: u32,
}

impl Default for ContextConfig {
    fn default() -> Self {
        ContextConfig {
            nvars: 1,
            ordering: MonomialOrder::Lex,
            default_bits: MPOLY_MIN_BITS,
        }
    }
}

impl ContextConfig {
    /// Load configuration with precedence: defaults → optional file → env vars.
    ///
    /// Environment variables use the `TESSERA_` prefix, e.g.
    /// `TESSERA_NVARS=3`, `TESSERA_ORDERING=degrevlex`,
    /// `TESSERA_DEFAULT_BITS=16`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a source cannot be read or a value has
    /// the wrong type.
    pub fn load(path: Option<&Path>) -> std::result::Result<Self, ConfigError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("nvars", defaults.nvars as u64)?
            .set_default("ordering", defaults.ordering.name())?
            .set_default("default_bits", u64::from(defaults.default_bits))?;

        if let Some(path) = path {
            if path.exists() {
                builder = builder.add_source(File::from(path));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("TESSERA")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Builds the context this configuration describes.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedBits` for a zero default width or one too wide
    /// to normalize.
    pub fn to_context(&self) -> Result<MpolyCtx> {
        let ctx = MpolyCtx::with_default_bits(self.nvars, self.ordering, self.default_bits)?;
        log::debug!(
            "context: nvars={}, ord={}, default_bits={}",
            ctx.nvars(),
            ctx.ord(),
            ctx.default_bits()
        );
        Ok(ctx)
    }
}
