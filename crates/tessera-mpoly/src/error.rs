//! Error type shared by the codec and the polynomial container.

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors reported by packing, container growth and term access.
///
/// None of these are retried internally. On `ExponentOverflow` the caller
/// is expected to widen the polynomial with `fit_bits` and try again.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MpolyError {
    /// Term index outside `[0, length)`. Negative indices land here too.
    #[error("index {index} out of range for polynomial of length {length}")]
    IndexOutOfRange {
        /// The requested index, as given by the caller.
        index: i64,
        /// The active term count at the time of the call.
        length: usize,
    },

    /// An exponent (or the synthesized degree) needs more than `bits - 1` bits.
    #[error("exponent does not fit in {bits}-bit fields")]
    ExponentOverflow {
        /// The field width that was too narrow.
        bits: u32,
    },

    /// A guard bit or an inconsistent degree field was found while unpacking.
    #[error("corrupt packed exponent data: {0}")]
    CorruptData(&'static str),

    /// The allocator refused to grow term storage.
    #[error("allocation failure: {0}")]
    AllocationFailure(#[from] TryReserveError),

    /// Exponents must be non-negative.
    #[error("negative exponent for variable {var}")]
    NegativeExponent {
        /// Index of the offending variable.
        var: usize,
    },

    /// Exponent vector length does not match the context.
    #[error("expected {expected} exponents, found {found}")]
    VariableCountMismatch {
        /// Number of variables in the context.
        expected: usize,
        /// Length of the vector supplied.
        found: usize,
    },

    /// `set_length` beyond the allocated capacity.
    #[error("length {length} exceeds allocated capacity {alloc}")]
    LengthExceedsCapacity {
        /// Requested length.
        length: usize,
        /// Allocated term capacity.
        alloc: usize,
    },

    /// A field width the codec cannot represent.
    #[error("unsupported field width of {0} bits")]
    UnsupportedBits(u32),
}

/// Result alias for polynomial operations.
pub type Result<T> = std::result::Result<T, MpolyError>;
