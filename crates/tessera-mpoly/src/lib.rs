//! # tessera-mpoly
//!
//! Sparse multivariate polynomials whose exponent vectors are bit-packed
//! into machine words.
//!
//! This crate provides:
//! - The exponent codec: field widths, pack/unpack, guard bits
//! - Word-level monomial comparison and overflow-checked addition
//! - A growable polynomial container with width promotion
//! - Term accessors and coefficient negation
//!
//! ## Packing
//!
//! Every term of a polynomial stores its exponents at the same width
//! `bits`. Widths up to 64 share words between fields; wider fields take
//! whole words. The top bit of each field stays clear so that adding two
//! packed vectors signals overflow instead of corrupting a neighbour.
//! Graded orderings store the total degree in an extra, most significant
//! field, so a single word comparison decides the ordering.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod coeff;
pub mod context;
pub mod error;
pub mod monomial;
pub mod mpoly;
pub mod neg;
pub mod ordering;
pub mod packing;
pub mod term;

#[cfg(test)]
mod proptests;

pub use coeff::{CoeffRing, IntegerRing};
pub use context::{ContextConfig, MpolyCtx};
pub use error::{MpolyError, Result};
pub use mpoly::{FmpzMpoly, Mpoly, NmodMpoly};
pub use ordering::MonomialOrder;
