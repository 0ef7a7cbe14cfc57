//! # tessera-integers
//!
//! Integer collaborators for the Tessera polynomial kernel.
//!
//! This crate wraps `dashu` to provide:
//! - Arbitrary precision integers (`Integer`), used for unpacked exponents
//!   and big coefficients
//! - Word-size modular arithmetic with a runtime modulus (`Nmod`)
//!
//! ## Performance Notes
//!
//! - Small integers (fitting in a machine word) use stack allocation
//! - `Nmod` keeps residues as plain `u64` so polynomial coefficient arrays
//!   stay flat

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod integer;
pub mod nmod;

#[cfg(test)]
mod proptests;

pub use integer::Integer;
pub use nmod::Nmod;
