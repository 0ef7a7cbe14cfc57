//! # Tessera
//!
//! Sparse multivariate polynomials with bit-packed exponent vectors.
//!
//! Exponents of every term are packed into machine words at a width
//! chosen per polynomial, so comparing and multiplying monomials costs a
//! handful of word operations. Widths grow on demand when a term no
//! longer fits.
//!
//! ## Features
//!
//! - **Exponent Codec**: pack/unpack at any width, guard bits for overflow
//! - **Polynomial Container**: growable storage, width promotion, canonical form
//! - **Term Access**: bounds-checked exponent extraction
//! - **Coefficients**: word-size modular and arbitrary precision integer
//! - **Matrix Windows**: non-owning views into matrices of polynomials
//!
//! ## Quick Start
//!
//! ```rust
//! use tessera::prelude::*;
//!
//! let ctx = MpolyCtx::new(3, MonomialOrder::Degrevlex);
//! let ring = Nmod::new(13);
//!
//! let mut p = NmodMpoly::new(&ctx);
//! p.push_term_ui(3, &[2, 5, 0], &ctx).unwrap();
//! p.push_term_ui(10, &[0, 1, 4], &ctx).unwrap();
//!
//! let q = p.neg(&ring, &ctx).unwrap();
//! assert_eq!(q.coeffs(), &[10, 3]);
//! assert_eq!(q.get_term_exp_ui(0, &ctx).unwrap(), vec![2, 5, 0]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use tessera_integers as integers;
pub use tessera_linalg as linalg;
pub use tessera_mpoly as mpoly;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use tessera_integers::{Integer, Nmod};
    pub use tessera_linalg::{PolyMat, PolyMatWindow, PolyMatWindowMut, WindowError};
    pub use tessera_mpoly::{
        CoeffRing, ContextConfig, FmpzMpoly, IntegerRing, MonomialOrder, Mpoly, MpolyCtx, MpolyError,
        NmodMpoly,
    };
}
