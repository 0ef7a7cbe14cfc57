//! # tessera-linalg
//!
//! Matrices of polynomials for the Tessera polynomial kernel.
//!
//! This crate provides:
//! - Dense row-major matrices of polynomials (`PolyMat`)
//! - Non-owning rectangular windows, shared and mutable
//! - Entry-wise negation through a matrix or a window
//!
//! ## Windows
//!
//! A window holds a borrow of the matrix plus one start offset per row.
//! Entries are never copied or freed by a window; the borrow checker keeps
//! the matrix alive and structurally unchanged while a window exists.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod poly_mat;
pub mod window;

pub use poly_mat::PolyMat;
pub use window::{PolyMatWindow, PolyMatWindowMut, WindowError};
