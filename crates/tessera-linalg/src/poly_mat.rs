//! Dense matrices of polynomials.
//!
//! Entries are stored row-major in a single vector, so a row is a
//! contiguous slice and a window row is a sub-slice of it.

use std::ops::{Index, IndexMut};

use tessera_mpoly::{CoeffRing, Mpoly, MpolyCtx};

/// Dense matrix stored in row-major order.
#[derive(Debug, Clone)]
pub struct PolyMat<P> {
    /// Matrix entries in row-major order.
    pub(crate) data: Vec<P>,
    /// Number of rows.
    pub(crate) num_rows: usize,
    /// Number of columns.
    pub(crate) num_cols: usize,
}

impl<P: Clone> PolyMat<P> {
    /// Creates a matrix with every entry set to `fill`.
    #[must_use]
    pub fn new(num_rows: usize, num_cols: usize, fill: &P) -> Self {
        Self {
            data: vec![fill.clone(); num_rows * num_cols],
            num_rows,
            num_cols,
        }
    }

    /// Creates a matrix from a 2D vector.
    ///
    /// # Panics
    ///
    /// Panics if the rows have different lengths.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<P>>) -> Self {
        let num_rows = rows.len();
        let num_cols = rows.first().map_or(0, Vec::len);
        assert!(
            rows.iter().all(|r| r.len() == num_cols),
            "all rows must have {num_cols} entries"
        );
        let data: Vec<P> = rows.into_iter().flatten().collect();
        Self {
            data,
            num_rows,
            num_cols,
        }
    }
}

impl<P> PolyMat<P> {
    /// Returns the number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Checks if the matrix has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a reference to the entry at (row, col).
    #[must_use]
    pub fn entry(&self, row: usize, col: usize) -> Option<&P> {
        if row < self.num_rows && col < self.num_cols {
            Some(&self.data[row * self.num_cols + col])
        } else {
            None
        }
    }

    /// Returns a mutable reference to the entry at (row, col).
    pub fn entry_mut(&mut self, row: usize, col: usize) -> Option<&mut P> {
        if row < self.num_rows && col < self.num_cols {
            Some(&mut self.data[row * self.num_cols + col])
        } else {
            None
        }
    }

    /// Returns a slice of the specified row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[P] {
        let start = row * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    /// Returns a mutable slice of the specified row.
    pub fn row_mut(&mut self, row: usize) -> &mut [P] {
        let start = row * self.num_cols;
        &mut self.data[start..start + self.num_cols]
    }

    /// Swaps two rows in-place.
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        let i_start = i * self.num_cols;
        let j_start = j * self.num_cols;
        for k in 0..self.num_cols {
            self.data.swap(i_start + k, j_start + k);
        }
    }
}

impl<C: Clone + Default> PolyMat<Mpoly<C>> {
    /// Creates a matrix of zero polynomials.
    #[must_use]
    pub fn zeros(num_rows: usize, num_cols: usize, ctx: &MpolyCtx) -> Self {
        Self::new(num_rows, num_cols, &Mpoly::new(ctx))
    }

    /// Negates every entry in place.
    pub fn neg_assign<R>(&mut self, ring: &R)
    where
        R: CoeffRing<Elem = C>,
    {
        for p in &mut self.data {
            p.neg_assign(ring);
        }
    }

    /// Compares entries polynomial by polynomial.
    #[must_use]
    pub fn equal(&self, other: &Self, ctx: &MpolyCtx) -> bool
    where
        C: PartialEq,
    {
        self.num_rows == other.num_rows
            && self.num_cols == other.num_cols
            && self.data.iter().zip(&other.data).all(|(a, b)| a.equal(b, ctx))
    }
}

impl<P> Index<(usize, usize)> for PolyMat<P> {
    type Output = P;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row * self.num_cols + col]
    }
}

impl<P> IndexMut<(usize, usize)> for PolyMat<P> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.data[row * self.num_cols + col]
    }
}
