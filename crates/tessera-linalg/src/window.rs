//! Non-owning rectangular views into a [`PolyMat`].
//!
//! A window borrows the matrix and owns nothing but a list of row start
//! offsets into the matrix's entry storage. Creating one copies no
//! entries; clearing or dropping one frees only that list. A window with
//! no rows allocates no list at all.

use log::trace;
use thiserror::Error;

use tessera_mpoly::{CoeffRing, Mpoly};

use crate::poly_mat::PolyMat;

/// Errors from window construction.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    /// The requested corners do not describe a sub-rectangle of the matrix.
    #[error("window rows {r1}..{r2}, cols {c1}..{c2} out of bounds for {num_rows}x{num_cols} matrix")]
    OutOfBounds {
        /// First row.
        r1: usize,
        /// First column.
        c1: usize,
        /// One past the last row.
        r2: usize,
        /// One past the last column.
        c2: usize,
        /// Rows of the matrix.
        num_rows: usize,
        /// Columns of the matrix.
        num_cols: usize,
    },
}

/// Row indirection shared by both window kinds.
#[derive(Debug)]
struct RowOffsets {
    /// Start of each window row in the matrix storage; `None` for zero rows.
    starts: Option<Vec<usize>>,
    num_cols: usize,
}

impl RowOffsets {
    fn new<P>(mat: &PolyMat<P>, r1: usize, c1: usize, r2: usize, c2: usize) -> Result<Self, WindowError> {
        if r1 > r2 || r2 > mat.num_rows() || c1 > c2 || c2 > mat.num_cols() {
            return Err(WindowError::OutOfBounds {
                r1,
                c1,
                r2,
                c2,
                num_rows: mat.num_rows(),
                num_cols: mat.num_cols(),
            });
        }

        let starts = (r2 > r1).then(|| (r1..r2).map(|r| r * mat.num_cols() + c1).collect::<Vec<_>>());
        trace!("window init: rows {r1}..{r2}, cols {c1}..{c2}");
        Ok(Self {
            starts,
            num_cols: c2 - c1,
        })
    }

    fn len(&self) -> usize {
        self.starts.as_ref().map_or(0, Vec::len)
    }

    fn start(&self, row: usize) -> Option<usize> {
        self.starts.as_ref()?.get(row).copied()
    }

    fn range(&self, row: usize) -> std::ops::Range<usize> {
        let start = self
            .start(row)
            .unwrap_or_else(|| panic!("row {row} out of range for window with {} rows", self.len()));
        start..start + self.num_cols
    }

    fn swap(&mut self, i: usize, j: usize) {
        let len = self.len();
        assert!(
            i < len && j < len,
            "rows {i} and {j} out of range for window with {len} rows"
        );
        if let Some(starts) = self.starts.as_mut() {
            starts.swap(i, j);
        }
    }

    // Keeps the column count even when there are no rows
    fn copy_out<P: Clone>(&self, data: &[P]) -> PolyMat<P> {
        let mut entries = Vec::with_capacity(self.len() * self.num_cols);
        for row in 0..self.len() {
            entries.extend_from_slice(&data[self.range(row)]);
        }
        PolyMat {
            data: entries,
            num_rows: self.len(),
            num_cols: self.num_cols,
        }
    }
}

impl Drop for RowOffsets {
    fn drop(&mut self) {
        if let Some(starts) = self.starts.take() {
            trace!("window clear: releasing {} row offsets", starts.len());
        }
    }
}

/// Read-only window into a matrix.
#[derive(Debug)]
pub struct PolyMatWindow<'a, P> {
    data: &'a [P],
    rows: RowOffsets,
}

/// Window that can write through to the matrix entries it covers.
#[derive(Debug)]
pub struct PolyMatWindowMut<'a, P> {
    data: &'a mut [P],
    rows: RowOffsets,
}

impl<P> PolyMat<P> {
    /// Views rows `r1..r2` and columns `c1..c2` without copying entries.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` unless `r1 <= r2 <= num_rows` and `c1 <= c2 <= num_cols`.
    pub fn window(&self, r1: usize, c1: usize, r2: usize, c2: usize) -> Result<PolyMatWindow<'_, P>, WindowError> {
        let rows = RowOffsets::new(self, r1, c1, r2, c2)?;
        Ok(PolyMatWindow { data: &self.data, rows })
    }

    /// Mutable form of [`PolyMat::window`].
    ///
    /// # Errors
    ///
    /// `OutOfBounds` unless `r1 <= r2 <= num_rows` and `c1 <= c2 <= num_cols`.
    pub fn window_mut(
        &mut self,
        r1: usize,
        c1: usize,
        r2: usize,
        c2: usize,
    ) -> Result<PolyMatWindowMut<'_, P>, WindowError> {
        let rows = RowOffsets::new(self, r1, c1, r2, c2)?;
        Ok(PolyMatWindowMut {
            data: &mut self.data,
            rows,
        })
    }
}

impl<P> PolyMatWindow<'_, P> {
    /// Returns the number of rows in the window.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of columns in the window.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.rows.num_cols
    }

    /// Returns the entry at (row, col), relative to the window.
    #[must_use]
    pub fn entry(&self, row: usize, col: usize) -> Option<&P> {
        if col >= self.rows.num_cols {
            return None;
        }
        let start = self.rows.start(row)?;
        Some(&self.data[start + col])
    }

    /// Returns a slice of the specified window row.
    ///
    /// # Panics
    ///
    /// Panics if `row` is not a row of the window.
    #[must_use]
    pub fn row(&self, row: usize) -> &[P] {
        &self.data[self.rows.range(row)]
    }

    /// Iterates over the window rows in order.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[P]> + '_ {
        (0..self.num_rows()).map(move |r| self.row(r))
    }

    /// Swaps two window rows. Only the view changes; the matrix does not.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is not a row of the window.
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        self.rows.swap(i, j);
    }

    /// Releases the window's row list. Matrix entries are not touched.
    pub fn clear(self) {}
}

impl<P: Clone> PolyMatWindow<'_, P> {
    /// Copies the covered entries into a new matrix.
    #[must_use]
    pub fn to_matrix(&self) -> PolyMat<P> {
        self.rows.copy_out(self.data)
    }
}

impl<P> PolyMatWindowMut<'_, P> {
    /// Returns the number of rows in the window.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of columns in the window.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.rows.num_cols
    }

    /// Returns the entry at (row, col), relative to the window.
    #[must_use]
    pub fn entry(&self, row: usize, col: usize) -> Option<&P> {
        if col >= self.rows.num_cols {
            return None;
        }
        let start = self.rows.start(row)?;
        Some(&self.data[start + col])
    }

    /// Returns a mutable reference to the entry at (row, col).
    pub fn entry_mut(&mut self, row: usize, col: usize) -> Option<&mut P> {
        if col >= self.rows.num_cols {
            return None;
        }
        let start = self.rows.start(row)?;
        Some(&mut self.data[start + col])
    }

    /// Returns a slice of the specified window row.
    ///
    /// # Panics
    ///
    /// Panics if `row` is not a row of the window.
    #[must_use]
    pub fn row(&self, row: usize) -> &[P] {
        &self.data[self.rows.range(row)]
    }

    /// Returns a mutable slice of the specified window row.
    ///
    /// # Panics
    ///
    /// Panics if `row` is not a row of the window.
    pub fn row_mut(&mut self, row: usize) -> &mut [P] {
        let range = self.rows.range(row);
        &mut self.data[range]
    }

    /// Iterates over the window rows in order.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[P]> + '_ {
        (0..self.num_rows()).map(move |r| self.row(r))
    }

    /// Swaps two window rows. Only the view changes; the matrix does not.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is not a row of the window.
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        self.rows.swap(i, j);
    }

    /// Releases the window's row list. Matrix entries are not touched.
    pub fn clear(self) {}
}

impl<P: Clone> PolyMatWindowMut<'_, P> {
    /// Copies the covered entries into a new matrix.
    #[must_use]
    pub fn to_matrix(&self) -> PolyMat<P> {
        self.rows.copy_out(&*self.data)
    }
}

impl<C: Clone + Default> PolyMatWindowMut<'_, Mpoly<C>> {
    /// Negates every entry covered by the window, in place.
    pub fn neg_assign<R>(&mut self, ring: &R)
    where
        R: CoeffRing<Elem = C>,
    {
        for r in 0..self.num_rows() {
            for p in self.row_mut(r) {
                p.neg_assign(ring);
            }
        }
    }
}
