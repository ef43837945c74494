//! N×N scalar field storage.
//!
//! Three read policies are offered, and callers pick the one matching the
//! boundary condition they want at that read:
//!
//! | Accessor | Outside `[0, N)²` |
//! |---|---|
//! | [`Grid::at`] | panics (caller guarantees the range) |
//! | [`Grid::at_or`] | returns the supplied default ("outside is inert") |
//! | [`Grid::at_clamped`] | replicates the edge cell (zero-gradient) |

use crate::error::{Result, SweError};

/// Square N×N field of `f32` values, stored row-major (`y * N + x`).
///
/// The dimension is part of the type and the storage is allocated once in
/// [`Grid::new`]; there is no way to resize a grid.
///
/// # Example
///
/// ```
/// use swe_grid::Grid;
///
/// let mut g = Grid::<4>::new(0.0);
/// g.set(1, 2, 3.5);
/// assert_eq!(g.at(1, 2), 3.5);
/// assert_eq!(g.at_or(-1, 2, 7.0), 7.0);
/// assert_eq!(g.at_clamped(1, 9), g.at(1, 3));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<const N: usize> {
    values: Vec<f32>,
}

impl<const N: usize> Grid<N> {
    /// Number of cells along each axis.
    pub const SIZE: usize = N;

    const NON_EMPTY: () = assert!(N > 0, "grid dimension must be positive");

    /// Create a grid with every cell set to `value`.
    pub fn new(value: f32) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_EMPTY;
        Self {
            values: vec![value; N * N],
        }
    }

    /// Create a zero-filled grid.
    pub fn zeros() -> Self {
        Self::new(0.0)
    }

    /// Number of cells along each axis.
    #[inline]
    pub const fn size(&self) -> usize {
        N
    }

    /// Whether `(x, y)` addresses a cell of this grid.
    #[inline]
    pub fn contains(x: isize, y: isize) -> bool {
        0 <= x && x < N as isize && 0 <= y && y < N as isize
    }

    #[inline(always)]
    fn offset(x: usize, y: usize) -> usize {
        y * N + x
    }

    /// Read cell `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= N` or `y >= N`. Use this only where the loop range
    /// already guarantees the index.
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> f32 {
        assert!(
            x < N && y < N,
            "cell ({}, {}) is outside the {}x{} grid",
            x,
            y,
            N,
            N
        );
        self.values[Self::offset(x, y)]
    }

    /// Read cell `(x, y)`, reporting an out-of-range index as an error.
    pub fn try_at(&self, x: usize, y: usize) -> Result<f32> {
        if x < N && y < N {
            Ok(self.values[Self::offset(x, y)])
        } else {
            Err(SweError::out_of_bounds(x, y, N))
        }
    }

    /// Read cell `(x, y)`, or `default` if it lies outside the grid.
    #[inline]
    pub fn at_or(&self, x: isize, y: isize, default: f32) -> f32 {
        if Self::contains(x, y) {
            self.values[Self::offset(x as usize, y as usize)]
        } else {
            default
        }
    }

    /// Read the cell nearest to `(x, y)` after clamping both coordinates
    /// into `[0, N-1]`.
    #[inline]
    pub fn at_clamped(&self, x: isize, y: isize) -> f32 {
        let max = N as isize - 1;
        let xc = x.clamp(0, max) as usize;
        let yc = y.clamp(0, max) as usize;
        self.values[Self::offset(xc, yc)]
    }

    /// Write cell `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= N` or `y >= N`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        assert!(
            x < N && y < N,
            "cell ({}, {}) is outside the {}x{} grid",
            x,
            y,
            N,
            N
        );
        self.values[Self::offset(x, y)] = value;
    }

    /// Write cell `(x, y)`, reporting an out-of-range index as an error.
    pub fn try_set(&mut self, x: usize, y: usize, value: f32) -> Result<()> {
        if x < N && y < N {
            self.values[Self::offset(x, y)] = value;
            Ok(())
        } else {
            Err(SweError::out_of_bounds(x, y, N))
        }
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: f32) {
        self.values.fill(value);
    }

    /// Overwrite this grid with the contents of `other`.
    pub fn copy_from(&mut self, other: &Self) {
        self.values.copy_from_slice(&other.values);
    }

    /// Raw row-major values.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Row `y` as a slice of N values.
    #[inline]
    pub fn row(&self, y: usize) -> &[f32] {
        &self.values[y * N..(y + 1) * N]
    }

    /// Iterate over rows, from `y = 0` upwards.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, f32> {
        self.values.chunks_exact(N)
    }

    /// Iterate mutably over rows, from `y = 0` upwards.
    pub fn rows_mut(&mut self) -> std::slice::ChunksExactMut<'_, f32> {
        self.values.chunks_exact_mut(N)
    }

    /// Parallel mutable iterator over rows.
    #[cfg(feature = "parallel")]
    pub fn par_rows_mut(&mut self) -> rayon::slice::ChunksExactMut<'_, f32> {
        use rayon::prelude::*;
        self.values.par_chunks_exact_mut(N)
    }

    /// Iterate over `(x, y, value)` for every cell.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i % N, i / N, v))
    }

    /// Sum of all cell values.
    pub fn sum(&self) -> f32 {
        self.values.iter().sum()
    }

    /// Largest absolute cell value.
    pub fn max_abs(&self) -> f32 {
        self.values.iter().fold(0.0_f32, |acc, v| acc.max(v.abs()))
    }

    /// Smallest and largest cell value.
    pub fn min_max(&self) -> (f32, f32) {
        self.values
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Whether every cell holds a finite value.
    pub fn all_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }
}

impl<const N: usize> Default for Grid<N> {
    fn default() -> Self {
        Self::zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_fills_every_cell() {
        let g = Grid::<5>::new(2.5);
        assert_eq!(g.as_slice().len(), 25);
        assert!(g.as_slice().iter().all(|&v| v == 2.5));
    }

    #[test]
    fn test_row_major_layout() {
        let mut g = Grid::<3>::zeros();
        g.set(2, 1, 1.0);
        assert_eq!(g.as_slice()[1 * 3 + 2], 1.0);
        assert_eq!(g.row(1), &[0.0, 0.0, 1.0]);
    }

    #[test]
    #[should_panic(expected = "outside the 4x4 grid")]
    fn test_at_out_of_range_panics() {
        let g = Grid::<4>::zeros();
        // x out of range but the flat offset would still be valid
        g.at(4, 0);
    }

    #[test]
    #[should_panic(expected = "outside the 4x4 grid")]
    fn test_set_out_of_range_panics() {
        let mut g = Grid::<4>::zeros();
        g.set(0, 4, 1.0);
    }

    #[test]
    fn test_try_accessors() {
        let mut g = Grid::<4>::zeros();
        assert!(g.try_set(3, 3, 1.0).is_ok());
        assert_eq!(g.try_at(3, 3), Ok(1.0));
        assert_eq!(
            g.try_at(4, 1),
            Err(SweError::OutOfBounds { x: 4, y: 1, size: 4 })
        );
        assert!(g.try_set(0, 9, 1.0).is_err());
    }

    #[test]
    fn test_at_or_default_outside() {
        let mut g = Grid::<4>::new(1.0);
        g.set(0, 0, 3.0);
        assert_eq!(g.at_or(0, 0, -1.0), 3.0);
        assert_eq!(g.at_or(-1, 0, -1.0), -1.0);
        assert_eq!(g.at_or(0, -1, -1.0), -1.0);
        assert_eq!(g.at_or(4, 0, -1.0), -1.0);
        assert_eq!(g.at_or(0, 4, -1.0), -1.0);
    }

    #[test]
    fn test_at_clamped_replicates_edges() {
        let mut g = Grid::<4>::zeros();
        for (x, y, _) in Grid::<4>::zeros().iter_cells() {
            g.set(x, y, (10 * y + x) as f32);
        }
        assert_eq!(g.at_clamped(-3, 2), g.at(0, 2));
        assert_eq!(g.at_clamped(7, 2), g.at(3, 2));
        assert_eq!(g.at_clamped(1, -1), g.at(1, 0));
        assert_eq!(g.at_clamped(1, 100), g.at(1, 3));
        assert_eq!(g.at_clamped(-1, -1), g.at(0, 0));
    }

    #[test]
    fn test_at_clamped_matches_at_in_range() {
        let mut g = Grid::<6>::zeros();
        for y in 0..6 {
            for x in 0..6 {
                g.set(x, y, (x as f32) * 0.3 - (y as f32) * 1.7);
            }
        }
        for y in 0..6 {
            for x in 0..6 {
                assert_eq!(g.at_clamped(x as isize, y as isize), g.at(x, y));
            }
        }
    }

    #[test]
    fn test_reductions() {
        let mut g = Grid::<2>::zeros();
        g.set(0, 0, -3.0);
        g.set(1, 1, 2.0);
        assert_eq!(g.sum(), -1.0);
        assert_eq!(g.max_abs(), 3.0);
        assert_eq!(g.min_max(), (-3.0, 2.0));
        assert!(g.all_finite());
        g.set(1, 0, f32::NAN);
        assert!(!g.all_finite());
    }

    #[test]
    fn test_rows_mut_writes_through() {
        let mut g = Grid::<3>::zeros();
        for (y, row) in g.rows_mut().enumerate() {
            row.fill(y as f32);
        }
        assert_eq!(g.at(2, 0), 0.0);
        assert_eq!(g.at(0, 2), 2.0);
        assert_eq!(g.rows().count(), 3);
    }
}
