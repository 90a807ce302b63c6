// src/scalar_field.rs

use crate::cell::Cell;
use crate::error::{GridError, GridResult};
use crate::grid::{Staggering, StaggeredGrid};
use crate::interp::{lagrange_interp_2d, linear_interp_2d};
use crate::point::Point;

/// Scalar field on a staggered grid, one value per cell id.
///
/// Values are located at the `staggering` storage point of each cell, e.g.
/// temperature at `Center`, horizontal velocity at `HFace`. The number of
/// values is fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct CellField {
    staggering: Staggering,
    data: Vec<f64>,
}

impl CellField {
    /// Zero field on the given grid.
    pub fn new(grid: &StaggeredGrid, staggering: Staggering) -> Self {
        Self {
            staggering,
            data: vec![0.0; grid.n_cells()],
        }
    }

    pub fn from_vec(grid: &StaggeredGrid, staggering: Staggering, data: Vec<f64>) -> GridResult<Self> {
        if data.len() != grid.n_cells() {
            return Err(GridError::FieldSizeMismatch {
                expected: grid.n_cells(),
                found: data.len(),
            });
        }
        Ok(Self { staggering, data })
    }

    /// Evaluate `f` at every storage point.
    pub fn from_fn<F>(grid: &StaggeredGrid, staggering: Staggering, f: F) -> Self
    where
        F: Fn(Point) -> f64,
    {
        let data = grid.cells().map(|c| f(c.location(grid, staggering))).collect();
        Self { staggering, data }
    }

    #[inline]
    pub fn staggering(&self) -> Staggering {
        self.staggering
    }

    /// Values indexed by cell id.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Fails unless `grid` has exactly one cell per stored value.
    pub fn check_grid(&self, grid: &StaggeredGrid) -> GridResult<()> {
        if self.data.len() != grid.n_cells() {
            return Err(GridError::FieldSizeMismatch {
                expected: grid.n_cells(),
                found: self.data.len(),
            });
        }
        Ok(())
    }

    pub fn set_uniform(&mut self, value: f64) {
        self.data.fill(value);
    }

    #[inline]
    pub fn get(&self, cell: Cell) -> f64 {
        self.data[cell.id()]
    }

    #[inline]
    pub fn set(&mut self, cell: Cell, value: f64) {
        self.data[cell.id()] = value;
    }

    #[inline]
    fn at(&self, grid: &StaggeredGrid, i: usize, j: usize) -> f64 {
        self.data[grid.idx(i, j)]
    }

    /// Smallest and largest finite value, or `None` if there are none.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Bilinear reconstruction at `p` from the four surrounding storage points.
    ///
    /// The stencil never wraps: past the last storage line in x or y the upper
    /// index is clamped onto it, and the local coordinate is clamped to the
    /// unit square. Points outside the storage lattice therefore take the
    /// value on its nearest edge.
    pub fn sample_linear(&self, grid: &StaggeredGrid, p: Point) -> GridResult<f64> {
        self.check_grid(grid)?;
        let dl = grid.lower_left_cell(self.staggering, p);
        let origin = dl.location(grid, self.staggering);
        let x = ((p.x - origin.x) / grid.dx()).clamp(0.0, 1.0);
        let y = ((p.y - origin.y) / grid.dy()).clamp(0.0, 1.0);

        let (i0, j0) = (dl.xindex(grid), dl.yindex(grid));
        let i1 = (i0 + 1).min(grid.nx() - 1);
        let j1 = (j0 + 1).min(grid.ny() - 1);

        Ok(linear_interp_2d(
            x,
            y,
            self.at(grid, i0, j1),
            self.at(grid, i1, j1),
            self.at(grid, i0, j0),
            self.at(grid, i1, j0),
        ))
    }

    /// Biquadratic reconstruction at `p` from a 3x3 stencil of storage points.
    ///
    /// The stencil is centred on the nearest storage point, moved inward so it
    /// stays inside the grid along any axis with at least three cells. The
    /// local coordinate is clamped to [-1, 1], so points beyond the outermost
    /// storage line take the value on it. Axes with fewer than three cells
    /// repeat the edge values.
    pub fn sample_lagrange(&self, grid: &StaggeredGrid, p: Point) -> GridResult<f64> {
        self.check_grid(grid)?;
        let nearest = grid.nearest_cell(self.staggering, p);
        let ci = stencil_center(nearest.xindex(grid), grid.nx());
        let cj = stencil_center(nearest.yindex(grid), grid.ny());
        let origin = grid.cell(grid.idx(ci, cj)).location(grid, self.staggering);
        let x = ((p.x - origin.x) / grid.dx()).clamp(-1.0, 1.0);
        let y = ((p.y - origin.y) / grid.dy()).clamp(-1.0, 1.0);

        let (il, ir) = (ci.saturating_sub(1), (ci + 1).min(grid.nx() - 1));
        let (jd, ju) = (cj.saturating_sub(1), (cj + 1).min(grid.ny() - 1));

        Ok(lagrange_interp_2d(
            x,
            y,
            self.at(grid, il, ju),
            self.at(grid, ci, ju),
            self.at(grid, ir, ju),
            self.at(grid, il, cj),
            self.at(grid, ci, cj),
            self.at(grid, ir, cj),
            self.at(grid, il, jd),
            self.at(grid, ci, jd),
            self.at(grid, ir, jd),
        ))
    }
}

/// Keep a 3-point stencil centre off the first and last index when `n >= 3`.
#[inline]
fn stencil_center(index: usize, n: usize) -> usize {
    if n < 3 {
        index
    } else {
        index.clamp(1, n - 2)
    }
}
