// src/grid.rs
//
// Staggered 2D cartesian grid.
//
// Cells are numbered row-major (x varies fastest): id = yindex * nx + xindex.
// Different quantities live at different points of a cell (Marker-and-Cell):
//   - corner : lower-left grid point
//   - hface  : midpoint of the bottom face (horizontal velocity)
//   - vface  : midpoint of the left face   (vertical velocity)
//   - center : cell centre                 (temperature, pressure)

use log::debug;
use serde::{Deserialize, Serialize};

use crate::cell::{Cell, Cells, CellsRev};
use crate::error::{GridError, GridResult};
use crate::point::Point;

/// Where inside a cell a quantity is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Staggering {
    Corner,
    HFace,
    VFace,
    Center,
}

impl Staggering {
    pub const ALL: [Staggering; 4] = [
        Staggering::Corner,
        Staggering::HFace,
        Staggering::VFace,
        Staggering::Center,
    ];

    /// Offset of the storage point from the cell corner, for cell size (dx, dy).
    #[inline]
    pub fn offset(self, dx: f64, dy: f64) -> (f64, f64) {
        match self {
            Staggering::Corner => (0.0, 0.0),
            Staggering::HFace => (dx / 2.0, 0.0),
            Staggering::VFace => (0.0, dy / 2.0),
            Staggering::Center => (dx / 2.0, dy / 2.0),
        }
    }
}

/// Rectangular domain [0, lx] x [0, ly] split into nx x ny cells.
///
/// Immutable after construction; all cell queries go through a shared reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaggeredGrid {
    lx: f64,
    ly: f64,
    nx: usize,
    ny: usize,
    dx: f64,
    dy: f64,
    ncells: usize,
}

impl StaggeredGrid {
    /// Create a grid of `numx` x `numy` cells covering `lenx` x `leny`.
    pub fn new(lenx: f64, leny: f64, numx: usize, numy: usize) -> GridResult<Self> {
        if numx == 0 {
            return Err(GridError::ZeroCells { axis: "x", count: numx });
        }
        if numy == 0 {
            return Err(GridError::ZeroCells { axis: "y", count: numy });
        }
        if !(lenx.is_finite() && lenx > 0.0) {
            return Err(GridError::InvalidLength { axis: "x", length: lenx });
        }
        if !(leny.is_finite() && leny > 0.0) {
            return Err(GridError::InvalidLength { axis: "y", length: leny });
        }
        // Ids are also handled as isize by the reverse sequence.
        let ncells = numx
            .checked_mul(numy)
            .filter(|&n| n <= isize::MAX as usize)
            .ok_or(GridError::TooManyCells { nx: numx, ny: numy })?;

        let grid = Self {
            lx: lenx,
            ly: leny,
            nx: numx,
            ny: numy,
            dx: lenx / numx as f64,
            dy: leny / numy as f64,
            ncells,
        };
        debug!(
            "Constructed staggered grid: {} x {} cells over {} x {} (dx = {}, dy = {})",
            grid.nx, grid.ny, grid.lx, grid.ly, grid.dx, grid.dy
        );
        Ok(grid)
    }

    #[inline]
    pub fn lx(&self) -> f64 {
        self.lx
    }

    #[inline]
    pub fn ly(&self) -> f64 {
        self.ly
    }

    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    #[inline]
    pub fn dx(&self) -> f64 {
        self.dx
    }

    #[inline]
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Total number of cells.
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.ncells
    }

    /// Convert (i, j) indices to a cell id.
    #[inline]
    pub fn idx(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.nx && j < self.ny);
        j * self.nx + i
    }

    /// Handle for cell `id`. Ids must lie in `[0, n_cells)`.
    #[inline]
    pub fn cell(&self, id: usize) -> Cell {
        debug_assert!(id < self.ncells, "cell id {} out of range {}", id, self.ncells);
        Cell::new(id)
    }

    pub fn try_cell(&self, id: usize) -> Option<Cell> {
        (id < self.ncells).then(|| Cell::new(id))
    }

    /// All cells in increasing id order.
    pub fn cells(&self) -> Cells {
        Cells::new(0, self.ncells)
    }

    /// All cells in decreasing id order.
    pub fn cells_rev(&self) -> CellsRev {
        CellsRev::new(self.ncells as isize - 1)
    }

    /// Clamp signed (x, y) indices into the grid and return the cell id.
    #[inline]
    pub fn keep_in_domain(&self, xindex: i64, yindex: i64) -> usize {
        let xi = xindex.clamp(0, self.nx as i64 - 1) as usize;
        let yi = yindex.clamp(0, self.ny as i64 - 1) as usize;
        self.idx(xi, yi)
    }

    /// Id of the cell containing `p`.
    ///
    /// Points outside the domain saturate to the nearest boundary cell, NaN
    /// coordinates to index 0. Use [`StaggeredGrid::contains`] first if
    /// out-of-domain points must be rejected.
    #[inline]
    pub fn cell_id(&self, p: Point) -> usize {
        // `as` saturates, so huge or infinite coordinates stay in i64 range.
        let xindex = (p.x / self.dx).floor() as i64;
        let yindex = (p.y / self.dy).floor() as i64;
        self.keep_in_domain(xindex, yindex)
    }

    pub fn cell_at_point(&self, p: Point) -> Cell {
        Cell::new(self.cell_id(p))
    }

    /// Whether `p` lies inside the closed domain rectangle.
    pub fn contains(&self, p: Point) -> bool {
        (0.0..=self.lx).contains(&p.x) && (0.0..=self.ly).contains(&p.y)
    }

    /// Cell whose `staggering` storage point is the nearest one at or
    /// below-left of `p`.
    pub fn lower_left_cell(&self, staggering: Staggering, p: Point) -> Cell {
        let (ox, oy) = staggering.offset(self.dx, self.dy);
        self.cell_at_point(p.offset(-ox, -oy))
    }

    pub fn lower_left_corner_cell(&self, p: Point) -> Cell {
        self.lower_left_cell(Staggering::Corner, p)
    }

    pub fn lower_left_hface_cell(&self, p: Point) -> Cell {
        self.lower_left_cell(Staggering::HFace, p)
    }

    pub fn lower_left_vface_cell(&self, p: Point) -> Cell {
        self.lower_left_cell(Staggering::VFace, p)
    }

    pub fn lower_left_center_cell(&self, p: Point) -> Cell {
        self.lower_left_cell(Staggering::Center, p)
    }

    /// Cell whose `staggering` storage point is nearest to `p`.
    pub fn nearest_cell(&self, staggering: Staggering, p: Point) -> Cell {
        let (ox, oy) = staggering.offset(self.dx, self.dy);
        self.cell_at_point(p.offset(self.dx / 2.0 - ox, self.dy / 2.0 - oy))
    }
}
