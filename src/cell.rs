// src/cell.rs
//
// Per-cell queries and cell sequences.
//
// A `Cell` is only an id. Every query takes the owning grid explicitly, so a
// cell handle can never outlive or dangle from its grid.
//
// Neighbour ids wrap around at every edge (the grid is a torus for indexing),
// while the boundary predicates still report the physical domain edges. A
// solver uses the predicates to apply boundary conditions instead of the
// wrapped neighbour value.

use std::iter::FusedIterator;

use crate::grid::{Staggering, StaggeredGrid};
use crate::point::Point;

/// Neighbour directions, including diagonals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// Unit step (di, dj) in index space.
    pub fn step(self) -> (i8, i8) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::UpLeft => (-1, 1),
            Direction::UpRight => (1, 1),
            Direction::DownLeft => (-1, -1),
            Direction::DownRight => (1, -1),
        }
    }
}

/// Handle to one cell of a [`StaggeredGrid`].
///
/// Two cells compare equal when their ids are equal, regardless of which grid
/// they were obtained from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    id: usize,
}

impl Cell {
    #[inline]
    pub(crate) fn new(id: usize) -> Self {
        Self { id }
    }

    #[inline]
    pub fn id(self) -> usize {
        self.id
    }

    #[inline]
    pub fn xindex(self, grid: &StaggeredGrid) -> usize {
        self.id % grid.nx()
    }

    #[inline]
    pub fn yindex(self, grid: &StaggeredGrid) -> usize {
        self.id / grid.nx()
    }

    // Column/row shifts with wraparound. Each returns the signed change in id.

    #[inline]
    fn shift_x(self, grid: &StaggeredGrid, di: i8) -> isize {
        let nx = grid.nx() as isize;
        let xi = self.xindex(grid) as isize;
        match di {
            -1 if xi == 0 => nx - 1,
            1 if xi == nx - 1 => 1 - nx,
            _ => di as isize,
        }
    }

    #[inline]
    fn shift_y(self, grid: &StaggeredGrid, dj: i8) -> isize {
        let nx = grid.nx() as isize;
        let ny = grid.ny() as isize;
        let yi = self.yindex(grid) as isize;
        match dj {
            -1 if yi == 0 => nx * (ny - 1),
            1 if yi == ny - 1 => -nx * (ny - 1),
            _ => dj as isize * nx,
        }
    }

    /// Id of the neighbour in direction `dir`, wrapping at the domain edges.
    #[inline]
    pub fn neighbor(self, grid: &StaggeredGrid, dir: Direction) -> usize {
        let (di, dj) = dir.step();
        let id = self.id as isize + self.shift_x(grid, di) + self.shift_y(grid, dj);
        debug_assert!(0 <= id && (id as usize) < grid.n_cells());
        id as usize
    }

    pub fn left(self, grid: &StaggeredGrid) -> usize {
        self.neighbor(grid, Direction::Left)
    }

    pub fn right(self, grid: &StaggeredGrid) -> usize {
        self.neighbor(grid, Direction::Right)
    }

    pub fn up(self, grid: &StaggeredGrid) -> usize {
        self.neighbor(grid, Direction::Up)
    }

    pub fn down(self, grid: &StaggeredGrid) -> usize {
        self.neighbor(grid, Direction::Down)
    }

    pub fn upleft(self, grid: &StaggeredGrid) -> usize {
        self.neighbor(grid, Direction::UpLeft)
    }

    pub fn upright(self, grid: &StaggeredGrid) -> usize {
        self.neighbor(grid, Direction::UpRight)
    }

    pub fn downleft(self, grid: &StaggeredGrid) -> usize {
        self.neighbor(grid, Direction::DownLeft)
    }

    pub fn downright(self, grid: &StaggeredGrid) -> usize {
        self.neighbor(grid, Direction::DownRight)
    }

    pub fn at_top_boundary(self, grid: &StaggeredGrid) -> bool {
        self.yindex(grid) == grid.ny() - 1
    }

    pub fn at_bottom_boundary(self, grid: &StaggeredGrid) -> bool {
        self.yindex(grid) == 0
    }

    pub fn at_left_boundary(self, grid: &StaggeredGrid) -> bool {
        self.xindex(grid) == 0
    }

    pub fn at_right_boundary(self, grid: &StaggeredGrid) -> bool {
        self.xindex(grid) == grid.nx() - 1
    }

    pub fn at_boundary(self, grid: &StaggeredGrid) -> bool {
        self.at_top_boundary(grid)
            || self.at_bottom_boundary(grid)
            || self.at_left_boundary(grid)
            || self.at_right_boundary(grid)
    }

    /// Lower-left grid point of the cell.
    #[inline]
    pub fn corner(self, grid: &StaggeredGrid) -> Point {
        Point::new(
            self.xindex(grid) as f64 * grid.dx(),
            self.yindex(grid) as f64 * grid.dy(),
        )
    }

    /// Storage point for scalars (temperature, pressure).
    #[inline]
    pub fn center(self, grid: &StaggeredGrid) -> Point {
        self.location(grid, Staggering::Center)
    }

    /// Storage point for the horizontal velocity.
    #[inline]
    pub fn hface(self, grid: &StaggeredGrid) -> Point {
        self.location(grid, Staggering::HFace)
    }

    /// Storage point for the vertical velocity.
    #[inline]
    pub fn vface(self, grid: &StaggeredGrid) -> Point {
        self.location(grid, Staggering::VFace)
    }

    /// Storage point of the given kind.
    #[inline]
    pub fn location(self, grid: &StaggeredGrid, staggering: Staggering) -> Point {
        let (ox, oy) = staggering.offset(grid.dx(), grid.dy());
        self.corner(grid).offset(ox, oy)
    }
}

/// Forward sequence over cell ids `[start, end)`.
///
/// Positions compare equal when their current ids are equal; the range end and
/// the grid the sequence came from are not part of the comparison.
#[derive(Debug, Clone)]
pub struct Cells {
    id: usize,
    end: usize,
}

impl Cells {
    pub(crate) fn new(id: usize, end: usize) -> Self {
        Self { id, end }
    }

    /// Id the next call to `next` will yield (or `end` once exhausted).
    pub fn position(&self) -> usize {
        self.id
    }
}

impl PartialEq for Cells {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Cells {}

impl Iterator for Cells {
    type Item = Cell;

    #[inline]
    fn next(&mut self) -> Option<Cell> {
        if self.id >= self.end {
            return None;
        }
        let cell = Cell::new(self.id);
        self.id += 1;
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end.saturating_sub(self.id);
        (n, Some(n))
    }
}

impl ExactSizeIterator for Cells {}

impl FusedIterator for Cells {}

/// Reverse sequence over cell ids, from `ncells - 1` down to 0.
///
/// The position is signed; the sequence is exhausted at position -1. Equality
/// compares positions only, as for [`Cells`].
#[derive(Debug, Clone)]
pub struct CellsRev {
    id: isize,
}

impl CellsRev {
    pub(crate) fn new(id: isize) -> Self {
        Self { id }
    }

    pub fn position(&self) -> isize {
        self.id
    }
}

impl PartialEq for CellsRev {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CellsRev {}

impl Iterator for CellsRev {
    type Item = Cell;

    #[inline]
    fn next(&mut self) -> Option<Cell> {
        if self.id < 0 {
            return None;
        }
        let cell = Cell::new(self.id as usize);
        self.id -= 1;
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = (self.id + 1).max(0) as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for CellsRev {}

impl FusedIterator for CellsRev {}
