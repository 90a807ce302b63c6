// src/lib.rs
//
// Staggered cartesian mesh for 2D finite-difference convection.

pub mod cell;
pub mod config;
pub mod error;
pub mod grid;
pub mod interp;
pub mod point;
pub mod scalar_field;
pub mod visualisation;

pub use cell::{Cell, Cells, CellsRev, Direction};
pub use error::{ConfigError, GridError, RenderError};
pub use grid::{Staggering, StaggeredGrid};
pub use interp::{lagrange_interp_2d, linear_interp_2d};
pub use point::Point;
pub use scalar_field::CellField;
