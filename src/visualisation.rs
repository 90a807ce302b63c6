// src/visualisation.rs
//
// Rendering plugins for grid and field state.
//
// Each plugin follows a setup / draw / cleanup lifecycle:
//   - setup   : build geometry buffers from the grid
//   - draw    : called once per frame with the current field
//   - cleanup : release the buffers
//
// The set of plugins is closed (`Plugin`); an `Overlay` draws several of them
// in order onto one drawing area.

use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::RenderError;
use crate::grid::StaggeredGrid;
use crate::point::Point;
use crate::scalar_field::CellField;

/// Grid and field state for one displayed frame.
#[derive(Clone, Copy)]
pub struct Frame<'a> {
    pub grid: &'a StaggeredGrid,
    pub field: &'a CellField,
}

pub trait RenderingPlugin {
    fn name(&self) -> &'static str;

    /// Build the geometry needed for drawing `grid`.
    fn setup(&mut self, grid: &StaggeredGrid);

    fn draw<DB: DrawingBackend>(
        &mut self,
        frame: &Frame<'_>,
        area: &DrawingArea<DB, Shift>,
    ) -> Result<(), RenderError>;

    fn cleanup(&mut self);
}

fn backend_error<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Backend(e.to_string())
}

/// Maps domain coordinates onto the pixel rectangle of a drawing area,
/// with y pointing up.
struct Viewport {
    sx: f64,
    sy: f64,
    h: i32,
}

impl Viewport {
    fn new(grid: &StaggeredGrid, (w, h): (u32, u32)) -> Self {
        let w = w.max(1) - 1;
        let h = h.max(1) - 1;
        Self {
            sx: w as f64 / grid.lx(),
            sy: h as f64 / grid.ly(),
            h: h as i32,
        }
    }

    #[inline]
    fn to_pixel(&self, p: Point) -> (i32, i32) {
        let px = (p.x * self.sx).round() as i32;
        let py = (p.y * self.sy).round() as i32;
        (px, self.h - py)
    }
}

/// Diverging colour map, as (position, colour) stops on [0, 1].
const DIVERGING: [(f64, RGBColor); 3] = [
    (0.0, RGBColor(0, 0, 255)),
    (0.5, RGBColor(255, 255, 255)),
    (1.0, RGBColor(255, 0, 0)),
];

/// Position of `v` within [lo, hi]. A range narrower than 1e-9 (a uniform
/// field) is read as [-1, 1]; NaN lands in the middle.
fn normalise(v: f64, lo: f64, hi: f64) -> f64 {
    let (lo, hi) = if lo.is_finite() && hi.is_finite() && hi - lo >= 1e-9 {
        (lo, hi)
    } else {
        (-1.0, 1.0)
    };
    let t = (v - lo) / (hi - lo);
    if t.is_nan() {
        0.5
    } else {
        t.clamp(0.0, 1.0)
    }
}

/// Piecewise-linear lookup in [`DIVERGING`] for `t` in [0, 1].
fn diverging_color(t: f64) -> RGBColor {
    let (lower, upper) = DIVERGING
        .windows(2)
        .map(|w| (w[0], w[1]))
        .find(|(_, (pos, _))| t <= *pos)
        .unwrap_or((DIVERGING[1], DIVERGING[2]));
    let s = (t - lower.0) / (upper.0 - lower.0);
    let channel = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * s).round() as u8;
    let (RGBColor(r0, g0, b0), RGBColor(r1, g1, b1)) = (lower.1, upper.1);
    RGBColor(channel(r0, r1), channel(g0, g1), channel(b0, b1))
}

/// Colour-mapped field, one filled quad per cell.
#[derive(Debug, Default)]
pub struct Core {
    /// Lattice of cell corners, (nx + 1) x (ny + 1), row-major.
    vertices: Vec<Point>,
    /// Per cell: lattice indices of the (dl, dr, ur, ul) corners.
    quads: Vec<[usize; 4]>,
    colors: Vec<RGBColor>,
    ncells: Option<usize>,
}

impl Core {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn quad_count(&self) -> usize {
        self.quads.len()
    }
}

impl RenderingPlugin for Core {
    fn name(&self) -> &'static str {
        "core"
    }

    fn setup(&mut self, grid: &StaggeredGrid) {
        let (nx, ny) = (grid.nx(), grid.ny());
        self.vertices = (0..=ny)
            .flat_map(|j| (0..=nx).map(move |i| (i, j)))
            .map(|(i, j)| Point::new(i as f64 * grid.dx(), j as f64 * grid.dy()))
            .collect();

        let stride = nx + 1;
        self.quads = grid
            .cells()
            .map(|c| {
                let v = c.yindex(grid) * stride + c.xindex(grid);
                [v, v + 1, v + stride + 1, v + stride]
            })
            .collect();

        self.colors = Vec::with_capacity(grid.n_cells());
        self.ncells = Some(grid.n_cells());
        debug!(
            "core plugin: {} vertices, {} quads",
            self.vertices.len(),
            self.quads.len()
        );
    }

    fn draw<DB: DrawingBackend>(
        &mut self,
        frame: &Frame<'_>,
        area: &DrawingArea<DB, Shift>,
    ) -> Result<(), RenderError> {
        let expected = self.ncells.ok_or(RenderError::NotSetUp(self.name()))?;
        let found = frame.grid.n_cells();
        if expected != found {
            return Err(RenderError::GridMismatch { expected, found });
        }
        if frame.field.len() != expected {
            return Err(RenderError::GridMismatch {
                expected,
                found: frame.field.len(),
            });
        }

        let (lo, hi) = frame.field.min_max().unwrap_or((-1.0, 1.0));
        self.colors.clear();
        self.colors
            .extend(frame.field.values().iter().map(|&v| diverging_color(normalise(v, lo, hi))));

        let view = Viewport::new(frame.grid, area.dim_in_pixel());
        for (quad, color) in self.quads.iter().zip(&self.colors) {
            let dl = view.to_pixel(self.vertices[quad[0]]);
            let ur = view.to_pixel(self.vertices[quad[2]]);
            area.draw(&Rectangle::new([dl, ur], color.filled()))
                .map_err(backend_error)?;
        }
        Ok(())
    }

    fn cleanup(&mut self) {
        self.vertices = Vec::new();
        self.quads = Vec::new();
        self.colors = Vec::new();
        self.ncells = None;
    }
}

/// Domain outline with a tick at every cell edge along the bottom and left
/// boundaries.
#[derive(Debug, Default)]
pub struct Axis {
    segments: Vec<Vec<Point>>,
    ncells: Option<usize>,
}

impl Axis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

impl RenderingPlugin for Axis {
    fn name(&self) -> &'static str {
        "axis"
    }

    fn setup(&mut self, grid: &StaggeredGrid) {
        let (dx, dy) = (grid.dx(), grid.dy());
        let origin = grid.cell(0).corner(grid);
        let top_right = grid.cell(grid.n_cells() - 1).corner(grid).offset(dx, dy);

        let mut segments = vec![vec![
            origin,
            Point::new(top_right.x, origin.y),
            top_right,
            Point::new(origin.x, top_right.y),
            origin,
        ]];

        let tick_x = 0.25 * dy;
        let tick_y = 0.25 * dx;
        for c in grid.cells() {
            let corner = c.corner(grid);
            if c.at_bottom_boundary(grid) && !c.at_left_boundary(grid) {
                segments.push(vec![corner, corner.offset(0.0, tick_x)]);
            }
            if c.at_left_boundary(grid) && !c.at_bottom_boundary(grid) {
                segments.push(vec![corner, corner.offset(tick_y, 0.0)]);
            }
        }

        self.segments = segments;
        self.ncells = Some(grid.n_cells());
        debug!("axis plugin: {} segments", self.segments.len());
    }

    fn draw<DB: DrawingBackend>(
        &mut self,
        frame: &Frame<'_>,
        area: &DrawingArea<DB, Shift>,
    ) -> Result<(), RenderError> {
        let expected = self.ncells.ok_or(RenderError::NotSetUp(self.name()))?;
        let found = frame.grid.n_cells();
        if expected != found {
            return Err(RenderError::GridMismatch { expected, found });
        }

        let view = Viewport::new(frame.grid, area.dim_in_pixel());
        for segment in &self.segments {
            let pixels: Vec<(i32, i32)> = segment.iter().map(|&p| view.to_pixel(p)).collect();
            area.draw(&PathElement::new(pixels, BLACK.stroke_width(1)))
                .map_err(backend_error)?;
        }
        Ok(())
    }

    fn cleanup(&mut self) {
        self.segments = Vec::new();
        self.ncells = None;
    }
}

/// Plugin selector used in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginKind {
    Core,
    Axis,
}

#[derive(Debug)]
pub enum Plugin {
    Core(Core),
    Axis(Axis),
}

impl From<PluginKind> for Plugin {
    fn from(kind: PluginKind) -> Self {
        match kind {
            PluginKind::Core => Plugin::Core(Core::new()),
            PluginKind::Axis => Plugin::Axis(Axis::new()),
        }
    }
}

impl RenderingPlugin for Plugin {
    fn name(&self) -> &'static str {
        match self {
            Plugin::Core(p) => p.name(),
            Plugin::Axis(p) => p.name(),
        }
    }

    fn setup(&mut self, grid: &StaggeredGrid) {
        match self {
            Plugin::Core(p) => p.setup(grid),
            Plugin::Axis(p) => p.setup(grid),
        }
    }

    fn draw<DB: DrawingBackend>(
        &mut self,
        frame: &Frame<'_>,
        area: &DrawingArea<DB, Shift>,
    ) -> Result<(), RenderError> {
        match self {
            Plugin::Core(p) => p.draw(frame, area),
            Plugin::Axis(p) => p.draw(frame, area),
        }
    }

    fn cleanup(&mut self) {
        match self {
            Plugin::Core(p) => p.cleanup(),
            Plugin::Axis(p) => p.cleanup(),
        }
    }
}

/// Ordered collection of active plugins.
#[derive(Debug, Default)]
pub struct Overlay {
    plugins: Vec<Plugin>,
}

impl Overlay {
    pub fn new(kinds: &[PluginKind]) -> Self {
        Self {
            plugins: kinds.iter().map(|&k| Plugin::from(k)).collect(),
        }
    }

    pub fn plugins(&self) -> &[Plugin] {
        &self.plugins
    }

    pub fn setup(&mut self, grid: &StaggeredGrid) {
        for p in &mut self.plugins {
            p.setup(grid);
        }
    }

    pub fn draw<DB: DrawingBackend>(
        &mut self,
        frame: &Frame<'_>,
        area: &DrawingArea<DB, Shift>,
    ) -> Result<(), RenderError> {
        for p in &mut self.plugins {
            p.draw(frame, area)?;
        }
        Ok(())
    }

    pub fn cleanup(&mut self) {
        for p in &mut self.plugins {
            p.cleanup();
        }
    }

    /// Draw one frame onto a white background and save it as a PNG.
    pub fn save_frame_png(
        &mut self,
        frame: &Frame<'_>,
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(backend_error)?;
        self.draw(frame, &root)?;
        root.present().map_err(backend_error)?;
        Ok(())
    }
}
