// src/error.rs
//
// Error types for grid construction, configuration loading and rendering.

use thiserror::Error;

/// Result type for grid and field operations.
pub type GridResult<T> = Result<T, GridError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// A cell count of zero would give an infinite cell size.
    #[error("cell count along {axis} must be positive, got {count}")]
    ZeroCells { axis: &'static str, count: usize },

    #[error("domain length along {axis} must be finite and positive, got {length}")]
    InvalidLength { axis: &'static str, length: f64 },

    #[error("{nx} x {ny} cells overflows the cell id range")]
    TooManyCells { nx: usize, ny: usize },

    #[error("field has {found} values but the grid has {expected} cells")]
    FieldSizeMismatch { expected: usize, found: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid grid in config: {0}")]
    Grid(#[from] GridError),
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("plugin '{0}' was drawn before setup")]
    NotSetUp(&'static str),

    #[error("plugin was set up for {expected} cells but the frame has {found}")]
    GridMismatch { expected: usize, found: usize },

    #[error("drawing backend failed: {0}")]
    Backend(String),
}
