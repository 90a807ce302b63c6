// src/config.rs
//
// Run configuration, read from and written to `config.json`.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, GridResult};
use crate::grid::{Staggering, StaggeredGrid};
use crate::visualisation::PluginKind;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub grid: GridConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub lx: f64,
    pub ly: f64,
    pub nx: usize,
    pub ny: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        // Aspect ratio 2 box, as for a pair of convection rolls.
        Self {
            lx: 2.0,
            ly: 1.0,
            nx: 128,
            ny: 64,
        }
    }
}

impl GridConfig {
    pub fn build(&self) -> GridResult<StaggeredGrid> {
        StaggeredGrid::new(self.lx, self.ly, self.nx, self.ny)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output image size in pixels.
    pub width: u32,
    pub height: u32,
    /// Storage location of the rendered field.
    pub staggering: Staggering,
    /// Plugins, drawn in order.
    pub plugins: Vec<PluginKind>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            staggering: Staggering::Center,
            plugins: vec![PluginKind::Core, PluginKind::Axis],
        }
    }
}

impl RunConfig {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let config: RunConfig = serde_json::from_reader(BufReader::new(file))?;
        // Reject bad grids at load time rather than at first use.
        config.grid.build()?;
        Ok(config)
    }

    /// Write `config.json` into `out_dir` and return its path.
    pub fn write_to_dir(&self, out_dir: &Path) -> Result<PathBuf, ConfigError> {
        let path = out_dir.join("config.json");
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("staggered-grid-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn config_round_trips_through_a_directory() {
        let dir = scratch_dir("roundtrip");
        let mut config = RunConfig::default();
        config.grid.nx = 10;
        config.render.plugins = vec![PluginKind::Axis];
        let path = config.write_to_dir(&dir).unwrap();
        assert_eq!(path, dir.join("config.json"));

        let loaded = RunConfig::from_path(&path).unwrap();
        assert_eq!(loaded, config);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: RunConfig =
            serde_json::from_str(r#"{ "grid": { "lx": 1.0, "ly": 1.0, "nx": 4, "ny": 3 } }"#).unwrap();
        assert_eq!(config.grid.build().unwrap().n_cells(), 12);
        assert_eq!(config.render, RenderConfig::default());
    }

    #[test]
    fn zero_cell_grid_is_rejected_on_load() {
        let dir = scratch_dir("zero");
        let path = dir.join("config.json");
        fs::write(&path, r#"{ "grid": { "lx": 1.0, "ly": 1.0, "nx": 0, "ny": 3 } }"#).unwrap();
        assert!(matches!(RunConfig::from_path(&path), Err(ConfigError::Grid(_))));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn unreadable_config_reports_io_error() {
        let path = Path::new("/nonexistent/staggered-grid/config.json");
        assert!(matches!(RunConfig::from_path(path), Err(ConfigError::Io(_))));
    }
}
