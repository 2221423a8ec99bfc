//! File adapters. They translate between files and marker arrays and carry
//! no maze logic of their own.

use std::fs;
use std::path::Path;

use log::info;

use crate::error::{MazeError, Result};
use crate::grid::{Grid, Marker};

pub mod raster;
pub mod text;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Text,
    Image,
}

impl Format {
    /// Picks the adapter from the file extension.
    pub fn from_path(path: &Path) -> Result<Format> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("txt") => Ok(Format::Text),
            Some("png" | "jpg" | "jpeg") => Ok(Format::Image),
            _ => Err(MazeError::UnsupportedFormat(format!(
                "{} (expected .txt, .png or .jpg)",
                path.display()
            ))),
        }
    }
}

/// Reads a marker array from `path`. The result is not validated.
pub fn read(path: &Path, cell_px: u32) -> Result<Vec<Vec<Marker>>> {
    let markers = match Format::from_path(path)? {
        Format::Text => text::decode(&fs::read_to_string(path)?)?,
        Format::Image => raster::decode(&image::open(path)?.to_luma8(), cell_px)?,
    };
    info!("read {} rows from {}", markers.len(), path.display());
    Ok(markers)
}

/// Writes `grid` to `path` in the format its extension names.
pub fn write(grid: &Grid, path: &Path, cell_px: u32) -> Result<()> {
    match Format::from_path(path)? {
        Format::Text => fs::write(path, text::encode(grid.markers()))?,
        Format::Image => raster::encode(grid.markers(), cell_px)?.save(path)?,
    }
    info!("wrote {}x{} maze to {}", grid.cell_height(), grid.cell_width(), path.display());
    Ok(())
}
