//! Binary-tree maze generation, BFS/DFS solving and text/image import/export.

pub mod config;
pub mod error;
pub mod format;
pub mod generator;
pub mod grid;
pub mod pathfinder;
pub mod validator;

pub use error::{MazeError, Result};
pub use grid::{cell_to_grid_space, Dir, Grid, Marker, Pos};
pub use pathfinder::{solve, Strategy};
