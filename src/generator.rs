use log::debug;
use rand::Rng;

use crate::error::Result;
use crate::grid::{Dir, Grid, Marker, Pos};

/// Carves a binary-tree maze into `grid`.
///
/// Every cell except the bottom-right one opens exactly one wall, either to
/// the right or downward. The last column can only go down and the last row
/// can only go right, so every cell drains toward the bottom-right corner and
/// the result is a perfect maze.
pub fn carve(grid: &mut Grid, rng: &mut impl Rng) {
    let (height, width) = (grid.cell_height(), grid.cell_width());
    debug!("carving {}x{} maze", height, width);
    for r in 0..height {
        for c in 0..width {
            let dir = match (r == height - 1, c == width - 1) {
                (true, true) => continue,
                (false, true) => Dir::Down,
                (true, false) => Dir::Right,
                (false, false) => {
                    if rng.gen_bool(0.5) {
                        Dir::Right
                    } else {
                        Dir::Down
                    }
                }
            };
            carve_wall(grid, r, c, dir);
        }
    }
}

/// Builds a fresh grid and carves it.
pub fn generate(cell_height: usize, cell_width: usize, rng: &mut impl Rng) -> Result<Grid> {
    let mut grid = Grid::new(cell_height, cell_width)?;
    carve(&mut grid, rng);
    Ok(grid)
}

fn carve_wall(grid: &mut Grid, r: usize, c: usize, dir: Dir) {
    let cell = Pos::new(2 * r + 1, 2 * c + 1);
    if let Some(wall) = grid.step(cell, dir) {
        grid.put(wall, Marker::Passage);
    }
}
