//! Structural checks for grids that come from files rather than the generator.

use log::warn;

use crate::error::{MazeError, Result};
use crate::grid::{Dir, Grid, Pos};

/// Checks, in order, that the top and bottom rows are wall, that every row
/// starts and ends with wall, and that no passage is walled in on all four
/// sides. Stops at the first violation.
pub fn validate(grid: &Grid) -> Result<()> {
    let markers = grid.markers();
    let last_row = grid.rows() - 1;
    let last_col = grid.cols() - 1;

    for row in [0, last_row] {
        if let Some(col) = markers[row].iter().position(|m| !m.is_wall()) {
            return Err(reject(MazeError::BoundaryViolation { row, col }));
        }
    }

    for (row, line) in markers.iter().enumerate() {
        for col in [0, last_col] {
            if !line[col].is_wall() {
                return Err(reject(MazeError::BoundaryViolation { row, col }));
            }
        }
    }

    for row in 1..last_row {
        for col in 1..last_col {
            let pos = Pos { row, col };
            if grid.at(pos).is_wall() {
                continue;
            }
            let open = Dir::ALL
                .iter()
                .filter_map(|dir| grid.step(pos, *dir))
                .any(|next| !grid.at(next).is_wall());
            if !open {
                return Err(reject(MazeError::EnclosedCell { row, col }));
            }
        }
    }

    Ok(())
}

fn reject(err: MazeError) -> MazeError {
    warn!("rejecting maze: {}", err);
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Marker;

    /// 1x2 maze with the wall between the two cells removed.
    fn corridor() -> Vec<Vec<Marker>> {
        let mut grid = Grid::new(1, 2).unwrap();
        grid.set_marker(1, 2, Marker::Passage).unwrap();
        grid.markers().to_vec()
    }

    fn check(cells: Vec<Vec<Marker>>) -> Result<()> {
        validate(&Grid::from_markers(cells).unwrap())
    }

    #[test]
    fn accepts_carved_corridor() {
        assert!(check(corridor()).is_ok());
    }

    #[test]
    fn rejects_open_top_row() {
        let mut cells = corridor();
        cells[0][3] = Marker::Passage;
        assert!(matches!(
            check(cells),
            Err(MazeError::BoundaryViolation { row: 0, col: 3 })
        ));
    }

    #[test]
    fn rejects_open_bottom_row() {
        let mut cells = corridor();
        cells[2][1] = Marker::Passage;
        assert!(matches!(
            check(cells),
            Err(MazeError::BoundaryViolation { row: 2, col: 1 })
        ));
    }

    #[test]
    fn rejects_open_side_column() {
        let mut cells = corridor();
        cells[1][4] = Marker::Passage;
        assert!(matches!(
            check(cells),
            Err(MazeError::BoundaryViolation { row: 1, col: 4 })
        ));
    }

    #[test]
    fn rejects_enclosed_passage() {
        // Uncarved grid: every cell is boxed in.
        let cells = Grid::new(2, 2).unwrap().markers().to_vec();
        assert!(matches!(
            check(cells),
            Err(MazeError::EnclosedCell { row: 1, col: 1 })
        ));
    }

    #[test]
    fn boundary_is_checked_before_enclosure() {
        let mut cells = Grid::new(2, 2).unwrap().markers().to_vec();
        cells[4][0] = Marker::Passage;
        assert!(matches!(
            check(cells),
            Err(MazeError::BoundaryViolation { row: 4, col: 0 })
        ));
    }

    #[test]
    fn path_markers_count_as_open() {
        let mut cells = corridor();
        cells[1][2] = Marker::Path;
        assert!(check(cells).is_ok());
    }
}
