use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use log::{debug, info};

use crate::error::{Endpoint, MazeError, Result};
use crate::grid::{cell_to_grid_space, Dir, Grid, Pos};

/// Frontier discipline for [`solve`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
    /// FIFO frontier; the returned path has the fewest steps.
    #[default]
    Bfs,
    /// LIFO frontier; returns the first path found, not necessarily short.
    Dfs,
}

/// Searches from `start` to `end` (cell space) and records the route on the
/// grid's path overlay.
///
/// `start` defaults to the top-left cell and `end` to the bottom-right one.
/// Returns the route in grid space, both ends included, or an empty vector
/// when `end` cannot be reached (the overlay is cleared in that case).
pub fn solve(
    grid: &mut Grid,
    strategy: Strategy,
    start: Option<(i64, i64)>,
    end: Option<(i64, i64)>,
) -> Result<Vec<Pos>> {
    let start = start.unwrap_or((0, 0));
    let end = end.unwrap_or((
        grid.cell_height() as i64 - 1,
        grid.cell_width() as i64 - 1,
    ));
    let from = endpoint(grid, Endpoint::Start, start)?;
    let to = endpoint(grid, Endpoint::End, end)?;

    let path = search(grid, strategy, from, to);
    if path.is_empty() {
        info!("no route from {:?} to {:?}", start, end);
    } else {
        info!(
            "{:?} found a {}-step route from {:?} to {:?}",
            strategy,
            path.len() - 1,
            start,
            end
        );
    }
    grid.set_path(path.clone());
    Ok(path)
}

fn endpoint(grid: &Grid, which: Endpoint, (row, col): (i64, i64)) -> Result<Pos> {
    let (gr, gc) = cell_to_grid_space(row, col);
    let invalid = |reason| MazeError::InvalidPosition {
        endpoint: which,
        row,
        col,
        reason,
    };
    let (Ok(gr), Ok(gc)) = (usize::try_from(gr), usize::try_from(gc)) else {
        return Err(invalid("outside the maze"));
    };
    if !grid.contains(gr, gc) {
        return Err(invalid("outside the maze"));
    }
    let pos = Pos::new(gr, gc);
    if grid.at(pos).is_wall() {
        return Err(invalid("inside a wall"));
    }
    Ok(pos)
}

/// Route walked so far, newest position first. Frontier entries that grew
/// from the same position share its prefix.
struct Trail {
    pos: Pos,
    prev: Option<Rc<Trail>>,
}

impl Trail {
    fn to_vec(&self) -> Vec<Pos> {
        let mut path = vec![self.pos];
        let mut node = self.prev.as_deref();
        while let Some(trail) = node {
            path.push(trail.pos);
            node = trail.prev.as_deref();
        }
        path.reverse();
        path
    }
}

// Long trails would otherwise be dropped recursively.
impl Drop for Trail {
    fn drop(&mut self) {
        let mut prev = self.prev.take();
        while let Some(node) = prev {
            match Rc::try_unwrap(node) {
                Ok(mut trail) => prev = trail.prev.take(),
                Err(_) => break,
            }
        }
    }
}

/// A position is marked visited when it is taken off the frontier, so the
/// same position may be queued more than once.
fn search(grid: &Grid, strategy: Strategy, from: Pos, to: Pos) -> Vec<Pos> {
    let mut frontier: VecDeque<(Pos, Option<Rc<Trail>>)> = VecDeque::new();
    let mut visited: HashSet<Pos> = HashSet::new();
    frontier.push_back((from, None));

    loop {
        let next = match strategy {
            Strategy::Bfs => frontier.pop_front(),
            Strategy::Dfs => frontier.pop_back(),
        };
        let Some((current, prev)) = next else {
            break;
        };
        if !visited.insert(current) {
            continue;
        }
        let trail = Rc::new(Trail { pos: current, prev });

        if current == to {
            debug!("expanded {} positions", visited.len());
            return trail.to_vec();
        }

        for dir in Dir::ALL {
            let Some(neighbor) = grid.step(current, dir) else {
                continue;
            };
            if !grid.at(neighbor).is_wall() && !visited.contains(&neighbor) {
                frontier.push_back((neighbor, Some(Rc::clone(&trail))));
            }
        }
    }

    debug!("frontier exhausted after {} positions", visited.len());
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator;
    use crate::grid::Marker;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    /// 2x2 cells with every interior position open, i.e. a 3x3 room.
    fn open_room() -> Grid {
        let mut cells = Grid::new(2, 2).unwrap().markers().to_vec();
        for row in cells.iter_mut().take(4).skip(1) {
            for marker in row.iter_mut().take(4).skip(1) {
                *marker = Marker::Passage;
            }
        }
        Grid::from_markers(cells).unwrap()
    }

    fn assert_connected_route(grid: &Grid, path: &[Pos]) {
        for pair in path.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert_eq!(a.row.abs_diff(b.row) + a.col.abs_diff(b.col), 1);
        }
        for pos in path {
            assert!(!grid.at(*pos).is_wall());
        }
    }

    #[test]
    fn bfs_takes_the_short_way_across_a_room() {
        let mut grid = open_room();
        let path = solve(&mut grid, Strategy::Bfs, None, None).unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path.first(), Some(&Pos::new(1, 1)));
        assert_eq!(path.last(), Some(&Pos::new(3, 3)));
        assert_connected_route(&grid, &path);
    }

    #[test]
    fn dfs_snakes_through_a_room() {
        let mut grid = open_room();
        let path = solve(&mut grid, Strategy::Dfs, None, None).unwrap();
        let expected = [
            (1, 1),
            (1, 2),
            (1, 3),
            (2, 3),
            (2, 2),
            (2, 1),
            (3, 1),
            (3, 2),
            (3, 3),
        ]
        .map(|(r, c)| Pos::new(r, c));
        assert_eq!(path, expected);
    }

    #[test]
    fn bfs_never_longer_than_dfs() {
        for seed in 0..10 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut grid = generator::generate(8, 12, &mut rng).unwrap();
            let bfs = solve(&mut grid, Strategy::Bfs, Some((0, 11)), Some((7, 0))).unwrap();
            let dfs = solve(&mut grid, Strategy::Dfs, Some((0, 11)), Some((7, 0))).unwrap();
            assert!(!bfs.is_empty());
            assert!(bfs.len() <= dfs.len());
        }
        let mut room = open_room();
        let bfs = solve(&mut room, Strategy::Bfs, None, None).unwrap();
        let dfs = solve(&mut room, Strategy::Dfs, None, None).unwrap();
        assert!(bfs.len() < dfs.len());
    }

    #[test]
    fn records_path_overlay() {
        let mut grid = open_room();
        let path = solve(&mut grid, Strategy::Bfs, None, None).unwrap();
        assert_eq!(grid.path(), path.as_slice());
        for pos in &path {
            assert_eq!(grid.at(*pos), Marker::Path);
        }
    }

    #[test]
    fn earlier_route_does_not_block_a_new_solve() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut grid = generator::generate(6, 6, &mut rng).unwrap();
        let first = solve(&mut grid, Strategy::Bfs, None, None).unwrap();
        let second = solve(&mut grid, Strategy::Bfs, Some((5, 5)), Some((0, 0))).unwrap();
        let mut reversed = first.clone();
        reversed.reverse();
        assert_eq!(second, reversed);
        let third = solve(&mut grid, Strategy::Dfs, None, None).unwrap();
        assert_eq!(third, first);
    }

    #[test]
    fn unreachable_end_clears_previous_route() {
        // Two cells with the wall between them intact.
        let mut grid = Grid::new(1, 2).unwrap();
        grid.set_path(vec![Pos::new(1, 1)]);
        let path = solve(&mut grid, Strategy::Bfs, Some((0, 0)), Some((0, 1))).unwrap();
        assert!(path.is_empty());
        assert!(grid.path().is_empty());
        assert_eq!(grid.at(Pos::new(1, 1)), Marker::Passage);
    }

    #[test]
    fn start_equal_to_end() {
        let mut grid = Grid::new(1, 1).unwrap();
        let path = solve(&mut grid, Strategy::Dfs, None, None).unwrap();
        assert_eq!(path, vec![Pos::new(1, 1)]);
    }

    #[test]
    fn rejects_endpoints_off_the_grid() {
        let mut grid = open_room();
        assert!(matches!(
            solve(&mut grid, Strategy::Bfs, Some((-1, 0)), None),
            Err(MazeError::InvalidPosition {
                endpoint: Endpoint::Start,
                ..
            })
        ));
        assert!(matches!(
            solve(&mut grid, Strategy::Bfs, None, Some((10, 10))),
            Err(MazeError::InvalidPosition {
                endpoint: Endpoint::End,
                ..
            })
        ));
    }

    #[test]
    fn rejects_endpoint_in_a_wall() {
        let mut cells = open_room().markers().to_vec();
        cells[3][3] = Marker::Wall;
        let mut grid = Grid::from_markers(cells).unwrap();
        assert!(matches!(
            solve(&mut grid, Strategy::Dfs, None, None),
            Err(MazeError::InvalidPosition {
                endpoint: Endpoint::End,
                reason: "inside a wall",
                ..
            })
        ));
    }

    #[test]
    fn bad_endpoint_leaves_previous_route() {
        let mut grid = open_room();
        let path = solve(&mut grid, Strategy::Bfs, None, None).unwrap();
        assert!(solve(&mut grid, Strategy::Bfs, Some((0, 9)), None).is_err());
        assert_eq!(grid.path(), path.as_slice());
    }
}
