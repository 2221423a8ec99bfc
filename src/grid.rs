use std::io::{self, Write};

use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::QueueableCommand;
use log::debug;
use unicode_width::UnicodeWidthStr;

use crate::error::{MazeError, Result};
use crate::validator;

/// Terminal columns taken by one grid position.
const CELL_W: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    Wall,
    Passage,
    /// Passage that lies on the most recently solved route.
    Path,
}

impl Marker {
    pub fn is_wall(self) -> bool {
        self == Marker::Wall
    }

    /// Canonical array symbol: `0` wall, `1` passage, `.` path.
    pub fn symbol(self) -> char {
        match self {
            Marker::Wall => '0',
            Marker::Passage => '1',
            Marker::Path => '.',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Marker> {
        match symbol {
            '0' => Some(Marker::Wall),
            '1' => Some(Marker::Passage),
            '.' => Some(Marker::Path),
            _ => None,
        }
    }

    fn glyph(self) -> &'static str {
        match self {
            Marker::Wall => "██",
            Marker::Passage => "  ",
            Marker::Path => "·",
        }
    }

    fn color(self) -> Color {
        match self {
            Marker::Wall => Color::Blue,
            Marker::Passage => Color::Reset,
            Marker::Path => Color::Yellow,
        }
    }
}

/// A position in grid space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    /// Expansion order used by the search.
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    /// (row, col) offset.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
            Dir::Right => (0, 1),
        }
    }
}

/// Maps cell `(r, c)` to its marker position `(2r+1, 2c+1)`. No bounds check.
pub fn cell_to_grid_space(row: i64, col: i64) -> (i64, i64) {
    (2 * row + 1, 2 * col + 1)
}

/// A rectangular maze: `cell_height x cell_width` logical cells stored as a
/// `(2h+1) x (2w+1)` marker array with walls on the even lattice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cell_height: usize,
    cell_width: usize,
    cells: Vec<Vec<Marker>>,
    path: Vec<Pos>,
}

impl Grid {
    /// Creates an uncarved grid: every cell is an isolated passage.
    pub fn new(cell_height: usize, cell_width: usize) -> Result<Self> {
        if cell_height == 0 || cell_width == 0 {
            return Err(MazeError::InvalidDimension {
                height: cell_height,
                width: cell_width,
            });
        }
        let mut cells = vec![vec![Marker::Wall; 2 * cell_width + 1]; 2 * cell_height + 1];
        for r in 0..cell_height {
            for c in 0..cell_width {
                cells[2 * r + 1][2 * c + 1] = Marker::Passage;
            }
        }
        Ok(Self {
            cell_height,
            cell_width,
            cells,
            path: Vec::new(),
        })
    }

    /// Wraps an externally supplied marker array without structural checks.
    ///
    /// The array must be rectangular with odd sides of at least 3; the cell
    /// dimensions are derived from it. Use [`Grid::load`] or
    /// [`validator::validate`] to enforce the wall invariants.
    pub fn from_markers(cells: Vec<Vec<Marker>>) -> Result<Self> {
        let rows = cells.len();
        let cols = cells.first().map_or(0, Vec::len);
        if let Some(bad) = cells.iter().position(|row| row.len() != cols) {
            return Err(MazeError::MalformedInput(format!(
                "row {} has {} columns, expected {}",
                bad,
                cells[bad].len(),
                cols
            )));
        }
        if rows < 3 || cols < 3 || rows % 2 == 0 || cols % 2 == 0 {
            return Err(MazeError::MalformedInput(format!(
                "a {}x{} array does not describe a maze (sides must be odd and at least 3)",
                rows, cols
            )));
        }
        Ok(Self {
            cell_height: (rows - 1) / 2,
            cell_width: (cols - 1) / 2,
            cells,
            path: Vec::new(),
        })
    }

    /// Replaces this grid with an external array once it passes validation.
    /// On error `self` is left as it was.
    pub fn load(&mut self, cells: Vec<Vec<Marker>>) -> Result<()> {
        let loaded = Grid::from_markers(cells)?;
        validator::validate(&loaded)?;
        debug!("loaded {}x{} maze", loaded.cell_height, loaded.cell_width);
        *self = loaded;
        Ok(())
    }

    pub fn cell_height(&self) -> usize {
        self.cell_height
    }

    pub fn cell_width(&self) -> usize {
        self.cell_width
    }

    /// Number of marker rows.
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Number of marker columns.
    pub fn cols(&self) -> usize {
        self.cells[0].len()
    }

    pub fn markers(&self) -> &[Vec<Marker>] {
        &self.cells
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.cols()
    }

    pub fn get_marker(&self, row: usize, col: usize) -> Result<Marker> {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .ok_or(MazeError::OutOfBounds { row, col })
    }

    pub fn set_marker(&mut self, row: usize, col: usize, marker: Marker) -> Result<()> {
        let slot = self
            .cells
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(MazeError::OutOfBounds { row, col })?;
        *slot = marker;
        Ok(())
    }

    /// Marker at an in-bounds position.
    pub(crate) fn at(&self, pos: Pos) -> Marker {
        self.cells[pos.row][pos.col]
    }

    pub(crate) fn put(&mut self, pos: Pos, marker: Marker) {
        self.cells[pos.row][pos.col] = marker;
    }

    /// Orthogonal neighbour of `pos` in direction `dir`, if it is on the grid.
    pub fn step(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        let (dr, dc) = dir.delta();
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        self.contains(row, col).then_some(Pos { row, col })
    }

    /// The most recently solved route, empty if none.
    pub fn path(&self) -> &[Pos] {
        &self.path
    }

    /// Removes the path overlay, turning its markers back into passages.
    pub fn clear_path(&mut self) {
        for row in self.cells.iter_mut() {
            for marker in row.iter_mut() {
                if *marker == Marker::Path {
                    *marker = Marker::Passage;
                }
            }
        }
        self.path.clear();
    }

    /// Replaces the overlay with `path`.
    pub(crate) fn set_path(&mut self, path: Vec<Pos>) {
        self.clear_path();
        for pos in &path {
            let marker = &mut self.cells[pos.row][pos.col];
            if *marker == Marker::Passage {
                *marker = Marker::Path;
            }
        }
        self.path = path;
    }

    /// Plain text picture of the grid, one line per marker row.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.rows() * (self.cols() * CELL_W * 3 + 1));
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            for marker in row {
                let glyph = marker.glyph();
                out.push_str(glyph);
                let w = UnicodeWidthStr::width(glyph);
                for _ in w..CELL_W {
                    out.push(' ');
                }
            }
        }
        out
    }

    /// Writes the grid to a terminal, coloured when `color` is set.
    pub fn print_to<W: Write>(&self, out: &mut W, color: bool) -> io::Result<()> {
        if !color {
            writeln!(out, "{}", self.render())?;
            return out.flush();
        }
        for row in &self.cells {
            for marker in row {
                let glyph = marker.glyph();
                out.queue(SetForegroundColor(marker.color()))?;
                out.queue(Print(glyph))?;
                let w = UnicodeWidthStr::width(glyph);
                if w < CELL_W {
                    for _ in 0..(CELL_W - w) {
                        out.queue(Print(' '))?;
                    }
                }
            }
            out.queue(ResetColor)?;
            out.queue(Print('\n'))?;
        }
        out.flush()
    }
}
