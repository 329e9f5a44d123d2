use super::shape::{Rgb, Shape};

/// Number of columns in the playfield.
pub const WIDTH: usize = 10;
/// Number of rows in the playfield.
pub const HEIGHT: usize = 20;

/// A single cell of the playfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::IsVariant)]
pub enum Cell {
    #[default]
    Empty,
    /// Locked block with the color of the piece it came from.
    Filled(Rgb),
}

impl Cell {
    #[must_use]
    pub const fn color(self) -> Option<Rgb> {
        match self {
            Cell::Empty => None,
            Cell::Filled(color) => Some(color),
        }
    }
}

/// One row of the playfield, left to right.
pub type Row = [Cell; WIDTH];

const EMPTY_ROW: Row = [Cell::Empty; WIDTH];

/// The fixed-size matrix of locked cells.
///
/// Row 0 is the top of the playfield and row `HEIGHT - 1` the bottom. Shapes
/// are placed by the top-left corner of their bounding box, which may sit
/// above the visible area (negative row) while a piece spawns.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Grid, PieceKind};
///
/// let mut grid = Grid::EMPTY;
/// let shape = PieceKind::O.base_shape();
/// assert!(grid.is_valid_position(&shape, 18, 0));
/// grid.merge(&shape, 18, 0, PieceKind::O.color());
/// assert!(!grid.is_valid_position(&shape, 18, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: [Row; HEIGHT],
}

impl Default for Grid {
    fn default() -> Self {
        Self::EMPTY
    }
}

fn column_index(col: i32) -> Option<usize> {
    usize::try_from(col).ok().filter(|&c| c < WIDTH)
}

impl Grid {
    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; HEIGHT],
    };

    /// Returns the cell at `(row, col)`, or `None` outside the playfield.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.rows.get(row)?.get(col).copied()
    }

    /// Iterates over rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().flatten().all(|cell| cell.is_empty())
    }

    /// Checks whether `shape` fits with its top-left corner at `(origin_row, origin_col)`.
    ///
    /// Every occupied cell must land inside the side walls and above the floor.
    /// Cells above the top edge are allowed; cells inside the playfield must be empty.
    #[must_use]
    pub fn is_valid_position(&self, shape: &Shape, origin_row: i32, origin_col: i32) -> bool {
        shape.occupied_cells().all(|(dr, dc)| {
            let Some(col) = column_index(origin_col + dc) else {
                return false;
            };
            match usize::try_from(origin_row + dr) {
                // Above the top edge.
                Err(_) => true,
                Ok(row) => row < HEIGHT && self.rows[row][col].is_empty(),
            }
        })
    }

    /// Writes `color` into every occupied cell of `shape` that lies inside the playfield.
    ///
    /// This is the lock step; cells above the top edge are dropped.
    pub fn merge(&mut self, shape: &Shape, origin_row: i32, origin_col: i32, color: Rgb) {
        for (dr, dc) in shape.occupied_cells() {
            let Ok(row) = usize::try_from(origin_row + dr) else {
                continue;
            };
            let Some(col) = column_index(origin_col + dc) else {
                continue;
            };
            if let Some(cell) = self.rows.get_mut(row).map(|r| &mut r[col]) {
                *cell = Cell::Filled(color);
            }
        }
    }

    /// Removes every completely filled row and returns how many were removed.
    ///
    /// Rows above a removed row shift down; empty rows fill in from the top.
    pub fn clear_lines(&mut self) -> usize {
        // Rows at index >= `write` hold the compacted result.
        let mut write = HEIGHT;
        for read in (0..HEIGHT).rev() {
            if self.rows[read].iter().all(|cell| cell.is_filled()) {
                continue;
            }
            write -= 1;
            if write != read {
                self.rows[write] = self.rows[read];
            }
        }
        self.rows[..write].fill(EMPTY_ROW);
        write
    }

    /// Builds a grid from text rows aligned to the bottom of the playfield.
    ///
    /// `.` is empty, anything else is a filled cell.
    #[cfg(test)]
    pub(crate) fn from_text(lines: &[&str]) -> Self {
        const STACK: Rgb = Rgb::new(0x80, 0x80, 0x80);
        let mut grid = Self::EMPTY;
        let top = HEIGHT - lines.len();
        for (row, line) in grid.rows[top..].iter_mut().zip(lines) {
            assert_eq!(line.len(), WIDTH, "row {line:?} must be {WIDTH} wide");
            for (cell, ch) in row.iter_mut().zip(line.chars()) {
                if ch != '.' {
                    *cell = Cell::Filled(STACK);
                }
            }
        }
        grid
    }
}
