use super::{
    grid::{Grid, WIDTH},
    shape::{PieceKind, Rgb, Shape},
};

/// Column offsets tried, in order, when a rotation does not fit in place.
pub const WALL_KICKS: [i32; 5] = [0, -1, 1, -2, 2];

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const fn spawn_col(shape_size: usize) -> i32 {
    ((WIDTH - shape_size) / 2) as i32
}

/// A piece placed on (or above) the playfield.
///
/// `row`/`col` locate the top-left corner of the shape's bounding box. Pieces are
/// values: moving and rotating return new pieces and never touch the grid.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Grid, Piece, PieceKind};
///
/// let grid = Grid::EMPTY;
/// let piece = Piece::spawn(PieceKind::T);
/// assert_eq!((piece.row(), piece.col()), (0, 3));
///
/// let landed = piece.drop_position(&grid);
/// assert_eq!(landed.row(), 18);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    shape: Shape,
    row: i32,
    col: i32,
}

impl Piece {
    /// Creates a piece in its spawn orientation, top-aligned and horizontally centered.
    #[must_use]
    pub const fn spawn(kind: PieceKind) -> Self {
        let shape = kind.base_shape();
        Self {
            kind,
            shape,
            row: 0,
            col: spawn_col(shape.size()),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub const fn color(&self) -> Rgb {
        self.kind.color()
    }

    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    #[must_use]
    pub const fn col(&self) -> i32 {
        self.col
    }

    #[must_use]
    pub fn fits(&self, grid: &Grid) -> bool {
        grid.is_valid_position(&self.shape, self.row, self.col)
    }

    #[must_use]
    pub const fn moved(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
            ..*self
        }
    }

    #[must_use]
    pub const fn down(&self) -> Self {
        self.moved(1, 0)
    }

    /// Rotates clockwise in place, without checking the grid.
    #[must_use]
    pub const fn rotated_right(&self) -> Self {
        Self {
            shape: self.shape.rotated_right(),
            ..*self
        }
    }

    /// Rotates clockwise, shifting sideways by the first [`WALL_KICKS`] offset that fits.
    ///
    /// Returns `None` when no offset fits.
    #[must_use]
    pub fn kicked_rotation(&self, grid: &Grid) -> Option<Self> {
        let rotated = self.rotated_right();
        WALL_KICKS
            .iter()
            .map(|&kick| rotated.moved(0, kick))
            .find(|piece| piece.fits(grid))
    }

    /// Returns this piece moved straight down as far as it fits.
    #[must_use]
    pub fn drop_position(&self, grid: &Grid) -> Self {
        let mut piece = *self;
        while piece.down().fits(grid) {
            piece = piece.down();
        }
        piece
    }

    /// Places the piece at an arbitrary position; used to build test scenarios.
    #[cfg(test)]
    pub(crate) const fn at(kind: PieceKind, row: i32, col: i32) -> Self {
        Self {
            kind,
            shape: kind.base_shape(),
            row,
            col,
        }
    }
}
