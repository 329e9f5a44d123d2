use serde::{Serialize, Serializer};

/// Largest bounding box used by any catalog shape (the I-piece).
pub const MAX_SHAPE_SIZE: usize = 4;

/// A 24-bit RGB color identifier.
///
/// Displays and serializes as a `#rrggbb` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("#{r:02x}{g:02x}{b:02x}")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Serialize for Rgb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// The seven piece kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Returns the fixed color of this kind.
    #[must_use]
    pub const fn color(self) -> Rgb {
        match self {
            PieceKind::I => Rgb::new(0x0e, 0xa5, 0xe9),
            PieceKind::J => Rgb::new(0x63, 0x66, 0xf1),
            PieceKind::L => Rgb::new(0xf9, 0x73, 0x16),
            PieceKind::O => Rgb::new(0xfa, 0xcc, 0x15),
            PieceKind::S => Rgb::new(0x22, 0xc5, 0x5e),
            PieceKind::T => Rgb::new(0xc0, 0x84, 0xfc),
            PieceKind::Z => Rgb::new(0xef, 0x44, 0x44),
        }
    }

    /// Returns the spawn orientation of this kind.
    ///
    /// Every other orientation is derived with [`Shape::rotated_right`].
    #[must_use]
    pub const fn base_shape(self) -> Shape {
        match self {
            PieceKind::I => Shape::from_rows([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
            PieceKind::J => Shape::from_rows([[1, 0, 0], [1, 1, 1], [0, 0, 0]]),
            PieceKind::L => Shape::from_rows([[0, 0, 1], [1, 1, 1], [0, 0, 0]]),
            PieceKind::O => Shape::from_rows([[1, 1], [1, 1]]),
            PieceKind::S => Shape::from_rows([[0, 1, 1], [1, 1, 0], [0, 0, 0]]),
            PieceKind::T => Shape::from_rows([[0, 1, 0], [1, 1, 1], [0, 0, 0]]),
            PieceKind::Z => Shape::from_rows([[1, 1, 0], [0, 1, 1], [0, 0, 0]]),
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }
}

/// A square occupancy matrix in piece-local coordinates.
///
/// Only the top-left `size × size` corner of the backing storage is
/// meaningful; the rest stays empty so rotation never needs re-centering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Builds a shape from an `N × N` matrix of `0`/`1` values.
    #[must_use]
    pub const fn from_rows<const N: usize>(rows: [[u8; N]; N]) -> Self {
        assert!(N >= 1 && N <= MAX_SHAPE_SIZE);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut r = 0;
        while r < N {
            let mut c = 0;
            while c < N {
                cells[r][c] = rows[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        #[expect(clippy::cast_possible_truncation)]
        let size = N as u8;
        Self { size, cells }
    }

    /// Side length of the bounding box.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size as usize
    }

    /// Returns whether the local cell is occupied; out-of-box cells are not.
    #[must_use]
    pub const fn is_occupied(&self, row: usize, col: usize) -> bool {
        row < self.size() && col < self.size() && self.cells[row][col]
    }

    /// Iterates over occupied cells as `(row, col)` offsets from the top-left corner.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.size).flat_map(move |r| {
            (0..self.size)
                .filter(move |&c| self.cells[usize::from(r)][usize::from(c)])
                .map(move |c| (i32::from(r), i32::from(c)))
        })
    }

    /// Iterates over the rows of the bounding box.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells[..self.size()]
            .iter()
            .map(|row| &row[..self.size()])
    }

    /// Rotates the shape 90° clockwise: `rotated[i][j] = original[N-1-j][i]`.
    #[must_use]
    pub const fn rotated_right(&self) -> Self {
        let n = self.size();
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut i = 0;
        while i < n {
            let mut j = 0;
            while j < n {
                cells[i][j] = self.cells[n - 1 - j][i];
                j += 1;
            }
            i += 1;
        }
        Self {
            size: self.size,
            cells,
        }
    }
}

impl Serialize for Shape {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Rows as strings of '#' and '.', e.g. [".#.", "###", "..."]
        serializer.collect_seq(self.rows().map(|row| {
            row.iter()
                .map(|&occupied| if occupied { '#' } else { '.' })
                .collect::<String>()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_sizes() {
        let sizes: Vec<_> = PieceKind::ALL
            .iter()
            .map(|kind| kind.base_shape().size())
            .collect();
        assert_eq!(sizes, [4, 3, 3, 2, 3, 3, 3]);
    }

    #[test]
    fn test_every_kind_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(kind.base_shape().occupied_cells().count(), 4, "{kind:?}");
        }
    }

    #[test]
    fn test_rotate_four_times_is_identity() {
        for kind in PieceKind::ALL {
            let shape = kind.base_shape();
            let mut rotated = shape;
            for _ in 0..4 {
                rotated = rotated.rotated_right();
            }
            assert_eq!(rotated, shape, "{kind:?}");
        }
    }

    #[test]
    fn test_rotate_changes_orientation() {
        for kind in [PieceKind::I, PieceKind::J, PieceKind::L, PieceKind::T] {
            let shape = kind.base_shape();
            assert_ne!(shape.rotated_right(), shape, "{kind:?}");
        }
        let o = PieceKind::O.base_shape();
        assert_eq!(o.rotated_right(), o);
    }

    #[test]
    fn test_rotate_t_clockwise() {
        // .#.      .#.
        // ###  ->  .##
        // ...      .#.
        let rotated = PieceKind::T.base_shape().rotated_right();
        let expected = Shape::from_rows([[0, 1, 0], [0, 1, 1], [0, 1, 0]]);
        assert_eq!(rotated, expected);
    }

    #[test]
    fn test_rotate_i_is_vertical_in_third_column() {
        let rotated = PieceKind::I.base_shape().rotated_right();
        let cells: Vec<_> = rotated.occupied_cells().collect();
        assert_eq!(cells, [(0, 2), (1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn test_is_occupied_outside_box() {
        let o = PieceKind::O.base_shape();
        assert!(o.is_occupied(1, 1));
        assert!(!o.is_occupied(2, 0));
        assert!(!o.is_occupied(0, 2));
    }

    #[test]
    fn test_color_display() {
        assert_eq!(PieceKind::I.color().to_string(), "#0ea5e9");
        assert_eq!(PieceKind::Z.color().to_string(), "#ef4444");
    }

    #[test]
    fn test_shape_serialization() {
        let json = serde_json::to_string(&PieceKind::S.base_shape()).unwrap();
        assert_eq!(json, "[\".##\",\"##.\",\"...\"]");
    }

    #[test]
    fn test_piece_kind_chars() {
        let chars: String = PieceKind::ALL.iter().map(|kind| kind.as_char()).collect();
        assert_eq!(chars, "IJLOSTZ");
    }
}
