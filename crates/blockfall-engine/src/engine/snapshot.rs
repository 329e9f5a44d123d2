use serde::Serialize;

use crate::core::{
    grid::{Grid, HEIGHT, WIDTH},
    piece::Piece,
    shape::{PieceKind, Rgb, Shape},
};

use super::session::SessionState;

/// Serializable view of a piece in play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Rgb,
    pub row: i32,
    pub col: i32,
}

impl From<Piece> for PieceSnapshot {
    fn from(piece: Piece) -> Self {
        Self {
            kind: piece.kind(),
            shape: *piece.shape(),
            color: piece.color(),
            row: piece.row(),
            col: piece.col(),
        }
    }
}

/// Everything a front end needs to redraw a session.
///
/// Pieces and the ghost row are absent while the session is idle; the ghost
/// row is also absent after game over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    /// Locked cells, row 0 first; `None` is empty.
    pub grid: [[Option<Rgb>; WIDTH]; HEIGHT],
    pub active: Option<PieceSnapshot>,
    pub ghost_row: Option<i32>,
    pub next: Option<PieceSnapshot>,
    pub score: usize,
    pub lines: usize,
    pub drop_interval_ms: u64,
}

pub(crate) fn grid_colors(grid: &Grid) -> [[Option<Rgb>; WIDTH]; HEIGHT] {
    let mut colors = [[None; WIDTH]; HEIGHT];
    for (dst, row) in colors.iter_mut().zip(grid.rows()) {
        for (dst, cell) in dst.iter_mut().zip(row) {
            *dst = cell.color();
        }
    }
    colors
}
