use tracing::debug;

use crate::{
    PieceCollisionError, TopOutError,
    core::{grid::Grid, piece::Piece},
};

use super::bag::Bag;

/// Result of locking the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceLock {
    /// Lines removed by this lock.
    pub cleared_lines: usize,
    /// `Err` when the promoted piece does not fit at its spawn position.
    pub spawn: Result<(), TopOutError>,
}

impl PieceLock {
    #[must_use]
    pub fn is_top_out(&self) -> bool {
        self.spawn.is_err()
    }
}

/// Owns the playfield and the pieces in play.
///
/// Every movement is validated against the grid before it is applied; rejected
/// movements leave the controller untouched.
#[derive(Debug, Clone)]
pub struct PieceController {
    grid: Grid,
    bag: Bag,
    active: Piece,
    next: Piece,
}

impl PieceController {
    /// Deals the active and next pieces onto an empty grid.
    #[must_use]
    pub fn new(mut bag: Bag) -> Self {
        let active = Piece::spawn(bag.next_piece());
        let next = Piece::spawn(bag.next_piece());
        Self {
            grid: Grid::EMPTY,
            bag,
            active,
            next,
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn active(&self) -> Piece {
        self.active
    }

    #[must_use]
    pub fn next(&self) -> Piece {
        self.next
    }

    /// Row the active piece would come to rest at if dropped now.
    #[must_use]
    pub fn ghost_row(&self) -> i32 {
        self.active.drop_position(&self.grid).row()
    }

    fn set_active(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if !piece.fits(&self.grid) {
            return Err(PieceCollisionError);
        }
        self.active = piece;
        Ok(())
    }

    /// Shifts the active piece sideways by `d_col` columns.
    pub fn try_move(&mut self, d_col: i32) -> Result<(), PieceCollisionError> {
        self.set_active(self.active.moved(0, d_col))
    }

    pub fn try_move_down(&mut self) -> Result<(), PieceCollisionError> {
        self.set_active(self.active.down())
    }

    /// Rotates the active piece clockwise using the wall-kick offsets.
    pub fn try_rotate(&mut self) -> Result<(), PieceCollisionError> {
        let piece = self
            .active
            .kicked_rotation(&self.grid)
            .ok_or(PieceCollisionError)?;
        self.active = piece;
        Ok(())
    }

    /// Moves the active piece down one row, or locks it if it cannot move.
    ///
    /// Returns `None` when the piece moved.
    pub fn soft_drop(&mut self) -> Option<PieceLock> {
        if self.try_move_down().is_ok() {
            return None;
        }
        Some(self.lock_active())
    }

    /// Drops the active piece as far as it goes and locks it.
    ///
    /// Returns the number of rows descended along with the lock result.
    pub fn hard_drop(&mut self) -> (usize, PieceLock) {
        let mut rows = 0;
        while self.try_move_down().is_ok() {
            rows += 1;
        }
        (rows, self.lock_active())
    }

    /// Merges the active piece, clears lines and promotes the next piece.
    pub fn lock_active(&mut self) -> PieceLock {
        let piece = self.active;
        self.grid
            .merge(piece.shape(), piece.row(), piece.col(), piece.color());
        let cleared_lines = self.grid.clear_lines();
        debug!(
            kind = %piece.kind().as_char(),
            row = piece.row(),
            col = piece.col(),
            cleared_lines,
            "piece locked"
        );

        self.active = self.next;
        self.next = Piece::spawn(self.bag.next_piece());

        let spawn = if self.active.fits(&self.grid) {
            Ok(())
        } else {
            Err(TopOutError)
        };
        PieceLock {
            cleared_lines,
            spawn,
        }
    }

    /// Builds a controller around a prepared grid and pieces.
    #[cfg(test)]
    pub(crate) fn from_parts(grid: Grid, active: Piece, next: Piece, bag: Bag) -> Self {
        Self {
            grid,
            bag,
            active,
            next,
        }
    }
}
