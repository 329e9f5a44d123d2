/// Score values for line clears.
///
/// Index corresponds to number of lines cleared simultaneously:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
const SCORE_TABLE: [usize; 5] = [0, 100, 300, 500, 800];

/// Points per row descended with a soft drop.
pub const SOFT_DROP_POINTS: usize = 1;
/// Points per row descended with a hard drop.
pub const HARD_DROP_POINTS: usize = 2;

/// Score and line tallies for one game.
///
/// # Scoring
///
/// - Soft drop: [`SOFT_DROP_POINTS`] per row
/// - Hard drop: [`HARD_DROP_POINTS`] per row
/// - Line clear: 100 / 300 / 500 / 800 for 1 / 2 / 3 / 4 lines
///
/// No level multipliers, combos or back-to-back bonuses.
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.add_hard_drop(10);
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 820);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the total number of pieces that have been locked.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by lines cleared (index 0 counts locks that cleared nothing).
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    pub const fn add_soft_drop(&mut self, rows: usize) {
        self.score += rows * SOFT_DROP_POINTS;
    }

    pub const fn add_hard_drop(&mut self, rows: usize) {
        self.score += rows * HARD_DROP_POINTS;
    }

    /// Updates statistics after a piece locks.
    ///
    /// # Arguments
    ///
    /// * `cleared_lines` - Number of lines the lock cleared
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) {
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if let Some(count) = self.line_cleared_counter.get_mut(cleared_lines) {
            *count += 1;
        }
        self.score += SCORE_TABLE.get(cleared_lines).copied().unwrap_or(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_scores() {
        for (lines, expected) in [(0, 0), (1, 100), (2, 300), (3, 500), (4, 800)] {
            let mut stats = GameStats::new();
            stats.complete_piece_drop(lines);
            assert_eq!(stats.score(), expected, "{lines} lines");
            assert_eq!(stats.total_cleared_lines(), lines);
            assert_eq!(stats.completed_pieces(), 1);
        }
    }

    #[test]
    fn test_out_of_table_clear_scores_nothing() {
        let mut stats = GameStats::new();
        stats.complete_piece_drop(5);
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.total_cleared_lines(), 5);
        assert_eq!(stats.line_cleared_counter(), &[0; 5]);
    }

    #[test]
    fn test_drop_points() {
        let mut stats = GameStats::new();
        stats.add_soft_drop(3);
        assert_eq!(stats.score(), 3);
        stats.add_hard_drop(7);
        assert_eq!(stats.score(), 17);
        assert_eq!(stats.completed_pieces(), 0);
    }

    #[test]
    fn test_line_cleared_counter() {
        let mut stats = GameStats::new();
        for lines in [0, 1, 1, 2, 4, 0, 0] {
            stats.complete_piece_drop(lines);
        }
        assert_eq!(stats.line_cleared_counter(), &[3, 2, 1, 0, 1]);
        assert_eq!(stats.total_cleared_lines(), 8);
        assert_eq!(stats.score(), 100 + 100 + 300 + 800);
    }
}
