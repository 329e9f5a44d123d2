use std::{mem, time::Duration};

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::{
    IntentError,
    core::{grid::Grid, piece::Piece},
};

use super::{
    bag::Bag,
    config::SessionConfig,
    controller::{PieceController, PieceLock},
    snapshot::{PieceSnapshot, SessionSnapshot, grid_colors},
    stats::GameStats,
    timer::GravityTimer,
};

/// Public lifecycle state of a [`GameSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Running,
    Paused,
    GameOver { final_score: usize },
}

#[derive(Debug, Clone)]
struct Round {
    controller: PieceController,
    stats: GameStats,
}

#[derive(Debug, Clone)]
enum Phase {
    Idle,
    Running(Round),
    Paused(Round),
    GameOver(Round),
}

impl Phase {
    fn round(&self) -> Option<&Round> {
        match self {
            Phase::Idle => None,
            Phase::Running(round) | Phase::Paused(round) | Phase::GameOver(round) => Some(round),
        }
    }
}

/// A single game: lifecycle, gravity and scoring around a [`PieceController`].
///
/// The session never reads a clock. Hosts report elapsed time through
/// [`advance`](Self::advance) and the session turns it into gravity ticks.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::{GameSession, SessionConfig};
///
/// let mut session = GameSession::new(SessionConfig {
///     seed: Some(1),
///     ..SessionConfig::default()
/// });
/// session.start();
///
/// let row = session.active_piece().unwrap().row();
/// assert_eq!(session.advance(Duration::from_millis(800)), 1);
/// assert_eq!(session.active_piece().unwrap().row(), row + 1);
///
/// session.hard_drop().unwrap();
/// assert!(session.score() > 0);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    config: SessionConfig,
    drop_interval: Duration,
    timer: GravityTimer,
    phase: Phase,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl GameSession {
    /// Creates an idle session. Nothing is dealt until [`start`](Self::start).
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            drop_interval: config.drop_interval,
            timer: GravityTimer::disarmed(),
            phase: Phase::Idle,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        match &self.phase {
            Phase::Idle => SessionState::Idle,
            Phase::Running(_) => SessionState::Running,
            Phase::Paused(_) => SessionState::Paused,
            Phase::GameOver(round) => SessionState::GameOver {
                final_score: round.stats.score(),
            },
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running(_))
    }

    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        self.drop_interval
    }

    /// Changes the gravity period. A running session restarts its timer at the new period.
    pub fn set_drop_interval(&mut self, interval: Duration) {
        self.drop_interval = interval;
        if self.timer.is_armed() {
            self.timer.arm(interval);
        }
    }

    #[must_use]
    pub fn timer(&self) -> &GravityTimer {
        &self.timer
    }

    fn new_bag(&self) -> Bag {
        self.config.seed.map_or_else(Bag::new, Bag::with_seed)
    }

    /// Starts a fresh game from any state, discarding the current one.
    pub fn start(&mut self) {
        self.drop_interval = self.config.drop_interval;
        self.phase = Phase::Running(Round {
            controller: PieceController::new(self.new_bag()),
            stats: GameStats::new(),
        });
        self.timer.arm(self.drop_interval);
        info!(
            seed = ?self.config.seed,
            drop_interval_ms = self.drop_interval.as_millis(),
            "game started"
        );
    }

    /// Switches between running and paused. Has no effect when idle or after game over.
    pub fn toggle_pause(&mut self) {
        self.phase = match mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Running(round) => {
                self.timer.disarm();
                debug!("game paused");
                Phase::Paused(round)
            }
            Phase::Paused(round) => {
                self.timer.arm(self.drop_interval);
                debug!("game resumed");
                Phase::Running(round)
            }
            phase => phase,
        };
    }

    /// Discards the game and returns to idle.
    pub fn reset(&mut self) {
        self.timer.disarm();
        self.drop_interval = self.config.drop_interval;
        self.phase = Phase::Idle;
        info!("game reset");
    }

    /// Feeds elapsed wall time to the gravity timer and runs every tick that
    /// falls due.
    ///
    /// Stops early once a tick ends the game. Returns the number of ticks run.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let due = self.timer.advance(elapsed);
        let mut fired = 0;
        for _ in 0..due {
            if !self.timer.is_armed() {
                break;
            }
            self.tick();
            fired += 1;
        }
        fired
    }

    /// One gravity step: moves the active piece down a row, locking it if it
    /// cannot move. Does nothing unless running.
    pub fn tick(&mut self) {
        let Phase::Running(round) = &mut self.phase else {
            return;
        };
        trace!("gravity tick");
        if let Some(lock) = round.controller.soft_drop() {
            self.apply_lock(lock);
        }
    }

    fn running_round(&mut self) -> Result<&mut Round, IntentError> {
        match &mut self.phase {
            Phase::Running(round) => Ok(round),
            _ => Err(IntentError::NotRunning),
        }
    }

    pub fn try_move_left(&mut self) -> Result<(), IntentError> {
        self.running_round()?.controller.try_move(-1)?;
        Ok(())
    }

    pub fn try_move_right(&mut self) -> Result<(), IntentError> {
        self.running_round()?.controller.try_move(1)?;
        Ok(())
    }

    pub fn try_rotate(&mut self) -> Result<(), IntentError> {
        self.running_round()?.controller.try_rotate()?;
        Ok(())
    }

    /// Moves the active piece down one row for a point, or locks it when it rests.
    pub fn soft_drop(&mut self) -> Result<(), IntentError> {
        let round = self.running_round()?;
        match round.controller.soft_drop() {
            None => round.stats.add_soft_drop(1),
            Some(lock) => self.apply_lock(lock),
        }
        Ok(())
    }

    /// Drops the active piece to its resting row and locks it, scoring per row descended.
    pub fn hard_drop(&mut self) -> Result<(), IntentError> {
        let round = self.running_round()?;
        let (rows, lock) = round.controller.hard_drop();
        round.stats.add_hard_drop(rows);
        self.apply_lock(lock);
        Ok(())
    }

    fn apply_lock(&mut self, lock: PieceLock) {
        let Phase::Running(round) = &mut self.phase else {
            return;
        };
        round.stats.complete_piece_drop(lock.cleared_lines);
        if lock.cleared_lines > 0 {
            debug!(
                cleared_lines = lock.cleared_lines,
                score = round.stats.score(),
                lines = round.stats.total_cleared_lines(),
                "lines cleared"
            );
        }
        if lock.is_top_out() {
            self.end_game();
        }
    }

    fn end_game(&mut self) {
        self.timer.disarm();
        self.phase = match mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Running(round) | Phase::Paused(round) => {
                info!(
                    score = round.stats.score(),
                    lines = round.stats.total_cleared_lines(),
                    pieces = round.stats.completed_pieces(),
                    "game over"
                );
                Phase::GameOver(round)
            }
            phase => phase,
        };
    }

    /// Locked cells. Empty while idle.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        self.phase
            .round()
            .map_or(&Grid::EMPTY, |round| round.controller.grid())
    }

    #[must_use]
    pub fn active_piece(&self) -> Option<Piece> {
        self.phase.round().map(|round| round.controller.active())
    }

    #[must_use]
    pub fn next_piece(&self) -> Option<Piece> {
        self.phase.round().map(|round| round.controller.next())
    }

    /// Resting row of the active piece. Only present while a game is in progress.
    #[must_use]
    pub fn ghost_row(&self) -> Option<i32> {
        match &self.phase {
            Phase::Running(round) | Phase::Paused(round) => Some(round.controller.ghost_row()),
            Phase::Idle | Phase::GameOver(_) => None,
        }
    }

    #[must_use]
    pub fn stats(&self) -> Option<&GameStats> {
        self.phase.round().map(|round| &round.stats)
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats().map_or(0, GameStats::score)
    }

    #[must_use]
    pub fn lines(&self) -> usize {
        self.stats().map_or(0, GameStats::total_cleared_lines)
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state(),
            grid: grid_colors(self.grid()),
            active: self.active_piece().map(PieceSnapshot::from),
            ghost_row: self.ghost_row(),
            next: self.next_piece().map(PieceSnapshot::from),
            score: self.score(),
            lines: self.lines(),
            drop_interval_ms: u64::try_from(self.drop_interval.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Builds a running session around a prepared controller.
    #[cfg(test)]
    fn running_with(controller: PieceController) -> Self {
        let mut session = Self::default();
        session.phase = Phase::Running(Round {
            controller,
            stats: GameStats::new(),
        });
        session.timer.arm(session.drop_interval);
        session
    }
}

#[cfg(test)]
mod tests {
    use crate::{PieceCollisionError, core::shape::PieceKind};

    use super::*;

    const INTERVAL: Duration = Duration::from_millis(800);

    fn seeded(seed: u64) -> GameSession {
        GameSession::new(SessionConfig {
            seed: Some(seed),
            ..SessionConfig::default()
        })
    }

    fn prepared(grid: Grid, active: Piece) -> GameSession {
        GameSession::running_with(PieceController::from_parts(
            grid,
            active,
            Piece::spawn(PieceKind::T),
            Bag::with_seed(0),
        ))
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = GameSession::default();
        assert!(session.state().is_idle());
        assert!(!session.timer().is_armed());
        assert!(session.grid().is_empty());
        assert_eq!(session.active_piece(), None);
        assert_eq!(session.next_piece(), None);
        assert_eq!(session.ghost_row(), None);
        assert_eq!(session.score(), 0);
        assert_eq!(session.lines(), 0);
        assert_eq!(session.drop_interval(), INTERVAL);
    }

    #[test]
    fn test_intents_require_running() {
        let mut session = seeded(1);
        assert!(session.try_move_left().unwrap_err().is_not_running());
        assert!(session.try_move_right().unwrap_err().is_not_running());
        assert!(session.try_rotate().unwrap_err().is_not_running());
        assert!(session.soft_drop().unwrap_err().is_not_running());
        assert!(session.hard_drop().unwrap_err().is_not_running());

        session.start();
        session.toggle_pause();
        let before = session.snapshot();
        assert!(session.hard_drop().unwrap_err().is_not_running());
        assert!(session.soft_drop().unwrap_err().is_not_running());
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_start_deals_pieces_and_arms_timer() {
        let mut session = seeded(5);
        session.start();
        assert!(session.is_running());
        assert_eq!(session.timer().interval(), Some(INTERVAL));
        let active = session.active_piece().unwrap();
        assert_eq!(active, Piece::spawn(active.kind()));
        assert!(session.next_piece().is_some());
        assert!(session.grid().is_empty());
    }

    #[test]
    fn test_same_seed_deals_same_pieces() {
        let mut a = seeded(11);
        let mut b = seeded(11);
        a.start();
        b.start();
        for _ in 0..5 {
            assert_eq!(a.active_piece(), b.active_piece());
            a.hard_drop().unwrap();
            b.hard_drop().unwrap();
        }
    }

    #[test]
    fn test_advance_runs_gravity() {
        let mut session = seeded(2);
        session.start();
        let row = session.active_piece().unwrap().row();
        assert_eq!(session.advance(Duration::from_millis(799)), 0);
        assert_eq!(session.advance(Duration::from_millis(1)), 1);
        assert_eq!(session.active_piece().unwrap().row(), row + 1);
        assert_eq!(session.advance(INTERVAL * 2), 2);
        assert_eq!(session.active_piece().unwrap().row(), row + 3);
        // gravity scores nothing
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_pause_suspends_gravity() {
        let mut session = seeded(3);
        session.start();
        let row = session.active_piece().unwrap().row();
        assert_eq!(session.advance(Duration::from_millis(700)), 0);

        session.toggle_pause();
        assert_eq!(session.state(), SessionState::Paused);
        assert!(!session.timer().is_armed());
        assert_eq!(session.advance(Duration::from_secs(10)), 0);
        session.tick();
        assert_eq!(session.active_piece().unwrap().row(), row);
        assert!(session.ghost_row().is_some());

        session.toggle_pause();
        assert!(session.is_running());
        // resumed timer starts a fresh interval
        assert_eq!(session.advance(Duration::from_millis(700)), 0);
        assert_eq!(session.advance(Duration::from_millis(100)), 1);
        assert_eq!(session.active_piece().unwrap().row(), row + 1);
    }

    #[test]
    fn test_pause_ignored_when_idle() {
        let mut session = GameSession::default();
        session.toggle_pause();
        assert!(session.state().is_idle());
        assert!(!session.timer().is_armed());
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut session = seeded(4);
        session.start();
        session.set_drop_interval(Duration::from_millis(50));
        session.hard_drop().unwrap();
        assert!(session.score() > 0);

        session.reset();
        assert!(session.state().is_idle());
        assert!(!session.timer().is_armed());
        assert!(session.grid().is_empty());
        assert_eq!(session.score(), 0);
        assert_eq!(session.active_piece(), None);
        assert_eq!(session.drop_interval(), INTERVAL);
    }

    #[test]
    fn test_set_drop_interval_rearms_running_timer() {
        let mut session = seeded(4);
        session.start();
        session.set_drop_interval(Duration::from_millis(50));
        assert_eq!(session.timer().interval(), Some(Duration::from_millis(50)));
        assert_eq!(session.advance(Duration::from_millis(100)), 2);

        session.start();
        assert_eq!(session.drop_interval(), INTERVAL);
    }

    #[test]
    fn test_move_rejection_is_collision() {
        let mut session = prepared(Grid::EMPTY, Piece::at(PieceKind::O, 10, 0));
        assert_eq!(
            session.try_move_left(),
            Err(IntentError::Collision(PieceCollisionError))
        );
        session.try_move_right().unwrap();
        assert_eq!(session.active_piece().unwrap().col(), 1);
    }

    #[test]
    fn test_soft_drop_scores_one_per_row() {
        let mut session = seeded(6);
        session.start();
        let row = session.active_piece().unwrap().row();
        session.soft_drop().unwrap();
        session.soft_drop().unwrap();
        assert_eq!(session.active_piece().unwrap().row(), row + 2);
        assert_eq!(session.score(), 2);
    }

    #[test]
    fn test_hard_drop_scores_two_per_row() {
        let mut session = seeded(7);
        session.start();
        let piece = session.active_piece().unwrap();
        let ghost = session.ghost_row().unwrap();
        let rows = usize::try_from(ghost - piece.row()).unwrap();

        session.hard_drop().unwrap();
        assert_eq!(session.score(), 2 * rows);
        assert_eq!(session.lines(), 0);
        assert_eq!(session.stats().unwrap().completed_pieces(), 1);
        assert!(!session.grid().is_empty());
        assert!(session.is_running());
    }

    #[test]
    fn test_single_line_clear() {
        let grid = Grid::from_text(&["###....###"]);
        let mut session = prepared(grid, Piece::at(PieceKind::I, 18, 3));
        session.tick();
        assert_eq!(session.score(), 100);
        assert_eq!(session.lines(), 1);
        assert!(session.grid().is_empty());
        assert!(session.is_running());
    }

    #[test]
    fn test_o_piece_double_clear() {
        let grid = Grid::from_text(&["####..####", "####..####"]);
        let mut session = prepared(grid, Piece::at(PieceKind::O, 18, 4));
        session.tick();
        assert_eq!(session.score(), 300);
        assert_eq!(session.lines(), 2);
        assert!(session.grid().is_empty());
        assert_eq!(session.stats().unwrap().line_cleared_counter()[2], 1);
    }

    #[test]
    fn test_game_over_when_spawn_blocked() {
        let mut lines = [".........."; 20];
        lines[0] = "...####...";
        lines[1] = "...####...";
        let mut session = prepared(Grid::from_text(&lines), Piece::at(PieceKind::O, 18, 0));

        session.tick();
        assert_eq!(session.state(), SessionState::GameOver { final_score: 0 });
        assert!(!session.timer().is_armed());
        assert_eq!(session.ghost_row(), None);

        let before = session.snapshot();
        session.tick();
        assert_eq!(session.advance(Duration::from_secs(5)), 0);
        session.toggle_pause();
        assert_eq!(session.snapshot(), before);
        assert!(session.hard_drop().unwrap_err().is_not_running());

        session.start();
        assert!(session.is_running());
        assert!(session.grid().is_empty());
    }

    #[test]
    fn test_advance_stops_at_game_over() {
        let mut lines = [".........."; 20];
        lines[0] = "...####...";
        lines[1] = "...####...";
        let mut session = prepared(Grid::from_text(&lines), Piece::at(PieceKind::O, 17, 0));
        assert_eq!(session.advance(INTERVAL * 10), 2);
        assert!(session.state().is_game_over());
    }

    #[test]
    fn test_idle_snapshot_json() {
        let session = GameSession::default();
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["state"], serde_json::json!({ "phase": "idle" }));
        assert_eq!(json["active"], serde_json::Value::Null);
        assert_eq!(json["ghost_row"], serde_json::Value::Null);
        assert_eq!(json["score"], 0);
        assert_eq!(json["drop_interval_ms"], 800);
        assert_eq!(json["grid"].as_array().unwrap().len(), 20);
        assert_eq!(json["grid"][0].as_array().unwrap().len(), 10);
    }

    #[test]
    fn test_running_snapshot_json() {
        let grid = Grid::from_text(&["#........."]);
        let mut session = prepared(grid, Piece::at(PieceKind::O, 5, 4));
        session.soft_drop().unwrap();
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["state"]["phase"], "running");
        assert_eq!(json["score"], 1);
        assert_eq!(json["ghost_row"], 18);
        assert_eq!(json["grid"][19][0], "#808080");
        assert_eq!(json["grid"][19][1], serde_json::Value::Null);
        assert_eq!(
            json["active"],
            serde_json::json!({
                "kind": "O",
                "shape": ["##", "##"],
                "color": "#facc15",
                "row": 6,
                "col": 4,
            })
        );
        assert_eq!(json["next"]["kind"], "T");
    }

    #[test]
    fn test_game_over_snapshot_json() {
        let mut lines = [".........."; 20];
        lines[0] = "...####...";
        let mut session = prepared(Grid::from_text(&lines), Piece::at(PieceKind::O, 18, 0));
        session.hard_drop().unwrap();
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(
            json["state"],
            serde_json::json!({ "phase": "game_over", "final_score": 0 })
        );
    }
}
