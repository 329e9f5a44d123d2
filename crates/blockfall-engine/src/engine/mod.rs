//! Game rules and session state.
//!
//! This module drives the plain data types from [`crate::core`] through a game:
//!
//! - [`Bag`] - 7-bag piece randomizer
//! - [`PieceController`] - Active and next pieces, movement, locking and line clears
//! - [`GameStats`] - Score, line and piece tallies
//! - [`GravityTimer`] - Repeating timer fed with elapsed time by the host
//! - [`GameSession`] - Start/pause/reset lifecycle, gravity and scoring
//! - [`SessionSnapshot`] - Serializable view of a session for redrawing
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] from a [`SessionConfig`] and call [`GameSession::start`]
//! 2. Forward player intents (move, rotate, soft drop, hard drop, pause)
//! 3. Report elapsed time with [`GameSession::advance`] to run gravity
//! 4. Redraw from [`GameSession::snapshot`] after every state change
//! 5. The session moves to game over when a new piece cannot spawn
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{GameSession, SessionConfig, SessionState};
//!
//! let mut session = GameSession::new(SessionConfig {
//!     seed: Some(42),
//!     ..SessionConfig::default()
//! });
//! session.start();
//!
//! // Rejected intents are errors the caller may ignore.
//! session.try_move_left().ok();
//! session.try_rotate().ok();
//!
//! while session.hard_drop().is_ok() {}
//!
//! assert!(matches!(session.state(), SessionState::GameOver { .. }));
//! ```

pub use self::{bag::*, config::*, controller::*, session::*, snapshot::*, stats::*, timer::*};

mod bag;
mod config;
mod controller;
mod session;
mod snapshot;
mod stats;
mod timer;
