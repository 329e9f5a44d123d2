use std::time::Duration;

use crossterm::event::Event as CrosstermEvent;

/// Events processed by TUI applications.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// Update timing, carrying the wall time since the previous update.
    #[from(ignore)]
    Update(Duration),
    /// Screen render timing.
    Render,
    /// Terminal events such as key input and resize.
    Crossterm(CrosstermEvent),
}
