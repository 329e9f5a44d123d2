use std::time::Duration;

use blockfall_engine::{GameSession, SessionState};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Text,
};

use crate::ui::widgets::{SessionDisplay, style};

/// A player intent decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    Start,
    TogglePause,
    Reset,
    Quit,
}

impl Action {
    fn from_key(event: &KeyEvent) -> Option<Self> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        let action = match event.code {
            KeyCode::Left => Action::MoveLeft,
            KeyCode::Right => Action::MoveRight,
            KeyCode::Down => Action::SoftDrop,
            KeyCode::Up => Action::Rotate,
            KeyCode::Char(' ') => Action::HardDrop,
            KeyCode::Char('s' | 'S') => Action::Start,
            KeyCode::Char('p' | 'P') => Action::TogglePause,
            KeyCode::Char('r' | 'R') => Action::Reset,
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => Action::Quit,
            _ => return None,
        };
        Some(action)
    }
}

#[derive(Debug)]
pub struct PlayScreen {
    session: GameSession,
    show_ghost: bool,
    is_exiting: bool,
}

impl PlayScreen {
    pub fn new(session: GameSession, show_ghost: bool) -> Self {
        Self {
            session,
            show_ghost,
            is_exiting: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let snapshot = self.session.snapshot();
        let session_display = SessionDisplay::new(&snapshot)
            .stats(self.session.stats())
            .ghost(self.show_ghost);
        let help_text = match snapshot.state {
            SessionState::Idle => "Controls: S (Start) | Q (Quit)",
            SessionState::Running => {
                "Controls: ← → (Move) | ↓ (Soft Drop) | ↑ (Rotate) | Space (Hard Drop) | P (Pause) | R (Reset) | Q (Quit)"
            }
            SessionState::Paused => "Controls: P (Resume) | R (Reset) | Q (Quit)",
            SessionState::GameOver { .. } => "Controls: S (New Game) | R (Reset) | Q (Quit)",
        };
        let help_text = Text::from(help_text).style(style::HELP).centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(22), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help_text, help_area);
    }

    pub fn handle_event(&mut self, event: &Event) {
        if let Some(action) = event.as_key_event().and_then(|key| Action::from_key(&key)) {
            self.apply(action);
        }
    }

    /// Forwards an action to the session. Rejected intents are ignored.
    fn apply(&mut self, action: Action) {
        match action {
            Action::MoveLeft => _ = self.session.try_move_left(),
            Action::MoveRight => _ = self.session.try_move_right(),
            Action::SoftDrop => _ = self.session.soft_drop(),
            Action::Rotate => _ = self.session.try_rotate(),
            Action::HardDrop => _ = self.session.hard_drop(),
            Action::Start => self.session.start(),
            Action::TogglePause => self.session.toggle_pause(),
            Action::Reset => self.session.reset(),
            Action::Quit => self.is_exiting = true,
        }
    }

    pub fn update(&mut self, elapsed: Duration) {
        self.session.advance(elapsed);
    }
}
