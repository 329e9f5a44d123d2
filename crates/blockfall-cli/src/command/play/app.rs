use std::time::Duration;

use blockfall_engine::GameSession;
use crossterm::event::Event;
use ratatui::Frame;

use crate::{
    command::play::screen::PlayScreen,
    tui::{App, Tui},
};

const FPS: f64 = 60.0;

#[derive(Debug)]
pub struct PlayApp {
    screen: PlayScreen,
}

impl PlayApp {
    pub fn new(session: GameSession, show_ghost: bool) -> Self {
        Self {
            screen: PlayScreen::new(session, show_ghost),
        }
    }

    pub fn final_score(&self) -> usize {
        self.screen.session().score()
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_frame_rate(FPS);
    }

    fn should_exit(&self) -> bool {
        self.screen.is_exiting()
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: Event) {
        self.screen.handle_event(&event);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }

    fn update(&mut self, _tui: &mut Tui, elapsed: Duration) {
        self.screen.update(elapsed);
    }
}
