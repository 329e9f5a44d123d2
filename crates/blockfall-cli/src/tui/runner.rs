use std::time::Duration;

use crate::tui::{App, event::TuiEvent, event_loop::EventLoop};

const DEFAULT_FRAME_RATE: f64 = 60.0;

/// TUI application runtime.
#[derive(Debug)]
pub struct Tui {
    events: EventLoop,
}

impl Default for Tui {
    fn default() -> Self {
        Self::new()
    }
}

impl Tui {
    pub fn new() -> Self {
        Self {
            events: EventLoop::new(Duration::from_secs_f64(1.0 / DEFAULT_FRAME_RATE)),
        }
    }

    /// Sets how often the application is updated (Hz).
    pub fn set_frame_rate(&mut self, rate: f64) {
        self.events
            .set_update_interval(Duration::from_secs_f64(1.0 / rate));
    }

    /// Runs the application.
    ///
    /// 1. Calls `app.init()`
    /// 2. Runs the event loop until `app.should_exit()` returns true
    ///    - `Update`: calls `app.update()` with the elapsed time
    ///    - `Render`: calls `app.draw()`
    ///    - `Crossterm`: calls `app.handle_event()`
    pub fn run<A>(mut self, app: &mut A) -> anyhow::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Update(elapsed) => app.update(&mut self, elapsed),
                    TuiEvent::Render => {
                        terminal.draw(|f| app.draw(f))?;
                    }
                    TuiEvent::Crossterm(event) => app.handle_event(&mut self, event),
                }
            }
            Ok(())
        })
    }
}
