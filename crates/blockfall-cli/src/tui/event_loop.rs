use std::time::{Duration, Instant};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Event loop state management.
///
/// Emits an update event every `update_interval` with the measured elapsed
/// time, renders whenever something changed, and otherwise waits on crossterm.
#[derive(Debug)]
pub(super) struct EventLoop {
    update_interval: Duration,
    last_update: Instant,
    dirty: bool,
}

impl EventLoop {
    pub(super) fn new(update_interval: Duration) -> Self {
        Self {
            update_interval,
            last_update: Instant::now(),
            dirty: true, // first frame
        }
    }

    pub(super) fn set_update_interval(&mut self, interval: Duration) {
        self.update_interval = interval;
    }

    /// Returns the next event.
    ///
    /// Blocks until an update is due, a render is pending, or a crossterm event arrives.
    pub(super) fn next(&mut self) -> anyhow::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            let elapsed = now.duration_since(self.last_update);
            if elapsed >= self.update_interval {
                self.last_update = now;
                self.dirty = true;
                return Ok(TuiEvent::Update(elapsed));
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            let timeout = (self.last_update + self.update_interval).saturating_duration_since(now);
            if !event::poll(timeout)? {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }
}
