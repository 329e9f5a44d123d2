use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Armed {
    interval: Duration,
    elapsed: Duration,
}

/// Repeating gravity timer driven by externally supplied elapsed time.
///
/// The timer never reads a clock. The host feeds it time through
/// [`advance`](Self::advance), which reports how many whole intervals have
/// passed. Disarming drops any partial interval, so re-arming always starts
/// a fresh period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GravityTimer {
    armed: Option<Armed>,
}

impl GravityTimer {
    /// Shortest accepted period; a zero interval would fire forever.
    pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

    #[must_use]
    pub const fn disarmed() -> Self {
        Self { armed: None }
    }

    /// Starts a new period of `interval`, discarding any time already accumulated.
    pub fn arm(&mut self, interval: Duration) {
        self.armed = Some(Armed {
            interval: interval.max(Self::MIN_INTERVAL),
            elapsed: Duration::ZERO,
        });
    }

    pub fn disarm(&mut self) {
        self.armed = None;
    }

    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        self.armed.map(|armed| armed.interval)
    }

    /// Accumulates `elapsed` and returns the number of ticks now due.
    ///
    /// A disarmed timer ignores the time and returns 0.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let Some(armed) = &mut self.armed else {
            return 0;
        };
        armed.elapsed += elapsed;
        let mut due = 0;
        while armed.elapsed >= armed.interval {
            armed.elapsed -= armed.interval;
            due += 1;
        }
        due
    }
}
