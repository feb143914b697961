//! Tick duration metrics.

use std::time::Duration;

use ferrum_utils::text::colored;

/// Records how long ticks take and derives a ticks-per-second estimate.
#[derive(Debug, Clone)]
pub struct TickRateManager {
    target_interval: Duration,
    last_tick: Duration,
    ticks_recorded: u64,
}

impl TickRateManager {
    /// Creates a manager aiming for one tick per `target_interval`.
    #[must_use]
    pub fn new(target_interval: Duration) -> Self {
        Self {
            target_interval,
            last_tick: Duration::ZERO,
            ticks_recorded: 0,
        }
    }

    /// Records the duration of a finished tick. Returns true if it overran the target interval.
    pub fn record(&mut self, elapsed: Duration) -> bool {
        self.last_tick = elapsed;
        self.ticks_recorded += 1;
        elapsed > self.target_interval
    }

    /// The target time between ticks.
    #[must_use]
    pub const fn target_interval(&self) -> Duration {
        self.target_interval
    }

    /// Number of ticks recorded.
    #[must_use]
    pub const fn ticks_recorded(&self) -> u64 {
        self.ticks_recorded
    }

    /// Whole milliseconds the last tick took.
    #[must_use]
    pub fn last_tick_millis(&self) -> u64 {
        self.last_tick.as_millis() as u64
    }

    /// `1000 / max(1, last tick ms)`, capped at the rate the target interval allows.
    #[must_use]
    pub fn tps(&self) -> u64 {
        let ceiling = 1000 / self.target_interval.as_millis().max(1) as u64;
        (1000 / self.last_tick_millis().max(1)).min(ceiling)
    }

    /// The tps as a colour coded chat string.
    #[must_use]
    pub fn tps_display(&self) -> String {
        let tps = self.tps();
        let code = match tps {
            0..=10 => 'c',
            11..=15 => 'e',
            _ => 'a',
        };
        colored(code, &tps.to_string())
    }
}
