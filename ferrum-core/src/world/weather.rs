//! Rain cycle.

use std::ops::Range;

use ferrum_protocol::packets::game::CGameEvent;
use rand::{Rng, RngCore};

use super::World;

/// Dry spells last this many ticks.
const CLEAR_TICKS: Range<i32> = 24_000..96_000;
/// Rain lasts this many ticks.
const RAIN_TICKS: Range<i32> = 12_000..36_000;

pub(super) struct Weather {
    raining: bool,
    ticks_until_change: i32,
    rng: Box<dyn RngCore + Send>,
}

impl Weather {
    /// Starts clear, with a dry spell drawn from `rng`.
    pub(super) fn new(mut rng: Box<dyn RngCore + Send>) -> Self {
        let ticks_until_change = rng.random_range(CLEAR_TICKS);
        Self {
            raining: false,
            ticks_until_change,
            rng,
        }
    }

    /// Counts down one tick. Returns the new state when the weather flips.
    fn advance(&mut self) -> Option<bool> {
        if self.ticks_until_change > 0 {
            self.ticks_until_change -= 1;
            return None;
        }
        self.raining = !self.raining;
        let range = if self.raining { RAIN_TICKS } else { CLEAR_TICKS };
        self.ticks_until_change = self.rng.random_range(range);
        Some(self.raining)
    }
}

impl World {
    /// Whether it is raining.
    #[must_use]
    pub fn is_raining(&self) -> bool {
        self.weather.lock().raining
    }

    /// Ticks left before the weather flips.
    #[must_use]
    pub fn ticks_until_weather_change(&self) -> i32 {
        self.weather.lock().ticks_until_change
    }

    /// Forces the weather. Broadcasts a change if `raining` differs from the current state.
    pub fn set_weather(&self, raining: bool, ticks_until_change: i32) {
        let changed = {
            let mut weather = self.weather.lock();
            let changed = weather.raining != raining;
            weather.raining = raining;
            weather.ticks_until_change = ticks_until_change.max(0);
            changed
        };
        if changed {
            self.broadcast(&CGameEvent::rain(raining));
        }
    }

    /// Advances the rain countdown, flipping the weather when it runs out.
    pub fn weather_tick(&self) {
        let changed = self.weather.lock().advance();
        if let Some(raining) = changed {
            log::debug!(
                "{} is now {}",
                self.level_name,
                if raining { "raining" } else { "clear" }
            );
            self.broadcast(&CGameEvent::rain(raining));
        }
    }
}
