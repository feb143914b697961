//! The day/night cycle.

use ferrum_protocol::packets::game::CSetTime;

use super::World;
use crate::config::TICKS_PER_DAY;

/// Time of day, day counter and monotonic world age.
#[derive(Debug, Clone, Copy)]
pub(super) struct WorldClock {
    /// Always in `0..TICKS_PER_DAY`.
    time: i64,
    /// Starts at 1.
    day: i64,
    /// Ticks since the world was created. Never wraps.
    game_time: u64,
}

impl WorldClock {
    pub(super) fn new(initial_time: i64) -> Self {
        Self {
            time: initial_time.rem_euclid(TICKS_PER_DAY),
            day: 1,
            game_time: 0,
        }
    }

    /// Advances one tick. Reaching the end of the day wraps to 0 and starts the next day.
    fn advance(&mut self) {
        self.game_time += 1;
        self.time += 1;
        if self.time >= TICKS_PER_DAY {
            self.time = 0;
            self.day += 1;
        }
    }
}

impl World {
    /// Time of day, `0..24000`.
    #[must_use]
    pub fn world_time(&self) -> i64 {
        self.clock.lock().time
    }

    /// Sets the time of day. Values outside a day are reduced modulo 24000.
    pub fn set_world_time(&self, time: i64) {
        let packet = {
            let mut clock = self.clock.lock();
            clock.time = time.rem_euclid(TICKS_PER_DAY);
            CSetTime {
                day: clock.day,
                time_of_day: clock.time,
            }
        };
        self.broadcast(&packet);
    }

    /// Days since the world started, counting from 1.
    #[must_use]
    pub fn day(&self) -> i64 {
        self.clock.lock().day
    }

    /// Ticks since the world was created.
    #[must_use]
    pub fn game_time(&self) -> u64 {
        self.clock.lock().game_time
    }

    /// Advances the clock by one tick and broadcasts the new time.
    pub fn day_tick(&self) {
        let packet = {
            let mut clock = self.clock.lock();
            clock.advance();
            CSetTime {
                day: clock.day,
                time_of_day: clock.time,
            }
        };
        self.broadcast(&packet);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_day_returns_to_same_time() {
        for start in [0, 1, 1200, 12_000, 23_998, 23_999] {
            let mut clock = WorldClock::new(start);
            for _ in 0..TICKS_PER_DAY {
                clock.advance();
            }
            assert_eq!(clock.time, start);
            assert_eq!(clock.day, 2);
            assert_eq!(clock.game_time, TICKS_PER_DAY as u64);
        }
    }

    #[test]
    fn test_wrap_at_end_of_day() {
        let mut clock = WorldClock::new(23_999);
        clock.advance();
        assert_eq!((clock.time, clock.day), (0, 2));
    }
}
