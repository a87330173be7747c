use std::time::{Duration, Instant};

use time::OffsetDateTime;

use super::EguiController;

/// The landing clock shows seconds.
const CLOCK_INTERVAL: Duration = Duration::from_secs(1);

impl EguiController {
    /// Refresh the landing clock when a full interval has elapsed.
    ///
    /// Returns true when the displayed time changed.
    pub fn tick_clock(&mut self, instant: Instant, wall: OffsetDateTime) -> bool {
        let clock = &mut self.ui.landing.clock;
        let due = clock
            .last_tick
            .is_none_or(|last| instant.saturating_duration_since(last) >= CLOCK_INTERVAL);
        if due {
            clock.now = Some(wall);
            clock.last_tick = Some(instant);
        }
        due
    }

    /// Time left until the clock next needs a frame.
    pub fn clock_refresh_in(&self, instant: Instant) -> Duration {
        match self.ui.landing.clock.last_tick {
            Some(last) => CLOCK_INTERVAL.saturating_sub(instant.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }
}
