use std::time::Instant;

use time::OffsetDateTime;

/// Landing strip state: only the live clock changes.
#[derive(Clone, Debug, Default)]
pub struct LandingState {
    pub clock: ClockState,
}

#[derive(Clone, Debug, Default)]
pub struct ClockState {
    /// Wall-clock time shown; `None` until the first frame.
    pub now: Option<OffsetDateTime>,
    pub last_tick: Option<Instant>,
}
