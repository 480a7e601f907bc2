//! Animation clock with a one-way start latch.

use log::warn;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClockState {
    started: bool,
    elapsed: f32,
    delta: f32,
}

impl ClockState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch the clock into the running state. Returns true only on the first call.
    pub fn start(&mut self) -> bool {
        let first = !self.started;
        self.started = true;
        first
    }

    #[inline]
    pub fn started(&self) -> bool {
        self.started
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Advance by `dt` seconds. Frozen (delta 0) until started; negative or
    /// non-finite deltas count as zero so elapsed time never goes backwards.
    pub fn tick(&mut self, dt: f32) {
        if !self.started {
            self.delta = 0.0;
            return;
        }
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            warn!("clock: ignoring invalid frame delta {dt}");
            0.0
        };
        self.delta = dt;
        self.elapsed += dt;
    }
}
