use std::time::Duration;

use crate::config::ClockMode;

/// Monotonic animation time for one surface instance.
///
/// Advanced exactly once per tick. `Elapsed` mode accumulates scaled real
/// frame deltas; `Counter` mode steps by a fixed amount per frame the way the
/// frame-stepped variants animate. Either way the value never decreases and
/// never resets while the instance is mounted.
#[derive(Clone, Copy, Debug)]
pub struct AnimationClock {
    mode: ClockMode,
    elapsed: f32,
}

impl AnimationClock {
    pub fn new(mode: ClockMode) -> Self {
        Self { mode, elapsed: 0.0 }
    }

    /// Advance by one frame and return the new time.
    pub fn advance(&mut self, dt: Duration) -> f32 {
        let step = match self.mode {
            ClockMode::Elapsed { scale } => dt.as_secs_f32() * scale,
            ClockMode::Counter { step } => step,
        };
        // Duration is non-negative and steps are validated positive, so this
        // can only grow.
        self.elapsed += step;
        self.elapsed
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}
