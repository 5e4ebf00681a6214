//! Monotonic session clock
//!
//! Every timer in the simulation compares against the elapsed time reported
//! here. Time only moves when the session ticks, so runs are reproducible.
//!
//! Elapsed time is derived as `ticks * step` rather than summed tick by tick,
//! so phase boundaries land on the tick that reaches them at any tick rate.

/// Elapsed simulated time since the session started
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    ticks: u64,
    /// Time accumulated before the current step size took effect
    base: f64,
    step: f64,
    ticks_at_step: u64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one tick of `delta_secs`. Negative deltas count as zero.
    pub fn advance(&mut self, delta_secs: f64) {
        let delta = delta_secs.max(0.0);
        if delta != self.step {
            self.base = self.elapsed();
            self.step = delta;
            self.ticks_at_step = 0;
        }
        self.ticks_at_step += 1;
        self.ticks += 1;
    }

    /// Seconds since the session started
    pub fn elapsed(&self) -> f64 {
        self.base + self.ticks_at_step as f64 * self.step
    }

    /// Number of simulated ticks since the session started
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
