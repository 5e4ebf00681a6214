//! Timed appearances of the elderly pedestrian
//!
//! The pedestrian waits on the sidewalk next to the crossing button. She
//! appears on a randomised schedule and leaves once the avatar walks up to
//! her. The session fails if she has not appeared often enough by the
//! deadline.

use log::debug;
use rand::rngs::StdRng;
use rand::Rng;

use super::types::{Position, CROSSWALK_Z};

/// Where the pedestrian appears
pub const PEDESTRIAN_LOCATION: Position = Position {
    x: -8.3,
    y: 0.0,
    z: CROSSWALK_Z + 0.2,
};

/// First appearance happens early so the rule is visible
pub const FIRST_SPAWN_SECS: f64 = 3.0;

/// Range the gap between scheduled appearances is drawn from
pub const SPAWN_INTERVAL_SECS: (f64, f64) = (6.0, 14.0);

/// The avatar clears the pedestrian by coming closer than this
pub const DESPAWN_RADIUS: f32 = 2.5;

/// Time by which the pedestrian must have appeared often enough
pub const APPEARANCE_DEADLINE_SECS: f64 = 60.0;

/// Appearances required before the deadline
pub const REQUIRED_APPEARANCES: u32 = 3;

/// What the scheduler did on one update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PedestrianUpdate {
    pub spawned: bool,
    pub cleared: bool,
}

/// Appearance scheduler for the pedestrian
#[derive(Debug, Clone)]
pub struct PedestrianScheduler {
    pub exists: bool,
    pub appearances: u32,
    /// Absolute time of the next scheduled appearance
    pub next_spawn_at: f64,
    pub location: Position,
    rng: StdRng,
}

impl PedestrianScheduler {
    pub fn new(rng: StdRng) -> Self {
        Self {
            exists: false,
            appearances: 0,
            next_spawn_at: FIRST_SPAWN_SECS,
            location: PEDESTRIAN_LOCATION,
            rng,
        }
    }

    /// Spawn on schedule, then clear her if the avatar is close
    pub fn update(&mut self, elapsed: f64, avatar: &Position) -> PedestrianUpdate {
        let spawned = self.maybe_spawn(elapsed);
        let cleared = self.maybe_clear(avatar);
        PedestrianUpdate { spawned, cleared }
    }

    fn maybe_spawn(&mut self, elapsed: f64) -> bool {
        if elapsed < self.next_spawn_at || self.exists {
            return false;
        }
        self.appear();

        // Measured from the previous scheduled time, not from now: a late
        // spawn leaves less time until the next one.
        let interval = self
            .rng
            .random_range(SPAWN_INTERVAL_SECS.0..SPAWN_INTERVAL_SECS.1);
        self.next_spawn_at += interval;
        debug!(
            "Pedestrian appeared at {:.2}s (#{}), next scheduled at {:.2}s",
            elapsed, self.appearances, self.next_spawn_at
        );
        true
    }

    fn maybe_clear(&mut self, avatar: &Position) -> bool {
        if !self.exists {
            return false;
        }
        if avatar.planar_distance_squared(&self.location) < DESPAWN_RADIUS * DESPAWN_RADIUS {
            self.exists = false;
            debug!("Pedestrian cleared by the avatar");
            return true;
        }
        false
    }

    /// Make her appear immediately, bypassing the schedule.
    /// Returns false if she is already present.
    pub fn force_spawn(&mut self) -> bool {
        if self.exists {
            return false;
        }
        self.appear();
        debug!("Pedestrian force-spawned (#{})", self.appearances);
        true
    }

    fn appear(&mut self) {
        self.exists = true;
        self.appearances += 1;
    }

    /// Whether the deadline has passed without enough appearances
    pub fn deadline_missed(&self, elapsed: f64) -> bool {
        elapsed >= APPEARANCE_DEADLINE_SECS && self.appearances < REQUIRED_APPEARANCES
    }

    /// Seconds until the deadline check, floored at zero
    pub fn time_remaining(elapsed: f64) -> f64 {
        (APPEARANCE_DEADLINE_SECS - elapsed).max(0.0)
    }
}
