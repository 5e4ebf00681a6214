//! Avatar movement for the crossing simulation
//!
//! Converts the four movement intents into a new avatar position.

use super::input::MovementIntent;
use super::types::{Position, GROUND_Z_MAX, GROUND_Z_MIN};

/// Where the avatar stands when a session starts
pub const AVATAR_START: Position = Position {
    x: 0.0,
    y: 0.0,
    z: 6.0,
};

/// Distance covered per tick for each active intent
pub const AVATAR_STEP: f32 = 0.12;

/// Playable area the avatar is clamped to
pub const PLAY_AREA_X: (f32, f32) = (-11.5, 11.5);
pub const PLAY_AREA_Z: (f32, f32) = (GROUND_Z_MIN + 1.0, GROUND_Z_MAX - 1.0);

/// Half extent of the avatar's square footprint
pub const AVATAR_HALF_EXTENT: f32 = 0.25;

const LEG_SWING_STEP: f32 = 5.0;
const LEG_SWING_LIMIT: f32 = 30.0;
const LEG_SWING_DECAY: f32 = 0.85;
const LEG_SWING_SNAP: f32 = 0.5;

/// The player-controlled avatar
#[derive(Debug, Clone)]
pub struct Avatar {
    pub position: Position,
    pub alive: bool,
    /// Cosmetic leg swing in degrees
    pub leg_angle: f32,
    leg_direction: f32,
}

impl Default for Avatar {
    fn default() -> Self {
        Self::new()
    }
}

impl Avatar {
    pub fn new() -> Self {
        Self {
            position: AVATAR_START,
            alive: true,
            leg_angle: 0.0,
            leg_direction: 1.0,
        }
    }

    /// Apply one tick of movement input.
    /// Returns true if any movement intent was active.
    ///
    /// Intents add independently, so diagonal movement covers more ground
    /// than a single axis.
    pub fn apply_input(&mut self, intent: &MovementIntent) -> bool {
        if !self.alive {
            return false;
        }

        if intent.forward {
            self.position.z -= AVATAR_STEP;
        }
        if intent.back {
            self.position.z += AVATAR_STEP;
        }
        if intent.left {
            self.position.x -= AVATAR_STEP;
        }
        if intent.right {
            self.position.x += AVATAR_STEP;
        }

        self.position.x = self.position.x.clamp(PLAY_AREA_X.0, PLAY_AREA_X.1);
        self.position.z = self.position.z.clamp(PLAY_AREA_Z.0, PLAY_AREA_Z.1);

        let moving = intent.any();
        self.swing_legs(moving);
        moving
    }

    fn swing_legs(&mut self, moving: bool) {
        if moving {
            self.leg_angle += self.leg_direction * LEG_SWING_STEP;
            if self.leg_angle.abs() > LEG_SWING_LIMIT {
                self.leg_direction = -self.leg_direction;
            }
        } else {
            self.leg_angle *= LEG_SWING_DECAY;
            if self.leg_angle.abs() < LEG_SWING_SNAP {
                self.leg_angle = 0.0;
            }
        }
    }
}
