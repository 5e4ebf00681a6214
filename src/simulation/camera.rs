//! Smoothed follow camera

use super::types::Position;

/// Camera position when a session starts
pub const CAMERA_START: Position = Position {
    x: 0.0,
    y: 4.5,
    z: 10.0,
};

/// Fixed height of the follow target
pub const CAMERA_HEIGHT: f32 = 4.5;

/// How far behind the avatar (along +Z) the camera sits
pub const CAMERA_TRAIL: f32 = 8.0;

/// Fraction of the remaining distance covered each tick
pub const CAMERA_LAG: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct CameraRig {
    pub position: Position,
    pub lag: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            position: CAMERA_START,
            lag: CAMERA_LAG,
        }
    }
}

impl CameraRig {
    pub fn target_for(avatar: &Position) -> Position {
        Position::new(avatar.x, CAMERA_HEIGHT, avatar.z + CAMERA_TRAIL)
    }

    /// Blend one step toward the follow target on each axis
    pub fn update(&mut self, avatar: &Position) {
        let target = Self::target_for(avatar);
        self.position.x += (target.x - self.position.x) * self.lag;
        self.position.y += (target.y - self.position.y) * self.lag;
        self.position.z += (target.z - self.position.z) * self.lag;
    }
}
