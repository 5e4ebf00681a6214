//! UI components and resources for linking Bevy entities to session state

use bevy::prelude::*;

use crate::simulation::{GameSession, InputFrame, SessionConfig, SignalState, VehicleId};

/// Resource wrapper for the training session
#[derive(Resource)]
pub struct SessionResource {
    pub session: GameSession,
    /// Simulated seconds per fixed tick
    pub delta_secs: f64,
}

impl SessionResource {
    pub fn new(config: SessionConfig, delta_secs: f64) -> Self {
        Self {
            session: GameSession::new(config),
            delta_secs,
        }
    }
}

impl Default for SessionResource {
    fn default() -> Self {
        Self::new(SessionConfig::default(), 1.0 / 60.0)
    }
}

/// Input gathered between fixed ticks
///
/// Held keys are overwritten every frame; key presses accumulate until the
/// next fixed tick consumes them.
#[derive(Resource, Default)]
pub struct PendingInput(pub InputFrame);

/// Marker component for ground plane
#[derive(Component)]
pub struct Ground;

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Root entity of the avatar figure
#[derive(Component)]
pub struct AvatarRoot;

/// One of the avatar's legs; `side` is -1.0 for left and 1.0 for right
#[derive(Component)]
pub struct AvatarLeg {
    pub side: f32,
}

/// Links a Bevy entity to a vehicle slot
#[derive(Component)]
pub struct VehicleLink(pub VehicleId);

/// Root entity of the pedestrian figure
#[derive(Component)]
pub struct PedestrianFigure;

/// Marker over the current waypoint
#[derive(Component)]
pub struct TargetMarker;

/// Lamps whose color follows the signal state
#[derive(Component, Clone, Copy)]
pub enum SignalLamp {
    /// Light on the push-button box
    Button,
    /// One bulb of the car traffic light, lit in the given state
    Bulb(SignalState),
    /// Pedestrian walk indicator
    Walk,
}

/// Marker for HUD text elements
#[derive(Component, Clone, Copy)]
pub enum HudText {
    Status,
    Traffic,
    Deadline,
    Waypoint,
    GameOver,
}
