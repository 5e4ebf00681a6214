//! Vehicle movement logic for the crossing simulation
//!
//! Standalone implementation that doesn't depend on Bevy.

use super::signal::SignalState;
use super::types::{Position, VehicleId, CROSSWALK_X_SPAN, ROAD_X_LEFT, ROAD_X_RIGHT, STOP_LINE_Z};

/// Vehicles oscillate between these X coordinates
pub const VEHICLE_BOUNDS: (f32, f32) = (ROAD_X_LEFT + 1.2, ROAD_X_RIGHT - 1.2);

/// Lane distance from the stop line within which a red signal halts a vehicle
pub const STOP_WINDOW: f32 = 1.0;

/// Lane distance from the stop line within which entering the crossing on red
/// destroys the vehicle
pub const VIOLATION_WINDOW: f32 = 0.6;

/// Half extents of a vehicle's footprint (X, Z)
pub const VEHICLE_HALF_EXTENTS: (f32, f32) = (0.9, 0.45);

/// Result of a vehicle update indicating what happened this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleUpdateResult {
    /// Vehicle advanced along its lane (possibly bouncing off a bound)
    Moved,
    /// Vehicle is held at the stop line by a red signal
    Stopped,
    /// Vehicle entered the crossing on red and was destroyed
    Destroyed,
    /// Vehicle was already destroyed and did nothing
    Inactive,
}

/// A vehicle driving back and forth along one lane
#[derive(Debug, Clone, PartialEq)]
pub struct SimVehicle {
    pub id: VehicleId,
    /// `x` moves; `z` is the lane and `y` the body height, both fixed
    pub position: Position,
    /// +1.0 or -1.0 along X
    pub direction: f32,
    pub speed: f32,
    pub alive: bool,
}

impl SimVehicle {
    pub fn new(id: VehicleId, position: Position, direction: f32, speed: f32) -> Self {
        Self {
            id,
            position,
            direction,
            speed,
            alive: true,
        }
    }

    /// Lane distance to the stop line
    pub fn stop_line_distance(&self) -> f32 {
        (self.position.z - STOP_LINE_Z).abs()
    }

    /// Whether a red signal forces this vehicle to stand still
    pub fn must_stop(&self, signal: SignalState) -> bool {
        signal == SignalState::RedForCars && self.stop_line_distance() <= STOP_WINDOW
    }

    /// Whether moving at full speed this tick would run the red light into
    /// the crossing
    pub fn is_violating(&self, signal: SignalState) -> bool {
        if signal != SignalState::RedForCars || self.stop_line_distance() > VIOLATION_WINDOW {
            return false;
        }
        let projected = self.position.x + self.direction * self.speed;
        let in_bounds = (VEHICLE_BOUNDS.0..=VEHICLE_BOUNDS.1).contains(&projected);
        let in_crossing = (CROSSWALK_X_SPAN.0..=CROSSWALK_X_SPAN.1).contains(&projected);
        in_bounds && in_crossing
    }

    /// Update vehicle movement for one tick against the current signal
    pub fn update(&mut self, signal: SignalState) -> VehicleUpdateResult {
        if !self.alive {
            return VehicleUpdateResult::Inactive;
        }

        // A violating vehicle is removed instead of moved
        if self.is_violating(signal) {
            self.alive = false;
            return VehicleUpdateResult::Destroyed;
        }

        let stopped = self.must_stop(signal);
        let speed = if stopped { 0.0 } else { self.speed };
        let mut next_x = self.position.x + self.direction * speed;

        if next_x < VEHICLE_BOUNDS.0 {
            next_x = VEHICLE_BOUNDS.0;
            self.direction = -self.direction;
        } else if next_x > VEHICLE_BOUNDS.1 {
            next_x = VEHICLE_BOUNDS.1;
            self.direction = -self.direction;
        }
        self.position.x = next_x;

        if stopped {
            VehicleUpdateResult::Stopped
        } else {
            VehicleUpdateResult::Moved
        }
    }
}
