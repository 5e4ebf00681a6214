//! Vehicle spawning and management for the crossing simulation
//!
//! The fleet is a fixed number of slots created once per session from a
//! seeded generator. Destroyed vehicles stay in their slot until reset.

use log::info;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;

use super::signal::SignalState;
use super::types::{Position, VehicleId};
use super::vehicle::{SimVehicle, VehicleUpdateResult, VEHICLE_BOUNDS};

/// Number of vehicles in a default session
pub const DEFAULT_VEHICLE_COUNT: usize = 5;

/// Base speed per tick before the per-vehicle multiplier
pub const VEHICLE_BASE_SPEED: f32 = 0.12;

/// Range of the per-vehicle speed multiplier
pub const VEHICLE_SPEED_FACTOR: (f32, f32) = (0.8, 1.3);

/// Lane Z coordinates vehicles are assigned to
pub const LANES: [f32; 4] = [-4.0, -5.0, -7.0, -8.5];

/// Body height of every vehicle
pub const VEHICLE_HEIGHT: f32 = 0.6;

const DIRECTIONS: [f32; 2] = [-1.0, 1.0];

/// All vehicles of a session, in slot order
#[derive(Debug, Clone, Default)]
pub struct VehicleFleet {
    pub vehicles: Vec<SimVehicle>,
}

impl VehicleFleet {
    /// Build `count` vehicles from `rng`.
    ///
    /// Each slot draws lane, position, direction and speed in that order, so a
    /// generator seeded with the same value always yields the same fleet.
    pub fn spawn(rng: &mut StdRng, count: usize) -> Self {
        let mut vehicles = Vec::with_capacity(count);
        for slot in 0..count {
            let lane = *LANES.choose(rng).unwrap_or(&LANES[0]);
            let x = rng.random_range(VEHICLE_BOUNDS.0..VEHICLE_BOUNDS.1);
            let direction = *DIRECTIONS.choose(rng).unwrap_or(&DIRECTIONS[1]);
            let speed =
                VEHICLE_BASE_SPEED * rng.random_range(VEHICLE_SPEED_FACTOR.0..VEHICLE_SPEED_FACTOR.1);

            vehicles.push(SimVehicle::new(
                VehicleId(slot),
                Position::new(x, VEHICLE_HEIGHT, lane),
                direction,
                speed,
            ));
        }
        Self { vehicles }
    }

    /// Update all vehicles against this tick's signal state.
    ///
    /// Returns the vehicles destroyed on this tick.
    pub fn update(&mut self, signal: SignalState) -> Vec<VehicleId> {
        let mut destroyed = Vec::new();
        for vehicle in &mut self.vehicles {
            if vehicle.update(signal) == VehicleUpdateResult::Destroyed {
                info!(
                    "Vehicle {} ran the red light at x={:.2}, lane z={:.1}",
                    vehicle.id.0, vehicle.position.x, vehicle.position.z
                );
                destroyed.push(vehicle.id);
            }
        }
        destroyed
    }

    pub fn get(&self, id: VehicleId) -> Option<&SimVehicle> {
        self.vehicles.get(id.0)
    }

    /// Vehicles still on the road
    pub fn alive(&self) -> impl Iterator<Item = &SimVehicle> {
        self.vehicles.iter().filter(|v| v.alive)
    }

    pub fn destroyed_count(&self) -> usize {
        self.vehicles.iter().filter(|v| !v.alive).count()
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}
