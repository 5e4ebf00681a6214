//! Main training session that ties everything together
//!
//! This is the entry point for running the crossing simulation without any
//! Bevy dependencies. The session owns every entity and runs the subsystems
//! in a fixed order once per tick.

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::camera::CameraRig;
use super::clock::SimClock;
use super::collision::find_collision;
use super::fleet::{VehicleFleet, DEFAULT_VEHICLE_COUNT};
use super::game_state::{SessionStatus, TerminalReason};
use super::input::InputFrame;
use super::pedestrian::{PedestrianScheduler, REQUIRED_APPEARANCES};
use super::player::Avatar;
use super::signal::{SignalState, TrafficSignal};
use super::types::{
    Position, VehicleId, CROSSWALK_X_SPAN, CROSSWALK_Z, GROUND_Z_MAX, GROUND_Z_MIN, ROAD_X_LEFT,
    ROAD_X_RIGHT, ROAD_Z_FAR, ROAD_Z_NEAR, STOP_LINE_Z,
};
use super::waypoint::WaypointTracker;

/// Seed every session starts from unless configured otherwise
pub const DEFAULT_SEED: u64 = 42;

/// Mixed into the seed for the pedestrian schedule so it draws from its own
/// stream, independent of the fleet layout
const SCHEDULE_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

/// Runtime knobs for a session; `reset` rebuilds from the same values
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub seed: u64,
    pub vehicle_count: usize,
    /// Start with cheat mode on
    pub cheat: bool,
    /// End the session with `Completed` on reaching the final waypoint
    pub complete_on_final_waypoint: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            vehicle_count: DEFAULT_VEHICLE_COUNT,
            cheat: false,
            complete_on_final_waypoint: false,
        }
    }
}

/// Something notable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    CheatToggled(bool),
    CrossingRequested,
    SignalChanged(SignalState),
    VehicleDestroyed(VehicleId),
    PedestrianSpawned { appearances: u32, forced: bool },
    PedestrianCleared,
    /// A collision was detected; `suppressed` is true in cheat mode
    Collision { vehicle: VehicleId, suppressed: bool },
    WaypointReached(usize),
    Ended(TerminalReason),
    Reset,
}

/// Outcome of a single tick
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub events: Vec<SessionEvent>,
    /// The frame asked to quit; the driving loop decides what to do with it
    pub quit_requested: bool,
    /// The session was rebuilt on this tick and did not simulate
    pub reset: bool,
}

impl TickReport {
    pub fn contains(&self, event: &SessionEvent) -> bool {
        self.events.contains(event)
    }
}

/// Read-only view of a vehicle for renderers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleView {
    pub id: VehicleId,
    pub position: Position,
    pub direction: f32,
    pub alive: bool,
}

/// Everything a renderer or HUD needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub tick: u64,
    pub elapsed: f64,
    pub avatar_position: Position,
    pub avatar_alive: bool,
    pub leg_angle: f32,
    pub cheat: bool,
    pub vehicles: Vec<VehicleView>,
    pub signal: SignalState,
    pub pedestrian_exists: bool,
    pub pedestrian_location: Position,
    pub appearances: u32,
    pub time_remaining: f64,
    pub waypoint_index: usize,
    pub waypoint_target: Position,
    pub camera: Position,
    pub terminal: bool,
    pub reason: TerminalReason,
}

/// The training session
pub struct GameSession {
    pub config: SessionConfig,
    pub clock: SimClock,
    pub avatar: Avatar,
    pub signal: TrafficSignal,
    pub fleet: VehicleFleet,
    pub pedestrian: PedestrianScheduler,
    pub waypoints: WaypointTracker,
    pub camera: CameraRig,
    pub status: SessionStatus,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        let mut fleet_rng = StdRng::seed_from_u64(config.seed);
        let schedule_rng = StdRng::seed_from_u64(config.seed ^ SCHEDULE_STREAM);

        Self {
            clock: SimClock::new(),
            avatar: Avatar::new(),
            signal: TrafficSignal::new(),
            fleet: VehicleFleet::spawn(&mut fleet_rng, config.vehicle_count),
            pedestrian: PedestrianScheduler::new(schedule_rng),
            waypoints: WaypointTracker::default(),
            camera: CameraRig::default(),
            status: SessionStatus::new(config.cheat),
            config,
        }
    }

    /// Create a session with default settings and the given seed
    pub fn new_with_seed(seed: u64) -> Self {
        Self::new(SessionConfig {
            seed,
            ..SessionConfig::default()
        })
    }

    /// Rebuild every entity from the session's configuration
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
        info!("Session reset (seed {})", self.config.seed);
    }

    pub fn is_terminal(&self) -> bool {
        self.status.terminal
    }

    pub fn reason(&self) -> TerminalReason {
        self.status.reason
    }

    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    /// Main simulation tick
    pub fn tick(&mut self, input: &InputFrame, delta_secs: f64) -> TickReport {
        let mut report = TickReport {
            quit_requested: input.quit,
            ..TickReport::default()
        };

        if self.status.terminal {
            if input.reset {
                self.reset();
                report.reset = true;
                report.events.push(SessionEvent::Reset);
            }
            return report;
        }

        self.handle_events(input, &mut report);

        self.clock.advance(delta_secs);
        let now = self.clock.elapsed();

        self.avatar.apply_input(&input.movement);

        if let Some(state) = self.signal.tick(now) {
            report.events.push(SessionEvent::SignalChanged(state));
        }

        for id in self.fleet.update(self.signal.state) {
            report.events.push(SessionEvent::VehicleDestroyed(id));
        }

        let pedestrian = self.pedestrian.update(now, &self.avatar.position);
        if pedestrian.spawned {
            report.events.push(SessionEvent::PedestrianSpawned {
                appearances: self.pedestrian.appearances,
                forced: false,
            });
        }
        if pedestrian.cleared {
            report.events.push(SessionEvent::PedestrianCleared);
        }

        if !self.status.cheat && self.pedestrian.deadline_missed(now) {
            self.end(TerminalReason::InsufficientAppearances, &mut report);
            return report;
        }

        if let Some(vehicle) = find_collision(&self.avatar.position, &self.fleet) {
            let suppressed = self.status.cheat;
            report
                .events
                .push(SessionEvent::Collision { vehicle, suppressed });
            if suppressed {
                warn!("Collision with vehicle {} ignored (cheat mode)", vehicle.0);
            } else {
                self.end(TerminalReason::VehicleCollision, &mut report);
                return report;
            }
        }

        if let Some(index) = self.waypoints.update(&self.avatar.position) {
            report.events.push(SessionEvent::WaypointReached(index));
        }
        if self.config.complete_on_final_waypoint && self.waypoints.arrived(&self.avatar.position) {
            self.end(TerminalReason::Completed, &mut report);
            return report;
        }

        self.camera.update(&self.avatar.position);
        report
    }

    /// Edge-triggered events that are honored while the session runs
    fn handle_events(&mut self, input: &InputFrame, report: &mut TickReport) {
        if input.toggle_cheat {
            let cheat = self.status.toggle_cheat();
            info!("Cheat mode {}", if cheat { "enabled" } else { "disabled" });
            report.events.push(SessionEvent::CheatToggled(cheat));
        }

        if input.request_crossing
            && self
                .signal
                .request_crossing(&self.avatar.position, self.clock.elapsed())
        {
            report.events.push(SessionEvent::CrossingRequested);
        }

        if input.force_spawn && self.pedestrian.force_spawn() {
            report.events.push(SessionEvent::PedestrianSpawned {
                appearances: self.pedestrian.appearances,
                forced: true,
            });
        }
    }

    fn end(&mut self, reason: TerminalReason, report: &mut TickReport) {
        if !self.status.end(reason) {
            return;
        }
        if reason.is_failure() {
            self.avatar.alive = false;
        }
        info!(
            "Session ended after {} ticks ({:.2}s): {}",
            self.clock.ticks(),
            self.clock.elapsed(),
            reason
        );
        report.events.push(SessionEvent::Ended(reason));
    }

    /// Build the read-only view consumed by renderers
    pub fn snapshot(&self) -> SessionSnapshot {
        let elapsed = self.clock.elapsed();
        SessionSnapshot {
            tick: self.clock.ticks(),
            elapsed,
            avatar_position: self.avatar.position,
            avatar_alive: self.avatar.alive,
            leg_angle: self.avatar.leg_angle,
            cheat: self.status.cheat,
            vehicles: self
                .fleet
                .vehicles
                .iter()
                .map(|v| VehicleView {
                    id: v.id,
                    position: v.position,
                    direction: v.direction,
                    alive: v.alive,
                })
                .collect(),
            signal: self.signal.state,
            pedestrian_exists: self.pedestrian.exists,
            pedestrian_location: self.pedestrian.location,
            appearances: self.pedestrian.appearances,
            time_remaining: PedestrianScheduler::time_remaining(elapsed),
            waypoint_index: self.waypoints.current_index(),
            waypoint_target: self.waypoints.current_target(),
            camera: self.camera.position,
            terminal: self.status.terminal,
            reason: self.status.reason,
        }
    }

    /// Print a summary of the session state
    pub fn print_summary(&self) {
        println!("=== Session Summary ===");
        println!(
            "Tick: {} | Time: {:.1}s | Deadline in: {:.0}s",
            self.clock.ticks(),
            self.clock.elapsed(),
            PedestrianScheduler::time_remaining(self.clock.elapsed())
        );
        println!("{}", self.status.summary());
        println!(
            "Avatar: ({:.2}, {:.2}) {}",
            self.avatar.position.x,
            self.avatar.position.z,
            if self.avatar.alive { "alive" } else { "down" }
        );
        println!("Traffic: {}", self.signal.state.label());
        println!(
            "Pedestrian: {} | Appearances: {}/{}",
            if self.pedestrian.exists { "waiting" } else { "absent" },
            self.pedestrian.appearances,
            REQUIRED_APPEARANCES
        );
        println!(
            "Waypoint: {}/{}",
            self.waypoints.current_index(),
            self.waypoints.last_index()
        );

        println!("--- Vehicles ---");
        for vehicle in &self.fleet.vehicles {
            println!(
                "  Vehicle {}: lane z={:.1}, x={:.2}, dir={:+.0}, speed={:.3}, {}",
                vehicle.id.0,
                vehicle.position.z,
                vehicle.position.x,
                vehicle.direction,
                vehicle.speed,
                if vehicle.alive { "driving" } else { "destroyed" }
            );
        }
    }

    /// Draw a visual map of the town in the terminal
    pub fn draw_map(&self) {
        const MIN_X: f32 = -12.0;
        const MAX_X: f32 = 12.0;
        let min_z = GROUND_Z_MIN;
        let max_z = GROUND_Z_MAX;

        // One character per world unit across, one row per world unit deep
        let width = (MAX_X - MIN_X) as usize + 1;
        let height = (max_z - min_z) as usize + 1;
        let mut grid = vec![vec![' '; width]; height];

        let to_grid = |x: f32, z: f32| -> (usize, usize) {
            let col = (x - MIN_X).round().clamp(0.0, (width - 1) as f32) as usize;
            let row = (z - min_z).round().clamp(0.0, (height - 1) as f32) as usize;
            (row, col)
        };

        // Road surface
        for x in (ROAD_X_LEFT as i32)..=(ROAD_X_RIGHT as i32) {
            for z in (ROAD_Z_FAR as i32)..=(ROAD_Z_NEAR as i32) {
                let (row, col) = to_grid(x as f32, z as f32);
                grid[row][col] = '.';
            }
        }

        // Crossing and stop line
        for x in (CROSSWALK_X_SPAN.0 as i32)..=(CROSSWALK_X_SPAN.1 as i32) {
            let (row, col) = to_grid(x as f32, CROSSWALK_Z);
            grid[row][col] = '=';
        }
        for x in (ROAD_X_LEFT as i32)..=(ROAD_X_RIGHT as i32) {
            let (row, col) = to_grid(x as f32, STOP_LINE_Z);
            if grid[row][col] == '.' {
                grid[row][col] = '-';
            }
        }

        let mut put = |position: &Position, glyph: char| {
            let (row, col) = to_grid(position.x, position.z);
            grid[row][col] = glyph;
        };

        put(&self.waypoints.current_target(), '*');
        put(&self.signal.pole, 'B');
        if self.pedestrian.exists {
            put(&self.pedestrian.location, 'P');
        }
        for vehicle in self.fleet.alive() {
            put(&vehicle.position, 'V');
        }
        put(&self.avatar.position, '@');

        println!("\n=== Town Map ===");
        println!("Legend: @=Avatar, V=Vehicle, P=Pedestrian, B=Button, *=Target, ==Crossing, -=Stop line");
        println!();
        for row in &grid {
            let line: String = row.iter().collect();
            println!("{}", line);
        }
        println!();
    }
}
