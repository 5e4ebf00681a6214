//! Standalone crossing simulation module
//!
//! This module contains all the rule engine logic that can run independently
//! of the Bevy game engine. It can be tested via console without needing to
//! boot up the full game.

mod camera;
mod clock;
mod collision;
mod fleet;
mod game_state;
mod input;
mod pedestrian;
mod player;
mod runner;
mod session;
mod signal;
mod types;
mod vehicle;
mod waypoint;

// Re-export public types for external use
pub use camera::{CameraRig, CAMERA_HEIGHT, CAMERA_LAG, CAMERA_START, CAMERA_TRAIL};
pub use clock::SimClock;
pub use collision::find_collision;
pub use fleet::{
    VehicleFleet, DEFAULT_VEHICLE_COUNT, LANES, VEHICLE_BASE_SPEED, VEHICLE_HEIGHT,
    VEHICLE_SPEED_FACTOR,
};
pub use game_state::{SessionStatus, TerminalReason};
pub use input::{InputFrame, InputScript, InputSource, MovementIntent};
pub use pedestrian::{
    PedestrianScheduler, PedestrianUpdate, APPEARANCE_DEADLINE_SECS, DESPAWN_RADIUS,
    FIRST_SPAWN_SECS, PEDESTRIAN_LOCATION, REQUIRED_APPEARANCES, SPAWN_INTERVAL_SECS,
};
pub use player::{
    Avatar, AVATAR_HALF_EXTENT, AVATAR_START, AVATAR_STEP, PLAY_AREA_X, PLAY_AREA_Z,
};
pub use runner::{CancelToken, FixedStepLoop, LoopExit};
pub use session::{
    GameSession, SessionConfig, SessionEvent, SessionSnapshot, TickReport, VehicleView,
    DEFAULT_SEED,
};
pub use signal::{
    SignalState, TrafficSignal, BUTTON_POLE, BUTTON_PRESS_DISTANCE, CHANGE_DELAY_SECS,
    RED_DURATION_SECS,
};
pub use types::{
    PlanarBox, Position, VehicleId, CROSSWALK_X_SPAN, CROSSWALK_Z, GROUND_Z_MAX, GROUND_Z_MIN,
    ROAD_X_LEFT, ROAD_X_RIGHT, ROAD_Z_FAR, ROAD_Z_NEAR, STOP_LINE_Z,
};
pub use vehicle::{
    SimVehicle, VehicleUpdateResult, STOP_WINDOW, VEHICLE_BOUNDS, VEHICLE_HALF_EXTENTS,
    VIOLATION_WINDOW,
};
pub use waypoint::{WaypointTracker, ROUTE, WAYPOINT_TOLERANCE};
