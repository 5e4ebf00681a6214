//! Ordered navigation goals: school, crossing, hospital, pharmacy

use log::debug;

use super::types::Position;

/// Per-axis distance at which a waypoint counts as reached
pub const WAYPOINT_TOLERANCE: f32 = 0.6;

/// The route the avatar walks, in order
pub const ROUTE: [Position; 4] = [
    // School front plaza
    Position { x: 0.0, y: 0.0, z: 2.0 },
    // Crosswalk center
    Position { x: 0.0, y: 0.0, z: -0.5 },
    // Hospital front
    Position { x: 0.0, y: 0.0, z: -12.0 },
    // Pharmacy front
    Position { x: 0.0, y: 0.0, z: -22.0 },
];

/// Tracks which waypoint the avatar is heading to
#[derive(Debug, Clone)]
pub struct WaypointTracker {
    targets: Vec<Position>,
    current: usize,
}

impl Default for WaypointTracker {
    fn default() -> Self {
        Self::new(ROUTE.to_vec())
    }
}

impl WaypointTracker {
    /// A tracker over `targets`. An empty route falls back to the default one.
    pub fn new(targets: Vec<Position>) -> Self {
        let targets = if targets.is_empty() {
            ROUTE.to_vec()
        } else {
            targets
        };
        Self { targets, current: 0 }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_target(&self) -> Position {
        self.targets[self.current]
    }

    pub fn targets(&self) -> &[Position] {
        &self.targets
    }

    pub fn last_index(&self) -> usize {
        self.targets.len() - 1
    }

    /// Whether the cursor sits on the final waypoint
    pub fn on_final(&self) -> bool {
        self.current == self.last_index()
    }

    /// Advance past the current waypoint if `position` is inside its
    /// tolerance box. The cursor never moves past the final entry.
    /// Returns the new index when it advanced.
    pub fn update(&mut self, position: &Position) -> Option<usize> {
        if self.on_final() {
            return None;
        }
        if position.within_box(&self.current_target(), WAYPOINT_TOLERANCE) {
            self.current += 1;
            debug!("Waypoint {} reached, heading to {}", self.current - 1, self.current);
            return Some(self.current);
        }
        None
    }

    /// Whether `position` stands on the final waypoint
    pub fn arrived(&self, position: &Position) -> bool {
        self.on_final() && position.within_box(&self.current_target(), WAYPOINT_TOLERANCE)
    }
}
