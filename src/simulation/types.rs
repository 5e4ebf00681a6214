//! Core types for the crossing simulation
//!
//! These are standalone types that don't depend on Bevy.

/// A unique identifier for a vehicle slot in the fleet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VehicleId(pub usize);

/// A 3D position in the simulation
///
/// The town is laid out on the X/Z plane; Y is only used for presentation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// A point on the ground plane
    pub fn planar(x: f32, z: f32) -> Self {
        Self { x, y: 0.0, z }
    }

    /// Squared distance on the X/Z plane, ignoring height
    pub fn planar_distance_squared(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        dx * dx + dz * dz
    }

    /// Whether `other` lies inside a box of `tolerance` on each planar axis
    pub fn within_box(&self, other: &Position, tolerance: f32) -> bool {
        (self.x - other.x).abs() < tolerance && (self.z - other.z).abs() < tolerance
    }
}

impl Default for Position {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }
}

/// Axis-aligned planar box given by a center and half extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarBox {
    pub center_x: f32,
    pub center_z: f32,
    pub half_x: f32,
    pub half_z: f32,
}

impl PlanarBox {
    pub fn around(position: &Position, half_x: f32, half_z: f32) -> Self {
        Self {
            center_x: position.x,
            center_z: position.z,
            half_x,
            half_z,
        }
    }

    /// Boxes that touch on an edge count as overlapping
    pub fn overlaps(&self, other: &PlanarBox) -> bool {
        let (ax0, ax1) = (self.center_x - self.half_x, self.center_x + self.half_x);
        let (az0, az1) = (self.center_z - self.half_z, self.center_z + self.half_z);
        let (bx0, bx1) = (other.center_x - other.half_x, other.center_x + other.half_x);
        let (bz0, bz1) = (other.center_z - other.half_z, other.center_z + other.half_z);
        ax0 <= bx1 && ax1 >= bx0 && az0 <= bz1 && az1 >= bz0
    }
}

// World layout (Z runs forward/back, X runs left/right)

/// Near and far extent of the ground plane along Z
pub const GROUND_Z_MIN: f32 = -30.0;
pub const GROUND_Z_MAX: f32 = 15.0;

/// Road body extents
pub const ROAD_Z_NEAR: f32 = -2.0;
pub const ROAD_Z_FAR: f32 = -10.0;
pub const ROAD_X_LEFT: f32 = -10.0;
pub const ROAD_X_RIGHT: f32 = 10.0;

/// Center line of the zebra crossing
pub const CROSSWALK_Z: f32 = -6.0;

/// Where vehicles must stop while the signal is red for them
pub const STOP_LINE_Z: f32 = CROSSWALK_Z + 0.8;

/// Horizontal span of the crossing that vehicles must not enter on red
pub const CROSSWALK_X_SPAN: (f32, f32) = (-5.0, 5.0);
