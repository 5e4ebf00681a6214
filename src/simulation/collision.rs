//! Avatar versus vehicle overlap test

use super::fleet::VehicleFleet;
use super::player::AVATAR_HALF_EXTENT;
use super::types::{PlanarBox, Position, VehicleId};
use super::vehicle::VEHICLE_HALF_EXTENTS;

/// First live vehicle whose footprint overlaps the avatar, if any
pub fn find_collision(avatar: &Position, fleet: &VehicleFleet) -> Option<VehicleId> {
    let avatar_box = PlanarBox::around(avatar, AVATAR_HALF_EXTENT, AVATAR_HALF_EXTENT);
    fleet
        .alive()
        .find(|vehicle| {
            let vehicle_box =
                PlanarBox::around(&vehicle.position, VEHICLE_HALF_EXTENTS.0, VEHICLE_HALF_EXTENTS.1);
            avatar_box.overlaps(&vehicle_box)
        })
        .map(|vehicle| vehicle.id)
}
