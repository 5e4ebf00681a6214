//! Systems for syncing Bevy entities with session state

use bevy::prelude::*;

use super::components::{
    AvatarLeg, AvatarRoot, HudText, MainCamera, PedestrianFigure, PendingInput, SessionResource,
    SignalLamp, TargetMarker, VehicleLink,
};
use crate::simulation::{SignalState, REQUIRED_APPEARANCES};

/// System to run one session tick per fixed step
pub fn tick_session(
    mut resource: ResMut<SessionResource>,
    mut pending: ResMut<PendingInput>,
    mut exit: MessageWriter<AppExit>,
) {
    let frame = pending.0;
    pending.0 = frame.held_only();

    let delta = resource.delta_secs;
    let report = resource.session.tick(&frame, delta);
    if report.quit_requested {
        exit.write(AppExit::Success);
    }
}

/// System to move the avatar and swing its legs
pub fn sync_avatar(
    resource: Res<SessionResource>,
    mut root_query: Query<&mut Transform, With<AvatarRoot>>,
    mut leg_query: Query<(&AvatarLeg, &mut Transform), Without<AvatarRoot>>,
) {
    let avatar = &resource.session.avatar;

    for mut transform in root_query.iter_mut() {
        transform.translation = Vec3::new(avatar.position.x, 0.0, avatar.position.z);
    }

    let swing = avatar.leg_angle.to_radians();
    for (leg, mut transform) in leg_query.iter_mut() {
        transform.rotation = Quat::from_rotation_x(swing * leg.side);
    }
}

/// System to sync vehicle visuals; destroyed vehicles are hidden
pub fn sync_vehicles(
    resource: Res<SessionResource>,
    mut vehicle_query: Query<(&VehicleLink, &mut Transform, &mut Visibility)>,
) {
    for (link, mut transform, mut visibility) in vehicle_query.iter_mut() {
        match resource.session.fleet.get(link.0) {
            Some(vehicle) if vehicle.alive => {
                transform.translation =
                    Vec3::new(vehicle.position.x, vehicle.position.y, vehicle.position.z);
                *visibility = Visibility::Inherited;
            }
            _ => *visibility = Visibility::Hidden,
        }
    }
}

/// System to show the pedestrian while she is present
pub fn sync_pedestrian(
    resource: Res<SessionResource>,
    mut query: Query<&mut Visibility, With<PedestrianFigure>>,
) {
    let exists = resource.session.pedestrian.exists;
    for mut visibility in query.iter_mut() {
        *visibility = if exists {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

/// System to keep the marker on the current waypoint
pub fn sync_target(
    resource: Res<SessionResource>,
    mut query: Query<&mut Transform, With<TargetMarker>>,
) {
    let target = resource.session.waypoints.current_target();
    for mut transform in query.iter_mut() {
        transform.translation = Vec3::new(target.x, 0.1, target.z);
    }
}

/// System to place the camera from the session's smoothed rig
pub fn sync_camera(
    resource: Res<SessionResource>,
    mut query: Query<&mut Transform, With<MainCamera>>,
) {
    let camera = resource.session.camera.position;
    let avatar = resource.session.avatar.position;
    for mut transform in query.iter_mut() {
        *transform = Transform::from_xyz(camera.x, camera.y, camera.z)
            .looking_at(Vec3::new(avatar.x, 1.0, avatar.z), Vec3::Y);
    }
}

/// System to color the button lamp, traffic light bulbs and walk lamp
pub fn sync_signal_lamps(
    resource: Res<SessionResource>,
    lamp_query: Query<(&SignalLamp, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    const UNLIT: Color = Color::srgb(0.1, 0.1, 0.1);
    let state = resource.session.signal.state;

    for (lamp, material_handle) in lamp_query.iter() {
        let color = match lamp {
            SignalLamp::Button => match state {
                SignalState::GreenForCars => Color::srgb(0.2, 0.8, 0.2),
                SignalState::ChangingToRed => Color::srgb(1.0, 0.8, 0.2),
                SignalState::RedForCars => Color::srgb(0.9, 0.1, 0.1),
            },
            SignalLamp::Bulb(lit_in) if *lit_in == state => match lit_in {
                SignalState::RedForCars => Color::srgb(1.0, 0.0, 0.0),
                SignalState::ChangingToRed => Color::srgb(1.0, 0.85, 0.0),
                SignalState::GreenForCars => Color::srgb(0.0, 1.0, 0.0),
            },
            SignalLamp::Bulb(_) => UNLIT,
            SignalLamp::Walk if state.walk_allowed() => Color::srgb(0.2, 1.0, 0.2),
            SignalLamp::Walk => Color::srgb(1.0, 0.2, 0.2),
        };
        if let Some(material) = materials.get_mut(&material_handle.0) {
            material.base_color = color;
        }
    }
}

/// System to refresh the HUD text from the session snapshot
pub fn update_hud(resource: Res<SessionResource>, mut text_query: Query<(&HudText, &mut Text)>) {
    let snapshot = resource.session.snapshot();

    for (kind, mut text) in text_query.iter_mut() {
        **text = match kind {
            HudText::Status => format!(
                "Cheat Mode: {}    Elderly Appearances: {}/{}",
                if snapshot.cheat { "ON" } else { "OFF" },
                snapshot.appearances,
                REQUIRED_APPEARANCES
            ),
            HudText::Traffic => format!("Traffic: {}", snapshot.signal.label()),
            HudText::Deadline => format!(
                "Elderly rule check in: {:02}s",
                snapshot.time_remaining.floor() as u32
            ),
            HudText::Waypoint => format!(
                "Waypoint {}/{}",
                snapshot.waypoint_index + 1,
                resource.session.waypoints.targets().len()
            ),
            HudText::GameOver if snapshot.terminal => format!(
                "*** GAME OVER ***\nReason: {}\nPress R to Restart",
                snapshot.reason
            ),
            HudText::GameOver => String::new(),
        };
    }
}
