//! Systems for spawning visual entities from session state

use bevy::prelude::*;

use super::components::{
    AvatarLeg, AvatarRoot, HudText, PedestrianFigure, SessionResource, TargetMarker, VehicleLink,
};

/// System to create the avatar, vehicles, pedestrian and target marker
pub fn spawn_actors(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    session: Res<SessionResource>,
) {
    let session = &session.session;

    spawn_avatar(&mut commands, &mut meshes, &mut materials, session.avatar.position.x, session.avatar.position.z);

    let body = meshes.add(Cuboid::new(1.8, 0.6, 0.9));
    let paint = materials.add(Color::srgb(0.9, 0.1, 0.1));
    for vehicle in &session.fleet.vehicles {
        commands.spawn((
            VehicleLink(vehicle.id),
            Mesh3d(body.clone()),
            MeshMaterial3d(paint.clone()),
            Transform::from_xyz(vehicle.position.x, vehicle.position.y, vehicle.position.z),
        ));
    }

    let location = session.pedestrian.location;
    commands
        .spawn((
            PedestrianFigure,
            Transform::from_xyz(location.x, 0.0, location.z),
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(meshes.add(Cuboid::new(0.5, 0.9, 0.35))),
                MeshMaterial3d(materials.add(Color::srgb(0.85, 0.70, 0.85))),
                Transform::from_xyz(0.0, 0.9, 0.0),
            ));
            parent.spawn((
                Mesh3d(meshes.add(Sphere::new(0.22))),
                MeshMaterial3d(materials.add(Color::srgb(1.0, 0.86, 0.75))),
                Transform::from_xyz(0.0, 1.45, 0.0),
            ));
            // Cane
            parent.spawn((
                Mesh3d(meshes.add(Cuboid::new(0.05, 1.0, 0.05))),
                MeshMaterial3d(materials.add(Color::srgb(0.2, 0.2, 0.2))),
                Transform::from_xyz(0.18, 0.5, 0.05),
            ));
        });

    let target = session.waypoints.current_target();
    commands.spawn((
        TargetMarker,
        Mesh3d(meshes.add(Cuboid::new(0.6, 0.1, 0.6))),
        MeshMaterial3d(materials.add(Color::srgb(1.0, 0.9, 0.2))),
        Transform::from_xyz(target.x, 0.1, target.z),
    ));
}

fn spawn_avatar(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    x: f32,
    z: f32,
) {
    let skin = materials.add(Color::srgb(1.0, 0.84, 0.70));
    let leg = meshes.add(Cuboid::new(0.10, 0.45, 0.10));

    commands
        .spawn((AvatarRoot, Transform::from_xyz(x, 0.0, z), Visibility::default()))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(meshes.add(Cuboid::new(0.45, 0.9, 0.30))),
                MeshMaterial3d(skin.clone()),
                Transform::from_xyz(0.0, 0.9, 0.0),
            ));
            parent.spawn((
                Mesh3d(meshes.add(Sphere::new(0.22))),
                MeshMaterial3d(skin.clone()),
                Transform::from_xyz(0.0, 1.5, 0.0),
            ));
            for side in [-1.0, 1.0] {
                parent.spawn((
                    AvatarLeg { side },
                    Mesh3d(leg.clone()),
                    MeshMaterial3d(skin.clone()),
                    Transform::from_xyz(0.12 * side, 0.45, 0.0),
                ));
            }
        });
}

/// System to setup the HUD text overlay
pub fn setup_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Auto,
                height: Val::Auto,
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                padding: UiRect::all(Val::Px(10.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(5.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Crosswalk Trainer"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));

            let rows = [
                HudText::Status,
                HudText::Traffic,
                HudText::Deadline,
                HudText::Waypoint,
            ];
            for row in rows {
                parent.spawn((
                    Text::new(""),
                    TextFont {
                        font_size: 14.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.9, 0.9, 0.9)),
                    row,
                ));
            }

            parent.spawn((
                Text::new("Press E near the button pole to request crossing."),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 1.0, 0.5)),
            ));
        });

    // Centered game over banner, empty while the session runs
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.3, 0.3)),
                HudText::GameOver,
            ));
        });
}
