//! World setup systems for camera, lighting and the static town

use bevy::prelude::*;

use super::components::{Ground, MainCamera, SignalLamp};
use crate::simulation::{
    SignalState, BUTTON_POLE, CAMERA_START, CROSSWALK_Z, GROUND_Z_MAX, GROUND_Z_MIN, ROAD_X_LEFT,
    ROAD_X_RIGHT, ROAD_Z_FAR, ROAD_Z_NEAR, STOP_LINE_Z,
};

const TRAFFIC_LIGHT_X: f32 = 6.5;

/// System to setup the world environment (ground, road, buildings, signals)
pub fn setup_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Follow camera; its transform is driven by the session every frame
    commands.spawn((
        MainCamera,
        Camera3d::default(),
        Transform::from_xyz(CAMERA_START.x, CAMERA_START.y, CAMERA_START.z)
            .looking_at(Vec3::new(0.0, 1.0, 6.0), Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(12.0, 30.0, 12.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let ground_depth = GROUND_Z_MAX - GROUND_Z_MIN;
    commands.spawn((
        Ground,
        Mesh3d(meshes.add(Plane3d::default().mesh().size(100.0, ground_depth))),
        MeshMaterial3d(materials.add(Color::srgb(0.78, 0.89, 0.78))),
        Transform::from_xyz(0.0, 0.0, (GROUND_Z_MAX + GROUND_Z_MIN) / 2.0),
    ));

    spawn_road(&mut commands, &mut meshes, &mut materials);

    // School, hospital and pharmacy
    spawn_building(&mut commands, &mut meshes, &mut materials, Vec3::new(0.0, 0.0, 4.5), Vec3::new(10.0, 5.0, 4.0), Color::srgb(1.0, 0.98, 0.75));
    spawn_building(&mut commands, &mut meshes, &mut materials, Vec3::new(0.0, 0.0, -14.5), Vec3::new(10.0, 5.0, 4.0), Color::srgb(0.75, 0.88, 1.0));
    spawn_building(&mut commands, &mut meshes, &mut materials, Vec3::new(0.0, 0.0, -24.5), Vec3::new(7.0, 4.0, 3.0), Color::srgb(1.0, 0.80, 0.80));

    spawn_button_pole(&mut commands, &mut meshes, &mut materials);
    spawn_traffic_light(&mut commands, &mut meshes, &mut materials);
}

fn spawn_slab(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    center: Vec3,
    size: Vec3,
    color: Color,
) {
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
        MeshMaterial3d(materials.add(color)),
        Transform::from_translation(center),
    ));
}

fn spawn_road(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    let road_width = ROAD_X_RIGHT - ROAD_X_LEFT;
    let road_depth = ROAD_Z_NEAR - ROAD_Z_FAR;
    let road_center_z = (ROAD_Z_NEAR + ROAD_Z_FAR) / 2.0;
    let ground_depth = GROUND_Z_MAX - GROUND_Z_MIN;
    let ground_center_z = (GROUND_Z_MAX + GROUND_Z_MIN) / 2.0;

    spawn_slab(commands, meshes, materials, Vec3::new(0.0, 0.01, road_center_z), Vec3::new(road_width, 0.02, road_depth), Color::srgb(0.18, 0.18, 0.18));

    // Sidewalks on both sides
    for x in [ROAD_X_LEFT - 1.0, ROAD_X_RIGHT + 1.0] {
        spawn_slab(commands, meshes, materials, Vec3::new(x, 0.02, ground_center_z), Vec3::new(2.0, 0.04, ground_depth), Color::srgb(0.85, 0.85, 0.85));
    }

    // Lane dividers
    for z in [ROAD_Z_NEAR - 1.0, road_center_z, ROAD_Z_FAR + 1.0] {
        spawn_slab(commands, meshes, materials, Vec3::new(0.0, 0.03, z), Vec3::new(road_width - 1.4, 0.01, 0.08), Color::WHITE);
    }

    // Zebra stripes
    const STRIPES: usize = 12;
    const STRIPE_WIDTH: f32 = 0.35;
    const STRIPE_GAP: f32 = 0.20;
    for i in 0..STRIPES {
        let x = -4.5 + i as f32 * (STRIPE_WIDTH + STRIPE_GAP) + STRIPE_WIDTH / 2.0;
        spawn_slab(commands, meshes, materials, Vec3::new(x, 0.04, CROSSWALK_Z), Vec3::new(STRIPE_WIDTH, 0.01, 1.4), Color::WHITE);
    }

    spawn_slab(commands, meshes, materials, Vec3::new(0.0, 0.035, STOP_LINE_Z), Vec3::new(road_width, 0.01, 0.06), Color::srgb(1.0, 1.0, 0.6));
}

fn spawn_building(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    base: Vec3,
    size: Vec3,
    wall_color: Color,
) {
    spawn_slab(commands, meshes, materials, base + Vec3::new(0.0, size.y / 2.0, 0.0), size, wall_color);
    spawn_slab(commands, meshes, materials, base + Vec3::new(0.0, size.y + 0.05, 0.0), Vec3::new(size.x * 1.02, 0.1, size.z * 1.02), Color::srgb(0.25, 0.25, 0.25));

    // Window grid on the front face
    let window_color = Color::srgb(0.75, 0.9, 1.0);
    let (cols, rows) = (4, 3);
    for col in 0..cols {
        for row in 0..rows {
            let x = base.x - size.x / 2.0 + (col as f32 + 0.5) * (size.x / cols as f32);
            let y = 0.6 + row as f32 * (size.y / (rows as f32 + 1.0));
            let z = base.z + size.z / 2.0 + 0.01;
            spawn_slab(commands, meshes, materials, Vec3::new(x, y, z), Vec3::new(size.x / (cols as f32 * 3.0), size.y / (rows as f32 * 4.0), 0.02), window_color);
        }
    }

    // Door
    spawn_slab(commands, meshes, materials, Vec3::new(base.x, 0.6, base.z + size.z / 2.0 + 0.02), Vec3::new(size.x * 0.18, 1.2, 0.04), Color::srgb(0.40, 0.23, 0.12));
}

fn spawn_button_pole(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    let (x, z) = (BUTTON_POLE.x, BUTTON_POLE.z);
    spawn_slab(commands, meshes, materials, Vec3::new(x, 1.0, z), Vec3::new(0.15, 2.0, 0.15), Color::srgb(0.2, 0.2, 0.2));
    spawn_slab(commands, meshes, materials, Vec3::new(x, 1.1, z + 0.15), Vec3::new(0.30, 0.25, 0.12), Color::srgb(0.3, 0.3, 0.3));

    commands.spawn((
        SignalLamp::Button,
        Mesh3d(meshes.add(Sphere::new(0.08))),
        MeshMaterial3d(materials.add(Color::srgb(0.2, 0.8, 0.2))),
        Transform::from_xyz(x, 1.1, z + 0.22),
    ));
}

fn spawn_traffic_light(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    let post_z = CROSSWALK_Z + 0.2;
    spawn_slab(commands, meshes, materials, Vec3::new(TRAFFIC_LIGHT_X, 1.6, post_z), Vec3::new(0.18, 3.2, 0.18), Color::srgb(0.2, 0.2, 0.2));
    spawn_slab(commands, meshes, materials, Vec3::new(TRAFFIC_LIGHT_X, 2.1, post_z + 0.15), Vec3::new(0.6, 1.4, 0.3), Color::srgb(0.2, 0.2, 0.2));

    let bulbs = [
        (2.5, SignalState::RedForCars),
        (2.1, SignalState::ChangingToRed),
        (1.7, SignalState::GreenForCars),
    ];
    for (y, state) in bulbs {
        commands.spawn((
            SignalLamp::Bulb(state),
            Mesh3d(meshes.add(Sphere::new(0.14))),
            MeshMaterial3d(materials.add(Color::srgb(0.1, 0.1, 0.1))),
            Transform::from_xyz(TRAFFIC_LIGHT_X, y, post_z + 0.31),
        ));
    }

    // Walk indicator above the crossing
    spawn_slab(commands, meshes, materials, Vec3::new(0.0, 2.0, post_z - 1.2), Vec3::new(1.0, 0.5, 0.2), Color::srgb(0.15, 0.15, 0.15));
    commands.spawn((
        SignalLamp::Walk,
        Mesh3d(meshes.add(Sphere::new(0.18))),
        MeshMaterial3d(materials.add(Color::srgb(1.0, 0.2, 0.2))),
        Transform::from_xyz(0.0, 2.0, post_z - 1.0),
    ));
}
