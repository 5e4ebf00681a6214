//! UI module that visualizes the session state using Bevy
//!
//! This module is purely for visualization and keyboard capture - all rules
//! live in the `simulation` module. The UI feeds key state to the session
//! once per fixed step and mirrors the session onto Bevy entities.

mod components;
mod input;
mod spawner;
mod sync;
mod world;

use bevy::prelude::*;

pub use components::{PendingInput, SessionResource};

use input::collect_input;
use spawner::{setup_hud, spawn_actors};
use sync::{
    sync_avatar, sync_camera, sync_pedestrian, sync_signal_lamps, sync_target, sync_vehicles,
    tick_session, update_hud,
};
use world::setup_world;

/// Plugin to register all UI systems
pub struct CrosswalkUIPlugin;

impl Plugin for CrosswalkUIPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SessionResource>()
            .init_resource::<PendingInput>()
            .insert_resource(ClearColor(Color::srgb(0.60, 0.78, 0.97)))
            .add_systems(Startup, (setup_world, spawn_actors, setup_hud))
            .add_systems(FixedUpdate, tick_session)
            .add_systems(
                Update,
                (
                    collect_input,
                    sync_avatar,
                    sync_vehicles,
                    sync_pedestrian,
                    sync_target,
                    sync_camera,
                    sync_signal_lamps,
                    update_hud,
                ),
            );
    }
}
