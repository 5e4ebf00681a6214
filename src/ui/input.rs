//! Input handling systems

use bevy::prelude::*;

use super::components::PendingInput;

/// Translate keyboard state into the session's input contract
pub fn collect_input(keyboard: Res<ButtonInput<KeyCode>>, mut pending: ResMut<PendingInput>) {
    let frame = &mut pending.0;

    frame.movement.forward = keyboard.pressed(KeyCode::KeyW);
    frame.movement.back = keyboard.pressed(KeyCode::KeyS);
    frame.movement.left = keyboard.pressed(KeyCode::KeyA);
    frame.movement.right = keyboard.pressed(KeyCode::KeyD);

    // Presses stay latched until a fixed tick consumes them
    frame.toggle_cheat |= keyboard.just_pressed(KeyCode::KeyC);
    frame.request_crossing |= keyboard.just_pressed(KeyCode::KeyE);
    frame.reset |= keyboard.just_pressed(KeyCode::KeyR);
    frame.force_spawn |= keyboard.just_pressed(KeyCode::KeyN);
    frame.quit |= keyboard.just_pressed(KeyCode::Escape);
}
