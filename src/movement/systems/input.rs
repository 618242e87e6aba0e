//! Movement domain: keyboard sampling into the player input snapshot.

use bevy::prelude::*;

use crate::movement::PlayerInput;

pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<PlayerInput>) {
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }

    input.axis = Vec2::new(x, y);
    input.jump_pressed =
        keyboard.just_pressed(KeyCode::Space) || keyboard.just_pressed(KeyCode::KeyK);
    input.jump_held = keyboard.pressed(KeyCode::Space) || keyboard.pressed(KeyCode::KeyK);
    input.attack_pressed = keyboard.just_pressed(KeyCode::KeyJ);
    input.attack_held = keyboard.pressed(KeyCode::KeyJ);
    input.skill_1_pressed = keyboard.just_pressed(KeyCode::KeyU);
    input.skill_2_pressed = keyboard.just_pressed(KeyCode::KeyI);
    input.ultimate_pressed = keyboard.just_pressed(KeyCode::KeyO);
    input.dash_pressed =
        keyboard.just_pressed(KeyCode::ShiftLeft) || keyboard.just_pressed(KeyCode::KeyL);
    input.fast_fall_held = y < 0.0;
}
