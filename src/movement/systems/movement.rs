//! Movement domain: gravity and jump assist timers.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{JumpAssist, MovementState, MovementTuning};

/// Gravity is applied by hand so states can re-assert vertical velocity
/// (dash, air attack freeze) after it on the same step. `GravityScale`
/// scales it per body; a removed body carries zero.
pub(crate) fn apply_gravity(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut query: Query<(&GravityScale, &mut LinearVelocity), With<MovementState>>,
) {
    let dt = time.delta_secs();

    for (scale, mut velocity) in &mut query {
        velocity.y -= tuning.gravity * scale.0 * dt;
    }
}

pub(crate) fn tick_jump_assist(
    time: Res<Time>,
    mut query: Query<(&MovementState, &mut JumpAssist)>,
) {
    let dt = time.delta_secs();

    for (state, mut assist) in &mut query {
        assist.tick(dt, state.on_ground);
    }
}
