//! Movement domain: physics layers, facing, input snapshot, ground probe and
//! jump assist. Velocity itself is written by the state machines.

mod components;
mod resources;
mod systems;

pub use components::{Facing, GameLayer, Ground, JumpAssist, Motor, MovementState, Player};
pub use resources::{MovementTuning, PlayerInput};

use bevy::prelude::*;

use crate::core::{FixedSet, FrameSet};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<PlayerInput>()
            .add_systems(Update, systems::read_input.in_set(FrameSet::Input))
            .add_systems(Update, systems::tick_jump_assist.in_set(FrameSet::Timers))
            .add_systems(
                FixedUpdate,
                (systems::detect_ground, systems::apply_gravity)
                    .chain()
                    .in_set(FixedSet::Probe),
            );
    }
}
