//! Debug tooling for fast iteration, compiled with the `dev-tools` feature.
//!
//! Hotkeys (hold Ctrl, letters chosen to stay clear of gameplay keys):
//! - G: toggle invincibility
//! - T: toggle state transition logging
//! - E / B: spawn an enemy / the boss ahead of the player
//! - H: full heal

mod state;
mod systems;

pub use state::DebugState;

use bevy::prelude::*;

use crate::core::{FixedSet, FrameSet};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(
                Update,
                (
                    systems::handle_debug_hotkeys,
                    systems::update_status_message,
                )
                    .chain()
                    .before(FrameSet::Player),
            )
            .add_systems(Update, systems::log_transitions.after(FrameSet::Ai))
            .add_systems(
                FixedUpdate,
                systems::apply_invincibility.in_set(FixedSet::Resolve),
            );
    }
}
