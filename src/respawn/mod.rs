//! Respawn domain: checkpoints, kill zones and bringing the player back
//! after death.

mod components;
mod events;
mod resources;
mod systems;

pub use components::{Checkpoint, KillZone};
pub use events::RespawnRequested;
pub use resources::Checkpoints;
pub use systems::teleport;

use bevy::prelude::*;

use crate::core::{FixedSet, FrameSet};

pub struct RespawnPlugin;

impl Plugin for RespawnPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Checkpoints>()
            .add_message::<RespawnRequested>()
            .add_systems(Startup, systems::spawn_triggers)
            .add_systems(
                FixedUpdate,
                (systems::detect_checkpoints, systems::detect_kill_zones)
                    .in_set(FixedSet::Resolve),
            )
            .add_systems(
                Update,
                systems::handle_respawn_requests.after(FrameSet::Player),
            );
    }
}
