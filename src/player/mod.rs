//! Player domain: the player's action state machine, its brain component and
//! the systems that drive it from input, animation signals and damage.

mod components;
mod states;
mod systems;

pub use components::{PlayerBrain, PlayerContext};
pub use states::{PlayerState, PlayerStateId, StrikeRef};
pub(crate) use systems::player_layers;

use bevy::prelude::*;

use crate::combat::resolve_hits;
use crate::core::{FixedSet, FrameSet};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, systems::spawn_player)
            .add_systems(First, systems::begin_player_frames)
            .add_systems(
                Update,
                systems::drive_player_frame.in_set(FrameSet::Player),
            )
            .add_systems(
                FixedUpdate,
                systems::drive_player_physics.in_set(FixedSet::Actors),
            )
            .add_systems(
                FixedUpdate,
                resolve_hits::<PlayerBrain>.in_set(FixedSet::Resolve),
            );
    }
}
