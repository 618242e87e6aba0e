//! Core domain: schedule ordering shared by every gameplay plugin, plus the
//! camera and the arena geometry.

mod systems;

use bevy::prelude::*;

/// Per-frame ordering inside `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Input snapshot
    Input,
    /// Animation advance; signals are queued here
    Animation,
    /// Assist timers, mana regen, status effect ticks
    Timers,
    /// Player frame driver (input then logic hooks)
    Player,
    /// Enemy and boss frame drivers
    Ai,
}

/// Per-step ordering inside `FixedUpdate`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixedSet {
    /// Ground probes and manual gravity
    Probe,
    /// State machine physics hooks
    Actors,
    /// Hit zone resolution
    Resolve,
    /// Damage application and its side effects
    Damage,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                FrameSet::Input,
                FrameSet::Animation,
                FrameSet::Timers,
                FrameSet::Player,
                FrameSet::Ai,
            )
                .chain(),
        )
        .configure_sets(
            FixedUpdate,
            (
                FixedSet::Probe,
                FixedSet::Actors,
                FixedSet::Resolve,
                FixedSet::Damage,
            )
                .chain(),
        )
        .add_systems(Startup, (systems::setup_camera, systems::spawn_arena));
    }
}
