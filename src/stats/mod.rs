//! Stats domain: clamped health/mana/ultimate pools and mana regeneration.

mod components;
mod resources;
mod systems;
#[cfg(test)]
mod tests;

pub use components::{CharacterStats, DamageOutcome, Invulnerable};
pub use resources::StatsTuning;

use bevy::prelude::*;

use crate::core::FrameSet;

pub struct StatsPlugin;

impl Plugin for StatsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StatsTuning>()
            .add_systems(Update, systems::regenerate_mana.in_set(FrameSet::Timers));
    }
}
