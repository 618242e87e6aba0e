//! Stats domain: continuous pool updates.

use bevy::prelude::*;

use crate::stats::CharacterStats;

pub(crate) fn regenerate_mana(time: Res<Time>, mut query: Query<&mut CharacterStats>) {
    let dt = time.delta_secs();

    for mut stats in &mut query {
        if stats.is_dead() || stats.mana_regen_rate <= 0.0 {
            continue;
        }
        let amount = stats.mana_regen_rate * dt;
        stats.regenerate_mana(amount);
    }
}
