//! Combat domain: attack windows, hit resolution, damage, status effects and
//! the enemy/boss brains.
//!
//! Hits flow one way: an armed window overlaps a target in `FixedSet::Resolve`,
//! a `DamageEvent` is written, and `apply_damage` turns it into stat changes
//! plus `DamageTakenEvent`/`DeathEvent` in `FixedSet::Damage`.

mod ai;
mod components;
mod effects;
mod events;
mod resources;
mod spawn;
mod systems;
#[cfg(test)]
mod tests;
mod window;

pub use ai::{AiRng, Boss, BossBrain, BossState, Enemy, EnemyBrain, EnemyState};
pub use components::Team;
pub use effects::{StatusEffect, StatusEffects};
pub use events::{DamageEvent, DamageTakenEvent, DeathEvent};
pub use resources::{AttackTuning, BossPhase, BossTuning, CombatTuning, EnemyTuning, StrikeDef};
pub use spawn::{spawn_boss, spawn_enemy};
pub use systems::resolve_hits;
pub(crate) use systems::apply_damage;
pub use window::{AttackWindow, HitZone, Striker};

use bevy::prelude::*;

use crate::core::{FixedSet, FrameSet};

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CombatTuning>()
            .init_resource::<AttackTuning>()
            .init_resource::<EnemyTuning>()
            .init_resource::<BossTuning>()
            .insert_resource(AiRng::seeded(BossTuning::default().seed))
            .add_message::<DamageEvent>()
            .add_message::<DamageTakenEvent>()
            .add_message::<DeathEvent>()
            .add_systems(Startup, spawn::spawn_foes)
            .add_systems(First, (ai::enemy::begin_enemy_frames, ai::boss::begin_boss_frames))
            .add_systems(
                Update,
                systems::expire_status_effects.in_set(FrameSet::Timers),
            )
            .add_systems(
                Update,
                (ai::enemy::drive_enemies, ai::boss::drive_bosses).in_set(FrameSet::Ai),
            )
            .add_systems(
                FixedUpdate,
                (ai::enemy::drive_enemy_physics, ai::boss::drive_boss_physics)
                    .in_set(FixedSet::Actors),
            )
            .add_systems(
                FixedUpdate,
                (
                    systems::tick_burns,
                    resolve_hits::<EnemyBrain>,
                    resolve_hits::<BossBrain>,
                )
                    .chain()
                    .in_set(FixedSet::Resolve),
            )
            .add_systems(FixedUpdate, apply_damage.in_set(FixedSet::Damage));
    }
}
