//! Debug domain: hotkeys and runtime overrides.

use bevy::prelude::*;

use crate::combat::{
    BossBrain, BossTuning, EnemyBrain, EnemyTuning, StatusEffects, spawn_boss, spawn_enemy,
};
use crate::debug::state::{DebugState, toggle_label};
use crate::movement::Player;
use crate::player::PlayerBrain;
use crate::stats::{CharacterStats, Invulnerable};

/// Handle Ctrl+key shortcuts for debug actions
pub(crate) fn handle_debug_hotkeys(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    enemy_tuning: Res<EnemyTuning>,
    boss_tuning: Res<BossTuning>,
    mut player_query: Query<(&Transform, &mut CharacterStats, &mut StatusEffects), With<Player>>,
) {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    if !ctrl {
        return;
    }

    // Ctrl+G: Toggle invincibility
    if keyboard.just_pressed(KeyCode::KeyG) {
        debug_state.invincible = !debug_state.invincible;
        let msg = format!("Invincibility {}", toggle_label(debug_state.invincible));
        debug_state.set_message(msg, 2.0);
    }

    // Ctrl+T: Toggle transition logging
    if keyboard.just_pressed(KeyCode::KeyT) {
        debug_state.log_transitions = !debug_state.log_transitions;
        let msg = format!(
            "Transition log {}",
            toggle_label(debug_state.log_transitions)
        );
        debug_state.set_message(msg, 2.0);
    }

    let Ok((transform, mut stats, mut effects)) = player_query.single_mut() else {
        return;
    };
    let player_pos = transform.translation.truncate();

    // Ctrl+E: Spawn enemy ahead of the player
    if keyboard.just_pressed(KeyCode::KeyE) {
        let pos = player_pos + Vec2::new(150.0, 0.0);
        let entity = spawn_enemy(&mut commands, pos, &enemy_tuning);
        debug_state.set_message(format!("Spawned enemy {:?} at {:?}", entity, pos), 2.0);
    }

    // Ctrl+B: Spawn boss ahead of the player
    if keyboard.just_pressed(KeyCode::KeyB) {
        let pos = player_pos + Vec2::new(250.0, 0.0);
        let entity = spawn_boss(&mut commands, pos, &boss_tuning);
        debug_state.set_message(format!("Spawned boss {:?} at {:?}", entity, pos), 2.0);
    }

    // Ctrl+H: Full heal and clear effects
    if keyboard.just_pressed(KeyCode::KeyH) && !stats.is_dead() {
        let max_health = stats.max_health;
        let healed = stats.heal(max_health);
        effects.clear();
        debug_state.set_message(format!("Healed {:.0}", healed), 2.0);
    }
}

pub(crate) fn update_status_message(time: Res<Time>, mut debug_state: ResMut<DebugState>) {
    debug_state.tick_message(time.delta_secs());
}

/// Holds the player's damage immunity on while invincible.
///
/// Runs on the fixed step between the player's physics driver, which re-syncs
/// the flag from the current state, and damage application.
pub(crate) fn apply_invincibility(
    debug_state: Res<DebugState>,
    mut player_query: Query<(&mut CharacterStats, &mut Invulnerable), With<Player>>,
) {
    if !debug_state.invincible {
        return;
    }

    for (mut stats, mut invulnerable) in &mut player_query {
        invulnerable.0 = true;
        let max_health = stats.max_health;
        if !stats.is_dead() && stats.health() < max_health {
            stats.heal(max_health);
        }
    }
}

/// Logs every state machine that changed state this frame.
pub(crate) fn log_transitions(
    debug_state: Res<DebugState>,
    players: Query<(Entity, &PlayerBrain)>,
    enemies: Query<(Entity, &EnemyBrain)>,
    bosses: Query<(Entity, &BossBrain)>,
) {
    if !debug_state.log_transitions {
        return;
    }

    for (entity, brain) in &players {
        if brain.machine.changed_this_frame() {
            info!("[DEBUG] Player {:?} -> {}", entity, brain.machine.current_name());
        }
    }
    for (entity, brain) in &enemies {
        if brain.machine.changed_this_frame() {
            info!("[DEBUG] Enemy {:?} -> {}", entity, brain.machine.current_name());
        }
    }
    for (entity, brain) in &bosses {
        if brain.machine.changed_this_frame() {
            info!("[DEBUG] Boss {:?} -> {}", entity, brain.machine.current_name());
        }
    }
}
