//! Respawn domain: trigger detection and respawn handling.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::{CombatTuning, DamageEvent, StatusEffects};
use crate::movement::{GameLayer, JumpAssist, Player};
use crate::player::{PlayerBrain, player_layers};
use crate::respawn::{Checkpoint, Checkpoints, KillZone, RespawnRequested};
use crate::stats::{CharacterStats, Invulnerable};

/// Puts a body at `point` at rest and forgets its jump assist state.
pub fn teleport(
    transform: &mut Transform,
    velocity: &mut LinearVelocity,
    assist: &mut JumpAssist,
    point: Vec2,
) {
    transform.translation = point.extend(transform.translation.z);
    velocity.0 = Vec2::ZERO;
    assist.reset();
}

/// `(trigger, other)` when one side of the contact satisfies `is_trigger`.
fn split_contact(
    event: &CollisionStart,
    is_trigger: impl Fn(Entity) -> bool,
) -> Option<(Entity, Entity)> {
    if is_trigger(event.collider1) {
        Some((event.collider1, event.collider2))
    } else if is_trigger(event.collider2) {
        Some((event.collider2, event.collider1))
    } else {
        None
    }
}

pub(crate) fn spawn_triggers(mut commands: Commands) {
    let sensor_layers = CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]);

    // Catches anything that walks off the floor
    commands.spawn((
        KillZone,
        Transform::from_xyz(0.0, -420.0, 0.0),
        Collider::rectangle(4000.0, 80.0),
        Sensor,
        CollisionEventsEnabled,
        sensor_layers,
    ));

    commands.spawn((
        Checkpoint,
        Sprite {
            color: Color::srgb(0.9, 0.8, 0.3),
            custom_size: Some(Vec2::new(8.0, 60.0)),
            ..default()
        },
        Transform::from_xyz(300.0, 100.0, 0.0),
        Collider::rectangle(24.0, 60.0),
        Sensor,
        CollisionEventsEnabled,
        sensor_layers,
    ));
}

pub(crate) fn detect_checkpoints(
    mut collisions: MessageReader<CollisionStart>,
    mut checkpoints: ResMut<Checkpoints>,
    triggers: Query<&Transform, With<Checkpoint>>,
    players: Query<(), With<Player>>,
) {
    for event in collisions.read() {
        let Some((trigger, other)) = split_contact(event, |entity| triggers.contains(entity))
        else {
            continue;
        };
        if !players.contains(other) {
            continue;
        }
        let Ok(transform) = triggers.get(trigger) else {
            continue;
        };

        let point = transform.translation.truncate();
        if checkpoints.set_checkpoint(point) {
            info!("Checkpoint set at ({:.0}, {:.0})", point.x, point.y);
        }
    }
}

/// A kill zone costs `kill_zone_damage` and sends the player back to the
/// last checkpoint at rest.
pub(crate) fn detect_kill_zones(
    mut collisions: MessageReader<CollisionStart>,
    tuning: Res<CombatTuning>,
    checkpoints: Res<Checkpoints>,
    mut damage_events: MessageWriter<DamageEvent>,
    zones: Query<(), With<KillZone>>,
    mut players: Query<(&mut Transform, &mut LinearVelocity, &mut JumpAssist), With<Player>>,
) {
    for event in collisions.read() {
        let Some((zone, other)) = split_contact(event, |entity| zones.contains(entity)) else {
            continue;
        };
        let Ok((mut transform, mut velocity, mut assist)) = players.get_mut(other) else {
            continue;
        };

        damage_events.write(DamageEvent {
            source: zone,
            target: other,
            amount: tuning.kill_zone_damage,
            effect: None,
        });

        let point = checkpoints.respawn_point();
        teleport(&mut transform, &mut velocity, &mut assist, point);
        info!(
            "Player {:?} fell into a kill zone, back to ({:.0}, {:.0})",
            other, point.x, point.y
        );
    }
}

/// Revives the requesting player at the respawn point and restores the body
/// that death made non-interactive.
pub(crate) fn handle_respawn_requests(
    mut commands: Commands,
    mut requests: MessageReader<RespawnRequested>,
    checkpoints: Res<Checkpoints>,
    mut players: Query<
        (
            &mut PlayerBrain,
            &mut CharacterStats,
            &mut StatusEffects,
            &mut Invulnerable,
            &mut Transform,
            &mut LinearVelocity,
            &mut JumpAssist,
        ),
        With<Player>,
    >,
) {
    for request in requests.read() {
        let Ok((
            mut brain,
            mut stats,
            mut effects,
            mut invulnerable,
            mut transform,
            mut velocity,
            mut assist,
        )) = players.get_mut(request.entity)
        else {
            warn!("Respawn requested for missing player {:?}", request.entity);
            continue;
        };

        let point = checkpoints.respawn_point();
        stats.revive();
        effects.clear();
        invulnerable.0 = false;
        brain.reset();
        teleport(&mut transform, &mut velocity, &mut assist, point);

        commands
            .entity(request.entity)
            .insert((RigidBody::Dynamic, GravityScale(1.0), player_layers(false)))
            .remove::<ColliderDisabled>();

        info!(
            "Player {:?} respawned at {} ({:.0}, {:.0})",
            request.entity,
            if checkpoints.has_checkpoint() { "checkpoint" } else { "spawn" },
            point.x,
            point.y
        );
    }
}
