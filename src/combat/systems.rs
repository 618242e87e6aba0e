//! Combat domain: hit resolution, damage application and effect ticking.

use avian2d::prelude::*;
use bevy::ecs::component::Mutable;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::{
    AttackWindow, CombatTuning, DamageEvent, DamageTakenEvent, DeathEvent, StatusEffect,
    StatusEffects, Striker, Team,
};
use crate::movement::{MovementState, Player};
use crate::stats::{CharacterStats, DamageOutcome, Invulnerable};

/// Pushes every opposing body inside an armed window's zone through the
/// window, writing one `DamageEvent` per first hit.
pub fn resolve_hits<B>(
    spatial_query: SpatialQuery,
    tuning: Res<CombatTuning>,
    mut damage_events: MessageWriter<DamageEvent>,
    mut attackers: Query<(
        Entity,
        &Transform,
        &MovementState,
        &Team,
        &mut B,
        &mut CharacterStats,
        Has<Player>,
    )>,
    targets: Query<&Team, With<CharacterStats>>,
) where
    B: Component<Mutability = Mutable> + Striker,
{
    for (entity, transform, movement, team, mut brain, mut stats, is_player) in &mut attackers {
        let Some(window) = brain.active_window() else {
            continue;
        };
        if !window.is_armed() {
            continue;
        }

        let zone = *window.zone();
        let center = zone.world_center(transform.translation.truncate(), movement.facing);
        let size = zone.size();
        let filter = SpatialQueryFilter::from_mask(team.opponent_layer())
            .with_excluded_entities([entity]);

        let overlapping = spatial_query
            .shape_intersections(&Collider::rectangle(size.x, size.y), center, 0.0, &filter)
            .into_iter()
            .map(|target| (target, targets.get(target).ok().copied()));

        let charge = if is_player { Some(&mut *stats) } else { None };
        let hits = land_hits(window, entity, *team, overlapping, charge, tuning.ultimate_per_hit);

        if !hits.is_empty() {
            debug!(
                "Strike {} from {:?} landed on {} target(s)",
                window.strike(),
                entity,
                hits.len()
            );
        }
        for hit in hits {
            damage_events.write(hit);
        }
    }
}

/// One resolver pass of `window` over the bodies its zone overlaps, each
/// paired with its team. Friendly and teamless bodies are skipped. Returns
/// the pass's first hits; `charge` gains `ultimate_per_hit` for each.
pub(crate) fn land_hits(
    window: &mut AttackWindow<Entity>,
    source: Entity,
    source_team: Team,
    overlapping: impl IntoIterator<Item = (Entity, Option<Team>)>,
    charge: Option<&mut CharacterStats>,
    ultimate_per_hit: f32,
) -> Vec<DamageEvent> {
    let mut hits = Vec::new();
    for (target, team) in overlapping {
        if target == source || team.is_none_or(|team| team == source_team) {
            continue;
        }
        if let Some(amount) = window.register_hit(target) {
            hits.push(DamageEvent {
                source,
                target,
                amount,
                effect: window.effect(),
            });
        }
    }
    window.finish_pass();

    if let Some(stats) = charge
        && !hits.is_empty()
    {
        stats.add_ultimate(ultimate_per_hit * hits.len() as f32);
    }
    hits
}

/// Applies queued damage. Hurt AI actors get a hit stun; a kill cancels
/// effects and makes the body non-interactive.
pub(crate) fn apply_damage(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<CombatTuning>,
    mut damage_events: MessageReader<DamageEvent>,
    mut taken_events: MessageWriter<DamageTakenEvent>,
    mut death_events: MessageWriter<DeathEvent>,
    mut query: Query<(
        &mut CharacterStats,
        Option<&Invulnerable>,
        Option<&mut StatusEffects>,
        &MovementState,
        &mut LinearVelocity,
        Has<Player>,
    )>,
) {
    let now = time.elapsed_secs();

    for event in damage_events.read() {
        let Ok((mut stats, invulnerable, effects, movement, mut velocity, is_player)) =
            query.get_mut(event.target)
        else {
            continue;
        };

        let immune = invulnerable.is_some_and(|i| i.0);
        let outcome = stats.take_damage(event.amount, immune);

        match outcome {
            DamageOutcome::Ignored => {
                debug!(
                    "Damage ignored: target={:?}, dead={}, immune={}",
                    event.target,
                    stats.is_dead(),
                    immune
                );
                continue;
            }
            DamageOutcome::Hurt => {
                if let Some(mut effects) = effects {
                    if !is_player {
                        effects.stun(now, tuning.hit_stun_duration);
                    }
                    match event.effect {
                        Some(StatusEffect::Stun { .. }) if !movement.on_ground => {}
                        Some(effect) => effects.apply(effect, event.source, now),
                        None => {}
                    }
                }
            }
            DamageOutcome::Killed => {
                if let Some(mut effects) = effects {
                    effects.clear();
                }
                velocity.0 = Vec2::ZERO;
                commands.entity(event.target).insert((
                    RigidBody::Kinematic,
                    GravityScale(0.0),
                    ColliderDisabled,
                ));
                death_events.write(DeathEvent {
                    entity: event.target,
                });
                info!("{:?} killed by {:?}", event.target, event.source);
            }
        }

        taken_events.write(DamageTakenEvent {
            entity: event.target,
            source: event.source,
            outcome,
        });
    }
}

pub(crate) fn tick_burns(
    time: Res<Time>,
    mut damage_events: MessageWriter<DamageEvent>,
    mut query: Query<(Entity, &mut StatusEffects, &CharacterStats)>,
) {
    let now = time.elapsed_secs();

    for (entity, mut effects, stats) in &mut query {
        if stats.is_dead() {
            if effects.is_burning() {
                effects.clear();
            }
            continue;
        }
        if let Some((source, amount)) = effects.poll_burn(now) {
            damage_events.write(DamageEvent {
                source,
                target: entity,
                amount,
                effect: None,
            });
        }
    }
}

pub(crate) fn expire_status_effects(time: Res<Time>, mut query: Query<(Entity, &mut StatusEffects)>) {
    let now = time.elapsed_secs();

    for (entity, mut effects) in &mut query {
        if effects.expire(now) {
            debug!("{:?} stun ended", entity);
        }
    }
}
