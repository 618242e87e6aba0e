//! Combat domain: unit tests for windows, zones, effects and strike tables.

use avian2d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;

use super::systems::land_hits;
use crate::combat::{
    AttackTuning, AttackWindow, CombatTuning, DamageEvent, DamageTakenEvent, DeathEvent, HitZone,
    StatusEffect, StatusEffects, Team, apply_damage,
};
use crate::movement::{Facing, GameLayer, MovementState, Player};
use crate::stats::{CharacterStats, DamageOutcome, Invulnerable};

fn zone() -> HitZone {
    HitZone::new(Vec2::new(30.0, 5.0), Vec2::new(40.0, 20.0))
}

fn targets(count: usize) -> Vec<Entity> {
    let mut world = World::new();
    (0..count).map(|_| world.spawn_empty().id()).collect()
}

// ---- AttackWindow ----

#[test]
fn test_window_ignores_hits_until_armed() {
    let target = targets(1)[0];
    let mut window = AttackWindow::open(0, 10.0, zone());

    assert_eq!(window.register_hit(target), None);
    assert_eq!(window.hit_count(), 0);

    window.arm();
    assert_eq!(window.register_hit(target), Some(10.0));
}

#[test]
fn test_window_hits_each_target_once() {
    let ids = targets(2);
    let mut window = AttackWindow::open(1, 15.0, zone());
    window.arm();

    assert_eq!(window.register_hit(ids[0]), Some(15.0));
    assert_eq!(window.register_hit(ids[0]), None);
    assert_eq!(window.register_hit(ids[1]), Some(15.0));
    assert_eq!(window.hit_count(), 2);
    assert!(window.has_hit(&ids[0]));
}

#[test]
fn test_window_rearm_does_not_reset_hits() {
    let ids = targets(1);
    let mut window = AttackWindow::open(0, 10.0, zone());
    window.arm();
    window.register_hit(ids[0]);

    window.disarm();
    window.arm();

    assert_eq!(window.register_hit(ids[0]), None);
}

#[test]
fn test_single_pass_window_disarms_after_resolution() {
    let mut window: AttackWindow<u32> = AttackWindow::open(0, 40.0, zone()).single_pass();
    window.arm();
    window.finish_pass();
    assert!(!window.is_armed());

    let mut sustained: AttackWindow<u32> = AttackWindow::open(0, 40.0, zone());
    sustained.arm();
    sustained.finish_pass();
    assert!(sustained.is_armed());
}

#[test]
fn test_window_carries_effect() {
    let stun = StatusEffect::Stun { duration: 2.0 };
    let window: AttackWindow<u32> = AttackWindow::open(2, 100.0, zone()).with_effect(Some(stun));
    assert_eq!(window.effect(), Some(stun));
    assert_eq!(window.strike(), 2);
}

// ---- HitZone ----

#[test]
fn test_hit_zone_mirrors_when_facing_left() {
    let zone = zone();
    let origin = Vec2::new(100.0, 0.0);

    assert_eq!(zone.world_center(origin, Facing::Right), Vec2::new(130.0, 5.0));
    assert_eq!(zone.world_center(origin, Facing::Left), Vec2::new(70.0, 5.0));
    assert_eq!(zone.size(), Vec2::new(40.0, 20.0));
}

#[test]
fn test_hit_zone_without_area_is_invalid() {
    assert!(zone().is_valid());
    assert!(!HitZone::new(Vec2::ZERO, Vec2::new(0.0, 10.0)).is_valid());
}

// ---- Status effects ----

#[test]
fn test_stun_expires() {
    let mut effects = StatusEffects::default();
    effects.stun(1.0, 2.0);

    assert!(effects.is_stunned(2.5));
    assert!(!effects.expire(2.5));
    assert!(effects.is_stunned(2.9));

    assert!(effects.expire(3.0));
    assert!(!effects.is_stunned(3.0));
}

#[test]
fn test_new_stun_replaces_old() {
    let mut effects = StatusEffects::default();
    effects.stun(0.0, 5.0);
    effects.stun(1.0, 0.5);

    assert!(!effects.is_stunned(2.0));
}

#[test]
fn test_burn_ticks_immediately_then_per_interval() {
    let source = targets(1)[0];
    let mut effects = StatusEffects::default();
    effects.burn(source, 10.0, 10.0, 1.0, 3.0);

    assert_eq!(effects.poll_burn(10.0), Some((source, 10.0)));
    assert_eq!(effects.poll_burn(10.5), None);
    assert_eq!(effects.poll_burn(11.0), Some((source, 10.0)));
    assert_eq!(effects.poll_burn(12.0), Some((source, 10.0)));
    assert!(!effects.is_burning());
    assert_eq!(effects.poll_burn(13.0), None);
}

#[test]
fn test_burn_catches_up_on_long_gap() {
    let source = targets(1)[0];
    let mut effects = StatusEffects::default();
    effects.apply(
        StatusEffect::Burn {
            damage: 10.0,
            interval: 1.0,
            duration: 3.0,
        },
        source,
        0.0,
    );

    assert_eq!(effects.poll_burn(5.0), Some((source, 30.0)));
}

#[test]
fn test_new_burn_replaces_old() {
    let ids = targets(2);
    let mut effects = StatusEffects::default();
    effects.burn(ids[0], 0.0, 10.0, 1.0, 3.0);
    effects.poll_burn(0.0);

    effects.burn(ids[1], 0.5, 4.0, 1.0, 1.0);

    assert_eq!(effects.poll_burn(0.5), Some((ids[1], 4.0)));
    assert!(!effects.is_burning());
}

#[test]
fn test_clear_cancels_everything() {
    let source = targets(1)[0];
    let mut effects = StatusEffects::default();
    effects.stun(0.0, 2.0);
    effects.burn(source, 0.0, 10.0, 1.0, 3.0);

    effects.clear();

    assert!(!effects.is_stunned(0.5));
    assert_eq!(effects.poll_burn(0.5), None);
}

// ---- Strike tables ----

#[test]
fn test_tiered_combo_damage_never_decreases() {
    let combo = AttackTuning::tiered_combo(10.0, 5.0, zone(), 4);
    let damage: Vec<f32> = combo.iter().map(|strike| strike.damage).collect();

    assert_eq!(damage, vec![10.0, 15.0, 20.0, 25.0]);
    assert_eq!(combo[3].animation, "attack_4");
}

#[test]
fn test_default_attack_tuning_shape() {
    let tuning = AttackTuning::default();
    assert_eq!(tuning.max_combo_index(), 2);
    assert_eq!(tuning.skills.len(), 2);
    assert!(tuning.skills.iter().all(|skill| skill.mana_cost > 0.0));
}

// ---- Teams ----

#[test]
fn test_teams_target_each_other() {
    assert!(matches!(Team::Player.opponent_layer(), GameLayer::Enemy));
    assert!(matches!(Team::Enemy.opponent_layer(), GameLayer::Player));
    assert!(matches!(Team::Enemy.layer(), GameLayer::Enemy));
}

// ---- Hit resolution ----

#[test]
fn test_window_lands_once_across_passes() {
    let ids = targets(3);
    let (attacker, foe, friend) = (ids[0], ids[1], ids[2]);
    let mut window = AttackWindow::open(0, 12.0, zone());
    window.arm();

    let overlapping = [
        (attacker, Some(Team::Player)),
        (foe, Some(Team::Enemy)),
        (friend, Some(Team::Player)),
    ];
    let first = land_hits(&mut window, attacker, Team::Player, overlapping, None, 5.0);
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].target, foe);
    assert_eq!(first[0].amount, 12.0);

    for _ in 0..10 {
        let again = land_hits(&mut window, attacker, Team::Player, overlapping, None, 5.0);
        assert!(again.is_empty());
    }
}

#[test]
fn test_bodies_without_team_are_skipped() {
    let ids = targets(2);
    let mut window = AttackWindow::open(0, 12.0, zone());
    window.arm();

    let hits = land_hits(&mut window, ids[0], Team::Enemy, [(ids[1], None)], None, 5.0);

    assert!(hits.is_empty());
    assert!(!window.has_hit(&ids[1]));
}

#[test]
fn test_single_pass_window_disarms_after_resolving() {
    let ids = targets(3);
    let mut window = AttackWindow::open(0, 8.0, zone()).single_pass();
    window.arm();

    let first = [(ids[1], Some(Team::Player))];
    let hits = land_hits(&mut window, ids[0], Team::Enemy, first, None, 0.0);
    assert_eq!(hits.len(), 1);
    assert!(!window.is_armed());

    let second = [(ids[2], Some(Team::Player))];
    let late = land_hits(&mut window, ids[0], Team::Enemy, second, None, 0.0);
    assert!(late.is_empty());
}

#[test]
fn test_ultimate_charges_per_target_hit() {
    let ids = targets(4);
    let mut stats = CharacterStats::new(100.0, 100.0, 100.0);
    let mut window = AttackWindow::open(0, 10.0, zone()).with_effect(Some(StatusEffect::Stun {
        duration: 1.0,
    }));
    window.arm();

    let foes = [
        (ids[1], Some(Team::Enemy)),
        (ids[2], Some(Team::Enemy)),
        (ids[3], Some(Team::Enemy)),
    ];
    let hits = land_hits(&mut window, ids[0], Team::Player, foes, Some(&mut stats), 5.0);

    assert_eq!(hits.len(), 3);
    assert!(hits.iter().all(|hit| hit.effect == Some(StatusEffect::Stun { duration: 1.0 })));
    assert_eq!(stats.ultimate(), 15.0);

    land_hits(&mut window, ids[0], Team::Player, foes, Some(&mut stats), 5.0);
    assert_eq!(stats.ultimate(), 15.0);
}

// ---- Damage application ----

fn damage_world() -> World {
    let mut world = World::new();
    world.init_resource::<Time>();
    world.init_resource::<CombatTuning>();
    world.init_resource::<Messages<DamageEvent>>();
    world.init_resource::<Messages<DamageTakenEvent>>();
    world.init_resource::<Messages<DeathEvent>>();
    world
}

fn spawn_actor(world: &mut World, health: f32, on_ground: bool) -> Entity {
    world
        .spawn((
            CharacterStats::new(health, 0.0, 100.0),
            StatusEffects::default(),
            MovementState {
                on_ground,
                ..default()
            },
            LinearVelocity(Vec2::new(40.0, -10.0)),
            Team::Enemy,
        ))
        .id()
}

fn hit(world: &mut World, source: Entity, target: Entity, amount: f32, effect: Option<StatusEffect>) {
    world.resource_mut::<Messages<DamageEvent>>().write(DamageEvent {
        source,
        target,
        amount,
        effect,
    });
}

fn run_damage(world: &mut World) {
    world
        .run_system_once(apply_damage)
        .expect("apply_damage should run");
    world.resource_mut::<Messages<DamageEvent>>().clear();
}

fn taken(world: &mut World) -> Vec<DamageOutcome> {
    world
        .resource_mut::<Messages<DamageTakenEvent>>()
        .drain()
        .map(|event| event.outcome)
        .collect()
}

#[test]
fn test_hurt_ai_gets_hit_stun_but_player_does_not() {
    let mut world = damage_world();
    let source = world.spawn_empty().id();
    let enemy = spawn_actor(&mut world, 100.0, true);
    let player = spawn_actor(&mut world, 100.0, true);
    world.entity_mut(player).insert((Player, Invulnerable::default()));

    hit(&mut world, source, enemy, 10.0, None);
    hit(&mut world, source, player, 10.0, None);
    run_damage(&mut world);

    assert!(world.get::<StatusEffects>(enemy).is_some_and(|e| e.is_stunned(0.0)));
    assert!(world.get::<StatusEffects>(player).is_some_and(|e| !e.is_stunned(0.0)));
    assert_eq!(taken(&mut world), vec![DamageOutcome::Hurt, DamageOutcome::Hurt]);
}

#[test]
fn test_stun_effect_skipped_on_airborne_target() {
    let mut world = damage_world();
    let source = world.spawn_empty().id();
    let flying = spawn_actor(&mut world, 100.0, false);
    let grounded = spawn_actor(&mut world, 100.0, true);
    world.entity_mut(flying).insert(Player);
    world.entity_mut(grounded).insert(Player);
    let stun = Some(StatusEffect::Stun { duration: 2.0 });

    hit(&mut world, source, flying, 5.0, stun);
    hit(&mut world, source, grounded, 5.0, stun);
    run_damage(&mut world);

    assert!(world.get::<StatusEffects>(flying).is_some_and(|e| !e.is_stunned(1.0)));
    assert!(world.get::<StatusEffects>(grounded).is_some_and(|e| e.is_stunned(1.0)));
}

#[test]
fn test_immune_target_ignores_damage() {
    let mut world = damage_world();
    let source = world.spawn_empty().id();
    let player = spawn_actor(&mut world, 100.0, true);
    world.entity_mut(player).insert((Player, Invulnerable(true)));

    hit(&mut world, source, player, 50.0, None);
    run_damage(&mut world);

    assert_eq!(world.get::<CharacterStats>(player).map(|s| s.health()), Some(100.0));
    assert!(taken(&mut world).is_empty());
}

#[test]
fn test_kill_disables_body_and_reports_death_once() {
    let mut world = damage_world();
    let source = world.spawn_empty().id();
    let enemy = spawn_actor(&mut world, 30.0, true);
    let burn = StatusEffect::Burn {
        damage: 2.0,
        interval: 0.5,
        duration: 3.0,
    };

    hit(&mut world, source, enemy, 10.0, Some(burn));
    hit(&mut world, source, enemy, 25.0, None);
    hit(&mut world, source, enemy, 25.0, None);
    run_damage(&mut world);

    hit(&mut world, source, enemy, 25.0, None);
    run_damage(&mut world);

    assert_eq!(world.resource::<Messages<DeathEvent>>().len(), 1);
    assert_eq!(
        taken(&mut world),
        vec![DamageOutcome::Hurt, DamageOutcome::Killed]
    );

    let body = world.entity(enemy);
    assert!(body.get::<StatusEffects>().is_some_and(|e| !e.is_burning()));
    assert_eq!(body.get::<LinearVelocity>().map(|v| v.0), Some(Vec2::ZERO));
    assert_eq!(body.get::<RigidBody>(), Some(&RigidBody::Kinematic));
    assert_eq!(body.get::<GravityScale>().map(|g| g.0), Some(0.0));
    assert!(body.contains::<ColliderDisabled>());
}
