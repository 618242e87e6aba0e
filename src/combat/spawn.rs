//! Combat domain: enemy and boss spawning helpers.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::animation::AnimationDriver;
use crate::combat::{
    Boss, BossBrain, BossTuning, Enemy, EnemyBrain, EnemyTuning, StatusEffects, Team,
};
use crate::movement::{GameLayer, MovementState};
use crate::stats::CharacterStats;

const ENEMY_SIZE: Vec2 = Vec2::new(28.0, 36.0);
const BOSS_SIZE: Vec2 = Vec2::new(72.0, 96.0);

/// Shared body of every hostile actor.
fn foe_body(position: Vec2, size: Vec2, color: Color) -> impl Bundle {
    (
        Team::Enemy,
        StatusEffects::default(),
        MovementState::default(),
        AnimationDriver::default(),
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(position.extend(0.0)),
        (
            RigidBody::Dynamic,
            Collider::rectangle(size.x, size.y),
            CollisionEventsEnabled,
            CollisionLayers::new(
                GameLayer::Enemy,
                [GameLayer::Ground, GameLayer::Player],
            ),
            LinearVelocity::default(),
            LockedAxes::ROTATION_LOCKED,
            GravityScale(1.0),
        ),
    )
}

pub fn spawn_enemy(commands: &mut Commands, position: Vec2, tuning: &EnemyTuning) -> Entity {
    commands
        .spawn((
            Enemy,
            EnemyBrain::new(tuning.attack_cooldown),
            CharacterStats::new(tuning.max_health, 0.0, 0.0),
            foe_body(position, ENEMY_SIZE, Color::srgb(0.8, 0.3, 0.3)),
        ))
        .id()
}

pub fn spawn_boss(commands: &mut Commands, position: Vec2, tuning: &BossTuning) -> Entity {
    commands
        .spawn((
            Boss,
            BossBrain::new(tuning.attack_cooldown),
            CharacterStats::new(tuning.max_health, 0.0, 0.0),
            foe_body(position, BOSS_SIZE, Color::srgb(0.5, 0.1, 0.4)),
        ))
        .id()
}

/// Startup roster: one grunt on the left ledge, the boss on the floor.
pub(crate) fn spawn_foes(
    mut commands: Commands,
    enemy_tuning: Res<EnemyTuning>,
    boss_tuning: Res<BossTuning>,
) {
    let enemy = spawn_enemy(&mut commands, Vec2::new(-350.0, 0.0), &enemy_tuning);
    let boss = spawn_boss(&mut commands, Vec2::new(500.0, -130.0), &boss_tuning);
    info!("Spawned enemy {:?} and boss {:?}", enemy, boss);
}
