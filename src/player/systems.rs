//! Player domain: spawning and the frame/physics drivers.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::animation::{AnimationDriver, AnimationLibrary};
use crate::combat::{AttackTuning, DamageTakenEvent, StatusEffects, Team};
use crate::movement::{
    GameLayer, JumpAssist, Motor, MovementState, MovementTuning, Player, PlayerInput,
};
use crate::player::{PlayerBrain, PlayerContext, PlayerState};
use crate::respawn::{Checkpoints, RespawnRequested};
use crate::stats::{CharacterStats, DamageOutcome, Invulnerable, StatsTuning};

const PLAYER_SIZE: Vec2 = Vec2::new(24.0, 48.0);

pub(crate) fn spawn_player(
    mut commands: Commands,
    checkpoints: Res<Checkpoints>,
    stats: Res<StatsTuning>,
    movement: Res<MovementTuning>,
    attacks: Res<AttackTuning>,
) {
    let position = checkpoints.respawn_point();

    let entity = commands
        .spawn((
            (
                Player,
                Team::Player,
                PlayerBrain::new(&attacks, &movement),
                CharacterStats::from_tuning(&stats),
                StatusEffects::default(),
                Invulnerable::default(),
                JumpAssist::default(),
                MovementState::default(),
                AnimationDriver::default(),
            ),
            Sprite {
                color: Color::srgb(0.3, 0.6, 0.9),
                custom_size: Some(PLAYER_SIZE),
                ..default()
            },
            Transform::from_translation(position.extend(1.0)),
            (
                RigidBody::Dynamic,
                Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
                CollisionEventsEnabled,
                player_layers(false),
                LinearVelocity::default(),
                LockedAxes::ROTATION_LOCKED,
                GravityScale(1.0),
            ),
        ))
        .id();

    info!(
        "Spawned player {:?} at ({:.0}, {:.0})",
        entity, position.x, position.y
    );
}

/// Collision layers of the player body. A rolling body drops enemies from its
/// filters and passes through them.
pub(crate) fn player_layers(pass_through: bool) -> CollisionLayers {
    if pass_through {
        CollisionLayers::new(GameLayer::Player, [GameLayer::Ground, GameLayer::Sensor])
    } else {
        CollisionLayers::new(
            GameLayer::Player,
            [GameLayer::Ground, GameLayer::Enemy, GameLayer::Sensor],
        )
    }
}

/// Mirrors the current state onto the body: damage immunity and the roll's
/// pass-through layers. Called after every hook run, frame or physics.
fn sync_body(
    brain: &PlayerBrain,
    mut invulnerable: Mut<Invulnerable>,
    mut layers: Mut<CollisionLayers>,
) {
    invulnerable.set_if_neq(Invulnerable(brain.is_damage_immune()));
    layers.set_if_neq(player_layers(brain.passes_through_enemies()));
}

pub(crate) fn begin_player_frames(mut query: Query<&mut PlayerBrain>) {
    for mut brain in &mut query {
        brain.machine.begin_frame();
    }
}

/// Runs the player's input and logic hooks for this frame.
///
/// Damage outcomes from the last fixed steps are applied first as forced
/// transitions, which also makes the rest of the frame's hooks wait for the
/// next frame. A stunned player sees an empty input snapshot.
pub(crate) fn drive_player_frame(
    time: Res<Time>,
    input: Res<PlayerInput>,
    movement: Res<MovementTuning>,
    attacks: Res<AttackTuning>,
    library: Res<AnimationLibrary>,
    mut damage_taken: MessageReader<DamageTakenEvent>,
    mut respawn_requests: MessageWriter<RespawnRequested>,
    mut players: Query<
        (
            Entity,
            &mut PlayerBrain,
            &mut CharacterStats,
            &StatusEffects,
            &mut Invulnerable,
            &mut CollisionLayers,
            &mut JumpAssist,
            &mut LinearVelocity,
            &mut MovementState,
            &mut AnimationDriver,
        ),
        With<Player>,
    >,
) {
    let now = time.elapsed_secs();
    let dt = time.delta_secs();
    let outcomes: Vec<(Entity, DamageOutcome)> = damage_taken
        .read()
        .map(|event| (event.entity, event.outcome))
        .collect();
    let no_input = PlayerInput::default();

    for (
        entity,
        mut brain,
        mut stats,
        effects,
        invulnerable,
        layers,
        mut assist,
        mut velocity,
        mut movement_state,
        mut animation,
    ) in &mut players
    {
        let PlayerBrain {
            machine,
            strike_cooldown,
            dash_cooldown,
            unlocked_tiers,
        } = &mut *brain;
        let mut motor = Motor::read(&velocity, &movement_state);
        let mut ctx = PlayerContext {
            motor: &mut motor,
            animation: &mut animation,
            library: &library,
            input: if effects.is_stunned(now) {
                &no_input
            } else {
                &*input
            },
            stats: &mut stats,
            assist: &mut assist,
            strike_cooldown,
            dash_cooldown,
            unlocked_tiers: *unlocked_tiers,
            movement: &movement,
            attacks: &attacks,
            now,
            respawn_requested: false,
        };

        if !machine.is_initialized() {
            machine.initialize(PlayerState::Idle, &mut ctx);
        }

        for (_, outcome) in outcomes.iter().filter(|(target, _)| *target == entity) {
            if let Some(next) = PlayerState::for_damage(*outcome)
                && machine.change_state(next, &mut ctx)
            {
                info!("Player {:?} damaged -> {}", entity, machine.current_name());
            }
        }

        machine.run_frame(&mut ctx, dt);

        let respawn = ctx.respawn_requested;
        motor.write(&mut velocity, &mut movement_state);

        sync_body(&brain, invulnerable, layers);

        if respawn {
            info!("Player {:?} requests respawn", entity);
            respawn_requests.write(RespawnRequested { entity });
        }
    }
}

/// Runs the player's physics hooks for one fixed step. An action that ends
/// here (a roll running out) drops its immunity before damage is applied.
pub(crate) fn drive_player_physics(
    time: Res<Time>,
    input: Res<PlayerInput>,
    movement: Res<MovementTuning>,
    attacks: Res<AttackTuning>,
    library: Res<AnimationLibrary>,
    mut players: Query<
        (
            &mut PlayerBrain,
            &mut CharacterStats,
            &StatusEffects,
            &mut Invulnerable,
            &mut CollisionLayers,
            &mut JumpAssist,
            &mut LinearVelocity,
            &mut MovementState,
            &mut AnimationDriver,
        ),
        With<Player>,
    >,
) {
    let now = time.elapsed_secs();
    let dt = time.delta_secs();
    let no_input = PlayerInput::default();

    for (
        mut brain,
        mut stats,
        effects,
        invulnerable,
        layers,
        mut assist,
        mut velocity,
        mut movement_state,
        mut animation,
    ) in &mut players
    {
        let PlayerBrain {
            machine,
            strike_cooldown,
            dash_cooldown,
            unlocked_tiers,
        } = &mut *brain;
        let mut motor = Motor::read(&velocity, &movement_state);
        let mut ctx = PlayerContext {
            motor: &mut motor,
            animation: &mut animation,
            library: &library,
            input: if effects.is_stunned(now) {
                &no_input
            } else {
                &*input
            },
            stats: &mut stats,
            assist: &mut assist,
            strike_cooldown,
            dash_cooldown,
            unlocked_tiers: *unlocked_tiers,
            movement: &movement,
            attacks: &attacks,
            now,
            respawn_requested: false,
        };

        machine.run_physics(&mut ctx, dt);
        motor.write(&mut velocity, &mut movement_state);
        sync_body(&brain, invulnerable, layers);
    }
}
