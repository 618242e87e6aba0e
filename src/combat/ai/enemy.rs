//! Combat domain: chase-and-strike enemy.

use avian2d::prelude::*;
use bevy::prelude::*;
use rand::Rng;

use crate::animation::{AnimationDriver, AnimationLibrary, AnimationSignal};
use crate::combat::ai::{AiContext, AiRng};
use crate::combat::{AttackWindow, EnemyTuning, StatusEffects, Striker};
use crate::fsm::{State, StateKind, StateMachine};
use crate::movement::{Motor, MovementState, Player};
use crate::stats::CharacterStats;
use crate::timing::Cooldown;

#[derive(Component, Debug)]
pub struct Enemy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyStateId {
    Idle,
    Chase,
    Attack,
    Death,
}

#[derive(Debug)]
pub enum EnemyState {
    Idle,
    Chase,
    /// `window` stays `None` when the clip or zone is missing
    Attack { window: Option<AttackWindow<Entity>> },
    Death,
}

impl EnemyState {
    pub fn attack() -> Self {
        EnemyState::Attack { window: None }
    }
}

pub type EnemyContext<'a> = AiContext<'a, EnemyTuning>;

impl StateKind for EnemyState {
    type Id = EnemyStateId;

    fn id(&self) -> EnemyStateId {
        match self {
            EnemyState::Idle => EnemyStateId::Idle,
            EnemyState::Chase => EnemyStateId::Chase,
            EnemyState::Attack { .. } => EnemyStateId::Attack,
            EnemyState::Death => EnemyStateId::Death,
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, EnemyState::Death)
    }

    fn name(&self) -> &'static str {
        match self {
            EnemyState::Idle => "idle",
            EnemyState::Chase => "chase",
            EnemyState::Attack { .. } => "attack",
            EnemyState::Death => "death",
        }
    }
}

fn in_detection(ctx: &EnemyContext) -> bool {
    ctx.distance_to_target()
        .is_some_and(|distance| distance <= ctx.tuning.detection_range)
}

impl<'a> State<EnemyContext<'a>> for EnemyState {
    fn enter(&mut self, ctx: &mut EnemyContext<'a>) {
        match self {
            EnemyState::Idle => {
                ctx.motor.stop_horizontal();
                ctx.play("enemy_idle");
            }
            EnemyState::Chase => {
                ctx.play("enemy_run");
            }
            EnemyState::Attack { window } => {
                ctx.attack_cooldown.trigger(ctx.now);
                ctx.motor.stop_horizontal();
                ctx.face_target();

                let tuning = ctx.tuning;
                let strike = &tuning.attack;
                if strike.zone.is_valid() && ctx.play(&strike.animation) {
                    *window = Some(
                        AttackWindow::open(0, strike.damage, strike.zone)
                            .with_effect(strike.effect)
                            .single_pass(),
                    );
                }
            }
            EnemyState::Death => {
                ctx.motor.stop();
                if !ctx.play("enemy_death") {
                    ctx.finished = true;
                }
            }
        }
    }

    fn logic_update(&mut self, ctx: &mut EnemyContext<'a>, _elapsed: f32) -> Option<Self> {
        let signals = ctx.animation.take_signals();

        match self {
            EnemyState::Idle => in_detection(ctx).then_some(EnemyState::Chase),
            EnemyState::Chase => {
                if !in_detection(ctx) {
                    return Some(EnemyState::Idle);
                }
                let in_reach = ctx
                    .horizontal_distance_to_target()
                    .is_some_and(|dx| dx <= ctx.tuning.attack_range);
                if in_reach && ctx.attack_cooldown.ready(ctx.now) {
                    return Some(EnemyState::attack());
                }
                let speed = ctx.tuning.move_speed;
                ctx.approach_target(speed);
                None
            }
            EnemyState::Attack { window } => {
                let Some(window) = window else {
                    return Some(EnemyState::Idle);
                };
                for signal in signals {
                    match signal {
                        AnimationSignal::Strike => window.arm(),
                        AnimationSignal::Ended => {
                            return Some(if in_detection(ctx) {
                                EnemyState::Chase
                            } else {
                                EnemyState::Idle
                            });
                        }
                        AnimationSignal::QueuePoint => {}
                    }
                }
                None
            }
            EnemyState::Death => {
                if signals.contains(&AnimationSignal::Ended) {
                    ctx.finished = true;
                }
                None
            }
        }
    }

    fn physics_update(
        &mut self,
        ctx: &mut EnemyContext<'a>,
        _elapsed: f32,
        _dt: f32,
    ) -> Option<Self> {
        match self {
            EnemyState::Attack { .. } => ctx.motor.stop_horizontal(),
            EnemyState::Death => ctx.motor.stop(),
            EnemyState::Idle | EnemyState::Chase => {}
        }
        None
    }
}

#[derive(Component, Debug, Default)]
pub struct EnemyBrain {
    pub machine: StateMachine<EnemyState>,
    pub attack_cooldown: Cooldown,
}

impl EnemyBrain {
    pub fn new(attack_cooldown: f32) -> Self {
        Self {
            machine: StateMachine::new(),
            attack_cooldown: Cooldown::new(attack_cooldown),
        }
    }
}

impl Striker for EnemyBrain {
    fn active_window(&mut self) -> Option<&mut AttackWindow<Entity>> {
        match self.machine.current_mut() {
            Some(EnemyState::Attack {
                window: Some(window),
            }) => Some(window),
            _ => None,
        }
    }
}

pub(crate) fn living_player(players: &Query<(&Transform, &CharacterStats), With<Player>>) -> Option<Vec2> {
    players
        .iter()
        .find(|(_, stats)| !stats.is_dead())
        .map(|(transform, _)| transform.translation.truncate())
}

pub(crate) fn begin_enemy_frames(mut query: Query<&mut EnemyBrain>) {
    for mut brain in &mut query {
        brain.machine.begin_frame();
    }
}

pub(crate) fn drive_enemies(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<EnemyTuning>,
    library: Res<AnimationLibrary>,
    mut rng: ResMut<AiRng>,
    players: Query<(&Transform, &CharacterStats), With<Player>>,
    mut enemies: Query<
        (
            Entity,
            &Transform,
            &CharacterStats,
            &StatusEffects,
            &mut EnemyBrain,
            &mut LinearVelocity,
            &mut MovementState,
            &mut AnimationDriver,
        ),
        (With<Enemy>, Without<Player>),
    >,
) {
    let now = time.elapsed_secs();
    let dt = time.delta_secs();
    let target = living_player(&players);

    for (entity, transform, stats, effects, mut brain, mut velocity, mut movement, mut animation) in
        &mut enemies
    {
        let EnemyBrain {
            machine,
            attack_cooldown,
        } = &mut *brain;
        let mut motor = Motor::read(&velocity, &movement);
        let mut ctx = EnemyContext {
            motor: &mut motor,
            position: transform.translation.truncate(),
            target,
            animation: &mut animation,
            library: &library,
            attack_cooldown,
            tuning: &tuning,
            health_pct: stats.health_percentage(),
            now,
            roll: rng.0.random(),
            finished: false,
        };

        if !machine.is_initialized() {
            machine.initialize(EnemyState::Idle, &mut ctx);
        }
        if stats.is_dead() && !machine.is_in_terminal_state() {
            machine.change_state(EnemyState::Death, &mut ctx);
        }

        if effects.is_stunned(now) && !machine.is_in_terminal_state() {
            ctx.motor.stop_horizontal();
        } else {
            machine.run_frame(&mut ctx, dt);
        }

        let finished = ctx.finished;
        motor.write(&mut velocity, &mut movement);

        if finished {
            info!("Enemy {:?} removed after death", entity);
            commands.entity(entity).despawn();
        }
    }
}

pub(crate) fn drive_enemy_physics(
    time: Res<Time>,
    tuning: Res<EnemyTuning>,
    library: Res<AnimationLibrary>,
    players: Query<(&Transform, &CharacterStats), With<Player>>,
    mut enemies: Query<
        (
            &Transform,
            &CharacterStats,
            &mut EnemyBrain,
            &mut LinearVelocity,
            &mut MovementState,
            &mut AnimationDriver,
        ),
        (With<Enemy>, Without<Player>),
    >,
) {
    let now = time.elapsed_secs();
    let dt = time.delta_secs();
    let target = living_player(&players);

    for (transform, stats, mut brain, mut velocity, mut movement, mut animation) in &mut enemies {
        let EnemyBrain {
            machine,
            attack_cooldown,
        } = &mut *brain;
        let mut motor = Motor::read(&velocity, &movement);
        let mut ctx = EnemyContext {
            motor: &mut motor,
            position: transform.translation.truncate(),
            target,
            animation: &mut animation,
            library: &library,
            attack_cooldown,
            tuning: &tuning,
            health_pct: stats.health_percentage(),
            now,
            roll: 0.0,
            finished: false,
        };

        machine.run_physics(&mut ctx, dt);
        motor.write(&mut velocity, &mut movement);
    }
}
