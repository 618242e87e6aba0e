//! Combat domain: multi-phase boss with health-gated attack selection.

use avian2d::prelude::*;
use bevy::prelude::*;
use rand::Rng;

use crate::animation::{AnimationDriver, AnimationLibrary, AnimationSignal};
use crate::combat::ai::enemy::living_player;
use crate::combat::ai::{AiContext, AiRng};
use crate::combat::{AttackWindow, BossTuning, StatusEffects, Striker};
use crate::fsm::{State, StateKind, StateMachine};
use crate::movement::{Motor, MovementState, Player};
use crate::stats::CharacterStats;
use crate::timing::Cooldown;

#[derive(Component, Debug)]
pub struct Boss;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossStateId {
    Chase,
    Attack,
    Recover,
    Death,
}

#[derive(Debug)]
pub enum BossState {
    Chase,
    Attack {
        variant: usize,
        window: Option<AttackWindow<Entity>>,
    },
    /// Waits out the attack cooldown before chasing again
    Recover,
    Death,
}

impl BossState {
    pub fn attack(variant: usize) -> Self {
        BossState::Attack {
            variant,
            window: None,
        }
    }
}

pub type BossContext<'a> = AiContext<'a, BossTuning>;

impl StateKind for BossState {
    type Id = BossStateId;

    fn id(&self) -> BossStateId {
        match self {
            BossState::Chase => BossStateId::Chase,
            BossState::Attack { .. } => BossStateId::Attack,
            BossState::Recover => BossStateId::Recover,
            BossState::Death => BossStateId::Death,
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, BossState::Death)
    }

    fn name(&self) -> &'static str {
        match self {
            BossState::Chase => "chase",
            BossState::Attack { .. } => "attack",
            BossState::Recover => "recover",
            BossState::Death => "death",
        }
    }
}

impl<'a> State<BossContext<'a>> for BossState {
    fn enter(&mut self, ctx: &mut BossContext<'a>) {
        match self {
            BossState::Chase => {
                ctx.play("boss_run");
            }
            BossState::Attack { variant, window } => {
                ctx.face_target();
                ctx.motor.stop_horizontal();

                let tuning = ctx.tuning;
                if let Some(strike) = tuning.attacks.get(*variant)
                    && strike.zone.is_valid()
                    && ctx.play(&strike.animation)
                {
                    *window = Some(
                        AttackWindow::open(*variant as u8, strike.damage, strike.zone)
                            .with_effect(strike.effect)
                            .single_pass(),
                    );
                }
            }
            BossState::Recover => {
                ctx.motor.stop_horizontal();
                ctx.attack_cooldown.trigger(ctx.now);
                ctx.play("boss_idle");
            }
            BossState::Death => {
                ctx.motor.stop();
                if !ctx.play("boss_death") {
                    ctx.finished = true;
                }
            }
        }
    }

    fn logic_update(&mut self, ctx: &mut BossContext<'a>, _elapsed: f32) -> Option<Self> {
        let signals = ctx.animation.take_signals();

        match self {
            BossState::Chase => {
                let Some(dx) = ctx.horizontal_distance_to_target() else {
                    ctx.motor.stop_horizontal();
                    return None;
                };
                if dx <= ctx.tuning.decision_range && ctx.attack_cooldown.ready(ctx.now) {
                    if let Some(variant) = ctx.tuning.pick_attack(ctx.health_pct, ctx.roll) {
                        info!(
                            "Boss picks attack {} at {:.0}% health",
                            variant + 1,
                            ctx.health_pct
                        );
                        return Some(BossState::attack(variant));
                    }
                }
                let speed = ctx.tuning.move_speed;
                ctx.approach_target(speed);
                None
            }
            BossState::Attack { window, .. } => {
                let Some(window) = window else {
                    return Some(BossState::Recover);
                };
                for signal in signals {
                    match signal {
                        AnimationSignal::Strike => window.arm(),
                        AnimationSignal::Ended => return Some(BossState::Recover),
                        AnimationSignal::QueuePoint => {}
                    }
                }
                None
            }
            BossState::Recover => ctx
                .attack_cooldown
                .ready(ctx.now)
                .then_some(BossState::Chase),
            BossState::Death => {
                if signals.contains(&AnimationSignal::Ended) {
                    ctx.finished = true;
                }
                None
            }
        }
    }

    fn physics_update(&mut self, ctx: &mut BossContext<'a>, _elapsed: f32, _dt: f32) -> Option<Self> {
        match self {
            BossState::Attack { .. } | BossState::Recover => ctx.motor.stop_horizontal(),
            BossState::Death => ctx.motor.stop(),
            BossState::Chase => {}
        }
        None
    }
}

#[derive(Component, Debug, Default)]
pub struct BossBrain {
    pub machine: StateMachine<BossState>,
    pub attack_cooldown: Cooldown,
}

impl BossBrain {
    pub fn new(attack_cooldown: f32) -> Self {
        Self {
            machine: StateMachine::new(),
            attack_cooldown: Cooldown::new(attack_cooldown),
        }
    }
}

impl Striker for BossBrain {
    fn active_window(&mut self) -> Option<&mut AttackWindow<Entity>> {
        match self.machine.current_mut() {
            Some(BossState::Attack {
                window: Some(window),
                ..
            }) => Some(window),
            _ => None,
        }
    }
}

pub(crate) fn begin_boss_frames(mut query: Query<&mut BossBrain>) {
    for mut brain in &mut query {
        brain.machine.begin_frame();
    }
}

pub(crate) fn drive_bosses(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<BossTuning>,
    library: Res<AnimationLibrary>,
    mut rng: ResMut<AiRng>,
    players: Query<(&Transform, &CharacterStats), With<Player>>,
    mut bosses: Query<
        (
            Entity,
            &Transform,
            &CharacterStats,
            &StatusEffects,
            &mut BossBrain,
            &mut LinearVelocity,
            &mut MovementState,
            &mut AnimationDriver,
        ),
        (With<Boss>, Without<Player>),
    >,
) {
    let now = time.elapsed_secs();
    let dt = time.delta_secs();
    let target = living_player(&players);

    for (entity, transform, stats, effects, mut brain, mut velocity, mut movement, mut animation) in
        &mut bosses
    {
        let BossBrain {
            machine,
            attack_cooldown,
        } = &mut *brain;
        let mut motor = Motor::read(&velocity, &movement);
        let mut ctx = BossContext {
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
            machine.initialize(BossState::Chase, &mut ctx);
        }
        if stats.is_dead() && !machine.is_in_terminal_state() {
            machine.change_state(BossState::Death, &mut ctx);
        }

        if effects.is_stunned(now) && !machine.is_in_terminal_state() {
            ctx.motor.stop_horizontal();
        } else {
            machine.run_frame(&mut ctx, dt);
        }

        let finished = ctx.finished;
        motor.write(&mut velocity, &mut movement);

        if finished {
            info!("Boss {:?} defeated", entity);
            commands.entity(entity).despawn();
        }
    }
}

pub(crate) fn drive_boss_physics(
    time: Res<Time>,
    tuning: Res<BossTuning>,
    library: Res<AnimationLibrary>,
    players: Query<(&Transform, &CharacterStats), With<Player>>,
    mut bosses: Query<
        (
            &Transform,
            &CharacterStats,
            &mut BossBrain,
            &mut LinearVelocity,
            &mut MovementState,
            &mut AnimationDriver,
        ),
        (With<Boss>, Without<Player>),
    >,
) {
    let now = time.elapsed_secs();
    let dt = time.delta_secs();
    let target = living_player(&players);

    for (transform, stats, mut brain, mut velocity, mut movement, mut animation) in &mut bosses {
        let BossBrain {
            machine,
            attack_cooldown,
        } = &mut *brain;
        let mut motor = Motor::read(&velocity, &movement);
        let mut ctx = BossContext {
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
