//! Player domain: the player's action states.
//!
//! Neutral states (Idle, Move, Jump, Fall) read input and arbitrate which
//! action starts. Action states (Dash, Attack, AirAttack) own their timing and
//! hand control back through [`PlayerContext::settle`]. TakeHit and Death are
//! entered from damage outcomes by the frame driver, never from input.

use bevy::prelude::*;

use crate::animation::AnimationSignal;
use crate::combat::{AttackTuning, AttackWindow, StrikeDef};
use crate::fsm::{State, StateKind};
use crate::player::PlayerContext;
use crate::stats::DamageOutcome;
use crate::timing::Countdown;

/// Which authored strike an Attack state plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrikeRef {
    /// Grounded combo tier, zero-based
    Combo(u8),
    /// Mana strike slot, zero-based
    Skill(u8),
    Ultimate,
}

impl StrikeRef {
    pub fn def(self, attacks: &AttackTuning) -> Option<&StrikeDef> {
        match self {
            StrikeRef::Combo(index) => attacks.combo.get(index as usize),
            StrikeRef::Skill(slot) => attacks.skills.get(slot as usize),
            StrikeRef::Ultimate => Some(&attacks.ultimate),
        }
    }

    pub fn index(self) -> u8 {
        match self {
            StrikeRef::Combo(index) | StrikeRef::Skill(index) => index,
            StrikeRef::Ultimate => 0,
        }
    }

    /// Only combo strikes advance into a next tier.
    pub fn chains(self) -> bool {
        matches!(self, StrikeRef::Combo(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStateId {
    Idle,
    Move,
    Jump,
    Fall,
    Dash,
    /// Each strike is its own identity so a combo can re-enter Attack
    Attack(StrikeRef),
    AirAttack,
    TakeHit,
    Death,
}

#[derive(Debug)]
pub enum PlayerState {
    Idle,
    Move,
    Jump,
    Fall,
    Dash,
    Attack {
        strike: StrikeRef,
        /// `None` when the strike has no clip or zone
        window: Option<AttackWindow<Entity>>,
        /// Set by the queue keyframe
        can_queue: bool,
    },
    AirAttack {
        window: Option<AttackWindow<Entity>>,
        freeze: Countdown,
    },
    TakeHit {
        /// Set on entry when the hurt clip is missing
        recovered: bool,
    },
    Death {
        requested: bool,
    },
}

impl PlayerState {
    pub fn attack(strike: StrikeRef) -> Self {
        PlayerState::Attack {
            strike,
            window: None,
            can_queue: false,
        }
    }

    pub fn air_attack() -> Self {
        PlayerState::AirAttack {
            window: None,
            freeze: Countdown::default(),
        }
    }

    pub fn take_hit() -> Self {
        PlayerState::TakeHit { recovered: false }
    }

    pub fn death() -> Self {
        PlayerState::Death { requested: false }
    }

    /// The state a damage outcome forces.
    pub fn for_damage(outcome: DamageOutcome) -> Option<Self> {
        match outcome {
            DamageOutcome::Ignored => None,
            DamageOutcome::Hurt => Some(PlayerState::take_hit()),
            DamageOutcome::Killed => Some(PlayerState::death()),
        }
    }

    /// Rolls and the ultimate ignore incoming damage.
    pub fn is_damage_immune(&self) -> bool {
        matches!(
            self,
            PlayerState::Dash
                | PlayerState::Attack {
                    strike: StrikeRef::Ultimate,
                    ..
                }
        )
    }

    /// A roll passes through enemy bodies.
    pub fn passes_through_enemies(&self) -> bool {
        matches!(self, PlayerState::Dash)
    }
}

impl StateKind for PlayerState {
    type Id = PlayerStateId;

    fn id(&self) -> PlayerStateId {
        match self {
            PlayerState::Idle => PlayerStateId::Idle,
            PlayerState::Move => PlayerStateId::Move,
            PlayerState::Jump => PlayerStateId::Jump,
            PlayerState::Fall => PlayerStateId::Fall,
            PlayerState::Dash => PlayerStateId::Dash,
            PlayerState::Attack { strike, .. } => PlayerStateId::Attack(*strike),
            PlayerState::AirAttack { .. } => PlayerStateId::AirAttack,
            PlayerState::TakeHit { .. } => PlayerStateId::TakeHit,
            PlayerState::Death { .. } => PlayerStateId::Death,
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, PlayerState::Death { .. })
    }

    fn name(&self) -> &'static str {
        match self {
            PlayerState::Idle => "idle",
            PlayerState::Move => "move",
            PlayerState::Jump => "jump",
            PlayerState::Fall => "fall",
            PlayerState::Dash => "dash",
            PlayerState::Attack { .. } => "attack",
            PlayerState::AirAttack { .. } => "air_attack",
            PlayerState::TakeHit { .. } => "take_hit",
            PlayerState::Death { .. } => "death",
        }
    }
}

// ---- Guarded actions ----

/// Jump now when grounded or inside coyote time, otherwise buffer the press.
fn try_jump(ctx: &mut PlayerContext) -> Option<PlayerState> {
    if ctx.assist.can_jump(ctx.motor.grounded, ctx.movement.coyote_time) {
        return Some(PlayerState::Jump);
    }
    ctx.assist.buffer_jump(ctx.movement.jump_buffer_time);
    debug!(
        "Jump buffered for {:.2}s ({:.2}s since grounded)",
        ctx.movement.jump_buffer_time,
        ctx.assist.since_grounded()
    );
    None
}

fn try_dash(ctx: &mut PlayerContext) -> Option<PlayerState> {
    if ctx.movement.ground_only_dash && !ctx.motor.grounded {
        debug!("Dash rejected: airborne");
        return None;
    }
    if !ctx.dash_cooldown.ready(ctx.now) {
        debug!(
            "Dash rejected: cooldown {:.2}s left",
            ctx.dash_cooldown.remaining(ctx.now)
        );
        return None;
    }
    Some(PlayerState::Dash)
}

/// Starts `strike` when the strike cooldown and its resource allow it. Mana
/// and ultimate are spent here, as the strike fires.
fn try_strike(ctx: &mut PlayerContext, strike: StrikeRef) -> Option<PlayerState> {
    if !ctx.strike_cooldown.ready(ctx.now) {
        debug!(
            "Strike {:?} rejected: cooldown {:.2}s left",
            strike,
            ctx.strike_cooldown.remaining(ctx.now)
        );
        return None;
    }

    match strike {
        StrikeRef::Combo(_) => {}
        StrikeRef::Skill(_) => {
            let attacks = ctx.attacks;
            let cost = strike.def(attacks)?.mana_cost;
            if !ctx.stats.try_spend_mana(cost) {
                debug!(
                    "Strike {:?} rejected: needs {} mana, has {}",
                    strike,
                    cost,
                    ctx.stats.mana()
                );
                return None;
            }
        }
        StrikeRef::Ultimate => {
            if !ctx.stats.is_ultimate_full() {
                debug!(
                    "Ultimate rejected: charge at {:.0}%",
                    ctx.stats.ultimate_percentage()
                );
                return None;
            }
            ctx.stats.reset_ultimate();
        }
    }
    Some(PlayerState::attack(strike))
}

/// Presses honoured by Idle and Move, in priority order.
fn grounded_actions(ctx: &mut PlayerContext) -> Option<PlayerState> {
    let input = ctx.input;

    if input.attack_pressed
        && let Some(next) = try_strike(ctx, StrikeRef::Combo(0))
    {
        return Some(next);
    }
    if input.skill_1_pressed
        && let Some(next) = try_strike(ctx, StrikeRef::Skill(0))
    {
        return Some(next);
    }
    if input.skill_2_pressed
        && let Some(next) = try_strike(ctx, StrikeRef::Skill(1))
    {
        return Some(next);
    }
    if input.ultimate_pressed
        && let Some(next) = try_strike(ctx, StrikeRef::Ultimate)
    {
        return Some(next);
    }
    if input.jump_pressed
        && let Some(next) = try_jump(ctx)
    {
        return Some(next);
    }
    if input.dash_pressed {
        return try_dash(ctx);
    }
    None
}

/// Presses honoured by Jump and Fall.
fn airborne_actions(ctx: &mut PlayerContext) -> Option<PlayerState> {
    let input = ctx.input;

    if input.attack_pressed && ctx.assist.can_air_attack() {
        return Some(PlayerState::air_attack());
    }
    if input.jump_pressed
        && let Some(next) = try_jump(ctx)
    {
        return Some(next);
    }
    if input.dash_pressed {
        return try_dash(ctx);
    }
    None
}

// ---- Hooks ----

impl<'a> State<PlayerContext<'a>> for PlayerState {
    fn enter(&mut self, ctx: &mut PlayerContext<'a>) {
        match self {
            PlayerState::Idle => {
                ctx.motor.stop_horizontal();
                ctx.play("idle");
            }
            PlayerState::Move => {
                ctx.play("run");
            }
            PlayerState::Jump => ctx.launch(),
            PlayerState::Fall => {
                ctx.play("fall");
            }
            PlayerState::Dash => {
                ctx.dash_cooldown.trigger(ctx.now);
                ctx.motor.velocity =
                    Vec2::new(ctx.motor.facing.sign() * ctx.movement.dash_speed, 0.0);
                ctx.play("dash");
            }
            PlayerState::Attack {
                strike,
                window,
                can_queue,
            } => {
                ctx.strike_cooldown.trigger(ctx.now);
                ctx.motor.stop_horizontal();
                *can_queue = false;

                let attacks = ctx.attacks;
                match strike.def(attacks) {
                    Some(def) if def.zone.is_valid() && ctx.play(&def.animation) => {
                        *window = Some(
                            AttackWindow::open(strike.index(), def.damage, def.zone)
                                .with_effect(def.effect),
                        );
                    }
                    _ => debug!("Strike {:?} has no playable clip or zone", strike),
                }
            }
            PlayerState::AirAttack { window, freeze } => {
                ctx.motor.stop();
                ctx.assist.spend_air_attack();
                freeze.start(ctx.attacks.air_attack_freeze);

                let attacks = ctx.attacks;
                let def = &attacks.air;
                if def.zone.is_valid() && ctx.play(&def.animation) {
                    *window = Some(
                        AttackWindow::open(0, def.damage, def.zone).with_effect(def.effect),
                    );
                }
            }
            PlayerState::TakeHit { recovered } => {
                ctx.motor.stop_horizontal();
                *recovered = !ctx.play("hurt");
            }
            PlayerState::Death { requested } => {
                ctx.motor.stop();
                if !ctx.play("death") {
                    *requested = true;
                    ctx.respawn_requested = true;
                }
            }
        }
    }

    fn exit(&mut self, ctx: &mut PlayerContext<'a>) {
        if let PlayerState::Dash = self {
            ctx.motor.stop_horizontal();
        }
    }

    fn handle_input(&mut self, ctx: &mut PlayerContext<'a>) -> Option<Self> {
        match self {
            PlayerState::Idle => {
                if let Some(next) = grounded_actions(ctx) {
                    return Some(next);
                }
                (ctx.axis_x() != 0.0).then_some(PlayerState::Move)
            }
            PlayerState::Move => {
                if let Some(next) = grounded_actions(ctx) {
                    return Some(next);
                }
                (ctx.axis_x() == 0.0).then_some(PlayerState::Idle)
            }
            PlayerState::Jump | PlayerState::Fall => airborne_actions(ctx),
            PlayerState::Dash => {
                if !ctx.movement.dash_cancellable {
                    return None;
                }
                let input = ctx.input;
                if input.jump_pressed
                    && ctx.assist.can_jump(ctx.motor.grounded, ctx.movement.coyote_time)
                {
                    return Some(PlayerState::Jump);
                }
                if input.attack_pressed {
                    return if ctx.motor.grounded {
                        try_strike(ctx, StrikeRef::Combo(0))
                    } else {
                        ctx.assist.can_air_attack().then(PlayerState::air_attack)
                    };
                }
                None
            }
            PlayerState::Attack { .. }
            | PlayerState::AirAttack { .. }
            | PlayerState::TakeHit { .. }
            | PlayerState::Death { .. } => None,
        }
    }

    fn logic_update(&mut self, ctx: &mut PlayerContext<'a>, elapsed: f32) -> Option<Self> {
        let signals = ctx.animation.take_signals();
        let ended = signals.contains(&AnimationSignal::Ended);

        match self {
            PlayerState::Idle
            | PlayerState::Move
            | PlayerState::Jump
            | PlayerState::Fall
            | PlayerState::Dash => None,
            PlayerState::Attack {
                strike,
                window,
                can_queue,
            } => {
                let Some(window) = window else {
                    return Some(ctx.settle());
                };
                for signal in &signals {
                    match signal {
                        AnimationSignal::Strike => window.arm(),
                        AnimationSignal::QueuePoint => *can_queue = true,
                        AnimationSignal::Ended => {}
                    }
                }

                if strike.chains() {
                    let next = strike.index() + 1;
                    let in_time = elapsed <= ctx.attacks.combo_reset_time;
                    let held = ctx.input.attack_held || ctx.input.attack_pressed;
                    if *can_queue
                        && held
                        && next < ctx.unlocked_tiers
                        && next <= ctx.attacks.max_combo_index()
                        && in_time
                    {
                        debug!("Combo advances to tier {}", next + 1);
                        return Some(PlayerState::attack(StrikeRef::Combo(next)));
                    }
                    if !in_time {
                        return Some(ctx.settle());
                    }
                }
                ended.then(|| ctx.settle())
            }
            PlayerState::AirAttack { window, .. } => {
                let Some(window) = window else {
                    return Some(ctx.settle());
                };
                if signals.contains(&AnimationSignal::Strike) {
                    window.arm();
                }
                ended.then(|| ctx.settle())
            }
            PlayerState::TakeHit { recovered } => {
                if !(*recovered || ended) {
                    return None;
                }
                if ctx.stats.is_dead() {
                    Some(PlayerState::death())
                } else {
                    Some(ctx.settle())
                }
            }
            PlayerState::Death { requested } => {
                if ended && !*requested {
                    *requested = true;
                    ctx.respawn_requested = true;
                }
                None
            }
        }
    }

    fn physics_update(
        &mut self,
        ctx: &mut PlayerContext<'a>,
        elapsed: f32,
        dt: f32,
    ) -> Option<Self> {
        match self {
            PlayerState::Idle => {
                ctx.motor.stop_horizontal();
                (!ctx.motor.grounded).then_some(PlayerState::Fall)
            }
            PlayerState::Move => {
                ctx.motor.velocity.x = ctx.axis_x() * ctx.movement.move_speed;
                ctx.face_input();
                (!ctx.motor.grounded).then_some(PlayerState::Fall)
            }
            PlayerState::Jump => {
                ctx.steer_air();
                let vy = ctx.motor.velocity.y;
                if vy < 0.0 {
                    Some(PlayerState::Fall)
                } else if ctx.motor.grounded && vy <= 0.0 {
                    if ctx.assist.take_buffered_jump() {
                        // Re-entering Jump is a no-op, so relaunch in place
                        ctx.launch();
                        None
                    } else {
                        Some(PlayerState::Idle)
                    }
                } else {
                    None
                }
            }
            PlayerState::Fall => {
                if ctx.motor.grounded {
                    return Some(if ctx.assist.take_buffered_jump() {
                        PlayerState::Jump
                    } else {
                        PlayerState::Idle
                    });
                }

                let movement = ctx.movement;
                let fast = ctx.input.fast_fall_held;
                if fast {
                    ctx.motor.velocity.y -=
                        movement.gravity * (movement.fast_fall_multiplier - 1.0) * dt;
                }
                let cap = if fast {
                    movement.max_fast_fall_speed
                } else {
                    movement.max_fall_speed
                };
                ctx.motor.velocity.y = ctx.motor.velocity.y.max(-cap);
                ctx.steer_air();
                None
            }
            PlayerState::Dash => {
                if elapsed >= ctx.movement.dash_time {
                    return Some(ctx.settle());
                }
                ctx.motor.velocity =
                    Vec2::new(ctx.motor.facing.sign() * ctx.movement.dash_speed, 0.0);
                None
            }
            PlayerState::Attack { .. } | PlayerState::TakeHit { .. } => {
                ctx.motor.stop_horizontal();
                None
            }
            PlayerState::AirAttack { freeze, .. } => {
                if freeze.is_active() {
                    freeze.tick(dt);
                    ctx.motor.stop();
                } else {
                    ctx.steer_air();
                }
                None
            }
            PlayerState::Death { .. } => {
                ctx.motor.stop();
                None
            }
        }
    }
}
