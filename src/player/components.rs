//! Player domain: the brain component and the context its states run against.

use bevy::prelude::*;

use crate::animation::{AnimationDriver, AnimationLibrary};
use crate::combat::{AttackTuning, AttackWindow, Striker};
use crate::fsm::StateMachine;
use crate::movement::{Facing, JumpAssist, Motor, MovementTuning, PlayerInput};
use crate::player::PlayerState;
use crate::stats::CharacterStats;
use crate::timing::Cooldown;

/// Owns the player's state machine and the cooldowns its states guard.
#[derive(Component, Debug, Default)]
pub struct PlayerBrain {
    pub machine: StateMachine<PlayerState>,
    /// Gates starting a strike from a neutral state
    pub strike_cooldown: Cooldown,
    pub dash_cooldown: Cooldown,
    /// Combo tiers the player may chain into
    pub unlocked_tiers: u8,
}

impl PlayerBrain {
    pub fn new(attacks: &AttackTuning, movement: &MovementTuning) -> Self {
        Self {
            machine: StateMachine::new(),
            strike_cooldown: Cooldown::new(attacks.strike_cooldown),
            dash_cooldown: Cooldown::new(movement.dash_cooldown),
            unlocked_tiers: attacks.unlocked_tiers,
        }
    }

    pub fn is_damage_immune(&self) -> bool {
        self.machine
            .current()
            .is_some_and(PlayerState::is_damage_immune)
    }

    pub fn passes_through_enemies(&self) -> bool {
        self.machine
            .current()
            .is_some_and(PlayerState::passes_through_enemies)
    }

    /// Clears the machine and cooldowns for a fresh life.
    pub fn reset(&mut self) {
        self.machine.reset();
        self.strike_cooldown.clear();
        self.dash_cooldown.clear();
    }
}

impl Striker for PlayerBrain {
    fn active_window(&mut self) -> Option<&mut AttackWindow<Entity>> {
        match self.machine.current_mut() {
            Some(PlayerState::Attack {
                window: Some(window),
                ..
            })
            | Some(PlayerState::AirAttack {
                window: Some(window),
                ..
            }) => Some(window),
            _ => None,
        }
    }
}

/// What a player state hook sees and may change.
pub struct PlayerContext<'a> {
    pub motor: &'a mut Motor,
    pub animation: &'a mut AnimationDriver,
    pub library: &'a AnimationLibrary,
    /// Empty snapshot while stunned
    pub input: &'a PlayerInput,
    pub stats: &'a mut CharacterStats,
    pub assist: &'a mut JumpAssist,
    pub strike_cooldown: &'a mut Cooldown,
    pub dash_cooldown: &'a mut Cooldown,
    pub unlocked_tiers: u8,
    pub movement: &'a MovementTuning,
    pub attacks: &'a AttackTuning,
    pub now: f32,
    /// Set by Death once its clip ends; the driver writes the message
    pub respawn_requested: bool,
}

impl PlayerContext<'_> {
    /// Plays `clip`, returning `false` when the library lacks it.
    pub fn play(&mut self, clip: &str) -> bool {
        self.animation.play(self.library, clip)
    }

    /// Horizontal input, zero inside the deadzone.
    pub fn axis_x(&self) -> f32 {
        let x = self.input.axis.x;
        if x.abs() > self.movement.deadzone {
            x
        } else {
            0.0
        }
    }

    /// Turns towards the horizontal input, if any.
    pub fn face_input(&mut self) {
        if let Some(facing) = Facing::from_axis(self.input.axis.x, self.movement.deadzone) {
            self.motor.facing = facing;
        }
    }

    /// Leaves the ground at jump speed, spending coyote time and the buffer.
    pub fn launch(&mut self) {
        self.motor.velocity.y = self.movement.jump_velocity;
        self.assist.mark_jumped();
        self.play("jump");
    }

    /// Horizontal air control from the input axis.
    pub fn steer_air(&mut self) {
        self.motor.velocity.x = self.axis_x() * self.movement.move_speed * self.movement.air_control;
        self.face_input();
    }

    /// Where a finished action hands control back: Idle on the ground, Fall
    /// in the air.
    pub fn settle(&self) -> PlayerState {
        if self.motor.grounded {
            PlayerState::Idle
        } else {
            PlayerState::Fall
        }
    }
}
