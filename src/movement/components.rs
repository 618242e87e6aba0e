//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::timing::Countdown;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Player character
    Player,
    /// Enemy characters
    Enemy,
    /// Sensors (checkpoints, kill zones) - should not block movement
    Sensor,
}

#[derive(Component, Debug)]
pub struct Player;

/// Physics-derived locomotion facts shared by every actor.
#[derive(Component, Debug, Default)]
pub struct MovementState {
    pub on_ground: bool,
    pub facing: Facing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// +1 for right, -1 for left.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    /// Facing that matches the sign of `x`, or `None` inside the deadzone.
    pub fn from_axis(x: f32, deadzone: f32) -> Option<Facing> {
        if x > deadzone {
            Some(Facing::Right)
        } else if x < -deadzone {
            Some(Facing::Left)
        } else {
            None
        }
    }

    /// Facing from `from` towards `to` on the x axis. Keeps `self` when aligned.
    pub fn towards(self, from: f32, to: f32) -> Facing {
        if to > from {
            Facing::Right
        } else if to < from {
            Facing::Left
        } else {
            self
        }
    }
}

/// Velocity, grounded flag and facing handed to a state machine hook, then
/// written back to the physics body.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Motor {
    pub velocity: Vec2,
    pub grounded: bool,
    pub facing: Facing,
}

impl Motor {
    pub fn read(velocity: &LinearVelocity, state: &MovementState) -> Self {
        Self {
            velocity: velocity.0,
            grounded: state.on_ground,
            facing: state.facing,
        }
    }

    pub fn write(&self, velocity: &mut LinearVelocity, state: &mut MovementState) {
        if velocity.0 != self.velocity {
            velocity.0 = self.velocity;
        }
        if state.facing != self.facing {
            state.facing = self.facing;
        }
    }

    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
    }

    pub fn stop_horizontal(&mut self) {
        self.velocity.x = 0.0;
    }

    /// Turns towards `target_x` from `x`.
    pub fn face_towards(&mut self, x: f32, target_x: f32) {
        self.facing = self.facing.towards(x, target_x);
    }
}

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Coyote time, jump buffering and the per-airtime air attack.
///
/// Ticked once per frame from the grounded flag. A jump is allowed airborne
/// while `since_grounded <= coyote_time` unless a jump already spent it. An
/// airborne press that cannot jump is buffered and consumed on landing. One
/// air attack is allowed between landings.
#[derive(Component, Debug, Clone, Default)]
pub struct JumpAssist {
    since_grounded: f32,
    coyote_spent: bool,
    air_attack_spent: bool,
    buffer: Countdown,
}

impl JumpAssist {
    pub fn tick(&mut self, dt: f32, grounded: bool) {
        if grounded {
            self.since_grounded = 0.0;
            self.coyote_spent = false;
            self.air_attack_spent = false;
        } else {
            self.since_grounded += dt;
        }
        self.buffer.tick(dt);
    }

    /// Grounded, or airborne within an unspent coyote window.
    pub fn can_jump(&self, grounded: bool, coyote_time: f32) -> bool {
        grounded || (!self.coyote_spent && self.since_grounded <= coyote_time)
    }

    pub fn buffer_jump(&mut self, window: f32) {
        self.buffer.start(window);
    }

    pub fn has_buffered_jump(&self) -> bool {
        self.buffer.is_active()
    }

    /// Consumes a live buffered press.
    pub fn take_buffered_jump(&mut self) -> bool {
        let live = self.buffer.is_active();
        self.buffer.clear();
        live
    }

    /// Spends coyote time and any buffered press.
    pub fn mark_jumped(&mut self) {
        self.coyote_spent = true;
        self.buffer.clear();
    }

    pub fn can_air_attack(&self) -> bool {
        !self.air_attack_spent
    }

    pub fn spend_air_attack(&mut self) {
        self.air_attack_spent = true;
    }

    pub fn since_grounded(&self) -> f32 {
        self.since_grounded
    }

    /// Forgets all assist state, used when teleporting.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
