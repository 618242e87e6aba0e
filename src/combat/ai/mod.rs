//! Combat domain: enemy and boss state machines.
//!
//! Both run on the same [`crate::fsm::StateMachine`] as the player, against an
//! [`AiContext`] built fresh for every hook call by their driver systems.

pub(crate) mod boss;
pub(crate) mod enemy;

pub use boss::{Boss, BossBrain, BossState};
pub use enemy::{Enemy, EnemyBrain, EnemyState};

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::animation::{AnimationDriver, AnimationLibrary};
use crate::movement::Motor;
use crate::timing::Cooldown;

/// Seeded source for AI decisions.
#[derive(Resource, Debug, Clone)]
pub struct AiRng(pub ChaCha8Rng);

impl AiRng {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Default for AiRng {
    fn default() -> Self {
        Self::seeded(0)
    }
}

/// What an AI state hook sees and may change.
pub struct AiContext<'a, T> {
    pub motor: &'a mut Motor,
    pub position: Vec2,
    /// Position of the living player, if any
    pub target: Option<Vec2>,
    pub animation: &'a mut AnimationDriver,
    pub library: &'a AnimationLibrary,
    pub attack_cooldown: &'a mut Cooldown,
    pub tuning: &'a T,
    pub health_pct: f32,
    pub now: f32,
    /// Uniform draw in `[0, 1)` for this frame's decisions
    pub roll: f32,
    /// Set once the death sequence completes; the driver despawns the actor
    pub finished: bool,
}

impl<T> AiContext<'_, T> {
    pub fn distance_to_target(&self) -> Option<f32> {
        self.target.map(|target| self.position.distance(target))
    }

    pub fn horizontal_distance_to_target(&self) -> Option<f32> {
        self.target.map(|target| (target.x - self.position.x).abs())
    }

    /// Walks horizontally towards the target at `speed`, turning to face it.
    pub fn approach_target(&mut self, speed: f32) {
        let Some(target) = self.target else {
            self.motor.stop_horizontal();
            return;
        };
        let dx = target.x - self.position.x;
        self.motor.velocity.x = dx.signum() * speed;
        if dx == 0.0 {
            self.motor.velocity.x = 0.0;
        }
        self.motor.face_towards(self.position.x, target.x);
    }

    pub fn face_target(&mut self) {
        if let Some(target) = self.target {
            self.motor.face_towards(self.position.x, target.x);
        }
    }

    /// Plays `clip`, returning `false` when the library lacks it.
    pub fn play(&mut self, clip: &str) -> bool {
        self.animation.play(self.library, clip)
    }
}
