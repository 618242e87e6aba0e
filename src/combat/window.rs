//! Combat domain: per-swing attack windows and facing-aware hit zones.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

use crate::combat::StatusEffect;
use crate::movement::Facing;

/// Rectangle in the attacker's local space, authored facing right.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct HitZone {
    pub offset: [f32; 2],
    pub size: [f32; 2],
}

impl HitZone {
    pub fn new(offset: Vec2, size: Vec2) -> Self {
        Self {
            offset: offset.to_array(),
            size: size.to_array(),
        }
    }

    /// Local offset with x mirrored when facing left.
    pub fn local_offset(&self, facing: Facing) -> Vec2 {
        Vec2::new(self.offset[0] * facing.sign(), self.offset[1])
    }

    pub fn world_center(&self, origin: Vec2, facing: Facing) -> Vec2 {
        origin + self.local_offset(facing)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::from_array(self.size)
    }

    pub fn is_valid(&self) -> bool {
        self.size[0] > 0.0 && self.size[1] > 0.0
    }
}

/// Hit detection and de-duplication scope of one swing.
///
/// Opened disarmed when an attack state is entered and dropped with it. The
/// strike keyframe arms it. While armed, each target is damaged at most once.
/// Only the resolver calls [`AttackWindow::register_hit`].
#[derive(Debug, Clone)]
pub struct AttackWindow<T> {
    strike: u8,
    damage: f32,
    zone: HitZone,
    effect: Option<StatusEffect>,
    armed: bool,
    single_pass: bool,
    already_hit: HashSet<T>,
}

impl<T: Copy + Eq + Hash> AttackWindow<T> {
    pub fn open(strike: u8, damage: f32, zone: HitZone) -> Self {
        Self {
            strike,
            damage,
            zone,
            effect: None,
            armed: false,
            single_pass: false,
            already_hit: HashSet::new(),
        }
    }

    pub fn with_effect(mut self, effect: Option<StatusEffect>) -> Self {
        self.effect = effect;
        self
    }

    /// Resolve exactly once after arming, then disarm.
    pub fn single_pass(mut self) -> Self {
        self.single_pass = true;
        self
    }

    pub fn arm(&mut self) {
        self.armed = true;
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }

    /// Damage to apply to `target`, or `None` when disarmed or already hit.
    pub fn register_hit(&mut self, target: T) -> Option<f32> {
        if !self.armed {
            return None;
        }
        self.already_hit.insert(target).then_some(self.damage)
    }

    /// Called by the resolver after each overlap pass.
    pub fn finish_pass(&mut self) {
        if self.single_pass {
            self.armed = false;
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn strike(&self) -> u8 {
        self.strike
    }

    pub fn damage(&self) -> f32 {
        self.damage
    }

    pub fn zone(&self) -> &HitZone {
        &self.zone
    }

    pub fn effect(&self) -> Option<StatusEffect> {
        self.effect
    }

    #[cfg(test)]
    pub fn hit_count(&self) -> usize {
        self.already_hit.len()
    }

    #[cfg(test)]
    pub fn has_hit(&self, target: &T) -> bool {
        self.already_hit.contains(target)
    }
}

/// Brains that may carry an open attack window in their current state.
pub trait Striker {
    fn active_window(&mut self) -> Option<&mut AttackWindow<Entity>>;
}
