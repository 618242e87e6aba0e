//! Combat domain: timed status effects carried by damaged actors.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::timing::{Deadline, RepeatingTask};

/// Extra effect a strike applies on hit.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub enum StatusEffect {
    /// Freezes input or AI processing. Lands only on grounded targets.
    Stun { duration: f32 },
    /// Damage over time, first tick immediately.
    Burn {
        damage: f32,
        interval: f32,
        duration: f32,
    },
}

#[derive(Debug, Clone, Copy)]
struct Burn {
    source: Entity,
    damage: f32,
    task: RepeatingTask,
}

/// Active stun and burn on an actor. A new effect of the same kind replaces
/// the old one; nothing stacks.
#[derive(Component, Debug, Default)]
pub struct StatusEffects {
    stun: Option<Deadline>,
    burn: Option<Burn>,
}

impl StatusEffects {
    pub fn stun(&mut self, now: f32, duration: f32) {
        self.stun = Some(Deadline::after(now, duration));
    }

    pub fn is_stunned(&self, now: f32) -> bool {
        self.stun.is_some_and(|deadline| !deadline.is_due(now))
    }

    pub fn burn(&mut self, source: Entity, now: f32, damage: f32, interval: f32, duration: f32) {
        self.burn = Some(Burn {
            source,
            damage,
            task: RepeatingTask::new(now, interval, duration),
        });
    }

    pub fn is_burning(&self) -> bool {
        self.burn.is_some()
    }

    /// Damage due from the burn since the last poll, with its source.
    pub fn poll_burn(&mut self, now: f32) -> Option<(Entity, f32)> {
        let burn = self.burn.as_mut()?;
        let fired = burn.task.poll(now);
        let due = (burn.source, burn.damage * fired as f32);
        if burn.task.is_finished() {
            self.burn = None;
        }
        (fired > 0).then_some(due)
    }

    pub fn apply(&mut self, effect: StatusEffect, source: Entity, now: f32) {
        match effect {
            StatusEffect::Stun { duration } => self.stun(now, duration),
            StatusEffect::Burn {
                damage,
                interval,
                duration,
            } => self.burn(source, now, damage, interval, duration),
        }
    }

    /// Drops expired effects. Returns `true` when a stun just ended.
    pub fn expire(&mut self, now: f32) -> bool {
        match self.stun {
            Some(deadline) if deadline.is_due(now) => {
                self.stun = None;
                true
            }
            _ => false,
        }
    }

    /// Cancels everything, used on death.
    pub fn clear(&mut self) {
        self.stun = None;
        self.burn = None;
    }
}
