//! Stats domain: health, mana and ultimate pools.

use bevy::prelude::*;

use crate::stats::StatsTuning;

/// Result of a single damage application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Target was dead or immune; nothing changed
    Ignored,
    Hurt,
    /// This hit brought health to zero. Reported once per life.
    Killed,
}

/// Resource pools of an actor, each clamped to `[0, max]`.
///
/// Death is one-way: once health reaches zero the actor stays dead until
/// [`CharacterStats::revive`].
#[derive(Component, Debug, Clone, PartialEq)]
pub struct CharacterStats {
    health: f32,
    pub max_health: f32,
    mana: f32,
    pub max_mana: f32,
    ultimate: f32,
    pub max_ultimate: f32,
    /// Mana per second
    pub mana_regen_rate: f32,
    dead: bool,
}

impl CharacterStats {
    /// Full health and mana, empty ultimate.
    pub fn new(max_health: f32, max_mana: f32, max_ultimate: f32) -> Self {
        Self {
            health: max_health,
            max_health,
            mana: max_mana,
            max_mana,
            ultimate: 0.0,
            max_ultimate,
            mana_regen_rate: 0.0,
            dead: false,
        }
    }

    pub fn from_tuning(tuning: &StatsTuning) -> Self {
        Self {
            mana_regen_rate: tuning.mana_regen_rate,
            ..Self::new(tuning.max_health, tuning.max_mana, tuning.max_ultimate)
        }
    }

    #[cfg(test)]
    pub fn with_health(mut self, health: f32) -> Self {
        self.health = health.clamp(0.0, self.max_health);
        self.dead = self.health <= 0.0;
        self
    }

    // HEALTH -------------------------------------------------------------

    pub fn take_damage(&mut self, amount: f32, immune: bool) -> DamageOutcome {
        if self.dead || immune {
            return DamageOutcome::Ignored;
        }

        self.health = (self.health - amount.max(0.0)).max(0.0);
        if self.health <= 0.0 {
            self.dead = true;
            DamageOutcome::Killed
        } else {
            DamageOutcome::Hurt
        }
    }

    /// Restores health up to max. Returns the amount actually healed.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if self.dead {
            return 0.0;
        }
        let actual = amount.max(0.0).min(self.max_health - self.health);
        self.health += actual;
        actual
    }

    /// Starts a new life with full health and mana and an empty ultimate.
    pub fn revive(&mut self) {
        self.health = self.max_health;
        self.mana = self.max_mana;
        self.ultimate = 0.0;
        self.dead = false;
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn health_percentage(&self) -> f32 {
        self.normalized_health() * 100.0
    }

    pub fn normalized_health(&self) -> f32 {
        ratio(self.health, self.max_health)
    }

    // MANA ---------------------------------------------------------------

    pub fn use_mana(&mut self, amount: f32) {
        self.mana = (self.mana - amount).clamp(0.0, self.max_mana);
    }

    /// Spends `cost` only when the pool covers it.
    pub fn try_spend_mana(&mut self, cost: f32) -> bool {
        if self.mana < cost {
            return false;
        }
        self.use_mana(cost);
        true
    }

    pub fn regenerate_mana(&mut self, amount: f32) {
        self.mana = (self.mana + amount).clamp(0.0, self.max_mana);
    }

    pub fn mana(&self) -> f32 {
        self.mana
    }

    pub fn normalized_mana(&self) -> f32 {
        ratio(self.mana, self.max_mana)
    }

    // ULTIMATE -----------------------------------------------------------

    pub fn add_ultimate(&mut self, amount: f32) {
        self.ultimate = (self.ultimate + amount).clamp(0.0, self.max_ultimate);
    }

    pub fn reset_ultimate(&mut self) {
        self.ultimate = 0.0;
    }

    pub fn is_ultimate_full(&self) -> bool {
        self.ultimate >= self.max_ultimate
    }

    pub fn ultimate(&self) -> f32 {
        self.ultimate
    }

    pub fn ultimate_percentage(&self) -> f32 {
        self.normalized_ultimate() * 100.0
    }

    pub fn normalized_ultimate(&self) -> f32 {
        ratio(self.ultimate, self.max_ultimate)
    }
}

impl Default for CharacterStats {
    fn default() -> Self {
        Self::from_tuning(&StatsTuning::default())
    }
}

fn ratio(value: f32, max: f32) -> f32 {
    if max > 0.0 { value / max } else { 0.0 }
}

/// Damage immunity, kept in sync by the owning state machine (dash/roll).
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Invulnerable(pub bool);
