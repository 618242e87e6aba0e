//! Data definitions for the RON tuning file.
//!
//! `GameTuning` mirrors assets/data/tuning.ron. Every section falls back to
//! the in-code defaults when omitted, so a file only needs the values it
//! overrides.

use serde::{Deserialize, Serialize};

use crate::animation::{AnimationLibrary, ClipDef};
use crate::combat::{AttackTuning, BossTuning, CombatTuning, EnemyTuning};
use crate::movement::MovementTuning;
use crate::stats::StatsTuning;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GameTuning {
    pub schema_version: u32,
    pub movement: MovementTuning,
    pub attacks: AttackTuning,
    pub stats: StatsTuning,
    pub combat: CombatTuning,
    pub enemy: EnemyTuning,
    pub boss: BossTuning,
    pub animations: Vec<ClipDef>,
}

impl Default for GameTuning {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            movement: MovementTuning::default(),
            attacks: AttackTuning::default(),
            stats: StatsTuning::default(),
            combat: CombatTuning::default(),
            enemy: EnemyTuning::default(),
            boss: BossTuning::default(),
            animations: AnimationLibrary::default_clips(),
        }
    }
}

impl GameTuning {
    pub fn library(&self) -> AnimationLibrary {
        AnimationLibrary::from_clips(self.animations.iter().cloned())
    }

    /// One-line summary for the startup log.
    pub fn summary(&self) -> String {
        format!(
            "schema v{}, {} clips, {} combo tiers ({} unlocked), {} skills, {} boss attacks, jump height {:.0}",
            self.schema_version,
            self.animations.len(),
            self.attacks.combo.len(),
            self.attacks.unlocked_tiers,
            self.attacks.skills.len(),
            self.boss.attacks.len(),
            self.movement.jump_height(),
        )
    }
}
