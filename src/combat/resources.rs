//! Combat domain: strike tables and combat tuning.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::{HitZone, StatusEffect};

/// One authored strike: clip, damage, zone and optional costs/effects.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StrikeDef {
    pub animation: String,
    pub damage: f32,
    pub zone: HitZone,
    #[serde(default)]
    pub mana_cost: f32,
    #[serde(default)]
    pub effect: Option<StatusEffect>,
}

impl StrikeDef {
    pub fn new(animation: &str, damage: f32, zone: HitZone) -> Self {
        Self {
            animation: animation.to_string(),
            damage,
            zone,
            mana_cost: 0.0,
            effect: None,
        }
    }

    pub fn with_mana_cost(mut self, cost: f32) -> Self {
        self.mana_cost = cost;
        self
    }

    pub fn with_effect(mut self, effect: StatusEffect) -> Self {
        self.effect = Some(effect);
        self
    }
}

/// Player strike table.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AttackTuning {
    /// Grounded combo chain, damage non-decreasing by index
    pub combo: Vec<StrikeDef>,
    /// Mana strikes on skill 1 / skill 2
    pub skills: Vec<StrikeDef>,
    /// Costs a full ultimate pool
    pub ultimate: StrikeDef,
    pub air: StrikeDef,
    /// Minimum time between starting strikes outside a combo chain
    pub strike_cooldown: f32,
    /// Combo advance is refused once this long has passed in a strike
    pub combo_reset_time: f32,
    pub air_attack_freeze: f32,
    /// Combo tiers available at spawn (1 = first strike only)
    pub unlocked_tiers: u8,
}

impl AttackTuning {
    /// Combo chain with `damage = base + increment * index`.
    pub fn tiered_combo(base: f32, increment: f32, zone: HitZone, count: u8) -> Vec<StrikeDef> {
        (0..count)
            .map(|index| {
                StrikeDef::new(
                    &format!("attack_{}", index + 1),
                    base + increment * index as f32,
                    zone,
                )
            })
            .collect()
    }

    pub fn max_combo_index(&self) -> u8 {
        self.combo.len().saturating_sub(1) as u8
    }
}

impl Default for AttackTuning {
    fn default() -> Self {
        let melee = HitZone::new(Vec2::new(30.0, 0.0), Vec2::new(40.0, 36.0));
        Self {
            combo: Self::tiered_combo(10.0, 5.0, melee, 3),
            skills: vec![
                StrikeDef::new("skill_1", 30.0, melee).with_mana_cost(25.0),
                StrikeDef::new(
                    "skill_2",
                    50.0,
                    HitZone::new(Vec2::new(40.0, 0.0), Vec2::new(70.0, 40.0)),
                )
                .with_mana_cost(50.0),
            ],
            ultimate: StrikeDef::new(
                "ultimate",
                120.0,
                HitZone::new(Vec2::new(50.0, 10.0), Vec2::new(140.0, 80.0)),
            ),
            air: StrikeDef::new(
                "air_attack",
                12.0,
                HitZone::new(Vec2::new(24.0, -8.0), Vec2::new(40.0, 40.0)),
            ),
            strike_cooldown: 0.5,
            combo_reset_time: 0.8,
            air_attack_freeze: 0.15,
            unlocked_tiers: 3,
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CombatTuning {
    /// Freeze applied to damaged AI actors
    pub hit_stun_duration: f32,
    /// Ultimate charge granted to the player per target hit
    pub ultimate_per_hit: f32,
    /// Health lost when touching a kill zone
    pub kill_zone_damage: f32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            hit_stun_duration: 0.5,
            ultimate_per_hit: 10.0,
            kill_zone_damage: 10.0,
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub max_health: f32,
    pub move_speed: f32,
    pub detection_range: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    pub attack: StrikeDef,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            move_speed: 100.0,
            detection_range: 300.0,
            attack_range: 48.0,
            attack_cooldown: 1.5,
            attack: StrikeDef::new(
                "enemy_attack",
                10.0,
                HitZone::new(Vec2::new(26.0, 0.0), Vec2::new(36.0, 32.0)),
            ),
        }
    }
}

/// Attack weights that apply while boss health is above `above_health_pct`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BossPhase {
    pub above_health_pct: f32,
    pub weights: Vec<u32>,
}

impl BossPhase {
    pub fn new(above_health_pct: f32, weights: &[u32]) -> Self {
        Self {
            above_health_pct,
            weights: weights.to_vec(),
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BossTuning {
    pub max_health: f32,
    pub move_speed: f32,
    /// Horizontal distance under which the boss commits to an attack
    pub decision_range: f32,
    pub attack_cooldown: f32,
    pub attacks: Vec<StrikeDef>,
    /// Checked in order; the first phase whose threshold is below the
    /// current health wins, the last one is the fallback
    pub phases: Vec<BossPhase>,
    pub seed: u64,
}

impl BossTuning {
    /// Weights of the phase matching `health_pct`.
    pub fn weights_for(&self, health_pct: f32) -> &[u32] {
        self.phases
            .iter()
            .find(|phase| health_pct > phase.above_health_pct)
            .or(self.phases.last())
            .map(|phase| phase.weights.as_slice())
            .unwrap_or(&[])
    }

    /// Weighted pick of an attack index from a uniform `roll` in `[0, 1)`.
    pub fn pick_attack(&self, health_pct: f32, roll: f32) -> Option<usize> {
        let weights = self.weights_for(health_pct);
        let total: u32 = weights.iter().sum();
        if total == 0 {
            return None;
        }

        let mut point = roll.clamp(0.0, 1.0) * total as f32;
        let mut last = None;
        for (index, &weight) in weights.iter().enumerate() {
            if weight == 0 {
                continue;
            }
            if point < weight as f32 {
                return Some(index);
            }
            point -= weight as f32;
            last = Some(index);
        }
        last
    }
}

impl Default for BossTuning {
    fn default() -> Self {
        let zone = |x: f32, w: f32, h: f32| HitZone::new(Vec2::new(x, 0.0), Vec2::new(w, h));
        Self {
            max_health: 1000.0,
            move_speed: 120.0,
            decision_range: 140.0,
            attack_cooldown: 1.5,
            attacks: vec![
                StrikeDef::new("boss_attack_1", 40.0, zone(60.0, 90.0, 60.0)),
                StrikeDef::new("boss_attack_2", 35.0, zone(70.0, 120.0, 50.0)).with_effect(
                    StatusEffect::Burn {
                        damage: 10.0,
                        interval: 1.0,
                        duration: 3.0,
                    },
                ),
                StrikeDef::new("boss_attack_3", 100.0, zone(50.0, 110.0, 70.0))
                    .with_effect(StatusEffect::Stun { duration: 2.0 }),
                StrikeDef::new("boss_attack_4", 300.0, zone(0.0, 260.0, 90.0)),
            ],
            phases: vec![
                BossPhase::new(75.0, &[1, 0, 0, 0]),
                BossPhase::new(50.0, &[1, 1, 1, 1]),
                BossPhase::new(25.0, &[0, 0, 1, 1]),
                BossPhase::new(0.0, &[0, 0, 0, 1]),
            ],
            seed: 0x5eed,
        }
    }
}
