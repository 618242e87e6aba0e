//! Validation of a loaded tuning file before any of it reaches the game.

use crate::animation::ClipDef;
use crate::combat::StrikeDef;

use super::data::GameTuning;

/// A validation error with context about what failed.
#[derive(Debug)]
pub struct ValidationError {
    pub section: &'static str,
    pub item: String,
    pub field: &'static str,
    pub problem: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} '{}' has invalid field '{}': {}",
            self.section, self.item, self.field, self.problem
        )
    }
}

/// Helper macro for pushing an error when a condition fails
macro_rules! check {
    ($errors:expr, $cond:expr, $section:expr, $item:expr, $field:expr, $($problem:tt)+) => {
        if !$cond {
            $errors.push(ValidationError {
                section: $section,
                item: $item.to_string(),
                field: $field,
                problem: format!($($problem)+),
            });
        }
    };
}

fn check_strike(
    errors: &mut Vec<ValidationError>,
    section: &'static str,
    strike: &StrikeDef,
    clips: &[ClipDef],
) {
    let name = &strike.animation;
    check!(
        errors,
        clips.iter().any(|clip| &clip.name == name),
        section,
        name,
        "animation",
        "no clip named '{}'",
        name
    );
    check!(
        errors,
        strike.zone.is_valid(),
        section,
        name,
        "zone",
        "size {:?} must be positive",
        strike.zone.size
    );
    check!(
        errors,
        strike.damage >= 0.0,
        section,
        name,
        "damage",
        "{} is negative",
        strike.damage
    );
    check!(
        errors,
        strike.mana_cost >= 0.0,
        section,
        name,
        "mana_cost",
        "{} is negative",
        strike.mana_cost
    );
}

fn check_clip(errors: &mut Vec<ValidationError>, clip: &ClipDef) {
    check!(
        errors,
        clip.duration > 0.0,
        "Clip",
        clip.name,
        "duration",
        "{} must be positive",
        clip.duration
    );
    for (field, point) in [
        ("queue_point", clip.queue_point),
        ("strike_point", clip.strike_point),
    ] {
        if let Some(at) = point {
            check!(
                errors,
                (0.0..=1.0).contains(&at),
                "Clip",
                clip.name,
                field,
                "{} is outside [0, 1]",
                at
            );
        }
    }
}

/// Validate the whole tuning file.
/// Returns a list of validation errors, empty if the tuning is usable.
pub fn validate_tuning(tuning: &GameTuning) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let clips = &tuning.animations;
    let attacks = &tuning.attacks;

    for clip in clips {
        check_clip(&mut errors, clip);
    }

    // Player strikes
    check!(
        errors,
        !attacks.combo.is_empty(),
        "Attacks",
        "combo",
        "combo",
        "at least one combo strike is required"
    );
    for strike in &attacks.combo {
        check_strike(&mut errors, "Combo", strike, clips);
    }
    for pair in attacks.combo.windows(2) {
        check!(
            errors,
            pair[1].damage >= pair[0].damage,
            "Combo",
            pair[1].animation,
            "damage",
            "{} is lower than the previous tier's {}",
            pair[1].damage,
            pair[0].damage
        );
    }
    check!(
        errors,
        attacks.unlocked_tiers >= 1 && attacks.unlocked_tiers as usize <= attacks.combo.len(),
        "Attacks",
        "combo",
        "unlocked_tiers",
        "{} is outside 1..={}",
        attacks.unlocked_tiers,
        attacks.combo.len()
    );
    for strike in &attacks.skills {
        check_strike(&mut errors, "Skill", strike, clips);
        check!(
            errors,
            strike.mana_cost <= tuning.stats.max_mana,
            "Skill",
            strike.animation,
            "mana_cost",
            "{} exceeds max_mana {}",
            strike.mana_cost,
            tuning.stats.max_mana
        );
    }
    check_strike(&mut errors, "Ultimate", &attacks.ultimate, clips);
    check_strike(&mut errors, "AirAttack", &attacks.air, clips);

    // Foes
    check_strike(&mut errors, "EnemyAttack", &tuning.enemy.attack, clips);
    let boss = &tuning.boss;
    for strike in &boss.attacks {
        check_strike(&mut errors, "BossAttack", strike, clips);
    }
    for (index, phase) in boss.phases.iter().enumerate() {
        let item = format!("phase {}", index);
        check!(
            errors,
            phase.weights.len() == boss.attacks.len(),
            "BossPhase",
            item,
            "weights",
            "{} weights for {} attacks",
            phase.weights.len(),
            boss.attacks.len()
        );
    }
    for (index, pair) in boss.phases.windows(2).enumerate() {
        check!(
            errors,
            pair[1].above_health_pct < pair[0].above_health_pct,
            "BossPhase",
            format!("phase {}", index + 1),
            "above_health_pct",
            "thresholds must be strictly decreasing"
        );
    }

    // Pools
    let movement = &tuning.movement;
    check!(
        errors,
        movement.gravity > 0.0,
        "Movement",
        "movement",
        "gravity",
        "{} must be positive",
        movement.gravity
    );
    check!(
        errors,
        movement.dash_time > 0.0,
        "Movement",
        "movement",
        "dash_time",
        "{} must be positive",
        movement.dash_time
    );
    check!(
        errors,
        tuning.stats.max_health > 0.0,
        "Stats",
        "stats",
        "max_health",
        "{} must be positive",
        tuning.stats.max_health
    );

    errors
}
