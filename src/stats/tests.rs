//! Stats domain: unit tests for clamped pools and one-way death.

use super::{CharacterStats, DamageOutcome, StatsTuning};

fn full() -> CharacterStats {
    CharacterStats::new(100.0, 100.0, 100.0)
}

// -----------------------------------------------------------------------------
// Health
// -----------------------------------------------------------------------------

#[test]
fn test_damage_reduces_health() {
    let mut stats = full();
    assert_eq!(stats.take_damage(30.0, false), DamageOutcome::Hurt);
    assert_eq!(stats.health(), 70.0);
    assert!(!stats.is_dead());
}

#[test]
fn test_overkill_clamps_to_zero_and_kills_once() {
    let mut stats = full().with_health(70.0);

    assert_eq!(stats.take_damage(80.0, false), DamageOutcome::Killed);
    assert_eq!(stats.health(), 0.0);
    assert!(stats.is_dead());

    assert_eq!(stats.take_damage(10.0, false), DamageOutcome::Ignored);
    assert_eq!(stats.take_damage(0.0, false), DamageOutcome::Ignored);
    assert_eq!(stats.health(), 0.0);
}

#[test]
fn test_damage_matches_max_of_zero_formula() {
    for (health, damage) in [(100.0, 0.0), (100.0, 99.0), (50.0, 50.0), (1.0, 1000.0)] {
        let mut stats = full().with_health(health);
        stats.take_damage(damage, false);
        assert_eq!(stats.health(), f32::max(0.0, health - damage));
    }
}

#[test]
fn test_immune_damage_is_ignored() {
    let mut stats = full();
    assert_eq!(stats.take_damage(50.0, true), DamageOutcome::Ignored);
    assert_eq!(stats.health(), 100.0);
}

#[test]
fn test_negative_damage_does_not_heal() {
    let mut stats = full().with_health(40.0);
    stats.take_damage(-20.0, false);
    assert_eq!(stats.health(), 40.0);
}

#[test]
fn test_heal_clamps_and_skips_dead() {
    let mut stats = full().with_health(90.0);
    assert_eq!(stats.heal(25.0), 10.0);
    assert_eq!(stats.health(), 100.0);

    stats.take_damage(500.0, false);
    assert_eq!(stats.heal(50.0), 0.0);
    assert!(stats.is_dead());
}

#[test]
fn test_revive_restores_pools() {
    let mut stats = full();
    stats.add_ultimate(40.0);
    stats.use_mana(60.0);
    stats.take_damage(500.0, false);

    stats.revive();

    assert!(!stats.is_dead());
    assert_eq!(stats.health(), 100.0);
    assert_eq!(stats.mana(), 100.0);
    assert_eq!(stats.ultimate(), 0.0);
}

// -----------------------------------------------------------------------------
// Mana / ultimate
// -----------------------------------------------------------------------------

#[test]
fn test_try_spend_mana_rejects_insufficient_pool() {
    let mut stats = full();
    stats.use_mana(80.0);

    assert!(!stats.try_spend_mana(25.0));
    assert_eq!(stats.mana(), 20.0);

    assert!(stats.try_spend_mana(20.0));
    assert_eq!(stats.mana(), 0.0);
}

#[test]
fn test_mana_regen_clamps_at_max() {
    let mut stats = full();
    stats.use_mana(3.0);
    stats.regenerate_mana(5.0);
    assert_eq!(stats.mana(), 100.0);

    stats.use_mana(500.0);
    assert_eq!(stats.mana(), 0.0);
}

#[test]
fn test_ultimate_fills_and_resets() {
    let mut stats = full();
    stats.add_ultimate(60.0);
    assert!(!stats.is_ultimate_full());
    stats.add_ultimate(60.0);
    assert!(stats.is_ultimate_full());
    assert_eq!(stats.ultimate(), 100.0);

    stats.reset_ultimate();
    assert_eq!(stats.ultimate(), 0.0);
}

#[test]
fn test_percentages() {
    let mut stats = CharacterStats::new(200.0, 50.0, 100.0);
    stats.take_damage(50.0, false);
    stats.use_mana(25.0);
    stats.add_ultimate(10.0);

    assert_eq!(stats.health_percentage(), 75.0);
    assert_eq!(stats.normalized_mana(), 0.5);
    assert_eq!(stats.ultimate_percentage(), 10.0);
}

#[test]
fn test_from_tuning_uses_regen_rate() {
    let stats = CharacterStats::from_tuning(&StatsTuning::default());
    assert_eq!(stats.mana_regen_rate, 5.0);
    assert_eq!(stats.ultimate(), 0.0);
    assert_eq!(stats.mana(), stats.max_mana);
}
