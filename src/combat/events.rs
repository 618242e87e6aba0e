//! Combat domain: combat-related events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::combat::StatusEffect;
use crate::stats::DamageOutcome;

#[derive(Debug)]
pub struct DamageEvent {
    pub source: Entity,
    pub target: Entity,
    pub amount: f32,
    pub effect: Option<StatusEffect>,
}

impl Message for DamageEvent {}

/// Damage that actually changed a target's health, for its state machine.
#[derive(Debug)]
pub struct DamageTakenEvent {
    pub entity: Entity,
    pub source: Entity,
    pub outcome: DamageOutcome,
}

impl Message for DamageTakenEvent {}

#[derive(Debug)]
pub struct DeathEvent {
    pub entity: Entity,
}

impl Message for DeathEvent {}
