//! Respawn domain: trigger volumes.

use bevy::prelude::*;

/// Sensor that records its position as the respawn point when touched.
#[derive(Component, Debug)]
pub struct Checkpoint;

/// Sensor that hurts the player and sends them back to the last checkpoint.
#[derive(Component, Debug)]
pub struct KillZone;
