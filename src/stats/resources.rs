//! Stats domain: player pool tuning.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StatsTuning {
    pub max_health: f32,
    pub max_mana: f32,
    pub max_ultimate: f32,
    pub mana_regen_rate: f32,
}

impl Default for StatsTuning {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            max_mana: 100.0,
            max_ultimate: 100.0,
            mana_regen_rate: 5.0,
        }
    }
}
