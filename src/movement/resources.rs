//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MovementTuning {
    pub move_speed: f32,
    /// Axis magnitude under which movement input counts as released
    pub deadzone: f32,
    pub jump_velocity: f32,
    pub gravity: f32,
    pub coyote_time: f32,
    pub jump_buffer_time: f32,
    pub dash_speed: f32,
    pub dash_time: f32,
    pub dash_cooldown: f32,
    pub ground_only_dash: bool,
    /// Jump and attack presses end a dash early
    pub dash_cancellable: bool,
    /// Horizontal speed scale while airborne
    pub air_control: f32,
    pub max_fall_speed: f32,
    pub max_fast_fall_speed: f32,
    /// Gravity multiplier while fast fall is held
    pub fast_fall_multiplier: f32,
    pub ground_probe_distance: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            move_speed: 320.0,
            deadzone: 0.1,
            jump_velocity: 680.0,
            gravity: 1800.0,
            coyote_time: 0.12,
            jump_buffer_time: 0.12,
            dash_speed: 900.0,
            dash_time: 0.16,
            dash_cooldown: 0.35,
            ground_only_dash: true,
            dash_cancellable: false,
            air_control: 0.6,
            max_fall_speed: 900.0,
            max_fast_fall_speed: 1400.0,
            fast_fall_multiplier: 2.0,
            ground_probe_distance: 4.0,
        }
    }
}

impl MovementTuning {
    /// Apex height of a standing jump: h = v² / (2g)
    pub fn jump_height(&self) -> f32 {
        self.jump_velocity * self.jump_velocity / (2.0 * self.gravity)
    }
}

/// Per-frame input snapshot. Presses are true only on the frame they happen.
#[derive(Resource, Debug, Default, Clone)]
pub struct PlayerInput {
    pub axis: Vec2,
    pub jump_pressed: bool,
    pub jump_held: bool,
    pub attack_pressed: bool,
    pub attack_held: bool,
    pub skill_1_pressed: bool,
    pub skill_2_pressed: bool,
    pub ultimate_pressed: bool,
    pub dash_pressed: bool,
    pub fast_fall_held: bool,
}
