//! Respawn domain: checkpoint registry.

use bevy::prelude::*;

/// Where a fallen player comes back. Starts at the level spawn point and
/// moves to each checkpoint the player touches.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Checkpoints {
    spawn: Vec2,
    last: Option<Vec2>,
}

impl Checkpoints {
    pub fn new(spawn: Vec2) -> Self {
        Self { spawn, last: None }
    }

    /// Records `position`. Returns `false` when it was already the active
    /// checkpoint.
    pub fn set_checkpoint(&mut self, position: Vec2) -> bool {
        if self.last == Some(position) {
            return false;
        }
        self.last = Some(position);
        true
    }

    pub fn respawn_point(&self) -> Vec2 {
        self.last.unwrap_or(self.spawn)
    }

    pub fn has_checkpoint(&self) -> bool {
        self.last.is_some()
    }

    /// Forgets touched checkpoints.
    pub fn clear(&mut self) {
        self.last = None;
    }
}

impl Default for Checkpoints {
    fn default() -> Self {
        Self::new(Vec2::new(-500.0, -140.0))
    }
}
