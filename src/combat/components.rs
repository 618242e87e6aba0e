//! Combat domain: team affiliation.

use bevy::prelude::*;

use crate::movement::GameLayer;

/// Team affiliation to prevent friendly fire
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Team {
    Player,
    Enemy,
}

impl Team {
    /// Body layer of this team's actors.
    pub fn layer(self) -> GameLayer {
        match self {
            Team::Player => GameLayer::Player,
            Team::Enemy => GameLayer::Enemy,
        }
    }

    /// Layer hit zones of this team query against.
    pub fn opponent_layer(self) -> GameLayer {
        match self {
            Team::Player => GameLayer::Enemy,
            Team::Enemy => GameLayer::Player,
        }
    }
}
