//! Respawn domain: respawn request message.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Written once by a finished Death state.
#[derive(Debug)]
pub struct RespawnRequested {
    pub entity: Entity,
}

impl Message for RespawnRequested {}
