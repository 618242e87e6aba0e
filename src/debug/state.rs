//! Debug domain: toggles and the transient status message.

use bevy::prelude::*;

/// Resource tracking debug mode state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Whether player is invincible
    pub invincible: bool,
    /// Whether state machine transitions are logged
    pub log_transitions: bool,
    /// Message and its remaining display time
    pub status_message: Option<(String, f32)>,
}

impl DebugState {
    /// Set a status message that will fade after a duration
    pub fn set_message(&mut self, message: impl Into<String>, duration: f32) {
        let message = message.into();
        info!("[DEBUG] {}", message);
        self.status_message = Some((message, duration));
    }

    /// Counts the message down, dropping it once expired.
    pub fn tick_message(&mut self, dt: f32) {
        if let Some((_, ref mut remaining)) = self.status_message {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.status_message = None;
            }
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.status_message
            .as_ref()
            .map(|(message, _)| message.as_str())
    }
}

pub(crate) fn toggle_label(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}
