//! Animation domain: clip playback and keyframe signals.
//!
//! Stands in for the engine animator. Clips are data (duration, looping, and
//! the normalized times of the queue and strike keyframes). Signals are
//! queued on the entity and drained by the state machine drivers at a fixed
//! point in the frame, never delivered as callbacks.

mod driver;
#[cfg(test)]
mod tests;

pub use driver::{AnimationDriver, AnimationLibrary, AnimationSignal, ClipDef, advance_animations};

use bevy::prelude::*;

use crate::core::FrameSet;

pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AnimationLibrary>()
            .add_systems(Update, advance_animations.in_set(FrameSet::Animation));
    }
}
