//! Animation domain: clip library, per-entity playback, and signal queue.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Authored clip data. Keyframe positions are normalized to `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ClipDef {
    pub name: String,
    pub duration: f32,
    #[serde(default)]
    pub looping: bool,
    /// Point after which a follow-up attack may be queued
    #[serde(default)]
    pub queue_point: Option<f32>,
    /// Point where the hit lands
    #[serde(default)]
    pub strike_point: Option<f32>,
}

impl ClipDef {
    pub fn looping(name: &str, duration: f32) -> Self {
        Self {
            name: name.to_string(),
            duration,
            looping: true,
            queue_point: None,
            strike_point: None,
        }
    }

    pub fn once(name: &str, duration: f32) -> Self {
        Self {
            looping: false,
            ..Self::looping(name, duration)
        }
    }

    pub fn with_queue_point(mut self, at: f32) -> Self {
        self.queue_point = Some(at);
        self
    }

    pub fn with_strike_point(mut self, at: f32) -> Self {
        self.strike_point = Some(at);
        self
    }
}

/// Signals fired by the animator at authored keyframes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationSignal {
    QueuePoint,
    Strike,
    Ended,
}

/// All clips known to the game, by name.
#[derive(Resource, Debug, Clone)]
pub struct AnimationLibrary {
    clips: HashMap<String, ClipDef>,
}

impl AnimationLibrary {
    pub fn from_clips(clips: impl IntoIterator<Item = ClipDef>) -> Self {
        Self {
            clips: clips.into_iter().map(|c| (c.name.clone(), c)).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ClipDef> {
        self.clips.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Clip set used when no tuning file overrides it.
    pub fn default_clips() -> Vec<ClipDef> {
        vec![
            ClipDef::looping("idle", 0.6),
            ClipDef::looping("run", 0.5),
            ClipDef::once("jump", 0.3),
            ClipDef::looping("fall", 0.3),
            ClipDef::once("dash", 0.16),
            ClipDef::once("attack_1", 0.4)
                .with_strike_point(0.3)
                .with_queue_point(0.6),
            ClipDef::once("attack_2", 0.45)
                .with_strike_point(0.3)
                .with_queue_point(0.6),
            ClipDef::once("attack_3", 0.55).with_strike_point(0.4),
            ClipDef::once("skill_1", 0.5).with_strike_point(0.4),
            ClipDef::once("skill_2", 0.6).with_strike_point(0.45),
            ClipDef::once("ultimate", 0.9).with_strike_point(0.5),
            ClipDef::once("air_attack", 0.35).with_strike_point(0.3),
            ClipDef::once("hurt", 0.3),
            ClipDef::once("death", 0.8),
            ClipDef::looping("enemy_idle", 0.6),
            ClipDef::looping("enemy_run", 0.5),
            ClipDef::once("enemy_attack", 0.6).with_strike_point(0.5),
            ClipDef::once("enemy_death", 0.6),
            ClipDef::looping("boss_idle", 0.8),
            ClipDef::looping("boss_run", 0.6),
            ClipDef::once("boss_attack_1", 0.8).with_strike_point(0.5),
            ClipDef::once("boss_attack_2", 0.9).with_strike_point(0.5),
            ClipDef::once("boss_attack_3", 1.1).with_strike_point(0.6),
            ClipDef::once("boss_attack_4", 1.4).with_strike_point(0.7),
            ClipDef::once("boss_death", 1.2),
        ]
    }
}

impl Default for AnimationLibrary {
    fn default() -> Self {
        Self::from_clips(Self::default_clips())
    }
}

#[derive(Debug, Clone)]
struct Playback {
    clip: ClipDef,
    progress: f32,
    queue_fired: bool,
    strike_fired: bool,
    ended: bool,
}

/// Per-entity playback state and pending signals.
#[derive(Component, Debug, Default)]
pub struct AnimationDriver {
    playback: Option<Playback>,
    signals: Vec<AnimationSignal>,
}

impl AnimationDriver {
    /// Starts `name` from the beginning and drops signals of the previous
    /// clip. Returns `false` when the library has no such clip.
    pub fn play(&mut self, library: &AnimationLibrary, name: &str) -> bool {
        self.signals.clear();
        match library.get(name) {
            Some(clip) => {
                self.playback = Some(Playback {
                    clip: clip.clone(),
                    progress: 0.0,
                    queue_fired: false,
                    strike_fired: false,
                    ended: false,
                });
                true
            }
            None => {
                warn!("Animation clip '{}' not found", name);
                self.playback = None;
                false
            }
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.playback.as_ref().map(|p| p.clip.name.as_str())
    }

    /// Normalized playback progress of the current clip.
    pub fn progress(&self) -> f32 {
        self.playback.as_ref().map_or(0.0, |p| p.progress)
    }

    pub fn advance(&mut self, dt: f32) {
        let Some(playback) = self.playback.as_mut() else {
            return;
        };
        if playback.ended {
            return;
        }

        let step = if playback.clip.duration > 0.0 {
            dt / playback.clip.duration
        } else {
            1.0
        };
        playback.progress += step;

        if let Some(at) = playback.clip.strike_point
            && !playback.strike_fired
            && playback.progress >= at
        {
            playback.strike_fired = true;
            self.signals.push(AnimationSignal::Strike);
        }
        if let Some(at) = playback.clip.queue_point
            && !playback.queue_fired
            && playback.progress >= at
        {
            playback.queue_fired = true;
            self.signals.push(AnimationSignal::QueuePoint);
        }

        if playback.progress >= 1.0 {
            if playback.clip.looping {
                playback.progress = playback.progress.fract();
                playback.queue_fired = false;
                playback.strike_fired = false;
            } else {
                playback.progress = 1.0;
                playback.ended = true;
                self.signals.push(AnimationSignal::Ended);
            }
        }
    }

    /// Queues a signal from an external animator.
    pub fn push_signal(&mut self, signal: AnimationSignal) {
        self.signals.push(signal);
    }

    /// Takes every signal queued since the last call.
    pub fn take_signals(&mut self) -> Vec<AnimationSignal> {
        std::mem::take(&mut self.signals)
    }

    #[cfg(test)]
    pub fn has_pending(&self) -> bool {
        !self.signals.is_empty()
    }
}

pub fn advance_animations(time: Res<Time>, mut query: Query<&mut AnimationDriver>) {
    let dt = time.delta_secs();
    for mut driver in &mut query {
        driver.advance(dt);
    }
}
