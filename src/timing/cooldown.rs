//! Timing domain: time window primitives.

/// Guards an action behind a minimum interval between firings.
///
/// Readiness is a read-only comparison against `now`; the cooldown only
/// changes when the guarded action actually fires via [`Cooldown::trigger`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cooldown {
    pub duration: f32,
    last_triggered: Option<f32>,
}

impl Cooldown {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            last_triggered: None,
        }
    }

    /// A cooldown that already fired at `at`.
    #[cfg(test)]
    pub fn triggered_at(duration: f32, at: f32) -> Self {
        Self {
            duration,
            last_triggered: Some(at),
        }
    }

    pub fn ready(&self, now: f32) -> bool {
        match self.last_triggered {
            Some(at) => now - at >= self.duration,
            None => true,
        }
    }

    pub fn trigger(&mut self, now: f32) {
        self.last_triggered = Some(now);
    }

    /// Seconds until ready, zero when ready.
    pub fn remaining(&self, now: f32) -> f32 {
        match self.last_triggered {
            Some(at) => (self.duration - (now - at)).max(0.0),
            None => 0.0,
        }
    }

    pub fn last_triggered(&self) -> Option<f32> {
        self.last_triggered
    }

    pub fn clear(&mut self) {
        self.last_triggered = None;
    }
}

impl Default for Cooldown {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Decrementing window driven by frame deltas (jump buffer, freeze windows).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    pub fn start(&mut self, seconds: f32) {
        self.remaining = seconds.max(0.0);
    }

    pub fn tick(&mut self, dt: f32) {
        if self.remaining > 0.0 {
            self.remaining = (self.remaining - dt).max(0.0);
        }
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }
}

/// A single point in time after which something should happen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deadline {
    pub fire_at: f32,
}

impl Deadline {
    pub fn after(now: f32, delay: f32) -> Self {
        Self {
            fire_at: now + delay,
        }
    }

    pub fn is_due(&self, now: f32) -> bool {
        now >= self.fire_at
    }
}

/// Fires at a fixed interval until a total duration has been covered.
///
/// The first firing is due immediately at `start`. `poll` returns how many
/// firings became due since the previous poll, so a long frame never drops
/// ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepeatingTask {
    pub interval: f32,
    next_at: f32,
    remaining_fires: u32,
}

impl RepeatingTask {
    pub fn new(start: f32, interval: f32, duration: f32) -> Self {
        let interval = interval.max(f32::EPSILON);
        // One firing per started interval inside the duration.
        let fires = (duration / interval).ceil().max(0.0) as u32;
        Self {
            interval,
            next_at: start,
            remaining_fires: fires,
        }
    }

    pub fn poll(&mut self, now: f32) -> u32 {
        let mut fired = 0;
        while self.remaining_fires > 0 && now >= self.next_at {
            self.remaining_fires -= 1;
            self.next_at += self.interval;
            fired += 1;
        }
        fired
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_fires == 0
    }

    pub fn cancel(&mut self) {
        self.remaining_fires = 0;
    }
}
