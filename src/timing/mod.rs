//! Timing domain: cooldowns, countdowns, and scheduled repeating effects.
//!
//! Everything here compares against a monotonic clock expressed in seconds
//! (`Time::elapsed_secs()` at runtime, plain floats in tests). Nothing suspends;
//! callers poll once per tick.

mod cooldown;
#[cfg(test)]
mod tests;

pub use cooldown::{Cooldown, Countdown, Deadline, RepeatingTask};
