//! Timing domain: unit tests for cooldowns and scheduled tasks.

use super::{Cooldown, Countdown, Deadline, RepeatingTask};

// -----------------------------------------------------------------------------
// Cooldown tests
// -----------------------------------------------------------------------------

#[test]
fn test_cooldown_ready_before_first_trigger() {
    let cooldown = Cooldown::new(1.0);
    assert!(cooldown.ready(0.0));
    assert_eq!(cooldown.remaining(0.0), 0.0);
}

#[test]
fn test_cooldown_blocks_until_duration_elapsed() {
    let mut cooldown = Cooldown::new(1.0);
    cooldown.trigger(0.0);

    assert!(!cooldown.ready(0.5));
    assert!((cooldown.remaining(0.5) - 0.5).abs() < 1e-6);
    assert!(cooldown.ready(1.0));
    assert!(cooldown.ready(1.1));
}

#[test]
fn test_cooldown_readiness_check_does_not_mutate() {
    let cooldown = Cooldown::triggered_at(1.0, 0.0);
    let before = cooldown;
    let _ = cooldown.ready(0.2);
    let _ = cooldown.remaining(0.2);
    assert_eq!(cooldown, before);
}

#[test]
fn test_cooldown_clear() {
    let mut cooldown = Cooldown::triggered_at(5.0, 1.0);
    cooldown.clear();
    assert!(cooldown.ready(1.0));
    assert!(cooldown.last_triggered().is_none());
}

// -----------------------------------------------------------------------------
// Countdown / Deadline tests
// -----------------------------------------------------------------------------

#[test]
fn test_countdown_expires() {
    let mut countdown = Countdown::default();
    assert!(!countdown.is_active());

    countdown.start(0.12);
    countdown.tick(0.1);
    assert!(countdown.is_active());
    countdown.tick(0.1);
    assert!(!countdown.is_active());
    assert_eq!(countdown.remaining(), 0.0);
}

#[test]
fn test_deadline_due() {
    let deadline = Deadline::after(2.0, 0.5);
    assert!(!deadline.is_due(2.4));
    assert!(deadline.is_due(2.5));
}

// -----------------------------------------------------------------------------
// RepeatingTask tests
// -----------------------------------------------------------------------------

#[test]
fn test_repeating_task_fires_immediately_then_on_interval() {
    let mut task = RepeatingTask::new(10.0, 1.0, 3.0);

    assert_eq!(task.poll(10.0), 1);
    assert_eq!(task.poll(10.5), 0);
    assert_eq!(task.poll(11.0), 1);
    assert_eq!(task.poll(12.0), 1);
    assert!(task.is_finished());
    assert_eq!(task.poll(20.0), 0);
}

#[test]
fn test_repeating_task_catches_up_after_long_frame() {
    let mut task = RepeatingTask::new(0.0, 1.0, 3.0);
    assert_eq!(task.poll(5.0), 3);
    assert!(task.is_finished());
}

#[test]
fn test_repeating_task_cancel() {
    let mut task = RepeatingTask::new(0.0, 1.0, 3.0);
    assert_eq!(task.poll(0.0), 1);
    task.cancel();
    assert_eq!(task.poll(2.0), 0);
    assert!(task.is_finished());
}
