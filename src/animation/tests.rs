//! Animation domain: unit tests for playback progress and signal emission.

use super::{AnimationDriver, AnimationLibrary, AnimationSignal, ClipDef};

fn library() -> AnimationLibrary {
    AnimationLibrary::from_clips([
        ClipDef::looping("idle", 0.5),
        ClipDef::once("swing", 1.0)
            .with_strike_point(0.3)
            .with_queue_point(0.6),
    ])
}

#[test]
fn test_play_unknown_clip_reports_missing() {
    let mut driver = AnimationDriver::default();
    assert!(!driver.play(&library(), "nope"));
    assert_eq!(driver.current(), None);
    assert_eq!(driver.progress(), 0.0);
}

#[test]
fn test_signals_fire_in_keyframe_order() {
    let lib = library();
    let mut driver = AnimationDriver::default();
    assert!(driver.play(&lib, "swing"));

    driver.advance(0.2);
    assert!(driver.take_signals().is_empty());

    driver.advance(0.2);
    assert_eq!(driver.take_signals(), vec![AnimationSignal::Strike]);

    driver.advance(0.25);
    assert_eq!(driver.take_signals(), vec![AnimationSignal::QueuePoint]);

    driver.advance(0.5);
    assert_eq!(driver.take_signals(), vec![AnimationSignal::Ended]);
    assert_eq!(driver.progress(), 1.0);
}

#[test]
fn test_long_frame_fires_every_crossed_signal_once() {
    let lib = library();
    let mut driver = AnimationDriver::default();
    driver.play(&lib, "swing");

    driver.advance(2.0);
    driver.advance(2.0);

    assert_eq!(
        driver.take_signals(),
        vec![
            AnimationSignal::Strike,
            AnimationSignal::QueuePoint,
            AnimationSignal::Ended
        ]
    );
}

#[test]
fn test_looping_clip_never_ends() {
    let lib = library();
    let mut driver = AnimationDriver::default();
    driver.play(&lib, "idle");

    for _ in 0..10 {
        driver.advance(0.2);
    }

    assert!(driver.take_signals().is_empty());
    assert!(driver.progress() < 1.0);
}

#[test]
fn test_play_drops_pending_signals() {
    let lib = library();
    let mut driver = AnimationDriver::default();
    driver.play(&lib, "swing");
    driver.advance(0.4);
    assert!(driver.has_pending());

    driver.play(&lib, "swing");

    assert!(!driver.has_pending());
    assert_eq!(driver.progress(), 0.0);
}

#[test]
fn test_pushed_signal_is_delivered() {
    let mut driver = AnimationDriver::default();
    driver.push_signal(AnimationSignal::Ended);
    assert_eq!(driver.take_signals(), vec![AnimationSignal::Ended]);
    assert!(driver.take_signals().is_empty());
}

#[test]
fn test_default_library_has_combo_clips() {
    let lib = AnimationLibrary::default();
    for name in ["attack_1", "attack_2", "attack_3", "air_attack", "death"] {
        assert!(lib.contains(name), "missing clip {name}");
    }
}
