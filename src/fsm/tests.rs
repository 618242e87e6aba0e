//! State machine domain: unit tests for transition ordering and frame gating.

use super::{State, StateKind, StateMachine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    A,
    B,
    C,
    End,
}

/// Records every hook call and can be told which transition each hook returns.
#[derive(Default)]
struct Log {
    calls: Vec<String>,
    on_input: Option<Stage>,
    on_logic: Option<Stage>,
    on_physics: Option<Stage>,
}

impl StateKind for Stage {
    type Id = Stage;

    fn id(&self) -> Stage {
        *self
    }

    fn is_terminal(&self) -> bool {
        matches!(self, Stage::End)
    }

    fn name(&self) -> &'static str {
        match self {
            Stage::A => "a",
            Stage::B => "b",
            Stage::C => "c",
            Stage::End => "end",
        }
    }
}

impl State<Log> for Stage {
    fn enter(&mut self, ctx: &mut Log) {
        ctx.calls.push(format!("enter {}", self.name()));
    }

    fn exit(&mut self, ctx: &mut Log) {
        ctx.calls.push(format!("exit {}", self.name()));
    }

    fn handle_input(&mut self, ctx: &mut Log) -> Option<Self> {
        ctx.calls.push(format!("input {}", self.name()));
        ctx.on_input.take()
    }

    fn logic_update(&mut self, ctx: &mut Log, _elapsed: f32) -> Option<Self> {
        ctx.calls.push(format!("logic {}", self.name()));
        ctx.on_logic.take()
    }

    fn physics_update(&mut self, ctx: &mut Log, _elapsed: f32, _dt: f32) -> Option<Self> {
        ctx.calls.push(format!("physics {}", self.name()));
        ctx.on_physics.take()
    }
}

fn started(start: Stage) -> (StateMachine<Stage>, Log) {
    let mut log = Log::default();
    let mut machine = StateMachine::new();
    machine.initialize(start, &mut log);
    machine.begin_frame();
    log.calls.clear();
    (machine, log)
}

// -----------------------------------------------------------------------------
// Initialize / change_state
// -----------------------------------------------------------------------------

#[test]
fn test_initialize_enters_once_without_exit() {
    let mut log = Log::default();
    let mut machine = StateMachine::new();
    assert!(!machine.is_initialized());

    machine.initialize(Stage::A, &mut log);

    assert_eq!(log.calls, vec!["enter a"]);
    assert_eq!(machine.current_id(), Some(Stage::A));
}

#[test]
fn test_change_state_exits_old_then_enters_new() {
    let (mut machine, mut log) = started(Stage::A);

    assert!(machine.change_state(Stage::B, &mut log));

    assert_eq!(log.calls, vec!["exit a", "enter b"]);
    assert_eq!(machine.current_id(), Some(Stage::B));
}

#[test]
fn test_change_to_current_state_is_noop() {
    let (mut machine, mut log) = started(Stage::A);

    for _ in 0..5 {
        assert!(!machine.change_state(Stage::A, &mut log));
    }

    assert!(log.calls.is_empty());
}

#[test]
fn test_repeated_changes_never_reenter_same_state() {
    let (mut machine, mut log) = started(Stage::A);
    let sequence = [Stage::B, Stage::B, Stage::C, Stage::C, Stage::A, Stage::A];

    for next in sequence {
        machine.change_state(next, &mut log);
    }

    assert_eq!(
        log.calls,
        vec!["exit a", "enter b", "exit b", "enter c", "exit c", "enter a"]
    );
}

#[test]
fn test_terminal_state_refuses_transitions() {
    let (mut machine, mut log) = started(Stage::A);
    machine.change_state(Stage::End, &mut log);
    log.calls.clear();

    assert!(!machine.change_state(Stage::A, &mut log));
    assert!(machine.is_in_terminal_state());
    assert!(log.calls.is_empty());
}

#[test]
fn test_change_before_initialize_is_noop() {
    let mut log = Log::default();
    let mut machine: StateMachine<Stage> = StateMachine::new();
    assert!(!machine.change_state(Stage::A, &mut log));
    assert!(log.calls.is_empty());
}

#[test]
fn test_reinitialize_skips_exit() {
    let (mut machine, mut log) = started(Stage::End);

    machine.initialize(Stage::A, &mut log);

    assert_eq!(log.calls, vec!["enter a"]);
    assert_eq!(machine.current_id(), Some(Stage::A));
}

#[test]
fn test_reset_leaves_terminal_state_without_exit() {
    let (mut machine, mut log) = started(Stage::End);

    machine.reset();

    assert!(log.calls.is_empty());
    assert!(!machine.is_initialized());
    assert!(!machine.is_in_terminal_state());

    machine.initialize(Stage::A, &mut log);
    assert_eq!(log.calls, vec!["enter a"]);
}

// -----------------------------------------------------------------------------
// Frame hook ordering
// -----------------------------------------------------------------------------

#[test]
fn test_frame_runs_input_then_logic_then_physics() {
    let (mut machine, mut log) = started(Stage::A);

    machine.run_frame(&mut log, 0.016);
    machine.run_physics(&mut log, 0.016);

    assert_eq!(log.calls, vec!["input a", "logic a", "physics a"]);
}

#[test]
fn test_input_transition_defers_new_state_hooks() {
    let (mut machine, mut log) = started(Stage::A);
    log.on_input = Some(Stage::B);

    machine.run_frame(&mut log, 0.016);
    machine.run_physics(&mut log, 0.016);

    assert_eq!(log.calls, vec!["input a", "exit a", "enter b"]);

    log.calls.clear();
    machine.begin_frame();
    machine.run_frame(&mut log, 0.016);
    machine.run_physics(&mut log, 0.016);
    assert_eq!(log.calls, vec!["input b", "logic b", "physics b"]);
}

#[test]
fn test_physics_transition_skips_rest_of_frame() {
    let (mut machine, mut log) = started(Stage::A);
    log.on_physics = Some(Stage::C);

    machine.run_physics(&mut log, 0.02);
    machine.run_frame(&mut log, 0.016);

    assert_eq!(log.calls, vec!["physics a", "exit a", "enter c"]);
}

#[test]
fn test_noop_transition_request_keeps_running_hooks() {
    let (mut machine, mut log) = started(Stage::A);
    log.on_input = Some(Stage::A);

    machine.run_frame(&mut log, 0.016);

    assert_eq!(log.calls, vec!["input a", "logic a"]);
}

#[test]
fn test_elapsed_resets_on_transition() {
    let (mut machine, mut log) = started(Stage::A);

    machine.run_frame(&mut log, 0.25);
    machine.begin_frame();
    machine.run_frame(&mut log, 0.25);
    assert!((machine.elapsed() - 0.5).abs() < 1e-6);

    machine.change_state(Stage::B, &mut log);
    assert_eq!(machine.elapsed(), 0.0);
}
