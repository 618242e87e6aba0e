//! Finite state machine with enter/exit hooks and per-tick hook dispatch.
//!
//! States are plain values (usually an enum). Hooks never call back into the
//! machine; they *return* the state they want to move to and the machine
//! applies it after the hook finishes. `enter` and `exit` return nothing, so
//! a transition can never start in the middle of another one.
//!
//! Frame protocol, driven by the owning systems:
//!
//! 1. [`StateMachine::begin_frame`] once per rendered frame, before any hook.
//! 2. [`StateMachine::step_input`], then [`StateMachine::step_logic`].
//! 3. [`StateMachine::run_physics`] on each fixed physics step.
//!
//! Once any transition happens inside a frame, every remaining hook of that
//! frame is skipped. The new state starts running its hooks on the next frame.

use std::fmt::Debug;

/// Identity of a state value, independent of the context it runs in.
pub trait StateKind {
    /// Two states with equal ids are the same state for transition purposes.
    type Id: Copy + Eq + Debug;

    fn id(&self) -> Self::Id;

    /// Terminal states refuse every outgoing transition.
    fn is_terminal(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str;
}

/// Behaviour hooks of a state running against context `C`.
pub trait State<C>: StateKind + Sized {
    fn enter(&mut self, _ctx: &mut C) {}

    fn exit(&mut self, _ctx: &mut C) {}

    /// Reads the input snapshot and cooldowns.
    fn handle_input(&mut self, _ctx: &mut C) -> Option<Self> {
        None
    }

    /// Advances state-local logic. `elapsed` is seconds since `enter`.
    fn logic_update(&mut self, _ctx: &mut C, _elapsed: f32) -> Option<Self> {
        None
    }

    /// Reads physics results (grounded, vertical velocity) on a fixed step.
    fn physics_update(&mut self, _ctx: &mut C, _elapsed: f32, _dt: f32) -> Option<Self> {
        None
    }
}

#[derive(Debug)]
pub struct StateMachine<S> {
    current: Option<S>,
    elapsed: f32,
    changed_this_frame: bool,
}

impl<S> Default for StateMachine<S> {
    fn default() -> Self {
        Self {
            current: None,
            elapsed: 0.0,
            changed_this_frame: false,
        }
    }
}

impl<S: StateKind> StateMachine<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the starting state and calls its `enter` exactly once.
    ///
    /// Any previous state is dropped without `exit`: initializing starts a new
    /// life for the machine (spawn or respawn).
    pub fn initialize<C>(&mut self, start: S, ctx: &mut C)
    where
        S: State<C>,
    {
        self.elapsed = 0.0;
        self.changed_this_frame = true;
        let state = self.current.insert(start);
        state.enter(ctx);
    }

    /// Exits the current state and enters `next`.
    ///
    /// Returns `false` without calling any hook when `next` has the same id
    /// as the current state, when the current state is terminal, or when the
    /// machine was never initialized.
    pub fn change_state<C>(&mut self, next: S, ctx: &mut C) -> bool
    where
        S: State<C>,
    {
        let Some(current) = self.current.as_mut() else {
            return false;
        };
        if current.id() == next.id() || current.is_terminal() {
            return false;
        }

        current.exit(ctx);
        let state = self.current.insert(next);
        state.enter(ctx);

        self.elapsed = 0.0;
        self.changed_this_frame = true;
        true
    }

    /// Drops the current state without `exit`, leaving the machine
    /// uninitialized until its owner calls `initialize` again.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn begin_frame(&mut self) {
        self.changed_this_frame = false;
    }

    /// Runs `handle_input`. Returns `true` when it caused a transition.
    pub fn step_input<C>(&mut self, ctx: &mut C) -> bool
    where
        S: State<C>,
    {
        if self.changed_this_frame {
            return false;
        }
        let Some(state) = self.current.as_mut() else {
            return false;
        };
        match state.handle_input(ctx) {
            Some(next) => self.change_state(next, ctx),
            None => false,
        }
    }

    /// Advances the state timer by `dt` and runs `logic_update`.
    pub fn step_logic<C>(&mut self, ctx: &mut C, dt: f32) -> bool
    where
        S: State<C>,
    {
        if self.changed_this_frame {
            return false;
        }
        let Some(state) = self.current.as_mut() else {
            return false;
        };
        self.elapsed += dt;
        match state.logic_update(ctx, self.elapsed) {
            Some(next) => self.change_state(next, ctx),
            None => false,
        }
    }

    /// `step_input` followed by `step_logic`.
    pub fn run_frame<C>(&mut self, ctx: &mut C, dt: f32)
    where
        S: State<C>,
    {
        if !self.step_input(ctx) {
            self.step_logic(ctx, dt);
        }
    }

    /// Runs `physics_update` unless a transition already happened this frame.
    pub fn run_physics<C>(&mut self, ctx: &mut C, dt: f32) -> bool
    where
        S: State<C>,
    {
        if self.changed_this_frame {
            return false;
        }
        let Some(state) = self.current.as_mut() else {
            return false;
        };
        match state.physics_update(ctx, self.elapsed, dt) {
            Some(next) => self.change_state(next, ctx),
            None => false,
        }
    }

    pub fn current(&self) -> Option<&S> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut S> {
        self.current.as_mut()
    }

    pub fn current_id(&self) -> Option<S::Id> {
        self.current.as_ref().map(StateKind::id)
    }

    pub fn current_name(&self) -> &'static str {
        self.current.as_ref().map_or("uninitialized", StateKind::name)
    }

    pub fn is_initialized(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_in_terminal_state(&self) -> bool {
        self.current.as_ref().is_some_and(StateKind::is_terminal)
    }

    /// Seconds spent in the current state.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn changed_this_frame(&self) -> bool {
        self.changed_this_frame
    }
}
