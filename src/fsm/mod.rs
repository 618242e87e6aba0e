//! State machine domain: the generic enter/exit/three-hook machine shared by
//! the player, enemies, and bosses.

mod machine;
#[cfg(test)]
mod tests;

pub use machine::{State, StateKind, StateMachine};
