//! Site handler domain module.
//!
//! Defines the per-page handler state and its pure transition function.
//! Side effects (watching, listening, clipboard access) live in the
//! orchestrator that executes the returned actions.

mod state;
pub mod state_machine;

pub use state::HandlerState;
pub use state_machine::{HandlerAction, HandlerEvent, HandlerPhase, HandlerStateMachine};
