//! Core state machine types.
//!
//! This module holds the building blocks the runtime drives:
//! - States and their lifecycle hooks
//! - Guard predicates for transition control
//! - The state registry and the transition table
//! - Bounded transition history
//! - The engine's error taxonomy

mod error;
mod guard;
mod history;
mod registry;
mod state;
mod transitions;

pub use error::{FsmError, Result};
pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use registry::StateRegistry;
pub use state::{
    HandlerBehaviour, NoopBehaviour, State, StateBehaviour, StateHandler, StateProcessor,
};
pub use transitions::{TransitionEdge, TransitionRule, TransitionTable};
