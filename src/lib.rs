//! Simple FSM: a guarded finite state machine engine.
//!
//! A machine is a set of named states, directed transition rules between
//! them, and optional guards deciding which rule applies to an event. The
//! machine is driven one event at a time; around every transition the
//! states' lifecycle hooks fire in a fixed order.
//!
//! # Core Concepts
//!
//! - **State**: a named node with `before_event`/`on_event`/`after_event`
//!   hooks and a finish flag
//! - **Guard**: a predicate over the machine and the event
//! - **Resolution**: picking the unique eligible rule, or failing when none
//!   or several are eligible
//! - **Machine**: the runtime holding the current and previous state, plus
//!   an optional caller-owned context that guards and hooks can read
//!
//! # Example
//!
//! ```rust
//! use simple_fsm::core::State;
//! use simple_fsm::runtime::Machine;
//!
//! let mut machine = Machine::<u32>::new();
//! machine.add_initial_state(State::new("init"))?;
//! machine.add_state(State::new("mid"))?;
//! machine.add_state(State::finish("finish"))?;
//! machine.add_transition("init", "mid")?;
//! machine.add_transition("mid", "finish")?;
//!
//! machine.init()?;
//! for event in 0..3 {
//!     machine.process(&event)?;
//! }
//!
//! assert!(machine.is_done());
//! assert_eq!(machine.history().get_path(), vec!["init", "mid", "finish"]);
//! # Ok::<(), simple_fsm::core::FsmError>(())
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod runtime;

// Re-export commonly used types
pub use crate::builder::{BuildError, FsmBuilder, StateBuilder, TransitionBuilder};
pub use crate::config::MachineConfig;
pub use crate::core::{FsmError, Guard, State, StateBehaviour};
pub use crate::runtime::{Machine, Phase};
