//! Builder API for ergonomic state machine construction.
//!
//! The builders carry no semantics of their own: they collect declarations
//! and translate them into the machine's registration calls followed by
//! `init` (or `start_at`).
//!
//! # Example
//!
//! ```rust
//! use simple_fsm::builder::{FsmBuilder, StateBuilder, TransitionBuilder};
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//!
//! let finished = Arc::new(AtomicBool::new(false));
//! let flag = finished.clone();
//!
//! let mut machine = FsmBuilder::<String>::new()
//!     .state(StateBuilder::initial("init"))
//!     .state(StateBuilder::finish("rejected"))
//!     .state(
//!         StateBuilder::finish("accepted")
//!             .on_before(move |_| flag.store(true, Ordering::SeqCst)),
//!     )
//!     .transition(
//!         TransitionBuilder::new()
//!             .from("init")
//!             .to("accepted")
//!             .when(|_, event: &String| event == "yes"),
//!     )
//!     .transition(
//!         TransitionBuilder::new()
//!             .from("init")
//!             .to("rejected")
//!             .when(|_, event: &String| event != "yes"),
//!     )
//!     .create()?;
//!
//! machine.process(&"yes".to_string())?;
//! assert!(finished.load(Ordering::SeqCst));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod machine;
pub mod state;
pub mod transition;

pub use error::BuildError;
pub use machine::FsmBuilder;
pub use state::{StateBuilder, StateKind};
pub use transition::{TransitionBuilder, TransitionDef};
