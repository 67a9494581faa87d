//! Machine runtime.
//!
//! The runtime owns the state registry and the transition table, keeps the
//! current/previous state, and performs the hook handshake around every
//! transition:
//!
//! `A.before_event` (on entry) → `A.on_event` → `A.after_event` →
//! resolution → `B.before_event`
//!
//! A finish state gets `before_event` and `on_event`, after which the
//! machine is done; its `after_event` never fires.

mod machine;

pub use machine::{Machine, Phase};
