//! States and their lifecycle hooks.
//!
//! A state is a named node with a finish flag and a behaviour. The
//! behaviour is the capability set `{before_event, on_event, after_event}`;
//! any of the three may be left at its no-op default.

use crate::runtime::Machine;
use std::fmt;

/// Lifecycle hooks invoked by the machine around a state.
///
/// Every hook receives a shared reference to the running machine, so a
/// hook can inspect `current_state()`, `previous_state()` and the caller's
/// `context()` but never mutate the machine. Side effects go through state
/// the caller shares with the hook (atomics, `Mutex`, channels).
///
/// # Example
///
/// ```rust
/// use simple_fsm::core::{State, StateBehaviour};
/// use simple_fsm::runtime::Machine;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// struct Counter(Arc<AtomicUsize>);
///
/// impl StateBehaviour<String> for Counter {
///     fn on_event(&self, _machine: &Machine<String>, _event: &String) {
///         self.0.fetch_add(1, Ordering::SeqCst);
///     }
/// }
///
/// let hits = Arc::new(AtomicUsize::new(0));
/// let state: State<String> = State::new("counting").with_behaviour(Counter(hits.clone()));
/// assert_eq!(state.name(), "counting");
/// ```
pub trait StateBehaviour<E, C = ()>: Send + Sync {
    /// Called when the machine enters this state.
    fn before_event(&self, _machine: &Machine<E, C>) {}

    /// Called right before the machine leaves this state.
    ///
    /// Never called for finish states.
    fn after_event(&self, _machine: &Machine<E, C>) {}

    /// The state's own processing of the current event.
    fn on_event(&self, _machine: &Machine<E, C>, _event: &E) {}
}

/// Behaviour with no hooks at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBehaviour;

impl<E, C> StateBehaviour<E, C> for NoopBehaviour {}

/// Enter/exit hook closure.
pub type StateHandler<E, C = ()> = Box<dyn Fn(&Machine<E, C>) + Send + Sync>;

/// Event processing closure.
pub type StateProcessor<E, C = ()> = Box<dyn Fn(&Machine<E, C>, &E) + Send + Sync>;

/// Behaviour assembled from optional closures.
pub struct HandlerBehaviour<E, C = ()> {
    before: Option<StateHandler<E, C>>,
    after: Option<StateHandler<E, C>>,
    processor: Option<StateProcessor<E, C>>,
}

impl<E, C> HandlerBehaviour<E, C> {
    /// Behaviour with every hook left empty.
    pub fn new() -> Self {
        Self {
            before: None,
            after: None,
            processor: None,
        }
    }

    /// Set the enter hook.
    pub fn before<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Machine<E, C>) + Send + Sync + 'static,
    {
        self.before = Some(Box::new(handler));
        self
    }

    /// Set the exit hook.
    pub fn after<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Machine<E, C>) + Send + Sync + 'static,
    {
        self.after = Some(Box::new(handler));
        self
    }

    /// Set the event processor.
    pub fn processor<F>(mut self, processor: F) -> Self
    where
        F: Fn(&Machine<E, C>, &E) + Send + Sync + 'static,
    {
        self.processor = Some(Box::new(processor));
        self
    }
}

impl<E, C> Default for HandlerBehaviour<E, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, C> StateBehaviour<E, C> for HandlerBehaviour<E, C> {
    fn before_event(&self, machine: &Machine<E, C>) {
        if let Some(handler) = &self.before {
            handler(machine);
        }
    }

    fn after_event(&self, machine: &Machine<E, C>) {
        if let Some(handler) = &self.after {
            handler(machine);
        }
    }

    fn on_event(&self, machine: &Machine<E, C>, event: &E) {
        if let Some(processor) = &self.processor {
            processor(machine, event);
        }
    }
}

/// A named node of the machine.
///
/// Identity (`name`, `is_finish`) is fixed at construction. Once registered,
/// the state is owned by the machine's registry.
pub struct State<E, C = ()> {
    name: String,
    is_finish: bool,
    behaviour: Box<dyn StateBehaviour<E, C>>,
}

impl<E, C> State<E, C> {
    /// Create a plain (non-finish) state with no-op hooks.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_finish: false,
            behaviour: Box::new(NoopBehaviour),
        }
    }

    /// Create a finish state with no-op hooks.
    pub fn finish(name: impl Into<String>) -> Self {
        Self {
            is_finish: true,
            ..Self::new(name)
        }
    }

    /// Replace the state's behaviour.
    pub fn with_behaviour<B>(mut self, behaviour: B) -> Self
    where
        B: StateBehaviour<E, C> + 'static,
    {
        self.behaviour = Box::new(behaviour);
        self
    }

    /// Replace the state's behaviour with an already boxed one.
    pub fn with_boxed_behaviour(mut self, behaviour: Box<dyn StateBehaviour<E, C>>) -> Self {
        self.behaviour = behaviour;
        self
    }

    /// The state's unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether reaching this state ends the machine's processing.
    pub fn is_finish(&self) -> bool {
        self.is_finish
    }

    pub(crate) fn before_event(&self, machine: &Machine<E, C>) {
        self.behaviour.before_event(machine);
    }

    pub(crate) fn after_event(&self, machine: &Machine<E, C>) {
        self.behaviour.after_event(machine);
    }

    pub(crate) fn on_event(&self, machine: &Machine<E, C>, event: &E) {
        self.behaviour.on_event(machine, event);
    }
}

impl<E, C> fmt::Debug for State<E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("name", &self.name)
            .field("is_finish", &self.is_finish)
            .finish_non_exhaustive()
    }
}

impl<E, C> fmt::Display for State<E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
