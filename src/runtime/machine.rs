//! The machine runtime: arming, event processing and the hook handshake.

use crate::config::MachineConfig;
use crate::core::{
    FsmError, Guard, Result, State, StateHistory, StateRegistry, StateTransition,
    TransitionTable,
};
use chrono::Utc;
use std::fmt;
use tracing::{debug, info, trace, warn};
use uuid::Uuid;

/// Machine-level lifecycle, distinct from the user's states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No current state yet; `init` has not been called
    Unarmed,
    /// A current state is set and events are processed
    Armed,
    /// A finish state completed its processing; events are ignored
    Finished,
}

/// A finite state machine driven one event at a time.
///
/// States and transitions are registered first, then the machine is armed
/// with [`init`](Machine::init) and advanced with
/// [`process`](Machine::process). For every transition `A -> B` the hooks
/// fire as `A.on_event`, `A.after_event`, `B.before_event`.
///
/// The second type parameter is a caller-owned context. Guards and hooks
/// read it through [`context`](Machine::context); the caller updates it
/// between events through [`context_mut`](Machine::context_mut). Machines
/// created with [`new`](Machine::new) carry the unit context.
///
/// # Example
///
/// ```rust
/// use simple_fsm::core::State;
/// use simple_fsm::runtime::Machine;
///
/// let mut machine = Machine::<String>::new();
/// machine.add_initial_state(State::new("greeting"))?;
/// machine.add_state(State::finish("hello"))?;
/// machine.add_state(State::finish("bye"))?;
/// machine.add_guarded_transition("greeting", "hello", |_, cmd: &String| cmd == "hello")?;
/// machine.add_guarded_transition("greeting", "bye", |_, cmd: &String| cmd == "bye")?;
///
/// machine.init()?;
/// machine.process(&"hello".to_string())?;
///
/// assert_eq!(machine.current_state().map(|s| s.name()), Some("hello"));
/// assert_eq!(machine.previous_state().map(|s| s.name()), Some("greeting"));
/// # Ok::<(), simple_fsm::core::FsmError>(())
/// ```
pub struct Machine<E, C = ()> {
    id: Uuid,
    name: String,
    context: C,
    registry: StateRegistry<E, C>,
    transitions: TransitionTable<E, C>,
    current: Option<String>,
    previous: Option<String>,
    done: bool,
    locked: bool,
    steps: u64,
    history: StateHistory,
}

impl<E> Machine<E> {
    /// Create an empty, unarmed machine with default settings.
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default())
    }

    /// Create an empty machine with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::with_config(MachineConfig::new(name))
    }

    /// Create an empty machine with the given name and history limit.
    pub fn with_config(config: MachineConfig) -> Self {
        Self::with_config_and_context(config, ())
    }
}

impl<E, C> Machine<E, C> {
    /// Create an empty machine carrying `context`, with default settings.
    pub fn with_context(context: C) -> Self {
        Self::with_config_and_context(MachineConfig::default(), context)
    }

    /// Create an empty machine from a configuration and a context.
    pub fn with_config_and_context(config: MachineConfig, context: C) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: config.name,
            context,
            registry: StateRegistry::new(),
            transitions: TransitionTable::new(),
            current: None,
            previous: None,
            done: false,
            locked: false,
            steps: 0,
            history: StateHistory::with_limit(config.history_limit),
        }
    }

    /// Unique id of this instance, attached to every log event.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Human-readable name from the configuration.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The caller-owned context.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Mutable access to the caller-owned context.
    ///
    /// Hooks only ever see the machine by shared reference, so the context
    /// changes between `process` calls, never during one.
    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// Consume the machine, returning its context.
    pub fn into_context(self) -> C {
        self.context
    }

    // ---------------- Registration ----------------

    /// Register a state, optionally designating it as the initial one.
    pub fn register_state(&mut self, state: State<E, C>, is_initial: bool) -> Result<()> {
        self.ensure_unlocked()?;
        trace!(machine = %self.id, state = %state.name(), is_initial, "registering state");
        let replaced = self.registry.initial().map(str::to_string);
        let name = state.name().to_string();
        self.registry.register(state, is_initial)?;
        if let Some(previous) = replaced.filter(|_| is_initial) {
            debug!(machine = %self.id, previous = %previous, initial = %name, "initial state replaced");
        }
        Ok(())
    }

    /// Register the initial state.
    pub fn add_initial_state(&mut self, state: State<E, C>) -> Result<()> {
        self.register_state(state, true)
    }

    /// Register a non-initial state.
    pub fn add_state(&mut self, state: State<E, C>) -> Result<()> {
        self.register_state(state, false)
    }

    /// Register an unconditional transition `from -> to`.
    pub fn add_transition(&mut self, from: impl Into<String>, to: impl Into<String>) -> Result<()> {
        self.add_transition_with(from, to, None)
    }

    /// Register a transition `from -> to` guarded by `predicate`.
    pub fn add_guarded_transition<F>(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        predicate: F,
    ) -> Result<()>
    where
        F: Fn(&Machine<E, C>, &E) -> bool + Send + Sync + 'static,
    {
        self.add_transition_with(from, to, Some(Guard::new(predicate)))
    }

    /// Register a transition `from -> to` with an optional guard.
    pub fn add_transition_with(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        guard: Option<Guard<E, C>>,
    ) -> Result<()> {
        self.ensure_unlocked()?;
        self.transitions.add(from, to, guard)
    }

    /// Register `state` and a transition leading into it from `from`.
    ///
    /// Nothing is registered when either half would fail.
    pub fn add_transition_into(
        &mut self,
        from: impl Into<String>,
        state: State<E, C>,
        guard: Option<Guard<E, C>>,
    ) -> Result<()> {
        self.ensure_unlocked()?;
        let from = from.into();
        if self.transitions.contains(&from, state.name()) {
            return Err(FsmError::DuplicateTransition {
                from,
                to: state.name().to_string(),
            });
        }
        let to = state.name().to_string();
        self.registry.register(state, false)?;
        self.transitions.add(from, to, guard)
    }

    fn ensure_unlocked(&self) -> Result<()> {
        if self.locked {
            return Err(FsmError::RegistrationLocked);
        }
        Ok(())
    }

    // ---------------- Lifecycle ----------------

    /// Arm the machine at its initial state.
    ///
    /// Fires the initial state's `before_event`. Calling `init` again
    /// re-arms the machine from the initial state.
    pub fn init(&mut self) -> Result<()> {
        let initial = self
            .registry
            .initial()
            .ok_or(FsmError::NotInitialized)?
            .to_string();
        self.arm(initial)
    }

    /// Arm the machine at an arbitrary registered state.
    ///
    /// Behaves like [`init`](Machine::init) otherwise, including the
    /// `before_event` of the chosen state.
    pub fn start_at(&mut self, name: &str) -> Result<()> {
        self.registry.lookup(name)?;
        self.arm(name.to_string())
    }

    fn arm(&mut self, state: String) -> Result<()> {
        self.previous = None;
        self.done = false;
        self.locked = true;
        self.steps = 0;
        self.history.clear();
        info!(machine = %self.id, name = %self.name, state = %state, "state machine armed");
        self.current = Some(state);

        self.enter_current()
    }

    /// Feed one event to the machine.
    ///
    /// Once a finish state has processed an event the machine is done and
    /// further calls return `Ok(())` without touching anything. On error the
    /// machine stays in its current state; hook side effects that already
    /// ran are not undone.
    pub fn process(&mut self, event: &E) -> Result<()> {
        if self.done {
            trace!(machine = %self.id, "machine finished, event ignored");
            return Ok(());
        }
        let from = self.current.clone().ok_or(FsmError::NotInitialized)?;

        let is_finish = {
            let state = self.registry.lookup(&from)?;
            trace!(machine = %self.id, state = %from, "on_event");
            state.on_event(self, event);
            state.is_finish()
        };
        if is_finish {
            self.done = true;
            debug!(machine = %self.id, state = %from, "finish state reached");
            return Ok(());
        }

        trace!(machine = %self.id, state = %from, "after_event");
        self.registry.lookup(&from)?.after_event(self);

        let to = self
            .transitions
            .resolve(&from, self, event)
            .and_then(|to| self.registry.lookup(&to).map(|_| to))
            .inspect_err(|err| warn!(machine = %self.id, from = %from, error = %err, "transition failed"))?;

        self.steps += 1;
        self.history.record(StateTransition {
            from: from.clone(),
            to: to.clone(),
            step: self.steps,
            timestamp: Utc::now(),
        });
        debug!(machine = %self.id, from = %from, to = %to, step = self.steps, "transition");
        self.previous = self.current.replace(to);

        self.enter_current()
    }

    fn enter_current(&self) -> Result<()> {
        let name = self.current.as_deref().ok_or(FsmError::NotInitialized)?;
        let state = self.registry.lookup(name)?;
        trace!(machine = %self.id, state = %name, "before_event");
        state.before_event(self);
        Ok(())
    }

    // ---------------- Inspection ----------------

    /// The state the machine is in, `None` before arming.
    pub fn current_state(&self) -> Option<&State<E, C>> {
        self.current
            .as_deref()
            .and_then(|name| self.registry.lookup(name).ok())
    }

    /// The state the last transition left, `None` right after arming.
    pub fn previous_state(&self) -> Option<&State<E, C>> {
        self.previous
            .as_deref()
            .and_then(|name| self.registry.lookup(name).ok())
    }

    /// Look up any registered state.
    pub fn state(&self, name: &str) -> Result<&State<E, C>> {
        self.registry.lookup(name)
    }

    /// Whether a finish state has completed its processing.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Lifecycle phase derived from the current state and the done flag.
    pub fn phase(&self) -> Phase {
        match (&self.current, self.done) {
            (None, _) => Phase::Unarmed,
            (Some(_), false) => Phase::Armed,
            (Some(_), true) => Phase::Finished,
        }
    }

    /// The registered states.
    pub fn registry(&self) -> &StateRegistry<E, C> {
        &self.registry
    }

    /// The registered transition rules.
    pub fn transitions(&self) -> &TransitionTable<E, C> {
        &self.transitions
    }

    /// Transitions taken since the machine was last armed.
    pub fn history(&self) -> &StateHistory {
        &self.history
    }
}

impl<E, C: Default> Default for Machine<E, C> {
    fn default() -> Self {
        Self::with_context(C::default())
    }
}

impl<E, C> fmt::Debug for Machine<E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("states", &self.registry.names())
            .field("current", &self.current)
            .field("previous", &self.previous)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}
