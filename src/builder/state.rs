//! Builder for declaring states with their hooks.

use crate::builder::transition::TransitionDef;
use crate::core::{Guard, HandlerBehaviour, State, StateBehaviour};
use crate::runtime::Machine;

/// Role a declared state plays in the machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateKind {
    Initial,
    Plain,
    Finish,
}

/// Builder for a single state.
///
/// Hooks set with `on_before`/`on_after`/`on_process` are ignored once a
/// full behaviour is supplied with [`behaviour`](StateBuilder::behaviour).
pub struct StateBuilder<E, C = ()> {
    name: String,
    kind: StateKind,
    handlers: HandlerBehaviour<E, C>,
    behaviour: Option<Box<dyn StateBehaviour<E, C>>>,
    transitions: Vec<TransitionDef<E, C>>,
}

impl<E, C> StateBuilder<E, C> {
    fn with_kind(name: impl Into<String>, kind: StateKind) -> Self {
        Self {
            name: name.into(),
            kind,
            handlers: HandlerBehaviour::new(),
            behaviour: None,
            transitions: Vec::new(),
        }
    }

    /// Declare the initial state.
    pub fn initial(name: impl Into<String>) -> Self {
        Self::with_kind(name, StateKind::Initial)
    }

    /// Declare an intermediate state.
    pub fn state(name: impl Into<String>) -> Self {
        Self::with_kind(name, StateKind::Plain)
    }

    /// Declare a finish state.
    pub fn finish(name: impl Into<String>) -> Self {
        Self::with_kind(name, StateKind::Finish)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> StateKind {
        self.kind
    }

    /// Hook run when the machine enters the state.
    pub fn on_before<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Machine<E, C>) + Send + Sync + 'static,
    {
        self.handlers = self.handlers.before(handler);
        self
    }

    /// Hook run right before the machine leaves the state.
    pub fn on_after<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Machine<E, C>) + Send + Sync + 'static,
    {
        self.handlers = self.handlers.after(handler);
        self
    }

    /// Hook processing each event delivered while in the state.
    pub fn on_process<F>(mut self, processor: F) -> Self
    where
        F: Fn(&Machine<E, C>, &E) + Send + Sync + 'static,
    {
        self.handlers = self.handlers.processor(processor);
        self
    }

    /// Use a full behaviour implementation instead of closures.
    pub fn behaviour<B>(mut self, behaviour: B) -> Self
    where
        B: StateBehaviour<E, C> + 'static,
    {
        self.behaviour = Some(Box::new(behaviour));
        self
    }

    /// Declare an unconditional transition from this state.
    pub fn goes_to(mut self, to: impl Into<String>) -> Self {
        self.transitions.push(TransitionDef {
            from: self.name.clone(),
            to: to.into(),
            guard: None,
        });
        self
    }

    /// Declare a guarded transition from this state.
    pub fn goes_to_when<F>(mut self, to: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Machine<E, C>, &E) -> bool + Send + Sync + 'static,
    {
        self.transitions.push(TransitionDef {
            from: self.name.clone(),
            to: to.into(),
            guard: Some(Guard::new(predicate)),
        });
        self
    }

    pub(crate) fn into_parts(self) -> (State<E, C>, bool, Vec<TransitionDef<E, C>>)
    where
        E: 'static,
        C: 'static,
    {
        let state = match self.kind {
            StateKind::Finish => State::finish(self.name),
            StateKind::Initial | StateKind::Plain => State::new(self.name),
        };
        let state = match self.behaviour {
            Some(behaviour) => state.with_boxed_behaviour(behaviour),
            None => state.with_behaviour(self.handlers),
        };
        (state, self.kind == StateKind::Initial, self.transitions)
    }
}
