//! Name-keyed storage of the machine's states.

use super::error::{FsmError, Result};
use super::state::State;
use std::collections::HashMap;

/// Owns every registered state and remembers which one is initial.
pub struct StateRegistry<E, C = ()> {
    states: HashMap<String, State<E, C>>,
    initial: Option<String>,
}

impl<E, C> StateRegistry<E, C> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
            initial: None,
        }
    }

    /// Register a state, optionally designating it as the initial one.
    ///
    /// A later initial designation replaces an earlier one.
    pub fn register(&mut self, state: State<E, C>, is_initial: bool) -> Result<()> {
        if self.states.contains_key(state.name()) {
            return Err(FsmError::DuplicateState {
                name: state.name().to_string(),
            });
        }

        let name = state.name().to_string();
        if is_initial {
            self.initial = Some(name.clone());
        }
        self.states.insert(name, state);
        Ok(())
    }

    /// Look up a registered state by name.
    pub fn lookup(&self, name: &str) -> Result<&State<E, C>> {
        self.states.get(name).ok_or_else(|| FsmError::UnknownState {
            name: name.to_string(),
        })
    }

    /// Whether a state with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    /// Name of the initial state, if one was designated.
    pub fn initial(&self) -> Option<&str> {
        self.initial.as_deref()
    }

    /// Registered state names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.states.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl<E, C> Default for StateRegistry<E, C> {
    fn default() -> Self {
        Self::new()
    }
}
