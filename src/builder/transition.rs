//! Builder for declaring transitions.

use crate::builder::error::BuildError;
use crate::core::Guard;
use crate::runtime::Machine;

/// A validated transition declaration, ready to be registered.
pub struct TransitionDef<E, C = ()> {
    pub from: String,
    pub to: String,
    pub guard: Option<Guard<E, C>>,
}

/// Builder for declaring transitions with a fluent API.
pub struct TransitionBuilder<E, C = ()> {
    from: Option<String>,
    to: Option<String>,
    guard: Option<Guard<E, C>>,
}

impl<E, C> TransitionBuilder<E, C> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            from: None,
            to: None,
            guard: None,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: impl Into<String>) -> Self {
        self.from = Some(state.into());
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: impl Into<String>) -> Self {
        self.to = Some(state.into());
        self
    }

    /// Add a guard (optional).
    pub fn guard(mut self, guard: Guard<E, C>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Machine<E, C>, &E) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Build the transition declaration.
    pub fn build(self) -> Result<TransitionDef<E, C>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;

        Ok(TransitionDef {
            from,
            to,
            guard: self.guard,
        })
    }
}

impl<E, C> Default for TransitionBuilder<E, C> {
    fn default() -> Self {
        Self::new()
    }
}
