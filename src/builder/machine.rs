//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::builder::state::StateBuilder;
use crate::builder::transition::{TransitionBuilder, TransitionDef};
use crate::config::MachineConfig;
use crate::runtime::Machine;

/// Builder for constructing state machines with a fluent API.
///
/// Declarations are only collected here; [`build`](FsmBuilder::build)
/// replays them, in declaration order, as the machine's own registration
/// calls. Each state's inline transitions are registered right after it,
/// followed by the standalone transitions.
///
/// A builder created with [`with_context`](FsmBuilder::with_context) hands
/// its context to the machine it builds.
///
/// # Example
///
/// ```rust
/// use simple_fsm::builder::{FsmBuilder, StateBuilder};
///
/// let machine = FsmBuilder::<String>::new()
///     .state(StateBuilder::initial("init").goes_to("finish"))
///     .state(StateBuilder::finish("finish"))
///     .create()?;
///
/// assert_eq!(machine.current_state().map(|s| s.name()), Some("init"));
/// # Ok::<(), simple_fsm::builder::BuildError>(())
/// ```
pub struct FsmBuilder<E, C = ()> {
    config: MachineConfig,
    context: C,
    states: Vec<StateBuilder<E, C>>,
    transitions: Vec<TransitionBuilder<E, C>>,
}

impl<E: 'static> FsmBuilder<E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default())
    }

    /// Create a builder for a machine with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::with_config(MachineConfig::new(name))
    }

    /// Create a builder for a machine with the given configuration.
    pub fn with_config(config: MachineConfig) -> Self {
        Self::with_config_and_context(config, ())
    }
}

impl<E: 'static, C: 'static> FsmBuilder<E, C> {
    /// Create a builder whose machine carries `context`.
    pub fn with_context(context: C) -> Self {
        Self::with_config_and_context(MachineConfig::default(), context)
    }

    /// Create a builder from a configuration and a context.
    pub fn with_config_and_context(config: MachineConfig, context: C) -> Self {
        Self {
            config,
            context,
            states: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Declare a state.
    pub fn state(mut self, state: StateBuilder<E, C>) -> Self {
        self.states.push(state);
        self
    }

    /// Declare a transition.
    pub fn transition(mut self, transition: TransitionBuilder<E, C>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Register everything on a fresh machine without arming it.
    pub fn build(self) -> Result<Machine<E, C>, BuildError> {
        let mut machine = Machine::with_config_and_context(self.config, self.context);

        for builder in self.states {
            let (state, is_initial, transitions) = builder.into_parts();
            machine.register_state(state, is_initial)?;
            for transition in transitions {
                register(&mut machine, transition)?;
            }
        }
        for builder in self.transitions {
            register(&mut machine, builder.build()?)?;
        }

        Ok(machine)
    }

    /// Build the machine and arm it at its initial state.
    pub fn create(self) -> Result<Machine<E, C>, BuildError> {
        let mut machine = self.build()?;
        machine.init()?;
        Ok(machine)
    }

    /// Build the machine and arm it at the named state.
    pub fn starting_at(self, name: &str) -> Result<Machine<E, C>, BuildError> {
        let mut machine = self.build()?;
        machine.start_at(name)?;
        Ok(machine)
    }
}

impl<E: 'static> Default for FsmBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

fn register<E, C>(
    machine: &mut Machine<E, C>,
    transition: TransitionDef<E, C>,
) -> Result<(), BuildError> {
    machine.add_transition_with(transition.from, transition.to, transition.guard)?;
    Ok(())
}
