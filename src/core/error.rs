//! Errors raised by state registration and transition resolution.

use thiserror::Error;

/// Convenient result alias for engine operations.
pub type Result<T> = std::result::Result<T, FsmError>;

/// Configuration and protocol violations reported by the engine.
///
/// None of these are transient: retrying the same call with the same
/// configuration and event yields the same error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FsmError {
    #[error("State '{name}' is already registered")]
    DuplicateState { name: String },

    #[error("Transition '{from}' -> '{to}' is already registered")]
    DuplicateTransition { from: String, to: String },

    #[error("State '{name}' is not registered")]
    UnknownState { name: String },

    #[error("State machine is not initialized")]
    NotInitialized,

    #[error("No transitions registered from state '{from}'")]
    NoTransitions { from: String },

    #[error("No eligible transition from state '{from}'")]
    NoEligibleTransition { from: String },

    #[error("Ambiguous transition from state '{from}'. Candidates are: {}", .candidates.join(", "))]
    AmbiguousTransition {
        from: String,
        candidates: Vec<String>,
    },

    #[error("States and transitions cannot be registered once the machine is armed")]
    RegistrationLocked,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguous_message_lists_candidates() {
        let err = FsmError::AmbiguousTransition {
            from: "init".to_string(),
            candidates: vec!["a".to_string(), "b".to_string()],
        };

        assert_eq!(
            err.to_string(),
            "Ambiguous transition from state 'init'. Candidates are: a, b"
        );
    }

    #[test]
    fn duplicate_transition_names_both_ends() {
        let err = FsmError::DuplicateTransition {
            from: "x".to_string(),
            to: "y".to_string(),
        };

        assert_eq!(err.to_string(), "Transition 'x' -> 'y' is already registered");
    }
}
