//! Bounded record of the transitions a machine has taken.
//!
//! History is kept for in-memory diagnostics only; it is serializable so it
//! can be attached to logs or reports, but it is never replayed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single state transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being transitioned from
    pub from: String,
    /// The state being transitioned to
    pub to: String,
    /// Sequence number of the transition since the machine was armed (1-based)
    pub step: u64,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of state transitions, holding at most `limit` entries.
///
/// When full, the oldest transition is dropped. A limit of zero disables
/// recording altogether.
///
/// # Example
///
/// ```rust
/// use simple_fsm::core::{StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let mut history = StateHistory::with_limit(8);
/// history.record(StateTransition {
///     from: "start".to_string(),
///     to: "middle".to_string(),
///     step: 1,
///     timestamp: Utc::now(),
/// });
/// history.record(StateTransition {
///     from: "middle".to_string(),
///     to: "end".to_string(),
///     step: 2,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec!["start", "middle", "end"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory {
    limit: usize,
    transitions: VecDeque<StateTransition>,
}

impl StateHistory {
    /// Default number of transitions kept.
    pub const DEFAULT_LIMIT: usize = 64;

    pub fn new() -> Self {
        Self::with_limit(Self::DEFAULT_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            transitions: VecDeque::new(),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Record a transition, evicting the oldest one when full.
    pub fn record(&mut self, transition: StateTransition) {
        if self.limit == 0 {
            return;
        }
        while self.transitions.len() >= self.limit {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Forget every recorded transition.
    pub fn clear(&mut self) {
        self.transitions.clear();
    }

    /// Names of the states traversed: the first recorded `from`, then the
    /// `to` of each transition.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(first.from.as_str());
        }
        path.extend(self.transitions.iter().map(|t| t.to.as_str()));
        path
    }

    /// Time between the first and last recorded transition.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.front()?, self.transitions.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn transitions(&self) -> impl ExactSizeIterator<Item = &StateTransition> {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&StateTransition> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

impl Default for StateHistory {
    fn default() -> Self {
        Self::new()
    }
}
