//! Guard predicates for controlling state transitions.
//!
//! A guard decides whether a transition rule is eligible for the event
//! being processed. Guards read the machine and the event; they never
//! mutate either.

use crate::runtime::Machine;
use std::fmt;
use std::sync::Arc;

/// Predicate over `(machine, event)` deciding a transition's eligibility.
///
/// Guards on rules leaving the same state are expected to be mutually
/// exclusive; the engine reports overlapping guards as an ambiguity
/// instead of picking one. The machine argument also exposes the caller's
/// context through [`Machine::context`].
///
/// # Example
///
/// ```rust
/// use simple_fsm::core::Guard;
/// use simple_fsm::runtime::Machine;
///
/// let is_hello = Guard::new(|_: &Machine<String>, event: &String| {
///     event.eq_ignore_ascii_case("hello")
/// });
///
/// let machine = Machine::new();
/// assert!(is_hello.check(&machine, &"HELLO".to_string()));
/// assert!(!is_hello.check(&machine, &"bye".to_string()));
/// ```
pub struct Guard<E, C = ()> {
    predicate: Arc<dyn Fn(&Machine<E, C>, &E) -> bool + Send + Sync>,
}

impl<E, C> Guard<E, C> {
    /// Create a guard from a predicate.
    ///
    /// The predicate should be deterministic for a given machine and event.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Machine<E, C>, &E) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Guard that only looks at the event.
    pub fn on_event<F>(predicate: F) -> Self
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        Self::new(move |_, event| predicate(event))
    }

    /// Check whether the guard admits the transition.
    pub fn check(&self, machine: &Machine<E, C>, event: &E) -> bool {
        (self.predicate)(machine, event)
    }
}

impl<E, C> Clone for Guard<E, C> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<E, C> fmt::Debug for Guard<E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_checks_event() {
        let guard = Guard::new(|_: &Machine<u32>, event: &u32| *event > 10);
        let machine = Machine::new();

        assert!(guard.check(&machine, &11));
        assert!(!guard.check(&machine, &10));
    }

    #[test]
    fn guard_can_read_machine() {
        let guard = Guard::new(|machine: &Machine<u32>, _: &u32| machine.current_state().is_none());
        let machine = Machine::new();

        assert!(guard.check(&machine, &0));
    }

    #[test]
    fn event_only_guard() {
        let guard = Guard::on_event(|event: &String| event.is_empty());
        let machine = Machine::new();

        assert!(guard.check(&machine, &String::new()));
        assert!(!guard.check(&machine, &"x".to_string()));
    }

    #[test]
    fn guard_is_deterministic() {
        let guard = Guard::new(|_: &Machine<u32>, event: &u32| event % 2 == 0);
        let machine = Machine::new();

        assert_eq!(guard.check(&machine, &4), guard.check(&machine, &4));
    }

    #[test]
    fn guard_reads_caller_context() {
        let guard = Guard::new(|machine: &Machine<u32, u32>, event: &u32| {
            *event >= *machine.context()
        });
        let mut machine = Machine::with_context(5);

        assert!(!guard.check(&machine, &4));
        *machine.context_mut() = 3;
        assert!(guard.check(&machine, &4));
    }

    #[test]
    fn cloned_guard_shares_predicate() {
        let guard = Guard::on_event(|event: &u32| *event == 3);
        let cloned = guard.clone();
        let machine = Machine::new();

        assert!(cloned.check(&machine, &3));
        assert!(!cloned.check(&machine, &4));
    }
}
