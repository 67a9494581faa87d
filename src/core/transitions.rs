//! Transition table and next-state resolution.

use super::error::{FsmError, Result};
use super::guard::Guard;
use crate::runtime::Machine;
use serde::Serialize;
use std::collections::HashMap;

/// A directed edge to `to`, optionally guarded.
pub struct TransitionRule<E, C = ()> {
    to: String,
    guard: Option<Guard<E, C>>,
}

impl<E, C> TransitionRule<E, C> {
    /// Name of the destination state.
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Whether the rule carries a guard.
    pub fn is_guarded(&self) -> bool {
        self.guard.is_some()
    }

    /// Check if this rule is a candidate for the event.
    ///
    /// Rules without a guard are always candidates.
    pub fn admits(&self, machine: &Machine<E, C>, event: &E) -> bool {
        self.guard.as_ref().is_none_or(|g| g.check(machine, event))
    }
}

/// Flat description of one registered edge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransitionEdge {
    pub from: String,
    pub to: String,
    pub guarded: bool,
}

/// Outgoing rules per source-state name, in declaration order.
///
/// Names are resolved against the state registry only when a rule is
/// selected, so rules may mention states that are registered later.
pub struct TransitionTable<E, C = ()> {
    rules: HashMap<String, Vec<TransitionRule<E, C>>>,
}

impl<E, C> TransitionTable<E, C> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Store the rule `from -> to`.
    ///
    /// Each ordered pair may only be registered once, guarded or not.
    pub fn add(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        guard: Option<Guard<E, C>>,
    ) -> Result<()> {
        let from = from.into();
        let to = to.into();
        let outgoing = self.rules.entry(from.clone()).or_default();
        if outgoing.iter().any(|rule| rule.to == to) {
            return Err(FsmError::DuplicateTransition { from, to });
        }
        outgoing.push(TransitionRule { to, guard });
        Ok(())
    }

    /// Determine the single destination eligible for `event` from `from`.
    ///
    /// Every rule is evaluated; more than one candidate is an error rather
    /// than a first-match, so overlapping guards surface deterministically.
    pub fn resolve(&self, from: &str, machine: &Machine<E, C>, event: &E) -> Result<String> {
        let outgoing = match self.rules.get(from) {
            Some(outgoing) if !outgoing.is_empty() => outgoing,
            _ => {
                return Err(FsmError::NoTransitions {
                    from: from.to_string(),
                })
            }
        };

        let mut candidates: Vec<String> = outgoing
            .iter()
            .filter(|rule| rule.admits(machine, event))
            .map(|rule| rule.to.clone())
            .collect();

        match candidates.len() {
            0 => Err(FsmError::NoEligibleTransition {
                from: from.to_string(),
            }),
            1 => Ok(candidates.remove(0)),
            _ => Err(FsmError::AmbiguousTransition {
                from: from.to_string(),
                candidates,
            }),
        }
    }

    /// Rules leaving `from`, in declaration order.
    pub fn outgoing(&self, from: &str) -> &[TransitionRule<E, C>] {
        self.rules.get(from).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether a rule `from -> to` is registered.
    pub fn contains(&self, from: &str, to: &str) -> bool {
        self.outgoing(from).iter().any(|rule| rule.to == to)
    }

    /// Every registered edge, sorted by source then declaration order.
    pub fn edges(&self) -> Vec<TransitionEdge> {
        let mut sources: Vec<&String> = self.rules.keys().collect();
        sources.sort_unstable();

        sources
            .into_iter()
            .flat_map(|from| {
                self.rules[from].iter().map(move |rule| TransitionEdge {
                    from: from.clone(),
                    to: rule.to.clone(),
                    guarded: rule.is_guarded(),
                })
            })
            .collect()
    }

    /// Total number of rules across all sources.
    pub fn len(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E, C> Default for TransitionTable<E, C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always() -> Option<Guard<u32>> {
        Some(Guard::on_event(|_| true))
    }

    fn never() -> Option<Guard<u32>> {
        Some(Guard::on_event(|_| false))
    }

    #[test]
    fn duplicate_pair_is_rejected() {
        let mut table: TransitionTable<u32> = TransitionTable::new();
        table.add("x", "y", None).unwrap();

        assert_eq!(
            table.add("x", "y", always()).unwrap_err(),
            FsmError::DuplicateTransition {
                from: "x".to_string(),
                to: "y".to_string()
            }
        );
        assert!(table.add("x", "z", None).is_ok());
        assert!(table.add("y", "x", None).is_ok());
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn resolve_without_rules_fails() {
        let table: TransitionTable<u32> = TransitionTable::new();
        let machine = Machine::new();

        assert_eq!(
            table.resolve("lonely", &machine, &0).unwrap_err(),
            FsmError::NoTransitions {
                from: "lonely".to_string()
            }
        );
    }

    #[test]
    fn resolve_unguarded_rule() {
        let mut table = TransitionTable::new();
        table.add("a", "b", None).unwrap();
        let machine = Machine::new();

        assert_eq!(table.resolve("a", &machine, &0).unwrap(), "b");
    }

    #[test]
    fn resolve_picks_only_admitted_rule() {
        let mut table = TransitionTable::new();
        table.add("init", "a", never()).unwrap();
        table.add("init", "b", always()).unwrap();
        let machine = Machine::new();

        assert_eq!(table.resolve("init", &machine, &0).unwrap(), "b");
    }

    #[test]
    fn resolve_with_no_admitted_rule_fails() {
        let mut table = TransitionTable::new();
        table.add("init", "a", never()).unwrap();
        table.add("init", "b", never()).unwrap();
        let machine = Machine::new();

        assert_eq!(
            table.resolve("init", &machine, &0).unwrap_err(),
            FsmError::NoEligibleTransition {
                from: "init".to_string()
            }
        );
    }

    #[test]
    fn resolve_reports_every_candidate() {
        let mut table = TransitionTable::new();
        table.add("init", "a", None).unwrap();
        table.add("init", "b", never()).unwrap();
        table.add("init", "c", always()).unwrap();
        table.add("init", "d", Some(Guard::on_event(|e: &u32| *e > 5))).unwrap();
        let machine = Machine::new();

        assert_eq!(
            table.resolve("init", &machine, &9).unwrap_err(),
            FsmError::AmbiguousTransition {
                from: "init".to_string(),
                candidates: vec!["a".to_string(), "c".to_string(), "d".to_string()],
            }
        );
        assert!(matches!(
            table.resolve("init", &machine, &1),
            Err(FsmError::AmbiguousTransition { candidates, .. }) if candidates.len() == 2
        ));
    }

    #[test]
    fn guards_see_the_event() {
        let mut table = TransitionTable::new();
        table.add("n", "even", Some(Guard::on_event(|e: &u32| e % 2 == 0))).unwrap();
        table.add("n", "odd", Some(Guard::on_event(|e: &u32| e % 2 == 1))).unwrap();
        let machine = Machine::new();

        assert_eq!(table.resolve("n", &machine, &2).unwrap(), "even");
        assert_eq!(table.resolve("n", &machine, &3).unwrap(), "odd");
    }

    #[test]
    fn edges_list_all_rules() {
        let mut table = TransitionTable::new();
        table.add("b", "c", None).unwrap();
        table.add("a", "b", always()).unwrap();
        table.add("a", "c", None).unwrap();

        let edges = table.edges();
        let expected = [("a", "b", true), ("a", "c", false), ("b", "c", false)];
        assert_eq!(edges.len(), expected.len());
        for (edge, (from, to, guarded)) in edges.iter().zip(expected) {
            assert_eq!(edge.from, from);
            assert_eq!(edge.to, to);
            assert_eq!(edge.guarded, guarded);
        }
        assert!(table.contains("a", "c"));
        assert!(!table.contains("c", "a"));
        assert!(table.outgoing("c").is_empty());
    }
}
