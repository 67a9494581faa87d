//! Property-based tests for transition resolution and the runtime.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated machines and event streams.

use proptest::prelude::*;
use simple_fsm::core::{FsmError, Guard, State, TransitionTable};
use simple_fsm::runtime::{Machine, Phase};

/// Linear chain `s0 -> s1 -> ... -> s{len}` where the last state finishes.
fn chain(len: usize) -> Machine<u8> {
    let mut machine = Machine::new();
    machine.add_initial_state(State::new("s0")).unwrap();
    for i in 1..=len {
        let name = format!("s{i}");
        let state = if i == len {
            State::finish(name)
        } else {
            State::new(name)
        };
        machine.add_state(state).unwrap();
        machine
            .add_transition(format!("s{}", i - 1), format!("s{i}"))
            .unwrap();
    }
    machine
}

prop_compose! {
    fn event_stream()(events in prop::collection::vec(any::<u8>(), 0..30)) -> Vec<u8> {
        events
    }
}

proptest! {
    #[test]
    fn chain_advances_one_state_per_event(len in 1usize..12, events in event_stream()) {
        let mut machine = chain(len);
        machine.init().unwrap();

        for (i, event) in events.iter().enumerate() {
            machine.process(event).unwrap();
            let expected = (i + 1).min(len);
            prop_assert_eq!(machine.current_state().unwrap().name(), format!("s{expected}"));
            prop_assert_eq!(machine.is_done(), i >= len);
        }
    }

    #[test]
    fn process_after_done_is_noop(len in 1usize..6, extra in 1usize..10) {
        let mut machine = chain(len);
        machine.init().unwrap();
        for _ in 0..=len {
            machine.process(&0).unwrap();
        }
        prop_assert_eq!(machine.phase(), Phase::Finished);

        let current = machine.current_state().map(|s| s.name().to_string());
        let previous = machine.previous_state().map(|s| s.name().to_string());
        let history = machine.history().len();

        for _ in 0..extra {
            prop_assert!(machine.process(&0).is_ok());
        }

        prop_assert_eq!(machine.current_state().map(|s| s.name().to_string()), current);
        prop_assert_eq!(machine.previous_state().map(|s| s.name().to_string()), previous);
        prop_assert_eq!(machine.history().len(), history);
    }

    #[test]
    fn resolution_reports_exactly_the_admitted_targets(
        thresholds in prop::collection::vec(any::<u8>(), 1..8),
        event in any::<u8>(),
    ) {
        let mut table = TransitionTable::new();
        for (i, threshold) in thresholds.iter().copied().enumerate() {
            table
                .add("from", format!("t{i}"), Some(Guard::on_event(move |e: &u8| *e >= threshold)))
                .unwrap();
        }
        let machine = Machine::new();

        let admitted: Vec<String> = thresholds
            .iter()
            .enumerate()
            .filter(|(_, threshold)| event >= **threshold)
            .map(|(i, _)| format!("t{i}"))
            .collect();

        let result = table.resolve("from", &machine, &event);
        match admitted.len() {
            0 => prop_assert_eq!(result, Err(FsmError::NoEligibleTransition { from: "from".to_string() })),
            1 => prop_assert_eq!(result, Ok(admitted[0].clone())),
            _ => prop_assert_eq!(
                result,
                Err(FsmError::AmbiguousTransition { from: "from".to_string(), candidates: admitted })
            ),
        }
    }

    #[test]
    fn exclusive_guards_route_by_event(event in any::<u8>()) {
        let mut machine: Machine<u8> = Machine::new();
        machine.add_initial_state(State::new("split")).unwrap();
        machine.add_state(State::finish("low")).unwrap();
        machine.add_state(State::finish("high")).unwrap();
        machine.add_guarded_transition("split", "low", |_, e: &u8| *e < 128).unwrap();
        machine.add_guarded_transition("split", "high", |_, e: &u8| *e >= 128).unwrap();
        machine.init().unwrap();

        machine.process(&event).unwrap();

        let expected = if event < 128 { "low" } else { "high" };
        prop_assert_eq!(machine.current_state().unwrap().name(), expected);
    }

    #[test]
    fn duplicate_pairs_always_rejected(from in "[a-z]{1,4}", to in "[a-z]{1,4}", other in "[A-Z]{1,4}") {
        let mut table: TransitionTable<u8> = TransitionTable::new();
        table.add(from.clone(), to.clone(), None).unwrap();

        prop_assert_eq!(
            table.add(from.clone(), to.clone(), None),
            Err(FsmError::DuplicateTransition { from: from.clone(), to: to.clone() })
        );
        prop_assert!(table.add(from, other, None).is_ok());
    }
}
