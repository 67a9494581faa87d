//! Console Dialog
//!
//! A tiny command dialog driven by a state machine: the user is greeted,
//! types a command, and the machine routes to a reply state. Unknown
//! commands loop back to the greeting. The last command is kept in the
//! machine's context, where the guards read it.
//!
//! Run with: cargo run --example dialog
//! Set RUST_LOG=simple_fsm=debug to watch the transitions.

use simple_fsm::builder::{FsmBuilder, StateBuilder};
use simple_fsm::config::MachineConfig;
use std::io::{self, BufRead, Write};

/// Caller data the dialog's guards route on.
#[derive(Default)]
struct Dialog {
    command: String,
}

impl Dialog {
    fn is(&self, command: &str) -> bool {
        self.command.trim().eq_ignore_ascii_case(command)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut machine = FsmBuilder::<String, Dialog>::with_config_and_context(
        MachineConfig::new("dialog"),
        Dialog::default(),
    )
    .state(
        StateBuilder::<String, Dialog>::initial("greeting")
            .on_before(|_| println!("Welcome! Type 'hello' or 'bye'."))
            .on_after(|m| println!("Your command: {}", m.context().command.trim()))
            .goes_to_when("hello", |m, _| m.context().is("hello"))
            .goes_to_when("bye", |m, _| m.context().is("bye"))
            .goes_to_when("greeting", |m, _| {
                !m.context().is("hello") && !m.context().is("bye")
            }),
    )
    .state(StateBuilder::finish("hello").on_before(|_| println!("Hello!")))
    .state(StateBuilder::finish("bye").on_before(|_| println!("Bye!")))
    .create()?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while !machine.is_done() {
        let finishing = machine
            .current_state()
            .is_some_and(|state| state.is_finish());
        if !finishing {
            print!("Command: ");
            io::stdout().flush()?;
            match lines.next() {
                Some(line) => machine.context_mut().command = line?,
                None => break,
            }
        }
        let command = machine.context().command.clone();
        machine.process(&command)?;
    }

    println!("DONE");
    Ok(())
}
