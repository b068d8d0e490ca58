//! Turnstile State Machine
//!
//! The classic coin-operated turnstile: coins unlock it, pushing
//! through locks it again. Demonstrates triggered transitions with
//! side effects, rejected triggers, and the configuration audit.
//!
//! Run with: cargo run --example turnstile

use tickover::{audit, state_enum, trigger_enum, ConfigureError, StateMachine};

state_enum! {
    enum Turnstile {
        Locked,
        Unlocked,
    }
}

trigger_enum! {
    enum Input {
        Coin,
        Push,
    }
}

fn main() -> Result<(), ConfigureError> {
    let mut turnstile: StateMachine<Turnstile, Input> = StateMachine::new(Turnstile::Locked);

    turnstile
        .configure(Turnstile::Locked)?
        .permit_with(Input::Coin, Turnstile::Unlocked, || {
            println!("  *click* coin accepted")
        })
        // Dead edge: the previous permit always matches first.
        .permit(Input::Coin, Turnstile::Unlocked);
    turnstile
        .configure(Turnstile::Unlocked)?
        .permit_with(Input::Push, Turnstile::Locked, || {
            println!("  *thunk* arm rotates")
        });

    println!("=== Turnstile State Machine ===\n");

    for input in [Input::Push, Input::Coin, Input::Coin, Input::Push] {
        let accepted = turnstile.fire(input.clone());
        println!(
            "{:?} -> {} (now {:?})",
            input,
            if accepted { "accepted" } else { "rejected" },
            turnstile.current_state()
        );
    }

    let findings = audit::shadowed_permits(&turnstile);
    println!("\nAudit findings:");
    for finding in &findings {
        println!("  warning: {finding}");
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
