//! Game Loop State Machine
//!
//! A machine ticked once per frame by an outer loop. Each state
//! registers a run action executed while it is active; triggers move
//! the game between menu, play, pause, and game over.
//!
//! Run with: cargo run --example game_loop

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tickover::{state_enum, trigger_enum, ConfigureError, StateMachine};

state_enum! {
    enum GameState {
        Menu,
        Playing,
        Paused,
        GameOver,
    }
    final: [GameOver]
}

trigger_enum! {
    enum GameTrigger {
        Start,
        Pause,
        Resume,
        Die,
    }
}

fn main() -> Result<(), ConfigureError> {
    let mut game: StateMachine<GameState, GameTrigger> = StateMachine::new(GameState::Menu);

    let frames_played = Arc::new(AtomicUsize::new(0));
    let played_counter = Arc::clone(&frames_played);

    game.configure(GameState::Menu)?
        .on_run(|| println!("  menu: press start"))
        .permit_with(GameTrigger::Start, GameState::Playing, || {
            println!("  -> spawning player")
        });
    game.configure(GameState::Playing)?
        .on_run(move || {
            let frame = played_counter.fetch_add(1, Ordering::SeqCst) + 1;
            println!("  playing: simulating frame {frame}");
        })
        .permit(GameTrigger::Pause, GameState::Paused)
        .permit_with(GameTrigger::Die, GameState::GameOver, || {
            println!("  -> saving score")
        });
    game.configure(GameState::Paused)?
        .on_run(|| println!("  paused"))
        .permit(GameTrigger::Resume, GameState::Playing);
    game.configure(GameState::GameOver)?
        .on_run(|| println!("  game over"));

    println!("=== Game Loop State Machine ===\n");

    // One trigger per frame, fed by "the player".
    let script = [
        None,
        Some(GameTrigger::Start),
        None,
        Some(GameTrigger::Pause),
        Some(GameTrigger::Resume),
        None,
        Some(GameTrigger::Die),
        None,
    ];

    for (frame, input) in script.into_iter().enumerate() {
        println!("frame {frame}:");
        if let Some(trigger) = input {
            if !game.fire(trigger.clone()) {
                println!("  (ignored {trigger:?})");
            }
        }
        game.run_current_state();
    }

    println!(
        "\nFrames simulated while playing: {}",
        frames_played.load(Ordering::SeqCst)
    );
    println!("Transitions taken: {}", game.history().transitions().len());
    println!("Reached a final state: {}", game.is_final());

    println!("\n=== Example Complete ===");
    Ok(())
}
