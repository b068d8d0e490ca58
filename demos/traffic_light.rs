//! Traffic Light State Machine
//!
//! A cyclic machine driven entirely by direct switching; no triggers
//! are involved, so `()` stands in for the trigger type.
//!
//! Run with: cargo run --example traffic_light

use tickover::{state_enum, ConfigureError, State, StateMachine};

state_enum! {
    enum TrafficLight {
        Red,
        Green,
        Yellow,
    }
}

fn main() -> Result<(), ConfigureError> {
    let mut light: StateMachine<TrafficLight, ()> = StateMachine::new(TrafficLight::Red);

    light
        .configure(TrafficLight::Red)?
        .on_run(|| println!("  red: stop"))
        .allow_transition_to(TrafficLight::Green);
    light
        .configure(TrafficLight::Green)?
        .on_run(|| println!("  green: go"))
        .allow_transition_to(TrafficLight::Yellow);
    light
        .configure(TrafficLight::Yellow)?
        .on_run(|| println!("  yellow: caution"))
        .allow_transition_to(TrafficLight::Red);

    println!("=== Traffic Light State Machine ===\n");

    for _ in 0..6 {
        light.run_current_state();
        let next = match light.current_state() {
            TrafficLight::Red => TrafficLight::Green,
            TrafficLight::Green => TrafficLight::Yellow,
            TrafficLight::Yellow => TrafficLight::Red,
        };
        light.switch_to(next);
    }

    let path: Vec<&str> = light
        .history()
        .get_path()
        .into_iter()
        .map(State::name)
        .collect();
    println!("\nPath walked: {}", path.join(" -> "));

    println!("\n=== Example Complete ===");
    Ok(())
}
