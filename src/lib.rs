//! Tickover: a declarative finite-state-machine engine.
//!
//! Tickover tracks a single current state, lets callers declare at
//! configuration time which transitions are legal from each state and
//! what side effect (if any) accompanies each transition, and then
//! drives transitions either by a named trigger (`fire`) or by a direct
//! switch request (`switch_to`). Each state may register a repeatable
//! run action invoked once per external tick while that state is
//! active, e.g. from a game loop or polling cycle.
//!
//! # Core Concepts
//!
//! - **State**: type-safe state representation via the `State` trait
//! - **Trigger**: named events decoupled from their destination via the
//!   `Trigger` trait
//! - **Permits**: declared edges matched in declaration order, first
//!   match wins
//! - **Run actions**: per-state callables executed once per tick
//! - **History**: immutable tracking of successful transitions
//!
//! # Example
//!
//! ```rust
//! use tickover::{state_enum, trigger_enum, StateMachine};
//!
//! state_enum! {
//!     enum Door {
//!         Closed,
//!         Open,
//!     }
//! }
//!
//! trigger_enum! {
//!     enum Handle {
//!         Turn,
//!     }
//! }
//!
//! # fn main() -> Result<(), tickover::ConfigureError> {
//! let mut door: StateMachine<Door, Handle> = StateMachine::new(Door::Closed);
//!
//! door.configure(Door::Closed)?
//!     .on_run(|| println!("waiting for a visitor"))
//!     .permit(Handle::Turn, Door::Open);
//! door.configure(Door::Open)?
//!     .allow_transition_to(Door::Closed);
//!
//! door.run_current_state(); // ticks the Closed run action
//! assert!(door.fire(Handle::Turn));
//! assert_eq!(door.current_state(), &Door::Open);
//! assert!(door.switch_to(Door::Closed));
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod core;
pub mod engine;
pub mod macros;

// Re-export commonly used types
pub use crate::core::{State, StateHistory, StateTransition, Trigger};
pub use audit::AuditFinding;
pub use engine::{Action, ConfigureError, Configurer, Permit, StateMachine};
