//! The imperative state machine engine.
//!
//! This module provides the machine that owns the current state and
//! drives transitions:
//!
//! - **Permits**: declared edges matched in declaration order, first
//!   match wins
//! - **Configurer**: per-state builder for run actions and outgoing
//!   permits, usable exactly once per state
//! - **StateMachine**: trigger-driven (`fire`) and direct (`switch_to`)
//!   transitions plus per-tick execution (`run_current_state`)
//!
//! All operations are synchronous and run to completion on the caller's
//! thread; actions are invoked inline.

mod configurer;
mod error;
mod machine;
mod permit;

pub use configurer::Configurer;
pub use error::ConfigureError;
pub use machine::StateMachine;
pub use permit::{Action, Permit};
