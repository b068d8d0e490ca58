//! Configuration errors for the state machine engine.

use thiserror::Error;

/// Errors that can occur while configuring a state machine.
///
/// Configuration misuse indicates a wiring bug in the caller and is
/// surfaced synchronously at the offending call. Runtime non-matches
/// (`fire`/`switch_to` finding no permit) are not errors; they are
/// reported as a `false` return instead.
#[derive(Debug, Error)]
pub enum ConfigureError {
    #[error("State '{state}' is already configured. Each state passes through configure() at most once")]
    AlreadyConfigured { state: String },
}
