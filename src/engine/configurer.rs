//! Per-state configuration builder.

use crate::core::{State, Trigger};
use crate::engine::machine::StateMachine;
use crate::engine::permit::{Action, Permit};
use std::sync::Arc;

/// Builder scoped to one state, returned by
/// [`StateMachine::configure`].
///
/// Through the configurer the caller declares the state's run action
/// and zero or more outgoing permits. Every method consumes and returns
/// the builder, so declarations chain:
///
/// ```rust
/// use tickover::{state_enum, trigger_enum, StateMachine};
///
/// state_enum! {
///     enum Phase {
///         Idle,
///         Busy,
///     }
/// }
///
/// trigger_enum! {
///     enum Event {
///         Go,
///     }
/// }
///
/// # fn main() -> Result<(), tickover::ConfigureError> {
/// let mut machine: StateMachine<Phase, Event> = StateMachine::new(Phase::Idle);
/// machine
///     .configure(Phase::Idle)?
///     .on_run(|| println!("idling"))
///     .permit(Event::Go, Phase::Busy)
///     .allow_transition_to(Phase::Busy);
/// # Ok(())
/// # }
/// ```
pub struct Configurer<'m, S: State, T: Trigger> {
    state: S,
    machine: &'m mut StateMachine<S, T>,
}

impl<'m, S: State, T: Trigger> Configurer<'m, S, T> {
    pub(crate) fn new(state: S, machine: &'m mut StateMachine<S, T>) -> Self {
        Self { state, machine }
    }

    /// Record the run action for the scoped state, overwriting any
    /// action declared earlier in this builder.
    ///
    /// If the scoped state equals the machine's current state, the
    /// action becomes the live per-tick action immediately, so a
    /// machine configured while already sitting in its initial state
    /// ticks correctly without a prior transition.
    pub fn on_run<F>(self, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.machine
            .register_run_action(self.state.clone(), Arc::new(action));
        self
    }

    /// Permit a transition to `to` when `trigger` is fired.
    pub fn permit(self, trigger: T, to: S) -> Self {
        self.push(Some(trigger), to, None)
    }

    /// Permit a transition to `to` when `trigger` is fired, running
    /// `effect` on the old state before the transition completes.
    pub fn permit_with<F>(self, trigger: T, to: S, effect: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.push(Some(trigger), to, Some(Arc::new(effect)))
    }

    /// Permit a direct transition to `to`.
    pub fn allow_transition_to(self, to: S) -> Self {
        self.push(None, to, None)
    }

    /// Permit a direct transition to `to`, running `effect` on the old
    /// state before the transition completes.
    pub fn allow_transition_to_with<F>(self, to: S, effect: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.push(None, to, Some(Arc::new(effect)))
    }

    fn push(self, trigger: Option<T>, to: S, effect: Option<Action>) -> Self {
        self.machine.add_permit(Permit {
            from: self.state.clone(),
            trigger,
            to,
            effect,
        });
        self
    }
}
