//! The state machine engine.

use crate::core::{State, StateHistory, StateTransition, Trigger};
use crate::engine::configurer::Configurer;
use crate::engine::error::ConfigureError;
use crate::engine::permit::{Action, Permit};
use chrono::Utc;
use std::sync::Arc;

/// A generic finite-state machine.
///
/// The machine owns the current state value, the permit table, and the
/// per-state run actions, and mediates all state changes and tick
/// execution. Transitions are driven either by a named trigger
/// ([`fire`](Self::fire)) or by a direct request for a destination
/// ([`switch_to`](Self::switch_to)); the active state's run action is
/// executed once per external tick via
/// [`run_current_state`](Self::run_current_state).
///
/// Everything runs to completion on the caller's thread: side effects
/// and run actions are invoked inline, in the order "side effect, then
/// state mutation, then run-action resync". The machine provides no
/// internal locking; one logical owner drives it from one execution
/// context at a time.
///
/// # Example
///
/// ```rust
/// use tickover::{state_enum, trigger_enum, StateMachine};
///
/// state_enum! {
///     enum Turnstile {
///         Locked,
///         Unlocked,
///     }
/// }
///
/// trigger_enum! {
///     enum Input {
///         Coin,
///         Push,
///     }
/// }
///
/// # fn main() -> Result<(), tickover::ConfigureError> {
/// let mut turnstile: StateMachine<Turnstile, Input> = StateMachine::new(Turnstile::Locked);
///
/// turnstile
///     .configure(Turnstile::Locked)?
///     .permit(Input::Coin, Turnstile::Unlocked);
/// turnstile
///     .configure(Turnstile::Unlocked)?
///     .permit(Input::Push, Turnstile::Locked);
///
/// assert!(turnstile.fire(Input::Coin));
/// assert_eq!(turnstile.current_state(), &Turnstile::Unlocked);
///
/// // No permit for Coin while unlocked: state is unchanged.
/// assert!(!turnstile.fire(Input::Coin));
/// assert_eq!(turnstile.current_state(), &Turnstile::Unlocked);
/// # Ok(())
/// # }
/// ```
pub struct StateMachine<S: State, T: Trigger> {
    current: S,
    permits: Vec<Permit<S, T>>,
    run_actions: Vec<(S, Action)>,
    live_run: Option<Action>,
    configured: Vec<S>,
    history: StateHistory<S>,
}

impl<S: State, T: Trigger> StateMachine<S, T> {
    /// Create a new state machine sitting in `initial`.
    ///
    /// No permits or run actions are registered yet. There are no
    /// failure modes.
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            permits: Vec::new(),
            run_actions: Vec::new(),
            live_run: None,
            configured: Vec::new(),
            history: StateHistory::new(),
        }
    }

    /// Open the configuration builder for `state`.
    ///
    /// The state is registered in the configured-set immediately upon
    /// this call, not upon builder completion; a second `configure` of
    /// the same state fails even if the first builder was never used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigureError::AlreadyConfigured`] if `state` was
    /// configured before. This indicates a wiring bug and is never
    /// silently merged.
    pub fn configure(&mut self, state: S) -> Result<Configurer<'_, S, T>, ConfigureError> {
        if self.configured.contains(&state) {
            return Err(ConfigureError::AlreadyConfigured {
                state: state.name().to_string(),
            });
        }
        self.configured.push(state.clone());
        Ok(Configurer::new(state, self))
    }

    /// Attempt a transition by trigger.
    ///
    /// Permits are scanned in declaration order; the first one whose
    /// origin equals the current state and whose trigger equals
    /// `trigger` wins. On a match the permit's side effect (if any) is
    /// invoked on the old state, the current state becomes the permit's
    /// destination, and the live run action is resynchronized.
    ///
    /// Returns `true` if a transition occurred, `false` if no permit
    /// matched. A non-matching trigger is a normal outcome, not an
    /// error; the state is left unchanged.
    pub fn fire(&mut self, trigger: T) -> bool {
        let Some((to, effect)) = self
            .permits
            .iter()
            .find(|permit| permit.matches_trigger(&self.current, &trigger))
            .map(|permit| (permit.to.clone(), permit.effect.clone()))
        else {
            return false;
        };

        self.complete_transition(to, effect, Some(trigger.name().to_string()));
        true
    }

    /// Attempt a direct transition to `target`.
    ///
    /// Permits are scanned in declaration order; the match key is the
    /// destination state itself, so a permit declared with a trigger is
    /// just as reachable here as one declared for direct switching.
    ///
    /// Returns `true` if a transition occurred, `false` if the current
    /// state has no permit to `target`.
    pub fn switch_to(&mut self, target: S) -> bool {
        let Some((to, effect)) = self
            .permits
            .iter()
            .find(|permit| permit.matches_destination(&self.current, &target))
            .map(|permit| (permit.to.clone(), permit.effect.clone()))
        else {
            return false;
        };

        self.complete_transition(to, effect, None);
        true
    }

    /// Execute the current state's run action, if one is registered.
    ///
    /// A no-op when the current state has no run action. Callable
    /// arbitrarily many times; never mutates the current state.
    pub fn run_current_state(&self) {
        if let Some(action) = &self.live_run {
            action();
        }
    }

    /// Get the current state (pure).
    pub fn current_state(&self) -> &S {
        &self.current
    }

    /// Check if the machine sits in a final state (pure).
    ///
    /// Descriptive only: the engine never blocks transitions out of a
    /// final state.
    pub fn is_final(&self) -> bool {
        self.current.is_final()
    }

    /// Check whether `state` has already passed through
    /// [`configure`](Self::configure) (pure).
    pub fn is_configured(&self, state: &S) -> bool {
        self.configured.contains(state)
    }

    /// Get the declared permit table, in declaration order (pure).
    pub fn permits(&self) -> &[Permit<S, T>] {
        &self.permits
    }

    /// Get the transition history (pure).
    ///
    /// Only successful transitions are recorded.
    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    /// Side effect first, on the old state; then the state mutation;
    /// then the run-action resync.
    fn complete_transition(&mut self, to: S, effect: Option<Action>, via: Option<String>) {
        if let Some(effect) = &effect {
            effect();
        }
        let from = std::mem::replace(&mut self.current, to);
        self.history = self.history.record(StateTransition {
            from,
            to: self.current.clone(),
            via,
            timestamp: Utc::now(),
        });
        self.resync_run_action();
    }

    /// The live run action is a pure function of (run-action table,
    /// current state): recompute it rather than patching it.
    fn resync_run_action(&mut self) {
        self.live_run = self
            .run_actions
            .iter()
            .find(|(state, _)| *state == self.current)
            .map(|(_, action)| Arc::clone(action));
    }

    pub(crate) fn add_permit(&mut self, permit: Permit<S, T>) {
        self.permits.push(permit);
    }

    pub(crate) fn register_run_action(&mut self, state: S, action: Action) {
        match self.run_actions.iter_mut().find(|(s, _)| *s == state) {
            Some((_, slot)) => *slot = action,
            None => self.run_actions.push((state, action)),
        }
        self.resync_run_action();
    }
}

impl<S: State + Default, T: Trigger> Default for StateMachine<S, T> {
    /// A machine starting in the state domain's default value.
    fn default() -> Self {
        Self::new(S::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
    enum GameState {
        #[default]
        Idle,
        Running,
        Paused,
        GameOver,
    }

    impl State for GameState {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::Running => "Running",
                Self::Paused => "Paused",
                Self::GameOver => "GameOver",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::GameOver)
        }
    }

    #[derive(Clone, PartialEq, Debug)]
    enum GameTrigger {
        Start,
        Pause,
        Die,
    }

    impl Trigger for GameTrigger {
        fn name(&self) -> &str {
            match self {
                Self::Start => "Start",
                Self::Pause => "Pause",
                Self::Die => "Die",
            }
        }
    }

    fn counter() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let handle = Arc::clone(&count);
        (count, move || {
            handle.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn new_machine_starts_in_initial_state() {
        let machine: StateMachine<GameState, GameTrigger> = StateMachine::new(GameState::Running);
        assert_eq!(machine.current_state(), &GameState::Running);
        assert!(machine.permits().is_empty());
        assert!(machine.history().transitions().is_empty());
    }

    #[test]
    fn default_machine_starts_in_default_state() {
        let machine: StateMachine<GameState, GameTrigger> = StateMachine::default();
        assert_eq!(machine.current_state(), &GameState::Idle);
    }

    #[test]
    fn second_configure_of_same_state_fails() {
        let mut machine: StateMachine<GameState, GameTrigger> = StateMachine::default();

        machine
            .configure(GameState::Idle)
            .unwrap()
            .permit(GameTrigger::Start, GameState::Running);

        let result = machine.configure(GameState::Idle);
        assert!(matches!(
            result,
            Err(ConfigureError::AlreadyConfigured { .. })
        ));

        // The first configuration is never silently replaced.
        assert_eq!(machine.permits().len(), 1);
        assert!(machine.fire(GameTrigger::Start));
    }

    #[test]
    fn configure_registers_state_before_builder_use() {
        let mut machine: StateMachine<GameState, GameTrigger> = StateMachine::default();

        // The builder is dropped without declaring anything; the state
        // is closed against re-entry regardless.
        let _ = machine.configure(GameState::Idle).unwrap();
        assert!(machine.is_configured(&GameState::Idle));
        assert!(machine.configure(GameState::Idle).is_err());
    }

    #[test]
    fn fire_moves_to_destination_and_returns_true() {
        let mut machine: StateMachine<GameState, GameTrigger> = StateMachine::default();

        machine
            .configure(GameState::Idle)
            .unwrap()
            .permit(GameTrigger::Start, GameState::Running);

        assert!(machine.fire(GameTrigger::Start));
        assert_eq!(machine.current_state(), &GameState::Running);
    }

    #[test]
    fn fire_with_no_matching_permit_returns_false() {
        let mut machine: StateMachine<GameState, GameTrigger> = StateMachine::default();

        machine
            .configure(GameState::Idle)
            .unwrap()
            .permit(GameTrigger::Start, GameState::Running);

        assert!(!machine.fire(GameTrigger::Pause));
        assert_eq!(machine.current_state(), &GameState::Idle);
        assert!(machine.history().transitions().is_empty());
    }

    #[test]
    fn fire_runs_side_effect_then_changes_state() {
        let mut machine: StateMachine<GameState, GameTrigger> = StateMachine::default();
        let log: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));

        let effect_log = Arc::clone(&log);
        let run_log = Arc::clone(&log);
        machine
            .configure(GameState::Idle)
            .unwrap()
            .permit_with(GameTrigger::Start, GameState::Running, move || {
                effect_log.lock().unwrap().push("log_start");
            });
        machine
            .configure(GameState::Running)
            .unwrap()
            .on_run(move || {
                run_log.lock().unwrap().push("tick_running");
            });

        assert!(machine.fire(GameTrigger::Start));
        assert_eq!(machine.current_state(), &GameState::Running);

        // The side effect ran during fire; the destination's run action
        // did not fire until the next tick.
        assert_eq!(*log.lock().unwrap(), vec!["log_start"]);
        machine.run_current_state();
        assert_eq!(*log.lock().unwrap(), vec!["log_start", "tick_running"]);
    }

    #[test]
    fn earliest_declared_permit_wins_on_fire() {
        let mut machine: StateMachine<GameState, GameTrigger> = StateMachine::default();
        let (first, first_effect) = counter();
        let (second, second_effect) = counter();

        machine
            .configure(GameState::Idle)
            .unwrap()
            .permit_with(GameTrigger::Start, GameState::Running, first_effect)
            .permit_with(GameTrigger::Start, GameState::Running, second_effect);

        assert!(machine.fire(GameTrigger::Start));
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn earliest_declared_permit_wins_on_switch_to() {
        let mut machine: StateMachine<GameState, GameTrigger> = StateMachine::default();
        let (first, first_effect) = counter();
        let (second, second_effect) = counter();

        machine
            .configure(GameState::Idle)
            .unwrap()
            .allow_transition_to_with(GameState::Running, first_effect)
            .allow_transition_to_with(GameState::Running, second_effect);

        assert!(machine.switch_to(GameState::Running));
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn colliding_permits_diverging_on_destination_resolve_by_order() {
        let mut machine: StateMachine<GameState, GameTrigger> = StateMachine::default();

        machine
            .configure(GameState::Idle)
            .unwrap()
            .permit(GameTrigger::Start, GameState::Running)
            .permit(GameTrigger::Start, GameState::Paused);

        assert!(machine.fire(GameTrigger::Start));
        assert_eq!(machine.current_state(), &GameState::Running);
    }

    #[test]
    fn switch_to_without_declared_edge_returns_false() {
        let mut machine: StateMachine<GameState, GameTrigger> = StateMachine::default();

        machine.configure(GameState::Idle).unwrap().on_run(|| {});

        assert!(!machine.switch_to(GameState::Running));
        assert_eq!(machine.current_state(), &GameState::Idle);
    }

    #[test]
    fn switch_to_matches_triggered_permits_by_destination() {
        let mut machine: StateMachine<GameState, GameTrigger> = StateMachine::default();
        let (effects, effect) = counter();

        machine
            .configure(GameState::Idle)
            .unwrap()
            .permit_with(GameTrigger::Start, GameState::Running, effect);

        assert!(machine.switch_to(GameState::Running));
        assert_eq!(machine.current_state(), &GameState::Running);
        assert_eq!(effects.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn on_run_for_current_state_activates_immediately() {
        let mut machine: StateMachine<GameState, GameTrigger> = StateMachine::default();
        let (ticks, tick) = counter();

        machine
            .configure(GameState::Idle)
            .unwrap()
            .on_run(tick)
            .allow_transition_to(GameState::Running);

        // No transition has happened yet; the machine was configured
        // while already sitting in Idle.
        machine.run_current_state();
        assert_eq!(ticks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn run_current_state_without_action_is_noop() {
        let mut machine: StateMachine<GameState, GameTrigger> = StateMachine::default();

        machine
            .configure(GameState::Idle)
            .unwrap()
            .permit(GameTrigger::Start, GameState::Running);

        machine.run_current_state();
        machine.run_current_state();
        assert_eq!(machine.current_state(), &GameState::Idle);
    }

    #[test]
    fn run_current_state_is_idempotent_over_state() {
        let mut machine: StateMachine<GameState, GameTrigger> = StateMachine::default();
        let (ticks, tick) = counter();

        machine.configure(GameState::Idle).unwrap().on_run(tick);

        for _ in 0..5 {
            machine.run_current_state();
        }
        assert_eq!(ticks.load(Ordering::SeqCst), 5);
        assert_eq!(machine.current_state(), &GameState::Idle);
    }

    #[test]
    fn transition_resyncs_run_action_to_destination() {
        let mut machine: StateMachine<GameState, GameTrigger> = StateMachine::default();
        let (idle_ticks, idle_tick) = counter();
        let (running_ticks, running_tick) = counter();

        machine
            .configure(GameState::Idle)
            .unwrap()
            .on_run(idle_tick)
            .permit(GameTrigger::Start, GameState::Running);
        machine
            .configure(GameState::Running)
            .unwrap()
            .on_run(running_tick);

        machine.run_current_state();
        assert!(machine.fire(GameTrigger::Start));
        machine.run_current_state();
        machine.run_current_state();

        assert_eq!(idle_ticks.load(Ordering::SeqCst), 1);
        assert_eq!(running_ticks.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn transition_to_state_without_run_action_clears_the_tick() {
        let mut machine: StateMachine<GameState, GameTrigger> = StateMachine::default();
        let (idle_ticks, idle_tick) = counter();

        machine
            .configure(GameState::Idle)
            .unwrap()
            .on_run(idle_tick)
            .permit(GameTrigger::Start, GameState::Running);
        machine
            .configure(GameState::Running)
            .unwrap()
            .permit(GameTrigger::Die, GameState::GameOver);

        assert!(machine.fire(GameTrigger::Start));
        machine.run_current_state();
        machine.run_current_state();

        assert_eq!(idle_ticks.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn final_states_are_descriptive_not_enforced() {
        let mut machine: StateMachine<GameState, GameTrigger> = StateMachine::default();

        machine
            .configure(GameState::Idle)
            .unwrap()
            .permit(GameTrigger::Die, GameState::GameOver);
        machine
            .configure(GameState::GameOver)
            .unwrap()
            .permit(GameTrigger::Start, GameState::Idle);

        assert!(machine.fire(GameTrigger::Die));
        assert!(machine.is_final());
        assert!(machine.fire(GameTrigger::Start));
        assert_eq!(machine.current_state(), &GameState::Idle);
    }

    #[test]
    fn history_records_transitions_in_order() {
        let mut machine: StateMachine<GameState, GameTrigger> = StateMachine::default();

        machine
            .configure(GameState::Idle)
            .unwrap()
            .permit(GameTrigger::Start, GameState::Running);
        machine
            .configure(GameState::Running)
            .unwrap()
            .allow_transition_to(GameState::Paused);

        assert!(machine.fire(GameTrigger::Start));
        assert!(machine.switch_to(GameState::Paused));

        let transitions = machine.history().transitions();
        assert_eq!(transitions.len(), 2);
        assert_eq!(transitions[0].via.as_deref(), Some("Start"));
        assert_eq!(transitions[1].via, None);

        let path = machine.history().get_path();
        assert_eq!(
            path,
            vec![&GameState::Idle, &GameState::Running, &GameState::Paused]
        );
    }

    #[test]
    fn direct_only_machine_uses_unit_trigger() {
        let mut machine: StateMachine<GameState, ()> = StateMachine::default();

        machine
            .configure(GameState::Idle)
            .unwrap()
            .allow_transition_to(GameState::Running);

        assert!(machine.switch_to(GameState::Running));
        assert_eq!(machine.current_state(), &GameState::Running);
    }
}
