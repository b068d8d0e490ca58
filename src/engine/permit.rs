//! Permit records: the declared edges of the state graph.

use crate::core::{State, Trigger};
use std::sync::Arc;

/// Type alias for the zero-argument callables the engine invokes.
///
/// Actions are opaque behavior: the engine calls them synchronously and
/// never inspects them. The same alias covers transition side effects
/// and per-state run actions.
pub type Action = Arc<dyn Fn() + Send + Sync>;

/// One permitted edge in the state graph.
///
/// A permit declares that the machine may move from `from` to `to`,
/// either when `trigger` is fired or when `to` is requested directly.
/// Permits are immutable once added: the table only grows during
/// configuration and no API removes entries.
///
/// Permits sharing an origin are tried in declaration order and the
/// first match wins. Colliding edges are legal; only the earlier one is
/// ever reachable (see [`crate::audit`]).
pub struct Permit<S: State, T: Trigger> {
    /// Origin state this edge leaves from
    pub from: S,
    /// Trigger that selects this edge via `fire`, or `None` for an edge
    /// declared for direct switching only
    pub trigger: Option<T>,
    /// Destination state
    pub to: S,
    /// Side effect invoked on the old state, before the state changes
    pub effect: Option<Action>,
}

impl<S: State, T: Trigger> Permit<S, T> {
    /// Check whether `fire(trigger)` selects this permit from `current` (pure).
    pub fn matches_trigger(&self, current: &S, trigger: &T) -> bool {
        self.from == *current && self.trigger.as_ref() == Some(trigger)
    }

    /// Check whether `switch_to(target)` selects this permit from `current` (pure).
    ///
    /// The match key is the destination itself; the permit's trigger, if
    /// any, plays no part.
    pub fn matches_destination(&self, current: &S, target: &S) -> bool {
        self.from == *current && self.to == *target
    }
}

impl<S: State, T: Trigger> Clone for Permit<S, T> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            trigger: self.trigger.clone(),
            to: self.to.clone(),
            effect: self.effect.as_ref().map(Arc::clone),
        }
    }
}
