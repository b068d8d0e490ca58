//! Core State trait for state machine states.
//!
//! All state machine states must implement this trait, which provides
//! pure methods for inspecting state properties without side effects.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// All methods are pure - no side effects. States represent immutable
/// values that describe the current position in a state machine. The
/// engine assumes a closed, finite domain of state values, which in
/// practice means a plain enum (see the [`state_enum!`](crate::state_enum)
/// macro).
///
/// # Required Traits
///
/// - `Clone`: States must be cloneable for history tracking
/// - `PartialEq`: States must be comparable for permit matching
/// - `Debug`: States must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: States must be serializable so history
///   snapshots can be exported
///
/// # Example
///
/// ```rust
/// use tickover::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum PlayerState {
///     Idle,
///     Running,
///     Defeated,
/// }
///
/// impl State for PlayerState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Idle => "Idle",
///             Self::Running => "Running",
///             Self::Defeated => "Defeated",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Defeated)
///     }
/// }
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    ///
    /// Returns a static string reference for zero-cost naming.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Final states are descriptive only: the engine never blocks a
    /// transition out of a final state. A state with no matching permits
    /// is a de-facto sink regardless of this flag.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}
