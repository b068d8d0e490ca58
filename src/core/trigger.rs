//! Core Trigger trait for transition events.
//!
//! Triggers name abstract events that may cause a transition, decoupled
//! from the destination state. Like states, triggers are assumed to form
//! a closed, finite domain - in practice a plain enum (see the
//! [`trigger_enum!`](crate::trigger_enum) macro).

use std::fmt::Debug;

/// Trait for transition trigger values.
///
/// A trigger is an opaque, comparable event value. The engine matches
/// triggers against declared permits by equality only; it never inspects
/// them beyond that.
///
/// # Example
///
/// ```rust
/// use tickover::core::Trigger;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Input {
///     Coin,
///     Push,
/// }
///
/// impl Trigger for Input {
///     fn name(&self) -> &str {
///         match self {
///             Self::Coin => "Coin",
///             Self::Push => "Push",
///         }
///     }
/// }
/// ```
pub trait Trigger: Clone + PartialEq + Debug + Send + Sync {
    /// Get the trigger's name for display/logging.
    fn name(&self) -> &str;
}

/// Machines driven purely by [`switch_to`](crate::StateMachine::switch_to)
/// never fire a trigger; `()` stands in for the trigger type there.
impl Trigger for () {
    fn name(&self) -> &str {
        "()"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    enum TestTrigger {
        Start,
        Stop,
    }

    impl Trigger for TestTrigger {
        fn name(&self) -> &str {
            match self {
                Self::Start => "Start",
                Self::Stop => "Stop",
            }
        }
    }

    #[test]
    fn trigger_name_returns_correct_value() {
        assert_eq!(TestTrigger::Start.name(), "Start");
        assert_eq!(TestTrigger::Stop.name(), "Stop");
    }

    #[test]
    fn trigger_is_comparable() {
        assert_eq!(TestTrigger::Start, TestTrigger::Start);
        assert_ne!(TestTrigger::Start, TestTrigger::Stop);
    }

    #[test]
    fn unit_trigger_is_usable() {
        let trigger = ();
        assert_eq!(trigger.name(), "()");
        assert_eq!(trigger, ());
    }
}
