//! Configuration-table audit for shadowed permits.
//!
//! Because permits are matched in declaration order with first match
//! wins, a later permit that collides with an earlier one on its match
//! key is legal but unreachable. That tie-break is part of the engine's
//! contract, so the engine never rejects such tables; this module lets
//! callers surface the dead edges at configuration time instead.
//!
//! The audit accumulates ALL findings in a single pass rather than
//! stopping at the first. Findings are advisory: they carry display
//! messages but never affect runtime semantics.

use crate::core::{State, Trigger};
use crate::engine::StateMachine;
use thiserror::Error;

/// A declared permit that can never be selected.
///
/// Indices refer to positions in [`StateMachine::permits`], in
/// declaration order.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuditFinding {
    /// A later permit shares origin and trigger with an earlier one, so
    /// `fire` always selects the earlier permit.
    #[error("permit #{later} ('{from}' on '{trigger}') is shadowed by permit #{earlier} and can never fire")]
    ShadowedTrigger {
        from: String,
        trigger: String,
        earlier: usize,
        later: usize,
    },

    /// A later permit shares origin and destination with an earlier
    /// one, so `switch_to` always selects the earlier permit.
    #[error("permit #{later} ('{from}' to '{to}') is shadowed by permit #{earlier} and can never be selected by switch_to")]
    ShadowedSwitch {
        from: String,
        to: String,
        earlier: usize,
        later: usize,
    },
}

/// Scan the permit table for shadowed edges.
///
/// Each later permit is reported at most once per match key, against
/// the earliest permit that shadows it. An empty result means every
/// declared edge is reachable through at least the key it was declared
/// for.
///
/// # Example
///
/// ```rust
/// use tickover::{audit, state_enum, trigger_enum, StateMachine};
///
/// state_enum! {
///     enum Lamp {
///         Off,
///         On,
///     }
/// }
///
/// trigger_enum! {
///     enum Flick {
///         Toggle,
///     }
/// }
///
/// # fn main() -> Result<(), tickover::ConfigureError> {
/// let mut lamp: StateMachine<Lamp, Flick> = StateMachine::new(Lamp::Off);
/// lamp.configure(Lamp::Off)?
///     .permit(Flick::Toggle, Lamp::On)
///     .permit(Flick::Toggle, Lamp::On); // dead edge
///
/// let findings = audit::shadowed_permits(&lamp);
/// assert_eq!(findings.len(), 2); // shadowed for fire and for switch_to
/// # Ok(())
/// # }
/// ```
pub fn shadowed_permits<S: State, T: Trigger>(machine: &StateMachine<S, T>) -> Vec<AuditFinding> {
    let permits = machine.permits();
    let mut findings = Vec::new();

    for (later, candidate) in permits.iter().enumerate() {
        let mut trigger_shadowed = false;
        let mut switch_shadowed = false;

        for (earlier, prior) in permits.iter().enumerate().take(later) {
            if prior.from != candidate.from {
                continue;
            }

            if !trigger_shadowed {
                if let (Some(prior_t), Some(candidate_t)) = (&prior.trigger, &candidate.trigger) {
                    if prior_t == candidate_t {
                        findings.push(AuditFinding::ShadowedTrigger {
                            from: candidate.from.name().to_string(),
                            trigger: candidate_t.name().to_string(),
                            earlier,
                            later,
                        });
                        trigger_shadowed = true;
                    }
                }
            }

            if !switch_shadowed && prior.to == candidate.to {
                findings.push(AuditFinding::ShadowedSwitch {
                    from: candidate.from.name().to_string(),
                    to: candidate.to.name().to_string(),
                    earlier,
                    later,
                });
                switch_shadowed = true;
            }

            if trigger_shadowed && switch_shadowed {
                break;
            }
        }
    }

    findings
}
