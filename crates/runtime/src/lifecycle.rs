//! Guarded lifecycle calls.
//!
//! Every `apply`, `revert` and damage query goes through [`guarded`], which
//! turns both returned faults and panics into a logged [`ModifierFault`].
//! One broken modifier must never abort round setup or crash the host.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use game_core::{
    AdminCommand, EngineHandle, Modifier, ModifierFault, ModifierKind, RoundContext, RoundId,
    SkillDirectives, Target, Tick,
};
use tracing::{error, info};

use crate::events::{EventBus, LifecyclePhase, RuntimeEvent};

/// Runs a modifier call, converting panics into faults.
pub(crate) fn guarded<T>(call: impl FnOnce() -> Result<T, ModifierFault>) -> Result<T, ModifierFault> {
    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(result) => result,
        Err(payload) => Err(ModifierFault::new(format!(
            "panicked: {}",
            panic_message(payload.as_ref())
        ))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}

/// Everything a round handler needs to run modifier lifecycle calls.
///
/// Borrowed from the [`Runtime`](crate::Runtime) for the duration of one
/// host callback.
pub(crate) struct RoundEnv<'a> {
    pub round: RoundId,
    pub now: Tick,
    pub engine: &'a mut dyn EngineHandle,
    pub directives: &'a mut SkillDirectives,
    pub commands: &'a mut Vec<AdminCommand>,
    pub bus: &'a EventBus,
}

impl<'a> RoundEnv<'a> {
    fn context(&mut self, target: Target) -> RoundContext<'_> {
        RoundContext::new(
            self.round,
            self.now,
            target,
            &mut *self.engine,
            &mut *self.directives,
            &mut *self.commands,
        )
    }

    /// Applies a modifier. Returns false if it faulted.
    pub fn apply(&mut self, kind: ModifierKind, modifier: &mut dyn Modifier, target: Target) -> bool {
        self.run(kind, modifier, target, LifecyclePhase::Apply)
    }

    /// Reverts a modifier. Returns false if it faulted.
    pub fn revert(&mut self, kind: ModifierKind, modifier: &mut dyn Modifier, target: Target) -> bool {
        self.run(kind, modifier, target, LifecyclePhase::Revert)
    }

    fn run(
        &mut self,
        kind: ModifierKind,
        modifier: &mut dyn Modifier,
        target: Target,
        phase: LifecyclePhase,
    ) -> bool {
        let name = modifier.name().to_owned();
        let round = self.round;
        let mut ctx = self.context(target);

        let result = guarded(|| match phase {
            LifecyclePhase::Revert => modifier.revert(&mut ctx),
            LifecyclePhase::Apply => modifier.apply(&mut ctx),
        });

        match result {
            Ok(()) => {
                info!(
                    target: "runtime::lifecycle",
                    round = round.0,
                    kind = %kind,
                    modifier = %name,
                    on = ?target,
                    "{}", phase.as_str()
                );
                let event = match phase {
                    LifecyclePhase::Revert => RuntimeEvent::ModifierReverted {
                        round,
                        kind,
                        name,
                        target,
                    },
                    LifecyclePhase::Apply => RuntimeEvent::ModifierApplied {
                        round,
                        kind,
                        name,
                        target,
                    },
                };
                self.bus.publish(event);
                true
            }
            Err(fault) => {
                error!(
                    target: "runtime::lifecycle",
                    round = round.0,
                    kind = %kind,
                    modifier = %name,
                    on = ?target,
                    phase = phase.as_str(),
                    error = %fault,
                    "modifier faulted, continuing"
                );
                self.bus.publish(RuntimeEvent::ModifierFaulted {
                    round,
                    kind,
                    name,
                    phase,
                    error: fault.to_string(),
                });
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panics_become_faults() {
        let result: Result<(), _> = guarded(|| panic!("boom"));
        let fault = result.unwrap_err();
        assert!(fault.message().contains("boom"));
    }

    #[test]
    fn returned_faults_pass_through() {
        let result: Result<(), _> = guarded(|| Err(ModifierFault::new("bad convar")));
        assert_eq!(result.unwrap_err().message(), "bad convar");
    }

    #[test]
    fn success_passes_through() {
        assert_eq!(guarded(|| Ok(7)).unwrap(), 7);
    }
}
