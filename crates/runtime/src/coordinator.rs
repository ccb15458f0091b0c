//! Server-wide event lifecycle.
//!
//! The [`LifecycleCoordinator`] owns the event registry, the no-repeat
//! window and the event selector, and drives one Apply/Revert pair per round:
//!
//! ```text
//! Idle -> Reverting -> Selecting -> Applying -> Active -> (round end) Idle
//! ```
//!
//! Revert pairing is enforced here rather than trusted to modifiers: the
//! applied event is parked in `outstanding` and taken out exactly once by
//! the next revert, so a modifier is never reverted twice for one apply and
//! never reverted without a prior apply.

use game_core::{
    HistoryWindow, Modifier, ModifierId, ModifierKind, ModifierRegistry, RegistryError,
    RoundPhase, Target, WeightedSelector,
};
use tracing::{debug, info, warn};

use crate::lifecycle::RoundEnv;

/// Event chosen at a round start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub id: ModifierId,
    /// True when a forced override was consumed.
    pub forced: bool,
}

/// Drives the per-round Apply/Revert protocol for the event slot.
pub struct LifecycleCoordinator {
    registry: ModifierRegistry,
    history: HistoryWindow,
    selector: WeightedSelector,
    phase: RoundPhase,
    /// Event active during the current round.
    current: Option<ModifierId>,
    /// Applied event awaiting its revert.
    outstanding: Option<ModifierId>,
    forced: Option<String>,
}

impl LifecycleCoordinator {
    pub fn new(registry: ModifierRegistry, history_capacity: usize, seed: u64) -> Self {
        Self {
            registry,
            history: HistoryWindow::new(history_capacity),
            selector: WeightedSelector::new(seed),
            phase: RoundPhase::Idle,
            current: None,
            outstanding: None,
            forced: None,
        }
    }

    /// Runs the revert → select → apply cycle for a new round.
    ///
    /// Never fails: a faulting revert or apply is logged by the guard and
    /// the cycle continues.
    pub(crate) fn start_round(&mut self, env: &mut RoundEnv<'_>) -> Option<Selection> {
        self.phase = RoundPhase::Reverting;
        self.current = None;
        if let Some(previous) = self.outstanding.take() {
            env.revert(
                ModifierKind::Event,
                self.registry.modifier_mut(previous),
                Target::Server,
            );
        }

        self.phase = RoundPhase::Selecting;
        let selection = self.select();

        let Some(selection) = selection else {
            info!(
                target: "runtime::coordinator",
                round = env.round.0,
                "no eligible event this round"
            );
            self.phase = RoundPhase::Active;
            return None;
        };

        self.phase = RoundPhase::Applying;
        info!(
            target: "runtime::coordinator",
            round = env.round.0,
            event = self.registry.name(selection.id),
            forced = selection.forced,
            "event selected"
        );
        env.apply(
            ModifierKind::Event,
            self.registry.modifier_mut(selection.id),
            Target::Server,
        );
        // A faulted apply may have left partial state; it still gets reverted.
        self.outstanding = Some(selection.id);
        self.current = Some(selection.id);
        self.phase = RoundPhase::Active;
        Some(selection)
    }

    fn select(&mut self) -> Option<Selection> {
        if let Some(name) = self.forced.take() {
            match self
                .selector
                .select_forced(&self.registry, &mut self.history, &name)
            {
                Ok(id) => return Some(Selection { id, forced: true }),
                Err(err) => warn!(
                    target: "runtime::coordinator",
                    event = %name,
                    error = %err,
                    "dropping forced override, drawing naturally"
                ),
            }
        }

        self.selector
            .select(&self.registry, &mut self.history, true)
            .map(|id| Selection { id, forced: false })
    }

    /// Bookkeeping only: the event stays applied until the next round start.
    pub(crate) fn end_round(&mut self) {
        if let Some(id) = self.current.take() {
            debug!(
                target: "runtime::coordinator",
                event = self.registry.name(id),
                "event parked for revert"
            );
        }
        self.phase = RoundPhase::Idle;
    }

    /// Sets the one-shot override for the next round start.
    ///
    /// Returns the override it replaced, if any.
    pub fn force_next(&mut self, name: &str) -> Result<Option<String>, RegistryError> {
        self.registry.id_of(name)?;
        info!(target: "runtime::coordinator", event = name, "forced override set");
        Ok(self.forced.replace(name.to_owned()))
    }

    pub fn pending_override(&self) -> Option<&str> {
        self.forced.as_deref()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        info!(target: "runtime::coordinator", "event history cleared");
    }

    pub fn history(&self) -> &HistoryWindow {
        &self.history
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn registry(&self) -> &ModifierRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ModifierRegistry {
        &mut self.registry
    }

    /// Name of the event active this round.
    pub fn current(&self) -> Option<&str> {
        self.current.map(|id| self.registry.name(id))
    }

    /// The event active this round, for damage queries.
    pub fn current_modifier(&self) -> Option<&dyn Modifier> {
        self.current.map(|id| self.registry.modifier(id))
    }
}
