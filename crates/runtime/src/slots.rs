//! Reserved slots that run before the weighted event draw.
//!
//! A reserved slot holds a modifier that is "always active if enabled"
//! (heavy armor, welfare). Slots are cycled at every round start in
//! priority order, before the event cycle, so the ordering between reserved
//! systems and randomly selected ones is fixed rather than incidental.
//!
//! # Cycle
//!
//! For each slot, lowest priority first:
//! 1. Revert, if the slot has an outstanding apply
//! 2. Apply, if the slot is enabled
//!
//! Enabling or disabling a slot takes effect at the next cycle.

use game_core::{Modifier, ModifierKind, Target};
use tracing::debug;

use crate::api::{Result, RuntimeError};
use crate::lifecycle::RoundEnv;

struct ReservedSlot {
    modifier: Box<dyn Modifier>,
    priority: i32,
    enabled: bool,
    applied: bool,
}

/// Registry of reserved slots, kept sorted by priority.
pub struct SlotRegistry {
    slots: Vec<ReservedSlot>,
}

impl SlotRegistry {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Registers a reserved slot.
    ///
    /// Lower priorities run first; equal priorities keep registration order.
    pub fn register(
        &mut self,
        modifier: Box<dyn Modifier>,
        priority: i32,
        enabled: bool,
    ) -> Result<()> {
        if self.position(modifier.name()).is_some() {
            return Err(RuntimeError::DuplicateSlot(modifier.name().to_owned()));
        }
        self.slots.push(ReservedSlot {
            modifier,
            priority,
            enabled,
            applied: false,
        });
        self.slots.sort_by_key(|slot| slot.priority);
        Ok(())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.modifier.name() == name)
    }

    /// Enables or disables a slot from the next round start.
    ///
    /// Returns the previous flag.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> Result<bool> {
        let index = self
            .position(name)
            .ok_or_else(|| RuntimeError::UnknownSlot(name.to_owned()))?;
        let slot = &mut self.slots[index];
        Ok(std::mem::replace(&mut slot.enabled, enabled))
    }

    pub fn is_enabled(&self, name: &str) -> Option<bool> {
        self.position(name).map(|index| self.slots[index].enabled)
    }

    /// Reverts and re-applies every slot in priority order.
    ///
    /// Returns the names of the slots applied this cycle.
    pub(crate) fn cycle(&mut self, env: &mut RoundEnv<'_>) -> Vec<String> {
        let mut applied = Vec::new();
        for slot in &mut self.slots {
            if slot.applied {
                env.revert(ModifierKind::Reserved, slot.modifier.as_mut(), Target::Server);
                slot.applied = false;
            }

            if slot.enabled {
                env.apply(ModifierKind::Reserved, slot.modifier.as_mut(), Target::Server);
                // A faulted apply may have half-applied; revert it next cycle.
                slot.applied = true;
                applied.push(slot.modifier.name().to_owned());
            } else {
                debug!(
                    target: "runtime::slots",
                    slot = slot.modifier.name(),
                    "slot disabled, skipping apply"
                );
            }
        }
        applied
    }

    /// Slots with an outstanding apply, in priority order.
    pub fn active(&self) -> impl Iterator<Item = &dyn Modifier> + '_ {
        self.slots
            .iter()
            .filter(|slot| slot.applied)
            .map(|slot| slot.modifier.as_ref())
    }

    /// Slot names and priorities in execution order (for debugging).
    pub fn slots(&self) -> impl Iterator<Item = (&str, i32, bool)> + '_ {
        self.slots
            .iter()
            .map(|slot| (slot.modifier.name(), slot.priority, slot.enabled))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for SlotRegistry {
    fn default() -> Self {
        Self::new()
    }
}
