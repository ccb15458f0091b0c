//! Registry of named, weighted modifiers.
//!
//! The [`ModifierRegistry`] owns every modifier instance of one family
//! (events or skills) together with its current selection weight.
//!
//! # Design
//!
//! - **Insertion order**: entries keep registration order, which is the
//!   stable walk order of the weighted draw
//! - **Name index**: O(1) lookup by name for forcing, history, and weights
//! - **Startup-only registration**: names are unique and never removed, so a
//!   [`ModifierId`] stays valid for the registry's lifetime
//! - **Single-threaded**: no interior locking; the owner serializes access

use std::collections::HashMap;

use tracing::{debug, warn};

use super::Modifier;
use crate::error::RegistryError;

/// Dense handle to a registered modifier.
///
/// Only minted by [`ModifierRegistry::register`]; valid for that registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModifierId(usize);

impl ModifierId {
    /// Position in registration order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Name and weight row returned by [`ModifierRegistry::list_all`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierListing {
    pub name: String,
    pub display_name: String,
    pub weight: u32,
}

/// Outcome of applying a startup weight table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WeightReport {
    /// Names whose weight was updated.
    pub applied: Vec<String>,
    /// Names in the table that no registered modifier carries.
    pub unknown: Vec<String>,
    /// Entries rejected for an invalid weight; the prior weight was kept.
    pub rejected: Vec<(String, i64)>,
}

struct Entry {
    modifier: Box<dyn Modifier>,
    weight: u32,
}

/// Registry that owns modifiers and their current weights.
pub struct ModifierRegistry {
    entries: Vec<Entry>,
    index: HashMap<String, ModifierId>,
}

impl ModifierRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Registers a modifier under its [`name`](Modifier::name) with its
    /// default weight.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if the name is taken.
    /// Registration is not idempotent; a duplicate aborts startup.
    pub fn register(&mut self, modifier: Box<dyn Modifier>) -> Result<ModifierId, RegistryError> {
        let name = modifier.name().to_owned();
        if self.index.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        let id = ModifierId(self.entries.len());
        let weight = modifier.default_weight();
        debug!(
            target: "game_core::registry",
            modifier = %name,
            weight,
            "registered modifier"
        );
        self.entries.push(Entry { modifier, weight });
        self.index.insert(name, id);
        Ok(id)
    }

    /// Registers every modifier in order, stopping at the first conflict.
    pub fn register_all<I>(&mut self, modifiers: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = Box<dyn Modifier>>,
    {
        for modifier in modifiers {
            self.register(modifier)?;
        }
        Ok(())
    }

    /// Resolves a name to its handle.
    pub fn id_of(&self, name: &str) -> Result<ModifierId, RegistryError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| RegistryError::NotFound(name.to_owned()))
    }

    /// Looks up a modifier by name.
    pub fn get(&self, name: &str) -> Result<&dyn Modifier, RegistryError> {
        let id = self.id_of(name)?;
        Ok(self.modifier(id))
    }

    /// Returns true if a modifier with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Borrows a modifier by handle.
    pub fn modifier(&self, id: ModifierId) -> &dyn Modifier {
        self.entries[id.0].modifier.as_ref()
    }

    /// Mutably borrows a modifier by handle.
    pub fn modifier_mut(&mut self, id: ModifierId) -> &mut dyn Modifier {
        self.entries[id.0].modifier.as_mut()
    }

    /// Returns the registered name for a handle.
    pub fn name(&self, id: ModifierId) -> &str {
        self.entries[id.0].modifier.name()
    }

    /// Current weight of the named modifier.
    pub fn weight(&self, name: &str) -> Result<u32, RegistryError> {
        let id = self.id_of(name)?;
        Ok(self.weight_of(id))
    }

    /// Current weight by handle.
    pub fn weight_of(&self, id: ModifierId) -> u32 {
        self.entries[id.0].weight
    }

    /// Changes a weight, returning the previous value.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotFound`] for an unknown name
    /// - [`RegistryError::InvalidWeight`] for a negative or oversized value;
    ///   the prior weight is retained
    pub fn set_weight(&mut self, name: &str, weight: i64) -> Result<u32, RegistryError> {
        let id = self.id_of(name)?;
        let value = u32::try_from(weight).map_err(|_| RegistryError::InvalidWeight {
            name: name.to_owned(),
            weight,
        })?;

        let entry = &mut self.entries[id.0];
        let previous = entry.weight;
        entry.weight = value;
        debug!(
            target: "game_core::registry",
            modifier = name,
            previous,
            weight = value,
            "weight changed"
        );
        Ok(previous)
    }

    /// Applies a startup weight table.
    ///
    /// Unknown names and invalid weights are logged and skipped. Registered
    /// modifiers absent from the table keep their current weight.
    pub fn apply_weights<'a, I>(&mut self, table: I) -> WeightReport
    where
        I: IntoIterator<Item = (&'a str, i64)>,
    {
        let mut report = WeightReport::default();

        for (name, weight) in table {
            match self.set_weight(name, weight) {
                Ok(_) => report.applied.push(name.to_owned()),
                Err(RegistryError::NotFound(_)) => {
                    warn!(
                        target: "game_core::registry",
                        modifier = name,
                        "ignoring weight for unknown modifier"
                    );
                    report.unknown.push(name.to_owned());
                }
                Err(err) => {
                    warn!(
                        target: "game_core::registry",
                        modifier = name,
                        weight,
                        error = %err,
                        "ignoring invalid weight"
                    );
                    report.rejected.push((name.to_owned(), weight));
                }
            }
        }

        report
    }

    /// Every modifier with its weight, ordered by name.
    pub fn list_all(&self) -> Vec<ModifierListing> {
        let mut listings: Vec<_> = self
            .entries
            .iter()
            .map(|entry| ModifierListing {
                name: entry.modifier.name().to_owned(),
                display_name: entry.modifier.display_name().to_owned(),
                weight: entry.weight,
            })
            .collect();
        listings.sort_by(|a, b| a.name.cmp(&b.name));
        listings
    }

    /// Iterates entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ModifierId, &dyn Modifier, u32)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (ModifierId(i), entry.modifier.as_ref(), entry.weight))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ModifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}
