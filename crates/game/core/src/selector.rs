//! Weighted random selection with a no-repeat window.
//!
//! # Algorithm
//!
//! 1. Candidates are the registered modifiers with `weight > 0`, in
//!    registration order, minus anything the caller filters out (recent
//!    history, skills a player already holds)
//! 2. An empty candidate set yields `None`; callers treat that as "nothing
//!    this round", not as an error
//! 3. A roll `r` is drawn uniformly from `[0, total)`; the first candidate
//!    whose cumulative weight exceeds `r` wins
//!
//! The walk is linear and tie-free, so the same roll against the same
//! candidate list always picks the same modifier.

use std::collections::HashMap;

use tracing::debug;

use crate::env::{PcgRng, RngOracle, compute_seed};
use crate::error::RegistryError;
use crate::modifier::{HistoryWindow, Modifier, ModifierId, ModifierRegistry};

/// Stream id used for server-wide event draws.
pub const SERVER_STREAM: u64 = 0;

/// Picks the first candidate whose cumulative weight exceeds `roll`.
///
/// Returns `None` when `roll` is outside `[0, total)` or there are no
/// weighted candidates. Zero-weight candidates can never win.
pub fn pick_weighted<T: Copy>(candidates: &[(T, u32)], roll: u64) -> Option<T> {
    let mut cumulative = 0u64;
    for &(candidate, weight) in candidates {
        cumulative += weight as u64;
        if roll < cumulative {
            return Some(candidate);
        }
    }
    None
}

/// Deterministic weighted selector.
///
/// Each draw derives a fresh seed from the base seed, the stream id and that
/// stream's own draw counter. A seeded run is fully reproducible, and draws
/// on one stream never shift the rolls of another.
#[derive(Clone, Debug)]
pub struct WeightedSelector<R: RngOracle = PcgRng> {
    rng: R,
    seed: u64,
    /// Draw counter per stream.
    nonces: HashMap<u64, u64>,
}

impl WeightedSelector<PcgRng> {
    /// Creates a selector backed by [`PcgRng`].
    pub fn new(seed: u64) -> Self {
        Self::with_rng(PcgRng, seed)
    }
}

impl<R: RngOracle> WeightedSelector<R> {
    pub fn with_rng(rng: R, seed: u64) -> Self {
        Self {
            rng,
            seed,
            nonces: HashMap::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Natural event draw.
    ///
    /// With `exclude_recent`, names inside `history` are not eligible. The
    /// winner is recorded into `history`.
    pub fn select(
        &mut self,
        registry: &ModifierRegistry,
        history: &mut HistoryWindow,
        exclude_recent: bool,
    ) -> Option<ModifierId> {
        let selected = self.draw(registry, SERVER_STREAM, |_, modifier| {
            !(exclude_recent && history.contains(modifier.name()))
        })?;
        history.record(registry.name(selected));
        Some(selected)
    }

    /// Forced pick that bypasses weights and the no-repeat rule.
    ///
    /// Zero-weight modifiers are allowed. The pick still counts toward the
    /// no-repeat window for later natural draws.
    pub fn select_forced(
        &mut self,
        registry: &ModifierRegistry,
        history: &mut HistoryWindow,
        name: &str,
    ) -> Result<ModifierId, RegistryError> {
        let id = registry.id_of(name)?;
        history.record(registry.name(id));
        Ok(id)
    }

    /// Weighted draw over the registry with a caller-supplied eligibility
    /// filter. Does not touch any history.
    pub fn draw<F>(
        &mut self,
        registry: &ModifierRegistry,
        stream: u64,
        mut eligible: F,
    ) -> Option<ModifierId>
    where
        F: FnMut(ModifierId, &dyn Modifier) -> bool,
    {
        let candidates: Vec<(ModifierId, u32)> = registry
            .iter()
            .filter(|(_, _, weight)| *weight > 0)
            .filter(|(id, modifier, _)| eligible(*id, *modifier))
            .map(|(id, _, weight)| (id, weight))
            .collect();

        if candidates.is_empty() {
            debug!(target: "game_core::selector", stream, "no eligible candidates");
            return None;
        }

        let total: u64 = candidates.iter().map(|(_, w)| *w as u64).sum();
        let roll = self.roll(stream, total);
        let picked = pick_weighted(&candidates, roll);

        debug!(
            target: "game_core::selector",
            stream,
            candidates = candidates.len(),
            total,
            roll,
            picked = picked.map(|id| registry.name(id)),
            "weighted draw"
        );
        picked
    }

    /// Draws a roll in `[0, total)` and advances `stream`'s draw counter.
    pub fn roll(&mut self, stream: u64, total: u64) -> u64 {
        let nonce = self.nonces.entry(stream).or_insert(0);
        let seed = compute_seed(self.seed, *nonce, stream, 0);
        *nonce = nonce.wrapping_add(1);
        self.rng.below(seed, total)
    }
}
