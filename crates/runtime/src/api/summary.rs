//! Outcome records returned by host callbacks.

use game_core::{PlayerId, RoundId};
use serde::{Deserialize, Serialize};

/// What happened during one `on_round_start`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: RoundId,
    /// Reserved slots applied this round, in priority order.
    pub reserved: Vec<String>,
    /// Event applied this round, if any.
    pub event: Option<String>,
    /// True when the event came from a forced override.
    pub forced: bool,
}

/// What happened during one `on_tick`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// Admin commands executed, in submission order.
    pub commands: usize,
    /// Skills assigned by deferred callbacks that fired on this tick.
    pub assigned: Vec<(PlayerId, Vec<String>)>,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        self.commands == 0 && self.assigned.is_empty()
    }
}
