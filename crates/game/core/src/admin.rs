//! Administrative requests against the orchestration state.

use crate::modifier::ModifierKind;

/// A request from the command layer (or a modifier) to mutate orchestration
/// state. Queued requests are executed at the start of the next tick.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AdminCommand {
    /// Change a modifier's selection weight.
    SetWeight {
        kind: ModifierKind,
        name: String,
        weight: i64,
    },
    /// Use this event at the next round start, bypassing weights once.
    ForceNext(String),
    /// Forget the recent event selections.
    ClearHistory,
    /// Turn a reserved slot on or off from the next round start.
    SetSlotEnabled { name: String, enabled: bool },
    /// Hand every player exactly these skills at the next assignment.
    ForceSkills(Vec<String>),
}

impl AdminCommand {
    /// Short label for logs and events.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SetWeight { .. } => "set_weight",
            Self::ForceNext(_) => "force_next",
            Self::ClearHistory => "clear_history",
            Self::SetSlotEnabled { .. } => "set_slot_enabled",
            Self::ForceSkills(_) => "force_skills",
        }
    }
}
