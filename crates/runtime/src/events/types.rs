//! Event payloads published by the runtime.

use game_core::{ModifierKind, PlayerId, RoundId, Target};
use serde::{Deserialize, Serialize};

/// Lifecycle call that a modifier was executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecyclePhase {
    Apply,
    Revert,
}

impl LifecyclePhase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Apply => "apply",
            Self::Revert => "revert",
        }
    }
}

/// Events describing what the orchestration layer did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RuntimeEvent {
    /// A round started and its event was resolved (`None` = no event).
    RoundStarted {
        round: RoundId,
        event: Option<String>,
        forced: bool,
    },

    /// The round ended and every player's skills were stripped.
    RoundEnded { round: RoundId },

    /// A modifier's apply completed.
    ModifierApplied {
        round: RoundId,
        kind: ModifierKind,
        name: String,
        target: Target,
    },

    /// A modifier's revert completed.
    ModifierReverted {
        round: RoundId,
        kind: ModifierKind,
        name: String,
        target: Target,
    },

    /// A modifier's lifecycle call failed or panicked; orchestration continued.
    ModifierFaulted {
        round: RoundId,
        kind: ModifierKind,
        name: String,
        phase: LifecyclePhase,
        error: String,
    },

    /// Skills were handed to a player.
    SkillsAssigned {
        round: RoundId,
        player: PlayerId,
        skills: Vec<String>,
    },

    /// A player's skills were reverted and cleared.
    SkillsRemoved { player: PlayerId, skills: Vec<String> },

    /// An administrative command took effect.
    AdminExecuted { command: String },

    /// An administrative command was refused.
    AdminRejected {
        command: String,
        reason: String,
    },
}
