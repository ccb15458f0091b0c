//! Engine boundary errors.
//!
//! Errors raised by the host adapter when an engine call cannot be honored.
//! The adapter converts native nulls and invalid handles into these values so
//! the orchestration core never has to defend against them.

use crate::error::{ErrorSeverity, GameError};
use crate::state::PlayerId;

/// Errors that occur when calling into the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineError {
    /// The console variable does not exist on this server.
    #[error("convar '{0}' not found")]
    ConVarNotFound(String),

    /// The engine refused the value for this console variable.
    #[error("convar '{name}' rejected value '{value}'")]
    ConVarRejected { name: String, value: String },

    /// The player's pawn or controller handle is no longer valid.
    #[error("player {0} has no valid entity handle")]
    InvalidPlayer(PlayerId),

    /// Any other adapter-level failure.
    #[error("engine call failed: {0}")]
    Other(String),
}

impl GameError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        use EngineError::*;
        match self {
            // Handles go stale between ticks; the next round usually succeeds
            InvalidPlayer(_) => ErrorSeverity::Recoverable,
            ConVarNotFound(_) | ConVarRejected { .. } => ErrorSeverity::Validation,
            Other(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use EngineError::*;
        match self {
            ConVarNotFound(_) => "ENGINE_CONVAR_NOT_FOUND",
            ConVarRejected { .. } => "ENGINE_CONVAR_REJECTED",
            InvalidPlayer(_) => "ENGINE_INVALID_PLAYER",
            Other(_) => "ENGINE_OTHER",
        }
    }
}
